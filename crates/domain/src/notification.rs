/// A rendered notification ready to be handed to a mail transport.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

use crate::shared::entity::{Entity, ID};

/// A `User` owns `Itinerary`s and `Post`s and is the recipient of
/// itinerary reminder notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub full_name: String,
    pub created: i64,
    pub updated: i64,
}

impl User {
    pub fn new(email: String, full_name: String, now: i64) -> Self {
        Self {
            id: Default::default(),
            email,
            full_name,
            created: now,
            updated: now,
        }
    }
}

impl Entity for User {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// Minimal sanity check on a notification address. Full RFC validation is
/// not attempted, bad addresses surface as transport failures instead.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        _ => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_plausible_emails() {
        assert!(is_valid_email("traveller@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
    }

    #[test]
    fn rejects_implausible_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@.com."));
        assert!(!is_valid_email("a@b@c.com"));
    }
}

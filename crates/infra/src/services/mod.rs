mod mailer;

pub use mailer::{IMailer, InMemoryMailer, NoopMailer, SmtpMailer};

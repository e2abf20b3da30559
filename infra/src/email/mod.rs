//! Email transport implementations

mod http_mailer;

pub use http_mailer::{HttpMailer, MailerConfig};

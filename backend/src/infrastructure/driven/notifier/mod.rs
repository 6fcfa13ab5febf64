pub mod log;
pub mod smtp;

pub use log::LogNotifier;
pub use smtp::{SmtpNotifier, SmtpSettings};

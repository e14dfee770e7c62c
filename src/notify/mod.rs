pub mod twilio;

use async_trait::async_trait;

pub use twilio::TwilioNotifier;

/// An outbound text message.
#[derive(Debug, Clone, PartialEq)]
pub struct Sms {
    pub to: String,
    pub from: String,
    pub body: String,
}

impl Sms {
    /// Alert sent to the site owner when a new submission is stored.
    pub fn for_submission(to: &str, from: &str, name: &str, message: &str) -> Self {
        Self {
            to: to.to_string(),
            from: from.to_string(),
            body: format!("New Form Submission:\nName: {name}\nMessage: {message}"),
        }
    }
}

#[derive(Debug)]
pub enum NotifyError {
    Transport(String),
    Rejected { status: u16, body: String },
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyError::Transport(msg) => write!(f, "SMS request failed: {msg}"),
            NotifyError::Rejected { status, body } => {
                write!(f, "SMS provider rejected message ({status}): {body}")
            }
        }
    }
}

impl std::error::Error for NotifyError {}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sender and recipient for submission alerts. `None` disables sending.
    fn route(&self) -> Option<(&str, &str)>;

    async fn send(&self, sms: &Sms) -> Result<(), NotifyError>;
}

/// Used when no SMS provider is configured.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    fn route(&self) -> Option<(&str, &str)> {
        None
    }

    async fn send(&self, _sms: &Sms) -> Result<(), NotifyError> {
        Ok(())
    }
}

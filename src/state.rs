use std::sync::Arc;

use crate::config::Config;
use crate::db::SubmissionStore;
use crate::notify::Notifier;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Arc<dyn SubmissionStore>,
    pub notifier: Arc<dyn Notifier>,
    pub config: Config,
}

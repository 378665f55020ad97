pub mod config_service;
pub mod logging;
pub mod paths;

pub use config_service::{ConfigService, ENV_BACKEND_URL, ENV_SESSION};
pub use logging::{LogTarget, init_logging};
pub use paths::MailmatePaths;

pub mod config;
pub mod lifecycle;

pub use config::{
    keys, RegistrationTiming, ServiceSettings, CONFIG_FILE_NAME, DEFAULT_CONFIG_DIR,
    DEFAULT_NAMESPACE,
};
pub use lifecycle::StartupState;

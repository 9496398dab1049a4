mod app_type;
mod config_files;

pub use self::app_type::AppType;
pub use self::config_files::{ConfigFile, ConfigFiles};

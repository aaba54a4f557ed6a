pub mod settings;
pub mod user;

pub use settings::{AliasResolution, ReparseStrategy, Settings};
pub use user::{load_settings, load_user_settings, user_config_path};

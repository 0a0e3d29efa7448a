pub mod settings;

pub use settings::{AppConfig, IdentityConfig, ServerConfig, UploadConfig};

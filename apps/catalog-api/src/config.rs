use core_config::{AppInfo, FromEnv, app_info, env_required, server::ServerConfig};
use domain_notifications::SmtpConfig;
use image_storage::CloudinaryConfig;

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub smtp: SmtpConfig,
    pub cloudinary: CloudinaryConfig,
    /// Mailbox that receives item enquiries
    pub recipient_email: String,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let smtp = SmtpConfig::from_env()?;
        let cloudinary = CloudinaryConfig::from_env()?;
        let recipient_email = env_required("RECIPIENT_EMAIL")?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            smtp,
            cloudinary,
            recipient_email,
            environment,
        })
    }
}

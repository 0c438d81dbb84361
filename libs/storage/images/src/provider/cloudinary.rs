//! Cloudinary upload provider using the signed upload API.

use super::ImageStorage;
use crate::error::{StorageError, StorageResult};
use crate::models::{ImageUpload, StoredImage};
use async_trait::async_trait;
use chrono::Utc;
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Every upload is converted to this format by Cloudinary.
const TARGET_FORMAT: &str = "webp";

const PUBLIC_ID_SUFFIX_LEN: usize = 6;

/// Cloudinary account configuration.
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder all uploads land in.
    pub folder: String,
    /// API origin, overridable for tests and proxies.
    pub api_base: String,
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            folder: "item_images".to_string(),
            api_base: "https://api.cloudinary.com".to_string(),
        }
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.api_base.trim_end_matches('/'),
            self.cloud_name
        )
    }
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .field("folder", &self.folder)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl FromEnv for CloudinaryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(
            env_required("CLOUDINARY_CLOUD_NAME")?,
            env_required("CLOUDINARY_API_KEY")?,
            env_required("CLOUDINARY_API_SECRET")?,
        )
        .with_folder(env_or_default("CLOUDINARY_FOLDER", "item_images"))
        .with_api_base(env_or_default(
            "CLOUDINARY_API_BASE",
            "https://api.cloudinary.com",
        )))
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Image store backed by Cloudinary.
#[derive(Clone)]
pub struct CloudinaryStorage {
    client: reqwest::Client,
    config: Arc<CloudinaryConfig>,
}

impl CloudinaryStorage {
    pub fn new(config: CloudinaryConfig) -> StorageResult<Self> {
        if config.cloud_name.is_empty() || config.api_key.is_empty() || config.api_secret.is_empty()
        {
            return Err(StorageError::Config(
                "Cloudinary cloud name, API key and API secret must be set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &CloudinaryConfig {
        &self.config
    }

    fn signed_params(&self, public_id: &str, timestamp: i64) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("folder", self.config.folder.clone()),
            ("format", TARGET_FORMAT.to_string()),
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp.to_string()),
        ])
    }
}

/// SHA-256 over `k=v` pairs sorted by key and joined by `&`, with the secret appended.
pub(crate) fn sign_params(params: &BTreeMap<&'static str, String>, api_secret: &str) -> String {
    let to_sign = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let hash = Sha256::digest(format!("{to_sign}{api_secret}").as_bytes());
    format!("{hash:x}")
}

/// `{field}-{unix millis}-{6 base36 chars}`
pub(crate) fn generate_public_id(field_name: &str) -> String {
    let suffix: String = (0..PUBLIC_ID_SUFFIX_LEN)
        .map(|_| char::from_digit(rand::random_range(0..36), 36).unwrap_or('0'))
        .collect();

    format!("{}-{}-{}", field_name, Utc::now().timestamp_millis(), suffix)
}

#[async_trait]
impl ImageStorage for CloudinaryStorage {
    async fn upload(&self, image: &ImageUpload) -> StorageResult<StoredImage> {
        let public_id = generate_public_id(&image.field_name);
        let timestamp = Utc::now().timestamp();
        let params = self.signed_params(&public_id, timestamp);
        let signature = sign_params(&params, &self.config.api_secret);

        debug!(
            field = %image.field_name,
            file_name = %image.file_name,
            size = image.size(),
            public_id = %public_id,
            "Uploading image to Cloudinary"
        );

        let file = Part::bytes(image.data.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;

        let form = params
            .into_iter()
            .fold(Form::new().part("file", file), |form, (k, v)| form.text(k, v))
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => format!("Cloudinary returned {status}"),
            };
            error!(
                status = %status,
                file_name = %image.file_name,
                error = %message,
                "Cloudinary rejected upload"
            );
            return Err(StorageError::Upload(message));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| StorageError::Upload(format!("Unexpected Cloudinary response: {e}")))?;

        if body.secure_url.is_empty() {
            return Err(StorageError::Upload(
                "Cloudinary response did not include a URL".to_string(),
            ));
        }

        info!(public_id = %body.public_id, url = %body.secure_url, "Image uploaded");

        Ok(StoredImage {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    fn name(&self) -> &'static str {
        "cloudinary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_params_known_value() {
        let params = BTreeMap::from([
            ("timestamp", "1700000000".to_string()),
            ("public_id", "coverImage-1700000000000-abc123".to_string()),
            ("format", "webp".to_string()),
            ("folder", "item_images".to_string()),
        ]);

        assert_eq!(
            sign_params(&params, "abcd"),
            "d06f57bf76da764767707e141c4f8dea69b32159e9b306e3e7c1757af5da9608"
        );
    }

    #[test]
    fn test_generate_public_id_shape() {
        let id = generate_public_id("additionalImages");
        let parts: Vec<&str> = id.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "additionalImages");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), PUBLIC_ID_SUFFIX_LEN);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generate_public_id_unique() {
        assert_ne!(generate_public_id("coverImage"), generate_public_id("coverImage"));
    }

    #[test]
    fn test_upload_url_trims_trailing_slash() {
        let config = CloudinaryConfig::new("demo", "key", "secret").with_api_base("http://localhost:9000/");
        assert_eq!(config.upload_url(), "http://localhost:9000/v1_1/demo/image/upload");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = CloudinaryConfig::new("demo", "key", "super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_new_rejects_blank_credentials() {
        let result = CloudinaryStorage::new(CloudinaryConfig::new("demo", "", "secret"));
        assert!(matches!(result, Err(StorageError::Config(_))));
    }

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars(
            [
                ("CLOUDINARY_CLOUD_NAME", Some("demo")),
                ("CLOUDINARY_API_KEY", Some("123")),
                ("CLOUDINARY_API_SECRET", Some("s3cr3t")),
                ("CLOUDINARY_FOLDER", None),
                ("CLOUDINARY_API_BASE", None),
            ],
            || {
                let config = CloudinaryConfig::from_env().unwrap();
                assert_eq!(config.folder, "item_images");
                assert_eq!(config.api_base, "https://api.cloudinary.com");
                assert_eq!(
                    config.upload_url(),
                    "https://api.cloudinary.com/v1_1/demo/image/upload"
                );
            },
        );
    }

    #[test]
    fn test_from_env_missing_secret() {
        temp_env::with_vars(
            [
                ("CLOUDINARY_CLOUD_NAME", Some("demo")),
                ("CLOUDINARY_API_KEY", Some("123")),
                ("CLOUDINARY_API_SECRET", None),
            ],
            || {
                let err = CloudinaryConfig::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "CLOUDINARY_API_SECRET"));
            },
        );
    }
}

//! # Configuration Structures
//!
//! All configuration structures:
//! - Use `serde` for serialization/deserialization
//! - Use `validator` for input validation

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use validator::Validate;

use crate::error::ConfigError;

/// Top-level configuration for the concordances read/write service.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Aggregates the service identity reported by the admin endpoints, the
/// listen port, and the two back-ends the service writes to.
///
/// ## Usage
/// ```rust
/// use config::{AppConfig, Validate};
///
/// let mut config = AppConfig::default();
/// config.dynamodb.table = "concordances".to_string();
/// config.sns.topic_arn = "arn:aws:sns:eu-west-1:000000000000:concordances".to_string();
/// assert!(config.validate().is_ok());
/// ```
///
/// ## Fields
/// - `app_system_code`: System code reported by `/__health` and `/__build-info`
/// - `app_name`: Human readable name reported by `/__health`
/// - `port`: HTTP listen port (default: 8080)
/// - `dynamodb`: Table holding the concordance records
/// - `sns`: Topic receiving change notifications
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_app_system_code")]
    #[validate(length(min = 1, max = 255))]
    pub app_system_code: String,

    #[serde(default = "default_app_name")]
    #[validate(length(min = 1, max = 255))]
    pub app_name: String,

    #[serde(default = "default_port")]
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    #[serde(default)]
    #[validate(nested)]
    pub dynamodb: DynamoDbConfig,

    #[serde(default)]
    #[validate(nested)]
    pub sns: SnsConfig,
}

fn default_app_system_code() -> String {
    "concordances-rw-dynamodb".to_string()
}

fn default_app_name() -> String {
    "Concordances RW DynamoDB".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_region() -> String {
    "eu-west-1".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_system_code: default_app_system_code(),
            app_name: default_app_name(),
            port: default_port(),
            dynamodb: DynamoDbConfig::default(),
            sns: SnsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Runs all validation rules and hands the configuration back on success.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        check_endpoint("dynamodb.endpoint", self.dynamodb.endpoint.as_deref())?;
        check_endpoint("sns.endpoint", self.sns.endpoint.as_deref())?;
        Ok(self)
    }

    /// Address the HTTP server binds to: all interfaces on `port`.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// DynamoDB table settings.
///
/// ## Fields
/// - `table`: Table name, hash key `conceptId` (required, 3-255 chars)
/// - `region`: AWS region of the table (default: "eu-west-1")
/// - `endpoint`: Endpoint override, e.g. DynamoDB Local (optional)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct DynamoDbConfig {
    #[serde(default)]
    #[validate(length(min = 3, max = 255))]
    pub table: String,

    #[serde(default = "default_region")]
    #[validate(length(min = 1))]
    pub region: String,

    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for DynamoDbConfig {
    fn default() -> Self {
        Self {
            table: String::new(),
            region: default_region(),
            endpoint: None,
        }
    }
}

/// SNS topic settings.
///
/// ## Fields
/// - `topic_arn`: ARN of the notification topic (required)
/// - `region`: AWS region of the topic (default: "eu-west-1")
/// - `endpoint`: Endpoint override for local emulators (optional)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct SnsConfig {
    #[serde(default)]
    #[validate(custom(function = "validate_topic_arn"))]
    pub topic_arn: String,

    #[serde(default = "default_region")]
    #[validate(length(min = 1))]
    pub region: String,

    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for SnsConfig {
    fn default() -> Self {
        Self {
            topic_arn: String::new(),
            region: default_region(),
            endpoint: None,
        }
    }
}

/// Endpoint overrides are handed to the AWS SDK as base URLs.
fn check_endpoint(field: &str, endpoint: Option<&str>) -> Result<(), ConfigError> {
    match endpoint {
        Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
            Err(ConfigError::Invalid {
                field: field.to_string(),
                reason: format!("expected an http(s) URL, got {url:?}"),
            })
        }
        _ => Ok(()),
    }
}

fn validate_topic_arn(value: &str) -> Result<(), validator::ValidationError> {
    if value.starts_with("arn:") && value.split(':').count() >= 6 {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_topic_arn"))
    }
}

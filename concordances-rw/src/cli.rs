//! Command line and environment configuration.

use clap::{Parser, ValueEnum};

use config::{AppConfig, ConfigError, DynamoDbConfig, SnsConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "concordances-rw",
    version,
    about = "Reads and writes concorded concepts to DynamoDB, notifying changes over SNS"
)]
pub struct Args {
    /// System code of the application
    #[arg(long, env = "APP_SYSTEM_CODE", default_value = "concordances-rw-dynamodb")]
    pub app_system_code: String,

    /// Application name
    #[arg(long, env = "APP_NAME", default_value = "Concordances RW DynamoDB")]
    pub app_name: String,

    /// Port to listen on
    #[arg(long, env = "APP_PORT", default_value_t = 8080)]
    pub port: u16,

    /// DynamoDB table holding the concordances
    #[arg(long, env = "DYNAMODB_TABLE")]
    pub dynamodb_table: String,

    #[arg(long, env = "DYNAMODB_REGION", default_value = "eu-west-1")]
    pub dynamodb_region: String,

    /// Endpoint override, e.g. DynamoDB Local
    #[arg(long, env = "DYNAMODB_ENDPOINT")]
    pub dynamodb_endpoint: Option<String>,

    /// SNS topic receiving change notifications
    #[arg(long, env = "SNS_TOPIC_ARN")]
    pub sns_topic_arn: String,

    #[arg(long, env = "SNS_REGION", default_value = "eu-west-1")]
    pub sns_region: String,

    #[arg(long, env = "SNS_ENDPOINT")]
    pub sns_endpoint: Option<String>,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Args {
    /// Converts the parsed flags into a validated `AppConfig`.
    pub fn to_config(&self) -> Result<AppConfig, ConfigError> {
        AppConfig {
            app_system_code: self.app_system_code.clone(),
            app_name: self.app_name.clone(),
            port: self.port,
            dynamodb: DynamoDbConfig {
                table: self.dynamodb_table.clone(),
                region: self.dynamodb_region.clone(),
                endpoint: self.dynamodb_endpoint.clone(),
            },
            sns: SnsConfig {
                topic_arn: self.sns_topic_arn.clone(),
                region: self.sns_region.clone(),
                endpoint: self.sns_endpoint.clone(),
            },
        }
        .validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPIC: &str = "arn:aws:sns:eu-west-1:000000000000:concordances";

    #[test]
    fn test_required_flags_with_defaults() {
        let args = Args::try_parse_from([
            "concordances-rw",
            "--dynamodb-table",
            "concordances",
            "--sns-topic-arn",
            TOPIC,
        ])
        .unwrap();

        let config = args.to_config().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.dynamodb.table, "concordances");
        assert_eq!(config.sns.topic_arn, TOPIC);
        assert_eq!(config.dynamodb.region, "eu-west-1");
        assert_eq!(args.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "concordances-rw",
            "--port",
            "9090",
            "--dynamodb-table",
            "concordances",
            "--dynamodb-endpoint",
            "http://localhost:8000",
            "--sns-topic-arn",
            TOPIC,
            "--sns-region",
            "us-east-1",
            "--log-format",
            "json",
        ])
        .unwrap();

        let config = args.to_config().unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(
            config.dynamodb.endpoint.as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(config.sns.region, "us-east-1");
        assert_eq!(args.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_topic_is_rejected() {
        let args = Args::try_parse_from([
            "concordances-rw",
            "--dynamodb-table",
            "concordances",
            "--sns-topic-arn",
            "not-an-arn",
        ])
        .unwrap();

        assert!(args.to_config().is_err());
    }
}

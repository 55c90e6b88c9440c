use std::{env, fmt};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// SMTP transport settings. Only present when `SMTP_HOST` is set.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("from_address", &self.from_address)
            .finish()
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Orders table name (default: "orders")
    pub orders_table: String,
    /// Users table name (default: "users")
    pub users_table: String,
    /// Default tracing filter when `RUST_LOG` is unset (default: "info")
    pub log_level: String,
    /// Log output format (default: pretty)
    pub log_format: LogFormat,
    /// AWS region (default: "us-east-1")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub aws_region: String,
    /// Custom DynamoDB endpoint, e.g. a local DynamoDB container.
    #[allow(dead_code)]
    pub aws_endpoint_url: Option<String>,
    /// SMTP settings for the confirmation email notifier.
    #[allow(dead_code)]
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ORDERS_TABLE` - Orders table name (default: "orders")
    /// - `USERS_TABLE` - Users table name (default: "users")
    /// - `LOG_LEVEL` - Default log filter (default: "info")
    /// - `LOG_FORMAT` - `json` or `pretty` (default: "pretty")
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (optional)
    /// - `SMTP_HOST`, `SMTP_PORT` (default: 587), `SMTP_USERNAME`,
    ///   `SMTP_PASSWORD`, `EMAIL_FROM` (default: "no-reply@orderdesk.local")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let smtp = non_empty("SMTP_HOST").map(|host| SmtpConfig {
            host,
            port: non_empty("SMTP_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            username: non_empty("SMTP_USERNAME"),
            password: non_empty("SMTP_PASSWORD"),
            from_address: non_empty("EMAIL_FROM")
                .unwrap_or_else(|| "no-reply@orderdesk.local".to_string()),
        });

        Self {
            orders_table: non_empty("ORDERS_TABLE").unwrap_or_else(|| "orders".to_string()),
            users_table: non_empty("USERS_TABLE").unwrap_or_else(|| "users".to_string()),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format: non_empty("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(LogFormat::Pretty),
            aws_region: non_empty("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            aws_endpoint_url: non_empty("AWS_ENDPOINT_URL"),
            smtp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(lookup_from(&[]));

        assert_eq!(config.orders_table, "orders");
        assert_eq!(config.users_table, "users");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.aws_region, "us-east-1");
        assert_eq!(config.aws_endpoint_url, None);
        assert_eq!(config.smtp, None);
    }

    #[test]
    fn test_table_names_and_logging() {
        let config = Config::from_lookup(lookup_from(&[
            ("ORDERS_TABLE", "prod-orders"),
            ("USERS_TABLE", "prod-users"),
            ("LOG_LEVEL", "debug"),
            ("LOG_FORMAT", "JSON"),
        ]));

        assert_eq!(config.orders_table, "prod-orders");
        assert_eq!(config.users_table, "prod-users");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[("ORDERS_TABLE", ""), ("SMTP_HOST", " ")]));

        assert_eq!(config.orders_table, "orders");
        assert_eq!(config.smtp, None);
    }

    #[test]
    fn test_smtp_settings() {
        let config = Config::from_lookup(lookup_from(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "2525"),
            ("SMTP_USERNAME", "mailer"),
            ("SMTP_PASSWORD", "secret"),
        ]));

        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.port, 2525);
        assert_eq!(smtp.username.as_deref(), Some("mailer"));
        assert_eq!(smtp.from_address, "no-reply@orderdesk.local");
    }

    #[test]
    fn test_invalid_smtp_port_uses_default() {
        let config = Config::from_lookup(lookup_from(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "not-a-port"),
        ]));

        assert_eq!(config.smtp.unwrap().port, 587);
    }

    #[test]
    fn test_smtp_debug_hides_password() {
        let config = Config::from_lookup(lookup_from(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PASSWORD", "secret"),
        ]));

        let debug = format!("{:?}", config.smtp.unwrap());
        assert!(!debug.contains("secret"));
    }
}

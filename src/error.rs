use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("upstream returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    #[cfg(feature = "discord")]
    #[error("Discord error: {0}")]
    Discord(Box<serenity::Error>),

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "discord")]
impl From<serenity::Error> for Error {
    fn from(err: serenity::Error) -> Self {
        Error::Discord(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_render_field_names() {
        let err = Error::from(ConfigError::MissingField { field: "base_url" });
        assert_eq!(err.to_string(), "missing required field: base_url");

        let err = Error::from(ConfigError::InvalidValue {
            field: "prefix",
            reason: "must not be empty".to_string(),
        });
        assert_eq!(err.to_string(), "invalid value for prefix: must not be empty");
    }

    #[test]
    fn upstream_status_mentions_code() {
        let err = Error::UpstreamStatus { status: 503 };
        assert_eq!(err.to_string(), "upstream returned HTTP 503");
    }
}

//! Error types for the endpoint monitor

use std::fmt;

pub type Result<T> = std::result::Result<T, MonitorError>;

#[derive(Debug)]
pub enum MonitorError {
    /// IO operation failed
    Io(std::io::Error),

    /// HTTP request failed
    Http(reqwest::Error),

    /// Endpoint document could not be parsed
    Yaml(serde_yaml::Error),

    /// Request body is not well-formed JSON
    MalformedPayload(serde_json::Error),

    /// Endpoint descriptor or runtime settings are invalid
    InvalidConfiguration(String),

    /// Transport error
    Transport(String),

    /// Availability queried for a domain that was never recorded
    DomainNotFound(String),

    /// Generic error with message
    Other(String),
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Io(err) => write!(f, "IO error: {}", err),
            MonitorError::Http(err) => write!(f, "HTTP error: {}", err),
            MonitorError::Yaml(err) => write!(f, "YAML error: {}", err),
            MonitorError::MalformedPayload(err) => write!(f, "Malformed payload: {}", err),
            MonitorError::InvalidConfiguration(msg) => {
                write!(f, "Invalid endpoint configuration: {}", msg)
            }
            MonitorError::Transport(msg) => write!(f, "Transport error: {}", msg),
            MonitorError::DomainNotFound(domain) => write!(f, "Domain not found: {}", domain),
            MonitorError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for MonitorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MonitorError::Io(err) => Some(err),
            MonitorError::Http(err) => Some(err),
            MonitorError::Yaml(err) => Some(err),
            MonitorError::MalformedPayload(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MonitorError {
    fn from(err: std::io::Error) -> Self {
        MonitorError::Io(err)
    }
}

impl From<reqwest::Error> for MonitorError {
    fn from(err: reqwest::Error) -> Self {
        MonitorError::Http(err)
    }
}

impl From<serde_yaml::Error> for MonitorError {
    fn from(err: serde_yaml::Error) -> Self {
        MonitorError::Yaml(err)
    }
}

impl From<serde_json::Error> for MonitorError {
    fn from(err: serde_json::Error) -> Self {
        MonitorError::MalformedPayload(err)
    }
}

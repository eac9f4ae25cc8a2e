//! Endpoint descriptors and the YAML endpoint list loader

use crate::errors::{MonitorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_METHOD: &str = "GET";

/// One entry of the endpoint document, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEndpoint {
    pub name: Option<String>,
    pub url: Option<String>,
    pub method: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<String>,
}

/// A validated endpoint, immutable for the lifetime of the monitor
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub name: String,
    pub url: Url,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl RawEndpoint {
    /// Check required fields and apply defaults
    pub fn validate(self) -> Result<Endpoint> {
        let name = non_empty(self.name).ok_or_else(|| {
            MonitorError::InvalidConfiguration("name and url are required".to_string())
        })?;
        let raw_url = non_empty(self.url).ok_or_else(|| {
            MonitorError::InvalidConfiguration("name and url are required".to_string())
        })?;

        let url = Url::parse(&raw_url).map_err(|e| {
            MonitorError::InvalidConfiguration(format!("{}: invalid url '{}': {}", name, raw_url, e))
        })?;

        if url.host_str().is_none_or(str::is_empty) {
            return Err(MonitorError::InvalidConfiguration(format!(
                "{}: url '{}' has no host",
                name, raw_url
            )));
        }

        Ok(Endpoint {
            name,
            url,
            method: non_empty(self.method).unwrap_or_else(|| DEFAULT_METHOD.to_string()),
            headers: self.headers.unwrap_or_default(),
            body: self.body.filter(|body| !body.is_empty()),
        })
    }
}

impl Endpoint {
    /// Domain key used to group availability counters
    pub fn domain(&self) -> &str {
        // validate() guarantees a host
        self.url.host_str().unwrap_or_default()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse an endpoint document and validate every entry in order
pub fn parse_endpoints(content: &str) -> Result<Vec<Endpoint>> {
    let raw: Vec<RawEndpoint> = serde_yaml::from_str(content)?;

    raw.into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let label = entry.name.clone().unwrap_or_else(|| "<unnamed>".to_string());
            entry.validate().map_err(|e| match e {
                MonitorError::InvalidConfiguration(msg) => MonitorError::InvalidConfiguration(
                    format!("entry {} ({}): {}", index, label, msg),
                ),
                other => other,
            })
        })
        .collect()
}

/// Load the endpoint list from a YAML file
pub fn load_endpoints(path: impl AsRef<Path>) -> Result<Vec<Endpoint>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let endpoints = parse_endpoints(&content)?;

    if endpoints.is_empty() {
        warn!("No endpoints defined in {}", path.display());
    } else {
        debug!("Loaded {} endpoints from {}", endpoints.len(), path.display());
    }

    Ok(endpoints)
}

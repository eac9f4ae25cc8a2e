//! HTTP request execution for endpoint checks

use crate::endpoint::Endpoint;
use crate::errors::{MonitorError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of issuing one request against an endpoint
#[derive(Debug)]
pub enum Outcome {
    /// The request completed with a status and wall-clock duration
    Responded { status: u16, elapsed: Duration },

    /// The request could not be completed
    Failed(MonitorError),
}

impl Outcome {
    pub fn responded(status: u16, elapsed: Duration) -> Self {
        Outcome::Responded { status, elapsed }
    }
}

/// Issues a single request per call, never retrying
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, endpoint: &Endpoint) -> Outcome;
}

/// Executor backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    pub fn new(http_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(http_timeout)
            .user_agent(format!("endpoint_monitor/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MonitorError::Http)?;

        Ok(Self { client })
    }

    async fn send(&self, endpoint: &Endpoint) -> Result<(u16, Duration)> {
        let method = Method::from_bytes(endpoint.method.to_uppercase().as_bytes()).map_err(|_| {
            MonitorError::InvalidConfiguration(format!("unsupported method '{}'", endpoint.method))
        })?;

        // Parsed before anything goes on the wire
        let payload = endpoint
            .body
            .as_deref()
            .map(serde_json::from_str::<Value>)
            .transpose()?;

        let mut request = self.client.request(method, endpoint.url.clone());
        for (key, value) in &endpoint.headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(payload) = &payload {
            request = request.json(payload);
        }

        let start_time = Instant::now();
        let response = request.send().await.map_err(classify_reqwest_error)?;
        let status = response.status().as_u16();
        response.bytes().await.map_err(classify_reqwest_error)?;
        let elapsed = start_time.elapsed();

        debug!(
            "{} {} responded {} in {}ms",
            endpoint.method,
            endpoint.url,
            status,
            elapsed.as_millis()
        );

        Ok((status, elapsed))
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, endpoint: &Endpoint) -> Outcome {
        match self.send(endpoint).await {
            Ok((status, elapsed)) => Outcome::responded(status, elapsed),
            Err(err) => Outcome::Failed(err),
        }
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> MonitorError {
    if err.is_timeout() {
        MonitorError::Transport("Request timeout".to_string())
    } else {
        MonitorError::Http(err)
    }
}

//! HTTP client plumbing for inter-service calls
//!
//! Calls between services are plain synchronous HTTP with a per-request
//! timeout and a bounded retry on transport errors and 5xx responses.
//! 4xx responses are returned to the caller immediately.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Errors surfaced by [`ServiceClient`]
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Inter-service HTTP client with timeout and bounded retry
pub struct ServiceClient {
    client: Client,
    base_url: String,
    retry_attempts: u32,
    retry_backoff: Duration,
}

impl ServiceClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        retry_attempts: u32,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ServiceError::Build)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_attempts,
            retry_backoff: Duration::from_millis(200),
        })
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        let mut last_err: Option<ServiceError> = None;

        for attempt in 0..=self.retry_attempts {
            if attempt > 0 {
                debug!(%url, attempt, "retrying service call");
                tokio::time::sleep(self.retry_backoff).await;
            }

            match self.client.get(&url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json::<T>().await.map_err(|source| {
                            ServiceError::Decode {
                                url: url.clone(),
                                source,
                            }
                        });
                    }

                    let body = response.text().await.unwrap_or_default();
                    let err = ServiceError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                        body,
                    };

                    if status.is_server_error() {
                        warn!(%url, status = status.as_u16(), "service call failed, may retry");
                        last_err = Some(err);
                        continue;
                    }
                    return Err(err);
                }
                Err(source) => {
                    warn!(%url, error = %source, "service call transport error, may retry");
                    last_err = Some(ServiceError::Transport {
                        url: url.clone(),
                        source,
                    });
                }
            }
        }

        Err(last_err.expect("at least one attempt was made"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client =
            ServiceClient::new("http://localhost:8081/", Duration::from_secs(2), 1).unwrap();
        assert_eq!(client.base_url, "http://localhost:8081");
    }
}

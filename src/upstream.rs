//! Shared HTTP plumbing for the upstream providers
//!
//! One GET per call, no retries: a failed request is logged and returned to
//! the caller, which decides whether the result is simply absent.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Context;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{ErrorCode, WeatherMapError};

/// Build a reqwest client with the configured timeout and user agent
pub fn build_client(timeout_seconds: u32, user_agent: &str) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds.into()))
        .user_agent(user_agent)
        .build()
        .with_context(|| "Failed to create HTTP client")
}

/// Strip the API key from a URL before it goes anywhere near a log line
#[must_use]
pub fn redact(url: &str) -> String {
    match url.split_once("appid=") {
        Some((head, tail)) => {
            let rest = tail.split_once('&').map(|(_, rest)| rest);
            match rest {
                Some(rest) => format!("{head}appid=***&{rest}"),
                None => format!("{head}appid=***"),
            }
        }
        None => url.to_string(),
    }
}

/// GET `url` and decode the JSON body into `T`
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    provider: &str,
) -> crate::Result<T> {
    let safe_url = redact(url);
    debug!("{} request URL: {}", provider, safe_url);
    let start_time = Instant::now();

    let response = client.get(url).send().await.map_err(|e| {
        warn!("Network error calling {}: {}", provider, e);
        WeatherMapError::api_with_context(
            format!("Network error calling {provider}: {e}"),
            ErrorCode::ApiNetworkError,
            HashMap::from([("url".to_string(), safe_url.clone())]),
        )
    })?;

    let status = response.status();
    if !status.is_success() {
        let code = match status.as_u16() {
            401 => ErrorCode::ApiUnauthorized,
            404 => ErrorCode::ApiLocationNotFound,
            _ => ErrorCode::ApiStatus,
        };
        warn!("{} returned HTTP {}", provider, status);
        return Err(WeatherMapError::api_with_context(
            format!(
                "{provider} request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            ),
            code,
            HashMap::from([
                ("status_code".to_string(), status.as_u16().to_string()),
                ("url".to_string(), safe_url),
            ]),
        ));
    }

    let body = response.json::<T>().await.map_err(|e| {
        warn!("Failed to parse {} response: {}", provider, e);
        WeatherMapError::api_with_context(
            format!("Invalid data received from {provider}"),
            ErrorCode::ApiInvalidResponse,
            HashMap::from([("error".to_string(), e.to_string())]),
        )
    })?;

    let total_duration = start_time.elapsed();
    info!(
        "{} responded in {:.3}s",
        provider,
        total_duration.as_secs_f64()
    );
    if total_duration.as_secs() > 5 {
        warn!(
            "Slow {} response detected: {:.3}s",
            provider,
            total_duration.as_secs_f64()
        );
    }

    Ok(body)
}

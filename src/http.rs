//! Shared HTTP plumbing for upstream JSON APIs.

use reqwest::Client;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Issue a single GET request and decode the JSON body.
///
/// All failure modes collapse into `None`: connection errors, timeouts,
/// non-2xx statuses and undecodable bodies. The cause is logged here;
/// callers pick the user-facing fallback text. No retries.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    headers: HeaderMap,
) -> Option<T> {
    let result = async {
        let response = client.get(url).headers(headers).send().await?;
        response.error_for_status()?.json::<T>().await
    }
    .await;

    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(url, error = %err, "upstream request failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn test_transport_failure_yields_none() {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(2))
            .build()
            .unwrap();
        // Nothing listens on the discard port; connection is refused.
        let result: Option<Value> =
            get_json(&client, "http://127.0.0.1:9/json", HeaderMap::new()).await;
        assert!(result.is_none());
    }
}

use crate::core::error::DataUnavailable;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("datainfo/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by a provider. Every request is bounded by
/// `timeout`.
pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Issues a single GET and returns the body of a successful response.
///
/// Transport errors, timeouts and non-2xx statuses all map to
/// [`DataUnavailable`]; there is no retry.
pub async fn fetch_text(
    client: &reqwest::Client,
    source_name: &str,
    url: &str,
) -> Result<String, DataUnavailable> {
    debug!("Requesting {} data from {}", source_name, url);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| DataUnavailable::new(source_name, format!("request to {url} failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DataUnavailable::new(
            source_name,
            format!("{url} returned HTTP {status}"),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| DataUnavailable::new(source_name, format!("failed to read body: {e}")))?;
    if body.trim().is_empty() {
        return Err(DataUnavailable::new(source_name, "empty response body"));
    }
    Ok(body)
}

/// Fetches `url` and decodes its JSON body.
pub async fn fetch_json<T>(
    client: &reqwest::Client,
    source_name: &str,
    url: &str,
) -> Result<T, DataUnavailable>
where
    T: serde::de::DeserializeOwned,
{
    let body = fetch_text(client, source_name, url).await?;
    serde_json::from_str(&body)
        .map_err(|e| DataUnavailable::new(source_name, format!("unexpected payload: {e}")))
}

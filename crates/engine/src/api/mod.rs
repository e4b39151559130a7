//! Clients for the upstream public APIs (no authentication required)

pub mod binance;
pub mod clob;
pub mod gamma;
pub mod polymarket;
pub mod subgraph;

pub use binance::BinanceClient;
pub use clob::ClobClient;
pub use gamma::GammaClient;
pub use polymarket::PolymarketDataClient;
pub use subgraph::SubgraphClient;

use crate::error::{ScreenerError, ScreenerResult};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// One HTTP client shared by every upstream wrapper
pub fn build_http_client(timeout: Duration) -> ScreenerResult<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(concat!("polyscreener/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// `base_url` extended with `segments`, each escaped as exactly one path segment
pub(crate) fn segment_url(base_url: &str, segments: &[&str]) -> ScreenerResult<Url> {
    let mut url =
        Url::parse(base_url).map_err(|e| ScreenerError::InvalidUrl(format!("{base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| ScreenerError::InvalidUrl(format!("{base_url}: cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// GET `url` with `query` and decode the JSON body, mapping non-2xx to [`ScreenerError::Status`]
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    endpoint: &'static str,
    url: &str,
    query: &[(&str, String)],
) -> ScreenerResult<T> {
    let resp = client.get(url).query(query).send().await?;
    let resp = check_status(endpoint, resp).await?;
    Ok(resp.json().await?)
}

pub(crate) async fn check_status(endpoint: &'static str, resp: Response) -> ScreenerResult<Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(ScreenerError::Status {
        endpoint,
        status,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_url_escapes_separators() {
        let url = segment_url("https://gamma.example", &["markets", "../events"]).unwrap();
        assert_eq!(url.as_str(), "https://gamma.example/markets/..%2Fevents");

        let url = segment_url("https://gamma.example/", &["markets", "a?x=1#frag"]).unwrap();
        assert_eq!(url.as_str(), "https://gamma.example/markets/a%3Fx=1%23frag");
    }

    #[test]
    fn test_segment_url_keeps_base_path() {
        let url = segment_url("http://127.0.0.1:9000/gamma/", &["markets", "42"]).unwrap();
        assert_eq!(url.path(), "/gamma/markets/42");
    }

    #[test]
    fn test_segment_url_rejects_bad_base() {
        assert!(matches!(
            segment_url("not a url", &["markets"]),
            Err(ScreenerError::InvalidUrl(_))
        ));
    }
}

//! Base URL used to build shareable snapshot links.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::app::AppState;

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";

/// The configured public base URL, or one derived from the request's
/// `Host` (honouring `X-Forwarded-*` from a reverse proxy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareBaseUrl(pub String);

#[async_trait]
impl FromRequestParts<AppState> for ShareBaseUrl {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(ShareBaseUrl(resolve_base_url(
            &state.config.share.public_base_url,
            &parts.headers,
        )))
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(',').next().unwrap_or(value).trim())
        .filter(|value| !value.is_empty())
}

pub fn resolve_base_url(configured: &str, headers: &HeaderMap) -> String {
    let configured = configured.trim();
    if !configured.is_empty() {
        return configured.trim_end_matches('/').to_string();
    }

    let scheme = header_value(headers, FORWARDED_PROTO).unwrap_or("http");
    let host = header_value(headers, FORWARDED_HOST)
        .or_else(|| header_value(headers, header::HOST.as_str()))
        .unwrap_or("localhost");
    format!("{}://{}", scheme, host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_configured_url_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("internal:8080"));
        assert_eq!(
            resolve_base_url("https://map.example.com/", &headers),
            "https://map.example.com"
        );
    }

    #[test]
    fn test_falls_back_to_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("10.0.0.5:8080"));
        assert_eq!(resolve_base_url("", &headers), "http://10.0.0.5:8080");
    }

    #[test]
    fn test_forwarded_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("internal:8080"));
        headers.insert(FORWARDED_PROTO, HeaderValue::from_static("https"));
        headers.insert(
            FORWARDED_HOST,
            HeaderValue::from_static("map.example.com, proxy.local"),
        );
        assert_eq!(resolve_base_url("", &headers), "https://map.example.com");
    }

    #[test]
    fn test_no_host_at_all() {
        assert_eq!(resolve_base_url(" ", &HeaderMap::new()), "http://localhost");
    }
}

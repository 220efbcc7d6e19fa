use std::collections::BTreeMap;

use crate::config::JudgeApiConfig;
use crate::error::JudgeApiError;
use crate::url::host_from_base_url;

pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_RAPIDAPI_KEY: &str = "x-rapidapi-key";
pub const HEADER_RAPIDAPI_HOST: &str = "x-rapidapi-host";

/// Build a deterministic header map for submission requests.
pub fn build_headers(config: &JudgeApiConfig) -> Result<BTreeMap<String, String>, JudgeApiError> {
    let api_key = config.api_key.trim();
    if api_key.is_empty() {
        return Err(JudgeApiError::MissingApiKey);
    }

    let api_host = config
        .api_host
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .or_else(|| host_from_base_url(&config.base_url))
        .ok_or_else(|| JudgeApiError::InvalidBaseUrl(config.base_url.clone()))?;

    let mut headers = BTreeMap::new();
    headers.insert(
        HEADER_CONTENT_TYPE.to_owned(),
        "application/json".to_owned(),
    );
    headers.insert(HEADER_ACCEPT.to_owned(), "application/json".to_owned());
    headers.insert(HEADER_RAPIDAPI_KEY.to_owned(), api_key.to_owned());
    headers.insert(HEADER_RAPIDAPI_HOST.to_owned(), api_host);

    for (key, value) in &config.extra_headers {
        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_owned());
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_require_api_key() {
        let error = build_headers(&JudgeApiConfig::new("   ")).expect_err("blank key must fail");
        assert!(matches!(error, JudgeApiError::MissingApiKey));
    }

    #[test]
    fn headers_derive_host_from_base_url() {
        let config = JudgeApiConfig::new("key").with_base_url("http://127.0.0.1:2358/");
        let headers = build_headers(&config).expect("headers");

        assert_eq!(headers[HEADER_RAPIDAPI_HOST], "127.0.0.1");
        assert_eq!(headers[HEADER_RAPIDAPI_KEY], "key");
        assert_eq!(headers[HEADER_CONTENT_TYPE], "application/json");
    }

    #[test]
    fn explicit_host_and_extra_headers_win() {
        let config = JudgeApiConfig::new("key")
            .with_api_host("judge0-ce.p.rapidapi.com")
            .insert_header(" X-Trace ", " abc ");
        let headers = build_headers(&config).expect("headers");

        assert_eq!(headers[HEADER_RAPIDAPI_HOST], "judge0-ce.p.rapidapi.com");
        assert_eq!(headers["x-trace"], "abc");
    }
}

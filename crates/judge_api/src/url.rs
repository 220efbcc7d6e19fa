/// Default base URL for the hosted Judge0 CE endpoint.
pub const DEFAULT_JUDGE_BASE_URL: &str = "https://judge0-ce.p.rapidapi.com";

/// Query string selecting plain-text fields and a blocking wait for the verdict.
pub const SUBMISSION_QUERY: &str = "base64_encoded=false&wait=true";

/// Normalize a base URL to the synchronous submissions endpoint.
///
/// Normalization rules:
/// 1) blank input falls back to [`DEFAULT_JUDGE_BASE_URL`]
/// 2) any existing query string is replaced
/// 3) `/submissions` is appended unless the path already ends with it
pub fn normalize_submissions_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_JUDGE_BASE_URL
    } else {
        input.trim()
    };

    let without_query = base.split('?').next().unwrap_or(base);
    let trimmed = without_query.trim_end_matches('/');
    if trimmed.ends_with("/submissions") {
        return format!("{trimmed}?{SUBMISSION_QUERY}");
    }
    format!("{trimmed}/submissions?{SUBMISSION_QUERY}")
}

/// Derive the `X-RapidAPI-Host` value from a base URL.
pub fn host_from_base_url(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let host = rest.split(['/', '?']).next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();

    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

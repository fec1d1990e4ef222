//! Base URL normalization for the tracker host.
//!
//! `JIRA_URL` is often copied out of a browser bar, so it may lack a scheme or
//! carry a trailing slash. Endpoint URLs are built by appending
//! `/rest/api/...`, which needs one canonical form.

use anyhow::Result;
use url::Url;

/// Normalize a tracker base URL.
///
/// Adds `https://` when no scheme is present, repairs `http:/host`-style
/// schemes, and strips trailing slashes, query and fragment so REST paths can
/// be appended directly.
pub fn normalize_base_url(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Host cannot be empty"));
  }

  let url = parse_with_scheme(trimmed)?;
  if url.host_str().is_none_or(str::is_empty) {
    return Err(anyhow::anyhow!("Failed to parse URL: '{input}'. No host found."));
  }

  let mut result = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
  if let Some(port) = url.port() {
    result.push_str(&format!(":{port}"));
  }
  result.push_str(url.path().trim_end_matches('/'));

  Ok(result)
}

/// Parse the input, assuming https:// when the scheme is missing or mangled.
fn parse_with_scheme(input: &str) -> Result<Url> {
  let lowered = input.to_ascii_lowercase();
  let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
    input.to_string()
  } else if let Some((scheme, rest)) = input.split_once(':')
    && ["http", "https"].iter().any(|s| scheme.eq_ignore_ascii_case(s))
  {
    format!("https://{}", rest.trim_start_matches('/'))
  } else {
    format!("https://{input}")
  };

  Url::parse(&candidate).map_err(|_| anyhow::anyhow!("Failed to parse URL: '{input}'. Ensure it has a valid scheme."))
}

// ABOUTME: HTTP fetching for job pages: scheme validation, size limits and error mapping.
// ABOUTME: Timeouts surface as Timeout errors; non-success statuses as Fetch errors.

use std::collections::HashMap;

use crate::error::ExtractError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

const OP: &str = "fetch page";

/// Options for fetching a page.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
}

/// A fetched page body.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    /// Address after redirects.
    pub final_url: String,
    pub body: String,
}

/// Checks that `url` is an absolute http(s) address.
pub fn validate_url(url: &str) -> Result<url::Url, ExtractError> {
    if url.is_empty() {
        return Err(ExtractError::invalid_url(url, OP, None));
    }
    let parsed = url::Url::parse(url).map_err(|e| {
        ExtractError::invalid_url(url, OP, Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(ExtractError::invalid_url(
            url,
            OP,
            Some(anyhow::anyhow!("scheme must be http or https")),
        )),
    }
}

fn request_error(url: &str, err: reqwest::Error, what: &str) -> ExtractError {
    if err.is_timeout() {
        ExtractError::timeout(url, OP, Some(anyhow::anyhow!("{}: {}", what, err)))
    } else {
        ExtractError::fetch(url, OP, Some(anyhow::anyhow!("{}: {}", what, err)))
    }
}

/// Fetches `url` and returns its body as text.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, ExtractError> {
    validate_url(url)?;

    let mut request = client.get(url);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let response = request
        .send()
        .await
        .map_err(|e| request_error(url, e, "request failed"))?;

    if let Some(len) = response.content_length() {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(ExtractError::fetch(
                url,
                OP,
                Some(anyhow::anyhow!("content too large")),
            ));
        }
    }

    let status = response.status();
    let final_url = response.url().to_string();
    if !status.is_success() {
        return Err(ExtractError::fetch(
            url,
            OP,
            Some(anyhow::anyhow!("HTTP status {}", status.as_u16())),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| request_error(url, e, "failed to read body"))?;
    if body.len() > MAX_CONTENT_LENGTH {
        return Err(ExtractError::fetch(
            url,
            OP,
            Some(anyhow::anyhow!("content too large")),
        ));
    }

    Ok(FetchResult {
        status: status.as_u16(),
        url: url.to_string(),
        final_url,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn create_test_client() -> reqwest::Client {
        reqwest::Client::builder()
            .user_agent("test-agent")
            .build()
            .unwrap()
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(validate_url("").unwrap_err().is_invalid_url());
        assert!(validate_url("not a url").unwrap_err().is_invalid_url());
        assert!(validate_url("file:///etc/passwd").unwrap_err().is_invalid_url());
        assert!(validate_url("https://example.com/jobs/1").is_ok());
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/jobs/1").header("x-test", "1");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("<h1>Job</h1>");
        });

        let mut opts = FetchOptions::default();
        opts.headers.insert("x-test".into(), "1".into());
        let result = fetch(&create_test_client(), &server.url("/jobs/1"), &opts).await;
        mock.assert();

        let result = result.expect("fetch should succeed");
        assert_eq!(result.status, 200);
        assert_eq!(result.body, "<h1>Job</h1>");
        assert_eq!(result.final_url, server.url("/jobs/1"));
    }

    #[tokio::test]
    async fn test_fetch_non_200_rejected() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(404).body("not found");
        });

        let result = fetch(&create_test_client(), &server.url("/gone"), &FetchOptions::default()).await;
        mock.assert();

        let err = result.expect_err("should fail on 404");
        assert!(err.is_fetch());
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_millis(500)).body("late");
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let err = fetch(&client, &server.url("/slow"), &FetchOptions::default())
            .await
            .expect_err("should time out");
        assert!(err.is_timeout());
    }
}

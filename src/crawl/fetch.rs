// src/crawl/fetch.rs
// =============================================================================
// One HTTP GET, and what we learned from it.
//
// A fetch either produces a response (any status code) or fails at the
// network level. Failures are never retried and never stop the crawl: they
// are turned into a short error kind like "Timeout" or "ProxyError" that
// ends up in the audit log as `error:<Kind>`.
//
// Only a 200 response with an HTML content type has its body downloaded.
// Everything else is recorded by status and content type alone.
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::error::Error as StdError;
use std::fmt;

// What happened to one URL taken off the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Got a response. `stored_path` is empty unless the page was saved.
    Fetched {
        status: u16,
        content_type: String,
        stored_path: String,
    },
    /// robots.txt said no; never requested
    Blocked,
    /// The request failed before a response came back
    Error { kind: ErrorKind },
}

// Network failure categories, named the way they appear in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    ConnectionError,
    DnsError,
    ProxyError,
    SslError,
    TooManyRedirects,
    InvalidUrl,
    BodyError,
    RequestError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "Timeout",
            ErrorKind::ConnectionError => "ConnectionError",
            ErrorKind::DnsError => "DnsError",
            ErrorKind::ProxyError => "ProxyError",
            ErrorKind::SslError => "SslError",
            ErrorKind::TooManyRedirects => "TooManyRedirects",
            ErrorKind::InvalidUrl => "InvalidUrl",
            ErrorKind::BodyError => "BodyError",
            ErrorKind::RequestError => "RequestError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct FetchError {
    pub kind: ErrorKind,
    pub source: reqwest::Error,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.source)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(source: reqwest::Error) -> Self {
        Self {
            kind: classify_error(&source),
            source,
        }
    }
}

#[derive(Debug)]
pub struct FetchedPage {
    pub status: StatusCode,
    pub content_type: String,
    /// Only downloaded for pages worth saving
    pub body: Option<Vec<u8>>,
}

impl FetchedPage {
    pub fn text(&self) -> String {
        self.body
            .as_deref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default()
    }
}

// The one rule deciding whether a response gets saved and parsed for links
pub fn is_saveable_html(status: StatusCode, content_type: &str) -> bool {
    status == StatusCode::OK && content_type.to_ascii_lowercase().contains("text/html")
}

pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let body = if is_saveable_html(status, &content_type) {
        Some(response.bytes().await?.to_vec())
    } else {
        None
    };

    Ok(FetchedPage {
        status,
        content_type,
        body,
    })
}

// Turns a reqwest error into one of our error kinds.
//
// reqwest only exposes a few is_*() checks, so connection errors are told
// apart by looking at the messages of the whole error chain.
fn classify_error(error: &reqwest::Error) -> ErrorKind {
    if error.is_timeout() {
        ErrorKind::Timeout
    } else if error.is_redirect() {
        ErrorKind::TooManyRedirects
    } else if error.is_builder() {
        ErrorKind::InvalidUrl
    } else if error.is_connect() {
        classify_connect_message(&error_chain_text(error))
    } else if error.is_body() || error.is_decode() {
        ErrorKind::BodyError
    } else {
        ErrorKind::RequestError
    }
}

fn classify_connect_message(message: &str) -> ErrorKind {
    if message.contains("socks") || message.contains("proxy") {
        ErrorKind::ProxyError
    } else if message.contains("certificate") || message.contains("tls") || message.contains("ssl") {
        ErrorKind::SslError
    } else if message.contains("dns") || message.contains("resolve") {
        ErrorKind::DnsError
    } else {
        ErrorKind::ConnectionError
    }
}

fn error_chain_text(error: &reqwest::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(err) = source {
        text.push_str(": ");
        text.push_str(&err.to_string());
        source = err.source();
    }
    text.to_lowercase()
}

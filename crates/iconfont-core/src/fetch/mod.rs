//! HTTP(S) GET for stylesheets and font files.
//!
//! Uses the curl crate (libcurl) with automatic redirects disabled; redirects
//! are followed here so the chain length can be capped and reported as
//! [`FetchError::TooManyRedirects`]. Bodies are buffered in full, which is
//! fine for CSS- and font-sized assets.

mod error;
mod parse;

pub use error::FetchError;

use crate::config::FetchConfig;
use crate::url_model::{normalize_url, resolve_against};
use std::str;
use std::time::Duration;

const USER_AGENT: &str = concat!("iconfont-loader/", env!("CARGO_PKG_VERSION"));

/// Something that can download a URL. Implemented by [`CurlFetcher`]; tests
/// substitute scripted fetchers.
pub trait Fetch {
    /// Download `url` and return the body of the final 200 response.
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// Download `url` as UTF-8 text.
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let bytes = self.fetch_bytes(url)?;
        String::from_utf8(bytes).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// One response, redirects not followed.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u32,
    pub location: Option<String>,
    pub body: Vec<u8>,
}

/// Drives `get` through a redirect chain starting at `url`.
///
/// `url` may be protocol-relative. At most `max_redirects` hops are followed;
/// relative `Location` values resolve against the URL that produced them.
pub fn follow_redirects<F>(url: &str, max_redirects: u32, mut get: F) -> Result<Vec<u8>, FetchError>
where
    F: FnMut(&str) -> Result<RawResponse, FetchError>,
{
    let mut current = normalize_url(url).into_owned();
    let mut hops = 0u32;
    loop {
        let resp = get(&current)?;
        if resp.status == 200 {
            return Ok(resp.body);
        }
        if !parse::is_redirect(resp.status) {
            return Err(FetchError::HttpStatus {
                url: current,
                status: resp.status,
            });
        }
        if hops >= max_redirects {
            return Err(FetchError::TooManyRedirects {
                url: url.to_string(),
                limit: max_redirects,
            });
        }
        let location = resp.location.ok_or_else(|| FetchError::MissingLocation {
            url: current.clone(),
            status: resp.status,
        })?;
        let next = resolve_against(&current, &location).ok_or_else(|| FetchError::InvalidUrl {
            url: location.clone(),
        })?;
        tracing::debug!(status = resp.status, from = %current, to = %next, "following redirect");
        current = next;
        hops += 1;
    }
}

/// libcurl-backed fetcher. Each request gets the configured connect and total
/// timeouts.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    config: FetchConfig,
}

impl CurlFetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    /// Performs a single GET without following redirects.
    /// Runs in the current thread; call from `spawn_blocking` if used from async code.
    pub fn get_once(&self, url: &str) -> Result<RawResponse, FetchError> {
        self.perform(url).map_err(|source| {
            if source.is_url_malformed() || source.is_unsupported_protocol() {
                FetchError::InvalidUrl {
                    url: url.to_string(),
                }
            } else {
                FetchError::Transport {
                    url: url.to_string(),
                    source,
                }
            }
        })
    }

    fn perform(&self, url: &str) -> Result<RawResponse, curl::Error> {
        let mut headers: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(false)?;
        easy.useragent(USER_AGENT)?;
        // Empty string = every encoding libcurl was built with.
        easy.accept_encoding("")?;
        easy.connect_timeout(Duration::from_secs(self.config.connect_timeout_secs))?;
        easy.timeout(Duration::from_secs(self.config.timeout_secs))?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(RawResponse {
            status,
            location: parse::location(&headers),
            body,
        })
    }
}

impl Fetch for CurlFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        follow_redirects(url, self.config.max_redirects, |u| self.get_once(u))
    }
}

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use url::{Host, Url};

use crate::authz::ProtectionMode;

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_UNPROTECTED_REDIRECTS: usize = 10;
pub const BODY_PREVIEW_LIMIT: usize = 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("invalid URL")]
    InvalidUrl,

    #[error("only http/https allowed")]
    SchemeNotAllowed,

    #[error("internal addresses blocked")]
    InternalAddress,

    #[error("localhost blocked")]
    Localhost,

    #[error("{0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchReport {
    pub requested_url: String,
    pub secure: bool,
    pub status: u16,
    pub body_preview: String,
    pub content_type: String,
}

/// Parses `raw` and, in protected mode, applies the destination policy.
pub fn check_url(raw: &str, mode: ProtectionMode) -> Result<Url, FetchError> {
    let url = Url::parse(raw).map_err(|_| FetchError::InvalidUrl)?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(FetchError::InvalidUrl);
    }

    if mode.is_protected() {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::SchemeNotAllowed);
        }
        match url.host() {
            Some(Host::Ipv4(ip)) if is_internal(IpAddr::V4(ip)) => {
                return Err(FetchError::InternalAddress);
            }
            Some(Host::Ipv6(ip)) if is_internal(IpAddr::V6(ip)) => {
                return Err(FetchError::InternalAddress);
            }
            Some(Host::Domain(domain)) if is_localhost(domain) => {
                return Err(FetchError::Localhost);
            }
            _ => {}
        }
    } else {
        tracing::warn!(url = %url, "Fetching URL without destination checks");
    }

    Ok(url)
}

fn is_localhost(domain: &str) -> bool {
    let domain = domain.trim_end_matches('.').to_ascii_lowercase();
    domain == "localhost" || domain.ends_with(".localhost")
}

fn is_internal(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ip) => is_internal_v4(ip),
        IpAddr::V6(ip) => match ip.to_ipv4_mapped() {
            Some(mapped) => is_internal_v4(mapped),
            None => is_internal_v6(ip),
        },
    }
}

fn is_internal_v4(ip: Ipv4Addr) -> bool {
    ip.is_loopback() || ip.is_private() || ip.is_link_local() || ip.is_unspecified()
}

fn is_internal_v6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    let unique_local = (first & 0xfe00) == 0xfc00;
    let link_local = (first & 0xffc0) == 0xfe80;
    ip.is_loopback() || ip.is_unspecified() || unique_local || link_local
}

/// Outbound HTTP clients for the SSRF demo, one per protection mode.
#[derive(Debug, Clone)]
pub struct Fetcher {
    /// Never follows redirects, so a checked URL cannot bounce to an internal one.
    protected: reqwest::Client,
    /// Follows redirects like a default HTTP client.
    unprotected: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, FetchError> {
        let protected = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        let unprotected = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(MAX_UNPROTECTED_REDIRECTS))
            .build()?;
        Ok(Self {
            protected,
            unprotected,
        })
    }

    fn client(&self, mode: ProtectionMode) -> &reqwest::Client {
        match mode {
            ProtectionMode::Protected => &self.protected,
            ProtectionMode::Unprotected => &self.unprotected,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, raw: &str, mode: ProtectionMode) -> Result<FetchReport, FetchError> {
        let url = check_url(raw, mode)?;

        let mut response = self.client(mode).get(url).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let mut body = Vec::with_capacity(BODY_PREVIEW_LIMIT);
        while body.len() < BODY_PREVIEW_LIMIT {
            let Some(chunk) = response.chunk().await? else {
                break;
            };
            let take = chunk.len().min(BODY_PREVIEW_LIMIT - body.len());
            body.extend_from_slice(&chunk[..take]);
        }

        Ok(FetchReport {
            requested_url: raw.to_string(),
            secure: mode.as_secure_flag(),
            status,
            body_preview: String::from_utf8_lossy(&body).into_owned(),
            content_type,
        })
    }
}

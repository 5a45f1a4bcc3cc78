// crates/trustlens-reputation/src/resolver.rs
//
// Maps a page URL to a trust database key.
//
// The hostname is extracted, a leading "www." label is stripped, and the
// trust database keys are matched against it. Anything that fails to parse
// or matches no key resolves to the "default" sentinel.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use trustlens_core::record::DEFAULT_DOMAIN_KEY;

use crate::trust_db::TrustStore;

/// How a hostname is matched against trust database keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The key appears anywhere in the hostname ("cnn" matches "notcnn.example").
    #[default]
    Substring,
    /// The hostname equals the key or ends with ".{key}".
    Label,
}

impl MatchMode {
    fn matches(&self, hostname: &str, key: &str) -> bool {
        match self {
            MatchMode::Substring => hostname.contains(key),
            MatchMode::Label => {
                hostname == key
                    || hostname
                        .strip_suffix(key)
                        .is_some_and(|rest| rest.ends_with('.'))
            }
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Substring => f.write_str("substring"),
            MatchMode::Label => f.write_str("label"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "label" => Ok(MatchMode::Label),
            other => Err(format!(
                "unknown match mode '{}', expected 'substring' or 'label'",
                other
            )),
        }
    }
}

/// Extract the hostname of `url`, lowercased, without a leading "www.".
///
/// Returns `None` for malformed URLs and URLs without a host.
pub fn hostname(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() {
        return None;
    }
    Some(host.to_string())
}

/// Resolves page URLs to trust database keys.
#[derive(Debug, Clone)]
pub struct DomainResolver {
    trust_store: Arc<TrustStore>,
    mode: MatchMode,
}

impl DomainResolver {
    pub fn new(trust_store: Arc<TrustStore>, mode: MatchMode) -> Self {
        Self { trust_store, mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Resolve `url` to a trust database key, or `"default"`.
    ///
    /// When several keys match, the longest wins so that "news.example.com"
    /// beats "example.com"; equal lengths fall back to key order.
    pub fn resolve(&self, url: &str) -> String {
        let Some(host) = hostname(url) else {
            return DEFAULT_DOMAIN_KEY.to_string();
        };

        let mut best: Option<&str> = None;
        for key in self.trust_store.keys() {
            if key.is_empty() || !self.mode.matches(&host, key) {
                continue;
            }
            if best.map_or(true, |b| key.len() > b.len()) {
                best = Some(key);
            }
        }

        best.unwrap_or(DEFAULT_DOMAIN_KEY).to_string()
    }
}

use harbor_common::url::INTERNAL_SCHEME;
use serde::{Deserialize, Serialize};

/// Connection security of the page, shown in the address bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    Secure,
    Insecure,
    Internal,
    File,
    Source,
}

impl RequestState {
    pub fn from_url(url: &str) -> Option<Self> {
        let parsed = url::Url::parse(url).ok()?;
        match parsed.scheme() {
            "https" | "wss" => Some(RequestState::Secure),
            "http" | "ws" => Some(RequestState::Insecure),
            "file" => Some(RequestState::File),
            "view-source" => Some(RequestState::Source),
            scheme if scheme == INTERNAL_SCHEME => Some(RequestState::Internal),
            _ => None,
        }
    }
}

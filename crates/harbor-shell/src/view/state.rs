use harbor_common::ViewId;
use serde::{Deserialize, Serialize};

use super::RequestState;
use crate::host::MediaKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    #[default]
    None,
    Audio,
    Video,
}

impl From<MediaKind> for MediaStatus {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Audio => MediaStatus::Audio,
            MediaKind::Video => MediaStatus::Video,
        }
    }
}

/// One find-in-page session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindState {
    pub text: String,
    pub match_case: bool,
    /// 1-based ordinal of the active match; 0 before the first result.
    pub index: u32,
    pub matches: u32,
    pub final_update: bool,
}

impl FindState {
    pub fn new(text: impl Into<String>, match_case: bool) -> Self {
        Self {
            text: text.into(),
            match_case,
            ..Default::default()
        }
    }
}

/// Snapshot pushed to the chrome on `view-{window}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub id: ViewId,
    pub title: String,
    pub url: String,
    pub favicon: Option<String>,
    pub color: Option<String>,
    pub request_state: Option<RequestState>,
    pub is_loading: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub media: MediaStatus,
    pub is_pinned: bool,
    pub is_muted: bool,
    pub zoom_level: f64,
    pub find_state: Option<FindState>,
}

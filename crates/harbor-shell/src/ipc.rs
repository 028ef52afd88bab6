//! Request/response protocol between page UIs and the shell.
//!
//! Chrome pages, dialogs and internal pages post `{ kind, payload, id? }`.
//! Kinds outside [`ALLOWED_IPC_KINDS`] are rejected. Replies to requests
//! that carry an `id` go back on [`channels::IPC_REPLY`].

use harbor_common::{Action, ProfileId, ViewId, WindowId};
use harbor_config::UserConfigPatch;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::host::{StopFindAction, SurfaceId};

/// Push channel names.
pub mod channels {
    use harbor_common::WindowId;

    pub const SETTINGS_UPDATE: &str = "settings-update";
    pub const IPC_REPLY: &str = "ipc-reply";

    /// View state of one window's tabs.
    pub fn view(window: WindowId) -> String {
        format!("view-{}", window.0)
    }

    /// Tab order and selection of one window.
    pub fn tabs(window: WindowId) -> String {
        format!("tabs-{}", window.0)
    }

    /// Find-in-page results of one window.
    pub fn view_find(window: WindowId) -> String {
        format!("view-find-{}", window.0)
    }
}

// =============================================================================
// IPC ALLOWLIST
// =============================================================================

pub const ALLOWED_IPC_KINDS: &[&str] = &[
    "get-user",
    "get-user-config",
    "set-user-config",
    "get-user-type",
    "set-theme",
    "get-history",
    "clear-history",
    "get-view-state",
    "action",
    "find-in-page",
    "move-find-in-page",
    "stop-find-in-page",
    "show-tab-menu",
    "hide-dialog",
];

pub fn is_ipc_kind_allowed(kind: &str) -> bool {
    ALLOWED_IPC_KINDS.contains(&kind)
}

// =============================================================================
// MESSAGES
// =============================================================================

/// Who posted a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpcSender {
    /// The chrome UI of a window.
    Window(WindowId),
    /// A tab or dialog page.
    Surface(SurfaceId),
}

/// Raw message as posted by a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl IpcMessage {
    pub fn from_json(raw: &str) -> Result<Self, IpcError> {
        serde_json::from_str(raw).map_err(|e| IpcError::Parse(e.to_string()))
    }

    pub fn new(kind: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
            id: None,
        }
    }
}

/// Reply pushed on `ipc-reply`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcReply {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IpcReply {
    pub fn new(id: u64, result: Result<serde_json::Value, IpcError>) -> Self {
        match result {
            Ok(value) => Self {
                id,
                result: Some(value),
                error: None,
            },
            Err(e) => Self {
                id,
                result: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IpcError {
    #[error("malformed message: {0}")]
    Parse(String),

    #[error("unknown kind: {0}")]
    UnknownKind(String),

    #[error("invalid payload for {kind}: {reason}")]
    InvalidPayload { kind: String, reason: String },

    #[error("unknown profile: {0}")]
    UnknownProfile(String),

    #[error("sender has no window")]
    NoWindow,

    #[error("no such view: {0}")]
    UnknownView(ViewId),

    #[error("request failed: {0}")]
    Failed(String),
}

// =============================================================================
// TYPED REQUESTS
// =============================================================================

#[derive(Debug, Deserialize)]
struct UserPayload {
    user: ProfileId,
}

/// Entries returned by `get-history` when the page names no limit.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
struct HistoryPayload {
    user: ProfileId,
    #[serde(default = "default_history_limit")]
    limit: usize,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

#[derive(Debug, Deserialize)]
struct SetUserConfigPayload {
    user: ProfileId,
    config: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindPayload {
    #[serde(default)]
    view: Option<ViewId>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    match_case: bool,
}

#[derive(Debug, Deserialize)]
struct MoveFindPayload {
    #[serde(default)]
    view: Option<ViewId>,
    #[serde(default = "default_forward")]
    forward: bool,
}

fn default_forward() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct StopFindPayload {
    #[serde(default)]
    view: Option<ViewId>,
    #[serde(default)]
    action: StopFindAction,
}

#[derive(Debug, Deserialize)]
struct ViewPayload {
    view: ViewId,
}

#[derive(Debug, Deserialize)]
struct OptionalViewPayload {
    #[serde(default)]
    view: Option<ViewId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IpcRequest {
    /// Profile id of the sender's window.
    GetUser,
    GetUserConfig {
        user: ProfileId,
    },
    /// Recursive merge of `patch` into the profile's settings.
    SetUserConfig {
        user: ProfileId,
        patch: UserConfigPatch,
    },
    /// `"normal"` or `"incognito"`.
    GetUserType {
        user: ProfileId,
    },
    /// Re-apply the profile's theme to the native UI.
    SetTheme {
        user: ProfileId,
    },
    /// Newest history entries first.
    GetHistory {
        user: ProfileId,
        limit: usize,
    },
    ClearHistory {
        user: ProfileId,
    },
    /// Snapshot of `view`, defaulting like the find requests.
    GetViewState {
        view: Option<ViewId>,
    },
    Action(Action),
    /// `view` defaults to the sender window's selected view.
    FindInPage {
        view: Option<ViewId>,
        text: String,
        match_case: bool,
    },
    MoveFindInPage {
        view: Option<ViewId>,
        forward: bool,
    },
    StopFindInPage {
        view: Option<ViewId>,
        action: StopFindAction,
    },
    ShowTabMenu {
        view: ViewId,
    },
    /// Hide the dialog that sent the message.
    HideDialog,
}

impl IpcRequest {
    /// Validate the kind against the allowlist and decode the payload.
    pub fn parse(message: &IpcMessage) -> Result<Self, IpcError> {
        let kind = message.kind.as_str();
        if !is_ipc_kind_allowed(kind) {
            return Err(IpcError::UnknownKind(kind.to_string()));
        }
        let payload = &message.payload;

        let request = match kind {
            "get-user" => IpcRequest::GetUser,
            "get-user-config" => IpcRequest::GetUserConfig {
                user: decode::<UserPayload>(kind, payload)?.user,
            },
            "set-user-config" => {
                let SetUserConfigPayload { user, config } = decode(kind, payload)?;
                let patch =
                    UserConfigPatch::from_json(config).map_err(|e| IpcError::InvalidPayload {
                        kind: kind.to_string(),
                        reason: e.to_string(),
                    })?;
                IpcRequest::SetUserConfig { user, patch }
            }
            "get-user-type" => IpcRequest::GetUserType {
                user: decode::<UserPayload>(kind, payload)?.user,
            },
            "set-theme" => IpcRequest::SetTheme {
                user: decode::<UserPayload>(kind, payload)?.user,
            },
            "get-history" => {
                let HistoryPayload { user, limit } = decode(kind, payload)?;
                IpcRequest::GetHistory { user, limit }
            }
            "clear-history" => IpcRequest::ClearHistory {
                user: decode::<UserPayload>(kind, payload)?.user,
            },
            "get-view-state" => IpcRequest::GetViewState {
                view: decode::<OptionalViewPayload>(kind, payload)?.view,
            },
            "action" => IpcRequest::Action(decode(kind, payload)?),
            "find-in-page" => {
                let FindPayload {
                    view,
                    text,
                    match_case,
                } = decode(kind, payload)?;
                IpcRequest::FindInPage {
                    view,
                    text,
                    match_case,
                }
            }
            "move-find-in-page" => {
                let MoveFindPayload { view, forward } = decode(kind, payload)?;
                IpcRequest::MoveFindInPage { view, forward }
            }
            "stop-find-in-page" => {
                let StopFindPayload { view, action } = decode(kind, payload)?;
                IpcRequest::StopFindInPage { view, action }
            }
            "show-tab-menu" => IpcRequest::ShowTabMenu {
                view: decode::<ViewPayload>(kind, payload)?.view,
            },
            "hide-dialog" => IpcRequest::HideDialog,
            other => return Err(IpcError::UnknownKind(other.to_string())),
        };
        Ok(request)
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    kind: &str,
    payload: &serde_json::Value,
) -> Result<T, IpcError> {
    // Payload-less kinds may omit it entirely.
    let payload = if payload.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        payload.clone()
    };
    serde_json::from_value(payload).map_err(|e| IpcError::InvalidPayload {
        kind: kind.to_string(),
        reason: e.to_string(),
    })
}

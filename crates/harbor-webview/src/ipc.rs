//! IPC bridge between pages and the shell.
//!
//! Messages flow in both directions:
//! - **Page -> shell**: `window.harbor.ipc.send(kind, payload)` or
//!   `window.harbor.ipc.request(kind, payload)` post `{ kind, payload, id? }`
//!   through wry's `window.ipc.postMessage`.
//! - **Shell -> page**: Rust evaluates `window.harbor.ipc._dispatch(channel,
//!   payload)`. Replies to `request` arrive on `ipc-reply` and settle the
//!   returned promise.

use harbor_shell::ipc::channels::IPC_REPLY;

/// Kind prefix of messages posted by the page instrumentation script.
/// These become surface events instead of shell requests.
pub const SURFACE_KIND_PREFIX: &str = "surface:";

/// Chrome channel carrying the window's application menu.
pub const APPLICATION_MENU_CHANNEL: &str = "application-menu";
/// Chrome channel asking the chrome page to show a popup menu.
pub const POPUP_MENU_CHANNEL: &str = "popup-menu";

/// Injected into every WebView before any page script runs.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    if (window.harbor && window.harbor.ipc) { return; }
    var pending = {};
    var nextId = 1;
    var handlers = {};
    function post(msg) {
        window.ipc.postMessage(JSON.stringify(msg));
    }
    window.harbor = window.harbor || {};
    window.harbor.ipc = {
        send: function(kind, payload) {
            post({ kind: kind, payload: payload === undefined ? null : payload });
        },
        request: function(kind, payload) {
            var id = nextId++;
            return new Promise(function(resolve, reject) {
                pending[id] = { resolve: resolve, reject: reject };
                post({ kind: kind, payload: payload === undefined ? null : payload, id: id });
            });
        },
        on: function(channel, callback) {
            handlers[channel] = callback;
        },
        _dispatch: function(channel, payload) {
            if (channel === "__IPC_REPLY__" && payload && pending[payload.id]) {
                var p = pending[payload.id];
                delete pending[payload.id];
                if (payload.error) { p.reject(new Error(payload.error)); }
                else { p.resolve(payload.result); }
                return;
            }
            var handler = handlers[channel];
            if (handler) { handler(payload); return; }
            // Pages that cannot know their window id listen on "*".
            if (handlers["*"]) { handlers["*"](payload, channel); }
        }
    };
})();
"#;

/// The bridge script with the reply channel filled in.
pub fn init_script() -> String {
    IPC_INIT_SCRIPT.replace("__IPC_REPLY__", IPC_REPLY)
}

/// JS that delivers `payload` to the page's handler for `channel`.
pub fn js_dispatch_message(channel: &str, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.harbor && window.harbor.ipc._dispatch({}, {});",
        serde_json::to_string(channel).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn init_script_uses_reply_channel() {
        let script = init_script();
        assert!(script.contains("\"ipc-reply\""));
        assert!(!script.contains("__IPC_REPLY__"));
        assert!(script.contains("window.ipc.postMessage"));
        assert!(script.contains("handlers[\"*\"](payload, channel)"));
    }

    #[test]
    fn dispatch_escapes_channel_and_payload() {
        let js = js_dispatch_message("view-1", &json!({ "title": "a \"quoted\" </script>" }));
        assert!(js.starts_with("window.harbor && window.harbor.ipc._dispatch(\"view-1\", "));
        assert!(js.contains(r#"\"quoted\""#));
        assert!(js.ends_with(");"));
    }

    #[test]
    fn dispatch_null_payload() {
        assert_eq!(
            js_dispatch_message("settings-update", &serde_json::Value::Null),
            "window.harbor && window.harbor.ipc._dispatch(\"settings-update\", null);"
        );
    }
}

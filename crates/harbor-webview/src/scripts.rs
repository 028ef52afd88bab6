//! JavaScript run inside content surfaces.
//!
//! wry exposes load, title and navigation callbacks but nothing for
//! favicons, media, fullscreen, context menus or find-in-page. The page
//! script below observes those in the document and posts them back as
//! `surface:*` IPC messages; the helpers drive it from Rust.

use harbor_common::EditCommand;
use harbor_shell::host::{FindOptions, StopFindAction};

/// Injected into tab and dialog surfaces after the IPC bridge.
pub const PAGE_SCRIPT: &str = r#"
(function() {
    if (window.__harborPage) { return; }
    function emit(event, payload) {
        window.ipc.postMessage(JSON.stringify({
            kind: "surface:" + event,
            payload: payload === undefined ? null : payload
        }));
    }

    function favicons() {
        var links = document.querySelectorAll("link[rel~='icon']");
        var urls = [];
        for (var i = 0; i < links.length; i++) {
            if (links[i].href) { urls.push(links[i].href); }
        }
        if (urls.length === 0 && /^https?:/.test(location.href)) {
            urls.push(location.origin + "/favicon.ico");
        }
        return urls;
    }

    function themeColor() {
        var meta = document.querySelector("meta[name='theme-color']");
        return meta ? meta.getAttribute("content") : null;
    }

    document.addEventListener("DOMContentLoaded", function() {
        emit("dom-ready");
        emit("favicon", { favicons: favicons() });
        emit("theme-color", { color: themeColor() });
    });

    var muted = false;
    document.addEventListener("play", function(e) {
        if (muted) { e.target.muted = true; }
        emit("media-started", { kind: e.target.tagName === "VIDEO" ? "video" : "audio" });
    }, true);
    ["pause", "ended"].forEach(function(type) {
        document.addEventListener(type, function() { emit("media-paused"); }, true);
    });

    document.addEventListener("fullscreenchange", function() {
        emit(document.fullscreenElement ? "enter-fullscreen" : "leave-fullscreen");
    });

    document.addEventListener("contextmenu", function(e) {
        e.preventDefault();
        var t = e.target;
        var tag = t.tagName;
        var link = t.closest ? t.closest("a[href]") : null;
        var media = { IMG: "image", VIDEO: "video", AUDIO: "audio", CANVAS: "canvas" }[tag] || "none";
        var editable = !!t.isContentEditable || tag === "INPUT" || tag === "TEXTAREA";
        var selection = String(window.getSelection() || "");
        function can(cmd) {
            try { return document.queryCommandEnabled(cmd); } catch (_) { return false; }
        }
        emit("context-menu", {
            linkUrl: link ? link.href : "",
            srcUrl: t.currentSrc || t.src || "",
            hasImageContents: tag === "IMG",
            isEditable: editable,
            selectionText: selection,
            mediaType: media,
            editFlags: {
                canUndo: editable && can("undo"),
                canRedo: editable && can("redo"),
                canCut: editable && selection.length > 0,
                canCopy: selection.length > 0,
                canPaste: editable,
                canSelectAll: true
            }
        });
    });

    var search = { text: "", ordinal: 0 };
    function countMatches(text, matchCase) {
        if (!text || !document.body) { return 0; }
        var hay = document.body.innerText;
        var needle = text;
        if (!matchCase) { hay = hay.toLowerCase(); needle = needle.toLowerCase(); }
        var n = 0;
        var i = hay.indexOf(needle);
        while (i !== -1) { n++; i = hay.indexOf(needle, i + needle.length); }
        return n;
    }

    window.__harborPage = {
        find: function(text, forward, findNext, matchCase) {
            var matches = countMatches(text, matchCase);
            if (findNext || text !== search.text) {
                search = { text: text, ordinal: 0 };
                window.getSelection().removeAllRanges();
            }
            if (matches === 0) {
                search.ordinal = 0;
            } else if (forward) {
                search.ordinal = search.ordinal >= matches ? 1 : search.ordinal + 1;
            } else {
                search.ordinal = search.ordinal <= 1 ? matches : search.ordinal - 1;
            }
            if (matches > 0) { window.find(text, matchCase, !forward, true, false, false, false); }
            emit("found-in-page", {
                activeMatchOrdinal: search.ordinal,
                matches: matches,
                finalUpdate: true
            });
        },
        stopFind: function(action) {
            var sel = window.getSelection();
            if (action === "clearSelection") {
                sel.removeAllRanges();
            } else if (action === "activateSelection" && sel.anchorNode && sel.anchorNode.parentElement) {
                sel.anchorNode.parentElement.click();
            }
            search = { text: "", ordinal: 0 };
        },
        setMuted: function(value) {
            muted = value;
            document.querySelectorAll("audio, video").forEach(function(m) { m.muted = value; });
        },
        togglePictureInPicture: function() {
            if (document.pictureInPictureElement) { document.exitPictureInPicture(); return; }
            var video = document.querySelector("video");
            if (video && video.requestPictureInPicture) {
                video.requestPictureInPicture().catch(function() {});
            }
        },
        download: function(url) {
            var a = document.createElement("a");
            a.href = url;
            a.download = "";
            document.body.appendChild(a);
            a.click();
            a.remove();
        }
    };
})();
"#;

pub const GO_BACK: &str = "history.back();";
pub const GO_FORWARD: &str = "history.forward();";
pub const RELOAD: &str = "location.reload();";
pub const STOP: &str = "window.stop();";
pub const TOGGLE_PICTURE_IN_PICTURE: &str =
    "window.__harborPage && window.__harborPage.togglePictureInPicture();";

/// Evaluated with a callback to read the serialized document.
pub const OUTER_HTML: &str = "document.documentElement.outerHTML";

fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

pub fn find(text: &str, options: FindOptions) -> String {
    format!(
        "window.__harborPage && window.__harborPage.find({}, {}, {}, {});",
        js_string(text),
        options.forward,
        options.find_next,
        options.match_case,
    )
}

pub fn stop_find(action: StopFindAction) -> String {
    let action = serde_json::to_string(&action).unwrap_or_else(|_| "null".to_string());
    format!("window.__harborPage && window.__harborPage.stopFind({action});")
}

pub fn set_muted(muted: bool) -> String {
    format!("window.__harborPage && window.__harborPage.setMuted({muted});")
}

pub fn download(url: &str) -> String {
    format!(
        "window.__harborPage && window.__harborPage.download({});",
        js_string(url)
    )
}

pub fn edit(command: EditCommand) -> String {
    let name = match command {
        EditCommand::Undo => "undo",
        EditCommand::Redo => "redo",
        EditCommand::Cut => "cut",
        EditCommand::Copy => "copy",
        EditCommand::Paste | EditCommand::PasteAndMatchStyle => "paste",
        EditCommand::SelectAll => "selectAll",
    };
    format!("document.execCommand({});", js_string(name))
}

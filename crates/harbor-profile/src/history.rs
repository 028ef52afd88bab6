//! Browsing history: an append-only log of visited pages.
//!
//! Normal profiles persist entries as JSON lines in `history.jsonl`;
//! incognito profiles keep them in memory only.

use chrono::{DateTime, Utc};
use harbor_common::ProfileError;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    pub visited_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>, favicon: Option<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            favicon,
            visited_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    path: Option<PathBuf>,
}

impl History {
    /// In-memory history (incognito).
    pub fn ephemeral() -> Self {
        Self::default()
    }

    /// Load the log at `path`. Corrupt lines are skipped; a missing file is
    /// an empty history.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => parse_lines(&content, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), "failed to read history: {e}");
                Vec::new()
            }
        };
        Self {
            entries,
            path: Some(path),
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent first.
    pub fn recent(&self, limit: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// Record a visit. Empty URLs and exact repeats of the last entry are
    /// ignored. Returns whether an entry was appended.
    pub fn record(&mut self, title: &str, url: &str, favicon: Option<String>) -> bool {
        if url.is_empty() {
            return false;
        }
        if let Some(last) = self.entries.last() {
            if last.url == url && last.title == title {
                return false;
            }
        }

        let entry = HistoryEntry::new(title, url, favicon);
        if let Some(path) = &self.path {
            if let Err(e) = append_line(path, &entry) {
                warn!(path = %path.display(), "failed to persist history entry: {e}");
            }
        }
        debug!(url, "history entry recorded");
        self.entries.push(entry);
        true
    }

    /// Attach `favicon` to the newest entry for `url`. Returns whether an
    /// entry changed; the log on disk is rewritten when it did.
    pub fn set_favicon(&mut self, url: &str, favicon: &str) -> bool {
        let Some(entry) = self.entries.iter_mut().rev().find(|e| e.url == url) else {
            return false;
        };
        if entry.favicon.as_deref() == Some(favicon) {
            return false;
        }
        entry.favicon = Some(favicon.to_string());

        if let Some(path) = &self.path {
            if let Err(e) = rewrite(path, &self.entries) {
                warn!(path = %path.display(), "failed to rewrite history: {e}");
            }
        }
        true
    }

    /// Drop every entry, truncating the log on disk.
    pub fn clear(&mut self) -> Result<(), ProfileError> {
        self.entries.clear();
        if let Some(path) = &self.path {
            if path.exists() {
                std::fs::write(path, "").map_err(|e| {
                    ProfileError::Storage(format!("failed to clear {}: {e}", path.display()))
                })?;
            }
        }
        Ok(())
    }
}

fn parse_lines(content: &str, path: &Path) -> Vec<HistoryEntry> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(n, line)| match serde_json::from_str(line) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(path = %path.display(), line = n + 1, "skipping corrupt history line: {e}");
                None
            }
        })
        .collect()
}

fn append_line(path: &Path, entry: &HistoryEntry) -> Result<(), ProfileError> {
    let line = serde_json::to_string(entry)
        .map_err(|e| ProfileError::Storage(format!("failed to serialize history entry: {e}")))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ProfileError::Storage(format!("failed to create {}: {e}", parent.display())))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ProfileError::Storage(format!("failed to open {}: {e}", path.display())))?;
    writeln!(file, "{line}")
        .map_err(|e| ProfileError::Storage(format!("failed to append {}: {e}", path.display())))
}

/// Replace the whole log through a sibling `.tmp` file.
fn rewrite(path: &Path, entries: &[HistoryEntry]) -> Result<(), ProfileError> {
    let mut content = String::new();
    for entry in entries {
        let line = serde_json::to_string(entry)
            .map_err(|e| ProfileError::Storage(format!("failed to serialize history entry: {e}")))?;
        content.push_str(&line);
        content.push('\n');
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    std::fs::write(&tmp_path, content)
        .map_err(|e| ProfileError::Storage(format!("failed to write {}: {e}", tmp_path.display())))?;
    std::fs::rename(&tmp_path, path)
        .map_err(|e| ProfileError::Storage(format!("failed to replace {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn record_skips_empty_url() {
        let mut history = History::ephemeral();
        assert!(!history.record("Blank", "", None));
        assert!(history.is_empty());
    }

    #[test]
    fn record_skips_consecutive_duplicate() {
        let mut history = History::ephemeral();
        assert!(history.record("Example", "https://example.com", None));
        assert!(!history.record("Example", "https://example.com", None));
        // Same URL, new title is a new entry.
        assert!(history.record("Example Domain", "https://example.com", None));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn recent_is_newest_first() {
        let mut history = History::ephemeral();
        history.record("A", "https://a.example", None);
        history.record("B", "https://b.example", None);
        history.record("C", "https://c.example", None);

        let recent: Vec<_> = history.recent(2).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(recent, vec!["C", "B"]);
    }

    #[test]
    fn persisted_entries_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.jsonl");

        let mut history = History::open(&path);
        history.record("A", "https://a.example", Some("data:image/png;base64,AA".into()));
        history.record("B", "https://b.example", None);

        let reloaded = History::open(&path);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.entries()[0].url, "https://a.example");
        assert_eq!(
            reloaded.entries()[0].favicon.as_deref(),
            Some("data:image/png;base64,AA")
        );
        assert_eq!(reloaded.entries()[1].title, "B");
    }

    #[test]
    fn corrupt_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.jsonl");

        let good = serde_json::to_string(&HistoryEntry::new("A", "https://a.example", None)).unwrap();
        std::fs::write(&path, format!("{good}\nnot json\n\n{good}\n")).unwrap();

        let history = History::open(&path);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn clear_truncates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.jsonl");

        let mut history = History::open(&path);
        history.record("A", "https://a.example", None);
        history.clear().unwrap();

        assert!(history.is_empty());
        assert!(History::open(&path).is_empty());
    }

    #[test]
    fn late_favicon_updates_newest_entry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.jsonl");

        let mut history = History::open(&path);
        history.record("A", "https://a.example", None);
        history.record("B", "https://b.example", None);
        history.record("A again", "https://a.example", None);

        assert!(history.set_favicon("https://a.example", "data:a"));
        assert!(!history.set_favicon("https://a.example", "data:a"));
        assert!(!history.set_favicon("https://c.example", "data:c"));
        assert_eq!(history.entries()[0].favicon, None);
        assert_eq!(history.entries()[2].favicon.as_deref(), Some("data:a"));

        let reloaded = History::open(&path);
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.entries()[2].favicon.as_deref(), Some("data:a"));
    }

    #[test]
    fn ephemeral_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut history = History::ephemeral();
        history.record("A", "https://a.example", None);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

//! Per-surface page state shared with the wry callbacks.

/// Session history as far as load callbacks reveal it.
///
/// wry has no history API, so entries are recorded from finished loads.
/// A back or forward request is remembered until the next load commits.
#[derive(Debug, Clone, PartialEq)]
pub struct NavHistory {
    entries: Vec<String>,
    index: usize,
    pending: Option<Traversal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Traversal {
    Back,
    Forward,
}

impl NavHistory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            pending: None,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Returns false when there is nothing to go back to.
    pub fn begin_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.pending = Some(Traversal::Back);
        true
    }

    pub fn begin_forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.pending = Some(Traversal::Forward);
        true
    }

    /// Record a finished main-frame load of `url`.
    pub fn commit(&mut self, url: &str) {
        match self.pending.take() {
            Some(Traversal::Back) if self.can_go_back() => self.index -= 1,
            Some(Traversal::Forward) if self.can_go_forward() => self.index += 1,
            _ => {
                if self.current() == Some(url) {
                    return;
                }
                if !self.entries.is_empty() {
                    self.entries.truncate(self.index + 1);
                }
                self.entries.push(url.to_string());
                self.index = self.entries.len() - 1;
                return;
            }
        }
        // Redirects may land a traversal somewhere else.
        if let Some(entry) = self.entries.get_mut(self.index) {
            if entry != url {
                *entry = url.to_string();
            }
        }
    }
}

impl Default for NavHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub url: String,
    pub title: String,
    pub loading: bool,
    pub audible: bool,
    pub history: NavHistory,
}

impl PageState {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }

    /// The page title, or its URL while it has none.
    pub fn display_title(&self) -> String {
        if self.title.is_empty() {
            self.url.clone()
        } else {
            self.title.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_append_and_truncate() {
        let mut h = NavHistory::new();
        h.commit("a");
        h.commit("b");
        h.commit("c");
        assert!(h.begin_back());
        h.commit("b");
        assert_eq!(h.current(), Some("b"));
        assert!(h.can_go_forward());

        h.commit("d");
        assert_eq!(h.current(), Some("d"));
        assert!(!h.can_go_forward());
        assert!(h.begin_back());
        h.commit("b");
        assert!(h.begin_back());
        h.commit("a");
        assert!(!h.can_go_back());
    }

    #[test]
    fn reload_does_not_add_entry() {
        let mut h = NavHistory::new();
        h.commit("a");
        h.commit("a");
        assert!(!h.can_go_back());
    }

    #[test]
    fn traversal_without_target_is_refused() {
        let mut h = NavHistory::new();
        assert!(!h.begin_back());
        h.commit("a");
        assert!(!h.begin_forward());
        h.commit("b");
        assert!(h.begin_back());
        h.commit("a");
        assert!(h.begin_forward());
        h.commit("b-redirected");
        assert_eq!(h.current(), Some("b-redirected"));
        assert!(h.can_go_back());
    }

    #[test]
    fn title_falls_back_to_url() {
        let mut page = PageState::new("https://a.example/");
        assert_eq!(page.display_title(), "https://a.example/");
        page.title = "A".into();
        assert_eq!(page.display_title(), "A");
    }
}

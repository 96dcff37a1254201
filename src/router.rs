use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::time::Instant;

use crate::location::Location;

/// Routing seam the search control reads from and writes to.
pub trait Navigator: Send + Sync {
    /// Current path and query parameters
    fn location(&self) -> Location;

    /// Replace the current history entry with `href`
    fn replace(&self, href: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationKind {
    Push,
    Replace,
}

/// One recorded navigation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub kind: NavigationKind,
    pub href: String,
    /// Milliseconds since the router was created
    pub at_ms: u64,
}

struct History {
    entries: Vec<Location>,
    log: Vec<Navigation>,
    version: u64,
    created: Instant,
}

impl History {
    fn record(&mut self, kind: NavigationKind, location: &Location) {
        let at_ms = self.created.elapsed().as_millis() as u64;
        self.log.push(Navigation {
            kind,
            href: location.href(),
            at_ms,
        });
        self.version += 1;
    }
}

/// In-memory history stack. Clones share the same history.
#[derive(Clone)]
pub struct MemoryRouter {
    inner: Arc<Mutex<History>>,
}

impl MemoryRouter {
    pub fn new(href: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(History {
                entries: vec![Location::parse(href)],
                log: Vec::new(),
                version: 0,
                created: Instant::now(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, History> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Navigate to `href`, adding a history entry.
    pub fn push(&self, href: &str) {
        let location = Location::parse(href);
        let mut history = self.lock();
        history.record(NavigationKind::Push, &location);
        history.entries.push(location);
    }

    /// Number of entries on the history stack
    pub fn history_len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Incremented on every push or replace
    pub fn version(&self) -> u64 {
        self.lock().version
    }

    /// Every navigation so far, oldest first
    pub fn navigations(&self) -> Vec<Navigation> {
        self.lock().log.clone()
    }

    /// Navigations recorded after the first `skip`
    pub fn navigations_since(&self, skip: usize) -> Vec<Navigation> {
        self.lock().log.iter().skip(skip).cloned().collect()
    }
}

impl Navigator for MemoryRouter {
    fn location(&self) -> Location {
        self.lock().entries.last().cloned().unwrap_or_default()
    }

    fn replace(&self, href: &str) {
        let location = Location::parse(href);
        let mut history = self.lock();
        history.record(NavigationKind::Replace, &location);
        match history.entries.last_mut() {
            Some(top) => *top = location,
            None => history.entries.push(location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_overwrites_top_entry() {
        let router = MemoryRouter::new("/search");
        router.replace("/search?query=dune");
        assert_eq!(router.history_len(), 1);
        assert_eq!(router.location().href(), "/search?query=dune");
        assert_eq!(router.version(), 1);
    }

    #[test]
    fn push_adds_entry() {
        let router = MemoryRouter::new("/");
        router.push("/search?category=books");
        assert_eq!(router.history_len(), 2);
        assert_eq!(router.location().params.get("category"), Some("books"));
    }

    #[test]
    fn clones_share_history() {
        let router = MemoryRouter::new("/search");
        let other = router.clone();
        other.replace("/search?query=a");
        let log = router.navigations();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].kind, NavigationKind::Replace);
        assert_eq!(log[0].href, "/search?query=a");
        assert_eq!(router.navigations_since(1), Vec::new());
    }
}

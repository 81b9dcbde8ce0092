// src/crawl/frontier.rs
// =============================================================================
// The frontier: URLs discovered but not fetched yet.
//
// A VecDeque gives FIFO order, which makes the crawl breadth-first and
// deterministic. A HashSet alongside it keeps entries unique, so a link that
// shows up on ten pages is queued once.
// =============================================================================

use std::collections::{HashSet, VecDeque};

#[derive(Debug, Default, Clone)]
pub struct Frontier {
    queue: VecDeque<String>,
    queued: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Frontier::default()
    }

    pub fn from_seeds<I, S>(seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut frontier = Frontier::new();
        for seed in seeds {
            frontier.push(seed);
        }
        frontier
    }

    /// Queues `url` unless it is already waiting. Returns whether it was added.
    pub fn push(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.queued.contains(&url) {
            return false;
        }
        self.queued.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    /// Oldest queued URL first.
    pub fn pop(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.queued.remove(&url);
        Some(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::from_seeds(["a", "b"]);
        frontier.push("c");

        assert_eq!(frontier.pop().as_deref(), Some("a"));
        assert_eq!(frontier.pop().as_deref(), Some("b"));
        assert_eq!(frontier.pop().as_deref(), Some("c"));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_no_duplicate_entries() {
        let mut frontier = Frontier::from_seeds(["a", "a", "b"]);
        assert_eq!(frontier.len(), 2);
        assert!(!frontier.push("b"));
        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn test_popped_url_can_be_queued_again() {
        // Keeping it out after a visit is the visited set's job, not ours
        let mut frontier = Frontier::from_seeds(["a"]);
        frontier.pop();
        assert!(!frontier.contains("a"));
        assert!(frontier.push("a"));
        assert!(!frontier.is_empty());
    }
}

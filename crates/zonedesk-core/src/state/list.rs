// ── List state ──
//
// A read-only view of a remote collection. Every fetch gets a generation
// number; only the response for the latest generation is applied, so an
// older request that finishes late cannot overwrite newer data.

use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListState<T> {
    pub loading: bool,
    /// Set when the latest fetch failed; cleared by the next success.
    pub error: Option<String>,
    pub items: Vec<T>,
    /// Generation of the most recently started fetch.
    pub generation: u64,
    /// Highlighted row, always a valid index unless `items` is empty.
    /// Follows its item across refetches.
    pub selected: usize,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            items: Vec::new(),
            generation: 0,
            selected: 0,
        }
    }
}

impl<T> ListState<T> {
    /// Start a fetch and return its generation.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Apply a successful response. Returns `false` if it was stale.
    ///
    /// The highlighted item is found again by `key` in the new items; the
    /// index is only clamped when that item is gone.
    pub fn finish<K: PartialEq>(
        &mut self,
        generation: u64,
        items: Vec<T>,
        key: impl Fn(&T) -> K,
    ) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        let selected_key = self.selected_item().map(&key);
        self.loading = false;
        self.error = None;
        self.items = items;
        match selected_key.and_then(|k| self.items.iter().position(|item| key(item) == k)) {
            Some(index) => self.selected = index,
            None => self.clamp_selection(),
        }
        true
    }

    /// Record a failed fetch. Items from the last success stay visible.
    pub fn fail(&mut self, generation: u64, message: String) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.loading = false;
        self.error = Some(message);
        true
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn is_current(&self, generation: u64) -> bool {
        let current = generation == self.generation;
        if !current {
            debug!(generation, latest = self.generation, "dropping stale fetch result");
        }
        current
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn same<T: Copy>(item: &T) -> T {
        *item
    }

    #[test]
    fn fetch_lifecycle() {
        let mut list = ListState::default();
        let g = list.begin_fetch();
        assert!(list.loading);
        assert!(list.finish(g, vec!["a", "b"], same));
        assert!(!list.loading);
        assert_eq!(list.items, vec!["a", "b"]);
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut list = ListState::default();
        let first = list.begin_fetch();
        let second = list.begin_fetch();

        assert!(list.finish(second, vec!["new"], same));
        assert!(!list.finish(first, vec!["old"], same));
        assert!(!list.fail(first, "late failure".into()));

        assert_eq!(list.items, vec!["new"]);
        assert_eq!(list.error, None);
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let mut list: ListState<&str> = ListState::default();
        let first = list.begin_fetch();
        list.begin_fetch();
        list.finish(first, vec!["old"], same);
        assert!(list.loading);
        assert!(list.items.is_empty());
    }

    #[test]
    fn failure_sets_error_and_keeps_items() {
        let mut list = ListState::default();
        let g = list.begin_fetch();
        list.finish(g, vec![1, 2], same);

        let g = list.begin_fetch();
        assert!(list.fail(g, "connection refused".into()));
        assert_eq!(list.error.as_deref(), Some("connection refused"));
        assert_eq!(list.items, vec![1, 2]);

        let g = list.begin_fetch();
        list.finish(g, vec![3], same);
        assert_eq!(list.error, None);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut list = ListState::default();
        let g = list.begin_fetch();
        list.finish(g, vec![1, 2, 3], same);
        list.select_next();
        list.select_next();
        list.select_next();
        assert_eq!(list.selected, 2);

        let g = list.begin_fetch();
        list.finish(g, vec![1], same);
        assert_eq!(list.selected, 0);
        list.select_prev();
        assert_eq!(list.selected_item(), Some(&1));
    }

    #[test]
    fn selection_follows_item_when_rows_are_inserted_above() {
        let mut list = ListState::default();
        let g = list.begin_fetch();
        list.finish(g, vec!["a", "c"], same);
        list.select_next();
        assert_eq!(list.selected_item(), Some(&"c"));

        let g = list.begin_fetch();
        list.finish(g, vec!["a", "b", "c"], same);
        assert_eq!(list.selected_item(), Some(&"c"));
        assert_eq!(list.selected, 2);
    }

    #[test]
    fn selection_clamps_when_item_disappears() {
        let mut list = ListState::default();
        let g = list.begin_fetch();
        list.finish(g, vec!["a", "b", "c"], same);
        list.select_next();
        list.select_next();

        let g = list.begin_fetch();
        list.finish(g, vec!["a", "b"], same);
        assert_eq!(list.selected_item(), Some(&"b"));
    }
}

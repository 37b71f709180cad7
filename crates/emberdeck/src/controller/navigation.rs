use crate::store::{KeyValueStore, keys};

/// Current slide position. The index is always within
/// `[0, count - 1]` and every change is written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideNavigator {
    index: usize,
    count: usize,
}

impl SlideNavigator {
    /// Restore the stored position, falling back to `fallback` when the
    /// key is missing or unreadable. The result is clamped and written back.
    pub fn restore(store: &mut dyn KeyValueStore, count: usize, fallback: usize) -> Self {
        let stored = store
            .get(keys::CURRENT_SLIDE)
            .and_then(|v| v.trim().parse::<usize>().ok());
        let mut nav = Self { index: 0, count };
        nav.index = nav.clamp(stored.unwrap_or(fallback));
        nav.persist(store);
        nav
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.count
    }

    pub fn next(&mut self, store: &mut dyn KeyValueStore) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        self.persist(store);
        true
    }

    pub fn prev(&mut self, store: &mut dyn KeyValueStore) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        self.persist(store);
        true
    }

    /// Jump to the 1-indexed slide `number`. Out-of-range numbers leave
    /// the position untouched.
    pub fn jump_to(&mut self, store: &mut dyn KeyValueStore, number: i64) -> bool {
        if number < 1 || number > self.count as i64 {
            return false;
        }
        self.index = (number - 1) as usize;
        self.persist(store);
        true
    }

    /// Jump using the raw text of the slide number field. Anything that
    /// is not an integer is ignored.
    pub fn jump_to_input(&mut self, store: &mut dyn KeyValueStore, input: &str) -> bool {
        match input.trim().parse::<i64>() {
            Ok(number) => self.jump_to(store, number),
            Err(_) => false,
        }
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.count.saturating_sub(1))
    }

    fn persist(&self, store: &mut dyn KeyValueStore) {
        store.set(keys::CURRENT_SLIDE, &self.index.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn stored_index(store: &MemoryStore) -> Option<String> {
        store.get(keys::CURRENT_SLIDE)
    }

    #[test]
    fn test_restore_defaults_and_clamps() {
        let mut store = MemoryStore::new();
        let nav = SlideNavigator::restore(&mut store, 5, 0);
        assert_eq!(nav.index(), 0);
        assert_eq!(stored_index(&store).as_deref(), Some("0"));

        let mut store = MemoryStore::with(&[(keys::CURRENT_SLIDE, "42")]);
        let nav = SlideNavigator::restore(&mut store, 5, 0);
        assert_eq!(nav.index(), 4);
        assert_eq!(stored_index(&store).as_deref(), Some("4"));

        let mut store = MemoryStore::with(&[(keys::CURRENT_SLIDE, "banana")]);
        let nav = SlideNavigator::restore(&mut store, 5, 2);
        assert_eq!(nav.index(), 2);
    }

    #[test]
    fn test_next_and_prev_stop_at_edges() {
        let mut store = MemoryStore::new();
        let mut nav = SlideNavigator::restore(&mut store, 3, 0);

        assert!(!nav.prev(&mut store));
        assert_eq!(nav.index(), 0);

        assert!(nav.next(&mut store));
        assert!(nav.next(&mut store));
        assert_eq!(stored_index(&store).as_deref(), Some("2"));

        assert!(!nav.next(&mut store));
        assert_eq!(nav.index(), 2);

        assert!(nav.prev(&mut store));
        assert_eq!(stored_index(&store).as_deref(), Some("1"));
    }

    #[test]
    fn test_jump_outside_range_is_ignored() {
        let mut store = MemoryStore::new();
        let mut nav = SlideNavigator::restore(&mut store, 4, 1);
        for n in [-3, 0, 5, 6, 1000, i64::MIN, i64::MAX] {
            assert!(!nav.jump_to(&mut store, n), "jump to {n} should be ignored");
            assert_eq!(nav.index(), 1);
            assert_eq!(stored_index(&store).as_deref(), Some("1"));
        }
    }

    #[test]
    fn test_jump_inside_range_sets_and_persists() {
        let mut store = MemoryStore::new();
        let mut nav = SlideNavigator::restore(&mut store, 4, 0);
        for n in 1..=4 {
            assert!(nav.jump_to(&mut store, n));
            assert_eq!(nav.index(), (n - 1) as usize);
            assert_eq!(stored_index(&store), Some((n - 1).to_string()));
        }
    }

    #[test]
    fn test_jump_input_parsing() {
        let mut store = MemoryStore::new();
        let mut nav = SlideNavigator::restore(&mut store, 10, 0);
        assert!(nav.jump_to_input(&mut store, " 7 "));
        assert_eq!(nav.index(), 6);
        for junk in ["", "abc", "3.5", "2x", "--1"] {
            assert!(!nav.jump_to_input(&mut store, junk));
            assert_eq!(nav.index(), 6);
        }
    }

    #[test]
    fn test_empty_deck_never_moves() {
        let mut store = MemoryStore::new();
        let mut nav = SlideNavigator::restore(&mut store, 0, 3);
        assert_eq!(nav.index(), 0);
        assert!(!nav.next(&mut store));
        assert!(!nav.prev(&mut store));
        assert!(!nav.jump_to(&mut store, 1));
    }
}

//! Sources of DOM anchor ids for chart widgets.

use std::collections::HashSet;

use rand::RngExt;

/// Upper bound (exclusive) for random anchor numbers.
const RANDOM_ID_RANGE: u32 = 1_000_000;

/// Produces numbers that are unique within one document.
pub trait AnchorIds {
    /// Next anchor number.
    fn next_id(&mut self) -> u32;

    /// Start a new document. Previously issued numbers may be reused.
    fn reset(&mut self) {}
}

/// Deterministic counter starting at zero.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnchorIds for SequentialIds {
    fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }

    fn reset(&mut self) {
        self.next = 0;
    }
}

/// Random numbers from the thread-local generator, re-drawn on collision.
#[derive(Debug, Default)]
pub struct RandomIds {
    issued: HashSet<u32>,
}

impl RandomIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnchorIds for RandomIds {
    fn next_id(&mut self) -> u32 {
        let mut rng = rand::rng();
        loop {
            let id = rng.random_range(0..RANDOM_ID_RANGE);
            if self.issued.insert(id) {
                return id;
            }
        }
    }

    fn reset(&mut self) {
        self.issued.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new();
        assert_eq!([ids.next_id(), ids.next_id(), ids.next_id()], [0, 1, 2]);
        ids.reset();
        assert_eq!(ids.next_id(), 0);
    }

    #[test]
    fn test_random_ids_are_distinct() {
        let mut ids = RandomIds::new();
        let drawn: HashSet<u32> = (0..500).map(|_| ids.next_id()).collect();
        assert_eq!(drawn.len(), 500);
        assert!(drawn.iter().all(|id| *id < RANDOM_ID_RANGE));
    }

    #[test]
    fn test_random_ids_reset_forgets_issued() {
        let mut ids = RandomIds::new();
        ids.next_id();
        ids.reset();
        assert!(ids.issued.is_empty());
    }
}

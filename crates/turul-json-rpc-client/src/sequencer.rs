//! Request id assignment

use parking_lot::Mutex;

#[derive(Debug)]
struct SequencerState {
    next: i64,
    auto_increment: bool,
}

/// Per-client source of request ids.
///
/// Counter and auto-increment flag live behind one lock, so concurrent calls
/// each observe a consistent pair and never receive the same id while
/// auto-increment is on.
#[derive(Debug)]
pub struct IdSequencer {
    state: Mutex<SequencerState>,
}

impl IdSequencer {
    pub fn new(initial: i64, auto_increment: bool) -> Self {
        Self {
            state: Mutex::new(SequencerState {
                next: initial,
                auto_increment,
            }),
        }
    }

    /// Take the current id, advancing the counter when auto-increment is on
    pub fn next(&self) -> i64 {
        let mut state = self.state.lock();
        let id = state.next;
        if state.auto_increment {
            state.next = state.next.wrapping_add(1);
        }
        id
    }

    /// The id the next call will receive, without consuming it
    pub fn peek(&self) -> i64 {
        self.state.lock().next
    }

    pub fn set_next(&self, value: i64) {
        self.state.lock().next = value;
    }

    pub fn set_auto_increment(&self, enabled: bool) {
        self.state.lock().auto_increment = enabled;
    }

    pub fn auto_increment(&self) -> bool {
        self.state.lock().auto_increment
    }
}

impl Default for IdSequencer {
    fn default() -> Self {
        Self::new(0, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_auto_increment_from_zero() {
        let seq = IdSequencer::default();
        assert_eq!(seq.next(), 0);
        assert_eq!(seq.next(), 1);
        assert_eq!(seq.next(), 2);
        assert_eq!(seq.peek(), 3);
    }

    #[test]
    fn test_set_next_overrides_counter() {
        let seq = IdSequencer::default();
        seq.next();
        seq.set_next(10);
        assert_eq!(seq.next(), 10);
        assert_eq!(seq.next(), 11);
        assert!(seq.auto_increment());
    }

    #[test]
    fn test_disabled_auto_increment_freezes_id() {
        let seq = IdSequencer::default();
        seq.next();
        seq.next();
        seq.set_auto_increment(false);

        assert_eq!(seq.next(), 2);
        assert_eq!(seq.next(), 2);

        seq.set_next(7);
        assert_eq!(seq.next(), 7);
        assert_eq!(seq.next(), 7);

        seq.set_auto_increment(true);
        assert_eq!(seq.next(), 7);
        assert_eq!(seq.next(), 8);
    }

    #[test]
    fn test_counter_wraps_at_max() {
        let seq = IdSequencer::new(i64::MAX, true);
        assert_eq!(seq.next(), i64::MAX);
        assert_eq!(seq.next(), i64::MIN);
    }

    #[test]
    fn test_concurrent_ids_are_unique_and_contiguous() {
        let seq = Arc::new(IdSequencer::new(100, true));
        let threads = 8;
        let per_thread = 500;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let seq = seq.clone();
                std::thread::spawn(move || (0..per_thread).map(|_| seq.next()).collect::<Vec<_>>())
            })
            .collect();

        let ids: HashSet<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        let total = (threads * per_thread) as i64;
        assert_eq!(ids.len() as i64, total);
        assert_eq!(ids.iter().min(), Some(&100));
        assert_eq!(ids.iter().max(), Some(&(100 + total - 1)));
        assert_eq!(seq.peek(), 100 + total);
    }
}

/// Counts how many frames in flight still need to see an updated record.
///
/// Each frame that uploads the record consumes one pending update.  Setting
/// the count again while updates are pending restarts it, so every frame in
/// flight sees the latest value.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DirtyCounter {
    pending: u32,
}

impl DirtyCounter {
    #[inline]
    pub fn mark(&mut self, frames_in_flight: u32) {
        self.pending = frames_in_flight;
    }

    /// Consumes one pending update.  Returns whether there was one.
    #[inline]
    pub fn consume(&mut self) -> bool {
        if self.pending > 0 {
            self.pending -= 1;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.pending > 0
    }

    #[inline]
    pub fn pending(&self) -> u32 {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_counts_down() {
        let mut d = DirtyCounter::default();
        assert!(!d.is_dirty());
        d.mark(3);
        assert!(d.consume());
        assert!(d.consume());
        assert!(d.consume());
        assert!(!d.consume());
        assert!(!d.is_dirty());
    }

    #[test]
    fn mark_restarts() {
        let mut d = DirtyCounter::default();
        d.mark(2);
        d.consume();
        d.mark(2);
        assert_eq!(d.pending(), 2);
    }
}

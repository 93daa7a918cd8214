use std::sync::{Mutex, MutexGuard, PoisonError};

/// Single-slot hand-off for a screenshot shared into the app.
///
/// The receiving side [`offer`](Self::offer)s the encoded image; the scanning
/// side [`take`](Self::take)s it. A take clears the slot, so each shared image
/// is consumed at most once. A second offer before the take replaces the
/// first image. Share one slot between both sides with an `Arc`.
#[derive(Debug, Default)]
pub struct SharedImageSlot {
    pending: Mutex<Option<Vec<u8>>>,
}

impl SharedImageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `image_bytes`. Returns `true` if an unconsumed image was dropped.
    pub fn offer(&self, image_bytes: Vec<u8>) -> bool {
        self.lock().replace(image_bytes).is_some()
    }

    pub fn take(&self) -> Option<Vec<u8>> {
        self.lock().take()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Vec<u8>>> {
        // The slot holds plain bytes; a panic elsewhere cannot leave it half-written.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn take_consumes_once() {
        let slot = SharedImageSlot::new();
        assert!(!slot.offer(vec![1, 2, 3]));
        assert_eq!(slot.take(), Some(vec![1, 2, 3]));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn newer_offer_replaces_pending_image() {
        let slot = SharedImageSlot::new();
        slot.offer(b"first".to_vec());
        assert!(slot.offer(b"second".to_vec()));
        assert_eq!(slot.take().as_deref(), Some(&b"second"[..]));
    }

    #[test]
    fn offer_after_take_starts_fresh() {
        let slot = SharedImageSlot::new();
        slot.offer(b"first".to_vec());
        slot.take();
        assert!(!slot.offer(b"second".to_vec()));
    }

    #[test]
    fn empty_slot_takes_nothing() {
        let slot = SharedImageSlot::new();
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn slot_is_shared_across_threads() {
        let slot = Arc::new(SharedImageSlot::new());
        let writer = Arc::clone(&slot);
        std::thread::spawn(move || {
            writer.offer(vec![9; 16]);
        })
        .join()
        .unwrap();
        assert_eq!(slot.take().map(|b| b.len()), Some(16));
    }
}

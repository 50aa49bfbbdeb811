//! Paste buffer entity
//!
//! Pure, synchronous queue state: the ordered item buffer, the LIFO paste
//! history, and the one-shot append-suppression flag. All index-based
//! operations validate bounds and degrade to no-ops so the buffer is always
//! in a consistent, renderable state. Side effects (clipboard writes, paste
//! chords, notifications) live in the application layer.

/// Ordered buffer of captured clipboard text plus dispatch bookkeeping.
///
/// Ordering contract:
///   index 0        -> next item dispatched by sequential paste
///   last index     -> next item dispatched by reverse paste
///
/// Dispatched items are pushed onto the paste history (LIFO); `restore`
/// pops one and re-inserts it at index 0, which is the only way an item
/// re-enters the buffer.
#[derive(Debug, Default)]
pub struct PasteBuffer {
    items: Vec<String>,
    history: Vec<String>,
    appendable: bool,
}

impl PasteBuffer {
    /// Create an empty buffer, ready to accept appends
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            history: Vec::new(),
            appendable: true,
        }
    }

    /// Number of buffered items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the buffer holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow the buffered items in dispatch order
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Owned snapshot of the buffered items, for observers
    pub fn snapshot(&self) -> Vec<String> {
        self.items.clone()
    }

    /// Number of items in the paste history
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Item at `index`, if in range
    pub fn item(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    /// Push a captured text to the back of the buffer
    pub fn append(&mut self, text: String) {
        self.items.push(text);
    }

    /// Remove the item at `index`. Returns false when out of range.
    pub fn delete_item(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }

    /// Remove the last item. Returns false on an empty buffer.
    pub fn delete_back(&mut self) -> bool {
        self.items.pop().is_some()
    }

    /// Insert a copy of the item at `index` immediately after it.
    /// Returns false when out of range.
    pub fn duplicate_item(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        let copy = self.items[index].clone();
        self.items.insert(index + 1, copy);
        true
    }

    /// Remove-then-insert reorder. No-op when `from == to` or either index
    /// is out of range.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        true
    }

    /// Replace the text at `index` in place. Returns false when out of range.
    pub fn update_item(&mut self, index: usize, new_value: String) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                *item = new_value;
                true
            }
            None => false,
        }
    }

    /// Collapse the whole buffer into a single item joined by `separator`.
    /// No-op on an empty buffer. Does not touch the paste history.
    pub fn join_items(&mut self, separator: &str) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let unified = self.items.join(separator);
        self.items = vec![unified];
        true
    }

    /// Remove the front item for sequential dispatch. Pushes it onto the
    /// paste history and arms append suppression for the clipboard write
    /// that follows.
    pub fn pop_front_for_paste(&mut self) -> Option<String> {
        if self.items.is_empty() {
            return None;
        }
        let item = self.items.remove(0);
        self.record_dispatch(&item);
        Some(item)
    }

    /// Remove the back item for reverse dispatch
    pub fn pop_back_for_paste(&mut self) -> Option<String> {
        let item = self.items.pop()?;
        self.record_dispatch(&item);
        Some(item)
    }

    /// Remove the item at `index` (clamped to the last index) for indexed
    /// dispatch. None only when the buffer is empty.
    pub fn pop_nth_for_paste(&mut self, index: usize) -> Option<String> {
        if self.items.is_empty() {
            return None;
        }
        let clamped = index.min(self.items.len() - 1);
        let item = self.items.remove(clamped);
        self.record_dispatch(&item);
        Some(item)
    }

    fn record_dispatch(&mut self, item: &str) {
        self.history.push(item.to_string());
        self.appendable = false;
    }

    /// Pop the most recently dispatched item off the paste history and
    /// re-insert it at index 0. No-op when the history is empty.
    pub fn restore(&mut self) -> bool {
        match self.history.pop() {
            Some(item) => {
                self.items.insert(0, item);
                true
            }
            None => false,
        }
    }

    /// Arm the one-shot suppression flag: the next observed clipboard
    /// change is consumed instead of appended. Used after every
    /// programmatic clipboard write.
    pub fn suppress_next_append(&mut self) {
        self.appendable = false;
    }

    /// Whether the next observed change would be appended
    pub fn is_appendable(&self) -> bool {
        self.appendable
    }

    /// Consume the suppression flag if armed. Returns true when the caller
    /// should drop the observed change instead of appending it.
    pub fn consume_suppression(&mut self) -> bool {
        if self.appendable {
            false
        } else {
            self.appendable = true;
            true
        }
    }

    /// Clear buffer, paste history, and suppression state back to initial.
    /// History is cleared together with the buffer so a restore after a
    /// reset cannot resurrect pre-reset items.
    pub fn reset(&mut self) {
        self.items.clear();
        self.history.clear();
        self.appendable = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_of(items: &[&str]) -> PasteBuffer {
        let mut buffer = PasteBuffer::new();
        for item in items {
            buffer.append(item.to_string());
        }
        buffer
    }

    #[test]
    fn new_buffer_is_empty_and_appendable() {
        let buffer = PasteBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.history_len(), 0);
        assert!(buffer.is_appendable());
    }

    #[test]
    fn append_preserves_fifo_order() {
        let mut buffer = buffer_of(&["a", "b", "c"]);
        assert_eq!(buffer.pop_front_for_paste().as_deref(), Some("a"));
        assert_eq!(buffer.pop_front_for_paste().as_deref(), Some("b"));
        assert_eq!(buffer.pop_front_for_paste().as_deref(), Some("c"));
        assert_eq!(buffer.pop_front_for_paste(), None);
    }

    #[test]
    fn reverse_dispatch_is_lifo() {
        let mut buffer = buffer_of(&["a", "b", "c"]);
        assert_eq!(buffer.pop_back_for_paste().as_deref(), Some("c"));
        assert_eq!(buffer.pop_back_for_paste().as_deref(), Some("b"));
        assert_eq!(buffer.pop_back_for_paste().as_deref(), Some("a"));
        assert_eq!(buffer.pop_back_for_paste(), None);
    }

    #[test]
    fn reverse_dispatch_independent_of_prior_sequential() {
        let mut buffer = buffer_of(&["a", "b", "c"]);
        assert_eq!(buffer.pop_front_for_paste().as_deref(), Some("a"));
        assert_eq!(buffer.pop_back_for_paste().as_deref(), Some("c"));
        assert_eq!(buffer.items(), &["b"]);
    }

    #[test]
    fn delete_back_removes_last() {
        let mut buffer = buffer_of(&["a", "b"]);
        assert!(buffer.delete_back());
        assert_eq!(buffer.items(), &["a"]);
        assert!(buffer.delete_back());
        assert!(!buffer.delete_back());
        assert_eq!(buffer.history_len(), 0);
    }

    #[test]
    fn dispatch_pushes_history_and_suppresses() {
        let mut buffer = buffer_of(&["x", "y"]);
        buffer.pop_front_for_paste().unwrap();
        assert_eq!(buffer.history_len(), 1);
        assert!(!buffer.is_appendable());
    }

    #[test]
    fn nth_dispatch_removes_at_index() {
        let mut buffer = buffer_of(&["a", "b", "c"]);
        assert_eq!(buffer.pop_nth_for_paste(1).as_deref(), Some("b"));
        assert_eq!(buffer.items(), &["a", "c"]);
    }

    #[test]
    fn nth_dispatch_clamps_to_last_index() {
        let mut buffer = buffer_of(&["a", "b"]);
        assert_eq!(buffer.pop_nth_for_paste(8).as_deref(), Some("b"));
        assert_eq!(buffer.items(), &["a"]);
    }

    #[test]
    fn nth_dispatch_on_empty_is_none() {
        let mut buffer = PasteBuffer::new();
        assert_eq!(buffer.pop_nth_for_paste(0), None);
        assert_eq!(buffer.history_len(), 0);
    }

    #[test]
    fn restore_reinserts_at_front() {
        let mut buffer = buffer_of(&["x", "y"]);
        buffer.pop_front_for_paste().unwrap();
        assert_eq!(buffer.items(), &["y"]);
        assert_eq!(buffer.history_len(), 1);

        assert!(buffer.restore());
        assert_eq!(buffer.items(), &["x", "y"]);
        assert_eq!(buffer.history_len(), 0);
    }

    #[test]
    fn restore_on_empty_history_is_noop() {
        let mut buffer = buffer_of(&["a"]);
        assert!(!buffer.restore());
        assert_eq!(buffer.items(), &["a"]);
    }

    #[test]
    fn restore_is_lifo_across_dispatches() {
        let mut buffer = buffer_of(&["a", "b", "c"]);
        buffer.pop_front_for_paste().unwrap(); // a
        buffer.pop_front_for_paste().unwrap(); // b
        assert!(buffer.restore()); // b comes back first
        assert_eq!(buffer.items(), &["b", "c"]);
        assert!(buffer.restore());
        assert_eq!(buffer.items(), &["a", "b", "c"]);
    }

    #[test]
    fn delete_item_in_range() {
        let mut buffer = buffer_of(&["a", "b", "c"]);
        assert!(buffer.delete_item(1));
        assert_eq!(buffer.items(), &["a", "c"]);
    }

    #[test]
    fn delete_item_out_of_range_is_noop() {
        let mut buffer = buffer_of(&["a"]);
        assert!(!buffer.delete_item(1));
        assert_eq!(buffer.items(), &["a"]);

        let mut empty = PasteBuffer::new();
        assert!(!empty.delete_item(0));
    }

    #[test]
    fn duplicate_inserts_copy_after_index() {
        let mut buffer = buffer_of(&["a", "b", "c"]);
        assert!(buffer.duplicate_item(1));
        assert_eq!(buffer.items(), &["a", "b", "b", "c"]);
    }

    #[test]
    fn duplicate_out_of_range_is_noop() {
        let mut buffer = buffer_of(&["a"]);
        assert!(!buffer.duplicate_item(3));
        assert_eq!(buffer.items(), &["a"]);
    }

    #[test]
    fn move_item_reorders() {
        let mut buffer = buffer_of(&["a", "b", "c"]);
        assert!(buffer.move_item(0, 2));
        assert_eq!(buffer.items(), &["b", "c", "a"]);
    }

    #[test]
    fn move_item_round_trips() {
        let mut buffer = buffer_of(&["a", "b", "c", "d"]);
        assert!(buffer.move_item(1, 3));
        assert!(buffer.move_item(3, 1));
        assert_eq!(buffer.items(), &["a", "b", "c", "d"]);
    }

    #[test]
    fn move_item_same_index_is_noop() {
        let mut buffer = buffer_of(&["a", "b"]);
        assert!(!buffer.move_item(1, 1));
        assert_eq!(buffer.items(), &["a", "b"]);
    }

    #[test]
    fn move_item_out_of_range_is_noop() {
        let mut buffer = buffer_of(&["a", "b"]);
        assert!(!buffer.move_item(0, 2));
        assert!(!buffer.move_item(5, 0));
        assert_eq!(buffer.items(), &["a", "b"]);
    }

    #[test]
    fn update_item_replaces_in_place() {
        let mut buffer = buffer_of(&["a", "b"]);
        assert!(buffer.update_item(1, "edited".to_string()));
        assert_eq!(buffer.items(), &["a", "edited"]);
    }

    #[test]
    fn update_item_out_of_range_is_noop() {
        let mut buffer = buffer_of(&["a"]);
        assert!(!buffer.update_item(1, "x".to_string()));
        assert_eq!(buffer.items(), &["a"]);
    }

    #[test]
    fn join_items_with_space() {
        let mut buffer = buffer_of(&["a", "b", "c"]);
        assert!(buffer.join_items(" "));
        assert_eq!(buffer.items(), &["a b c"]);
    }

    #[test]
    fn join_items_with_newline() {
        let mut buffer = buffer_of(&["a", "b", "c"]);
        assert!(buffer.join_items("\n"));
        assert_eq!(buffer.items(), &["a\nb\nc"]);
    }

    #[test]
    fn join_items_on_empty_is_noop() {
        let mut buffer = PasteBuffer::new();
        assert!(!buffer.join_items(" "));
        assert!(buffer.is_empty());
    }

    #[test]
    fn suppression_is_one_shot() {
        let mut buffer = PasteBuffer::new();
        buffer.suppress_next_append();
        assert!(buffer.consume_suppression());
        assert!(!buffer.consume_suppression());
        assert!(buffer.is_appendable());
    }

    #[test]
    fn reset_clears_everything() {
        let mut buffer = buffer_of(&["a", "b"]);
        buffer.pop_front_for_paste().unwrap();
        buffer.reset();

        assert!(buffer.is_empty());
        assert_eq!(buffer.history_len(), 0);
        assert!(buffer.is_appendable());
        assert!(!buffer.restore());

        // Appending after reset behaves as if starting fresh
        buffer.append("fresh".to_string());
        assert_eq!(buffer.items(), &["fresh"]);
    }
}

//! Shared counter driving the counter-sensitive sections.

/// Single integer cell owned by the controller.
///
/// Sections never hold their own reference to it; every query is handed a
/// `&Counter` instead. The counter emits no notification when it changes,
/// so whoever mutates it is responsible for telling the view to re-read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    value: usize,
}

impl Counter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value
    pub fn value(&self) -> usize {
        self.value
    }

    /// Add exactly one. Wraps at `usize::MAX`.
    pub fn increment(&mut self) {
        self.value = self.value.wrapping_add(1);
    }

    /// Whether the current value is even
    pub fn is_even(&self) -> bool {
        self.value % 2 == 0
    }
}

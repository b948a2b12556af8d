//! Contract between the section model and whatever draws it.
//!
//! The model only ever pushes three kinds of calls into a view: open a batch,
//! reload one section, close the batch. A view must treat everything between
//! `begin_batch_update` and `end_batch_update` as a single layout pass.

/// Transition used when a section is reloaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowAnimation {
    /// Let the view pick its default transition
    #[default]
    Automatic,
    None,
}

/// Core → view update surface
pub trait ListView {
    /// Open a batched update
    fn begin_batch_update(&mut self);

    /// Re-query the row count and visible rows of `section`
    fn reload_section(&mut self, section: usize, animation: RowAnimation);

    /// Close the batch and lay out once
    fn end_batch_update(&mut self);
}

/// One call received by a `RecordingView`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCall {
    Begin,
    Reload {
        section: usize,
        animation: RowAnimation,
    },
    End,
}

/// View that records every call it receives.
///
/// Used by the headless `dump` command and by tests.
#[derive(Debug, Default)]
pub struct RecordingView {
    calls: Vec<ViewCall>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[ViewCall] {
        &self.calls
    }

    /// Sections reloaded since the last `clear`, in call order
    pub fn reloaded_sections(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ViewCall::Reload { section, .. } => Some(*section),
                _ => None,
            })
            .collect()
    }

    /// Number of completed begin/end pairs
    pub fn batch_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, ViewCall::End))
            .count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl ListView for RecordingView {
    fn begin_batch_update(&mut self) {
        self.calls.push(ViewCall::Begin);
    }

    fn reload_section(&mut self, section: usize, animation: RowAnimation) {
        self.calls.push(ViewCall::Reload { section, animation });
    }

    fn end_batch_update(&mut self) {
        self.calls.push(ViewCall::End);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_view_tracks_calls() {
        let mut view = RecordingView::new();
        view.begin_batch_update();
        view.reload_section(2, RowAnimation::Automatic);
        view.reload_section(0, RowAnimation::None);
        view.end_batch_update();

        assert_eq!(view.calls().len(), 4);
        assert_eq!(view.reloaded_sections(), vec![2, 0]);
        assert_eq!(view.batch_count(), 1);

        view.clear();
        assert!(view.calls().is_empty());
        assert_eq!(view.batch_count(), 0);
    }
}

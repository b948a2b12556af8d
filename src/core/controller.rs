use crate::config::Config;
use crate::data::{
    CellContent, Counter, ListView, RefreshPlan, Section, SectionError, SectionRegistry,
};

/// Where the controller is in the reload cycle.
///
/// `Refreshing` only exists while `trigger_reload` runs its batch, so callers
/// outside that call always see `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Refreshing,
}

/// Owns the counter and the sections, handles the reload trigger and answers
/// the view's layout queries.
#[derive(Debug)]
pub struct Controller {
    counter: Counter,
    registry: SectionRegistry,
    state: ControllerState,
}

impl Controller {
    pub fn new(sections: Vec<Section>) -> Self {
        let counter = Counter::new();
        let registry = SectionRegistry::new(sections, &counter);
        Self {
            counter,
            registry,
            state: ControllerState::Idle,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.sections.iter().copied().map(Section::from).collect())
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Handle the reload action: bump the counter and reload the
    /// counter-sensitive sections in one batch.
    pub fn trigger_reload(&mut self, view: &mut dyn ListView) -> RefreshPlan {
        self.state = ControllerState::Refreshing;
        self.counter.increment();

        let plan = self.registry.refresh(&self.counter, view);
        self.state = ControllerState::Idle;

        tracing::info!(
            counter = self.counter.value(),
            sections = ?plan.indices(),
            "Reloaded counter sections"
        );
        for reload in &plan.reloads {
            tracing::debug!(
                "Section {}: {} -> {} rows",
                reload.index,
                reload.previous_rows,
                reload.rows
            );
        }
        plan
    }

    pub fn number_of_sections(&self) -> usize {
        self.registry.total_sections()
    }

    pub fn number_of_rows(&self, section: usize) -> Result<usize, SectionError> {
        self.registry.row_count(section, &self.counter)
    }

    pub fn content(&self, section: usize, row: usize) -> Result<CellContent, SectionError> {
        self.registry.content(section, row, &self.counter)
    }

    pub fn header_title(&self, section: usize) -> String {
        format!("Section {}", section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{RecordingView, SectionKind};
    use std::collections::HashSet;

    fn demo_controller() -> Controller {
        Controller::new(vec![
            Section::from(SectionKind::RandomNumber),
            Section::from(SectionKind::Static),
            Section::from(SectionKind::Increasing),
        ])
    }

    fn row_counts(controller: &Controller) -> Vec<usize> {
        (0..controller.number_of_sections())
            .map(|i| controller.number_of_rows(i).unwrap())
            .collect()
    }

    #[test]
    fn test_initial_layout() {
        let controller = demo_controller();
        assert_eq!(controller.counter().value(), 0);
        assert_eq!(controller.state(), ControllerState::Idle);
        assert_eq!(row_counts(&controller), vec![1, 1, 0]);
    }

    #[test]
    fn test_trigger_reload_once() {
        let mut controller = demo_controller();
        let mut view = RecordingView::new();

        controller.trigger_reload(&mut view);

        assert_eq!(controller.counter().value(), 1);
        assert_eq!(controller.state(), ControllerState::Idle);
        assert_eq!(row_counts(&controller), vec![1, 1, 1]);
        assert_eq!(view.reloaded_sections(), vec![0, 2]);
        assert_eq!(view.batch_count(), 1);
    }

    #[test]
    fn test_increasing_section_after_three_triggers() {
        let mut controller = demo_controller();
        let mut view = RecordingView::new();
        for _ in 0..3 {
            controller.trigger_reload(&mut view);
        }

        assert_eq!(controller.number_of_rows(2).unwrap(), 3);
        let details: HashSet<String> = (0..3)
            .map(|row| controller.content(2, row).unwrap().detail)
            .collect();
        assert_eq!(details.len(), 3);
        assert_eq!(view.batch_count(), 3);
    }

    #[test]
    fn test_random_row_reflects_counter() {
        let mut controller = demo_controller();
        let mut view = RecordingView::new();
        controller.trigger_reload(&mut view);
        controller.trigger_reload(&mut view);
        assert_eq!(controller.content(0, 0).unwrap().detail, "The number is 2");
    }

    #[test]
    fn test_out_of_range_queries() {
        let controller = demo_controller();
        assert_eq!(
            controller.number_of_rows(3).unwrap_err(),
            SectionError::SectionOutOfRange { index: 3, len: 3 }
        );
        assert!(controller.content(2, 0).is_err());
        assert!(controller.content(1, 1).is_err());
    }

    #[test]
    fn test_header_title_uses_index() {
        let controller = demo_controller();
        assert_eq!(controller.header_title(0), "Section 0");
        assert_eq!(controller.header_title(2), "Section 2");
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.sections = vec![SectionKind::ExpandCollapse];
        let mut controller = Controller::from_config(&config);
        assert_eq!(controller.number_of_sections(), 1);
        assert_eq!(controller.number_of_rows(0).unwrap(), 0);

        let mut view = RecordingView::new();
        controller.trigger_reload(&mut view);
        assert_eq!(controller.number_of_rows(0).unwrap(), 5);
    }
}

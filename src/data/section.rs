//! Section kinds shown in the list.
//!
//! The set of kinds is closed: `Section` is an enum and every query is a
//! `match`, so adding a kind forces every call site to handle it. Sections
//! that depend on the counter read it through the `&Counter` passed into
//! each query; none of them store it.

use super::counter::Counter;
use serde::{Deserialize, Serialize};

/// Title shared by every cell
pub const CELL_TITLE: &str = "This is a cell";

/// Row count of an expanded `ExpandCollapseSection`
pub const EXPANDED_ROWS: usize = 5;

/// Text for one row (title line plus detail line)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellContent {
    pub title: String,
    pub detail: String,
}

impl CellContent {
    fn with_detail(detail: String) -> Self {
        Self {
            title: CELL_TITLE.to_string(),
            detail,
        }
    }
}

/// Configuration name for each section kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    RandomNumber,
    Increasing,
    ExpandCollapse,
    Static,
}

impl SectionKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::RandomNumber => "random number",
            Self::Increasing => "increasing",
            Self::ExpandCollapse => "expand/collapse",
            Self::Static => "static",
        }
    }
}

/// One row whose detail shows the counter.
///
/// `number()` draws a fresh random value but the cell text shows the counter
/// value, not the draw.
#[derive(Debug, Clone, Default)]
pub struct RandomNumberSection;

impl RandomNumberSection {
    /// Fresh pseudo-random number on every call
    pub fn number(&self) -> u32 {
        rand::random()
    }

    fn content(&self, counter: &Counter) -> CellContent {
        CellContent::with_detail(format!("The number is {}", counter.value()))
    }
}

/// One row per counter increment
#[derive(Debug, Clone, Default)]
pub struct IncreasingSection;

/// Empty while the counter is even, five rows while it is odd
#[derive(Debug, Clone, Default)]
pub struct ExpandCollapseSection;

impl ExpandCollapseSection {
    fn row_count(&self, counter: &Counter) -> usize {
        if counter.is_even() {
            0
        } else {
            EXPANDED_ROWS
        }
    }
}

/// Single fixed row, ignores the counter
#[derive(Debug, Clone, Default)]
pub struct StaticSection;

impl StaticSection {
    /// Nothing to reload; `completion` runs immediately.
    pub fn reload<F: FnOnce()>(&self, completion: F) {
        completion();
    }
}

/// A section of the list
#[derive(Debug, Clone)]
pub enum Section {
    RandomNumber(RandomNumberSection),
    Increasing(IncreasingSection),
    ExpandCollapse(ExpandCollapseSection),
    Static(StaticSection),
}

impl Section {
    pub fn from_kind(kind: SectionKind) -> Self {
        match kind {
            SectionKind::RandomNumber => Self::RandomNumber(RandomNumberSection),
            SectionKind::Increasing => Self::Increasing(IncreasingSection),
            SectionKind::ExpandCollapse => Self::ExpandCollapse(ExpandCollapseSection),
            SectionKind::Static => Self::Static(StaticSection),
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            Self::RandomNumber(_) => SectionKind::RandomNumber,
            Self::Increasing(_) => SectionKind::Increasing,
            Self::ExpandCollapse(_) => SectionKind::ExpandCollapse,
            Self::Static(_) => SectionKind::Static,
        }
    }

    /// Number of rows for the current counter value.
    ///
    /// Pure: reads the counter, never changes it.
    pub fn row_count(&self, counter: &Counter) -> usize {
        match self {
            Self::RandomNumber(_) => 1,
            Self::Increasing(_) => counter.value(),
            Self::ExpandCollapse(section) => section.row_count(counter),
            Self::Static(_) => 1,
        }
    }

    /// Whether the row count or content depends on the counter
    pub fn uses_counter(&self) -> bool {
        !matches!(self, Self::Static(_))
    }

    /// Cell text for `row`.
    ///
    /// Callers validate `row` against `row_count` first (see
    /// `SectionRegistry::content`); this never fails.
    pub fn content(&self, counter: &Counter, row: usize) -> CellContent {
        match self {
            Self::RandomNumber(section) => section.content(counter),
            Self::Increasing(_) | Self::ExpandCollapse(_) => {
                CellContent::with_detail(format!("This is cell {}", row))
            }
            Self::Static(_) => CellContent::with_detail("This is a static section".to_string()),
        }
    }
}

impl From<SectionKind> for Section {
    fn from(kind: SectionKind) -> Self {
        Self::from_kind(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn counter_at(n: usize) -> Counter {
        let mut counter = Counter::new();
        for _ in 0..n {
            counter.increment();
        }
        counter
    }

    #[test]
    fn test_increasing_rows_follow_counter() {
        let section = Section::from_kind(SectionKind::Increasing);
        for n in 0..50 {
            assert_eq!(section.row_count(&counter_at(n)), n);
        }
    }

    #[test]
    fn test_expand_collapse_is_binary() {
        let section = Section::from_kind(SectionKind::ExpandCollapse);
        for n in 0..50 {
            let rows = section.row_count(&counter_at(n));
            let expected = if n % 2 == 0 { 0 } else { EXPANDED_ROWS };
            assert_eq!(rows, expected, "counter {}", n);
        }
    }

    #[test]
    fn test_single_row_sections_ignore_counter() {
        let random = Section::from_kind(SectionKind::RandomNumber);
        let fixed = Section::from_kind(SectionKind::Static);
        for n in 0..20 {
            let counter = counter_at(n);
            assert_eq!(random.row_count(&counter), 1);
            assert_eq!(fixed.row_count(&counter), 1);
        }
    }

    #[test]
    fn test_uses_counter_flags() {
        assert!(Section::from_kind(SectionKind::RandomNumber).uses_counter());
        assert!(Section::from_kind(SectionKind::Increasing).uses_counter());
        assert!(Section::from_kind(SectionKind::ExpandCollapse).uses_counter());
        assert!(!Section::from_kind(SectionKind::Static).uses_counter());
    }

    #[test]
    fn test_row_count_does_not_mutate_counter() {
        let counter = counter_at(3);
        for kind in [
            SectionKind::RandomNumber,
            SectionKind::Increasing,
            SectionKind::ExpandCollapse,
            SectionKind::Static,
        ] {
            let section = Section::from_kind(kind);
            let _ = section.row_count(&counter);
            let _ = section.content(&counter, 0);
            assert_eq!(counter.value(), 3);
        }
    }

    #[test]
    fn test_random_section_shows_counter_not_random_number() {
        let section = RandomNumberSection;
        let counter = counter_at(7);
        let content = Section::RandomNumber(section.clone()).content(&counter, 0);
        assert_eq!(content.title, CELL_TITLE);
        assert_eq!(content.detail, "The number is 7");

        // The random draw exists but never reaches the cell text
        let draw = section.number();
        if draw != 7 {
            assert!(!content.detail.contains(&draw.to_string()));
        }
    }

    #[test]
    fn test_random_section_ignores_row_index() {
        let section = Section::from_kind(SectionKind::RandomNumber);
        let counter = counter_at(2);
        assert_eq!(section.content(&counter, 0), section.content(&counter, 4));
    }

    #[test]
    fn test_increasing_content_distinct_per_row() {
        let section = Section::from_kind(SectionKind::Increasing);
        let counter = counter_at(3);
        let details: HashSet<String> = (0..section.row_count(&counter))
            .map(|row| section.content(&counter, row).detail)
            .collect();
        assert_eq!(details.len(), 3);
        assert!(details.contains("This is cell 2"));
    }

    #[test]
    fn test_static_content_is_fixed() {
        let section = Section::from_kind(SectionKind::Static);
        let before = section.content(&counter_at(0), 0);
        let after = section.content(&counter_at(9), 0);
        assert_eq!(before, after);
        assert_eq!(before.detail, "This is a static section");
    }

    #[test]
    fn test_static_reload_runs_completion_once() {
        let mut calls = 0;
        StaticSection.reload(|| calls += 1);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            SectionKind::RandomNumber,
            SectionKind::Increasing,
            SectionKind::ExpandCollapse,
            SectionKind::Static,
        ] {
            assert_eq!(Section::from(kind).kind(), kind);
        }
    }
}

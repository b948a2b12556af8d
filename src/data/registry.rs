//! Ordered collection of sections plus the batched refresh protocol.

use super::counter::Counter;
use super::section::{CellContent, Section};
use super::view::{ListView, RowAnimation};
use thiserror::Error;

/// Out-of-range access by a view.
///
/// A view must ask for counts before asking for content, so either variant
/// means the caller broke that contract. Returned to the caller, never
/// clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionError {
    #[error("section {index} out of range ({len} sections)")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("row {row} out of range for section {section} ({rows} rows)")]
    RowOutOfRange {
        section: usize,
        row: usize,
        rows: usize,
    },
}

/// One section scheduled for reload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionReload {
    pub index: usize,
    /// Row count the view was last told about
    pub previous_rows: usize,
    pub rows: usize,
}

/// Sections to reload in one batch, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshPlan {
    pub reloads: Vec<SectionReload>,
}

impl RefreshPlan {
    pub fn is_empty(&self) -> bool {
        self.reloads.is_empty()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.reloads.iter().map(|reload| reload.index).collect()
    }
}

/// Sections in display order, fixed at construction
#[derive(Debug, Clone)]
pub struct SectionRegistry {
    sections: Vec<Section>,
    /// Row counts as of the last applied refresh
    published_rows: Vec<usize>,
}

impl SectionRegistry {
    pub fn new(sections: Vec<Section>, counter: &Counter) -> Self {
        let published_rows = sections.iter().map(|s| s.row_count(counter)).collect();
        Self {
            sections,
            published_rows,
        }
    }

    pub fn total_sections(&self) -> usize {
        self.sections.len()
    }

    pub fn section(&self, index: usize) -> Result<&Section, SectionError> {
        self.sections
            .get(index)
            .ok_or(SectionError::SectionOutOfRange {
                index,
                len: self.sections.len(),
            })
    }

    pub fn row_count(&self, index: usize, counter: &Counter) -> Result<usize, SectionError> {
        Ok(self.section(index)?.row_count(counter))
    }

    pub fn content(
        &self,
        index: usize,
        row: usize,
        counter: &Counter,
    ) -> Result<CellContent, SectionError> {
        let section = self.section(index)?;
        let rows = section.row_count(counter);
        if row >= rows {
            return Err(SectionError::RowOutOfRange {
                section: index,
                row,
                rows,
            });
        }
        Ok(section.content(counter, row))
    }

    /// Decide which sections to reload without touching any view.
    pub fn plan_refresh(&self, counter: &Counter) -> RefreshPlan {
        let reloads = self
            .sections
            .iter()
            .enumerate()
            .filter(|(_, section)| section.uses_counter())
            .map(|(index, section)| SectionReload {
                index,
                previous_rows: self.published_rows[index],
                rows: section.row_count(counter),
            })
            .collect();
        RefreshPlan { reloads }
    }

    /// Reload every counter-sensitive section in one batch.
    ///
    /// The plan is computed in full before the view sees `begin_batch_update`.
    /// With nothing to reload the view still gets an empty begin/end pair.
    pub fn refresh(&mut self, counter: &Counter, view: &mut dyn ListView) -> RefreshPlan {
        let plan = self.plan_refresh(counter);

        view.begin_batch_update();
        for reload in &plan.reloads {
            view.reload_section(reload.index, RowAnimation::Automatic);
        }
        view.end_batch_update();

        for reload in &plan.reloads {
            self.published_rows[reload.index] = reload.rows;
        }
        plan
    }
}

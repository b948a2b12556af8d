//! Sectioned list widget.
//!
//! Caches the rows of every section and only goes back to the controller
//! for sections that were reloaded. Reloads arrive through `ListView` while
//! the controller is mid-refresh, so they are only recorded there; the
//! re-query happens on the next `sync`, after the batch has closed.

use crate::config::UiConfig;
use crate::core::Controller;
use crate::data::{CellContent, ListView, RowAnimation, SectionError};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct CachedSection {
    header: String,
    rows: Vec<CellContent>,
    /// How many times this section was fetched from the controller
    fetches: usize,
    highlight_until: Option<Instant>,
}

#[derive(Debug)]
pub struct SectionList {
    sections: Vec<CachedSection>,
    /// Reloads received inside the open batch
    pending: Vec<(usize, RowAnimation)>,
    /// Sections to re-query on the next sync
    stale: BTreeSet<usize>,
    in_batch: bool,
    needs_full_sync: bool,
    row_height: u16,
    highlight_duration: Duration,
    scroll_offset: usize,
    last_visible_height: usize,
}

impl SectionList {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            sections: Vec::new(),
            pending: Vec::new(),
            stale: BTreeSet::new(),
            in_batch: false,
            needs_full_sync: true,
            row_height: ui.row_height.max(1),
            highlight_duration: Duration::from_millis(ui.highlight_ms),
            scroll_offset: 0,
            last_visible_height: 10,
        }
    }

    /// Re-query the controller for every stale section.
    ///
    /// The first sync (or a change in section count) fetches everything.
    pub fn sync(&mut self, controller: &Controller) -> Result<(), SectionError> {
        let total = controller.number_of_sections();
        if self.needs_full_sync || self.sections.len() != total {
            tracing::debug!("Full sync of {} sections", total);
            self.sections = (0..total).map(|_| CachedSection::default()).collect();
            self.stale = (0..total).collect();
            self.needs_full_sync = false;
        }

        let stale = std::mem::take(&mut self.stale);
        for index in stale {
            self.fetch_section(controller, index)?;
        }
        Ok(())
    }

    fn fetch_section(&mut self, controller: &Controller, index: usize) -> Result<(), SectionError> {
        let row_count = controller.number_of_rows(index)?;
        let rows = (0..row_count)
            .map(|row| controller.content(index, row))
            .collect::<Result<Vec<_>, _>>()?;

        let section = &mut self.sections[index];
        section.header = controller.header_title(index);
        section.rows = rows;
        section.fetches += 1;
        Ok(())
    }

    pub fn fetch_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |s| s.fetches)
    }

    pub fn rows(&self, section: usize) -> &[CellContent] {
        self.sections
            .get(section)
            .map(|s| s.rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_stale(&self, section: usize) -> bool {
        self.stale.contains(&section)
    }

    pub fn is_highlighted(&self, section: usize, now: Instant) -> bool {
        self.sections
            .get(section)
            .and_then(|s| s.highlight_until)
            .is_some_and(|until| now < until)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max_scroll = self.total_lines().saturating_sub(self.last_visible_height);
        self.scroll_offset = (self.scroll_offset + lines).min(max_scroll);
    }

    pub fn page_size(&self) -> usize {
        self.last_visible_height.max(1)
    }

    fn total_lines(&self) -> usize {
        self.sections
            .iter()
            .map(|s| 1 + s.rows.len() * self.row_height as usize)
            .sum()
    }

    fn build_lines(&self, now: Instant) -> Vec<Line<'_>> {
        let mut lines = Vec::with_capacity(self.total_lines());
        for (index, section) in self.sections.iter().enumerate() {
            let mut header_style = Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD);
            if self.is_highlighted(index, now) {
                header_style = header_style.bg(Color::DarkGray);
            }
            lines.push(Line::from(Span::styled(section.header.as_str(), header_style)));

            for row in &section.rows {
                if self.row_height == 1 {
                    lines.push(Line::from(format!("  {}", row.detail)));
                    continue;
                }
                lines.push(Line::from(format!("  {}", row.title)));
                lines.push(Line::from(Span::styled(
                    format!("  {}", row.detail),
                    Style::default().fg(Color::Gray),
                )));
                for _ in 2..self.row_height {
                    lines.push(Line::default());
                }
            }
        }
        lines
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, counter: usize) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Dynamic Sections | counter: {} ", counter));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        self.last_visible_height = inner.height as usize;
        let max_scroll = self.total_lines().saturating_sub(self.last_visible_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let lines = self.build_lines(Instant::now());
        for (y, line) in lines
            .iter()
            .skip(self.scroll_offset)
            .take(inner.height as usize)
            .enumerate()
        {
            buf.set_line(inner.x, inner.y + y as u16, line, inner.width);
        }
    }
}

impl ListView for SectionList {
    fn begin_batch_update(&mut self) {
        if self.in_batch {
            tracing::warn!("begin_batch_update called inside an open batch");
        }
        self.in_batch = true;
        self.pending.clear();
    }

    fn reload_section(&mut self, section: usize, animation: RowAnimation) {
        if !self.in_batch {
            tracing::warn!("reload_section({}) outside a batch", section);
        }
        self.pending.push((section, animation));
    }

    fn end_batch_update(&mut self) {
        let now = Instant::now();
        for (section, animation) in self.pending.drain(..) {
            self.stale.insert(section);
            if animation == RowAnimation::Automatic && !self.highlight_duration.is_zero() {
                if let Some(cached) = self.sections.get_mut(section) {
                    cached.highlight_until = Some(now + self.highlight_duration);
                }
            }
        }
        self.in_batch = false;
        tracing::trace!("Batch closed, stale sections: {:?}", self.stale);
    }
}

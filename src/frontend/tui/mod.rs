//! TUI Frontend (ratatui-based)
//!
//! Wraps crossterm for event handling and terminal management; the list
//! itself lives in `section_list`.

pub mod app;
pub mod section_list;

pub use app::TuiFrontend;
pub use section_list::SectionList;

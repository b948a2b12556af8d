//! Frontend abstraction layer
//!
//! `Frontend` covers what the main loop needs from a frontend: event polling,
//! rendering and cleanup. Section updates travel separately through the
//! frontend's `ListView`.

pub mod events;
pub mod tui;

use crate::core::Controller;
use crate::data::ListView;
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

pub trait Frontend {
    /// Return all pending input events (empty if none arrived before the poll timeout)
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Draw the list, re-querying the controller for any stale sections
    fn render(&mut self, controller: &Controller) -> Result<()>;

    /// Restore the terminal
    fn cleanup(&mut self) -> Result<()>;

    /// Current terminal size as `(width, height)`
    fn size(&self) -> (u16, u16);

    /// View the controller pushes section reloads into
    fn list_view(&mut self) -> &mut dyn ListView;
}

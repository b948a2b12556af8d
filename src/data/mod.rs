//! Data layer - the section model without UI coupling
//!
//! NO imports from frontend/ or any rendering code. Frontends reach this
//! model through the controller and receive updates through `ListView`.

pub mod counter;
pub mod registry;
pub mod section;
pub mod view;

pub use counter::Counter;
pub use registry::{RefreshPlan, SectionError, SectionRegistry, SectionReload};
pub use section::{CellContent, Section, SectionKind};
pub use view::{ListView, RecordingView, RowAnimation, ViewCall};

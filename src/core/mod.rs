//! Core logic layer
//!
//! Owns the section model and decides what happens on each input.
//! NO imports from rendering code; views are reached through `ListView`.

pub mod controller;
pub mod input_router;

pub use controller::{Controller, ControllerState};
pub use input_router::{route_input, AppAction};

// RoleLens - ui/mod.rs
//
// Plain-text rendering of the application state for the terminal.
// Renderers return Strings; printing is the caller's job.

pub mod summary;
pub mod table;
pub mod values;

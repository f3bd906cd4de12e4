// RoleLens - app/mod.rs
//
// Application layer: state ownership and query resolution.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod query;
pub mod state;

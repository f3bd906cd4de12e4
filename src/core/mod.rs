// RoleLens - core/mod.rs
//
// Core business logic layer: the report codec and the query engine.
// Dependencies: serde, csv, tracing. No file or terminal I/O.
// Must NOT depend on: ui, platform, app.

pub mod classify;
pub mod codec;
pub mod export;
pub mod filter;
pub mod model;
pub mod schema;
pub mod sort;
pub mod stats;

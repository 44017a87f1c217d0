// Assistant Console - core/mod.rs
//
// Core data model and pure logic layer.
// Dependencies: standard library, serde, and util (constants) only.
// Must NOT depend on: ui, bridge, app, or any I/O directly.

pub mod logbuf;
pub mod model;

// Assistant Console - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (state, view models), core (read-only models), egui.
// Must NOT depend on: bridge, direct I/O (file pickers excepted).

pub mod panels;
pub mod theme;

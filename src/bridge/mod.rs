// Assistant Console - bridge/mod.rs
//
// Host boundary layer: everything the console reaches across to the
// engine for — the shared settings document, the append-only engine log,
// the localhost health/control endpoints, the sidecar launcher, and the
// Windows startup registration.
//
// Dependencies: core (data model), util. Must NOT depend on: app, ui.

pub mod health;
pub mod launcher;
pub mod log_source;
pub mod settings_store;
pub mod startup;

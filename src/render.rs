//! Rendering subsystem: view state in, terminal frames out.

pub mod ui;

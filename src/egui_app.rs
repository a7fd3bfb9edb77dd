//! egui front end: controller, view state, and renderer.

/// Event handling and state transitions.
pub mod controller;
/// Plain data consumed by the renderer.
pub mod state;
/// egui rendering.
pub mod ui;
/// Display-ready projections of controller state.
pub mod view_model;

//! Parameter Panel: live-editable shader uniforms and camera fields.
//!
//! Controls are declared once in [`controls`]; the egui front end reads each
//! bound field from the scene and turns user edits into [`SceneEvent`]s.
//!
//! # Invariants
//! - The panel never mutates the scene; it only emits events.
//! - A scalar edit is clamped to its range and snapped to its step before it
//!   leaves the panel.
//!
//! [`SceneEvent`]: tidewater_scene::SceneEvent

mod controls;
mod ui;

pub use controls::{Binding, Control, ControlValue, Folder, Range, controls};
pub use ui::{PANEL_TITLE, PANEL_WIDTH, ParameterPanel};

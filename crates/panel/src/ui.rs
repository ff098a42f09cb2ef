use crate::controls::{Binding, Control, ControlValue, Folder, controls};
use egui::Context as EguiContext;
use tidewater_common::Rgb;
use tidewater_scene::{SceneEvent, WaterScene};

pub const PANEL_TITLE: &str = "Parameters";
pub const PANEL_WIDTH: f32 = 340.0;

/// egui front end for the control list.
pub struct ParameterPanel {
    controls: Vec<Control>,
    visible: bool,
}

impl Default for ParameterPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterPanel {
    pub fn new() -> Self {
        Self {
            controls: controls(),
            visible: true,
        }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
        tracing::debug!(visible = self.visible, "parameter panel toggled");
    }

    /// Draw the panel and return the edits made this frame, in widget order.
    pub fn show(&self, ctx: &EguiContext, scene: &WaterScene) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        if !self.visible {
            return events;
        }

        egui::Window::new(PANEL_TITLE)
            .default_width(PANEL_WIDTH)
            .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
            .resizable(false)
            .show(ctx, |ui| {
                for folder in Folder::ALL {
                    egui::CollapsingHeader::new(folder.title())
                        .default_open(true)
                        .show(ui, |ui| {
                            for control in self.controls.iter().filter(|c| c.folder == folder) {
                                if let Some(value) = control_ui(ui, control, scene) {
                                    events.extend(control.edit(value));
                                }
                            }
                        });
                }
                ui.separator();
                ui.small("H: toggle panel");
            });

        events
    }
}

/// Draw one control; returns the new value if the user changed it.
fn control_ui(ui: &mut egui::Ui, control: &Control, scene: &WaterScene) -> Option<ControlValue> {
    let label = control.label.as_str();
    match (control.binding, control.current(scene)) {
        (Binding::Scalar(_, range), ControlValue::Scalar(mut value)) => {
            let slider = egui::Slider::new(&mut value, range.min..=range.max)
                .step_by(range.step as f64)
                .text(label);
            ui.add(slider)
                .changed()
                .then_some(ControlValue::Scalar(value))
        }
        (Binding::Color(_), ControlValue::Color(color)) => {
            let mut rgb = color.to_array();
            ui.horizontal(|ui| {
                let changed = egui::color_picker::color_edit_button_srgb(ui, &mut rgb).changed();
                ui.label(label);
                changed
            })
            .inner
            .then(|| ControlValue::Color(Rgb::from_array(rgb)))
        }
        (Binding::Wireframe, ControlValue::Flag(mut on)) => ui
            .checkbox(&mut on, label)
            .changed()
            .then_some(ControlValue::Flag(on)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidewater_scene::{SceneConfig, Viewport};

    fn scene() -> WaterScene {
        let config = SceneConfig {
            size: 10.0,
            subdivisions: 4,
        };
        WaterScene::new(&config, Viewport::new(1280, 720, 1.0))
    }

    fn run(panel: &ParameterPanel, scene: &WaterScene) -> Vec<SceneEvent> {
        let ctx = EguiContext::default();
        let mut events = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            events = panel.show(ctx, scene);
        });
        events
    }

    #[test]
    fn untouched_panel_emits_nothing() {
        let panel = ParameterPanel::new();
        assert!(panel.is_visible());
        assert!(run(&panel, &scene()).is_empty());
    }

    #[test]
    fn toggle_hides_and_shows() {
        let mut panel = ParameterPanel::new();
        panel.toggle_visible();
        assert!(!panel.is_visible());
        assert!(run(&panel, &scene()).is_empty());
        panel.toggle_visible();
        assert!(panel.is_visible());
    }

    #[test]
    fn panel_carries_every_control() {
        let panel = ParameterPanel::default();
        assert_eq!(panel.controls().len(), controls().len());
    }
}

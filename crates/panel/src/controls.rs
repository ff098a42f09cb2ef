use std::fmt;
use tidewater_common::{Axis, Rgb};
use tidewater_scene::{ColorParam, ScalarParam, SceneEvent, WaterScene};

/// Collapsible group of controls, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Folder {
    Waves,
    Colors,
    Canvas,
    Camera,
}

impl Folder {
    pub const ALL: [Folder; 4] = [Folder::Waves, Folder::Colors, Folder::Canvas, Folder::Camera];

    pub fn title(self) -> &'static str {
        match self {
            Folder::Waves => "Waves",
            Folder::Colors => "Colors",
            Folder::Canvas => "Canvas",
            Folder::Camera => "Camera",
        }
    }
}

/// Numeric bounds of a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamp to `[min, max]` and snap to the nearest step above `min`.
    pub fn constrain(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} step {}", self.min, self.max, self.step)
    }
}

/// Scene field a control writes to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binding {
    Scalar(ScalarParam, Range),
    Color(ColorParam),
    Wireframe,
}

/// A value as a control holds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Scalar(f32),
    Color(Rgb),
    Flag(bool),
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlValue::Scalar(v) => write!(f, "{v:.3}"),
            ControlValue::Color(c) => write!(f, "{c}"),
            ControlValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// One labelled control.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub folder: Folder,
    pub label: String,
    pub binding: Binding,
}

impl Control {
    fn new(folder: Folder, label: impl Into<String>, binding: Binding) -> Self {
        Self {
            folder,
            label: label.into(),
            binding,
        }
    }

    /// Read the bound field.
    pub fn current(&self, scene: &WaterScene) -> ControlValue {
        match self.binding {
            Binding::Scalar(param, _) => ControlValue::Scalar(scene.scalar(param)),
            Binding::Color(param) => ControlValue::Color(scene.color(param)),
            Binding::Wireframe => ControlValue::Flag(scene.surface.wireframe()),
        }
    }

    /// Turn an edited value into the event that writes it.
    ///
    /// Returns `None` when the value's kind does not match the binding.
    pub fn edit(&self, value: ControlValue) -> Option<SceneEvent> {
        match (self.binding, value) {
            (Binding::Scalar(param, range), ControlValue::Scalar(v)) => {
                Some(SceneEvent::SetScalar(param, range.constrain(v)))
            }
            (Binding::Color(param), ControlValue::Color(c)) => Some(SceneEvent::SetColor(param, c)),
            (Binding::Wireframe, ControlValue::Flag(on)) => Some(SceneEvent::SetWireframe(on)),
            _ => None,
        }
    }
}

const WAVE_ELEVATION: Range = Range::new(0.0, 1.0, 0.001);
const WAVE_FREQUENCY: Range = Range::new(0.0, 10.0, 0.001);
const WAVE_SPEED: Range = Range::new(0.0, 4.0, 0.001);
const WAVE_NOISE: Range = Range::new(0.0, 4.0, 0.001);
const COLOR_SCALAR: Range = Range::new(0.0, 10.0, 0.001);
const CAMERA_POSITION: Range = Range::new(-20.0, 20.0, 0.1);
const CAMERA_ROTATION: Range = Range::new(-2.0, 2.0, 0.001);

/// Every control on the panel, grouped by folder in display order.
pub fn controls() -> Vec<Control> {
    use Binding::{Color, Scalar, Wireframe};
    use Folder::{Camera, Canvas, Colors, Waves};

    let mut out = vec![
        Control::new(Waves, "Wave Elevation", Scalar(ScalarParam::WaveElevation, WAVE_ELEVATION)),
        Control::new(Waves, "Wave Width", Scalar(ScalarParam::WaveFrequencyX, WAVE_FREQUENCY)),
        Control::new(Waves, "Wave Length", Scalar(ScalarParam::WaveFrequencyZ, WAVE_FREQUENCY)),
        Control::new(Waves, "Wave Speed", Scalar(ScalarParam::WaveSpeed, WAVE_SPEED)),
        Control::new(Waves, "Wave Noise", Scalar(ScalarParam::WaveNoise, WAVE_NOISE)),
        Control::new(Colors, "Depth Color", Color(ColorParam::Depth)),
        Control::new(Colors, "Surface Color", Color(ColorParam::Surface)),
        Control::new(Colors, "Color Offset", Scalar(ScalarParam::ColorOffset, COLOR_SCALAR)),
        Control::new(Colors, "Color Multiplier", Scalar(ScalarParam::ColorMultiplier, COLOR_SCALAR)),
        Control::new(Canvas, "Background Color", Color(ColorParam::Background)),
        Control::new(Canvas, "Wireframe", Wireframe),
    ];
    for axis in Axis::ALL {
        out.push(Control::new(
            Camera,
            format!("{axis} Position"),
            Scalar(ScalarParam::CameraPosition(axis), CAMERA_POSITION),
        ));
    }
    for axis in Axis::ALL {
        out.push(Control::new(
            Camera,
            format!("{axis} Rotation"),
            Scalar(ScalarParam::CameraRotation(axis), CAMERA_ROTATION),
        ));
    }
    out
}

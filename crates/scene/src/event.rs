use tidewater_common::{Axis, Rgb};

/// A scalar field the panel can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarParam {
    WaveElevation,
    /// Wave frequency along world X.
    WaveFrequencyX,
    /// Wave frequency along world Z.
    WaveFrequencyZ,
    WaveSpeed,
    WaveNoise,
    ColorOffset,
    ColorMultiplier,
    CameraPosition(Axis),
    /// Camera rotation about one axis, as a fraction of π.
    CameraRotation(Axis),
}

/// A color field the panel can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorParam {
    Depth,
    Surface,
    Background,
}

/// Every way the scene can change after startup.
///
/// Produced by the panel and the window, consumed in order by
/// [`WaterScene::apply`](crate::WaterScene::apply).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    SetScalar(ScalarParam, f32),
    SetColor(ColorParam, Rgb),
    SetWireframe(bool),
    /// Window resized; size in physical pixels.
    Resized {
        width: u32,
        height: u32,
        scale_factor: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_constructible() {
        let e = SceneEvent::SetScalar(ScalarParam::CameraRotation(Axis::Y), 0.5);
        assert!(matches!(
            e,
            SceneEvent::SetScalar(ScalarParam::CameraRotation(Axis::Y), _)
        ));
        let c = SceneEvent::SetColor(ColorParam::Background, Rgb::BLACK);
        assert!(matches!(c, SceneEvent::SetColor(ColorParam::Background, _)));
    }
}

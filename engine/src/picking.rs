//! Colors read back from the picking framebuffer.
//!
//! UI buttons and gizmo handles are drawn with fixed colors, bones with
//! colors from [`ik::ColorGenerator`]. The palette below is reserved so the
//! two never collide.

use ik::PickColor;

/// Colors never assigned to bones.
pub const RESERVED_CONTROLS: [PickColor; 27] = [
    PickColor::new(255, 0, 0),
    PickColor::new(0, 255, 0),
    PickColor::new(0, 0, 255),
    PickColor::new(255, 255, 0),
    PickColor::new(255, 0, 255),
    PickColor::new(255, 0, 127),
    PickColor::new(0, 255, 255),
    PickColor::new(0, 127, 127),
    PickColor::new(127, 0, 0),
    PickColor::new(0, 127, 0),
    PickColor::new(0, 0, 127),
    PickColor::new(127, 127, 0),
    PickColor::new(127, 0, 127),
    PickColor::new(0, 128, 128),
    PickColor::new(128, 0, 0),
    PickColor::new(0, 128, 0),
    PickColor::new(0, 0, 128),
    PickColor::new(128, 128, 0),
    PickColor::new(128, 0, 128),
    PickColor::new(64, 64, 64),
    PickColor::new(64, 64, 127),
    PickColor::new(64, 127, 127),
    PickColor::new(64, 127, 191),
    PickColor::new(191, 127, 191),
    PickColor::new(191, 0, 191),
    PickColor::new(191, 64, 191),
    PickColor::new(255, 255, 255),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> ultraviolet::Vec3 {
        match self {
            Axis::X => ultraviolet::Vec3::unit_x(),
            Axis::Y => ultraviolet::Vec3::unit_y(),
            Axis::Z => ultraviolet::Vec3::unit_z(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tool {
    Select,
    Move,
    Rotate,
    PlaneSlice,
}

impl Default for Tool {
    fn default() -> Self {
        Tool::Select
    }
}

/// How body mesh is shaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyMode {
    Shaded,
    Normals,
    Patches,
    Features,
}

impl Default for BodyMode {
    fn default() -> Self {
        BodyMode::Shaded
    }
}

/// UI element hit by a click.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Gizmo(Axis),
    Tool(Tool),
    Body(BodyMode),
    TogglePoints,
    ToggleWireframe,
    CycleBackground,
}

impl Control {
    pub fn from_color(color: PickColor) -> Option<Self> {
        let PickColor { r, g, b } = color;
        let control = match (r, g, b) {
            (255, 0, 0) => Control::Gizmo(Axis::X),
            (0, 255, 0) => Control::Gizmo(Axis::Y),
            (0, 0, 255) => Control::Gizmo(Axis::Z),
            (255, 255, 0) => Control::Tool(Tool::Select),
            (255, 0, 255) => Control::Tool(Tool::Move),
            (255, 0, 127) => Control::Tool(Tool::Rotate),
            (0, 255, 255) => Control::Tool(Tool::PlaneSlice),
            (64, 64, 64) => Control::Body(BodyMode::Shaded),
            (64, 64, 127) => Control::Body(BodyMode::Normals),
            (64, 127, 127) => Control::Body(BodyMode::Patches),
            (64, 127, 191) => Control::Body(BodyMode::Features),
            (191, 127, 191) => Control::TogglePoints,
            (191, 0, 191) => Control::ToggleWireframe,
            (191, 64, 191) => Control::CycleBackground,
            _ => return None,
        };
        Some(control)
    }

    pub fn color(self) -> PickColor {
        match self {
            Control::Gizmo(Axis::X) => PickColor::new(255, 0, 0),
            Control::Gizmo(Axis::Y) => PickColor::new(0, 255, 0),
            Control::Gizmo(Axis::Z) => PickColor::new(0, 0, 255),
            Control::Tool(Tool::Select) => PickColor::new(255, 255, 0),
            Control::Tool(Tool::Move) => PickColor::new(255, 0, 255),
            Control::Tool(Tool::Rotate) => PickColor::new(255, 0, 127),
            Control::Tool(Tool::PlaneSlice) => PickColor::new(0, 255, 255),
            Control::Body(BodyMode::Shaded) => PickColor::new(64, 64, 64),
            Control::Body(BodyMode::Normals) => PickColor::new(64, 64, 127),
            Control::Body(BodyMode::Patches) => PickColor::new(64, 127, 127),
            Control::Body(BodyMode::Features) => PickColor::new(64, 127, 191),
            Control::TogglePoints => PickColor::new(191, 127, 191),
            Control::ToggleWireframe => PickColor::new(191, 0, 191),
            Control::CycleBackground => PickColor::new(191, 64, 191),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Control; 14] = [
        Control::Gizmo(Axis::X),
        Control::Gizmo(Axis::Y),
        Control::Gizmo(Axis::Z),
        Control::Tool(Tool::Select),
        Control::Tool(Tool::Move),
        Control::Tool(Tool::Rotate),
        Control::Tool(Tool::PlaneSlice),
        Control::Body(BodyMode::Shaded),
        Control::Body(BodyMode::Normals),
        Control::Body(BodyMode::Patches),
        Control::Body(BodyMode::Features),
        Control::TogglePoints,
        Control::ToggleWireframe,
        Control::CycleBackground,
    ];

    #[test]
    fn control_colors_round_trip_and_are_reserved() {
        for &control in &ALL {
            let color = control.color();
            assert_eq!(Control::from_color(color), Some(control));
            assert!(RESERVED_CONTROLS.contains(&color), "{:?}", control);
        }
        assert_eq!(Control::from_color(PickColor::new(1, 0, 0)), None);
    }
}

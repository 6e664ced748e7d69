//! Boundary between annotation state and whatever draws it.

use {
    crate::{
        picking::{BodyMode, Control},
        segmentation::Segmentation,
    },
    anthropometry_patches::{feature_color, SurfaceMesh},
    ik::Skeleton,
    ultraviolet::Vec3,
};

/// Background colors cycled by [`Control::CycleBackground`].
pub const BACKGROUNDS: [[f32; 3]; 5] = [
    [0.7, 0.85, 1.0],
    [1.0, 1.0, 1.0],
    [0.33, 0.33, 0.33],
    [0.66, 0.66, 0.66],
    [0.5, 0.5, 0.5],
];

const LINE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Display options toggled from the tool panel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewState {
    pub body: BodyMode,
    pub invert_color: bool,
    pub draw_points: bool,
    pub draw_wireframe: bool,
    pub background: usize,
}

impl ViewState {
    /// Applies display control.
    /// Returns `false` for controls that do not affect display.
    pub fn apply(&mut self, control: Control) -> bool {
        match control {
            Control::Body(mode) => {
                self.body = mode;
                match mode {
                    BodyMode::Patches => self.invert_color = false,
                    BodyMode::Features => self.invert_color = true,
                    _ => {}
                }
            }
            Control::TogglePoints => self.draw_points = !self.draw_points,
            Control::ToggleWireframe => {
                self.draw_wireframe = !self.draw_wireframe
            }
            Control::CycleBackground => {
                self.background = (self.background + 1) % BACKGROUNDS.len()
            }
            Control::Gizmo(_) | Control::Tool(_) => return false,
        }
        true
    }

    pub fn background_color(&self) -> [f32; 3] {
        BACKGROUNDS[self.background % BACKGROUNDS.len()]
    }

    /// Per-vertex colors of the body mesh for current mode.
    ///
    /// Modes that need segmentation fall back to shading when there is
    /// none yet.
    pub fn body_colors(
        &self,
        mesh: &SurfaceMesh,
        segmentation: Option<&Segmentation>,
    ) -> Vec<[f32; 3]> {
        let colors: Vec<[f32; 3]> = match (self.body, segmentation) {
            (BodyMode::Normals, _) => mesh
                .normals
                .iter()
                .map(|n| {
                    let c = *n * 0.5 + Vec3::broadcast(0.5);
                    [c.x, c.y, c.z]
                })
                .collect(),
            (BodyMode::Patches, Some(segmentation)) => {
                segmentation.patch_colors.clone()
            }
            (BodyMode::Features, Some(segmentation)) => segmentation
                .features
                .values()
                .iter()
                .map(|&v| feature_color(v))
                .collect(),
            _ => vec![[0.8, 0.8, 0.8]; mesh.vertex_count()],
        };

        if self.invert_color {
            colors
                .into_iter()
                .map(|[r, g, b]| [1.0 - r, 1.0 - g, 1.0 - b])
                .collect()
        } else {
            colors
        }
    }
}

/// Something that can draw bone markers.
pub trait BoneRenderer {
    fn draw_point(&mut self, position: Vec3, color: [f32; 3]);
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: [f32; 3]);
}

/// Draws every bone as a point and a line to each of its children.
pub fn draw_skeleton(skeleton: &Skeleton, renderer: &mut impl BoneRenderer) {
    for bone in skeleton.bones() {
        renderer.draw_point(bone.position, bone.color);
        for &child in bone.children() {
            renderer.draw_line(
                bone.position,
                skeleton.position(child),
                LINE_COLOR,
            );
        }
    }
}

/// Draws pickable bones with their picking colors.
pub fn draw_picking(skeleton: &Skeleton, renderer: &mut impl BoneRenderer) {
    for bone in skeleton.bones().iter().filter(|bone| bone.pickable) {
        renderer.draw_point(bone.position, bone.pick_color().to_unorm());
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Point { position: Vec3, color: [f32; 3] },
    Line { from: Vec3, to: Vec3, color: [f32; 3] },
}

/// Renderer that records commands instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        DrawList::default()
    }

    pub fn points(&self) -> impl Iterator<Item = (Vec3, [f32; 3])> + '_ {
        self.commands.iter().filter_map(|command| match *command {
            DrawCommand::Point { position, color } => Some((position, color)),
            DrawCommand::Line { .. } => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.commands.iter().filter_map(|command| match *command {
            DrawCommand::Line { from, to, .. } => Some((from, to)),
            DrawCommand::Point { .. } => None,
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl BoneRenderer for DrawList {
    fn draw_point(&mut self, position: Vec3, color: [f32; 3]) {
        self.commands.push(DrawCommand::Point { position, color });
    }

    fn draw_line(&mut self, from: Vec3, to: Vec3, color: [f32; 3]) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }
}

use {
    crate::config::{CameraConfig, ViewportConfig},
    ultraviolet::{projection::perspective_gl, Mat4, Vec2, Vec3, Vec4},
};

/// Depth at which cursor is un-projected, in normalized device coordinates.
const UNPROJECT_DEPTH: f32 = 0.95;

/// Smallest ray direction component along plane normal that is still
/// considered to hit the plane.
const MIN_RAY_NORMAL: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    #[error("Cursor ray is parallel to the placement plane")]
    ParallelToPlane,

    #[error("Placement plane is behind the camera")]
    BehindCamera,

    #[error("View-projection matrix is not invertible")]
    Singular,
}

#[derive(Clone, Copy, Debug)]
pub enum Camera {
    Perspective {
        vertical_fov: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    },
    Matrix(Mat4),
}

impl Camera {
    pub fn projection(&self) -> Mat4 {
        match *self {
            Self::Perspective {
                vertical_fov,
                aspect_ratio,
                z_near,
                z_far,
            } => perspective_gl(vertical_fov, aspect_ratio, z_near, z_far),

            Self::Matrix(mat) => mat,
        }
    }

    /// Keeps projection consistent with resized viewport.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if let Self::Perspective { aspect_ratio, .. } = self {
            *aspect_ratio = aspect;
        }
    }
}

/// Where camera is and where it looks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Eye {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Eye {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }
}

/// Window layout: scene is drawn between left tool panel and right info
/// panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub left_panel: f32,
    pub right_panel: f32,
}

impl Viewport {
    pub fn from_config(config: &ViewportConfig) -> Self {
        Viewport {
            width: config.width,
            height: config.height.max(1.0),
            left_panel: config.width / config.gui_fraction,
            right_panel: config.width / config.side_fraction,
        }
    }

    pub fn scene_width(&self) -> f32 {
        (self.width - self.left_panel - self.right_panel).max(1.0)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.scene_width() / self.height
    }

    /// Maps window coordinates (origin at top-left) into normalized device
    /// coordinates of the scene area.
    /// Returns `None` for points outside of the scene area.
    pub fn to_ndc(&self, screen: Vec2) -> Option<Vec2> {
        let x = screen.x - self.left_panel;
        if x < 0.0 || x > self.scene_width() {
            return None;
        }
        if screen.y < 0.0 || screen.y > self.height {
            return None;
        }

        Some(Vec2::new(
            x / self.scene_width() * 2.0 - 1.0,
            (self.height - screen.y) / self.height * 2.0 - 1.0,
        ))
    }
}

/// Scene camera with its placement.
#[derive(Clone, Copy, Debug)]
pub struct SceneCamera {
    pub camera: Camera,
    pub eye: Eye,
}

impl SceneCamera {
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        SceneCamera {
            camera: Camera::Perspective {
                vertical_fov: config.fovy,
                aspect_ratio: aspect,
                z_near: config.znear,
                z_far: config.zfar,
            },
            eye: Eye {
                position: config.eye.into(),
                target: config.target.into(),
                up: config.up.into(),
            },
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.camera.projection() * self.eye.view()
    }

    /// Casts ray through `ndc` and intersects it with world plane `z = 0`.
    pub fn project_on_ground(&self, ndc: Vec2) -> Result<Vec3, ProjectionError> {
        let view_projection = self.view_projection();
        if view_projection.determinant().abs() < f32::EPSILON {
            return Err(ProjectionError::Singular);
        }

        let point = view_projection.inversed()
            * Vec4::new(ndc.x, ndc.y, UNPROJECT_DEPTH, 1.0);
        if point.w.abs() < f32::EPSILON {
            return Err(ProjectionError::Singular);
        }
        let point = point.xyz() / point.w;

        let origin = self.eye.position;
        let direction = point - origin;
        let length = direction.mag();
        if !(length > f32::EPSILON) {
            return Err(ProjectionError::Singular);
        }
        let direction = direction / length;

        if direction.z.abs() < MIN_RAY_NORMAL {
            return Err(ProjectionError::ParallelToPlane);
        }

        let t = -origin.z / direction.z;
        if t < 0.0 {
            return Err(ProjectionError::BehindCamera);
        }

        Ok(origin + direction * t)
    }
}

use {
    crate::{
        camera::{ProjectionError, SceneCamera, Viewport},
        config::Config,
        picking::{Axis, Control, Tool, RESERVED_CONTROLS},
        render::ViewState,
    },
    ik::{BoneId, Chain, ChainError, IkSolver, PickColor, Skeleton},
    ultraviolet::{Vec2, Vec3},
};

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Seed chain has no joints")]
    EmptySeed,

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// What a click resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Control(Control),
    Bone(BoneId),
    Added(BoneId),
    Nothing,
}

/// Annotation state of a single window.
#[derive(Clone, Debug)]
pub struct Session {
    skeleton: Skeleton,
    chain: Chain,
    solver: IkSolver,
    camera: SceneCamera,
    viewport: Viewport,
    view: ViewState,
    tool: Tool,
    gizmo: Option<Axis>,
    joint_color: [f32; 3],
    segment_length: f32,
}

impl Session {
    /// Creates session with the seed chain and a free effector marker at
    /// its tip.
    pub fn new(config: &Config) -> Result<Self, SessionError> {
        let mut skeleton =
            Skeleton::with_reserved_colors(RESERVED_CONTROLS.iter().copied());

        let mut joints = Vec::with_capacity(config.seed.joints.len());
        let mut parent = None;
        for &position in &config.seed.joints {
            let id = skeleton.add_bone(
                position.into(),
                parent,
                config.seed.joint_color,
            );
            joints.push(id);
            parent = Some(id);
        }

        let tip = parent.ok_or(SessionError::EmptySeed)?;
        let tip_position = skeleton.position(tip);

        let effector =
            skeleton.add_bone(tip_position, None, config.seed.effector_color);
        skeleton[effector].pickable = true;
        skeleton.set_active(Some(tip));

        let rest_lengths = config.ik.rest_lengths_for(joints.len());
        let chain = Chain::with_rest_lengths(joints, effector, rest_lengths)?;

        // Used for every joint appended later.
        let segment_length = config.ik.segment_length;
        if !(segment_length > 0.0) || !segment_length.is_finite() {
            return Err(ChainError::NonPositiveLength {
                segment: chain.rest_lengths().len(),
                length: segment_length,
            }
            .into());
        }

        let viewport = Viewport::from_config(&config.viewport);
        let camera =
            SceneCamera::from_config(&config.camera, viewport.aspect_ratio());

        tracing::info!(
            "Session started with {} joints, effector at {:?}",
            chain.len(),
            tip_position
        );

        Ok(Session {
            skeleton,
            chain,
            solver: IkSolver::new(config.ik.epsilon)
                .with_last_target(tip_position),
            camera,
            viewport,
            view: ViewState::default(),
            tool: Tool::default(),
            gizmo: None,
            joint_color: config.seed.joint_color,
            segment_length,
        })
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn camera(&self) -> &SceneCamera {
        &self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Axis of the gizmo handle being dragged.
    pub fn gizmo(&self) -> Option<Axis> {
        self.gizmo
    }

    /// Replaces viewport, keeping camera aspect ratio in sync.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.camera.set_aspect_ratio(viewport.aspect_ratio());
    }

    /// Appends bone as a child of the active one.
    ///
    /// A bone appended to the chain tip extends the chain, so the effector
    /// drags it from then on. Without active bone it starts a new root.
    pub fn add_bone(
        &mut self,
        position: Vec3,
    ) -> Result<BoneId, SessionError> {
        let extends_chain = self.skeleton.active().is_some()
            && self.skeleton.active() == self.chain.tip();

        let bone = self.skeleton.extend_active(position, self.joint_color);
        if extends_chain {
            self.chain.push_joint(bone, self.segment_length)?;
            tracing::debug!(
                "Chain extended to {} joints by {:?}",
                self.chain.len(),
                bone
            );
        }
        Ok(bone)
    }

    /// Adds bone where the cursor ray hits plane `z = 0`.
    ///
    /// Clicks on side panels and rays that miss the plane add nothing.
    pub fn add_bone_at_screen_point(&mut self, screen: Vec2) -> Option<BoneId> {
        let ndc = match self.viewport.to_ndc(screen) {
            Some(ndc) => ndc,
            None => {
                tracing::trace!("Point {:?} is outside of the scene", screen);
                return None;
            }
        };

        let added = self
            .camera
            .project_on_ground(ndc)
            .map_err(SessionError::from)
            .and_then(|position| self.add_bone(position));

        match added {
            Ok(bone) => Some(bone),
            Err(err) => {
                tracing::warn!("Bone not added at {:?}: {}", screen, err);
                None
            }
        }
    }

    pub fn effector_position(&self) -> Vec3 {
        self.skeleton.position(self.chain.effector())
    }

    /// Moves effector marker. Chain follows on the next [`Session::tick`].
    pub fn set_effector_position(&mut self, position: Vec3) {
        self.skeleton.set_position(self.chain.effector(), position);
    }

    /// Resolves color read back from the picking pass.
    ///
    /// Missing every control and bone deselects active bone, so the next
    /// added bone starts a new root.
    pub fn select_by_color(&mut self, color: PickColor) -> Selection {
        if let Some(control) = Control::from_color(color) {
            self.apply_control(control);
            return Selection::Control(control);
        }

        match self.skeleton.bone_by_color(color) {
            Some(bone) => {
                tracing::debug!("Bone {:?} selected", bone);
                self.skeleton.set_active(Some(bone));
                Selection::Bone(bone)
            }
            None => {
                self.skeleton.set_active(None);
                Selection::Nothing
            }
        }
    }

    /// Handles click at `screen` where the picking pass read `color`.
    ///
    /// With plane slice tool every click off the controls adds a bone,
    /// even over another bone.
    pub fn click(&mut self, screen: Vec2, color: PickColor) -> Selection {
        match self.tool {
            Tool::PlaneSlice if Control::from_color(color).is_none() => {
                match self.add_bone_at_screen_point(screen) {
                    Some(bone) => Selection::Added(bone),
                    None => Selection::Nothing,
                }
            }
            _ => self.select_by_color(color),
        }
    }

    /// Ends gizmo drag.
    pub fn release(&mut self) {
        self.gizmo = None;
    }

    /// Translates active bone along world axis.
    /// Returns `false` when no bone is active.
    pub fn move_active(&mut self, axis: Axis, delta: f32) -> bool {
        match self.skeleton.active() {
            Some(active) => {
                self.skeleton[active].position += axis.unit() * delta;
                true
            }
            None => false,
        }
    }

    /// Drags active bone along the grabbed gizmo axis with the move tool.
    pub fn drag(&mut self, delta: f32) -> bool {
        match (self.tool, self.gizmo) {
            (Tool::Move, Some(axis)) => self.move_active(axis, delta),
            _ => false,
        }
    }

    /// Per-frame update. Returns `true` if chain was solved.
    pub fn tick(&mut self) -> bool {
        self.solver.update(&mut self.skeleton, &self.chain)
    }

    fn apply_control(&mut self, control: Control) {
        match control {
            Control::Gizmo(axis) => self.gizmo = Some(axis),
            Control::Tool(tool) => {
                tracing::debug!("Tool {:?} selected", tool);
                self.tool = tool;
            }
            _ => {
                self.view.apply(control);
            }
        }
    }
}

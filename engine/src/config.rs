use {
    eyre::{Report, WrapErr as _},
    serde::de::DeserializeOwned,
    std::path::{Path, PathBuf},
};

/// Environment variable overriding config file location.
pub const CONFIG_PATH_VAR: &str = "ANTHROPOMETRY_CONFIG_PATH";

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ik: IkConfig,

    #[serde(default)]
    pub seed: SeedConfig,

    #[serde(default)]
    pub segmentation: SegmentationConfig,

    #[serde(default)]
    pub camera: CameraConfig,

    #[serde(default)]
    pub viewport: ViewportConfig,
}

impl Config {
    /// Path from [`CONFIG_PATH_VAR`] or `./cfg.ron`.
    pub fn default_path() -> PathBuf {
        std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./cfg.ron"))
    }

    /// Loads config, falling back to defaults when file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, Report> {
        load_ron_or_default(path)
    }

    pub fn load(path: &Path) -> Result<Self, Report> {
        load_ron(path)
    }

    pub fn from_ron_str(source: &str) -> Result<Self, Report> {
        Ok(ron::de::from_str(source)?)
    }
}

/// Reads value from RON file.
#[tracing::instrument]
pub fn load_ron<T>(path: &Path) -> Result<T, Report>
where
    T: DeserializeOwned,
{
    let file = std::fs::File::open(path).wrap_err_with(|| {
        format!("Failed to open config file {}", path.display())
    })?;

    ron::de::from_reader(file).wrap_err_with(|| {
        format!("Failed to parse config file {}", path.display())
    })
}

/// Same as [`load_ron`], but missing file yields `T::default()`.
pub fn load_ron_or_default<T>(path: &Path) -> Result<T, Report>
where
    T: DeserializeOwned + Default,
{
    if path.exists() {
        load_ron(path)
    } else {
        tracing::info!(
            "Config file {} not found, using defaults",
            path.display()
        );
        Ok(T::default())
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct IkConfig {
    /// Rest length for segments without explicit override.
    #[serde(default = "default_segment_length")]
    pub segment_length: f32,

    /// Per-segment rest lengths, from root to tip.
    #[serde(default)]
    pub rest_lengths: Option<Vec<f32>>,

    /// Effector motion that triggers a new solve.
    #[serde(default = "default_epsilon")]
    pub epsilon: f32,
}

impl Default for IkConfig {
    fn default() -> Self {
        IkConfig {
            segment_length: default_segment_length(),
            rest_lengths: None,
            epsilon: default_epsilon(),
        }
    }
}

impl IkConfig {
    /// Rest lengths for a chain of `joints` joints.
    pub fn rest_lengths_for(&self, joints: usize) -> Vec<f32> {
        let segments = joints.saturating_sub(1);
        match &self.rest_lengths {
            Some(lengths) => (0..segments)
                .map(|i| lengths.get(i).copied().unwrap_or(self.segment_length))
                .collect(),
            None => vec![self.segment_length; segments],
        }
    }
}

/// Chain created when a session starts.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct SeedConfig {
    /// Joint positions from root to tip.
    #[serde(default = "default_seed_joints")]
    pub joints: Vec<[f32; 3]>,

    #[serde(default = "default_joint_color")]
    pub joint_color: [f32; 3],

    /// Effector starts at the tip joint.
    #[serde(default = "default_effector_color")]
    pub effector_color: [f32; 3],
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig {
            joints: default_seed_joints(),
            joint_color: default_joint_color(),
            effector_color: default_effector_color(),
        }
    }
}

#[derive(Clone, Copy, Debug, serde::Deserialize)]
pub struct SegmentationConfig {
    #[serde(default = "default_angle_threshold")]
    pub angle_threshold: f32,

    /// Upper bound of merge passes.
    #[serde(default = "default_passes")]
    pub passes: usize,

    /// Seed for patch colors.
    #[serde(default)]
    pub color_seed: u64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        SegmentationConfig {
            angle_threshold: default_angle_threshold(),
            passes: default_passes(),
            color_seed: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, serde::Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_eye")]
    pub eye: [f32; 3],
    #[serde(default = "default_target")]
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    #[serde(default = "default_fovy")]
    pub fovy: f32,
    #[serde(default = "default_znear")]
    pub znear: f32,
    #[serde(default = "default_zfar")]
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            eye: default_eye(),
            target: default_target(),
            up: default_up(),
            fovy: default_fovy(),
            znear: default_znear(),
            zfar: default_zfar(),
        }
    }
}

#[derive(Clone, Copy, Debug, serde::Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,

    /// Left tool panel takes `width / gui_fraction`.
    #[serde(default = "default_gui_fraction")]
    pub gui_fraction: f32,

    /// Right info panel takes `width / side_fraction`.
    #[serde(default = "default_side_fraction")]
    pub side_fraction: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportConfig {
            width: default_width(),
            height: default_height(),
            gui_fraction: default_gui_fraction(),
            side_fraction: default_side_fraction(),
        }
    }
}

fn default_segment_length() -> f32 {
    ik::DEFAULT_SEGMENT_LENGTH
}

fn default_epsilon() -> f32 {
    ik::DEFAULT_EPSILON
}

fn default_seed_joints() -> Vec<[f32; 3]> {
    vec![
        [0.0, 0.0, 0.0],
        [0.0, 10.0, 0.0],
        [0.0, 20.0, 0.0],
        [0.0, 30.0, 0.0],
    ]
}

fn default_joint_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_effector_color() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_angle_threshold() -> f32 {
    anthropometry_patches::DEFAULT_ANGLE_THRESHOLD
}

fn default_passes() -> usize {
    1
}

fn default_eye() -> [f32; 3] {
    [0.0, 60.0, 80.0]
}

fn default_target() -> [f32; 3] {
    [0.0, 30.0, 0.0]
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_fovy() -> f32 {
    std::f32::consts::FRAC_PI_4
}

fn default_znear() -> f32 {
    1.0
}

fn default_zfar() -> f32 {
    200.0
}

fn default_width() -> f32 {
    800.0
}

fn default_height() -> f32 {
    450.0
}

fn default_gui_fraction() -> f32 {
    16.0
}

fn default_side_fraction() -> f32 {
    3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_ron_str("()").unwrap();
        assert_eq!(config.ik.segment_length, 10.0);
        assert_eq!(config.seed.joints.len(), 4);
        assert_eq!(config.segmentation.passes, 1);
        assert_eq!(config.viewport.width, 800.0);
    }

    #[test]
    fn partial_sections_are_filled() {
        let config = Config::from_ron_str(
            r#"(
                ik: (segment_length: 4.0, rest_lengths: Some([2.0])),
                segmentation: (angle_threshold: 0.8, passes: 3),
            )"#,
        )
        .unwrap();

        assert_eq!(config.ik.epsilon, ik::DEFAULT_EPSILON);
        assert_eq!(config.ik.rest_lengths_for(4), vec![2.0, 4.0, 4.0]);
        assert_eq!(config.segmentation.angle_threshold, 0.8);
        assert_eq!(config.segmentation.passes, 3);
        assert_eq!(config.camera.eye, [0.0, 60.0, 80.0]);
    }

    #[test]
    fn config_file_is_read() {
        let path = std::env::temp_dir().join(format!(
            "anthropometry-cfg-{}.ron",
            std::process::id()
        ));
        std::fs::write(&path, "(ik: (segment_length: 7.0))").unwrap();
        let config = Config::load_or_default(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.unwrap().ik.segment_length, 7.0);
    }

    #[test]
    fn broken_file_is_reported() {
        let path = std::env::temp_dir().join(format!(
            "anthropometry-broken-{}.ron",
            std::process::id()
        ));
        std::fs::write(&path, "(ik: (segment_length: ").unwrap();
        let result = load_ron::<Config>(&path);
        std::fs::remove_file(&path).unwrap();

        let message = format!("{}", result.unwrap_err());
        assert!(message.contains("Failed to parse"), "{}", message);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config =
            Config::load_or_default(Path::new("./definitely/missing/cfg.ron"))
                .unwrap();
        assert_eq!(config.seed.joints, default_seed_joints());
    }
}

use anthropometry::mesh::MeshSource;

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: anthropometry::Config,

    #[serde(default)]
    pub tool: ToolConfig,
}

/// Scripted interaction replayed by the tool.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub mesh: MeshSource,

    /// Effector positions, one per frame.
    #[serde(default = "default_effector_path")]
    pub effector_path: Vec<[f32; 3]>,

    /// Window points clicked with the plane slice tool.
    #[serde(default = "default_clicks")]
    pub clicks: Vec<[f32; 2]>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        ToolConfig {
            mesh: MeshSource::default(),
            effector_path: default_effector_path(),
            clicks: default_clicks(),
        }
    }
}

fn default_effector_path() -> Vec<[f32; 3]> {
    vec![
        [0.0, 30.0, 0.0],
        [0.0, 30.0, 10.0],
        [5.0, 25.0, 10.0],
        [10.0, 20.0, 5.0],
    ]
}

fn default_clicks() -> Vec<[f32; 2]> {
    vec![[300.0, 225.0], [400.0, 150.0]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_optional() {
        let config: Config = ron::de::from_str(
            r#"(
                tool: (mesh: Plane(x: 4, y: 4), clicks: []),
            )"#,
        )
        .unwrap();

        assert_eq!(config.tool.mesh, MeshSource::Plane { x: 4, y: 4 });
        assert!(config.tool.clicks.is_empty());
        assert_eq!(config.tool.effector_path, default_effector_path());
        assert_eq!(config.engine.seed.joints.len(), 4);
    }
}

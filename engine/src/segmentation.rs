use {
    crate::config::SegmentationConfig,
    anthropometry_patches::{
        patch_colors, FeatureMap, PatchBuilder, SegmentError, SurfaceMesh,
        UnionFind, VertexGraph,
    },
    rand::{rngs::StdRng, Rng, SeedableRng as _},
};

/// Everything computed from a body mesh before annotation starts.
#[derive(Clone, Debug)]
pub struct Segmentation {
    pub graph: VertexGraph,
    pub partition: UnionFind,
    pub features: FeatureMap,

    /// One color per vertex, shared by members of a patch.
    pub patch_colors: Vec<[f32; 3]>,
}

impl Segmentation {
    #[tracing::instrument(skip(mesh, rng), fields(vertices = mesh.vertex_count()))]
    pub fn run(
        mesh: &SurfaceMesh,
        config: &SegmentationConfig,
        rng: &mut impl Rng,
    ) -> Result<Self, SegmentError> {
        let builder = PatchBuilder::new(config.angle_threshold);
        let (graph, mut partition) =
            builder.segment_mesh(mesh, config.passes)?;

        let features = FeatureMap::compute(&graph, &mut partition)?;
        let patch_colors = patch_colors(&mut partition, rng);

        Ok(Segmentation {
            graph,
            partition,
            features,
            patch_colors,
        })
    }

    /// Runs segmentation with patch colors seeded from config.
    pub fn with_config(
        mesh: &SurfaceMesh,
        config: &SegmentationConfig,
    ) -> Result<Self, SegmentError> {
        let mut rng = StdRng::seed_from_u64(config.color_seed);
        Segmentation::run(mesh, config, &mut rng)
    }

    pub fn patch_count(&self) -> usize {
        self.partition.set_count()
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::mesh::MeshSource};

    #[test]
    fn cube_segmentation() {
        let mesh = MeshSource::Cube.build().unwrap();
        let config = SegmentationConfig {
            passes: 3,
            ..SegmentationConfig::default()
        };
        let segmentation = Segmentation::with_config(&mesh, &config).unwrap();

        assert_eq!(segmentation.patch_count(), 6);
        assert_eq!(segmentation.patch_colors.len(), mesh.vertex_count());
        // Cube faces share no vertices, so no patch has a foreign neighbour.
        assert_eq!(segmentation.features.max_count(), 0);
    }

    #[test]
    fn same_seed_gives_same_colors() {
        let mesh = MeshSource::Plane { x: 3, y: 3 }.build().unwrap();
        let config = SegmentationConfig {
            passes: 0,
            ..SegmentationConfig::default()
        };
        let a = Segmentation::with_config(&mesh, &config).unwrap();
        let b = Segmentation::with_config(&mesh, &config).unwrap();
        assert_eq!(a.patch_colors, b.patch_colors);
        assert_eq!(a.patch_count(), mesh.vertex_count());
    }
}

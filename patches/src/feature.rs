use {
    crate::{graph::VertexGraph, patch::SegmentError, union_find::UnionFind},
    ahash::AHashMap,
    rand::Rng,
};

/// Per-vertex boundary strength of a segmentation.
///
/// For every vertex counts neighbours lying in another patch, then maps
/// the count to `(count / max_count)^4`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureMap {
    values: Vec<f32>,
    counts: Vec<u32>,
    max_count: u32,
}

impl FeatureMap {
    pub fn compute(
        graph: &VertexGraph,
        uf: &mut UnionFind,
    ) -> Result<Self, SegmentError> {
        if graph.len() != uf.len() {
            return Err(SegmentError::GraphMismatch {
                partition: uf.len(),
                graph: graph.len(),
            });
        }

        let representatives = uf.representatives();
        let counts: Vec<u32> = (0..graph.len())
            .map(|i| {
                graph
                    .neighbors(i)
                    .iter()
                    .filter(|&&j| {
                        representatives[j as usize] != representatives[i]
                    })
                    .count() as u32
            })
            .collect();

        let max_count = counts.iter().copied().max().unwrap_or(0);

        let values = if max_count == 0 {
            vec![0.0; counts.len()]
        } else {
            counts
                .iter()
                .map(|&count| (count as f32 / max_count as f32).powi(4))
                .collect()
        };

        tracing::debug!(
            "Feature map over {} vertices, max boundary count {}",
            values.len(),
            max_count
        );

        Ok(FeatureMap {
            values,
            counts,
            max_count,
        })
    }

    /// Feature value of every vertex, in `[0, 1]`.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of neighbours in another patch, per vertex.
    pub fn boundary_counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}

/// Tint used to display a feature value.
pub fn feature_color(value: f32) -> [f32; 3] {
    [0.0, value, value * 0.5]
}

/// Random color for every patch, expanded per vertex.
pub fn patch_colors(uf: &mut UnionFind, rng: &mut impl Rng) -> Vec<[f32; 3]> {
    let mut colors = AHashMap::new();
    uf.representatives()
        .into_iter()
        .map(|representative| {
            *colors.entry(representative).or_insert_with(|| {
                let mut channel = || rng.gen_range(0..=100) as f32 / 100.0;
                [channel(), channel(), channel()]
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use {super::*, rand::SeedableRng as _};

    /// Path 0 - 1 - 2 - 3 - 4.
    fn path() -> VertexGraph {
        VertexGraph::from_edges(5, (0..4).map(|i| (i, i + 1))).unwrap()
    }

    #[test]
    fn single_patch_has_no_features() {
        let graph = path();
        let mut uf = UnionFind::new(5);
        for i in 0..4 {
            uf.union(i, i + 1);
        }

        let map = FeatureMap::compute(&graph, &mut uf).unwrap();
        assert_eq!(map.max_count(), 0);
        assert_eq!(map.values(), &[0.0; 5]);
    }

    #[test]
    fn boundary_counts_are_normalized() {
        let graph = path();
        let mut uf = UnionFind::new(5);
        uf.union(0, 1);
        uf.union(3, 4);

        let map = FeatureMap::compute(&graph, &mut uf).unwrap();
        assert_eq!(map.boundary_counts(), &[0, 1, 2, 1, 0]);
        assert_eq!(map.max_count(), 2);

        let expected = [0.0, 0.0625, 1.0, 0.0625, 0.0];
        for (value, expected) in map.values().iter().zip(&expected) {
            assert!((value - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn values_stay_in_unit_range() {
        let graph = path();
        let mut uf = UnionFind::new(5);
        let map = FeatureMap::compute(&graph, &mut uf).unwrap();
        assert!(map.values().iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert_eq!(map.values(), &[0.0625, 1.0, 1.0, 1.0, 0.0625]);
    }

    #[test]
    fn patch_colors_are_shared_within_patch() {
        let mut uf = UnionFind::new(4);
        uf.union(0, 2);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let colors = patch_colors(&mut uf, &mut rng);

        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], colors[2]);
        assert!(colors
            .iter()
            .flatten()
            .all(|&c| (0.0..=1.0).contains(&c)));
    }

    #[test]
    fn feature_tint() {
        assert_eq!(feature_color(1.0), [0.0, 1.0, 0.5]);
        assert_eq!(feature_color(0.0), [0.0, 0.0, 0.0]);
    }
}

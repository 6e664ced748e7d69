use {
    crate::{
        graph::{GraphError, SurfaceMesh, VertexGraph},
        union_find::UnionFind,
    },
    ahash::AHashMap,
    bumpalo::{collections::Vec as BVec, Bump},
    ultraviolet::Vec3,
};

/// Minimal dot product of average normals for two patches to merge.
pub const DEFAULT_ANGLE_THRESHOLD: f32 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    #[error("Partition has {partition} elements, normals {normals}, graph {graph}")]
    SizeMismatch {
        partition: usize,
        normals: usize,
        graph: usize,
    },

    #[error("Partition has {partition} elements, graph {graph}")]
    GraphMismatch { partition: usize, graph: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Group of vertices sharing a representative in the current partition.
///
/// Patches are scratch data of a single pass and live in its arena.
#[derive(Debug)]
pub struct Patch<'a> {
    pub representative: usize,
    pub members: BVec<'a, u32>,
    pub normals: BVec<'a, Vec3>,

    /// Arithmetic mean of member normals.
    /// Deliberately left unnormalized.
    pub average_normal: Vec3,

    /// Sorted representatives of neighbouring patches.
    pub adjacent: BVec<'a, usize>,
}

impl Patch<'_> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member used to join this patch with others.
    pub fn first_member(&self) -> usize {
        self.members[0] as usize
    }
}

/// Patches of a partition, in order of their first member.
#[derive(Debug)]
pub struct Patches<'a> {
    patches: BVec<'a, Patch<'a>>,
    by_representative: AHashMap<usize, usize>,
}

impl<'a> Patches<'a> {
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Patch<'a>> {
        self.patches.iter()
    }

    pub fn get(&self, representative: usize) -> Option<&Patch<'a>> {
        let index = *self.by_representative.get(&representative)?;
        Some(&self.patches[index])
    }
}

/// Outcome of a single merge pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    pub patches_before: usize,
    pub patches_after: usize,
    pub merges: usize,
}

/// Greedy merging of neighbouring patches with similar average normals.
#[derive(Clone, Copy, Debug)]
pub struct PatchBuilder {
    pub threshold: f32,
}

impl Default for PatchBuilder {
    fn default() -> Self {
        PatchBuilder::new(DEFAULT_ANGLE_THRESHOLD)
    }
}

impl PatchBuilder {
    pub fn new(threshold: f32) -> Self {
        PatchBuilder { threshold }
    }

    /// Groups vertices of the current partition into patches with their
    /// average normals and adjacency.
    pub fn patches<'a>(
        &self,
        uf: &mut UnionFind,
        normals: &[Vec3],
        graph: &VertexGraph,
        bump: &'a Bump,
    ) -> Result<Patches<'a>, SegmentError> {
        if uf.len() != normals.len() || uf.len() != graph.len() {
            return Err(SegmentError::SizeMismatch {
                partition: uf.len(),
                normals: normals.len(),
                graph: graph.len(),
            });
        }

        let representatives = uf.representatives();

        let mut patches = BVec::new_in(bump);
        let mut by_representative = AHashMap::new();

        for (vertex, (&representative, &normal)) in
            representatives.iter().zip(normals).enumerate()
        {
            let index =
                *by_representative.entry(representative).or_insert_with(|| {
                    patches.push(Patch {
                        representative,
                        members: BVec::new_in(bump),
                        normals: BVec::new_in(bump),
                        average_normal: Vec3::zero(),
                        adjacent: BVec::new_in(bump),
                    });
                    patches.len() - 1
                });

            let patch = &mut patches[index];
            patch.members.push(vertex as u32);
            patch.normals.push(normal);
        }

        for patch in patches.iter_mut() {
            let sum = patch
                .normals
                .iter()
                .fold(Vec3::zero(), |acc, &normal| acc + normal);
            patch.average_normal = sum / patch.normals.len() as f32;
        }

        for (a, b) in graph.edges() {
            let (ra, rb) = (representatives[a], representatives[b]);
            if ra != rb {
                patches[by_representative[&ra]].adjacent.push(rb);
                patches[by_representative[&rb]].adjacent.push(ra);
            }
        }

        for patch in patches.iter_mut() {
            patch.adjacent.sort_unstable();
            patch.adjacent.dedup();
        }

        Ok(Patches {
            patches,
            by_representative,
        })
    }

    /// Performs one greedy merge pass over `uf`.
    ///
    /// Patches are computed once at the start of the pass, so merges made
    /// during the pass do not affect decisions taken later in it.
    pub fn merge_pass(
        &self,
        uf: &mut UnionFind,
        normals: &[Vec3],
        graph: &VertexGraph,
        bump: &Bump,
    ) -> Result<PassReport, SegmentError> {
        let patches = self.patches(uf, normals, graph, bump)?;

        let mut merges = 0;
        for patch in patches.iter() {
            for &other in patch.adjacent.iter() {
                let other = match patches.get(other) {
                    Some(other) => other,
                    None => continue,
                };

                let dot = patch.average_normal.dot(other.average_normal);
                if dot > self.threshold
                    && uf.union(patch.first_member(), other.first_member())
                {
                    merges += 1;
                }
            }
        }

        Ok(PassReport {
            patches_before: patches.len(),
            patches_after: uf.set_count(),
            merges,
        })
    }

    /// Segments mesh starting from singleton patches.
    ///
    /// Runs at most `passes` merge passes and stops early once a pass
    /// merges nothing.
    #[tracing::instrument(skip(self, mesh, graph), fields(vertices = mesh.vertex_count()))]
    pub fn segment(
        &self,
        mesh: &SurfaceMesh,
        graph: &VertexGraph,
        passes: usize,
    ) -> Result<UnionFind, SegmentError> {
        let mut uf = UnionFind::new(mesh.vertex_count());
        let mut bump = Bump::new();

        for pass in 0..passes {
            let report = self.merge_pass(&mut uf, &mesh.normals, graph, &bump)?;
            bump.reset();

            tracing::debug!(
                "Pass {}: {} patches -> {} patches ({} merges)",
                pass,
                report.patches_before,
                report.patches_after,
                report.merges
            );

            if report.merges == 0 {
                break;
            }
        }

        tracing::info!("Mesh segmented into {} patches", uf.set_count());
        Ok(uf)
    }

    /// Same as [`PatchBuilder::segment`], building vertex graph from mesh
    /// triangles.
    pub fn segment_mesh(
        &self,
        mesh: &SurfaceMesh,
        passes: usize,
    ) -> Result<(VertexGraph, UnionFind), SegmentError> {
        let graph = mesh.vertex_graph()?;
        let uf = self.segment(mesh, &graph, passes)?;
        Ok((graph, uf))
    }
}

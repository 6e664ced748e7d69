use {smallvec::SmallVec, std::convert::TryFrom as _, ultraviolet::Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Triangle {triangle} refers to vertex {index}, mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("Index count {0} is not a multiple of three")]
    IncompleteTriangle(usize),

    #[error("Mesh has {positions} positions but {normals} normals")]
    NormalCount { positions: usize, normals: usize },

    #[error("Mesh with {0} vertices cannot be indexed with 32 bits")]
    TooManyVertices(usize),
}

/// Triangle mesh as seen by segmentation.
#[derive(Clone, Debug, Default)]
pub struct SurfaceMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Validates that every vertex has a normal and triangles are well
    /// formed.
    pub fn new(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        indices: Vec<u32>,
    ) -> Result<Self, GraphError> {
        if positions.len() != normals.len() {
            return Err(GraphError::NormalCount {
                positions: positions.len(),
                normals: normals.len(),
            });
        }

        let mesh = SurfaceMesh {
            positions,
            normals,
            indices,
        };
        mesh.check_triangles()?;
        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Vertex adjacency built from this mesh triangles.
    pub fn vertex_graph(&self) -> Result<VertexGraph, GraphError> {
        VertexGraph::from_triangles(self.vertex_count(), &self.indices)
    }

    fn check_triangles(&self) -> Result<(), GraphError> {
        if self.indices.len() % 3 != 0 {
            return Err(GraphError::IncompleteTriangle(self.indices.len()));
        }

        let vertex_count = self.vertex_count();
        for (triangle, t) in self.triangles().enumerate() {
            if let Some(&index) =
                t.iter().find(|&&i| i as usize >= vertex_count)
            {
                return Err(GraphError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

/// Vertex adjacency of a triangle mesh.
///
/// Neighbour lists are sorted, free of duplicates and self-loops, and
/// symmetric: `j` is listed for `i` iff `i` is listed for `j`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VertexGraph {
    neighbors: Vec<SmallVec<[u32; 8]>>,
}

impl VertexGraph {
    pub fn from_triangles(
        vertex_count: usize,
        indices: &[u32],
    ) -> Result<Self, GraphError> {
        if u32::try_from(vertex_count).is_err() {
            return Err(GraphError::TooManyVertices(vertex_count));
        }

        if indices.len() % 3 != 0 {
            return Err(GraphError::IncompleteTriangle(indices.len()));
        }

        let mut neighbors = vec![SmallVec::<[u32; 8]>::new(); vertex_count];

        for (triangle, t) in indices.chunks_exact(3).enumerate() {
            for &index in t {
                if index as usize >= vertex_count {
                    return Err(GraphError::IndexOutOfRange {
                        triangle,
                        index,
                        vertex_count,
                    });
                }
            }

            for &(a, b) in &[(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
                if a != b {
                    neighbors[a as usize].push(b);
                    neighbors[b as usize].push(a);
                }
            }
        }

        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        Ok(VertexGraph { neighbors })
    }

    /// Builds graph from explicit undirected edges.
    pub fn from_edges(
        vertex_count: usize,
        edges: impl IntoIterator<Item = (u32, u32)>,
    ) -> Result<Self, GraphError> {
        let indices: Vec<u32> = edges
            .into_iter()
            .flat_map(|(a, b)| std::iter::once(a).chain(Some(b)).chain(Some(b)))
            .collect();
        VertexGraph::from_triangles(vertex_count, &indices)
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn neighbors(&self, vertex: usize) -> &[u32] {
        &self.neighbors[vertex]
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(|n| n.len()).sum::<usize>() / 2
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors.iter().enumerate().flat_map(|(i, list)| {
            list.iter()
                .map(move |&j| (i, j as usize))
                .filter(|&(i, j)| i < j)
        })
    }

    pub fn is_symmetric(&self) -> bool {
        self.neighbors.iter().enumerate().all(|(i, list)| {
            list.iter().all(|&j| {
                self.neighbors[j as usize]
                    .binary_search(&(i as u32))
                    .is_ok()
            })
        })
    }
}

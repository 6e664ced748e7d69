//! Procedural meshes standing in for body scans.

use {
    anthropometry_patches::{GraphError, SurfaceMesh},
    genmesh::{
        generators::{
            Cube, Cylinder, IndexedPolygon, Plane, SharedVertex, SphereUv,
        },
        EmitTriangles, Triangle, Vertex,
    },
    std::convert::TryFrom as _,
    ultraviolet::Vec3,
};

/// Builds mesh from shared vertices and indexed polygons of a generator.
pub fn from_generator<G, P>(generator: &G) -> Result<SurfaceMesh, GraphError>
where
    G: SharedVertex<Vertex> + IndexedPolygon<P>,
    P: EmitTriangles<Vertex = usize>,
{
    let (positions, normals): (Vec<_>, Vec<_>) = generator
        .shared_vertex_iter()
        .map(|v| {
            (
                Vec3::new(v.pos.x, v.pos.y, v.pos.z),
                Vec3::new(v.normal.x, v.normal.y, v.normal.z),
            )
        })
        .unzip();

    if u32::try_from(positions.len()).is_err() {
        return Err(GraphError::TooManyVertices(positions.len()));
    }

    let mut indices = Vec::new();
    for polygon in generator.indexed_polygon_iter() {
        polygon.emit_triangles(|Triangle { x, y, z }| {
            indices.extend_from_slice(&[x as u32, y as u32, z as u32]);
        });
    }

    SurfaceMesh::new(positions, normals, indices)
}

/// Kind of procedural mesh to segment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
pub enum MeshSource {
    Cube,
    Plane { x: usize, y: usize },
    Sphere { u: usize, v: usize },
    Cylinder { u: usize, h: usize },
}

impl Default for MeshSource {
    fn default() -> Self {
        MeshSource::Sphere { u: 32, v: 16 }
    }
}

impl MeshSource {
    pub fn build(&self) -> Result<SurfaceMesh, GraphError> {
        match *self {
            MeshSource::Cube => from_generator(&Cube::new()),
            MeshSource::Plane { x, y } => {
                from_generator(&Plane::subdivide(x.max(1), y.max(1)))
            }
            MeshSource::Sphere { u, v } => {
                from_generator(&SphereUv::new(u.max(3), v.max(2)))
            }
            MeshSource::Cylinder { u, h } => {
                from_generator(&Cylinder::subdivide(u.max(3), h.max(1)))
            }
        }
    }
}

//! Indexed triangle meshes.
//!
//! A [`Mesh`] keeps positions, texture coordinates and normals in separate,
//! deduplicated pools. Every [`Triangle`] corner references one entry of each
//! pool through a [`VertexRef`]. Indices are validated once when the mesh is
//! built, so the render loop can index the pools without further checks.

use std::fmt;
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Errors produced while building or loading a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to read mesh file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: tobj::LoadError,
    },
    #[error("malformed mesh description: {0}")]
    Parse(String),
    #[error("triangle {triangle} references {attribute} {index}, but only {len} are defined")]
    Index {
        triangle: usize,
        attribute: Attribute,
        index: usize,
        len: usize,
    },
    #[error("face references an undefined attribute: {0}")]
    IndexOutOfBounds(#[source] tobj::LoadError),
}

impl MeshError {
    /// True for both flavours of out-of-range attribute references.
    pub fn is_index_error(&self) -> bool {
        matches!(self, MeshError::Index { .. } | MeshError::IndexOutOfBounds(_))
    }
}

impl From<tobj::LoadError> for MeshError {
    fn from(err: tobj::LoadError) -> Self {
        match err {
            tobj::LoadError::FaceVertexOutOfBounds
            | tobj::LoadError::FaceTexCoordOutOfBounds
            | tobj::LoadError::FaceNormalOutOfBounds => MeshError::IndexOutOfBounds(err),
            other => MeshError::Parse(other.to_string()),
        }
    }
}

/// The attribute pool an index points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Position => write!(f, "position"),
            Attribute::TexCoord => write!(f, "texture coordinate"),
            Attribute::Normal => write!(f, "normal"),
        }
    }
}

/// One triangle corner: 0-based indices into the three attribute pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexRef {
    pub position: usize,
    pub uv: usize,
    pub normal: usize,
}

impl VertexRef {
    pub const fn new(position: usize, uv: usize, normal: usize) -> Self {
        Self {
            position,
            uv,
            normal,
        }
    }
}

/// Three corners, clockwise when seen from the front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle(pub [VertexRef; 3]);

impl Triangle {
    /// Position indices of the three corners, in winding order.
    #[inline]
    pub fn positions(&self) -> [usize; 3] {
        [self.0[0].position, self.0[1].position, self.0[2].position]
    }

    /// Texture coordinate indices of the three corners, in winding order.
    #[inline]
    pub fn uvs(&self) -> [usize; 3] {
        [self.0[0].uv, self.0[1].uv, self.0[2].uv]
    }
}

/// Fan-triangulates a convex polygon: `(0, i, i + 1)` for every consecutive pair.
///
/// A quad `[a, b, c, d]` becomes `(a, b, c)` and `(a, c, d)`, which share
/// the diagonal between the first and third corner.
pub fn triangulate_fan(face: &[VertexRef]) -> impl Iterator<Item = Triangle> + '_ {
    (1..face.len().saturating_sub(1)).map(move |i| Triangle([face[0], face[i], face[i + 1]]))
}

/// An immutable, validated triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    normals: Vec<Vec3>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Builds a mesh, rejecting any triangle that indexes past the end of a pool.
    pub fn new(
        positions: Vec<Vec3>,
        uvs: Vec<Vec2>,
        normals: Vec<Vec3>,
        triangles: Vec<Triangle>,
    ) -> Result<Self, MeshError> {
        for (i, triangle) in triangles.iter().enumerate() {
            for corner in &triangle.0 {
                check_index(i, Attribute::Position, corner.position, positions.len())?;
                check_index(i, Attribute::TexCoord, corner.uv, uvs.len())?;
                check_index(i, Attribute::Normal, corner.normal, normals.len())?;
            }
        }

        Ok(Self {
            positions,
            uvs,
            normals,
            triangles,
        })
    }

    /// Builds a mesh from polygon faces of any arity, fan-triangulating each one.
    pub fn from_polygons(
        positions: Vec<Vec3>,
        uvs: Vec<Vec2>,
        normals: Vec<Vec3>,
        faces: &[Vec<VertexRef>],
    ) -> Result<Self, MeshError> {
        let mut triangles = Vec::with_capacity(faces.len() * 2);
        for (i, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MeshError::Parse(format!(
                    "face {i} has {} vertex references, at least 3 are required",
                    face.len()
                )));
            }
            triangles.extend(triangulate_fan(face));
        }
        Self::new(positions, uvs, normals, triangles)
    }

    /// Loads a mesh from an OBJ file on disk.
    ///
    /// All objects and groups in the file are merged into a single mesh.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let (models, _materials) =
            tobj::load_obj(path, &load_options()).map_err(|err| match err {
                tobj::LoadError::OpenFileFailed | tobj::LoadError::ReadError => MeshError::Read {
                    path: path.display().to_string(),
                    source: err,
                },
                other => MeshError::from(other),
            })?;

        let mesh = Self::from_tobj(&models)?;
        info!(
            "loaded mesh '{}': {} positions, {} uvs, {} normals, {} triangles",
            path.display(),
            mesh.positions.len(),
            mesh.uvs.len(),
            mesh.normals.len(),
            mesh.triangles.len()
        );
        Ok(mesh)
    }

    /// Parses a mesh from OBJ text held in memory. Material libraries are ignored.
    pub fn parse_obj(source: &str) -> Result<Self, MeshError> {
        let mut reader = source.as_bytes();
        let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Self::from_tobj(&models)
    }

    /// Merges every tobj model into one set of pools, offsetting indices as it goes.
    fn from_tobj(models: &[tobj::Model]) -> Result<Self, MeshError> {
        let mut positions = Vec::new();
        let mut uvs = Vec::new();
        let mut normals = Vec::new();
        let mut faces = Vec::new();

        for model in models {
            let m = &model.mesh;
            let (base_position, base_uv, base_normal) = (positions.len(), uvs.len(), normals.len());

            positions.extend(
                m.positions
                    .chunks_exact(3)
                    .map(|c| Vec3::new(c[0], c[1], c[2])),
            );
            uvs.extend(m.texcoords.chunks_exact(2).map(|c| Vec2::new(c[0], c[1])));
            normals.extend(m.normals.chunks_exact(3).map(|c| Vec3::new(c[0], c[1], c[2])));

            if m.texcoord_indices.len() != m.indices.len() {
                return Err(MeshError::Parse(format!(
                    "object '{}': every face vertex must reference a texture coordinate",
                    model.name
                )));
            }
            if m.normal_indices.len() != m.indices.len() {
                return Err(MeshError::Parse(format!(
                    "object '{}': every face vertex must reference a normal",
                    model.name
                )));
            }

            // tobj leaves the arity list empty when every face is a triangle.
            let arities: Vec<usize> = if m.face_arities.is_empty() {
                vec![3; m.indices.len() / 3]
            } else {
                m.face_arities.iter().map(|&a| a as usize).collect()
            };

            let mut start = 0;
            for arity in arities {
                let end = start + arity;
                if end > m.indices.len() {
                    return Err(MeshError::Parse(format!(
                        "object '{}': face list is shorter than its arities",
                        model.name
                    )));
                }
                faces.push(
                    (start..end)
                        .map(|i| {
                            VertexRef::new(
                                base_position + m.indices[i] as usize,
                                base_uv + m.texcoord_indices[i] as usize,
                                base_normal + m.normal_indices[i] as usize,
                            )
                        })
                        .collect::<Vec<_>>(),
                );
                start = end;
            }
            debug!("object '{}': {} faces", model.name, faces.len());
        }

        Self::from_polygons(positions, uvs, normals, &faces)
    }

    /// A 2x2x2 cube centred on the origin, one quad per side with the full
    /// texture mapped onto every face.
    pub fn cube() -> Self {
        let positions = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(-1.0, -1.0, 1.0),
        ];
        // Corner order of every quad: bottom-left, top-left, top-right, bottom-right.
        let uvs = vec![
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
        ];
        let normals = vec![
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        ];
        const SIDES: [[usize; 4]; 6] = [
            [0, 1, 2, 3], // front
            [3, 2, 4, 5], // right
            [5, 4, 6, 7], // back
            [7, 6, 1, 0], // left
            [1, 6, 4, 2], // top
            [5, 7, 0, 3], // bottom
        ];

        let faces: Vec<Vec<VertexRef>> = SIDES
            .iter()
            .enumerate()
            .map(|(normal, side)| {
                side.iter()
                    .enumerate()
                    .map(|(corner, &position)| VertexRef::new(position, corner, normal))
                    .collect()
            })
            .collect();

        // Static data, indices are in range by construction.
        match Self::from_polygons(positions, uvs, normals, &faces) {
            Ok(mesh) => mesh,
            Err(err) => unreachable!("built-in cube is invalid: {err}"),
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}

fn check_index(
    triangle: usize,
    attribute: Attribute,
    index: usize,
    len: usize,
) -> Result<(), MeshError> {
    if index < len {
        Ok(())
    } else {
        Err(MeshError::Index {
            triangle,
            attribute,
            index,
            len,
        })
    }
}

/// Separate index pools, no triangulation on the tobj side.
fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

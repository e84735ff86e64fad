//! Triangle meshes.
//!
//! Faces index into the mesh's vertex and texture-coordinate arrays with
//! 0-based indices. The 1-based convention of OBJ files is converted at the
//! loading boundary and never seen by the rest of the pipeline.

use std::path::Path;

use crate::error::LoadError;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// A triangle of a mesh: three vertex indices, three texture-coordinate
/// indices and a flat base color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub t1: usize,
    pub t2: usize,
    pub t3: usize,
    pub color: u32,
}

impl Face {
    pub const fn new(vertices: [usize; 3], texcoords: [usize; 3], color: u32) -> Self {
        Self {
            a: vertices[0],
            b: vertices[1],
            c: vertices[2],
            t1: texcoords[0],
            t2: texcoords[1],
            t3: texcoords[2],
            color,
        }
    }

    /// Builds a face from 1-based OBJ-style indices.
    ///
    /// # Panics
    /// Panics (at compile time in const contexts) if any index is 0.
    pub const fn from_one_based(vertices: [usize; 3], texcoords: [usize; 3], color: u32) -> Self {
        Self::new(
            [vertices[0] - 1, vertices[1] - 1, vertices[2] - 1],
            [texcoords[0] - 1, texcoords[1] - 1, texcoords[2] - 1],
            color,
        )
    }

    pub const fn vertex_indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }

    pub const fn texcoord_indices(&self) -> [usize; 3] {
        [self.t1, self.t2, self.t3]
    }
}

pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

/// Corners of one cube face, in the order every face's quad is wound.
pub const CUBE_TEXCOORDS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
];

const FIRST_HALF: [usize; 3] = [1, 2, 3];
const SECOND_HALF: [usize; 3] = [1, 3, 4];

pub const CUBE_FACES: [Face; 12] = [
    // Front
    Face::from_one_based([1, 2, 3], FIRST_HALF, 0xFFFF0000),
    Face::from_one_based([1, 3, 4], SECOND_HALF, 0xFFFF0000),
    // Back
    Face::from_one_based([6, 5, 7], FIRST_HALF, 0xFFFF00FF),
    Face::from_one_based([6, 7, 8], SECOND_HALF, 0xFFFF00FF),
    // Left
    Face::from_one_based([8, 7, 2], FIRST_HALF, 0xFF00FF00),
    Face::from_one_based([8, 2, 1], SECOND_HALF, 0xFF00FF00),
    // Right
    Face::from_one_based([4, 3, 5], FIRST_HALF, 0xFFFFFF00),
    Face::from_one_based([4, 5, 6], SECOND_HALF, 0xFFFFFF00),
    // Top
    Face::from_one_based([2, 7, 5], FIRST_HALF, 0xFF0000FF),
    Face::from_one_based([2, 5, 3], SECOND_HALF, 0xFF0000FF),
    // Bottom
    Face::from_one_based([6, 8, 1], FIRST_HALF, 0xFF00FFFF),
    Face::from_one_based([6, 1, 4], SECOND_HALF, 0xFF00FFFF),
];

/// A triangle mesh. Element counts are fixed once constructed; only vertex
/// positions change, when the mesh is rotated.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    texcoords: Vec<Vec2>,
}

impl Mesh {
    /// Creates a mesh, checking that every face index is in range.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>, texcoords: Vec<Vec2>) -> Result<Self, LoadError> {
        for (i, face) in faces.iter().enumerate() {
            for index in face.vertex_indices() {
                if index >= vertices.len() {
                    return Err(LoadError::IndexOutOfRange {
                        face: i,
                        index,
                        len: vertices.len(),
                        what: "vertex",
                    });
                }
            }
            for index in face.texcoord_indices() {
                if index >= texcoords.len() {
                    return Err(LoadError::IndexOutOfRange {
                        face: i,
                        index,
                        len: texcoords.len(),
                        what: "texture coordinate",
                    });
                }
            }
        }

        Ok(Self {
            vertices,
            faces,
            texcoords,
        })
    }

    /// The unit cube used as the reference fixture: 8 vertices, 12 faces,
    /// each side two faces sharing a solid color.
    pub fn cube() -> Self {
        Self {
            vertices: CUBE_VERTICES.to_vec(),
            faces: CUBE_FACES.to_vec(),
            texcoords: CUBE_TEXCOORDS.to_vec(),
        }
    }

    /// Loads every object in an OBJ file into a single mesh.
    ///
    /// Faces are triangulated; normals are ignored. Faces without texture
    /// coordinates all map to `(0, 0)`. Every face gets `color`.
    pub fn from_obj<P: AsRef<Path>>(path: P, color: u32) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: false,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &options)?;

        let mut vertices = Vec::new();
        let mut texcoords = Vec::new();
        let mut faces = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            let vertex_base = vertices.len();
            let texcoord_base = texcoords.len();

            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            texcoords.extend(
                mesh.texcoords
                    .chunks_exact(2)
                    .map(|t| Vec2::new(t[0], t[1])),
            );

            // each untextured object gets its own (0, 0) after its texcoords
            let has_texcoords = mesh.texcoord_indices.len() == mesh.indices.len();
            let untextured = texcoords.len();
            if !has_texcoords {
                texcoords.push(Vec2::ZERO);
            }

            for (i, tri) in mesh.indices.chunks_exact(3).enumerate() {
                let tex = if has_texcoords {
                    let t = &mesh.texcoord_indices[i * 3..i * 3 + 3];
                    [
                        texcoord_base + t[0] as usize,
                        texcoord_base + t[1] as usize,
                        texcoord_base + t[2] as usize,
                    ]
                } else {
                    [untextured; 3]
                };
                faces.push(Face::new(
                    [
                        vertex_base + tri[0] as usize,
                        vertex_base + tri[1] as usize,
                        vertex_base + tri[2] as usize,
                    ],
                    tex,
                    color,
                ));
            }
        }

        let mesh = Self::new(vertices, faces, texcoords)?;
        log::info!(
            "loaded {}: {} vertices, {} faces, {} texture coordinates",
            path.display(),
            mesh.vertices.len(),
            mesh.faces.len(),
            mesh.texcoords.len()
        );
        Ok(mesh)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn texcoords(&self) -> &[Vec2] {
        &self.texcoords
    }

    /// Sets every face to the same base color.
    pub fn set_color(&mut self, color: u32) {
        for face in &mut self.faces {
            face.color = color;
        }
    }

    /// Rotates every vertex in place, about X then Y then Z.
    pub fn rotate(&mut self, angles: Vec3) {
        for vertex in &mut self.vertices {
            *vertex = vertex.rotate_xyz(angles);
        }
    }

    pub fn face_vertices(&self, face: &Face) -> [Vec3; 3] {
        face.vertex_indices().map(|i| self.vertices[i])
    }

    pub fn face_texcoords(&self, face: &Face) -> [Vec2; 3] {
        face.texcoord_indices().map(|i| self.texcoords[i])
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::cube()
    }
}

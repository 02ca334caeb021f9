//! Mesh data structures shared by the builder and the simulation

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Vertex layout handed to the renderer (32 bytes, tightly packed)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            normal: Vec3::Y,
            uv,
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// A mesh with vertex and index data
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub name: String,
}

impl Mesh {
    pub fn new(name: &str) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            name: name.to_string(),
        }
    }

    /// Calculate vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Calculate index count
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Calculate triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get vertex data as bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Get index data as bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Bounding box of all vertex positions, `None` for an empty mesh
    pub fn bounds(&self) -> Option<Aabb> {
        bounds_of(&self.vertices)
    }

    /// Append another mesh, rebasing its indices onto this one
    pub fn append(&mut self, other: &Mesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Recompute smooth vertex normals from the current positions
    pub fn recompute_normals(&mut self) {
        recompute_normals(&mut self.vertices, &self.indices);
    }
}

/// Bounding box of a vertex slice
pub fn bounds_of(vertices: &[Vertex]) -> Option<Aabb> {
    let first = vertices.first()?.position;
    let (min, max) = vertices
        .iter()
        .fold((first, first), |(min, max), v| (min.min(v.position), max.max(v.position)));
    Some(Aabb { min, max })
}

/// Area-weighted smooth normals.
///
/// Triangles referencing out-of-range vertices are skipped. Vertices with no
/// usable adjacent area keep a `+Y` normal.
pub fn recompute_normals(vertices: &mut [Vertex], indices: &[u32]) {
    let mut accum = vec![Vec3::ZERO; vertices.len()];

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if a >= vertices.len() || b >= vertices.len() || c >= vertices.len() {
            continue;
        }

        let pa = vertices[a].position;
        let pb = vertices[b].position;
        let pc = vertices[c].position;
        // Unnormalized cross product weights by triangle area
        let face = (pb - pa).cross(pc - pa);

        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }

    for (vertex, normal) in vertices.iter_mut().zip(accum) {
        let len = normal.length();
        vertex.normal = if len > f32::EPSILON { normal / len } else { Vec3::Y };
    }
}

/// Indices for a `rows x cols` grid of vertices starting at `base`.
///
/// Rows advance along +Y, columns advance with the angle `(cos, sin)` in the
/// XZ plane. With that layout tube faces point outward.
pub fn grid_indices(base: u32, rows: u32, cols: u32) -> Vec<u32> {
    let quads = rows.saturating_sub(1) * cols.saturating_sub(1);
    let mut indices = Vec::with_capacity(quads as usize * 6);

    for row in 0..rows.saturating_sub(1) {
        for col in 0..cols.saturating_sub(1) {
            let current = base + row * cols + col;
            let next = current + cols;

            indices.extend_from_slice(&[
                current,
                next,
                current + 1,
                current + 1,
                next,
                next + 1,
            ]);
        }
    }

    indices
}

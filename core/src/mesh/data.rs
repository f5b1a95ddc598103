//! CPU-side mesh data structures.
//!
//! This module provides:
//! - [`IndexFormat`] - Index data format (u8, u16 or u32)
//! - [`IndexData`] - Owned index buffer in one of those formats
//! - [`TriangleMesh`] - CPU-side triangle list with positions, normals and indices

use super::error::MeshError;
use super::normals::{generate_flat_normals, generate_smooth_normals};
use crate::math::Vec3;

/// Index format for indexed drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 8-bit unsigned integers (max 255 vertices).
    Uint8,
    /// 16-bit unsigned integers (max 65535 vertices).
    #[default]
    Uint16,
    /// 32-bit unsigned integers (max ~4 billion vertices).
    Uint32,
}

/// Owned index data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexData {
    Uint8(Vec<u8>),
    Uint16(Vec<u16>),
    Uint32(Vec<u32>),
}

impl IndexData {
    /// Get the index format.
    pub fn format(&self) -> IndexFormat {
        match self {
            Self::Uint8(_) => IndexFormat::Uint8,
            Self::Uint16(_) => IndexFormat::Uint16,
            Self::Uint32(_) => IndexFormat::Uint32,
        }
    }

    /// Number of indices.
    pub fn len(&self) -> usize {
        match self {
            Self::Uint8(data) => data.len(),
            Self::Uint16(data) => data.len(),
            Self::Uint32(data) => data.len(),
        }
    }

    /// Check if there are no indices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widen all indices to u32.
    pub fn to_u32(&self) -> Vec<u32> {
        match self {
            Self::Uint8(data) => data.iter().map(|&i| i as u32).collect(),
            Self::Uint16(data) => data.iter().map(|&i| i as u32).collect(),
            Self::Uint32(data) => data.clone(),
        }
    }
}

/// A CPU-side triangle list mesh.
///
/// Positions are mandatory; normals and indices are optional. Normals, when
/// present, have one entry per position.
///
/// # Example
///
/// ```ignore
/// let mesh = TriangleMesh::new(positions)
///     .with_indices_u16(&indices)
///     .with_label("terrain_tile")
///     .with_smooth_normals()?;
/// ```
#[derive(Clone, Default)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    normals: Option<Vec<Vec3>>,
    indices: Option<IndexData>,
    label: Option<String>,
}

impl TriangleMesh {
    /// Create a non-indexed mesh from positions.
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            ..Default::default()
        }
    }

    /// Set precomputed normals.
    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Set u8 index data.
    pub fn with_indices_u8(mut self, indices: &[u8]) -> Self {
        self.indices = Some(IndexData::Uint8(indices.to_vec()));
        self
    }

    /// Set u16 index data.
    pub fn with_indices_u16(mut self, indices: &[u16]) -> Self {
        self.indices = Some(IndexData::Uint16(indices.to_vec()));
        self
    }

    /// Set u32 index data.
    pub fn with_indices_u32(mut self, indices: &[u32]) -> Self {
        self.indices = Some(IndexData::Uint32(indices.to_vec()));
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Replace the normals with flat normals.
    ///
    /// Flat normals need one vertex per triangle corner, so this fails on an
    /// indexed mesh.
    pub fn with_flat_normals(mut self) -> Result<Self, MeshError> {
        if self.is_indexed() {
            return Err(MeshError::invalid_argument(
                "TriangleMesh::with_flat_normals",
                "mesh is indexed, flat normals need one vertex per triangle corner",
            ));
        }
        self.normals = Some(generate_flat_normals(&self.positions)?);
        Ok(self)
    }

    /// Replace the normals with smooth normals.
    ///
    /// A non-indexed mesh shares no vertices between triangles, so its
    /// smooth normals are its flat normals.
    pub fn with_smooth_normals(mut self) -> Result<Self, MeshError> {
        let normals = match &self.indices {
            Some(IndexData::Uint8(indices)) => {
                generate_smooth_normals(indices.as_slice(), &self.positions)?
            }
            Some(IndexData::Uint16(indices)) => {
                generate_smooth_normals(indices.as_slice(), &self.positions)?
            }
            Some(IndexData::Uint32(indices)) => {
                generate_smooth_normals(indices.as_slice(), &self.positions)?
            }
            None => generate_flat_normals(&self.positions)?,
        };
        log::debug!(
            "generated smooth normals for mesh {:?} ({} vertices)",
            self.label,
            normals.len()
        );
        self.normals = Some(normals);
        Ok(self)
    }

    /// Get the positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Get the normals, if present.
    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    /// Get the index data, if present.
    pub fn indices(&self) -> Option<&IndexData> {
        self.indices.as_ref()
    }

    /// Get the index format, if indexed.
    pub fn index_format(&self) -> Option<IndexFormat> {
        self.indices.as_ref().map(IndexData::format)
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of indices (0 for non-indexed meshes).
    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, IndexData::len)
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        if self.is_indexed() {
            self.index_count() / 3
        } else {
            self.vertex_count() / 3
        }
    }

    /// Check if this mesh uses indexed drawing.
    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl std::fmt::Debug for TriangleMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriangleMesh")
            .field("label", &self.label)
            .field("vertex_count", &self.positions.len())
            .field("has_normals", &self.normals.is_some())
            .field("index_format", &self.index_format())
            .field("index_count", &self.index_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_positions() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_index_data_widening() {
        let data = IndexData::Uint16(vec![0, 1, 65535]);
        assert_eq!(data.format(), IndexFormat::Uint16);
        assert_eq!(data.len(), 3);
        assert_eq!(data.to_u32(), vec![0, 1, 65535]);
    }

    #[test]
    fn test_triangle_mesh_basic() {
        let mesh = TriangleMesh::new(quad_positions()[..3].to_vec()).with_label("test");

        assert_eq!(mesh.vertex_count(), 3);
        assert!(!mesh.is_indexed());
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.label(), Some("test"));
        assert!(mesh.normals().is_none());
    }

    #[test]
    fn test_triangle_mesh_indexed() {
        let indices: [u32; 6] = [0, 1, 2, 2, 3, 0];
        let mesh = TriangleMesh::new(quad_positions()).with_indices_u32(&indices);

        assert_eq!(mesh.vertex_count(), 4);
        assert!(mesh.is_indexed());
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.index_format(), Some(IndexFormat::Uint32));
    }

    #[test]
    fn test_with_smooth_normals_indexed() {
        let mesh = TriangleMesh::new(quad_positions())
            .with_indices_u8(&[0, 1, 2, 2, 3, 0])
            .with_smooth_normals()
            .unwrap();

        let normals = mesh.normals().unwrap();
        assert_eq!(normals.len(), 4);
        assert!(normals.iter().all(|n| *n == Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_with_flat_normals() {
        let mesh = TriangleMesh::new(quad_positions()[..3].to_vec())
            .with_flat_normals()
            .unwrap();

        assert!(!mesh.is_indexed());
        assert_eq!(mesh.normals().unwrap(), &[Vec3::new(0.0, 0.0, 1.0); 3]);
        assert_eq!(mesh.positions()[1], Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_with_flat_normals_rejects_indexed() {
        let err = TriangleMesh::new(quad_positions())
            .with_indices_u16(&[0, 1, 2, 2, 3, 0])
            .with_flat_normals()
            .unwrap_err();
        assert!(err.to_string().starts_with("TriangleMesh::with_flat_normals(): "));
    }

    #[test]
    fn test_with_flat_normals_propagates_count_error() {
        let err = TriangleMesh::new(quad_positions())
            .with_flat_normals()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "generate_flat_normals_into(): position count not divisible by 3"
        );
    }
}

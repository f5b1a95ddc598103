//! Per-vertex normal generation for triangle meshes.
//!
//! Two flavors are provided:
//!
//! - **Flat** normals: every triangle corner gets the normalized face normal
//!   of its own triangle, so neighbouring triangles never share a normal.
//!   Positions are read as a non-indexed triangle list.
//! - **Smooth** normals: every vertex gets the normalized sum of the
//!   unnormalized face normals of all triangles referencing it. The cross
//!   product magnitude is proportional to triangle area, so larger triangles
//!   weigh more.
//!
//! Every `_into` variant validates sizes before touching the output; on error
//! the output buffer is left as it was.

use std::collections::HashMap;

use super::error::MeshError;
use crate::math::{Vec3, triangle_normal};
use crate::profiling::profile_scope;

/// An unsigned index type usable in an index buffer.
pub trait MeshIndex: Copy {
    /// Convert the index to a slice position.
    fn to_usize(self) -> usize;
}

macro_rules! impl_mesh_index {
    ($($ty:ty),*) => {
        $(
            impl MeshIndex for $ty {
                #[inline]
                fn to_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_mesh_index!(u8, u16, u32);

/// Generate flat normals for a non-indexed triangle list.
///
/// Returns one normal per position. See [`generate_flat_normals_into`].
pub fn generate_flat_normals(positions: &[Vec3]) -> Result<Vec<Vec3>, MeshError> {
    let mut normals = vec![Vec3::zeros(); positions.len()];
    generate_flat_normals_into(positions, &mut normals)?;
    Ok(normals)
}

/// Generate flat normals into a caller-provided buffer.
///
/// `positions.len()` must be divisible by 3 and `normals.len()` must equal
/// `positions.len()`.
pub fn generate_flat_normals_into(
    positions: &[Vec3],
    normals: &mut [Vec3],
) -> Result<(), MeshError> {
    const OPERATION: &str = "generate_flat_normals_into";
    profile_scope!("generate_flat_normals");

    if positions.len() % 3 != 0 {
        return Err(MeshError::invalid_argument(
            OPERATION,
            "position count not divisible by 3",
        ));
    }
    if normals.len() != positions.len() {
        return Err(MeshError::bad_output_size(
            OPERATION,
            positions.len(),
            normals.len(),
        ));
    }

    for (triangle, corners) in positions.chunks_exact(3).zip(normals.chunks_exact_mut(3)) {
        let normal = triangle_normal(&triangle[0], &triangle[1], &triangle[2]).normalize();
        corners.fill(normal);
    }

    Ok(())
}

/// Generate smooth normals for an indexed triangle mesh.
///
/// Returns one normal per position. See [`generate_smooth_normals_into`].
pub fn generate_smooth_normals<I: MeshIndex>(
    indices: &[I],
    positions: &[Vec3],
) -> Result<Vec<Vec3>, MeshError> {
    let mut normals = vec![Vec3::zeros(); positions.len()];
    generate_smooth_normals_into(indices, positions, &mut normals)?;
    Ok(normals)
}

/// Generate smooth normals into a caller-provided buffer.
///
/// `indices.len()` must be divisible by 3 and `normals.len()` must equal
/// `positions.len()`. Every index must be smaller than `positions.len()`;
/// an out-of-range index panics.
///
/// Triangles are accumulated in index order. Vertices no triangle references
/// end up with the normalized zero vector, which is NaN in every component.
pub fn generate_smooth_normals_into<I: MeshIndex>(
    indices: &[I],
    positions: &[Vec3],
    normals: &mut [Vec3],
) -> Result<(), MeshError> {
    const OPERATION: &str = "generate_smooth_normals_into";
    profile_scope!("generate_smooth_normals");

    if indices.len() % 3 != 0 {
        return Err(MeshError::invalid_argument(
            OPERATION,
            "index count not divisible by 3",
        ));
    }
    if normals.len() != positions.len() {
        return Err(MeshError::bad_output_size(
            OPERATION,
            positions.len(),
            normals.len(),
        ));
    }

    normals.fill(Vec3::zeros());

    for triangle in indices.chunks_exact(3) {
        let i0 = triangle[0].to_usize();
        let i1 = triangle[1].to_usize();
        let i2 = triangle[2].to_usize();

        let area_weighted = triangle_normal(&positions[i0], &positions[i1], &positions[i2]);
        normals[i0] += area_weighted;
        normals[i1] += area_weighted;
        normals[i2] += area_weighted;
    }

    for normal in normals.iter_mut() {
        *normal = normal.normalize();
    }

    Ok(())
}

/// Generate indexed flat normals.
///
/// Produces one normal per triangle and a normal index for every entry of
/// `indices`, so the three corners of a triangle point at the same normal.
/// Bit-identical normals are stored once, in the order they first appear.
pub fn generate_flat_normals_indexed<I: MeshIndex>(
    indices: &[I],
    positions: &[Vec3],
) -> Result<(Vec<u32>, Vec<Vec3>), MeshError> {
    profile_scope!("generate_flat_normals_indexed");

    if indices.len() % 3 != 0 {
        return Err(MeshError::invalid_argument(
            "generate_flat_normals_indexed",
            "index count not divisible by 3",
        ));
    }

    let mut normal_indices = Vec::with_capacity(indices.len());
    let mut normals = Vec::new();
    let mut seen: HashMap<[u32; 3], u32> = HashMap::new();

    for triangle in indices.chunks_exact(3) {
        let normal = triangle_normal(
            &positions[triangle[0].to_usize()],
            &positions[triangle[1].to_usize()],
            &positions[triangle[2].to_usize()],
        )
        .normalize();

        let key = [normal.x.to_bits(), normal.y.to_bits(), normal.z.to_bits()];
        let index = *seen.entry(key).or_insert_with(|| {
            normals.push(normal);
            (normals.len() - 1) as u32
        });
        normal_indices.extend_from_slice(&[index; 3]);
    }

    log::trace!(
        "generated {} unique flat normals for {} triangles",
        normals.len(),
        indices.len() / 3
    );

    Ok((normal_indices, normals))
}

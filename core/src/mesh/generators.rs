//! Mesh generators for common shapes.
//!
//! Every generator returns a [`TriangleMesh`] carrying its own analytic
//! normals, so generated shapes double as reference data for normal
//! generation.

use std::f32::consts::PI;

use super::data::TriangleMesh;
use crate::math::Vec3;

/// Generate a solid cube with 8 shared corners.
///
/// The cube is centered at the origin and spans `-half_extent..half_extent`
/// on every axis. Faces are wound counter-clockwise when seen from outside
/// and every face is split along the diagonal joining its two corners with
/// `x * y * z > 0`. With that split each corner touches the same number of
/// triangles on each of its three faces, so area-weighted smooth normals
/// point straight away from the center. Reference normals are
/// `position / |position|`. Indices are u8.
pub fn generate_cube_solid(half_extent: f32) -> TriangleMesh {
    let corners = [
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(-1.0, -1.0, -1.0),
    ];

    #[rustfmt::skip]
    let indices: [u8; 36] = [
        0, 1, 2, 0, 2, 3, // +Z
        6, 5, 2, 6, 2, 1, // +X
        2, 5, 4, 2, 4, 3, // +Y
        4, 5, 6, 4, 6, 7, // -Z
        4, 7, 0, 4, 0, 3, // -X
        6, 1, 0, 6, 0, 7, // -Y
    ];

    let positions = corners.iter().map(|c| *c * half_extent).collect();
    let normals = corners.iter().map(|c| c.normalize()).collect();

    TriangleMesh::new(positions)
        .with_normals(normals)
        .with_indices_u8(&indices)
        .with_label("cube")
}

/// Generate a capped cylinder along the Y axis.
///
/// The cylinder spans `-half_length..half_length` on Y. Each cap is a fan
/// around its own center vertex with a ring of vertices facing ±Y; the side
/// has a separate ring at each end with radial normals, so caps and side
/// never share a vertex.
///
/// Side quads alternate their split diagonal, which gives every side vertex
/// the same triangle area on both of its neighbouring quads. This keeps
/// area-weighted smooth normals radial and requires an even segment count:
/// `segments` is raised to at least 4 and rounded up to the next even
/// number. Indices are u32.
///
/// # Arguments
///
/// * `radius` - Cylinder radius
/// * `half_length` - Half the length along the Y axis
/// * `segments` - Number of segments around the axis
pub fn generate_cylinder_solid(radius: f32, half_length: f32, segments: u32) -> TriangleMesh {
    let segments = segments.max(4).next_multiple_of(2);
    let ring: Vec<(f32, f32)> = (0..segments)
        .map(|segment| {
            let angle = segment as f32 * 2.0 * PI / segments as f32;
            (angle.cos(), angle.sin())
        })
        .collect();

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    // Caps: center vertex followed by the ring.
    for (y, ny) in [(-half_length, -1.0), (half_length, 1.0)] {
        let center = positions.len() as u32;
        positions.push(Vec3::new(0.0, y, 0.0));
        normals.push(Vec3::new(0.0, ny, 0.0));
        for &(cos, sin) in &ring {
            positions.push(Vec3::new(cos * radius, y, sin * radius));
            normals.push(Vec3::new(0.0, ny, 0.0));
        }

        for segment in 0..segments {
            let current = center + 1 + segment;
            let next = center + 1 + (segment + 1) % segments;
            if ny < 0.0 {
                indices.extend_from_slice(&[center, current, next]);
            } else {
                indices.extend_from_slice(&[center, next, current]);
            }
        }
    }

    // Side: bottom ring, then top ring.
    let bottom = positions.len() as u32;
    for y in [-half_length, half_length] {
        for &(cos, sin) in &ring {
            positions.push(Vec3::new(cos * radius, y, sin * radius));
            normals.push(Vec3::new(cos, 0.0, sin));
        }
    }
    let top = bottom + segments;

    for segment in 0..segments {
        let b0 = bottom + segment;
        let b1 = bottom + (segment + 1) % segments;
        let t0 = top + segment;
        let t1 = top + (segment + 1) % segments;

        if segment % 2 == 0 {
            indices.extend_from_slice(&[b0, t0, t1, b0, t1, b1]);
        } else {
            indices.extend_from_slice(&[b0, t0, b1, t0, t1, b1]);
        }
    }

    TriangleMesh::new(positions)
        .with_normals(normals)
        .with_indices_u32(&indices)
        .with_label("cylinder")
}

/// Generate a UV sphere mesh.
///
/// The seam column is duplicated and both poles are rows of coincident
/// vertices, matching a textured sphere layout. Reference normals are the
/// unit direction of each vertex. Indices are u32.
///
/// # Arguments
///
/// * `radius` - Sphere radius
/// * `segments` - Number of longitudinal segments (around the equator)
/// * `rings` - Number of latitudinal rings (from pole to pole)
pub fn generate_sphere(radius: f32, segments: u32, rings: u32) -> TriangleMesh {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for ring in 0..=rings {
        let theta = ring as f32 * PI / rings as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for segment in 0..=segments {
            let phi = segment as f32 * 2.0 * PI / segments as f32;
            let direction = Vec3::new(sin_theta * phi.cos(), cos_theta, sin_theta * phi.sin());

            positions.push(direction * radius);
            normals.push(direction);
        }
    }

    for ring in 0..rings {
        for segment in 0..segments {
            let current = ring * (segments + 1) + segment;
            let next = current + segments + 1;

            indices.extend_from_slice(&[current, current + 1, next]);
            indices.extend_from_slice(&[current + 1, next + 1, next]);
        }
    }

    TriangleMesh::new(positions)
        .with_normals(normals)
        .with_indices_u32(&indices)
        .with_label("sphere")
}

//! CPU-side mesh types, generators and normal generation.
//!
//! - [`TriangleMesh`] - Positions, optional normals and optional index data
//! - [`normals`] - Flat and smooth per-vertex normal generation
//! - [`generators`] - Common shapes (cube, cylinder, sphere) with reference normals
//! - [`MeshError`] - Size-contract violations reported by mesh routines

mod data;
mod error;
pub mod generators;
pub mod normals;

pub use data::{IndexData, IndexFormat, TriangleMesh};
pub use error::MeshError;
pub use normals::{
    MeshIndex, generate_flat_normals, generate_flat_normals_indexed, generate_flat_normals_into,
    generate_smooth_normals, generate_smooth_normals_into,
};

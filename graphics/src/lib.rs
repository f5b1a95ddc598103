//! # Asterism Graphics
//!
//! Shader preparation for the Asterism engine.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`ShaderBinary`] - Compiled shader modules held as 32-bit words
//! - [`ShaderWorkarounds`] - Driver workarounds applied before module creation
//! - [`shader::spirv`] - SPIR-V scanning and location patching
//!
//! ## Example
//!
//! ```ignore
//! use asterism_graphics::{ShaderBinary, ShaderWorkarounds};
//!
//! let workarounds = ShaderWorkarounds::for_driver(driver_name);
//! let mut shader = ShaderBinary::from_bytes(&spirv_bytes)?;
//! shader.apply_workarounds(&workarounds);
//! ```

pub mod error;
pub mod shader;

// Re-export main types for convenience
pub use error::GraphicsError;
pub use shader::{ShaderBinary, ShaderWorkarounds, patch_conflicting_vertex_fragment_locations};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the graphics subsystem.
pub fn init() {
    log::info!("Asterism Graphics v{} initialized", VERSION);
}

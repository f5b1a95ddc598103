//! # Asterism Engine Core
//!
//! Core crate for Asterism Engine basic utilities: math aliases, profiling
//! instrumentation and CPU-side mesh preparation (primitive generators and
//! normal generation).

pub mod math;
pub mod mesh;
pub mod profiling;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core library version.
pub fn init() {
    log::info!("Asterism Core v{} initialized", VERSION);
}

//! Profiling support via Tracy.
//!
//! Instrumentation uses the [Tracy profiler](https://github.com/wolfpld/tracy)
//! and is enabled through the `profiling` Cargo feature:
//!
//! ```toml
//! [dependencies]
//! asterism-core = { version = "0.1", features = ["profiling"] }
//! ```
//!
//! Mesh preparation and shader patching open a named span per call:
//!
//! ```ignore
//! use asterism_core::profiling::profile_scope;
//!
//! fn generate_normals() {
//!     profile_scope!("generate_normals");
//!     // ...
//! }
//! ```
//!
//! Without the feature the macro expands to nothing.

#[cfg(feature = "profiling")]
pub use tracy_client::{self, span};

/// Create a profiling span for the current scope.
///
/// The span ends when the scope exits.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_scope {
    ($name:expr) => {
        let _profile_span = $crate::profiling::span!($name);
    };
}

/// Create a profiling span (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_scope {
    ($name:expr) => {};
}

pub use profile_scope;

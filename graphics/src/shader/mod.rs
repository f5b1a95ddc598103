//! Shader binaries and driver-specific shader workarounds.
//!
//! # Overview
//!
//! - [`ShaderBinary`] - A compiled shader module held as 32-bit words
//! - [`ShaderWorkarounds`] - Which driver workarounds to apply before module creation
//! - [`spirv`] - SPIR-V scanning and in-place patching
//!
//! # Example
//!
//! ```ignore
//! use asterism_graphics::shader::{ShaderBinary, ShaderWorkarounds};
//!
//! let mut shader = ShaderBinary::from_bytes(&bytes)?.with_label("lit_mesh");
//! shader.apply_workarounds(&ShaderWorkarounds::for_driver(adapter_driver_name));
//! let words = shader.words();
//! ```

pub mod spirv;

pub use self::spirv::{
    HEADER_WORD_COUNT, Instruction, Instructions, MAGIC_NUMBER, is_spirv,
    patch_conflicting_vertex_fragment_locations,
};

use crate::error::GraphicsError;

/// A compiled shader module.
///
/// Words are stored in host byte order. [`ShaderBinary::from_bytes`] accepts
/// SPIR-V in either byte order; [`ShaderBinary::from_words`] takes any word
/// stream as-is, so non-SPIR-V code can pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderBinary {
    words: Vec<u32>,
    label: Option<String>,
}

impl ShaderBinary {
    /// Wrap an existing word stream.
    pub fn from_words(words: Vec<u32>) -> Self {
        Self { words, label: None }
    }

    /// Read a SPIR-V module from raw bytes.
    ///
    /// The byte length must be a multiple of 4 and the words must start
    /// with a SPIR-V header. Modules written in the opposite byte order are
    /// swapped to host order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GraphicsError> {
        if bytes.len() % 4 != 0 {
            return Err(GraphicsError::InvalidParameter(format!(
                "shader byte length {} is not a multiple of 4",
                bytes.len()
            )));
        }

        let mut words: Vec<u32> = bytes
            .chunks_exact(4)
            .map(bytemuck::pod_read_unaligned)
            .collect();

        if words.first() == Some(&MAGIC_NUMBER.swap_bytes()) {
            log::debug!("swapping byte order of {} shader words", words.len());
            for word in &mut words {
                *word = word.swap_bytes();
            }
        }

        if !is_spirv(&words) {
            return Err(GraphicsError::InvalidShaderCode(
                "missing SPIR-V header".to_string(),
            ));
        }

        Ok(Self::from_words(words))
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Module words in host byte order.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Module bytes in host byte order.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.words.as_slice())
    }

    /// Take the words out.
    pub fn into_words(self) -> Vec<u32> {
        self.words
    }

    /// Check whether the module starts with a SPIR-V header.
    pub fn is_spirv(&self) -> bool {
        is_spirv(&self.words)
    }

    /// Apply the enabled workarounds in place.
    ///
    /// Returns `true` if any enabled workaround processed the module. Non
    /// SPIR-V modules are left untouched.
    pub fn apply_workarounds(&mut self, workarounds: &ShaderWorkarounds) -> bool {
        if workarounds.is_empty() {
            return false;
        }

        if !self.is_spirv() {
            log::warn!(
                "Shader {:?} is not SPIR-V, skipping driver workarounds",
                self.label
            );
            return false;
        }

        let mut applied = false;
        if workarounds.conflicting_multi_entry_point_locations {
            let patched = patch_conflicting_vertex_fragment_locations(&mut self.words);
            log::debug!(
                "Shader {:?}: conflicting location patch {}",
                self.label,
                if patched { "applied" } else { "not applicable" }
            );
            applied |= patched;
        }
        applied
    }
}

static_assertions::assert_impl_all!(ShaderBinary: Send, Sync);

/// Driver workarounds applied to shader modules before they reach the driver.
///
/// All workarounds are off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShaderWorkarounds {
    /// Move vertex outputs whose location collides with a fragment output
    /// in modules with several entry points.
    pub conflicting_multi_entry_point_locations: bool,
}

impl ShaderWorkarounds {
    /// No workarounds.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every known workaround.
    pub fn all() -> Self {
        Self {
            conflicting_multi_entry_point_locations: true,
        }
    }

    /// Enable or disable the conflicting location workaround.
    pub fn with_conflicting_multi_entry_point_locations(mut self, enabled: bool) -> Self {
        self.conflicting_multi_entry_point_locations = enabled;
        self
    }

    /// Pick the workarounds a driver needs from its reported name.
    pub fn for_driver(driver_name: &str) -> Self {
        let swiftshader = driver_name.to_ascii_lowercase().contains("swiftshader");
        if swiftshader {
            log::info!("Enabling SwiftShader shader workarounds for driver {driver_name:?}");
        }
        Self::none().with_conflicting_multi_entry_point_locations(swiftshader)
    }

    /// Check whether no workaround is enabled.
    pub fn is_empty(&self) -> bool {
        !self.conflicting_multi_entry_point_locations
    }
}

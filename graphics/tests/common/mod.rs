//! Common utilities for SPIR-V integration tests.
//!
//! [`ModuleBuilder`] assembles just enough of a SPIR-V module for the
//! patcher: entry points, `Location` decorations and interface variables.
//! Callers are responsible for emitting sections in module order (entry
//! points, then decorations, then variables).

#![allow(dead_code)]

use asterism_graphics::shader::{Instructions, MAGIC_NUMBER};
use spirv::{Decoration, ExecutionModel, Op, StorageClass};

/// Result type ID used for every variable. The patcher never looks at types.
const POINTER_TYPE_ID: u32 = 1;

/// Encode a literal string as null-terminated little-endian words.
pub fn encode_string(text: &str) -> Vec<u32> {
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0);
    while bytes.len() % 4 != 0 {
        bytes.push(0);
    }
    bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Assembles synthetic SPIR-V modules.
#[derive(Debug, Clone)]
pub struct ModuleBuilder {
    words: Vec<u32>,
}

impl ModuleBuilder {
    /// Start with a SPIR-V 1.0 header.
    pub fn new() -> Self {
        Self {
            words: vec![MAGIC_NUMBER, 0x0001_0000, 0, 64, 0],
        }
    }

    /// Append an instruction with a correct word count.
    pub fn instruction(mut self, op: Op, operands: &[u32]) -> Self {
        let word_count = operands.len() as u32 + 1;
        self.words.push((word_count << 16) | op as u32);
        self.words.extend_from_slice(operands);
        self
    }

    /// Append raw words, for malformed instructions.
    pub fn raw(mut self, words: &[u32]) -> Self {
        self.words.extend_from_slice(words);
        self
    }

    pub fn entry_point(
        self,
        model: ExecutionModel,
        function_id: u32,
        name: &str,
        interface: &[u32],
    ) -> Self {
        let mut operands = vec![model as u32, function_id];
        operands.extend(encode_string(name));
        operands.extend_from_slice(interface);
        self.instruction(Op::EntryPoint, &operands)
    }

    pub fn location(self, id: u32, location: u32) -> Self {
        self.instruction(Op::Decorate, &[id, Decoration::Location as u32, location])
    }

    pub fn variable(self, id: u32, storage_class: StorageClass) -> Self {
        self.instruction(Op::Variable, &[POINTER_TYPE_ID, id, storage_class as u32])
    }

    pub fn build(self) -> Vec<u32> {
        self.words
    }
}

impl Default for ModuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `(target id, location)` of every `Location` decoration, in module order.
pub fn decorated_locations(words: &[u32]) -> Vec<(u32, u32)> {
    Instructions::new(words)
        .filter(|instruction| instruction.is(Op::Decorate))
        .filter_map(|instruction| instruction.words(words))
        .filter(|decoration| {
            decoration.len() >= 4 && decoration[2] == Decoration::Location as u32
        })
        .map(|decoration| (decoration[1], decoration[3]))
        .collect()
}

/// Location decorated on `id`, if any.
pub fn location_of(words: &[u32], id: u32) -> Option<u32> {
    decorated_locations(words)
        .into_iter()
        .find(|&(target, _)| target == id)
        .map(|(_, location)| location)
}

/// Route `log` output through env_logger, honoring `RUST_LOG`.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

//! SPIR-V module scanning and in-place location patching.
//!
//! A SPIR-V module is a 5-word header followed by a stream of instructions.
//! The first word of every instruction packs its word count in the high 16
//! bits and its opcode in the low 16 bits. [`Instructions`] walks that stream
//! lazily; [`patch_conflicting_vertex_fragment_locations`] uses it to rewrite
//! `Location` decorations without changing the module size.
//!
//! Malformed or truncated modules are never an error here. Scanning treats a
//! truncated instruction as the end of the stream and the patcher reports
//! `false` without touching the buffer.

use ::spirv::{Decoration, ExecutionModel, Op, StorageClass};
use asterism_core::profiling::profile_scope;

/// SPIR-V magic number, the first word of every module.
pub const MAGIC_NUMBER: u32 = ::spirv::MAGIC_NUMBER;

/// Number of words in the module header.
pub const HEADER_WORD_COUNT: usize = 5;

/// Check whether `words` starts with a SPIR-V header.
///
/// Only the size and the magic number are checked.
pub fn is_spirv(words: &[u32]) -> bool {
    words.len() >= HEADER_WORD_COUNT && words[0] == MAGIC_NUMBER
}

/// Location of one instruction inside a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Opcode from the low 16 bits of the first word.
    pub opcode: u16,
    /// Index of the first word within the module.
    pub offset: usize,
    /// Number of words, including the opcode word.
    pub word_count: usize,
}

impl Instruction {
    /// Check the opcode.
    pub fn is(&self, op: Op) -> bool {
        u32::from(self.opcode) == op as u32
    }

    /// All words of this instruction, opcode word first.
    ///
    /// Returns `None` if `module` is too short to hold the instruction, e.g.
    /// when it is not the module the instruction was scanned from.
    pub fn words<'a>(&self, module: &'a [u32]) -> Option<&'a [u32]> {
        let end = self.offset.checked_add(self.word_count)?;
        module.get(self.offset..end)
    }
}

/// Lazy cursor over the instruction stream after the header.
///
/// Iteration stops at the end of the module, at an instruction declaring zero
/// words, or at an instruction declaring more words than remain. The last two
/// cases mark the cursor as truncated. The cursor cannot be rewound; create a
/// new one to scan again.
#[derive(Debug, Clone)]
pub struct Instructions<'a> {
    words: &'a [u32],
    position: usize,
    truncated: bool,
}

impl<'a> Instructions<'a> {
    /// Start scanning right after the header.
    pub fn new(words: &'a [u32]) -> Self {
        Self {
            words,
            position: HEADER_WORD_COUNT.min(words.len()),
            truncated: false,
        }
    }

    /// Whether scanning stopped at a malformed instruction.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Advance past the next instruction with opcode `op` and return it.
    ///
    /// If the rest of the stream has no such instruction the cursor stays
    /// where it was, so a later search for another opcode starts from the
    /// same point. Running into a truncated instruction exhausts the cursor.
    pub fn find(&mut self, op: Op) -> Option<Instruction> {
        let mut scan = self.clone();
        while let Some(instruction) = scan.next() {
            if instruction.is(op) {
                *self = scan;
                return Some(instruction);
            }
        }
        if scan.truncated {
            *self = scan;
        }
        None
    }
}

impl Iterator for Instructions<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        let first = *self.words.get(self.position)?;
        let word_count = (first >> 16) as usize;
        let remaining = self.words.len() - self.position;
        if word_count == 0 || word_count > remaining {
            log::trace!(
                "SPIR-V instruction at word {} declares {word_count} words, {remaining} remain",
                self.position
            );
            self.truncated = true;
            self.position = self.words.len();
            return None;
        }

        let instruction = Instruction {
            opcode: (first & 0xffff) as u16,
            offset: self.position,
            word_count,
        };
        self.position += word_count;
        Some(instruction)
    }
}

/// One interface variable of an entry point.
#[derive(Debug, Clone, Copy, Default)]
struct InterfaceSlot {
    /// Module offset of the word holding the `Location` value.
    location: Option<usize>,
    storage_class: Option<u32>,
}

impl InterfaceSlot {
    fn has_storage_class(&self, class: StorageClass) -> bool {
        self.storage_class == Some(class as u32)
    }
}

/// Interfaces of the vertex and fragment entry points, plus the highest
/// location decorated anywhere in the module.
#[derive(Debug)]
struct StageInterfaces {
    vertex: Vec<InterfaceSlot>,
    fragment: Vec<InterfaceSlot>,
    max_location: u32,
}

/// Interface IDs of an `OpEntryPoint`, which follow its null-terminated name.
///
/// The name starts at word 3; its last word is the first one whose high byte
/// is zero.
fn interface_ids(entry_point: &[u32]) -> &[u32] {
    match entry_point.iter().skip(3).position(|word| word >> 24 == 0) {
        Some(terminator) => &entry_point[3 + terminator + 1..],
        None => &[],
    }
}

/// Update the first slot whose ID matches `id`.
fn assign<F>(ids: &[u32], slots: &mut [InterfaceSlot], id: u32, update: F)
where
    F: FnOnce(&mut InterfaceSlot),
{
    if let Some(index) = ids.iter().position(|&candidate| candidate == id) {
        update(&mut slots[index]);
    }
}

/// Read-only pass collecting everything the patch needs.
///
/// Entry points come first in a valid module, decorations follow them and
/// variables follow the decorations, so one forward cursor serves all three
/// searches.
fn scan_stage_interfaces(words: &[u32]) -> Option<StageInterfaces> {
    let mut cursor = Instructions::new(words);

    let mut vertex_entry_point = None;
    let mut fragment_entry_point = None;
    while let Some(instruction) = cursor.find(Op::EntryPoint) {
        let entry_point = instruction.words(words)?;
        // Opcode, execution model, ID and at least one word of the name
        if entry_point.len() < 4 {
            log::trace!("OpEntryPoint at word {} is too short", instruction.offset);
            return None;
        }

        if entry_point[1] == ExecutionModel::Vertex as u32 && vertex_entry_point.is_none() {
            vertex_entry_point = Some(entry_point);
        } else if entry_point[1] == ExecutionModel::Fragment as u32
            && fragment_entry_point.is_none()
        {
            fragment_entry_point = Some(entry_point);
        }
    }

    let (Some(vertex_entry_point), Some(fragment_entry_point)) =
        (vertex_entry_point, fragment_entry_point)
    else {
        log::trace!("module lacks a vertex or a fragment entry point");
        return None;
    };

    let vertex_ids = interface_ids(vertex_entry_point);
    let fragment_ids = interface_ids(fragment_entry_point);
    if vertex_ids.is_empty() || fragment_ids.is_empty() {
        log::trace!("vertex or fragment entry point has no interface");
        return None;
    }

    let mut vertex = vec![InterfaceSlot::default(); vertex_ids.len()];
    let mut fragment = vec![InterfaceSlot::default(); fragment_ids.len()];

    let mut max_location = 0;
    while let Some(instruction) = cursor.find(Op::Decorate) {
        let decoration = instruction.words(words)?;
        // Three-word decorations are valid, they just carry no location
        if decoration.len() < 4 || decoration[2] != Decoration::Location as u32 {
            continue;
        }

        max_location = max_location.max(decoration[3]);

        let value_offset = instruction.offset + 3;
        let set_location = |slot: &mut InterfaceSlot| slot.location = Some(value_offset);
        assign(vertex_ids, &mut vertex, decoration[1], set_location);
        assign(fragment_ids, &mut fragment, decoration[1], set_location);
    }

    while let Some(instruction) = cursor.find(Op::Variable) {
        let variable = instruction.words(words)?;
        // Opcode, result type, result ID and storage class
        if variable.len() < 4 {
            log::trace!("OpVariable at word {} is too short", instruction.offset);
            return None;
        }

        let storage_class = variable[3];
        let set_storage_class = |slot: &mut InterfaceSlot| slot.storage_class = Some(storage_class);
        assign(vertex_ids, &mut vertex, variable[2], set_storage_class);
        assign(fragment_ids, &mut fragment, variable[2], set_storage_class);
    }

    Some(StageInterfaces {
        vertex,
        fragment,
        max_location,
    })
}

/// Work around drivers that match vertex outputs against fragment outputs.
///
/// Some drivers (SwiftShader among them) mis-link a module holding both a
/// vertex and a fragment entry point when a vertex output and a fragment
/// output share a location. For every vertex output colliding with a
/// fragment output, this moves the vertex output to a fresh location one
/// past the highest location in the module, and moves the fragment input
/// that used the old location along with it so the stages still match. Only
/// the first colliding fragment output is considered per vertex output.
///
/// Returns `false` without modifying `words` when the module has no vertex or
/// fragment entry point, when either entry point has no interface, or when
/// the module is malformed. Otherwise returns `true`, whether or not a
/// collision was found. The module size never changes.
pub fn patch_conflicting_vertex_fragment_locations(words: &mut [u32]) -> bool {
    profile_scope!("spirv_patch_conflicting_locations");

    let Some(StageInterfaces {
        vertex,
        fragment,
        mut max_location,
    }) = scan_stage_interfaces(words)
    else {
        return false;
    };

    let locations_of = |class: StorageClass, slots: &[InterfaceSlot]| -> Vec<usize> {
        slots
            .iter()
            .filter(|slot| slot.has_storage_class(class))
            .filter_map(|slot| slot.location)
            .collect()
    };
    let vertex_outputs = locations_of(StorageClass::Output, &vertex);
    let fragment_outputs = locations_of(StorageClass::Output, &fragment);
    let fragment_inputs = locations_of(StorageClass::Input, &fragment);

    for vertex_output in vertex_outputs {
        let location = words[vertex_output];
        if !fragment_outputs.iter().any(|&offset| words[offset] == location) {
            continue;
        }

        max_location = max_location.wrapping_add(1);
        let remapped = max_location;

        if let Some(fragment_input) = fragment_inputs
            .iter()
            .copied()
            .find(|&offset| words[offset] == location)
        {
            words[fragment_input] = remapped;
        }
        words[vertex_output] = remapped;

        log::debug!("remapped conflicting vertex output location {location} to {remapped}");
    }

    true
}

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

use bitflags::bitflags;
use once_cell::sync::Lazy;
use rangemap::RangeInclusiveMap;
use serde::Serialize;

use crate::dex::error::DexError;
use crate::dex::instructions::{Instruction, Operand, Payload, Reference};
use crate::dex::opcodes::OPCODES;

/// Resolves DEX pool references (string/type/field/method/...) into typed references.
/// Every lookup is range checked; an index outside its pool is an error.
pub trait RefResolver {
    fn string(&self, idx: u32) -> Result<Reference, DexError>;
    fn type_ref(&self, idx: u32) -> Result<Reference, DexError>;
    fn field_ref(&self, idx: u32) -> Result<Reference, DexError>;
    fn method_ref(&self, idx: u32) -> Result<Reference, DexError>;
    fn proto(&self, idx: u32) -> Result<Reference, DexError>;
    fn call_site(&self, idx: u32) -> Result<Reference, DexError>;
    fn method_handle(&self, idx: u32) -> Result<Reference, DexError>;
}

/// Represents different types of references used by opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceType {
    None,
    String,
    Type,
    Field,
    Method,
    CallSite,
    MethodProto,
    MethodHandle,
}

// Defines various flags that can be associated with an opcode.
bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OpcodeFlags: u32 {
        const CAN_THROW = 0x1;
        const CAN_CONTINUE = 0x4;
        const SETS_RESULT = 0x8;
        const SETS_REGISTER = 0x10;
        const SETS_WIDE_REGISTER = 0x20;
        const STATIC_FIELD_ACCESSOR = 0x100;
        const CAN_INITIALIZE_REFERENCE = 0x400;
        const FIELD_READ = 0x800;
        const FIELD_WRITE = 0x1000;
        const INVOKE = 0x2000;
        const BRANCH = 0x4000;
    }
}

/// Represents an opcode with its associated properties and the DEX
/// versions in which it is defined.
pub struct Opcode {
    pub name: &'static str,
    pub reference_type: ReferenceType,
    pub reference_type2: Option<ReferenceType>,
    pub format: Format,
    pub flags: OpcodeFlags,
    pub version_to_value_map: RangeInclusiveMap<u32, u16>,
}

/// A DEX version range along with the opcode value used in it.
pub struct VersionConstraint {
    pub version_range: RangeInclusive<u32>,
    pub opcode_value: u16,
}

impl Opcode {
    pub(crate) fn new(
        version_constraints: Vec<VersionConstraint>,
        name: &'static str,
        reference_type: ReferenceType,
        reference_type2: Option<ReferenceType>,
        format: Format,
        flags: OpcodeFlags,
    ) -> Self {
        let mut version_to_value_map = RangeInclusiveMap::new();
        for vc in version_constraints {
            if !vc.version_range.is_empty() {
                version_to_value_map.insert(vc.version_range, vc.opcode_value);
            }
        }
        Opcode { name, reference_type, reference_type2, format, flags, version_to_value_map }
    }

    pub(crate) fn new_no_flags(
        version_constraints: Vec<VersionConstraint>,
        name: &'static str,
        reference_type: ReferenceType,
        format: Format,
    ) -> Self {
        Opcode::new(version_constraints, name, reference_type, None, format, OpcodeFlags::empty())
    }

    /// Opcode defined from DEX `version` onwards.
    pub(crate) fn first_version(opcode_value: u16, version: u32) -> Vec<VersionConstraint> {
        vec![VersionConstraint { version_range: version..=u32::MAX, opcode_value }]
    }

    pub(crate) fn all_versions(opcode_value: u16) -> Vec<VersionConstraint> {
        vec![VersionConstraint { version_range: 0..=u32::MAX, opcode_value }]
    }

    pub fn can_throw(&self) -> bool {
        self.flags.contains(OpcodeFlags::CAN_THROW)
    }

    /// Determines if execution can continue to the next instruction.
    pub fn can_continue(&self) -> bool {
        self.flags.contains(OpcodeFlags::CAN_CONTINUE)
    }

    pub fn sets_result(&self) -> bool {
        self.flags.contains(OpcodeFlags::SETS_RESULT)
    }

    pub fn sets_register(&self) -> bool {
        self.flags.contains(OpcodeFlags::SETS_REGISTER)
    }

    pub fn sets_wide_register(&self) -> bool {
        self.flags.contains(OpcodeFlags::SETS_WIDE_REGISTER)
    }

    pub fn is_static_field_accessor(&self) -> bool {
        self.flags.contains(OpcodeFlags::STATIC_FIELD_ACCESSOR)
    }

    pub fn is_invoke(&self) -> bool {
        self.flags.contains(OpcodeFlags::INVOKE)
    }

    /// Retrieves the opcode value for a DEX format version, if defined there.
    pub fn get_opcode_value(&self, dex_version: u32) -> Option<u16> {
        self.version_to_value_map.get(&dex_version).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Format {
    Format10t,
    Format10x,
    Format11n,
    Format11x,
    Format12x,
    Format20t,
    Format21c,
    Format21ih,
    Format21lh,
    Format21s,
    Format21t,
    Format22b,
    Format22c,
    Format22s,
    Format22t,
    Format22x,
    Format23x,
    Format30t,
    Format31c,
    Format31i,
    Format31t,
    Format32x,
    Format35c,
    Format3rc,
    Format45cc,
    Format4rcc,
    Format51l,
    ArrayPayload,
    PackedSwitchPayload,
    SparseSwitchPayload,
}

impl Format {
    /// Returns the size in bytes, or -1 for variable-width payloads.
    pub const fn size(&self) -> i32 {
        match self {
            Format::Format10t | Format::Format10x | Format::Format11n | Format::Format11x | Format::Format12x => 2,

            Format::Format20t
            | Format::Format21c
            | Format::Format21ih
            | Format::Format21lh
            | Format::Format21s
            | Format::Format21t
            | Format::Format22b
            | Format::Format22c
            | Format::Format22s
            | Format::Format22t
            | Format::Format22x
            | Format::Format23x => 4,

            Format::Format30t
            | Format::Format31c
            | Format::Format31i
            | Format::Format31t
            | Format::Format32x
            | Format::Format35c
            | Format::Format3rc => 6,

            Format::Format45cc | Format::Format4rcc => 8,

            Format::Format51l => 10,

            Format::ArrayPayload | Format::PackedSwitchPayload | Format::SparseSwitchPayload => -1,
        }
    }

    pub const fn is_payload_format(&self) -> bool {
        matches!(self, Format::ArrayPayload | Format::PackedSwitchPayload | Format::SparseSwitchPayload)
    }
}

#[inline]
fn require_cu(code: &[u16], pc: usize, need: usize, opname: &str) -> Result<(), DexError> {
    if pc.checked_add(need).map_or(true, |end| end > code.len()) {
        fail!(
            "Truncated {} at pc {}: need {} code units, have {}",
            opname,
            pc,
            need,
            code.len().saturating_sub(pc)
        );
    }
    Ok(())
}
#[inline] fn op(inst: u16) -> u8 { (inst & 0x00ff) as u8 }
#[inline] fn a8(inst: u16) -> u16 { inst >> 8 }                 // 11x AA, 21x AA, …
#[inline] fn a4(inst: u16) -> u16 { (inst >> 8) & 0x0f }        // 12x A (low nibble of high byte)
#[inline] fn b4(inst: u16) -> u16 { (inst >> 12) & 0x0f }       // 12x B (high nibble of high byte)
#[inline] fn s16(x: u16) -> i64 { x as i16 as i64 }
#[inline] fn s8(x: u16) -> i64 { x as u8 as i8 as i64 }
#[inline] fn s4(x: u16) -> i64 { (((x as u8) << 4) as i8 >> 4) as i64 }
#[inline] fn u32_at(code: &[u16], pc: usize) -> u32 { (code[pc] as u32) | ((code[pc + 1] as u32) << 16) }

// Global lazy cache for opcode maps keyed by DEX version
static OPCODE_MAP_CACHE: Lazy<Mutex<HashMap<u32, Arc<HashMap<u16, &'static Opcode>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

pub(crate) fn get_opcode_map(dex_version: u32) -> Arc<HashMap<u16, &'static Opcode>> {
    let mut guard = OPCODE_MAP_CACHE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(m) = guard.get(&dex_version) {
        return Arc::clone(m);
    }
    let mut map: HashMap<u16, &'static Opcode> = HashMap::new();
    for o in OPCODES.iter() {
        if let Some(value) = o.get_opcode_value(dex_version) {
            map.insert(value, o);
        }
    }
    let arc = Arc::new(map);
    guard.insert(dex_version, Arc::clone(&arc));
    arc
}

fn resolve(kind: ReferenceType, idx: u32, res: &impl RefResolver) -> Result<Reference, DexError> {
    match kind {
        ReferenceType::String => res.string(idx),
        ReferenceType::Type => res.type_ref(idx),
        ReferenceType::Field => res.field_ref(idx),
        ReferenceType::Method => res.method_ref(idx),
        ReferenceType::MethodProto => res.proto(idx),
        ReferenceType::CallSite => res.call_site(idx),
        ReferenceType::MethodHandle => res.method_handle(idx),
        ReferenceType::None => fail!("Opcode has no reference kind for index {}", idx),
    }
}

fn parse_array_payload(code: &[u16], pc: usize) -> Result<(Payload, usize), DexError> {
    require_cu(code, pc, 4, "array-data header")?;
    let element_width = code[pc + 1];
    let element_count = u32_at(code, pc + 2);
    if !matches!(element_width, 1 | 2 | 4 | 8) {
        fail!("Unsupported array-data element width {}", element_width);
    }
    let bytes_len = (element_width as usize)
        .checked_mul(element_count as usize)
        .ok_or_else(|| DexError::new("array-data overflow"))?;
    let data_cu = bytes_len.div_ceil(2);
    require_cu(code, pc + 4, data_cu, "array-data elements")?;

    let mut data: Vec<u8> = Vec::with_capacity(bytes_len);
    for cu in &code[pc + 4..pc + 4 + data_cu] {
        data.extend_from_slice(&cu.to_le_bytes());
    }
    data.truncate(bytes_len);
    Ok((Payload::ArrayData { element_width, element_count, data }, 4 + data_cu))
}

fn parse_packed_switch_payload(code: &[u16], pc: usize) -> Result<(Payload, usize), DexError> {
    // ident, size (u16), first_key (i32), then size * target (i32)
    require_cu(code, pc, 4, "packed-switch header")?;
    let size = code[pc + 1] as usize;
    require_cu(code, pc + 4, size * 2, "packed-switch targets")?;
    let first_key = u32_at(code, pc + 2) as i32;
    let targets = (0..size).map(|i| u32_at(code, pc + 4 + i * 2) as i32).collect();
    Ok((Payload::PackedSwitch { first_key, targets }, 4 + size * 2))
}

fn parse_sparse_switch_payload(code: &[u16], pc: usize) -> Result<(Payload, usize), DexError> {
    // ident, size (u16), then size * key (i32) then size * target (i32)
    require_cu(code, pc, 2, "sparse-switch header")?;
    let size = code[pc + 1] as usize;
    require_cu(code, pc + 2, size * 4, "sparse-switch entries")?;
    let keys_start = pc + 2;
    let targets_start = keys_start + size * 2;
    let keys = (0..size).map(|i| u32_at(code, keys_start + i * 2) as i32).collect();
    let targets = (0..size).map(|i| u32_at(code, targets_start + i * 2) as i32).collect();
    Ok((Payload::SparseSwitch { keys, targets }, 2 + size * 4))
}

fn invoke_registers(inst: u16, regs: u16) -> Result<Vec<u16>, DexError> {
    // A|G|op BBBB F|E|D|C
    let count = b4(inst) as usize;
    if count > 5 {
        fail!("Invalid register count {} in invoke-style instruction", count);
    }
    let all = [regs & 0xf, (regs >> 4) & 0xf, (regs >> 8) & 0xf, (regs >> 12) & 0xf, a4(inst)];
    Ok(all[..count].to_vec())
}

fn decode_operands(op: &Opcode, code: &[u16], pc: usize, res: &impl RefResolver) -> Result<Vec<Operand>, DexError> {
    let inst = code[pc];
    let reference = |idx: u32| resolve(op.reference_type, idx, res).map(Operand::Reference);
    let operands = match op.format {
        Format::Format10x => vec![],
        Format::Format10t => vec![Operand::Target(s8(a8(inst)) as i32)],
        Format::Format11x => vec![Operand::Register(a8(inst))],
        Format::Format11n => vec![Operand::Register(a4(inst)), Operand::Literal(s4(b4(inst)))],
        Format::Format12x => vec![Operand::Register(a4(inst)), Operand::Register(b4(inst))],
        Format::Format20t => vec![Operand::Target(s16(code[pc + 1]) as i32)],
        Format::Format21c => vec![Operand::Register(a8(inst)), reference(code[pc + 1] as u32)?],
        Format::Format21ih => vec![Operand::Register(a8(inst)), Operand::Literal(s16(code[pc + 1]) << 16)],
        Format::Format21lh => vec![Operand::Register(a8(inst)), Operand::Literal(s16(code[pc + 1]) << 48)],
        Format::Format21s => vec![Operand::Register(a8(inst)), Operand::Literal(s16(code[pc + 1]))],
        Format::Format21t => vec![Operand::Register(a8(inst)), Operand::Target(s16(code[pc + 1]) as i32)],
        Format::Format22b => {
            let cc_bb = code[pc + 1];
            vec![
                Operand::Register(a8(inst)),
                Operand::Register(cc_bb & 0xff),
                Operand::Literal(s8(cc_bb >> 8)),
            ]
        }
        Format::Format22c => vec![
            Operand::Register(a4(inst)),
            Operand::Register(b4(inst)),
            reference(code[pc + 1] as u32)?,
        ],
        Format::Format22s => vec![
            Operand::Register(a4(inst)),
            Operand::Register(b4(inst)),
            Operand::Literal(s16(code[pc + 1])),
        ],
        Format::Format22t => vec![
            Operand::Register(a4(inst)),
            Operand::Register(b4(inst)),
            Operand::Target(s16(code[pc + 1]) as i32),
        ],
        Format::Format22x => vec![Operand::Register(a8(inst)), Operand::Register(code[pc + 1])],
        Format::Format23x => {
            let cc_bb = code[pc + 1];
            vec![
                Operand::Register(a8(inst)),
                Operand::Register(cc_bb & 0xff),
                Operand::Register(cc_bb >> 8),
            ]
        }
        Format::Format30t => vec![Operand::Target(u32_at(code, pc + 1) as i32)],
        Format::Format31c => vec![Operand::Register(a8(inst)), reference(u32_at(code, pc + 1))?],
        Format::Format31i => vec![Operand::Register(a8(inst)), Operand::Literal(u32_at(code, pc + 1) as i32 as i64)],
        Format::Format31t => vec![Operand::Register(a8(inst)), Operand::Target(u32_at(code, pc + 1) as i32)],
        Format::Format32x => vec![Operand::Register(code[pc + 1]), Operand::Register(code[pc + 2])],
        Format::Format35c => vec![
            Operand::RegisterList(invoke_registers(inst, code[pc + 2])?),
            reference(code[pc + 1] as u32)?,
        ],
        Format::Format3rc => vec![
            Operand::RegisterRange { first: code[pc + 2], count: a8(inst) },
            reference(code[pc + 1] as u32)?,
        ],
        Format::Format45cc | Format::Format4rcc => {
            let regs = if op.format == Format::Format45cc {
                Operand::RegisterList(invoke_registers(inst, code[pc + 2])?)
            } else {
                Operand::RegisterRange { first: code[pc + 2], count: a8(inst) }
            };
            let proto_kind = op.reference_type2.unwrap_or(ReferenceType::MethodProto);
            vec![
                regs,
                reference(code[pc + 1] as u32)?,
                Operand::Reference(resolve(proto_kind, code[pc + 3] as u32, res)?),
            ]
        }
        Format::Format51l => {
            let lit = (code[pc + 1] as u64)
                | ((code[pc + 2] as u64) << 16)
                | ((code[pc + 3] as u64) << 32)
                | ((code[pc + 4] as u64) << 48);
            vec![Operand::Register(a8(inst)), Operand::Literal(lit as i64)]
        }
        Format::ArrayPayload | Format::PackedSwitchPayload | Format::SparseSwitchPayload => {
            fail!("Payload format {:?} has no fixed operands", op.format)
        }
    };
    Ok(operands)
}

/// Decodes a method's code units into instructions, resolving every pool
/// operand through `res`. Output depends only on the inputs.
pub fn decode(code: &[u16], dex_version: u32, res: &impl RefResolver) -> Result<Vec<Instruction>, DexError> {
    let opcodes = get_opcode_map(dex_version);
    let mut out = Vec::new();
    let mut pc = 0usize;

    while pc < code.len() {
        let inst = code[pc];
        // Payload pseudo-instructions are keyed by their full ident.
        let key = if op(inst) == 0 && a8(inst) != 0 { inst } else { op(inst) as u16 };
        let opcode = match opcodes.get(&key) {
            Some(o) => *o,
            None if key > 0xff => fail!("Unknown payload ident 0x{:04x} at pc {}", key, pc),
            None => fail!("Unknown opcode 0x{:02x} at pc {} for dex version {:03}", key, pc, dex_version),
        };

        let (operands, payload, width) = match opcode.format {
            Format::PackedSwitchPayload => {
                let (p, w) = parse_packed_switch_payload(code, pc)?;
                (vec![], Some(p), w)
            }
            Format::SparseSwitchPayload => {
                let (p, w) = parse_sparse_switch_payload(code, pc)?;
                (vec![], Some(p), w)
            }
            Format::ArrayPayload => {
                let (p, w) = parse_array_payload(code, pc)?;
                (vec![], Some(p), w)
            }
            fmt => {
                let width = (fmt.size() / 2) as usize;
                require_cu(code, pc, width, opcode.name)?;
                let operands = decode_operands(opcode, code, pc, res)
                    .map_err(|e| err!(e, "{} at pc {}", opcode.name, pc))?;
                (operands, None, width)
            }
        };

        out.push(Instruction {
            offset: (pc * 2) as u32,
            opcode: op(inst),
            name: opcode.name,
            format: opcode.format,
            length: width as u32,
            flags: opcode.flags,
            operands,
            payload,
        });
        pc += width;
    }

    check_payload_targets(&out)?;
    Ok(out)
}

// Switch and fill-array-data instructions must point at a payload of the matching kind.
fn check_payload_targets(insns: &[Instruction]) -> Result<(), DexError> {
    for insn in insns.iter().filter(|i| i.format == Format::Format31t) {
        let expected = match insn.name {
            "packed-switch" => Format::PackedSwitchPayload,
            "sparse-switch" => Format::SparseSwitchPayload,
            _ => Format::ArrayPayload,
        };
        // instructions are in address order
        let found = insn
            .target_address()
            .and_then(|target| insns.binary_search_by_key(&target, Instruction::address).ok())
            .map(|at| &insns[at]);
        if !matches!(found, Some(t) if t.format == expected) {
            fail!("{} at offset {} does not point at a {:?}", insn.name, insn.offset, expected);
        }
    }
    Ok(())
}

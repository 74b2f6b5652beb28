//! Representation of decoded Dalvik bytecode

use std::fmt;

use serde::Serialize;

use crate::dex::opcode_format::{Format, OpcodeFlags};

/// A pool index resolved against the owning image's pools.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Reference {
    String { idx: u32, value: String },
    Type { idx: u32, descriptor: String },
    Field { idx: u32, class: String, name: String, descriptor: String },
    Method { idx: u32, class: String, name: String, proto: String },
    Proto { idx: u32, descriptor: String },
    CallSite(u32),
    MethodHandle(u32),
}

impl Reference {
    /// Canonical `Lcls;->name:Type` form of a field reference.
    pub fn field_name(&self) -> Option<String> {
        match self {
            Reference::Field { class, name, descriptor, .. } => Some(format!("{}->{}:{}", class, name, descriptor)),
            _ => None,
        }
    }

    /// Canonical dalvik name `Lcls;->name(args)ret` of a method reference.
    pub fn dalvik_name(&self) -> Option<String> {
        match self {
            Reference::Method { class, name, proto, .. } => Some(format!("{}->{}{}", class, name, proto)),
            _ => None,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::String { value, .. } => write!(f, "\"{}\"", escape_string(value)),
            Reference::Type { descriptor, .. } => f.write_str(descriptor),
            Reference::Field { class, name, descriptor, .. } => write!(f, "{}->{}:{}", class, name, descriptor),
            Reference::Method { class, name, proto, .. } => write!(f, "{}->{}{}", class, name, proto),
            Reference::Proto { descriptor, .. } => f.write_str(descriptor),
            Reference::CallSite(idx) => write!(f, "call_site@{}", idx),
            Reference::MethodHandle(idx) => write!(f, "method_handle@{}", idx),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Operand {
    Register(u16),
    /// Explicit register list of the 35c / 45cc formats.
    RegisterList(Vec<u16>),
    /// `count` consecutive registers starting at `first` (3rc / 4rcc).
    RegisterRange { first: u16, count: u16 },
    Literal(i64),
    /// Branch or payload offset in code units, relative to the instruction.
    Target(i32),
    Reference(Reference),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(r) => write!(f, "v{}", r),
            Operand::RegisterList(regs) => {
                let regs: Vec<String> = regs.iter().map(|r| format!("v{}", r)).collect();
                write!(f, "{{{}}}", regs.join(", "))
            }
            Operand::RegisterRange { count: 0, .. } => f.write_str("{}"),
            Operand::RegisterRange { first, count } => {
                write!(f, "{{v{} .. v{}}}", first, u32::from(*first) + u32::from(*count) - 1)
            }
            Operand::Literal(lit) => write!(f, "#{}", lit),
            Operand::Target(off) => write!(f, "{:+}", off),
            Operand::Reference(r) => write!(f, "{}", r),
        }
    }
}

/// Variable-length data tables embedded in the instruction stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Payload {
    /// Targets are relative to the `packed-switch` instruction that uses the table.
    PackedSwitch { first_key: i32, targets: Vec<i32> },
    SparseSwitch { keys: Vec<i32>, targets: Vec<i32> },
    ArrayData { element_width: u16, element_count: u32, data: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Byte offset from the start of the owning code item's instructions.
    pub offset: u32,
    pub opcode: u8,
    pub name: &'static str,
    pub format: Format,
    /// Width in 16-bit code units.
    pub length: u32,
    #[serde(skip)]
    pub flags: OpcodeFlags,
    pub operands: Vec<Operand>,
    pub payload: Option<Payload>,
}

impl Instruction {
    /// Offset in code units, the unit branch targets are expressed in.
    pub fn address(&self) -> u32 {
        self.offset / 2
    }

    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.operands.iter().filter_map(|o| match o {
            Operand::Reference(r) => Some(r),
            _ => None,
        })
    }

    /// The primary pool reference, if the opcode carries one.
    pub fn reference(&self) -> Option<&Reference> {
        self.references().next()
    }

    pub fn is_payload(&self) -> bool {
        self.payload.is_some()
    }

    pub fn is_invoke(&self) -> bool {
        self.flags.contains(OpcodeFlags::INVOKE)
    }

    pub fn reads_field(&self) -> bool {
        self.flags.contains(OpcodeFlags::FIELD_READ)
    }

    pub fn writes_field(&self) -> bool {
        self.flags.contains(OpcodeFlags::FIELD_WRITE)
    }

    /// Absolute code-unit address of a branch or payload target, if any.
    pub fn target_address(&self) -> Option<u32> {
        self.operands.iter().find_map(|o| match o {
            Operand::Target(off) => Some((self.address() as i64 + *off as i64) as u32),
            _ => None,
        })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Some(Payload::PackedSwitch { first_key, targets }) => {
                write!(f, "{} first_key={} targets={:?}", self.name, first_key, targets)
            }
            Some(Payload::SparseSwitch { keys, targets }) => {
                write!(f, "{} keys={:?} targets={:?}", self.name, keys, targets)
            }
            Some(Payload::ArrayData { element_width, element_count, .. }) => {
                write!(f, "{} width={} count={}", self.name, element_width, element_count)
            }
            None => {
                f.write_str(self.name)?;
                let mut connector = " ";
                for o in &self.operands {
                    write!(f, "{}{}", connector, o)?;
                    connector = ", ";
                }
                Ok(())
            }
        }
    }
}

pub(crate) fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // ASCII control chars (C0)
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            // C1 control block 0x7F..0x9F
            c if (0x7F..=0x9F).contains(&(c as u32)) => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

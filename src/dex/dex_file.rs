/* Dex file format structures */

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use bitflags::bitflags;
use log::{debug, warn};

use crate::dex::error::DexError;
use crate::dex::instructions::{Instruction, Reference};
use crate::dex::opcode_format::{decode, RefResolver};
use crate::dex::{read_mutf8, read_sleb128, read_u2, read_u4, read_uleb128, read_uleb128p1, read_x};
use crate::options::{is_cancelled, CancellationToken};

/* Constants */
pub const DEX_FILE_MAGIC: [u8; 4] = [0x64, 0x65, 0x78, 0x0a];
pub const SUPPORTED_VERSIONS: [u32; 6] = [35, 37, 38, 39, 40, 41];
pub const HEADER_SIZE: u32 = 0x70;
pub const ENDIAN_CONSTANT: u32 = 0x12345678;
pub const REVERSE_ENDIAN_CONSTANT: u32 = 0x78563412;
pub const NO_INDEX: u32 = 0xffffffff;

bitflags! {
    /// Access flags of classes, fields and methods.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessFlags: u32 {
        const PUBLIC = 0x1;
        const PRIVATE = 0x2;
        const PROTECTED = 0x4;
        const STATIC = 0x8;
        const FINAL = 0x10;
        const SYNCHRONIZED = 0x20;
        const VOLATILE = 0x40;
        const BRIDGE = 0x40;
        const TRANSIENT = 0x80;
        const VARARGS = 0x80;
        const NATIVE = 0x100;
        const INTERFACE = 0x200;
        const ABSTRACT = 0x400;
        const STRICT = 0x800;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
        const CONSTRUCTOR = 0x10000;
        const DECLARED_SYNCHRONIZED = 0x20000;
    }
}

pub type StringId = u32;
pub type TypeId = u32;
pub type ProtoId = u32;
pub type FieldId = u32;
pub type MethodId = u32;

/// Pool sizes used to range check ids met while decoding class data.
#[derive(Debug, Clone, Copy)]
struct PoolSizes {
    strings: usize,
    types: usize,
    fields: usize,
    methods: usize,
}

fn check_index(idx: u32, len: usize, what: &str) -> Result<(), DexError>
{
    if idx as usize >= len {
        fail!("{} index {} out of range ({} entries)", what, idx, len);
    }
    Ok(())
}

fn check_optional_index(idx: u32, len: usize, what: &str) -> Result<Option<u32>, DexError>
{
    if idx == NO_INDEX {
        return Ok(None);
    }
    check_index(idx, len, what)?;
    Ok(Some(idx))
}

/// Validate that `count` items of `item_size` bytes starting at `off` fit in the image.
fn section(bytes: &[u8], off: u32, count: u32, item_size: u64, what: &str) -> Result<usize, DexError>
{
    if count == 0 {
        return Ok(off as usize);
    }
    let end = off as u64 + count as u64 * item_size;
    if off < HEADER_SIZE || end > bytes.len() as u64 {
        fail!("{} section of {} entries at 0x{:x} lies outside the image", what, count, off);
    }
    Ok(off as usize)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeList(pub Vec<TypeId>);

impl TypeList
{
    pub fn read(bytes: &[u8], ix: &mut usize, types: usize) -> Result<TypeList, DexError>
    {
        let size = read_u4(bytes, ix)?;
        if *ix as u64 + size as u64 * 2 > bytes.len() as u64 {
            fail!("type_list of {} entries at 0x{:x} is truncated", size, *ix);
        }
        let mut v = Vec::with_capacity(size as usize);
        for _ in 0..size {
            let t = read_u2(bytes, ix)? as TypeId;
            check_index(t, types, "type_list type")?;
            v.push(t);
        }
        Ok(TypeList(v))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeId> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrototypeItem {
    pub shorty_idx: StringId,
    pub return_type_idx: TypeId,
    pub parameters: TypeList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldItem {
    pub class_idx: TypeId,
    pub type_idx: TypeId,
    pub name_idx: StringId,
}

impl FieldItem
{
    pub fn read(bytes: &[u8], ix: &mut usize) -> Result<FieldItem, DexError>
    {
        Ok(FieldItem {
            class_idx: read_u2(bytes, ix)? as TypeId,
            type_idx: read_u2(bytes, ix)? as TypeId,
            name_idx: read_u4(bytes, ix)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodItem {
    pub class_idx: TypeId,
    pub proto_idx: ProtoId,
    pub name_idx: StringId,
}

impl MethodItem
{
    pub fn read(bytes: &[u8], ix: &mut usize) -> Result<MethodItem, DexError>
    {
        Ok(MethodItem {
            class_idx: read_u2(bytes, ix)? as TypeId,
            proto_idx: read_u2(bytes, ix)? as ProtoId,
            name_idx: read_u4(bytes, ix)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedField
{
    pub field_idx: FieldId,
    pub access_flags: AccessFlags,
}

/// Header of a `debug_info_item`. The state machine that follows it is not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugInfo
{
    pub line_start: u32,
    pub parameter_names: Vec<Option<StringId>>,
}

impl DebugInfo
{
    fn read(bytes: &[u8], ix: &mut usize, pools: &PoolSizes) -> Result<DebugInfo, DexError>
    {
        let line_start = read_uleb128(bytes, ix)?;
        let parameters_size = read_uleb128(bytes, ix)?;
        if parameters_size as usize > bytes.len() {
            fail!("debug_info declares {} parameters", parameters_size);
        }
        let mut parameter_names = Vec::with_capacity(parameters_size as usize);
        for _ in 0..parameters_size {
            let idx = read_uleb128p1(bytes, ix)?;   // -1 => NO_INDEX
            if idx < 0 {
                parameter_names.push(None);
            } else {
                check_index(idx as u32, pools.strings, "debug_info parameter name")?;
                parameter_names.push(Some(idx as StringId));
            }
        }
        Ok(DebugInfo { line_start, parameter_names })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedTypeAddrPair {
    pub type_idx: TypeId,
    pub addr: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryItem {
    pub start_addr: u32,
    pub insn_count: u16,
    /// Byte offset of the handler from the start of the handler list.
    pub handler_off: u16,
}

impl TryItem {
    pub fn read(bytes: &[u8], ix: &mut usize) -> Result<TryItem, DexError> {
        Ok(TryItem {
            start_addr: read_u4(bytes, ix)?,
            insn_count: read_u2(bytes, ix)?,
            handler_off: read_u2(bytes, ix)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCatchHandler {
    /// Byte offset of this handler from the start of the handler list.
    pub offset: u32,
    pub handlers: Vec<EncodedTypeAddrPair>,
    pub catch_all_addr: Option<u32>,
}

impl EncodedCatchHandler {
    fn read(bytes: &[u8], ix: &mut usize, offset: u32, pools: &PoolSizes) -> Result<EncodedCatchHandler, DexError> {
        let size = read_sleb128(bytes, ix)?;
        let count = size.unsigned_abs() as usize;
        if count > bytes.len() {
            fail!("catch handler declares {} entries", count);
        }
        let mut handlers = Vec::with_capacity(count);
        for _ in 0..count {
            let type_idx = read_uleb128(bytes, ix)?;
            check_index(type_idx, pools.types, "catch handler type")?;
            handlers.push(EncodedTypeAddrPair { type_idx, addr: read_uleb128(bytes, ix)? });
        }
        // A non-positive size means a trailing catch-all address follows.
        let catch_all_addr = if size <= 0 { Some(read_uleb128(bytes, ix)?) } else { None };
        Ok(EncodedCatchHandler { offset, handlers, catch_all_addr })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeItem
{
    /// File offset of the `code_item`.
    pub offset: u32,
    pub registers_size: u16,
    pub ins_size: u16,
    pub outs_size: u16,
    pub debug_info: Option<DebugInfo>,
    pub insns: Vec<u16>,
    pub tries: Vec<TryItem>,
    pub handlers: Vec<EncodedCatchHandler>,
}

impl CodeItem
{
    fn read(bytes: &[u8], ix: &mut usize, pools: &PoolSizes) -> Result<CodeItem, DexError>
    {
        let code_item_start = *ix;
        let registers_size = read_u2(bytes, ix)?;
        let ins_size = read_u2(bytes, ix)?;
        let outs_size = read_u2(bytes, ix)?;
        let tries_size = read_u2(bytes, ix)?;
        if ins_size > registers_size {
            fail!("code item at 0x{:x} has {} ins but {} registers", code_item_start, ins_size, registers_size);
        }

        let debug_offset = read_u4(bytes, ix)?;
        let debug_info = if debug_offset > 0 {
            let mut debug_ix = debug_offset as usize;
            Some(DebugInfo::read(bytes, &mut debug_ix, pools).map_err(|e| err!(e, "debug info at 0x{:x}", debug_offset))?)
        } else {
            None
        };

        let insns_size = read_u4(bytes, ix)? as usize;
        let raw = read_x(bytes, ix, insns_size.checked_mul(2).ok_or_else(|| DexError::new("insns_size overflow"))?)?;
        let insns: Vec<u16> = raw.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]])).collect();

        let mut tries: Vec<TryItem> = vec![];
        let mut handlers: Vec<EncodedCatchHandler> = vec![];

        if tries_size > 0 {
            // Optional 2-byte padding if there are tries and insns_size is odd
            if insns_size & 1 != 0 {
                let padding = read_u2(bytes, ix)?;
                if padding != 0 {
                    warn!("[codeitem] non-zero padding 0x{:04x} at 0x{:x}", padding, *ix - 2);
                }
            }
            for _ in 0..tries_size {
                let t = TryItem::read(bytes, ix)?;
                if t.start_addr as u64 + t.insn_count as u64 > insns_size as u64 {
                    fail!(
                        "try block 0x{:x}+{} exceeds {} code units in code item at 0x{:x}",
                        t.start_addr, t.insn_count, insns_size, code_item_start
                    );
                }
                tries.push(t);
            }

            let list_start = *ix;
            let handlers_size = read_uleb128(bytes, ix)? as usize;
            if handlers_size > bytes.len() {
                fail!("encoded_catch_handler_list size {} is implausibly large", handlers_size);
            }
            for i in 0..handlers_size {
                let entry_off = *ix;
                let h = EncodedCatchHandler::read(bytes, ix, (entry_off - list_start) as u32, pools).map_err(|e| {
                    err!(e, "catch handler #{}/{} at 0x{:x} in code item at 0x{:x}", i + 1, handlers_size, entry_off, code_item_start)
                })?;
                handlers.push(h);
            }
            for t in &tries {
                if !handlers.iter().any(|h| h.offset == t.handler_off as u32) {
                    fail!("try block at 0x{:x} references missing handler offset {}", t.start_addr, t.handler_off);
                }
            }
        }

        Ok(CodeItem {
            offset: code_item_start as u32,
            registers_size,
            ins_size,
            outs_size,
            debug_info,
            insns,
            tries,
            handlers,
        })
    }

    /// The handler a try block dispatches to.
    pub fn handler_for(&self, try_item: &TryItem) -> Option<&EncodedCatchHandler> {
        self.handlers.iter().find(|h| h.offset == try_item.handler_off as u32)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMethod
{
    pub method_idx: MethodId,
    pub access_flags: AccessFlags,
    pub code: Option<CodeItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassDataItem {
    pub static_fields: Vec<EncodedField>,
    pub instance_fields: Vec<EncodedField>,
    pub direct_methods: Vec<EncodedMethod>,
    pub virtual_methods: Vec<EncodedMethod>,
}

// Delta-decoded ids must stay in range and strictly increase within a list.
fn next_id(prev: Option<u32>, delta: u32, len: usize, what: &str) -> Result<u32, DexError>
{
    let id = match prev {
        None => delta,
        Some(_) if delta == 0 => fail!("{} ids are not strictly increasing", what),
        Some(p) => p.checked_add(delta).ok_or_else(|| err!("{} id overflows", what))?,
    };
    check_index(id, len, what)?;
    Ok(id)
}

impl ClassDataItem
{
    fn read(bytes: &[u8], ix: &mut usize, pools: &PoolSizes) -> Result<ClassDataItem, DexError>
    {
        let static_field_size = read_uleb128(bytes, ix)?;
        let instance_field_size = read_uleb128(bytes, ix)?;
        let direct_method_size = read_uleb128(bytes, ix)?;
        let virtual_method_size = read_uleb128(bytes, ix)?;

        let static_fields = Self::read_fields(bytes, ix, static_field_size, pools, "static field")?;
        let instance_fields = Self::read_fields(bytes, ix, instance_field_size, pools, "instance field")?;
        let direct_methods = Self::read_methods(bytes, ix, direct_method_size, pools, "direct method")?;
        let virtual_methods = Self::read_methods(bytes, ix, virtual_method_size, pools, "virtual method")?;

        Ok(ClassDataItem { static_fields, instance_fields, direct_methods, virtual_methods })
    }

    fn read_fields(bytes: &[u8], ix: &mut usize, count: u32, pools: &PoolSizes, what: &str) -> Result<Vec<EncodedField>, DexError>
    {
        // every entry takes at least two bytes
        if count as usize > bytes.len() / 2 {
            fail!("{} count {} is implausibly large", what, count);
        }
        let mut fields = Vec::with_capacity(count as usize);
        let mut prev = None;
        for _ in 0..count {
            let field_idx = next_id(prev, read_uleb128(bytes, ix)?, pools.fields, what)?;
            prev = Some(field_idx);
            let access_flags = AccessFlags::from_bits_retain(read_uleb128(bytes, ix)?);
            fields.push(EncodedField { field_idx, access_flags });
        }
        Ok(fields)
    }

    fn read_methods(bytes: &[u8], ix: &mut usize, count: u32, pools: &PoolSizes, what: &str) -> Result<Vec<EncodedMethod>, DexError>
    {
        if count as usize > bytes.len() / 3 {
            fail!("{} count {} is implausibly large", what, count);
        }
        let mut methods = Vec::with_capacity(count as usize);
        let mut prev = None;
        for _ in 0..count {
            let method_idx = next_id(prev, read_uleb128(bytes, ix)?, pools.methods, what)?;
            prev = Some(method_idx);
            let access_flags = AccessFlags::from_bits_retain(read_uleb128(bytes, ix)?);
            let code_off = read_uleb128(bytes, ix)?;
            let code = if code_off > 0 {
                let mut code_ix = code_off as usize;
                let code = CodeItem::read(bytes, &mut code_ix, pools)
                    .map_err(|e| err!(e, "{} {} (code item at 0x{:x})", what, method_idx, code_off))?;
                Some(code)
            } else {
                None
            };
            methods.push(EncodedMethod { method_idx, access_flags, code });
        }
        Ok(methods)
    }

    /// Direct then virtual methods, each in on-disk order.
    pub fn methods(&self) -> impl Iterator<Item = &EncodedMethod> {
        self.direct_methods.iter().chain(self.virtual_methods.iter())
    }

    /// Static then instance fields, each in on-disk order.
    pub fn fields(&self) -> impl Iterator<Item = &EncodedField> {
        self.static_fields.iter().chain(self.instance_fields.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefItem {
    pub class_idx: TypeId,
    pub access_flags: AccessFlags,
    pub superclass_idx: Option<TypeId>,
    pub interfaces: TypeList,
    pub source_file_idx: Option<StringId>,
    /// Raw offsets of sections that are located but not decoded.
    pub annotations_off: u32,
    pub static_values_off: u32,
    pub class_data: Option<ClassDataItem>,
}

impl ClassDefItem
{
    fn read(bytes: &[u8], ix: &mut usize, pools: &PoolSizes) -> Result<ClassDefItem, DexError>
    {
        let class_idx = read_u4(bytes, ix)?;
        check_index(class_idx, pools.types, "class_def type")?;
        let access_flags = AccessFlags::from_bits_retain(read_u4(bytes, ix)?);
        let superclass_idx = check_optional_index(read_u4(bytes, ix)?, pools.types, "superclass type")?;
        let interfaces_off = read_u4(bytes, ix)?;
        let interfaces = if interfaces_off > 0 {
            TypeList::read(bytes, &mut (interfaces_off as usize), pools.types)?
        } else {
            TypeList(vec![])
        };
        let source_file_idx = check_optional_index(read_u4(bytes, ix)?, pools.strings, "source file string")?;
        let annotations_off = read_u4(bytes, ix)?;
        let class_data_off = read_u4(bytes, ix)?;
        let class_data = if class_data_off > 0 {
            Some(ClassDataItem::read(bytes, &mut (class_data_off as usize), pools)?)
        } else {
            None
        };
        let static_values_off = read_u4(bytes, ix)?;

        Ok(ClassDefItem {
            class_idx,
            access_flags,
            superclass_idx,
            interfaces,
            source_file_idx,
            annotations_off,
            static_values_off,
            class_data,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 8],
    pub checksum: u32,
    pub signature: [u8; 20],
    pub file_size: u32,
    pub header_size: u32,
    pub endian_tag: u32,
    pub link_size: u32,
    pub link_off: u32,
    pub map_off: u32,
    pub string_ids_size: u32,
    pub string_ids_off: u32,
    pub type_ids_size: u32,
    pub type_ids_off: u32,
    pub proto_ids_size: u32,
    pub proto_ids_off: u32,
    pub field_ids_size: u32,
    pub field_ids_off: u32,
    pub method_ids_size: u32,
    pub method_ids_off: u32,
    pub class_defs_size: u32,
    pub class_defs_off: u32,
    pub data_size: u32,
    pub data_off: u32,
}

impl Header
{
    pub fn read(bytes: &[u8], ix: &mut usize) -> Result<Header, DexError>
    {
        if bytes.len() < HEADER_SIZE as usize {
            fail!("Not enough bytes for header: {} < {}", bytes.len(), HEADER_SIZE);
        }

        let mut magic = [0u8; 8];
        magic.copy_from_slice(read_x(bytes, ix, 8)?);
        if magic[..4] != DEX_FILE_MAGIC {
            fail!("Invalid magic value");
        }
        let version = Self::parse_version(&magic)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(DexError::unsupported(&format!("dex version {:03}", version)));
        }

        let checksum = read_u4(bytes, ix)?;
        let mut signature = [0u8; 20];
        signature.copy_from_slice(read_x(bytes, ix, 20)?);

        let header = Header {
            magic,
            checksum,
            signature,
            file_size: read_u4(bytes, ix)?,
            header_size: read_u4(bytes, ix)?,
            endian_tag: read_u4(bytes, ix)?,
            link_size: read_u4(bytes, ix)?,
            link_off: read_u4(bytes, ix)?,
            map_off: read_u4(bytes, ix)?,
            string_ids_size: read_u4(bytes, ix)?,
            string_ids_off: read_u4(bytes, ix)?,
            type_ids_size: read_u4(bytes, ix)?,
            type_ids_off: read_u4(bytes, ix)?,
            proto_ids_size: read_u4(bytes, ix)?,
            proto_ids_off: read_u4(bytes, ix)?,
            field_ids_size: read_u4(bytes, ix)?,
            field_ids_off: read_u4(bytes, ix)?,
            method_ids_size: read_u4(bytes, ix)?,
            method_ids_off: read_u4(bytes, ix)?,
            class_defs_size: read_u4(bytes, ix)?,
            class_defs_off: read_u4(bytes, ix)?,
            data_size: read_u4(bytes, ix)?,
            data_off: read_u4(bytes, ix)?,
        };

        match header.endian_tag {
            ENDIAN_CONSTANT => {}
            REVERSE_ENDIAN_CONSTANT => return Err(DexError::unsupported("big-endian dex image")),
            tag => fail!("Invalid endian tag 0x{:08x}", tag),
        }
        if header.header_size != HEADER_SIZE {
            fail!("Invalid header size 0x{:x}", header.header_size);
        }
        if header.file_size as usize > bytes.len() {
            fail!("Header declares {} bytes but only {} are present", header.file_size, bytes.len());
        }
        Ok(header)
    }

    // "dex\n035\0" -> 35
    fn parse_version(magic: &[u8; 8]) -> Result<u32, DexError>
    {
        let digits = &magic[4..7];
        if magic[7] != 0 || !digits.iter().all(u8::is_ascii_digit) {
            fail!("Invalid magic value");
        }
        Ok(digits.iter().fold(0, |acc, d| acc * 10 + (d - b'0') as u32))
    }

    /// Numeric DEX version from the header magic, e.g. 35, 37, 38, 39, 40, 41.
    pub fn version(&self) -> u32 {
        self.magic[4..7].iter().fold(0, |acc, d| acc * 10 + d.wrapping_sub(b'0') as u32)
    }
}

/// A fully decoded DEX image. All cross-pool ids are validated on load,
/// so the accessors only return `None` for ids the caller made up.
#[derive(Debug, Clone)]
pub struct DexFile {
    pub header: Header,
    pub strings: Vec<String>,
    pub types: Vec<StringId>,
    pub prototypes: Vec<PrototypeItem>,
    pub fields: Vec<FieldItem>,
    pub methods: Vec<MethodItem>,
    pub class_defs: Vec<ClassDefItem>,
    pub data: Vec<u8>,
}

impl DexFile {

    fn read(bytes: &[u8], ix: &mut usize, cancel: Option<&CancellationToken>) -> Result<DexFile, DexError>
    {
        let header = Header::read(bytes, ix)?;
        let h = &header;

        // Read the strings
        *ix = section(bytes, h.string_ids_off, h.string_ids_size, 4, "string_ids")?;
        let mut strings = Vec::with_capacity(h.string_ids_size as usize);
        for i in 0..h.string_ids_size {
            let mut string_off = read_u4(bytes, ix)? as usize;
            let s = read_mutf8(bytes, &mut string_off).map_err(|e| err!(e, "string {}", i))?;
            strings.push(s);
        }

        // Read the type_ids
        *ix = section(bytes, h.type_ids_off, h.type_ids_size, 4, "type_ids")?;
        let mut types = Vec::with_capacity(h.type_ids_size as usize);
        for _ in 0..h.type_ids_size {
            let descriptor_idx = read_u4(bytes, ix)?;
            check_index(descriptor_idx, strings.len(), "type descriptor string")?;
            types.push(descriptor_idx);
        }

        // Read the prototypes
        *ix = section(bytes, h.proto_ids_off, h.proto_ids_size, 12, "proto_ids")?;
        let mut prototypes = Vec::with_capacity(h.proto_ids_size as usize);
        for i in 0..h.proto_ids_size {
            let shorty_idx = read_u4(bytes, ix)?;
            check_index(shorty_idx, strings.len(), "proto shorty string")?;
            let return_type_idx = read_u4(bytes, ix)?;
            check_index(return_type_idx, types.len(), "proto return type")?;
            let parameters_off = read_u4(bytes, ix)?;
            let parameters = if parameters_off == 0 {
                TypeList(vec![])
            } else {
                TypeList::read(bytes, &mut (parameters_off as usize), types.len()).map_err(|e| err!(e, "proto {}", i))?
            };
            prototypes.push(PrototypeItem { shorty_idx, return_type_idx, parameters });
        }

        // Read the field ids
        *ix = section(bytes, h.field_ids_off, h.field_ids_size, 8, "field_ids")?;
        let mut fields = Vec::with_capacity(h.field_ids_size as usize);
        for _ in 0..h.field_ids_size {
            let f = FieldItem::read(bytes, ix)?;
            check_index(f.class_idx, types.len(), "field class type")?;
            check_index(f.type_idx, types.len(), "field type")?;
            check_index(f.name_idx, strings.len(), "field name string")?;
            fields.push(f);
        }

        // Read the method ids
        *ix = section(bytes, h.method_ids_off, h.method_ids_size, 8, "method_ids")?;
        let mut methods = Vec::with_capacity(h.method_ids_size as usize);
        for _ in 0..h.method_ids_size {
            let m = MethodItem::read(bytes, ix)?;
            check_index(m.class_idx, types.len(), "method class type")?;
            check_index(m.proto_idx, prototypes.len(), "method proto")?;
            check_index(m.name_idx, strings.len(), "method name string")?;
            methods.push(m);
        }

        // Read the class defs
        let pools = PoolSizes { strings: strings.len(), types: types.len(), fields: fields.len(), methods: methods.len() };
        *ix = section(bytes, h.class_defs_off, h.class_defs_size, 32, "class_defs")?;
        let mut class_defs = Vec::with_capacity(h.class_defs_size as usize);
        let mut seen = HashSet::new();
        for i in 0..h.class_defs_size {
            if is_cancelled(cancel) {
                return Err(DexError::cancelled());
            }
            let class_def = ClassDefItem::read(bytes, ix, &pools).map_err(|e| {
                let name = types.get(i as usize).and_then(|s| strings.get(*s as usize)).map(String::as_str);
                err!(e, "class_def {} ({})", i, name.unwrap_or("?"))
            })?;
            let desc = &strings[types[class_def.class_idx as usize] as usize];
            if !seen.insert(class_def.class_idx) {
                fail!("Duplicate class definition {} in class_def {}", desc, i);
            }
            if let Some(data) = &class_def.class_data {
                if let Some(m) = data.methods().find(|m| methods[m.method_idx as usize].class_idx != class_def.class_idx) {
                    fail!("class_def {} ({}) lists method {} of another class", i, desc, m.method_idx);
                }
                if let Some(f) = data.fields().find(|f| fields[f.field_idx as usize].class_idx != class_def.class_idx) {
                    fail!("class_def {} ({}) lists field {} of another class", i, desc, f.field_idx);
                }
            }
            class_defs.push(class_def);
        }

        debug!(
            "parsed dex {:03}: {} strings, {} types, {} protos, {} fields, {} methods, {} classes",
            header.version(), strings.len(), types.len(), prototypes.len(), fields.len(), methods.len(), class_defs.len()
        );

        Ok(DexFile {
            header,
            strings,
            types,
            prototypes,
            fields,
            methods,
            class_defs,
            data: bytes.to_vec(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<DexFile, DexError>
    {
        DexFile::from_bytes_with(bytes, None)
    }

    /// Parse an image, polling `cancel` between class definitions.
    pub fn from_bytes_with(bytes: &[u8], cancel: Option<&CancellationToken>) -> Result<DexFile, DexError>
    {
        let mut ix = 0;
        DexFile::read(bytes, &mut ix, cancel)
    }

    pub fn from_file(path: &Path) -> Result<DexFile, DexError>
    {
        let bytes = fs::read(path).map_err(|e| DexError::new(&format!("io Error: {}", e)))?;
        DexFile::from_bytes(&bytes)
    }

    pub fn version(&self) -> u32 {
        self.header.version()
    }

    pub fn string(&self, id: StringId) -> Option<&str> {
        self.strings.get(id as usize).map(String::as_str)
    }

    pub fn type_descriptor(&self, id: TypeId) -> Option<&str> {
        self.types.get(id as usize).and_then(|s| self.string(*s))
    }

    /// `(params)ret` descriptor of a prototype.
    pub fn proto_descriptor(&self, id: ProtoId) -> Option<String> {
        let p = self.prototypes.get(id as usize)?;
        let mut s = String::from("(");
        for &t in p.parameters.iter() {
            s.push_str(self.type_descriptor(t)?);
        }
        s.push(')');
        s.push_str(self.type_descriptor(p.return_type_idx)?);
        Some(s)
    }

    pub fn class_name(&self, class_def: &ClassDefItem) -> Option<&str> {
        self.type_descriptor(class_def.class_idx)
    }

    pub fn superclass_name(&self, class_def: &ClassDefItem) -> Option<&str> {
        class_def.superclass_idx.and_then(|t| self.type_descriptor(t))
    }

    pub fn source_file(&self, class_def: &ClassDefItem) -> Option<&str> {
        class_def.source_file_idx.and_then(|s| self.string(s))
    }

    /// Defining class, name and prototype descriptor of a method id.
    pub fn method_parts(&self, id: MethodId) -> Option<(&str, &str, String)> {
        let m = self.methods.get(id as usize)?;
        Some((self.type_descriptor(m.class_idx)?, self.string(m.name_idx)?, self.proto_descriptor(m.proto_idx)?))
    }

    /// `Lpkg/Cls;->name(args)ret`
    pub fn method_dalvik_name(&self, id: MethodId) -> Option<String> {
        let (class, name, proto) = self.method_parts(id)?;
        Some(format!("{}->{}{}", class, name, proto))
    }

    /// Defining class, name and type descriptor of a field id.
    pub fn field_parts(&self, id: FieldId) -> Option<(&str, &str, &str)> {
        let f = self.fields.get(id as usize)?;
        Some((self.type_descriptor(f.class_idx)?, self.string(f.name_idx)?, self.type_descriptor(f.type_idx)?))
    }

    /// `Lpkg/Cls;->name:Type`
    pub fn field_name(&self, id: FieldId) -> Option<String> {
        let (class, name, ty) = self.field_parts(id)?;
        Some(format!("{}->{}:{}", class, name, ty))
    }

    /// Decode a code item belonging to this image.
    pub fn disassemble(&self, code: &CodeItem) -> Result<Vec<Instruction>, DexError> {
        decode(&code.insns, self.version(), self).map_err(|e| err!(e, "code item at 0x{:x}", code.offset))
    }
}

impl RefResolver for DexFile {
    fn string(&self, idx: u32) -> Result<Reference, DexError> {
        match DexFile::string(self, idx) {
            Some(value) => Ok(Reference::String { idx, value: value.to_string() }),
            None => fail!("string index {} out of range", idx),
        }
    }

    fn type_ref(&self, idx: u32) -> Result<Reference, DexError> {
        match self.type_descriptor(idx) {
            Some(d) => Ok(Reference::Type { idx, descriptor: d.to_string() }),
            None => fail!("type index {} out of range", idx),
        }
    }

    fn field_ref(&self, idx: u32) -> Result<Reference, DexError> {
        match self.field_parts(idx) {
            Some((class, name, descriptor)) => Ok(Reference::Field {
                idx,
                class: class.to_string(),
                name: name.to_string(),
                descriptor: descriptor.to_string(),
            }),
            None => fail!("field index {} out of range", idx),
        }
    }

    fn method_ref(&self, idx: u32) -> Result<Reference, DexError> {
        match self.method_parts(idx) {
            Some((class, name, proto)) => Ok(Reference::Method {
                idx,
                class: class.to_string(),
                name: name.to_string(),
                proto,
            }),
            None => fail!("method index {} out of range", idx),
        }
    }

    fn proto(&self, idx: u32) -> Result<Reference, DexError> {
        match self.proto_descriptor(idx) {
            Some(descriptor) => Ok(Reference::Proto { idx, descriptor }),
            None => fail!("proto index {} out of range", idx),
        }
    }

    // Call-site and method-handle sections are not decoded; the index is kept as is.
    fn call_site(&self, idx: u32) -> Result<Reference, DexError> {
        Ok(Reference::CallSite(idx))
    }

    fn method_handle(&self, idx: u32) -> Result<Reference, DexError> {
        Ok(Reference::MethodHandle(idx))
    }
}

//! The Dalvik instruction set as data.
//!
//! One [`Opcode`] per instruction: its value, the DEX versions that define it, its
//! encoding [`Format`], the pool it references and its control-flow flags. Entries
//! introduced after 035 carry `first_version` constraints; the per-version opcode maps
//! in `opcode_format` are built from this table.

use once_cell::sync::Lazy;

use crate::dex::opcode_format::{Format, Opcode, OpcodeFlags, ReferenceType};

/// Every Dalvik opcode, including the payload pseudo-opcodes keyed by their full ident.
pub(crate) static OPCODES: Lazy<Vec<Opcode>> = Lazy::new(|| {
    vec![
        // NOP
        Opcode::new(
            Opcode::all_versions(0x00),
            "nop",
            ReferenceType::None,
            None,
            Format::Format10x,
            OpcodeFlags::CAN_CONTINUE,
        ),
        // MOVE
        Opcode::new(
            Opcode::all_versions(0x01),
            "move",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MOVE_FROM16
        Opcode::new(
            Opcode::all_versions(0x02),
            "move/from16",
            ReferenceType::None,
            None,
            Format::Format22x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MOVE_16
        Opcode::new(
            Opcode::all_versions(0x03),
            "move/16",
            ReferenceType::None,
            None,
            Format::Format32x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MOVE_WIDE
        Opcode::new(
            Opcode::all_versions(0x04),
            "move-wide",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // MOVE_WIDE_FROM16
        Opcode::new(
            Opcode::all_versions(0x05),
            "move-wide/from16",
            ReferenceType::None,
            None,
            Format::Format22x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // MOVE_WIDE_16
        Opcode::new(
            Opcode::all_versions(0x06),
            "move-wide/16",
            ReferenceType::None,
            None,
            Format::Format32x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // MOVE_OBJECT
        Opcode::new(
            Opcode::all_versions(0x07),
            "move-object",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MOVE_OBJECT_FROM16
        Opcode::new(
            Opcode::all_versions(0x08),
            "move-object/from16",
            ReferenceType::None,
            None,
            Format::Format22x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MOVE_OBJECT_16
        Opcode::new(
            Opcode::all_versions(0x09),
            "move-object/16",
            ReferenceType::None,
            None,
            Format::Format32x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MOVE_RESULT
        Opcode::new(
            Opcode::all_versions(0x0a),
            "move-result",
            ReferenceType::None,
            None,
            Format::Format11x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MOVE_RESULT_WIDE
        Opcode::new(
            Opcode::all_versions(0x0b),
            "move-result-wide",
            ReferenceType::None,
            None,
            Format::Format11x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // MOVE_RESULT_OBJECT
        Opcode::new(
            Opcode::all_versions(0x0c),
            "move-result-object",
            ReferenceType::None,
            None,
            Format::Format11x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MOVE_EXCEPTION
        Opcode::new(
            Opcode::all_versions(0x0d),
            "move-exception",
            ReferenceType::None,
            None,
            Format::Format11x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // RETURN_VOID
        Opcode::new_no_flags(
            Opcode::all_versions(0x0e),
            "return-void",
            ReferenceType::None,
            Format::Format10x,
        ),
        // RETURN
        Opcode::new_no_flags(
            Opcode::all_versions(0x0f),
            "return",
            ReferenceType::None,
            Format::Format11x,
        ),
        // RETURN_WIDE
        Opcode::new_no_flags(
            Opcode::all_versions(0x10),
            "return-wide",
            ReferenceType::None,
            Format::Format11x,
        ),
        // RETURN_OBJECT
        Opcode::new_no_flags(
            Opcode::all_versions(0x11),
            "return-object",
            ReferenceType::None,
            Format::Format11x,
        ),
        // CONST_4
        Opcode::new(
            Opcode::all_versions(0x12),
            "const/4",
            ReferenceType::None,
            None,
            Format::Format11n,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // CONST_16
        Opcode::new(
            Opcode::all_versions(0x13),
            "const/16",
            ReferenceType::None,
            None,
            Format::Format21s,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // CONST
        Opcode::new(
            Opcode::all_versions(0x14),
            "const",
            ReferenceType::None,
            None,
            Format::Format31i,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // CONST_HIGH16
        Opcode::new(
            Opcode::all_versions(0x15),
            "const/high16",
            ReferenceType::None,
            None,
            Format::Format21ih,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // CONST_WIDE_16
        Opcode::new(
            Opcode::all_versions(0x16),
            "const-wide/16",
            ReferenceType::None,
            None,
            Format::Format21s,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // CONST_WIDE_32
        Opcode::new(
            Opcode::all_versions(0x17),
            "const-wide/32",
            ReferenceType::None,
            None,
            Format::Format31i,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // CONST_WIDE
        Opcode::new(
            Opcode::all_versions(0x18),
            "const-wide",
            ReferenceType::None,
            None,
            Format::Format51l,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // CONST_WIDE_HIGH16
        Opcode::new(
            Opcode::all_versions(0x19),
            "const-wide/high16",
            ReferenceType::None,
            None,
            Format::Format21lh,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // CONST_STRING
        Opcode::new(
            Opcode::all_versions(0x1a),
            "const-string",
            ReferenceType::String,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // CONST_STRING_JUMBO
        Opcode::new(
            Opcode::all_versions(0x1b),
            "const-string/jumbo",
            ReferenceType::String,
            None,
            Format::Format31c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // CONST_CLASS
        Opcode::new(
            Opcode::all_versions(0x1c),
            "const-class",
            ReferenceType::Type,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MONITOR_ENTER
        Opcode::new(
            Opcode::all_versions(0x1d),
            "monitor-enter",
            ReferenceType::None,
            None,
            Format::Format11x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE,
        ),
        // MONITOR_EXIT
        Opcode::new(
            Opcode::all_versions(0x1e),
            "monitor-exit",
            ReferenceType::None,
            None,
            Format::Format11x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE,
        ),
        // CHECK_CAST
        Opcode::new(
            Opcode::all_versions(0x1f),
            "check-cast",
            ReferenceType::Type,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // INSTANCE_OF
        Opcode::new(
            Opcode::all_versions(0x20),
            "instance-of",
            ReferenceType::Type,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // ARRAY_LENGTH
        Opcode::new(
            Opcode::all_versions(0x21),
            "array-length",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // NEW_INSTANCE
        Opcode::new(
            Opcode::all_versions(0x22),
            "new-instance",
            ReferenceType::Type,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // NEW_ARRAY
        Opcode::new(
            Opcode::all_versions(0x23),
            "new-array",
            ReferenceType::Type,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // FILLED_NEW_ARRAY
        Opcode::new(
            Opcode::all_versions(0x24),
            "filled-new-array",
            ReferenceType::Type,
            None,
            Format::Format35c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT,
        ),
        // FILLED_NEW_ARRAY_RANGE
        Opcode::new(
            Opcode::all_versions(0x25),
            "filled-new-array/range",
            ReferenceType::Type,
            None,
            Format::Format3rc,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT,
        ),
        // FILL_ARRAY_DATA
        Opcode::new(
            Opcode::all_versions(0x26),
            "fill-array-data",
            ReferenceType::None,
            None,
            Format::Format31t,
            OpcodeFlags::CAN_CONTINUE,
        ),
        // THROW
        Opcode::new(
            Opcode::all_versions(0x27),
            "throw",
            ReferenceType::None,
            None,
            Format::Format11x,
            OpcodeFlags::CAN_THROW,
        ),
        // GOTO
        Opcode::new(
            Opcode::all_versions(0x28),
            "goto",
            ReferenceType::None,
            None,
            Format::Format10t,
            OpcodeFlags::BRANCH,
        ),
        // GOTO_16
        Opcode::new(
            Opcode::all_versions(0x29),
            "goto/16",
            ReferenceType::None,
            None,
            Format::Format20t,
            OpcodeFlags::BRANCH,
        ),
        // GOTO_32
        Opcode::new(
            Opcode::all_versions(0x2a),
            "goto/32",
            ReferenceType::None,
            None,
            Format::Format30t,
            OpcodeFlags::BRANCH,
        ),
        // PACKED_SWITCH
        Opcode::new(
            Opcode::all_versions(0x2b),
            "packed-switch",
            ReferenceType::None,
            None,
            Format::Format31t,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::BRANCH,
        ),
        // SPARSE_SWITCH
        Opcode::new(
            Opcode::all_versions(0x2c),
            "sparse-switch",
            ReferenceType::None,
            None,
            Format::Format31t,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::BRANCH,
        ),
        // CMPL_FLOAT
        Opcode::new(
            Opcode::all_versions(0x2d),
            "cmpl-float",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // CMPG_FLOAT
        Opcode::new(
            Opcode::all_versions(0x2e),
            "cmpg-float",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // CMPL_DOUBLE
        Opcode::new(
            Opcode::all_versions(0x2f),
            "cmpl-double",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // CMPG_DOUBLE
        Opcode::new(
            Opcode::all_versions(0x30),
            "cmpg-double",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // CMP_LONG
        Opcode::new(
            Opcode::all_versions(0x31),
            "cmp-long",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // IF_EQ
        Opcode::new(
            Opcode::all_versions(0x32),
            "if-eq",
            ReferenceType::None,
            None,
            Format::Format22t,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::BRANCH,
        ),
        // IF_NE
        Opcode::new(
            Opcode::all_versions(0x33),
            "if-ne",
            ReferenceType::None,
            None,
            Format::Format22t,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::BRANCH,
        ),
        // IF_LT
        Opcode::new(
            Opcode::all_versions(0x34),
            "if-lt",
            ReferenceType::None,
            None,
            Format::Format22t,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::BRANCH,
        ),
        // IF_GE
        Opcode::new(
            Opcode::all_versions(0x35),
            "if-ge",
            ReferenceType::None,
            None,
            Format::Format22t,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::BRANCH,
        ),
        // IF_GT
        Opcode::new(
            Opcode::all_versions(0x36),
            "if-gt",
            ReferenceType::None,
            None,
            Format::Format22t,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::BRANCH,
        ),
        // IF_LE
        Opcode::new(
            Opcode::all_versions(0x37),
            "if-le",
            ReferenceType::None,
            None,
            Format::Format22t,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::BRANCH,
        ),
        // IF_EQZ
        Opcode::new(
            Opcode::all_versions(0x38),
            "if-eqz",
            ReferenceType::None,
            None,
            Format::Format21t,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::BRANCH,
        ),
        // IF_NEZ
        Opcode::new(
            Opcode::all_versions(0x39),
            "if-nez",
            ReferenceType::None,
            None,
            Format::Format21t,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::BRANCH,
        ),
        // IF_LTZ
        Opcode::new(
            Opcode::all_versions(0x3a),
            "if-ltz",
            ReferenceType::None,
            None,
            Format::Format21t,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::BRANCH,
        ),
        // IF_GEZ
        Opcode::new(
            Opcode::all_versions(0x3b),
            "if-gez",
            ReferenceType::None,
            None,
            Format::Format21t,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::BRANCH,
        ),
        // IF_GTZ
        Opcode::new(
            Opcode::all_versions(0x3c),
            "if-gtz",
            ReferenceType::None,
            None,
            Format::Format21t,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::BRANCH,
        ),
        // IF_LEZ
        Opcode::new(
            Opcode::all_versions(0x3d),
            "if-lez",
            ReferenceType::None,
            None,
            Format::Format21t,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::BRANCH,
        ),
        // AGET
        Opcode::new(
            Opcode::all_versions(0x44),
            "aget",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // AGET_WIDE
        Opcode::new(
            Opcode::all_versions(0x45),
            "aget-wide",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // AGET_OBJECT
        Opcode::new(
            Opcode::all_versions(0x46),
            "aget-object",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // AGET_BOOLEAN
        Opcode::new(
            Opcode::all_versions(0x47),
            "aget-boolean",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // AGET_BYTE
        Opcode::new(
            Opcode::all_versions(0x48),
            "aget-byte",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // AGET_CHAR
        Opcode::new(
            Opcode::all_versions(0x49),
            "aget-char",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // AGET_SHORT
        Opcode::new(
            Opcode::all_versions(0x4a),
            "aget-short",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // APUT
        Opcode::new(
            Opcode::all_versions(0x4b),
            "aput",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE,
        ),
        // APUT_WIDE
        Opcode::new(
            Opcode::all_versions(0x4c),
            "aput-wide",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE,
        ),
        // APUT_OBJECT
        Opcode::new(
            Opcode::all_versions(0x4d),
            "aput-object",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE,
        ),
        // APUT_BOOLEAN
        Opcode::new(
            Opcode::all_versions(0x4e),
            "aput-boolean",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE,
        ),
        // APUT_BYTE
        Opcode::new(
            Opcode::all_versions(0x4f),
            "aput-byte",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE,
        ),
        // APUT_CHAR
        Opcode::new(
            Opcode::all_versions(0x50),
            "aput-char",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE,
        ),
        // APUT_SHORT
        Opcode::new(
            Opcode::all_versions(0x51),
            "aput-short",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE,
        ),
        // IGET
        Opcode::new(
            Opcode::all_versions(0x52),
            "iget",
            ReferenceType::Field,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::FIELD_READ,
        ),
        // IGET_WIDE
        Opcode::new(
            Opcode::all_versions(0x53),
            "iget-wide",
            ReferenceType::Field,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::FIELD_READ | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // IGET_OBJECT
        Opcode::new(
            Opcode::all_versions(0x54),
            "iget-object",
            ReferenceType::Field,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::FIELD_READ,
        ),
        // IGET_BOOLEAN
        Opcode::new(
            Opcode::all_versions(0x55),
            "iget-boolean",
            ReferenceType::Field,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::FIELD_READ,
        ),
        // IGET_BYTE
        Opcode::new(
            Opcode::all_versions(0x56),
            "iget-byte",
            ReferenceType::Field,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::FIELD_READ,
        ),
        // IGET_CHAR
        Opcode::new(
            Opcode::all_versions(0x57),
            "iget-char",
            ReferenceType::Field,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::FIELD_READ,
        ),
        // IGET_SHORT
        Opcode::new(
            Opcode::all_versions(0x58),
            "iget-short",
            ReferenceType::Field,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::FIELD_READ,
        ),
        // IPUT
        Opcode::new(
            Opcode::all_versions(0x59),
            "iput",
            ReferenceType::Field,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::FIELD_WRITE,
        ),
        // IPUT_WIDE
        Opcode::new(
            Opcode::all_versions(0x5a),
            "iput-wide",
            ReferenceType::Field,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::FIELD_WRITE,
        ),
        // IPUT_OBJECT
        Opcode::new(
            Opcode::all_versions(0x5b),
            "iput-object",
            ReferenceType::Field,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::FIELD_WRITE,
        ),
        // IPUT_BOOLEAN
        Opcode::new(
            Opcode::all_versions(0x5c),
            "iput-boolean",
            ReferenceType::Field,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::FIELD_WRITE,
        ),
        // IPUT_BYTE
        Opcode::new(
            Opcode::all_versions(0x5d),
            "iput-byte",
            ReferenceType::Field,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::FIELD_WRITE,
        ),
        // IPUT_CHAR
        Opcode::new(
            Opcode::all_versions(0x5e),
            "iput-char",
            ReferenceType::Field,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::FIELD_WRITE,
        ),
        // IPUT_SHORT
        Opcode::new(
            Opcode::all_versions(0x5f),
            "iput-short",
            ReferenceType::Field,
            None,
            Format::Format22c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::FIELD_WRITE,
        ),
        // SGET
        Opcode::new(
            Opcode::all_versions(0x60),
            "sget",
            ReferenceType::Field,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::STATIC_FIELD_ACCESSOR | OpcodeFlags::FIELD_READ,
        ),
        // SGET_WIDE
        Opcode::new(
            Opcode::all_versions(0x61),
            "sget-wide",
            ReferenceType::Field,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::STATIC_FIELD_ACCESSOR | OpcodeFlags::FIELD_READ | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // SGET_OBJECT
        Opcode::new(
            Opcode::all_versions(0x62),
            "sget-object",
            ReferenceType::Field,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::STATIC_FIELD_ACCESSOR | OpcodeFlags::FIELD_READ,
        ),
        // SGET_BOOLEAN
        Opcode::new(
            Opcode::all_versions(0x63),
            "sget-boolean",
            ReferenceType::Field,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::STATIC_FIELD_ACCESSOR | OpcodeFlags::FIELD_READ,
        ),
        // SGET_BYTE
        Opcode::new(
            Opcode::all_versions(0x64),
            "sget-byte",
            ReferenceType::Field,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::STATIC_FIELD_ACCESSOR | OpcodeFlags::FIELD_READ,
        ),
        // SGET_CHAR
        Opcode::new(
            Opcode::all_versions(0x65),
            "sget-char",
            ReferenceType::Field,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::STATIC_FIELD_ACCESSOR | OpcodeFlags::FIELD_READ,
        ),
        // SGET_SHORT
        Opcode::new(
            Opcode::all_versions(0x66),
            "sget-short",
            ReferenceType::Field,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::STATIC_FIELD_ACCESSOR | OpcodeFlags::FIELD_READ,
        ),
        // SPUT
        Opcode::new(
            Opcode::all_versions(0x67),
            "sput",
            ReferenceType::Field,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::STATIC_FIELD_ACCESSOR | OpcodeFlags::FIELD_WRITE,
        ),
        // SPUT_WIDE
        Opcode::new(
            Opcode::all_versions(0x68),
            "sput-wide",
            ReferenceType::Field,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::STATIC_FIELD_ACCESSOR | OpcodeFlags::FIELD_WRITE,
        ),
        // SPUT_OBJECT
        Opcode::new(
            Opcode::all_versions(0x69),
            "sput-object",
            ReferenceType::Field,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::STATIC_FIELD_ACCESSOR | OpcodeFlags::FIELD_WRITE,
        ),
        // SPUT_BOOLEAN
        Opcode::new(
            Opcode::all_versions(0x6a),
            "sput-boolean",
            ReferenceType::Field,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::STATIC_FIELD_ACCESSOR | OpcodeFlags::FIELD_WRITE,
        ),
        // SPUT_BYTE
        Opcode::new(
            Opcode::all_versions(0x6b),
            "sput-byte",
            ReferenceType::Field,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::STATIC_FIELD_ACCESSOR | OpcodeFlags::FIELD_WRITE,
        ),
        // SPUT_CHAR
        Opcode::new(
            Opcode::all_versions(0x6c),
            "sput-char",
            ReferenceType::Field,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::STATIC_FIELD_ACCESSOR | OpcodeFlags::FIELD_WRITE,
        ),
        // SPUT_SHORT
        Opcode::new(
            Opcode::all_versions(0x6d),
            "sput-short",
            ReferenceType::Field,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::STATIC_FIELD_ACCESSOR | OpcodeFlags::FIELD_WRITE,
        ),
        // INVOKE_VIRTUAL
        Opcode::new(
            Opcode::all_versions(0x6e),
            "invoke-virtual",
            ReferenceType::Method,
            None,
            Format::Format35c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT | OpcodeFlags::INVOKE,
        ),
        // INVOKE_SUPER
        Opcode::new(
            Opcode::all_versions(0x6f),
            "invoke-super",
            ReferenceType::Method,
            None,
            Format::Format35c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT | OpcodeFlags::INVOKE,
        ),
        // INVOKE_DIRECT
        Opcode::new(
            Opcode::all_versions(0x70),
            "invoke-direct",
            ReferenceType::Method,
            None,
            Format::Format35c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT | OpcodeFlags::INVOKE | OpcodeFlags::CAN_INITIALIZE_REFERENCE,
        ),
        // INVOKE_STATIC
        Opcode::new(
            Opcode::all_versions(0x71),
            "invoke-static",
            ReferenceType::Method,
            None,
            Format::Format35c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT | OpcodeFlags::INVOKE,
        ),
        // INVOKE_INTERFACE
        Opcode::new(
            Opcode::all_versions(0x72),
            "invoke-interface",
            ReferenceType::Method,
            None,
            Format::Format35c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT | OpcodeFlags::INVOKE,
        ),
        // INVOKE_VIRTUAL_RANGE
        Opcode::new(
            Opcode::all_versions(0x74),
            "invoke-virtual/range",
            ReferenceType::Method,
            None,
            Format::Format3rc,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT | OpcodeFlags::INVOKE,
        ),
        // INVOKE_SUPER_RANGE
        Opcode::new(
            Opcode::all_versions(0x75),
            "invoke-super/range",
            ReferenceType::Method,
            None,
            Format::Format3rc,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT | OpcodeFlags::INVOKE,
        ),
        // INVOKE_DIRECT_RANGE
        Opcode::new(
            Opcode::all_versions(0x76),
            "invoke-direct/range",
            ReferenceType::Method,
            None,
            Format::Format3rc,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT | OpcodeFlags::INVOKE | OpcodeFlags::CAN_INITIALIZE_REFERENCE,
        ),
        // INVOKE_STATIC_RANGE
        Opcode::new(
            Opcode::all_versions(0x77),
            "invoke-static/range",
            ReferenceType::Method,
            None,
            Format::Format3rc,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT | OpcodeFlags::INVOKE,
        ),
        // INVOKE_INTERFACE_RANGE
        Opcode::new(
            Opcode::all_versions(0x78),
            "invoke-interface/range",
            ReferenceType::Method,
            None,
            Format::Format3rc,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT | OpcodeFlags::INVOKE,
        ),
        // NEG_INT
        Opcode::new(
            Opcode::all_versions(0x7b),
            "neg-int",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // NOT_INT
        Opcode::new(
            Opcode::all_versions(0x7c),
            "not-int",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // NEG_LONG
        Opcode::new(
            Opcode::all_versions(0x7d),
            "neg-long",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // NOT_LONG
        Opcode::new(
            Opcode::all_versions(0x7e),
            "not-long",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // NEG_FLOAT
        Opcode::new(
            Opcode::all_versions(0x7f),
            "neg-float",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // NEG_DOUBLE
        Opcode::new(
            Opcode::all_versions(0x80),
            "neg-double",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // INT_TO_LONG
        Opcode::new(
            Opcode::all_versions(0x81),
            "int-to-long",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // INT_TO_FLOAT
        Opcode::new(
            Opcode::all_versions(0x82),
            "int-to-float",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // INT_TO_DOUBLE
        Opcode::new(
            Opcode::all_versions(0x83),
            "int-to-double",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // LONG_TO_INT
        Opcode::new(
            Opcode::all_versions(0x84),
            "long-to-int",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // LONG_TO_FLOAT
        Opcode::new(
            Opcode::all_versions(0x85),
            "long-to-float",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // LONG_TO_DOUBLE
        Opcode::new(
            Opcode::all_versions(0x86),
            "long-to-double",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // FLOAT_TO_INT
        Opcode::new(
            Opcode::all_versions(0x87),
            "float-to-int",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // FLOAT_TO_LONG
        Opcode::new(
            Opcode::all_versions(0x88),
            "float-to-long",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // FLOAT_TO_DOUBLE
        Opcode::new(
            Opcode::all_versions(0x89),
            "float-to-double",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // DOUBLE_TO_INT
        Opcode::new(
            Opcode::all_versions(0x8a),
            "double-to-int",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // DOUBLE_TO_LONG
        Opcode::new(
            Opcode::all_versions(0x8b),
            "double-to-long",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // DOUBLE_TO_FLOAT
        Opcode::new(
            Opcode::all_versions(0x8c),
            "double-to-float",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // INT_TO_BYTE
        Opcode::new(
            Opcode::all_versions(0x8d),
            "int-to-byte",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // INT_TO_CHAR
        Opcode::new(
            Opcode::all_versions(0x8e),
            "int-to-char",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // INT_TO_SHORT
        Opcode::new(
            Opcode::all_versions(0x8f),
            "int-to-short",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // ADD_INT
        Opcode::new(
            Opcode::all_versions(0x90),
            "add-int",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // SUB_INT
        Opcode::new(
            Opcode::all_versions(0x91),
            "sub-int",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MUL_INT
        Opcode::new(
            Opcode::all_versions(0x92),
            "mul-int",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // DIV_INT
        Opcode::new(
            Opcode::all_versions(0x93),
            "div-int",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // REM_INT
        Opcode::new(
            Opcode::all_versions(0x94),
            "rem-int",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // AND_INT
        Opcode::new(
            Opcode::all_versions(0x95),
            "and-int",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // OR_INT
        Opcode::new(
            Opcode::all_versions(0x96),
            "or-int",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // XOR_INT
        Opcode::new(
            Opcode::all_versions(0x97),
            "xor-int",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // SHL_INT
        Opcode::new(
            Opcode::all_versions(0x98),
            "shl-int",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // SHR_INT
        Opcode::new(
            Opcode::all_versions(0x99),
            "shr-int",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // USHR_INT
        Opcode::new(
            Opcode::all_versions(0x9a),
            "ushr-int",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // ADD_LONG
        Opcode::new(
            Opcode::all_versions(0x9b),
            "add-long",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // SUB_LONG
        Opcode::new(
            Opcode::all_versions(0x9c),
            "sub-long",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // MUL_LONG
        Opcode::new(
            Opcode::all_versions(0x9d),
            "mul-long",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // DIV_LONG
        Opcode::new(
            Opcode::all_versions(0x9e),
            "div-long",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // REM_LONG
        Opcode::new(
            Opcode::all_versions(0x9f),
            "rem-long",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // AND_LONG
        Opcode::new(
            Opcode::all_versions(0xa0),
            "and-long",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // OR_LONG
        Opcode::new(
            Opcode::all_versions(0xa1),
            "or-long",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // XOR_LONG
        Opcode::new(
            Opcode::all_versions(0xa2),
            "xor-long",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // SHL_LONG
        Opcode::new(
            Opcode::all_versions(0xa3),
            "shl-long",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // SHR_LONG
        Opcode::new(
            Opcode::all_versions(0xa4),
            "shr-long",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // USHR_LONG
        Opcode::new(
            Opcode::all_versions(0xa5),
            "ushr-long",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // ADD_FLOAT
        Opcode::new(
            Opcode::all_versions(0xa6),
            "add-float",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // SUB_FLOAT
        Opcode::new(
            Opcode::all_versions(0xa7),
            "sub-float",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MUL_FLOAT
        Opcode::new(
            Opcode::all_versions(0xa8),
            "mul-float",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // DIV_FLOAT
        Opcode::new(
            Opcode::all_versions(0xa9),
            "div-float",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // REM_FLOAT
        Opcode::new(
            Opcode::all_versions(0xaa),
            "rem-float",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // ADD_DOUBLE
        Opcode::new(
            Opcode::all_versions(0xab),
            "add-double",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // SUB_DOUBLE
        Opcode::new(
            Opcode::all_versions(0xac),
            "sub-double",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // MUL_DOUBLE
        Opcode::new(
            Opcode::all_versions(0xad),
            "mul-double",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // DIV_DOUBLE
        Opcode::new(
            Opcode::all_versions(0xae),
            "div-double",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // REM_DOUBLE
        Opcode::new(
            Opcode::all_versions(0xaf),
            "rem-double",
            ReferenceType::None,
            None,
            Format::Format23x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // ADD_INT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xb0),
            "add-int/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // SUB_INT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xb1),
            "sub-int/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MUL_INT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xb2),
            "mul-int/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // DIV_INT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xb3),
            "div-int/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // REM_INT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xb4),
            "rem-int/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // AND_INT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xb5),
            "and-int/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // OR_INT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xb6),
            "or-int/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // XOR_INT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xb7),
            "xor-int/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // SHL_INT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xb8),
            "shl-int/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // SHR_INT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xb9),
            "shr-int/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // USHR_INT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xba),
            "ushr-int/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // ADD_LONG_2ADDR
        Opcode::new(
            Opcode::all_versions(0xbb),
            "add-long/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // SUB_LONG_2ADDR
        Opcode::new(
            Opcode::all_versions(0xbc),
            "sub-long/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // MUL_LONG_2ADDR
        Opcode::new(
            Opcode::all_versions(0xbd),
            "mul-long/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // DIV_LONG_2ADDR
        Opcode::new(
            Opcode::all_versions(0xbe),
            "div-long/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // REM_LONG_2ADDR
        Opcode::new(
            Opcode::all_versions(0xbf),
            "rem-long/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // AND_LONG_2ADDR
        Opcode::new(
            Opcode::all_versions(0xc0),
            "and-long/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // OR_LONG_2ADDR
        Opcode::new(
            Opcode::all_versions(0xc1),
            "or-long/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // XOR_LONG_2ADDR
        Opcode::new(
            Opcode::all_versions(0xc2),
            "xor-long/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // SHL_LONG_2ADDR
        Opcode::new(
            Opcode::all_versions(0xc3),
            "shl-long/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // SHR_LONG_2ADDR
        Opcode::new(
            Opcode::all_versions(0xc4),
            "shr-long/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // USHR_LONG_2ADDR
        Opcode::new(
            Opcode::all_versions(0xc5),
            "ushr-long/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // ADD_FLOAT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xc6),
            "add-float/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // SUB_FLOAT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xc7),
            "sub-float/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MUL_FLOAT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xc8),
            "mul-float/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // DIV_FLOAT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xc9),
            "div-float/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // REM_FLOAT_2ADDR
        Opcode::new(
            Opcode::all_versions(0xca),
            "rem-float/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // ADD_DOUBLE_2ADDR
        Opcode::new(
            Opcode::all_versions(0xcb),
            "add-double/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // SUB_DOUBLE_2ADDR
        Opcode::new(
            Opcode::all_versions(0xcc),
            "sub-double/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // MUL_DOUBLE_2ADDR
        Opcode::new(
            Opcode::all_versions(0xcd),
            "mul-double/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // DIV_DOUBLE_2ADDR
        Opcode::new(
            Opcode::all_versions(0xce),
            "div-double/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // REM_DOUBLE_2ADDR
        Opcode::new(
            Opcode::all_versions(0xcf),
            "rem-double/2addr",
            ReferenceType::None,
            None,
            Format::Format12x,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER | OpcodeFlags::SETS_WIDE_REGISTER,
        ),
        // ADD_INT_LIT16
        Opcode::new(
            Opcode::all_versions(0xd0),
            "add-int/lit16",
            ReferenceType::None,
            None,
            Format::Format22s,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // RSUB_INT
        Opcode::new(
            Opcode::all_versions(0xd1),
            "rsub-int",
            ReferenceType::None,
            None,
            Format::Format22s,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MUL_INT_LIT16
        Opcode::new(
            Opcode::all_versions(0xd2),
            "mul-int/lit16",
            ReferenceType::None,
            None,
            Format::Format22s,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // DIV_INT_LIT16
        Opcode::new(
            Opcode::all_versions(0xd3),
            "div-int/lit16",
            ReferenceType::None,
            None,
            Format::Format22s,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // REM_INT_LIT16
        Opcode::new(
            Opcode::all_versions(0xd4),
            "rem-int/lit16",
            ReferenceType::None,
            None,
            Format::Format22s,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // AND_INT_LIT16
        Opcode::new(
            Opcode::all_versions(0xd5),
            "and-int/lit16",
            ReferenceType::None,
            None,
            Format::Format22s,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // OR_INT_LIT16
        Opcode::new(
            Opcode::all_versions(0xd6),
            "or-int/lit16",
            ReferenceType::None,
            None,
            Format::Format22s,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // XOR_INT_LIT16
        Opcode::new(
            Opcode::all_versions(0xd7),
            "xor-int/lit16",
            ReferenceType::None,
            None,
            Format::Format22s,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // ADD_INT_LIT8
        Opcode::new(
            Opcode::all_versions(0xd8),
            "add-int/lit8",
            ReferenceType::None,
            None,
            Format::Format22b,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // RSUB_INT_LIT8
        Opcode::new(
            Opcode::all_versions(0xd9),
            "rsub-int/lit8",
            ReferenceType::None,
            None,
            Format::Format22b,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // MUL_INT_LIT8
        Opcode::new(
            Opcode::all_versions(0xda),
            "mul-int/lit8",
            ReferenceType::None,
            None,
            Format::Format22b,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // DIV_INT_LIT8
        Opcode::new(
            Opcode::all_versions(0xdb),
            "div-int/lit8",
            ReferenceType::None,
            None,
            Format::Format22b,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // REM_INT_LIT8
        Opcode::new(
            Opcode::all_versions(0xdc),
            "rem-int/lit8",
            ReferenceType::None,
            None,
            Format::Format22b,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // AND_INT_LIT8
        Opcode::new(
            Opcode::all_versions(0xdd),
            "and-int/lit8",
            ReferenceType::None,
            None,
            Format::Format22b,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // OR_INT_LIT8
        Opcode::new(
            Opcode::all_versions(0xde),
            "or-int/lit8",
            ReferenceType::None,
            None,
            Format::Format22b,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // XOR_INT_LIT8
        Opcode::new(
            Opcode::all_versions(0xdf),
            "xor-int/lit8",
            ReferenceType::None,
            None,
            Format::Format22b,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // SHL_INT_LIT8
        Opcode::new(
            Opcode::all_versions(0xe0),
            "shl-int/lit8",
            ReferenceType::None,
            None,
            Format::Format22b,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // SHR_INT_LIT8
        Opcode::new(
            Opcode::all_versions(0xe1),
            "shr-int/lit8",
            ReferenceType::None,
            None,
            Format::Format22b,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // USHR_INT_LIT8
        Opcode::new(
            Opcode::all_versions(0xe2),
            "ushr-int/lit8",
            ReferenceType::None,
            None,
            Format::Format22b,
            OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // INVOKE_POLYMORPHIC
        Opcode::new(
            Opcode::first_version(0xfa, 38),
            "invoke-polymorphic",
            ReferenceType::Method,
            Some(ReferenceType::MethodProto),
            Format::Format45cc,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT | OpcodeFlags::INVOKE,
        ),
        // INVOKE_POLYMORPHIC_RANGE
        Opcode::new(
            Opcode::first_version(0xfb, 38),
            "invoke-polymorphic/range",
            ReferenceType::Method,
            Some(ReferenceType::MethodProto),
            Format::Format4rcc,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT | OpcodeFlags::INVOKE,
        ),
        // INVOKE_CUSTOM
        Opcode::new(
            Opcode::first_version(0xfc, 38),
            "invoke-custom",
            ReferenceType::CallSite,
            None,
            Format::Format35c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT,
        ),
        // INVOKE_CUSTOM_RANGE
        Opcode::new(
            Opcode::first_version(0xfd, 38),
            "invoke-custom/range",
            ReferenceType::CallSite,
            None,
            Format::Format3rc,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_RESULT,
        ),
        // CONST_METHOD_HANDLE
        Opcode::new(
            Opcode::first_version(0xfe, 39),
            "const-method-handle",
            ReferenceType::MethodHandle,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // CONST_METHOD_TYPE
        Opcode::new(
            Opcode::first_version(0xff, 39),
            "const-method-type",
            ReferenceType::MethodProto,
            None,
            Format::Format21c,
            OpcodeFlags::CAN_THROW | OpcodeFlags::CAN_CONTINUE | OpcodeFlags::SETS_REGISTER,
        ),
        // PACKED_SWITCH_PAYLOAD
        Opcode::new_no_flags(
            Opcode::all_versions(0x100),
            "packed-switch-payload",
            ReferenceType::None,
            Format::PackedSwitchPayload,
        ),
        // SPARSE_SWITCH_PAYLOAD
        Opcode::new_no_flags(
            Opcode::all_versions(0x200),
            "sparse-switch-payload",
            ReferenceType::None,
            Format::SparseSwitchPayload,
        ),
        // ARRAY_PAYLOAD
        Opcode::new_no_flags(
            Opcode::all_versions(0x300),
            "array-payload",
            ReferenceType::None,
            Format::ArrayPayload,
        )
    ]
});

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::dex::opcode_format::get_opcode_map;

    #[test]
    fn opcode_values_are_unique_per_version() {
        for version in [35, 37, 38, 39, 40, 41] {
            let mut seen = HashSet::new();
            for o in OPCODES.iter() {
                if let Some(v) = o.get_opcode_value(version) {
                    assert!(seen.insert(v), "duplicate opcode value 0x{:x} in {:03}", v, version);
                }
            }
        }
    }

    #[test]
    fn unused_ranges_are_absent() {
        let map = get_opcode_map(41);
        for unused in (0x3e..=0x43).chain([0x73, 0x79, 0x7a]).chain(0xe3..=0xf9) {
            assert!(!map.contains_key(&unused), "0x{:x} should be unused", unused);
        }
        assert_eq!(map.len(), 256 - 6 - 3 - 23 + 3);
        assert_eq!(get_opcode_map(35).len(), map.len() - 6);
    }

    #[test]
    fn field_and_invoke_flags() {
        let map = get_opcode_map(35);
        assert!(map[&0x52].flags.contains(OpcodeFlags::FIELD_READ));
        assert!(map[&0x67].flags.contains(OpcodeFlags::FIELD_WRITE | OpcodeFlags::STATIC_FIELD_ACCESSOR));
        assert!(map[&0x71].is_invoke());
        assert_eq!(map[&0x22].name, "new-instance");
        assert_eq!(map[&0x22].reference_type, ReferenceType::Type);
    }
}

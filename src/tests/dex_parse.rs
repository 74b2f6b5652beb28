use crate::dex::dex_file::{AccessFlags, Header};
use crate::dex::{DexErrorKind, DexFile};
use crate::options::CancellationToken;
use crate::tests::fixture::*;

fn put_u4_at(bytes: &mut [u8], at: usize, v: u32) {
    bytes[at..at + 4].copy_from_slice(&v.to_le_bytes());
}

fn u4_at(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[test]
fn parses_header_and_pools() {
    let bytes = main_run_scenario().build();
    let mut ix = 0;
    let header = Header::read(&bytes, &mut ix).expect("header");
    assert_eq!(ix, 0x70);
    assert_eq!(header.version(), 35);
    assert_eq!(header.file_size as usize, bytes.len());

    let dex = DexFile::from_bytes(&bytes).expect("parse scenario");
    assert_eq!(dex.version(), 35);
    assert!(dex.strings.iter().any(|s| s == "hi"));
    assert_eq!(dex.class_defs.len(), 1);

    let class = &dex.class_defs[0];
    assert_eq!(dex.class_name(class), Some("Lcom/example/Main;"));
    assert_eq!(dex.superclass_name(class), Some("Ljava/lang/Object;"));
    assert!(class.interfaces.0.is_empty());
    assert!(class.source_file_idx.is_none());

    let data = class.class_data.as_ref().expect("class data");
    assert!(data.direct_methods.is_empty());
    assert_eq!(data.virtual_methods.len(), 1);
    let run = &data.virtual_methods[0];
    assert_eq!(dex.method_dalvik_name(run.method_idx).as_deref(), Some("Lcom/example/Main;->run()V"));
    let code = run.code.as_ref().expect("code item");
    assert_eq!((code.registers_size, code.ins_size, code.outs_size), (2, 1, 1));
    assert_eq!(code.insns.len(), 6);
    assert!(code.tries.is_empty());

    // the callee is only referenced
    let callee = dex.methods.iter().position(|m| dex.string(m.name_idx) == Some("log")).expect("log id");
    assert_eq!(
        dex.method_dalvik_name(callee as u32).as_deref(),
        Some("Lcom/example/Util;->log(Ljava/lang/String;)V")
    );
}

#[test]
fn member_lists_keep_kind_order() {
    let mut b = DexBuilder::new();
    b.class("Lcom/example/Shape;")
        .access(ACC_PUBLIC | ACC_ABSTRACT)
        .interface("Ljava/lang/Comparable;")
        .source_file("Shape.java")
        .field("count", "I", ACC_STATIC)
        .field("name", "Ljava/lang/String;", ACC_PUBLIC)
        .method("<init>", "()V", ACC_PUBLIC | ACC_CONSTRUCTOR, CodeDef::new(1, 1, 0, vec![u(0x000e)]))
        .bodyless("area", "()D", ACC_PUBLIC | ACC_ABSTRACT);
    let dex = DexFile::from_bytes(&b.build()).expect("parse");

    let class = &dex.class_defs[0];
    assert!(class.access_flags.contains(AccessFlags::ABSTRACT));
    assert_eq!(dex.source_file(class), Some("Shape.java"));
    let interfaces: Vec<_> = class.interfaces.iter().filter_map(|t| dex.type_descriptor(*t)).collect();
    assert_eq!(interfaces, vec!["Ljava/lang/Comparable;"]);

    let data = class.class_data.as_ref().expect("class data");
    let fields: Vec<_> = data.fields().filter_map(|f| dex.field_name(f.field_idx)).collect();
    assert_eq!(fields, vec!["Lcom/example/Shape;->count:I", "Lcom/example/Shape;->name:Ljava/lang/String;"]);
    let methods: Vec<_> = data.methods().filter_map(|m| dex.method_dalvik_name(m.method_idx)).collect();
    assert_eq!(methods, vec!["Lcom/example/Shape;-><init>()V", "Lcom/example/Shape;->area()D"]);
    assert!(data.virtual_methods[0].code.is_none());
}

#[test]
fn parses_try_blocks_and_handlers() {
    let mut b = DexBuilder::new();
    let code = CodeDef::new(1, 0, 0, vec![u(0x0000), u(0x0000), u(0x000e)]).with_try(TryDef {
        start: 0,
        count: 2,
        handlers: vec![("Ljava/io/IOException;".to_string(), 2)],
        catch_all: Some(2),
    });
    b.class("Lcom/example/Guarded;").method("go", "()V", ACC_STATIC, code);
    let dex = DexFile::from_bytes(&b.build()).expect("parse");

    let m = &dex.class_defs[0].class_data.as_ref().expect("class data").direct_methods[0];
    let code = m.code.as_ref().expect("code");
    assert_eq!(code.insns.len(), 3);
    assert_eq!(code.tries.len(), 1);
    let handler = code.handler_for(&code.tries[0]).expect("handler");
    assert_eq!(handler.handlers.len(), 1);
    assert_eq!(dex.type_descriptor(handler.handlers[0].type_idx), Some("Ljava/io/IOException;"));
    assert_eq!(handler.handlers[0].addr, 2);
    assert_eq!(handler.catch_all_addr, Some(2));
}

#[test]
fn empty_image_parses() {
    let dex = DexFile::from_bytes(&DexBuilder::new().build()).expect("parse");
    assert!(dex.class_defs.is_empty());
    assert!(dex.strings.is_empty());
    assert_eq!(dex.string(0), None);
    assert_eq!(dex.method_dalvik_name(0), None);
}

#[test]
fn rejects_bad_magic_and_short_input() {
    let mut bytes = main_run_scenario().build();
    bytes[0] = b'x';
    let err = DexFile::from_bytes(&bytes).unwrap_err();
    assert_eq!(err.kind(), DexErrorKind::MalformedInput);

    assert_eq!(DexFile::from_bytes(&[]).unwrap_err().kind(), DexErrorKind::MalformedInput);
    assert_eq!(DexFile::from_bytes(b"dex\n035\0").unwrap_err().kind(), DexErrorKind::MalformedInput);
}

#[test]
fn version_support() {
    for version in [35, 37, 38, 39, 40, 41] {
        let dex = DexFile::from_bytes(&main_run_scenario().version(version).build()).expect("supported version");
        assert_eq!(dex.version(), version);
    }
    for version in [34, 36, 42] {
        let err = DexFile::from_bytes(&main_run_scenario().version(version).build()).unwrap_err();
        assert_eq!(err.kind(), DexErrorKind::UnsupportedVersion, "version {version}");
    }
}

#[test]
fn rejects_reversed_endian_tag() {
    let mut bytes = main_run_scenario().build();
    put_u4_at(&mut bytes, 0x28, 0x78563412);
    assert_eq!(DexFile::from_bytes(&bytes).unwrap_err().kind(), DexErrorKind::UnsupportedVersion);
    put_u4_at(&mut bytes, 0x28, 0xdeadbeef);
    assert_eq!(DexFile::from_bytes(&bytes).unwrap_err().kind(), DexErrorKind::MalformedInput);
}

#[test]
fn rejects_truncated_image() {
    let bytes = main_run_scenario().build();
    let err = DexFile::from_bytes(&bytes[..bytes.len() - 8]).unwrap_err();
    assert_eq!(err.kind(), DexErrorKind::MalformedInput);
}

#[test]
fn rejects_out_of_range_ids() {
    let mut bytes = main_run_scenario().build();
    let type_ids_off = u4_at(&bytes, 0x44) as usize;
    put_u4_at(&mut bytes, type_ids_off, 0xffff);
    let err = DexFile::from_bytes(&bytes).unwrap_err();
    assert_eq!(err.kind(), DexErrorKind::MalformedInput);
    assert!(err.to_string().contains("out of range"), "{err}");

    let mut bytes = main_run_scenario().build();
    let class_defs_off = u4_at(&bytes, 0x64) as usize;
    put_u4_at(&mut bytes, class_defs_off, 0x7fff);
    let err = DexFile::from_bytes(&bytes).unwrap_err();
    assert!(err.to_string().contains("class_def 0"), "{err}");
}

#[test]
fn rejects_sections_outside_the_image() {
    let mut bytes = main_run_scenario().build();
    put_u4_at(&mut bytes, 0x5c, 0x00ff_ffff); // method_ids_off
    let err = DexFile::from_bytes(&bytes).unwrap_err();
    assert!(err.to_string().contains("method_ids"), "{err}");
}

#[test]
fn rejects_duplicate_class_defs() {
    let mut b = DexBuilder::new();
    b.class("Lcom/example/Twice;");
    b.class("Lcom/example/Twice;");
    let err = DexFile::from_bytes(&b.build()).unwrap_err();
    assert!(err.to_string().contains("Duplicate class definition Lcom/example/Twice;"), "{err}");
}

#[test]
fn parsing_honours_cancellation() {
    let bytes = main_run_scenario().build();
    let token = CancellationToken::new();
    token.cancel();
    let err = DexFile::from_bytes_with(&bytes, Some(&token)).unwrap_err();
    assert_eq!(err.kind(), DexErrorKind::Cancelled);
    assert!(DexFile::from_bytes_with(&bytes, Some(&CancellationToken::new())).is_ok());
}

use std::io::{Cursor, Write};

use crate::analysis::builder::GraphBuilder;
use crate::analysis::ClassLink;
use crate::android::apk;
use crate::dex::{DexErrorKind, DexFile};
use crate::options::{AnalysisOptions, CancellationToken};
use crate::session::{DexImage, PackageError, Session};
use crate::tests::fixture::*;

const RUN: &str = "Lcom/example/Main;->run()V";
const LOG: &str = "Lcom/example/Util;->log(Ljava/lang/String;)V";

fn util_image() -> DexBuilder {
    let mut b = DexBuilder::new();
    b.class("Lcom/example/Util;")
        .method("log", "(Ljava/lang/String;)V", ACC_PUBLIC | ACC_STATIC, CodeDef::new(1, 1, 0, vec![u(0x000e)]));
    b
}

#[test]
fn main_run_scenario_report() {
    let session = Session::open([("classes.dex", main_run_scenario().build())]).expect("open");
    assert_eq!(session.image_count(), 1);
    let image = session.image(0).expect("image");
    assert_eq!(image.class_count(), 1);
    let class_def = image.class(0).expect("class def");
    let data = class_def.class_data.as_ref().expect("class data");
    assert!(data.direct_methods.is_empty());
    assert_eq!(data.virtual_methods.len(), 1);

    let insns = session.disassembled_method(RUN).expect("run disassembly");
    let text: Vec<String> = insns.iter().map(|i| i.to_string()).collect();
    assert_eq!(
        text,
        vec![
            "const-string v0, \"hi\"".to_string(),
            format!("invoke-static {{v0}}, {}", LOG),
            "return-void".to_string(),
        ]
    );

    let run = session.method_analysis(RUN).expect("run");
    assert!(!run.external);
    let hi = session.string_analysis("hi").expect("hi");
    assert_eq!(hi.xrefs_from.len(), 1);
    assert_eq!(hi.xrefs_from[0].method, run.key);

    let log = session.method_analysis(LOG).expect("log");
    assert!(log.external);
    assert_eq!(session.is_external(LOG), Some(true));
    assert_eq!(session.external_method_count(), 1);
    assert!(session.class_analysis("Lcom/example/Util;").expect("util").external);
    assert!(session.failures().is_empty());
}

#[test]
fn image_accessors() {
    let b = main_run_scenario();
    let session = Session::open([("classes.dex", b.build())]).expect("open");
    assert!(session.image_by_name("classes2.dex").is_none());
    let image = session.image_by_name("classes.dex").expect("image");
    assert_eq!(image.index(), 0);
    assert_eq!(image.name(), "classes.dex");

    let hi = b.string_index("hi");
    assert_eq!(image.string(hi), Some("hi"));
    assert_eq!(image.string(image.string_count() as u32), None);
    assert_eq!(image.strings().count(), image.string_count());

    assert_eq!(image.class_name(0), Some("Lcom/example/Main;"));
    assert_eq!(image.class_name(1), None);
    assert!(image.class_by_name("com.example.Main").is_some());
    assert!(image.class_by_name("Lcom/example/Main;").is_some());
    assert!(image.class_by_name("com.example.Util").is_none());

    let log = b.method_index("Lcom/example/Util;", "log", "(Ljava/lang/String;)V");
    assert_eq!(image.method_dalvik_name(log).as_deref(), Some(LOG));
    assert_eq!(image.method_count(), 2);
    assert_eq!(image.field_name(0), None);

    // only referenced here, so nothing to disassemble
    assert_eq!(image.disassemble(log).expect("no error"), None);
    assert!(image.encoded_method(log).is_none());
}

#[test]
fn disassembly_is_memoised_and_deterministic() {
    let bytes = main_run_scenario().build();
    let session = Session::open([("classes.dex", &bytes)]).expect("open");
    let first = session.disassembled_method(RUN).expect("first");
    let second = session.disassembled_method(RUN).expect("second");
    assert!(std::ptr::eq(first, second));

    let dex = DexFile::from_bytes(&bytes).expect("parse");
    let code = dex.class_defs[0].class_data.as_ref().and_then(|d| d.virtual_methods[0].code.as_ref()).expect("code");
    let fresh = dex.disassemble(code).expect("disassemble");
    assert_eq!(first, fresh.as_slice());
    assert_eq!(fresh, dex.disassemble(code).expect("again"));
    assert_eq!(
        serde_json::to_string(first).expect("json"),
        serde_json::to_string(&fresh).expect("json")
    );
}

#[test]
fn instructions_serialize() {
    let session = Session::open([("classes.dex", main_run_scenario().build())]).expect("open");
    let insns = session.disassembled_method(RUN).expect("run");
    let json = serde_json::to_value(&insns[0]).expect("json");
    assert_eq!(json["name"], "const-string");
    assert_eq!(json["offset"], 0);
    assert_eq!(json["operands"][1]["Reference"]["String"]["value"], "hi");
}

#[test]
fn multidex_resolves_across_images() {
    let session = Session::open([("classes.dex", main_run_scenario().build()), ("classes2.dex", util_image().build())])
        .expect("open");
    assert_eq!(session.image_count(), 2);

    let log = session.method_analysis(LOG).expect("log");
    assert!(!log.external);
    assert_eq!(log.location.map(|l| l.image), Some(1));
    assert_eq!(log.xrefs_from.len(), 1);
    assert_eq!(session.external_method_count(), 0);

    let util = session.class_analysis("com.example.Util").expect("util");
    assert!(!util.external);
    assert_eq!(util.origin().map(|o| o.image), Some(1));

    // the callee is the same wrapper whichever image names it
    let main_image = session.image(0).expect("image 0");
    let util_image = session.image(1).expect("image 1");
    let util_def = util_image.class(0).expect("util def");
    let log_def = util_def.class_data.as_ref().map(|d| &d.direct_methods[0]).expect("log def");
    assert!(std::ptr::eq(log, session.method_analysis_for(1, log_def).expect("by record")));
    let log_ref = (0..main_image.method_count() as u32)
        .find(|m| main_image.method_dalvik_name(*m).as_deref() == Some(LOG))
        .expect("referenced in image 0");
    let by_ref = session
        .graph()
        .methods()
        .resolve(crate::analysis::CacheKey::Record(crate::analysis::RecordKey::new(0, log_ref)))
        .expect("bound while scanning");
    assert!(std::ptr::eq(log, by_ref));
}

#[test]
fn duplicate_classes_merge_first_wins() {
    let mut first = DexBuilder::new();
    first
        .class("Lcom/example/Dup;")
        .superclass("Lcom/example/Base;")
        .method("a", "()V", ACC_PUBLIC, CodeDef::new(1, 1, 0, vec![u(0x000e)]));
    first.class("Lcom/example/Base;");
    let mut second = DexBuilder::new();
    second
        .class("Lcom/example/Dup;")
        .access(ACC_PUBLIC | ACC_ABSTRACT)
        .method("a", "()V", ACC_PUBLIC, CodeDef::new(1, 1, 0, vec![u(0x0000), u(0x000e)]))
        .method("b", "()V", ACC_PUBLIC, CodeDef::new(1, 1, 0, vec![u(0x000e)]));

    let session = Session::open([("classes.dex", first.build()), ("classes2.dex", second.build())]).expect("open");
    let dup = session.class_analysis("Lcom/example/Dup;").expect("dup");
    assert_eq!(dup.definitions.len(), 2);
    assert_eq!(dup.origin().map(|o| o.image), Some(0));
    assert!(!dup.access_flags.contains(crate::dex::dex_file::AccessFlags::ABSTRACT));
    let base = session.class_analysis("Lcom/example/Base;").expect("base");
    assert_eq!(dup.superclass, Some(ClassLink::Internal(base.key)));

    let names: Vec<_> = dup.methods.iter().filter_map(|k| session.method(*k)).map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    let a = session.method_analysis("Lcom/example/Dup;->a()V").expect("a");
    assert_eq!(a.location.map(|l| l.image), Some(0));
    assert_eq!(session.disassembled_method("Lcom/example/Dup;->a()V").map(|i| i.len()), Some(1));
    let b = session.method_analysis("Lcom/example/Dup;->b()V").expect("b");
    assert_eq!(b.location.map(|l| l.image), Some(1));
}

#[test]
fn bad_images_fail_the_session() {
    let images = vec![
        ("classes.dex", main_run_scenario().build()),
        ("classes2.dex", b"not a dex file".to_vec()),
        ("classes3.dex", main_run_scenario().version(99).build()),
    ];
    match Session::open(images) {
        Err(PackageError::Images(failures)) => {
            assert_eq!(failures.len(), 2);
            assert_eq!(failures[0].index, 1);
            assert_eq!(failures[0].error.kind(), DexErrorKind::MalformedInput);
            assert_eq!(failures[1].name, "classes3.dex");
            assert_eq!(failures[1].error.kind(), DexErrorKind::UnsupportedVersion);
        }
        other => panic!("expected image failures, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn bad_images_can_be_skipped() {
    let images = vec![
        ("classes.dex", main_run_scenario().build()),
        ("classes2.dex", vec![0u8; 16]),
        ("classes3.dex", util_image().build()),
    ];
    let options = AnalysisOptions::default().with_skip_bad_images(true);
    let session = Session::open_with(images, &options).expect("open");
    assert_eq!(session.image_count(), 2);
    assert_eq!(session.failures().len(), 1);
    assert_eq!(session.failures()[0].index, 1);
    assert_eq!(session.failures()[0].name, "classes2.dex");

    // survivors are renumbered
    let util = session.image(1).expect("second survivor");
    assert_eq!(util.name(), "classes3.dex");
    assert_eq!(util.index(), 1);
    assert!(!session.method_analysis(LOG).expect("log").external);
}

#[test]
fn malformed_code_fails_its_image() {
    let mut b = DexBuilder::new();
    // 0x3e is not an opcode
    b.class("Lcom/example/Broken;").method("x", "()V", ACC_STATIC, CodeDef::new(1, 0, 0, vec![u(0x003e)]));
    match Session::open([("classes.dex", b.build())]) {
        Err(PackageError::Images(failures)) => {
            assert_eq!(failures[0].error.kind(), DexErrorKind::MalformedInput);
            assert!(failures[0].error.to_string().contains("Unknown opcode 0x3e"), "{}", failures[0].error);
        }
        other => panic!("expected image failure, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn cancellation_stops_the_session() {
    let token = CancellationToken::new();
    token.cancel();
    let options = AnalysisOptions::default().with_cancellation(token).with_skip_bad_images(true);
    let err = Session::open_with([("classes.dex", main_run_scenario().build())], &options).unwrap_err();
    assert!(err.is_cancelled());
    assert!(matches!(err, PackageError::Build(ref e) if e.kind() == DexErrorKind::Cancelled));
}

#[test]
fn cancellation_after_images_load() {
    let token = CancellationToken::new();
    let images = vec![
        DexImage::load("classes.dex", 0, &main_run_scenario().build(), Some(&token)).expect("first image"),
        DexImage::load("classes2.dex", 1, &util_image().build(), Some(&token)).expect("second image"),
    ];
    token.cancel();
    let options = AnalysisOptions::default().with_cancellation(token);
    let err = GraphBuilder::new(&images, &options).build().map(|_| ()).unwrap_err();
    assert_eq!(err.kind(), DexErrorKind::Cancelled);
    assert!(err.to_string().contains("classes.dex"), "{err}");
    assert!(PackageError::from(err).is_cancelled());
}

fn wide_image(image: usize, classes: usize) -> DexBuilder {
    let mut b = DexBuilder::new();
    for c in 0..classes {
        let text = format!("text {image}/{c}");
        b.class(&format!("Lcom/example/p{image}/C{c};")).method(
            "run",
            "()V",
            ACC_PUBLIC,
            CodeDef::new(1, 1, 0, vec![u(0x001a), string(&text), u(0x000e)]),
        );
    }
    b
}

#[test]
fn cancellation_from_another_thread() {
    let images: Vec<_> = (0..8).map(|i| (format!("classes{}.dex", i + 1), wide_image(i, 200).build())).collect();
    let token = CancellationToken::new();
    let options = AnalysisOptions::default().with_parallel(false).with_cancellation(token.clone());
    let start = std::sync::Barrier::new(2);

    let result = std::thread::scope(|s| {
        s.spawn(|| {
            start.wait();
            token.cancel();
        });
        start.wait();
        Session::open_with(images.iter().map(|(n, b)| (n.as_str(), b.as_slice())), &options)
    });
    // the open may win the race, but it never fails any other way
    match result {
        Ok(session) => assert_eq!(session.image_count(), 8),
        Err(err) => assert!(err.is_cancelled(), "{err}"),
    }
    assert!(token.is_cancelled());
}

#[test]
fn sequential_and_parallel_agree() {
    let images = || [("classes.dex", main_run_scenario().build()), ("classes2.dex", util_image().build())];
    let parallel = Session::open(images()).expect("parallel");
    let sequential = Session::open_with(images(), &AnalysisOptions::default().with_parallel(false)).expect("sequential");
    let names = |s: &Session| s.method_analyses().map(|m| (m.dalvik_name(), m.external)).collect::<Vec<_>>();
    assert_eq!(names(&parallel), names(&sequential));
    assert_eq!(parallel.method_analysis_count(), sequential.method_analysis_count());
}

#[test]
fn session_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();

    let session = Session::open([("classes.dex", main_run_scenario().build())]).expect("open");
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| assert_eq!(session.disassembled_method(RUN).map(|i| i.len()), Some(3)));
        }
    });
    session.close();
}

fn apk_bytes(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, data) in entries {
        zip.start_file(*name, options).expect("start entry");
        zip.write_all(data).expect("write entry");
    }
    zip.finish().expect("finish zip").into_inner()
}

#[test]
fn apk_images_in_multidex_order() {
    let bytes = apk_bytes(&[
        ("AndroidManifest.xml", vec![0x03, 0x00]),
        ("classes2.dex", util_image().build()),
        ("classes.dex", main_run_scenario().build()),
        ("classes4.dex", vec![1, 2, 3]),
        ("assets/classes3.dex", vec![1, 2, 3]),
    ]);
    let images = apk::dex_images_from_reader(Cursor::new(bytes)).expect("read apk");
    let names: Vec<_> = images.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["classes.dex", "classes2.dex"]);
}

#[test]
fn open_apk_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.apk");
    let bytes = apk_bytes(&[("classes.dex", main_run_scenario().build()), ("classes2.dex", util_image().build())]);
    std::fs::write(&path, bytes).expect("write apk");

    let session = Session::open_apk(&path, &AnalysisOptions::default()).expect("open apk");
    assert_eq!(session.image_count(), 2);
    assert!(!session.is_external(LOG).expect("log"));

    let err = Session::open_apk(dir.path().join("missing.apk"), &AnalysisOptions::default()).unwrap_err();
    assert!(matches!(err, PackageError::Io(_)));

    let junk = dir.path().join("junk.apk");
    std::fs::write(&junk, b"not a zip").expect("write junk");
    let err = Session::open_apk(&junk, &AnalysisOptions::default()).unwrap_err();
    assert!(matches!(err, PackageError::Zip(_)));
}

use crate::analysis::{ArenaKey, ClassLink, ClassRefKind, XrefTarget};
use crate::dex::dex_file::AccessFlags;
use crate::options::AnalysisOptions;
use crate::session::Session;
use crate::tests::fixture::*;

const MAIN: &str = "Lcom/example/Main;";
const UTIL: &str = "Lcom/example/Util;";
const GREETER: &str = "Lcom/example/Greeter;";
const ACTIVITY: &str = "Landroid/app/Activity;";
const BUILDER: &str = "Ljava/lang/StringBuilder;";

/// Main extends an external Activity, implements Greeter and exercises
/// every kind of pool reference the graph records.
fn package() -> DexBuilder {
    let mut b = DexBuilder::new();
    b.class(GREETER).access(ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT).bodyless(
        "greet",
        "()V",
        ACC_PUBLIC | ACC_ABSTRACT,
    );
    b.class(UTIL)
        .field("count", "I", ACC_STATIC)
        .method("log", "(Ljava/lang/String;)V", ACC_PUBLIC | ACC_STATIC, CodeDef::new(1, 1, 0, vec![u(0x000e)]));
    b.class(MAIN)
        .superclass(ACTIVITY)
        .interface(GREETER)
        .method(
            "<init>",
            "()V",
            ACC_PUBLIC | ACC_CONSTRUCTOR,
            CodeDef::new(1, 1, 1, vec![u(0x1070), method(ACTIVITY, "<init>", "()V"), u(0x0000), u(0x000e)]),
        )
        .method("greet", "()V", ACC_PUBLIC, CodeDef::new(1, 1, 0, vec![u(0x000e)]))
        .method(
            "run",
            "()V",
            ACC_PUBLIC,
            CodeDef::new(
                2,
                1,
                1,
                vec![
                    u(0x001a), string("hi"),                                   // 0: const-string v0
                    u(0x1071), method(UTIL, "log", "(Ljava/lang/String;)V"), u(0x0000), // 4: invoke-static {v0}
                    u(0x0060), field(UTIL, "count", "I"),                      // 10: sget v0
                    u(0x0067), field(UTIL, "count", "I"),                      // 14: sput v0
                    u(0x0022), ty(BUILDER),                                    // 18: new-instance v0
                    u(0x1070), method(BUILDER, "<init>", "()V"), u(0x0000),    // 22: invoke-direct {v0}
                    u(0x001c), ty(UTIL),                                       // 28: const-class v0
                    u(0x1023), ty("[Lcom/example/Util;"),                      // 32: new-array v0, v1
                    u(0x1023), ty("[I"),                                       // 36: new-array v0, v1
                    u(0x106e), method("[I", "clone", "()Ljava/lang/Object;"), u(0x0000), // 40: invoke-virtual {v0}
                    u(0x000e),                                                 // 46: return-void
                ],
            ),
        );
    b
}

fn open(b: &DexBuilder) -> Session {
    Session::open([("classes.dex", b.build())]).expect("open package")
}

#[test]
fn declared_entities_are_internal() {
    let session = open(&package());
    let image = session.image(0).expect("image");
    assert_eq!(image.class_count(), 3);

    for class_def in image.classes() {
        let class = session.class_analysis_for(0, class_def).expect("declared class");
        assert!(!class.external);
        assert_eq!(class.origin().map(|o| o.image), Some(0));
        for m in class_def.class_data.iter().flat_map(|d| d.methods()) {
            let analysis = session.method_analysis_for(0, m).expect("declared method");
            assert_eq!(analysis.external, m.code.is_none());
            assert_eq!(analysis.class, Some(class.key));
        }
        for f in class_def.class_data.iter().flat_map(|d| d.fields()) {
            assert!(session.field_analysis_for(0, f).is_some());
        }
    }

    let greeter = session.class_analysis(GREETER).expect("greeter");
    assert!(greeter.is_interface());
    // no body, so external even though declared
    assert_eq!(session.is_external("Lcom/example/Greeter;->greet()V"), Some(true));
    assert_eq!(session.is_external("Lcom/example/Main;->greet()V"), Some(false));
    assert_eq!(session.is_external("Lcom/example/Main;->missing()V"), None);
}

#[test]
fn hierarchy_links() {
    let session = open(&package());
    let main = session.class_analysis(MAIN).expect("main");
    let greeter = session.class_analysis(GREETER).expect("greeter");
    assert_eq!(main.superclass, Some(ClassLink::External(ACTIVITY.to_string())));
    assert_eq!(main.interfaces, vec![ClassLink::Internal(greeter.key)]);
    assert_eq!(greeter.superclass, Some(ClassLink::External("Ljava/lang/Object;".to_string())));
}

#[test]
fn external_members_are_created_on_demand() {
    let session = open(&package());

    let activity = session.class_analysis(ACTIVITY).expect("activity");
    assert!(activity.external);
    assert!(activity.origin().is_none());
    let ctor = session.method_analysis("Landroid/app/Activity;-><init>()V").expect("super ctor");
    assert!(ctor.external);
    assert!(ctor.location.is_none());
    assert_eq!(ctor.class, Some(activity.key));
    assert!(activity.methods.contains(&ctor.key));

    // array receivers have no class
    let clone = session.method_analysis("[I->clone()Ljava/lang/Object;").expect("clone");
    assert!(clone.external);
    assert_eq!(clone.class, None);
    assert!(session.class_analysis("[I").is_none());

    // 3 Activity/StringBuilder/array externals plus the abstract greet
    assert_eq!(session.external_method_count(), 4);
    assert_eq!(session.method_analyses().filter(|m| m.external).count(), session.external_method_count());
}

#[test]
fn method_and_string_xrefs() {
    let session = open(&package());
    let run = session.method_analysis("Lcom/example/Main;->run()V").expect("run");

    let hi = session.string_analysis("hi").expect("string");
    assert_eq!(hi.xrefs_from.len(), 1);
    assert_eq!(hi.xrefs_from[0].method, run.key);
    assert_eq!(hi.xrefs_from[0].offset, 0);

    let log = session.method_analysis("Lcom/example/Util;->log(Ljava/lang/String;)V").expect("log");
    assert!(!log.external);
    assert_eq!(log.xrefs_from.len(), 1);
    assert_eq!(log.xrefs_from[0].method, run.key);
    assert_eq!(log.xrefs_from[0].offset, 4);

    let callees: Vec<_> = run
        .callees()
        .map(|(off, m)| (off, session.method(m).expect("callee").dalvik_name()))
        .collect();
    assert_eq!(
        callees,
        vec![
            (4, "Lcom/example/Util;->log(Ljava/lang/String;)V".to_string()),
            (22, "Ljava/lang/StringBuilder;-><init>()V".to_string()),
            (40, "[I->clone()Ljava/lang/Object;".to_string()),
        ]
    );

    let offsets: Vec<u32> = run.xrefs_to.iter().map(|x| x.offset).collect();
    assert_eq!(offsets, vec![0, 4, 10, 14, 18, 22, 28, 32, 40]);
    assert!(matches!(run.xrefs_to[0].target, XrefTarget::String(k) if k == hi.key));
}

#[test]
fn field_reads_and_writes() {
    let session = open(&package());
    let run = session.method_analysis("Lcom/example/Main;->run()V").expect("run");
    let count = session.field_analysis("Lcom/example/Util;->count:I").expect("field");
    assert!(!count.external);
    assert!(count.access_flags.contains(AccessFlags::STATIC));
    assert_eq!(count.reads.len(), 1);
    assert_eq!(count.reads[0].offset, 10);
    assert_eq!(count.writes.len(), 1);
    assert_eq!(count.writes[0].offset, 14);
    assert!(count.xrefs_from().all(|s| s.method == run.key));
}

#[test]
fn class_level_edges() {
    let session = open(&package());
    let main = session.class_analysis(MAIN).expect("main");
    let util = session.class_analysis(UTIL).expect("util");
    let builder = session.class_analysis(BUILDER).expect("string builder");
    assert!(builder.external);

    let to_util: Vec<_> = main.xrefs_to.iter().filter(|x| x.class == util.key).map(|x| (x.kind, x.site.offset)).collect();
    assert_eq!(
        to_util,
        vec![
            (ClassRefKind::MethodCall, 4),
            (ClassRefKind::FieldAccess, 10),
            (ClassRefKind::FieldAccess, 14),
            (ClassRefKind::ConstClass, 28),
            (ClassRefKind::NewArray, 32),
        ]
    );
    assert_eq!(util.xrefs_from.len(), 5);
    assert!(util.xrefs_from.iter().all(|x| x.class == main.key));

    let kinds: Vec<_> = builder.xrefs_from.iter().map(|x| x.kind).collect();
    assert_eq!(kinds, vec![ClassRefKind::NewInstance, ClassRefKind::MethodCall]);

    let activity = session.class_analysis(ACTIVITY).expect("activity");
    assert_eq!(activity.xrefs_from.len(), 1);
    assert_eq!(activity.xrefs_from[0].kind, ClassRefKind::MethodCall);
}

#[test]
fn xrefs_can_be_disabled() {
    let options = AnalysisOptions::default().with_xrefs(false);
    let session = Session::open_with([("classes.dex", package().build())], &options).expect("open");
    let run = session.method_analysis("Lcom/example/Main;->run()V").expect("run");
    assert!(run.xrefs_to.is_empty());
    let hi = session.string_analysis("hi").expect("string still known");
    assert!(hi.xrefs_from.is_empty());
    let log = session.method_analysis("Lcom/example/Util;->log(Ljava/lang/String;)V").expect("log");
    assert!(log.xrefs_from.is_empty());
    assert!(session.class_analysis(MAIN).expect("main").xrefs_to.is_empty());
}

#[test]
fn identity_is_idempotent() {
    let session = open(&package());
    let image = session.image(0).expect("image");
    for (idx, class_def) in image.classes().enumerate() {
        let name = image.class_name(idx).expect("name");
        let by_name = session.class_analysis(name).expect("by name");
        for _ in 0..3 {
            let by_record = session.class_analysis_for(0, class_def).expect("by record");
            assert!(std::ptr::eq(by_name, by_record));
            assert!(std::ptr::eq(by_name, session.class(by_name.key).expect("by key")));
        }
        let java = by_name.java_name();
        assert!(std::ptr::eq(by_name, session.class_analysis(&java).expect("by java name")));

        for m in class_def.class_data.iter().flat_map(|d| d.methods()) {
            let dalvik = image.method_dalvik_name(m.method_idx).expect("dalvik name");
            let a = session.method_analysis(&dalvik).expect("by name");
            let b = session.method_analysis_for(0, m).expect("by record");
            assert!(std::ptr::eq(a, b));
            assert!(std::ptr::eq(a, session.method_analysis_by_index(a.key.index()).expect("by index")));
        }
    }
}

#[test]
fn class_methods_follow_declaration_order() {
    let session = open(&package());
    let image = session.image(0).expect("image");
    let class_def = image.class_by_name("com.example.Main").expect("main def");
    let data = class_def.class_data.as_ref().expect("class data");
    let declared: Vec<_> = data.methods().filter_map(|m| image.method_dalvik_name(m.method_idx)).collect();

    let main = session.class_analysis(MAIN).expect("main");
    let recorded: Vec<_> = main.methods.iter().filter_map(|k| session.method(*k)).map(|m| m.dalvik_name()).collect();
    assert_eq!(declared, recorded);
    assert_eq!(
        recorded,
        vec!["Lcom/example/Main;-><init>()V", "Lcom/example/Main;->greet()V", "Lcom/example/Main;->run()V"]
    );
}

#[test]
fn method_index_lookup_is_bounded() {
    let session = open(&package());
    let count = session.method_analysis_count();
    assert!(session.method_analysis_by_index(count - 1).is_some());
    assert!(session.method_analysis_by_index(count).is_none());
    assert!(session.method_analysis_by_index(usize::MAX).is_none());
    // would alias slot 0 if truncated to 32 bits
    if let Ok(wide) = usize::try_from(1u64 << 32) {
        assert!(session.method_analysis_by_index(wide).is_none());
    }
}

#[test]
fn referenced_members_follow_declared_ones() {
    let mut b = DexBuilder::new();
    b.class(MAIN).field("own", "I", ACC_PRIVATE).method(
        "run",
        "()V",
        ACC_PUBLIC,
        CodeDef::new(
            1,
            1,
            1,
            vec![
                u(0x106e), method(MAIN, "toString", "()Ljava/lang/String;"), u(0x0000), // inherited
                u(0x0060), field(MAIN, "inherited", "I"),
                u(0x0060), field(MAIN, "own", "I"),
                u(0x000e),
            ],
        ),
    );
    let session = open(&b);
    let main = session.class_analysis(MAIN).expect("main");

    let methods: Vec<_> = main.methods.iter().filter_map(|k| session.method(*k)).collect();
    let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["run", "toString"]);
    assert!(methods[0].location.is_some());
    assert!(methods[1].location.is_none() && methods[1].external);

    let fields: Vec<_> = main.fields.iter().filter_map(|k| session.field(*k)).collect();
    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["own", "inherited"]);
    assert!(fields[0].location.is_some());
    assert!(fields[1].location.is_none() && fields[1].external);
}

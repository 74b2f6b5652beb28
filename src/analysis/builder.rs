//! Builds the analysis graph over the parsed images of a package.
//!
//! Three passes, each in image order then class-def order:
//! 1. declare every defined class and its members, binding structural keys;
//! 2. link superclasses and interfaces once every definition is known;
//! 3. walk each method body and record its string, type, field and method uses.

use log::{debug, warn};

use crate::analysis::{
    AnalysisGraph, CacheKey, ClassAnalysis, ClassKey, ClassLink, ClassOrigin, ClassRefKind, ClassXref, FieldAnalysis,
    FieldKey, MethodAnalysis, MethodKey, MethodLocation, OutgoingXref, RecordKey, StringAnalysis, StringKey,
    XrefSite, XrefTarget,
};
use crate::dex::dex_file::{AccessFlags, EncodedField, EncodedMethod};
use crate::dex::error::DexError;
use crate::dex::instructions::{Instruction, Reference};
use crate::options::{is_cancelled, AnalysisOptions, CancellationToken};
use crate::session::DexImage;
use crate::types::class_descriptor;

struct PendingHierarchy {
    class: ClassKey,
    superclass: Option<String>,
    interfaces: Vec<String>,
}

pub(crate) struct GraphBuilder<'a> {
    images: &'a [DexImage],
    create_xrefs: bool,
    cancel: Option<&'a CancellationToken>,
    graph: AnalysisGraph,
}

fn type_ref_kind(opcode_name: &str) -> Option<ClassRefKind> {
    match opcode_name {
        "new-instance" => Some(ClassRefKind::NewInstance),
        "const-class" => Some(ClassRefKind::ConstClass),
        "check-cast" | "instance-of" => Some(ClassRefKind::TypeCheck),
        "new-array" | "filled-new-array" | "filled-new-array/range" => Some(ClassRefKind::NewArray),
        _ => None,
    }
}

fn missing(what: &str) -> DexError {
    DexError::invariant(&format!("{} missing from the analysis graph", what))
}

impl<'a> GraphBuilder<'a> {
    pub(crate) fn new(images: &'a [DexImage], options: &'a AnalysisOptions) -> Self {
        GraphBuilder {
            images,
            create_xrefs: options.create_xrefs,
            cancel: options.cancellation.as_ref(),
            graph: AnalysisGraph::default(),
        }
    }

    pub(crate) fn build(mut self) -> Result<AnalysisGraph, DexError> {
        let images = self.images;
        let mut pending = vec![];
        for image in images {
            self.declare_image(image, &mut pending).map_err(|e| err!(e, "image {}", image.name()))?;
        }
        self.link_hierarchy(pending)?;
        for image in images {
            self.scan_image(image).map_err(|e| err!(e, "image {}", image.name()))?;
        }
        Ok(self.graph)
    }

    fn check_cancelled(&self) -> Result<(), DexError> {
        if is_cancelled(self.cancel) {
            return Err(DexError::cancelled());
        }
        Ok(())
    }

    fn class_mut(&mut self, key: ClassKey) -> Result<&mut ClassAnalysis, DexError> {
        self.graph.classes.get_mut(key).ok_or_else(|| missing("class"))
    }

    fn method_mut(&mut self, key: MethodKey) -> Result<&mut MethodAnalysis, DexError> {
        self.graph.methods.get_mut(key).ok_or_else(|| missing("method"))
    }

    fn field_mut(&mut self, key: FieldKey) -> Result<&mut FieldAnalysis, DexError> {
        self.graph.fields.get_mut(key).ok_or_else(|| missing("field"))
    }

    fn string_mut(&mut self, key: StringKey) -> Result<&mut StringAnalysis, DexError> {
        self.graph.strings.get_mut(key).ok_or_else(|| missing("string"))
    }

    fn declare_image(&mut self, image: &DexImage, pending: &mut Vec<PendingHierarchy>) -> Result<(), DexError> {
        let dex = image.dex();
        for (def_idx, class_def) in dex.class_defs.iter().enumerate() {
            self.check_cancelled()?;
            let name = dex.class_name(class_def).ok_or_else(|| missing("class descriptor"))?;
            let (key, _) = self.graph.classes.get_or_create(name, |k| ClassAnalysis::new(k, name, false));
            self.graph.classes.bind(RecordKey::new(image.index(), class_def.class_idx), key)?;

            let class = self.class_mut(key)?;
            class.external = false;
            class.definitions.push(ClassOrigin { image: image.index(), class_def: def_idx });
            if class.definitions.len() == 1 {
                class.access_flags = class_def.access_flags;
                pending.push(PendingHierarchy {
                    class: key,
                    superclass: dex.superclass_name(class_def).map(str::to_string),
                    interfaces: class_def
                        .interfaces
                        .iter()
                        .filter_map(|t| dex.type_descriptor(*t))
                        .map(str::to_string)
                        .collect(),
                });
            } else {
                warn!(
                    "class {} defined again in {} (first definition in image {}); merging members",
                    name,
                    image.name(),
                    class.definitions[0].image
                );
            }

            if let Some(data) = &class_def.class_data {
                for f in data.fields() {
                    self.declare_field(image, key, f)?;
                }
                for m in data.methods() {
                    self.declare_method(image, key, m)?;
                }
            }
            debug!("declared class {} from {}", name, image.name());
        }
        Ok(())
    }

    fn declare_method(&mut self, image: &DexImage, class: ClassKey, m: &EncodedMethod) -> Result<(), DexError> {
        let (class_name, name, descriptor) = image.dex().method_parts(m.method_idx).ok_or_else(|| missing("method id"))?;
        let dalvik_name = format!("{}->{}{}", class_name, name, descriptor);
        let location = MethodLocation { image: image.index(), method_idx: m.method_idx };
        let (key, created) = self.graph.methods.get_or_create(&dalvik_name, |k| MethodAnalysis {
            key: k,
            class: Some(class),
            class_name: class_name.to_string(),
            name: name.to_string(),
            descriptor,
            access_flags: m.access_flags,
            external: m.code.is_none(),
            location: Some(location),
            xrefs_from: vec![],
            xrefs_to: vec![],
        });
        self.graph.methods.bind(RecordKey::new(image.index(), m.method_idx), key)?;
        if created {
            self.class_mut(class)?.methods.push(key);
        } else {
            debug!("method {} already defined, keeping the first definition", dalvik_name);
        }
        Ok(())
    }

    fn declare_field(&mut self, image: &DexImage, class: ClassKey, f: &EncodedField) -> Result<(), DexError> {
        let (class_name, name, descriptor) = image.dex().field_parts(f.field_idx).ok_or_else(|| missing("field id"))?;
        let field_name = format!("{}->{}:{}", class_name, name, descriptor);
        let (key, created) = self.graph.fields.get_or_create(&field_name, |k| FieldAnalysis {
            key: k,
            class: Some(class),
            class_name: class_name.to_string(),
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            access_flags: f.access_flags,
            external: false,
            location: Some((image.index(), f.field_idx)),
            reads: vec![],
            writes: vec![],
        });
        self.graph.fields.bind(RecordKey::new(image.index(), f.field_idx), key)?;
        if created {
            self.class_mut(class)?.fields.push(key);
        }
        Ok(())
    }

    fn link(&self, name: &str) -> ClassLink {
        match self.graph.classes.resolve(CacheKey::Name(name)) {
            Some(c) if !c.external => ClassLink::Internal(c.key),
            _ => ClassLink::External(name.to_string()),
        }
    }

    fn link_hierarchy(&mut self, pending: Vec<PendingHierarchy>) -> Result<(), DexError> {
        for p in pending {
            let superclass = p.superclass.as_deref().map(|s| self.link(s));
            let interfaces = p.interfaces.iter().map(|i| self.link(i)).collect();
            let class = self.class_mut(p.class)?;
            class.superclass = superclass;
            class.interfaces = interfaces;
        }
        Ok(())
    }

    /// Class for a descriptor met in code, created as external when the package lacks it.
    fn class_for(&mut self, descriptor: &str) -> ClassKey {
        self.graph.classes.get_or_create(descriptor, |k| ClassAnalysis::new(k, descriptor, true)).0
    }

    /// Owner class of a member reference; array receivers have none.
    fn owner_for(&mut self, descriptor: &str) -> Option<ClassKey> {
        if class_descriptor(descriptor) == Some(descriptor) {
            Some(self.class_for(descriptor))
        } else {
            None
        }
    }

    fn scan_image(&mut self, image: &DexImage) -> Result<(), DexError> {
        for class_def in &image.dex().class_defs {
            self.check_cancelled()?;
            let Some(data) = &class_def.class_data else { continue };
            for m in data.methods().filter(|m| m.code.is_some()) {
                let record = RecordKey::new(image.index(), m.method_idx);
                let caller = self.graph.methods.lookup(CacheKey::Record(record)).ok_or_else(|| missing("method record"))?;
                let here = MethodLocation { image: image.index(), method_idx: m.method_idx };
                // A later duplicate definition adds no edges.
                if self.graph.methods.get(caller).and_then(|c| c.location) != Some(here) {
                    continue;
                }
                let Some(insns) = image.disassemble(m.method_idx)? else { continue };
                for insn in insns {
                    self.record_uses(image.index(), caller, insn)?;
                }
            }
        }
        Ok(())
    }

    fn record_uses(&mut self, image: usize, caller: MethodKey, insn: &Instruction) -> Result<(), DexError> {
        let caller_class = self.graph.methods.get(caller).ok_or_else(|| missing("caller"))?.class;
        let site = XrefSite { method: caller, offset: insn.offset };

        for reference in insn.references() {
            match reference {
                Reference::String { idx, value } => {
                    let (key, _) = self.graph.strings.get_or_create(value, |k| StringAnalysis {
                        key: k,
                        value: value.clone(),
                        xrefs_from: vec![],
                    });
                    self.graph.strings.bind(RecordKey::new(image, *idx), key)?;
                    if self.create_xrefs {
                        self.string_mut(key)?.xrefs_from.push(site);
                        self.add_use(site, XrefTarget::String(key))?;
                    }
                }
                Reference::Type { idx, descriptor } => {
                    let (Some(kind), Some(element)) = (type_ref_kind(insn.name), class_descriptor(descriptor)) else {
                        continue;
                    };
                    let target = self.class_for(element);
                    if element == descriptor {
                        self.graph.classes.bind(RecordKey::new(image, *idx), target)?;
                    }
                    if self.create_xrefs {
                        self.add_use(site, XrefTarget::Class(target))?;
                        self.class_edge(caller_class, Some(target), kind, site)?;
                    }
                }
                Reference::Field { idx, class, name, descriptor } => {
                    let owner = self.owner_for(class);
                    let field_name = format!("{}->{}:{}", class, name, descriptor);
                    let (key, created) = self.graph.fields.get_or_create(&field_name, |k| FieldAnalysis {
                        key: k,
                        class: owner,
                        class_name: class.clone(),
                        name: name.clone(),
                        descriptor: descriptor.clone(),
                        access_flags: AccessFlags::empty(),
                        external: true,
                        location: None,
                        reads: vec![],
                        writes: vec![],
                    });
                    if created {
                        if let Some(owner) = owner {
                            self.class_mut(owner)?.fields.push(key);
                        }
                    }
                    self.graph.fields.bind(RecordKey::new(image, *idx), key)?;
                    if self.create_xrefs {
                        let field = self.field_mut(key)?;
                        if insn.writes_field() {
                            field.writes.push(site);
                        } else {
                            field.reads.push(site);
                        }
                        self.add_use(site, XrefTarget::Field(key))?;
                        self.class_edge(caller_class, owner, ClassRefKind::FieldAccess, site)?;
                    }
                }
                Reference::Method { idx, class, name, proto } => {
                    let owner = self.owner_for(class);
                    let dalvik_name = format!("{}->{}{}", class, name, proto);
                    let (key, created) = self.graph.methods.get_or_create(&dalvik_name, |k| MethodAnalysis {
                        key: k,
                        class: owner,
                        class_name: class.clone(),
                        name: name.clone(),
                        descriptor: proto.clone(),
                        access_flags: AccessFlags::empty(),
                        external: true,
                        location: None,
                        xrefs_from: vec![],
                        xrefs_to: vec![],
                    });
                    if created {
                        if let Some(owner) = owner {
                            self.class_mut(owner)?.methods.push(key);
                        }
                    }
                    self.graph.methods.bind(RecordKey::new(image, *idx), key)?;
                    if self.create_xrefs {
                        self.method_mut(key)?.xrefs_from.push(site);
                        self.add_use(site, XrefTarget::Method(key))?;
                        self.class_edge(caller_class, owner, ClassRefKind::MethodCall, site)?;
                    }
                }
                Reference::Proto { .. } | Reference::CallSite(_) | Reference::MethodHandle(_) => {}
            }
        }
        Ok(())
    }

    fn add_use(&mut self, site: XrefSite, target: XrefTarget) -> Result<(), DexError> {
        self.method_mut(site.method)?.xrefs_to.push(OutgoingXref { offset: site.offset, target });
        Ok(())
    }

    fn class_edge(&mut self, from: Option<ClassKey>, to: Option<ClassKey>, kind: ClassRefKind, site: XrefSite) -> Result<(), DexError> {
        let (Some(from), Some(to)) = (from, to) else { return Ok(()) };
        self.class_mut(from)?.xrefs_to.push(ClassXref { class: to, kind, site });
        self.class_mut(to)?.xrefs_from.push(ClassXref { class: from, kind, site });
        Ok(())
    }
}

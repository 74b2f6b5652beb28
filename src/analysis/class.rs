use serde::Serialize;

use crate::analysis::{ClassKey, FieldKey, MethodKey, XrefSite};
use crate::dex::dex_file::AccessFlags;
use crate::types::ObjectIdentifier;

/// Where a class is defined: image index and position in that image's class defs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClassOrigin {
    pub image: usize,
    pub class_def: usize,
}

/// A superclass or interface, resolved when the package defines it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ClassLink {
    Internal(ClassKey),
    External(String),
}

/// How a class is used at a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ClassRefKind {
    NewInstance,
    ConstClass,
    /// `check-cast` or `instance-of`
    TypeCheck,
    NewArray,
    MethodCall,
    FieldAccess,
}

/// A class-level edge. `class` is the class at the other end of the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClassXref {
    pub class: ClassKey,
    pub kind: ClassRefKind,
    pub site: XrefSite,
}

#[derive(Debug)]
pub struct ClassAnalysis {
    pub key: ClassKey,
    /// Descriptor, `Lpkg/Name;`.
    pub name: String,
    /// Referenced but not defined by any image of the package.
    pub external: bool,
    pub access_flags: AccessFlags,
    /// Every definition in image order; the first one supplies the attributes.
    pub definitions: Vec<ClassOrigin>,
    pub superclass: Option<ClassLink>,
    pub interfaces: Vec<ClassLink>,
    /// Members declared by the class, in declaration order, followed by members
    /// only referenced through it (inherited or missing ones, `location == None`)
    /// in order of first use.
    pub methods: Vec<MethodKey>,
    /// Same ordering as `methods`.
    pub fields: Vec<FieldKey>,
    pub xrefs_from: Vec<ClassXref>,
    pub xrefs_to: Vec<ClassXref>,
}

impl ClassAnalysis {
    pub(crate) fn new(key: ClassKey, name: &str, external: bool) -> Self {
        ClassAnalysis {
            key,
            name: name.to_string(),
            external,
            access_flags: AccessFlags::empty(),
            definitions: vec![],
            superclass: None,
            interfaces: vec![],
            methods: vec![],
            fields: vec![],
            xrefs_from: vec![],
            xrefs_to: vec![],
        }
    }

    pub fn java_name(&self) -> String {
        match ObjectIdentifier::from_jni_type(&self.name) {
            Some(o) => o.as_java_type(),
            None => self.name.clone(),
        }
    }

    /// The defining class def, if the package defines this class.
    pub fn origin(&self) -> Option<ClassOrigin> {
        self.definitions.first().copied()
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags.contains(AccessFlags::INTERFACE)
    }
}

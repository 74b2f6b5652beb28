use serde::Serialize;

use crate::analysis::{ClassKey, MethodKey, OutgoingXref, XrefSite, XrefTarget};
use crate::dex::dex_file::{AccessFlags, MethodId};
use crate::types::MethodSignature;

/// The encoded method that defines a method: image index and method pool id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MethodLocation {
    pub image: usize,
    pub method_idx: MethodId,
}

#[derive(Debug)]
pub struct MethodAnalysis {
    pub key: MethodKey,
    /// Declaring class; `None` when the receiver is an array type such as `[I`.
    pub class: Option<ClassKey>,
    pub class_name: String,
    pub name: String,
    /// Prototype descriptor, `(args)ret`.
    pub descriptor: String,
    pub access_flags: AccessFlags,
    /// True iff the package has no code item for this method.
    pub external: bool,
    /// First in-package definition. `None` for methods only ever referenced.
    pub location: Option<MethodLocation>,
    /// Call sites of this method.
    pub xrefs_from: Vec<XrefSite>,
    /// Everything this method's body uses, in instruction order.
    pub xrefs_to: Vec<OutgoingXref>,
}

impl MethodAnalysis {
    pub fn dalvik_name(&self) -> String {
        format!("{}->{}{}", self.class_name, self.name, self.descriptor)
    }

    pub fn signature(&self) -> Option<MethodSignature> {
        MethodSignature::from_jni(&self.descriptor)
    }

    /// Methods invoked from this body with the offset of each call.
    pub fn callees(&self) -> impl Iterator<Item = (u32, MethodKey)> + '_ {
        self.xrefs_to.iter().filter_map(|x| match x.target {
            XrefTarget::Method(m) => Some((x.offset, m)),
            _ => None,
        })
    }

    pub fn is_constructor(&self) -> bool {
        self.name == "<init>" || self.name == "<clinit>"
    }
}

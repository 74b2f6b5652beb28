//! The analysis graph: one wrapper per class, method, field and string
//! literal across every image of a package, linked by cross-references.

pub(crate) mod builder;
mod class;
mod field;
mod method;
pub mod registry;
mod string;

use serde::Serialize;

pub use class::{ClassAnalysis, ClassLink, ClassOrigin, ClassRefKind, ClassXref};
pub use field::FieldAnalysis;
pub use method::{MethodAnalysis, MethodLocation};
pub use registry::{ArenaKey, CacheKey, RecordKey, Registry};
pub use string::StringAnalysis;

macro_rules! arena_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(u32);

        impl ArenaKey for $name {
            fn from_index(index: usize) -> Self {
                $name(index as u32)
            }

            fn try_from_index(index: usize) -> Option<Self> {
                u32::try_from(index).ok().map($name)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_key!(ClassKey);
arena_key!(MethodKey);
arena_key!(FieldKey);
arena_key!(StringKey);

/// A use site: the method holding the instruction and the instruction's byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct XrefSite {
    pub method: MethodKey,
    pub offset: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum XrefTarget {
    Class(ClassKey),
    Method(MethodKey),
    Field(FieldKey),
    String(StringKey),
}

/// An edge out of a method body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OutgoingXref {
    pub offset: u32,
    pub target: XrefTarget,
}

/// Every analysis entity of a package. Built once, then only read.
#[derive(Debug, Default)]
pub struct AnalysisGraph {
    pub(crate) classes: Registry<ClassKey, ClassAnalysis>,
    pub(crate) methods: Registry<MethodKey, MethodAnalysis>,
    pub(crate) fields: Registry<FieldKey, FieldAnalysis>,
    pub(crate) strings: Registry<StringKey, StringAnalysis>,
}

impl AnalysisGraph {
    pub fn classes(&self) -> &Registry<ClassKey, ClassAnalysis> {
        &self.classes
    }

    pub fn methods(&self) -> &Registry<MethodKey, MethodAnalysis> {
        &self.methods
    }

    pub fn fields(&self) -> &Registry<FieldKey, FieldAnalysis> {
        &self.fields
    }

    pub fn strings(&self) -> &Registry<StringKey, StringAnalysis> {
        &self.strings
    }
}

use crate::analysis::{ClassKey, FieldKey, XrefSite};
use crate::dex::dex_file::{AccessFlags, FieldId};

#[derive(Debug)]
pub struct FieldAnalysis {
    pub key: FieldKey,
    pub class: Option<ClassKey>,
    pub class_name: String,
    pub name: String,
    /// Type descriptor of the field.
    pub descriptor: String,
    pub access_flags: AccessFlags,
    pub external: bool,
    /// Image index and field pool id of the first in-package declaration.
    pub location: Option<(usize, FieldId)>,
    pub reads: Vec<XrefSite>,
    pub writes: Vec<XrefSite>,
}

impl FieldAnalysis {
    pub fn field_name(&self) -> String {
        format!("{}->{}:{}", self.class_name, self.name, self.descriptor)
    }

    /// All access sites, reads first.
    pub fn xrefs_from(&self) -> impl Iterator<Item = &XrefSite> {
        self.reads.iter().chain(self.writes.iter())
    }
}

use crate::analysis::{StringKey, XrefSite};

#[derive(Debug)]
pub struct StringAnalysis {
    pub key: StringKey,
    pub value: String,
    /// Instructions that load this literal.
    pub xrefs_from: Vec<XrefSite>,
}

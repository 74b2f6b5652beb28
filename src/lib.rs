//! # Dexgraph
//!
//! Static analysis of Android DEX bytecode: a bounds-checked parser for the
//! DEX container, a Dalvik disassembler and a package-wide analysis graph of
//! classes, methods, fields and strings linked by cross-references.
//!
//! # Examples
//!
//! ```no_run
//!  use dexgraph::{AnalysisOptions, Session};
//!
//!  let session = Session::open_apk("app.apk", &AnalysisOptions::default()).unwrap();
//!  for method in session.method_analyses().filter(|m| !m.external) {
//!      for (offset, callee) in method.callees() {
//!          let callee = session.method(callee).unwrap();
//!          println!("{} @{:04x} -> {}", method.dalvik_name(), offset, callee.dalvik_name());
//!      }
//!  }
//! ```

#[macro_use]
pub mod dex;

pub mod analysis;
pub mod android;
pub mod options;
pub mod session;
#[cfg(test)]
mod tests;
pub mod types;

pub use analysis::{
    AnalysisGraph, ClassAnalysis, ClassKey, ClassLink, ClassRefKind, FieldAnalysis, FieldKey, MethodAnalysis,
    MethodKey, OutgoingXref, StringAnalysis, StringKey, XrefSite, XrefTarget,
};
pub use dex::instructions::{Instruction, Operand, Payload, Reference};
pub use dex::{DexError, DexErrorKind, DexFile};
pub use options::{AnalysisOptions, CancellationToken};
pub use session::{DexImage, ImageFailure, PackageError, Session};

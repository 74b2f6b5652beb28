//! Session: every image of a package, parsed and disassembled, plus the
//! analysis graph built over them. All queries borrow the session.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

use log::{error, info};
use once_cell::sync::OnceCell;
use rayon::prelude::*;

use crate::analysis::builder::GraphBuilder;
use crate::analysis::{
    AnalysisGraph, ArenaKey, CacheKey, ClassAnalysis, ClassKey, FieldAnalysis, FieldKey, MethodAnalysis, MethodKey,
    RecordKey, StringAnalysis, StringKey,
};
use crate::android::apk::{self, ApkError};
use crate::dex::dex_file::{ClassDefItem, EncodedField, EncodedMethod, FieldId, MethodId, StringId};
use crate::dex::error::{DexError, DexErrorKind};
use crate::dex::instructions::Instruction;
use crate::dex::DexFile;
use crate::options::{is_cancelled, AnalysisOptions, CancellationToken};
use crate::types::canonical_class_name;

#[derive(Debug, Clone, Copy)]
struct MethodSlot {
    class_def: usize,
    direct: bool,
    position: usize,
}

/// One parsed DEX image with its memoised disassembly.
#[derive(Debug)]
pub struct DexImage {
    name: String,
    index: usize,
    dex: DexFile,
    classes_by_name: HashMap<String, usize>,
    defined: HashMap<MethodId, MethodSlot>,
    disassembly: HashMap<MethodId, OnceCell<Vec<Instruction>>>,
}

impl DexImage {
    /// Parse `bytes` and disassemble every method body it defines.
    pub(crate) fn load(name: &str, index: usize, bytes: &[u8], cancel: Option<&CancellationToken>) -> Result<DexImage, DexError> {
        let dex = DexFile::from_bytes_with(bytes, cancel)?;

        let mut classes_by_name = HashMap::new();
        let mut defined = HashMap::new();
        let mut disassembly = HashMap::new();
        for (def_idx, class_def) in dex.class_defs.iter().enumerate() {
            if let Some(n) = dex.class_name(class_def) {
                classes_by_name.insert(n.to_string(), def_idx);
            }
            let Some(data) = &class_def.class_data else { continue };
            let slots = data
                .direct_methods
                .iter()
                .enumerate()
                .map(|(p, m)| (m, true, p))
                .chain(data.virtual_methods.iter().enumerate().map(|(p, m)| (m, false, p)));
            for (m, direct, position) in slots {
                defined.insert(m.method_idx, MethodSlot { class_def: def_idx, direct, position });
                if m.code.is_some() {
                    disassembly.insert(m.method_idx, OnceCell::new());
                }
            }
        }

        let image = DexImage { name: name.to_string(), index, dex, classes_by_name, defined, disassembly };
        for class_def in &image.dex.class_defs {
            if is_cancelled(cancel) {
                return Err(DexError::cancelled());
            }
            let Some(data) = &class_def.class_data else { continue };
            for m in data.methods() {
                image.disassemble(m.method_idx)?;
            }
        }
        info!(
            "loaded {} (dex {:03}): {} classes, {} methods with code",
            image.name,
            image.dex.version(),
            image.dex.class_defs.len(),
            image.disassembly.len()
        );
        Ok(image)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of this image among the images loaded into the session.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn dex(&self) -> &DexFile {
        &self.dex
    }

    pub fn string_count(&self) -> usize {
        self.dex.strings.len()
    }

    pub fn string(&self, id: StringId) -> Option<&str> {
        self.dex.string(id)
    }

    pub fn strings(&self) -> impl Iterator<Item = &str> {
        self.dex.strings.iter().map(String::as_str)
    }

    pub fn class_count(&self) -> usize {
        self.dex.class_defs.len()
    }

    pub fn class(&self, idx: usize) -> Option<&ClassDefItem> {
        self.dex.class_defs.get(idx)
    }

    pub fn classes(&self) -> std::slice::Iter<'_, ClassDefItem> {
        self.dex.class_defs.iter()
    }

    /// Class definition by descriptor or dotted Java name.
    pub fn class_by_name(&self, name: &str) -> Option<&ClassDefItem> {
        let idx = self.classes_by_name.get(canonical_class_name(name).as_str())?;
        self.dex.class_defs.get(*idx)
    }

    pub fn class_name(&self, idx: usize) -> Option<&str> {
        self.dex.class_name(self.class(idx)?)
    }

    pub fn method_count(&self) -> usize {
        self.dex.methods.len()
    }

    pub fn method_dalvik_name(&self, id: MethodId) -> Option<String> {
        self.dex.method_dalvik_name(id)
    }

    pub fn field_name(&self, id: FieldId) -> Option<String> {
        self.dex.field_name(id)
    }

    /// The encoded method defining `method_idx` in this image, if any class does.
    pub fn encoded_method(&self, method_idx: MethodId) -> Option<&EncodedMethod> {
        let slot = self.defined.get(&method_idx)?;
        let data = self.dex.class_defs.get(slot.class_def)?.class_data.as_ref()?;
        if slot.direct {
            data.direct_methods.get(slot.position)
        } else {
            data.virtual_methods.get(slot.position)
        }
    }

    /// Instructions of a method body defined in this image. `Ok(None)` for
    /// methods without code or not defined here. Decoded once per method.
    pub fn disassemble(&self, method_idx: MethodId) -> Result<Option<&[Instruction]>, DexError> {
        let Some(cell) = self.disassembly.get(&method_idx) else { return Ok(None) };
        let insns = cell.get_or_try_init(|| {
            let code = self.encoded_method(method_idx).and_then(|m| m.code.as_ref());
            match code {
                Some(code) => self.dex.disassemble(code).map_err(|e| err!(e, "method {}", method_idx)),
                None => Err(DexError::invariant("method body vanished from its class data")),
            }
        })?;
        Ok(Some(insns.as_slice()))
    }
}

/// An image that could not be loaded.
#[derive(Debug, Clone)]
pub struct ImageFailure {
    pub name: String,
    /// Position in the caller's input.
    pub index: usize,
    pub error: DexError,
}

impl fmt::Display for ImageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image {} ({}): {}", self.index, self.name, self.error)
    }
}

#[derive(Debug)]
pub enum PackageError {
    /// One entry per image that failed to load.
    Images(Vec<ImageFailure>),
    /// Graph construction failed or was cancelled.
    Build(DexError),
    Io(io::Error),
    Zip(zip::result::ZipError),
}

impl PackageError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PackageError::Build(e) if e.kind() == DexErrorKind::Cancelled)
    }
}

impl fmt::Display for PackageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageError::Images(failures) => {
                write!(f, "{} image(s) failed to load", failures.len())?;
                for failure in failures {
                    write!(f, "; {}", failure)?;
                }
                Ok(())
            }
            PackageError::Build(err) => write!(f, "analysis failed: {err}"),
            PackageError::Io(err) => write!(f, "I/O error: {err}"),
            PackageError::Zip(err) => write!(f, "ZIP error: {err}"),
        }
    }
}

impl std::error::Error for PackageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PackageError::Images(_) => None,
            PackageError::Build(err) => Some(err),
            PackageError::Io(err) => Some(err),
            PackageError::Zip(err) => Some(err),
        }
    }
}

impl From<DexError> for PackageError {
    fn from(value: DexError) -> Self {
        PackageError::Build(value)
    }
}

impl From<ApkError> for PackageError {
    fn from(value: ApkError) -> Self {
        match value {
            ApkError::Io(err) => PackageError::Io(err),
            ApkError::Zip(err) => PackageError::Zip(err),
        }
    }
}

/// An analysed package.
#[derive(Debug)]
pub struct Session {
    images: Vec<DexImage>,
    graph: AnalysisGraph,
    failures: Vec<ImageFailure>,
}

impl Session {
    /// Open a package with default options.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dexgraph::Session;
    ///
    /// let bytes = std::fs::read("classes.dex").unwrap();
    /// let session = Session::open([("classes.dex", bytes)]).unwrap();
    /// if let Some(class) = session.class_analysis("com.example.Main") {
    ///     println!("{} has {} methods", class.name, class.methods.len());
    /// }
    /// ```
    pub fn open<I, N, B>(images: I) -> Result<Session, PackageError>
    where
        I: IntoIterator<Item = (N, B)>,
        N: Into<String>,
        B: AsRef<[u8]> + Sync,
    {
        Session::open_with(images, &AnalysisOptions::default())
    }

    pub fn open_with<I, N, B>(images: I, options: &AnalysisOptions) -> Result<Session, PackageError>
    where
        I: IntoIterator<Item = (N, B)>,
        N: Into<String>,
        B: AsRef<[u8]> + Sync,
    {
        let inputs: Vec<(String, B)> = images.into_iter().map(|(n, b)| (n.into(), b)).collect();
        let cancel = options.cancellation.as_ref();
        let load = |index: usize, (name, bytes): &(String, B)| {
            DexImage::load(name, index, bytes.as_ref(), cancel).map_err(|error| ImageFailure {
                name: name.clone(),
                index,
                error,
            })
        };
        let results: Vec<Result<DexImage, ImageFailure>> = if options.parallel {
            inputs.par_iter().enumerate().map(|(i, input)| load(i, input)).collect()
        } else {
            inputs.iter().enumerate().map(|(i, input)| load(i, input)).collect()
        };

        let mut loaded = vec![];
        let mut failures = vec![];
        for result in results {
            match result {
                Ok(image) => loaded.push(image),
                Err(failure) => {
                    error!("{}", failure);
                    failures.push(failure);
                }
            }
        }
        if is_cancelled(cancel) || failures.iter().any(|f| f.error.kind() == DexErrorKind::Cancelled) {
            return Err(PackageError::Build(DexError::cancelled()));
        }
        if !failures.is_empty() && !options.skip_bad_images {
            return Err(PackageError::Images(failures));
        }
        for (i, image) in loaded.iter_mut().enumerate() {
            image.index = i;
        }

        let graph = GraphBuilder::new(&loaded, options).build()?;
        info!(
            "analysed {} image(s): {} classes, {} methods, {} fields, {} strings",
            loaded.len(),
            graph.classes().len(),
            graph.methods().len(),
            graph.fields().len(),
            graph.strings().len()
        );
        Ok(Session { images: loaded, graph, failures })
    }

    /// Open every `classes*.dex` of an APK.
    pub fn open_apk(path: impl AsRef<Path>, options: &AnalysisOptions) -> Result<Session, PackageError> {
        let images = apk::dex_images(path)?;
        Session::open_with(images, options)
    }

    /// Release the session. Equivalent to dropping it.
    pub fn close(self) {}

    pub fn images(&self) -> &[DexImage] {
        &self.images
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn image(&self, index: usize) -> Option<&DexImage> {
        self.images.get(index)
    }

    pub fn image_by_name(&self, name: &str) -> Option<&DexImage> {
        self.images.iter().find(|i| i.name == name)
    }

    /// Images skipped because they failed to load.
    pub fn failures(&self) -> &[ImageFailure] {
        &self.failures
    }

    pub fn graph(&self) -> &AnalysisGraph {
        &self.graph
    }

    /// Class by descriptor (`Lpkg/Name;`) or Java name (`pkg.Name`).
    pub fn class_analysis(&self, name: &str) -> Option<&ClassAnalysis> {
        self.graph.classes.resolve(CacheKey::Name(&canonical_class_name(name)))
    }

    pub fn class_analysis_for(&self, image: usize, class_def: &ClassDefItem) -> Option<&ClassAnalysis> {
        self.graph.classes.resolve(CacheKey::Record(RecordKey::new(image, class_def.class_idx)))
    }

    pub fn class_analyses(&self) -> impl Iterator<Item = &ClassAnalysis> {
        self.graph.classes.iter()
    }

    /// Method by dalvik name, `Lpkg/Name;->name(args)ret`.
    pub fn method_analysis(&self, dalvik_name: &str) -> Option<&MethodAnalysis> {
        self.graph.methods.resolve(CacheKey::Name(dalvik_name))
    }

    pub fn method_analysis_for(&self, image: usize, method: &EncodedMethod) -> Option<&MethodAnalysis> {
        self.graph.methods.resolve(CacheKey::Record(RecordKey::new(image, method.method_idx)))
    }

    pub fn method_analysis_count(&self) -> usize {
        self.graph.methods.len()
    }

    pub fn method_analysis_by_index(&self, index: usize) -> Option<&MethodAnalysis> {
        self.graph.methods.get(MethodKey::try_from_index(index)?)
    }

    pub fn method_analyses(&self) -> impl Iterator<Item = &MethodAnalysis> {
        self.graph.methods.iter()
    }

    /// Field by `Lpkg/Name;->name:Type`.
    pub fn field_analysis(&self, name: &str) -> Option<&FieldAnalysis> {
        self.graph.fields.resolve(CacheKey::Name(name))
    }

    pub fn field_analysis_for(&self, image: usize, field: &EncodedField) -> Option<&FieldAnalysis> {
        self.graph.fields.resolve(CacheKey::Record(RecordKey::new(image, field.field_idx)))
    }

    pub fn field_analyses(&self) -> impl Iterator<Item = &FieldAnalysis> {
        self.graph.fields.iter()
    }

    pub fn string_analysis(&self, value: &str) -> Option<&StringAnalysis> {
        self.graph.strings.resolve(CacheKey::Name(value))
    }

    pub fn string_analyses(&self) -> impl Iterator<Item = &StringAnalysis> {
        self.graph.strings.iter()
    }

    /// Instructions of an internal method, by dalvik name.
    pub fn disassembled_method(&self, dalvik_name: &str) -> Option<&[Instruction]> {
        let location = self.method_analysis(dalvik_name)?.location?;
        self.images.get(location.image)?.disassemble(location.method_idx).ok().flatten()
    }

    /// Whether a known method lacks code in the package.
    pub fn is_external(&self, dalvik_name: &str) -> Option<bool> {
        self.method_analysis(dalvik_name).map(|m| m.external)
    }

    pub fn external_method_count(&self) -> usize {
        self.graph.methods.iter().filter(|m| m.external).count()
    }

    pub fn class(&self, key: ClassKey) -> Option<&ClassAnalysis> {
        self.graph.classes.get(key)
    }

    pub fn method(&self, key: MethodKey) -> Option<&MethodAnalysis> {
        self.graph.methods.get(key)
    }

    pub fn field(&self, key: FieldKey) -> Option<&FieldAnalysis> {
        self.graph.fields.get(key)
    }

    pub fn string(&self, key: StringKey) -> Option<&StringAnalysis> {
        self.graph.strings.get(key)
    }
}

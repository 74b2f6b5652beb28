use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;

use log::debug;
use zip::read::ZipArchive;

/// Result alias for APK reading.
pub type ApkResult<T> = Result<T, ApkError>;

/// Errors surfaced while pulling DEX images out of an APK.
#[derive(Debug)]
pub enum ApkError {
    Io(io::Error),
    Zip(zip::result::ZipError),
}

impl std::fmt::Display for ApkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApkError::Io(err) => write!(f, "I/O error: {err}"),
            ApkError::Zip(err) => write!(f, "ZIP error: {err}"),
        }
    }
}

impl std::error::Error for ApkError {}

impl From<io::Error> for ApkError {
    fn from(value: io::Error) -> Self {
        ApkError::Io(value)
    }
}

impl From<zip::result::ZipError> for ApkError {
    fn from(value: zip::result::ZipError) -> Self {
        ApkError::Zip(value)
    }
}

// Upper bound on the buffer reserved from an entry's declared size; larger entries grow as they are read.
const MAX_PREALLOC: u64 = 64 * 1024 * 1024;

fn initial_capacity(declared_size: u64) -> usize {
    usize::try_from(declared_size.min(MAX_PREALLOC)).unwrap_or(0)
}

/// Multi-dex position of a root entry: `classes.dex` is 1, `classesN.dex` is N.
fn multidex_position(name: &str) -> Option<u32> {
    let n = name.strip_prefix("classes")?.strip_suffix(".dex")?;
    match n {
        "" => Some(1),
        _ if n.starts_with('0') => None,
        _ => n.parse().ok().filter(|&n| n >= 2),
    }
}

/// Read the DEX images of an APK on disk, see [`dex_images_from_reader`].
pub fn dex_images(path: impl AsRef<Path>) -> ApkResult<Vec<(String, Vec<u8>)>> {
    let file = File::open(path.as_ref())?;
    dex_images_from_reader(file)
}

/// Read `classes.dex`, `classes2.dex`, ... in load order. Like the platform
/// loader, numbering stops at the first missing entry.
pub fn dex_images_from_reader<R: Read + Seek>(reader: R) -> ApkResult<Vec<(String, Vec<u8>)>> {
    let mut archive = ZipArchive::new(reader)?;
    let mut found = BTreeMap::new();
    for idx in 0..archive.len() {
        let entry = archive.by_index(idx)?;
        if let Some(pos) = multidex_position(entry.name()) {
            found.insert(pos, entry.name().to_string());
        }
    }

    let mut images = vec![];
    for (expected, (pos, name)) in (1..).zip(found) {
        if pos != expected {
            debug!("ignoring {} after the gap at classes{}.dex", name, expected);
            break;
        }
        let mut entry = archive.by_name(&name)?;
        let mut data = Vec::with_capacity(initial_capacity(entry.size()));
        entry.read_to_end(&mut data)?;
        images.push((name, data));
    }
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multidex_names() {
        assert_eq!(multidex_position("classes.dex"), Some(1));
        assert_eq!(multidex_position("classes2.dex"), Some(2));
        assert_eq!(multidex_position("classes12.dex"), Some(12));
        assert_eq!(multidex_position("classes1.dex"), None);
        assert_eq!(multidex_position("classes02.dex"), None);
        assert_eq!(multidex_position("lib/classes.dex"), None);
        assert_eq!(multidex_position("classes.dex.bak"), None);
    }

    #[test]
    fn declared_sizes_do_not_drive_allocation() {
        assert_eq!(initial_capacity(0), 0);
        assert_eq!(initial_capacity(4096), 4096);
        assert_eq!(initial_capacity(u64::MAX), MAX_PREALLOC as usize);
    }
}

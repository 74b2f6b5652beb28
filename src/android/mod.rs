//! Android container formats.

pub mod apk;

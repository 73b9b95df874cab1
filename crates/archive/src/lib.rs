//! archive - JAR 归档读取
//!
//! 条目枚举、MANIFEST.MF 解析

mod archive;
mod manifest;

pub use archive::{Archive, ArchiveEntry, ArchiveError, EntryKind, Result, CLASS_SUFFIX, MANIFEST_PATH};
pub use manifest::Manifest;

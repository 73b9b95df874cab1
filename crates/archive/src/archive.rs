use crate::manifest::Manifest;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// 类文件后缀
pub const CLASS_SUFFIX: &str = ".class";
/// 元数据块路径
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, ArchiveError>;

/// 条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// 目录标记 (以 `/` 结尾)
    Directory,
    /// 编译后的类文件
    Class,
    /// META-INF/MANIFEST.MF
    Manifest,
    /// 其他资源
    Resource,
}

/// 归档条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// 归档内路径, 如 `org/apache/commons/math3/linear/RealMatrix.class`
    pub path: String,
    pub kind: EntryKind,
}

impl ArchiveEntry {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: Self::kind_of(path),
        }
    }

    #[doc(hidden)]
    pub fn kind_of(path: &str) -> EntryKind {
        if path.ends_with('/') {
            EntryKind::Directory
        } else if path.eq_ignore_ascii_case(MANIFEST_PATH) {
            EntryKind::Manifest
        } else if path.ends_with(CLASS_SUFFIX) {
            EntryKind::Class
        } else {
            EntryKind::Resource
        }
    }
}

/// 只读的 JAR 归档视图
#[derive(Debug, Clone)]
pub struct Archive {
    name: String,
    entries: Vec<ArchiveEntry>,
    manifest: Option<Manifest>,
}

impl Archive {
    /// 打开 JAR 文件, 一次读完所有条目和 manifest
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut zip = zip::ZipArchive::new(file)?;

        let mut entries = Vec::with_capacity(zip.len());
        let mut manifest = None;

        for i in 0..zip.len() {
            let mut file = zip.by_index(i)?;
            let entry = ArchiveEntry::new(file.name());

            if entry.kind == EntryKind::Manifest {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes)?;
                manifest = Some(Manifest::parse(&String::from_utf8_lossy(&bytes)));
            }

            entries.push(entry);
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("archive")
            .to_string();

        tracing::debug!("Opened {}: {} entries", path.display(), entries.len());

        Ok(Self {
            name,
            entries,
            manifest,
        })
    }

    /// 从路径列表构建内存归档 (无 manifest)
    pub fn from_paths<I, S>(name: &str, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.to_string(),
            entries: paths
                .into_iter()
                .map(|p| ArchiveEntry::new(p.as_ref()))
                .collect(),
            manifest: None,
        }
    }

    pub fn with_manifest(mut self, manifest: Manifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// 归档名 (文件名去掉扩展名)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    pub fn class_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::Class)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_directory() {
        assert_eq!(ArchiveEntry::kind_of("org/apache/"), EntryKind::Directory);
        assert_eq!(ArchiveEntry::kind_of("META-INF/"), EntryKind::Directory);
    }

    #[test]
    fn test_kind_of_class() {
        assert_eq!(ArchiveEntry::kind_of("a/b/Foo.class"), EntryKind::Class);
        assert_eq!(ArchiveEntry::kind_of("a/b/Foo$Inner.class"), EntryKind::Class);
    }

    #[test]
    fn test_kind_of_manifest_case_insensitive() {
        assert_eq!(ArchiveEntry::kind_of("META-INF/MANIFEST.MF"), EntryKind::Manifest);
        assert_eq!(ArchiveEntry::kind_of("meta-inf/manifest.mf"), EntryKind::Manifest);
    }

    #[test]
    fn test_kind_of_resource() {
        assert_eq!(ArchiveEntry::kind_of("META-INF/LICENSE.txt"), EntryKind::Resource);
        assert_eq!(ArchiveEntry::kind_of("assets/data.classes"), EntryKind::Resource);
    }

    #[test]
    fn test_from_paths_keeps_order() {
        let archive = Archive::from_paths("demo", ["b/", "b/B.class", "a.txt"]);
        let paths: Vec<_> = archive.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["b/", "b/B.class", "a.txt"]);
        assert_eq!(archive.class_count(), 1);
        assert!(archive.manifest().is_none());
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let result = Archive::open(Path::new("/nonexistent/missing.jar"));
        assert!(matches!(result, Err(ArchiveError::Io(_))));
    }
}

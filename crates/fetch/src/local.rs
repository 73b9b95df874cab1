use crate::coordinate::Coordinate;
use crate::fetcher::{sha256_hex, ArtifactFetcher, FetchError, FetchedArtifact, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// 指代默认本地仓库的取值
pub const DEFAULT_LOCAL_REPO: &str = "default";

/// 本地 Maven 布局目录, 如 ~/.m2/repository
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// `~/.m2/repository`
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".m2").join("repository"))
    }

    /// 解析用户给出的本地仓库位置, `default` 表示 [`Self::default_root`]
    ///
    /// 无法确定主目录时返回 `None`
    pub fn resolve_root(value: &str) -> Option<PathBuf> {
        if value == DEFAULT_LOCAL_REPO {
            Self::default_root()
        } else {
            Some(PathBuf::from(value))
        }
    }

    pub fn artifact_path(&self, coordinate: &Coordinate) -> PathBuf {
        self.root.join(coordinate.repository_path())
    }
}

#[async_trait]
impl ArtifactFetcher for LocalRepository {
    async fn fetch(&self, coordinate: &Coordinate, dest_dir: &Path) -> Result<FetchedArtifact> {
        let source = self.artifact_path(coordinate);
        if !tokio::fs::try_exists(&source).await? {
            return Err(FetchError::NotFound(source.display().to_string()));
        }

        tracing::info!("Copying {}", source.display());
        let bytes = tokio::fs::read(&source).await?;

        tokio::fs::create_dir_all(dest_dir).await?;
        let path = dest_dir.join(coordinate.file_name());
        tokio::fs::write(&path, &bytes).await?;

        Ok(FetchedArtifact {
            path,
            size: bytes.len() as u64,
            sha256: sha256_hex(&bytes),
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root_is_m2_repository() {
        let root = LocalRepository::default_root().unwrap();
        assert!(root.ends_with(".m2/repository"));
        assert_eq!(Some(root.clone()), dirs::home_dir().map(|h| h.join(".m2").join("repository")));
    }

    #[test]
    fn test_resolve_root() {
        assert_eq!(
            LocalRepository::resolve_root("default"),
            LocalRepository::default_root()
        );
        assert_eq!(
            LocalRepository::resolve_root("/srv/m2"),
            Some(PathBuf::from("/srv/m2"))
        );
    }

    #[test]
    fn test_artifact_path() {
        let repo = LocalRepository::new(Path::new("/srv/m2"));
        let coordinate = Coordinate::new("org.apache.commons", "commons-math3", "3.6.1").unwrap();
        assert_eq!(
            repo.artifact_path(&coordinate),
            PathBuf::from("/srv/m2/org/apache/commons/commons-math3/3.6.1/commons-math3-3.6.1.jar")
        );
    }
}

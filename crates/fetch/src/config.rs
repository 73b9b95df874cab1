//! 获取配置

use crate::fetcher::{ArtifactFetcher, Result};
use crate::local::LocalRepository;
use crate::remote::RemoteRepository;
use std::path::PathBuf;

/// 默认远程仓库 (Maven Central 镜像)
pub const DEFAULT_REPOSITORY: &str = "https://maven-central.storage-download.googleapis.com/maven2/";

/// 获取配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub repository: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// 设置后从本地仓库复制, 不走网络; 环境变量取 `default` 时为 `~/.m2/repository`
    pub local_repo: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            repository: DEFAULT_REPOSITORY.to_string(),
            username: None,
            password: None,
            local_repo: None,
        }
    }
}

impl FetchConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载, 空值视为未设置
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = get("JARMAP_REPOSITORY") {
            config.repository = v;
        }
        config.username = get("JARMAP_USERNAME");
        config.password = get("JARMAP_PASSWORD");
        if let Some(v) = get("JARMAP_LOCAL_REPO") {
            config.local_repo = LocalRepository::resolve_root(v.trim());
            if config.local_repo.is_none() {
                tracing::warn!("JARMAP_LOCAL_REPO=default but no home directory, using remote repository");
            }
        }

        config
    }

    /// 按配置创建获取器
    pub fn fetcher(&self) -> Result<Box<dyn ArtifactFetcher>> {
        if let Some(root) = &self.local_repo {
            return Ok(Box::new(LocalRepository::new(root)));
        }

        let mut remote = RemoteRepository::new(&self.repository)?;
        if let Some(username) = &self.username {
            remote = remote.with_credentials(username, self.password.as_deref().unwrap_or(""));
        }
        Ok(Box::new(remote))
    }
}

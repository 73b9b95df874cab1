use crate::coordinate::Coordinate;
use async_trait::async_trait;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("HTTP {status} while downloading {url}")]
    Status { status: u16, url: String },
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("Artifact not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// 已获取的归档
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedArtifact {
    pub path: PathBuf,
    /// 字节数
    pub size: u64,
    /// SHA-256 十六进制
    pub sha256: String,
}

/// 归档获取方式
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    /// 获取归档, 存为 `dest_dir/<artifact>-<version>.jar`
    async fn fetch(&self, coordinate: &Coordinate, dest_dir: &Path) -> Result<FetchedArtifact>;

    /// 来源描述, 用于日志
    fn describe(&self) -> String;
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

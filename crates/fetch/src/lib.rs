//! fetch - 从 Maven 仓库获取 JAR
//!
//! 远程 HTTP 下载或本地仓库复制, 只尝试一次

mod config;
mod coordinate;
mod fetcher;
mod local;
mod remote;

pub use config::{FetchConfig, DEFAULT_REPOSITORY};
pub use coordinate::Coordinate;
pub use fetcher::{ArtifactFetcher, FetchError, FetchedArtifact, Result};
pub use local::{LocalRepository, DEFAULT_LOCAL_REPO};
pub use remote::RemoteRepository;

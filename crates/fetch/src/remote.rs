use crate::coordinate::Coordinate;
use crate::fetcher::{ArtifactFetcher, FetchError, FetchedArtifact, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use url::Url;

/// HTTP 基本认证
#[derive(Debug, Clone)]
struct Credentials {
    username: String,
    password: String,
}

/// 远程 Maven 仓库
pub struct RemoteRepository {
    client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl RemoteRepository {
    pub fn new(base_url: &str) -> Result<Self> {
        // join 需要以 / 结尾, 否则最后一段会被替换
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(20))
            .timeout(Duration::from_secs(120))
            .http1_only()
            .user_agent(concat!("jarmap/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
            credentials: None,
        })
    }

    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        });
        self
    }

    /// 归档的下载地址
    pub fn artifact_url(&self, coordinate: &Coordinate) -> Result<Url> {
        Ok(self.base_url.join(&coordinate.repository_path())?)
    }
}

#[async_trait]
impl ArtifactFetcher for RemoteRepository {
    async fn fetch(&self, coordinate: &Coordinate, dest_dir: &Path) -> Result<FetchedArtifact> {
        let url = self.artifact_url(coordinate)?;
        tracing::info!("Downloading {}", url);

        let mut request = self.client.get(url.clone());
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let mut response = request.send().await?;
        if response.status() != StatusCode::OK {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let total = response.content_length().filter(|len| *len > 0);
        match total {
            Some(len) => tracing::info!("Size: {} KB", len / 1024),
            None => tracing::info!("Size unknown, progress will not be reported"),
        }

        tokio::fs::create_dir_all(dest_dir).await?;
        let path = dest_dir.join(coordinate.file_name());
        let mut file = tokio::fs::File::create(&path).await?;

        let started = std::time::Instant::now();
        let mut hasher = Sha256::new();
        let mut size: u64 = 0;
        let mut last_percent: u64 = 0;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            hasher.update(&chunk);
            size += chunk.len() as u64;

            if let Some(total) = total {
                let percent = size * 100 / total;
                if percent >= last_percent + 5 {
                    tracing::info!("Progress: {}%", percent);
                    last_percent = percent;
                }
            }
        }
        file.flush().await?;

        tracing::info!(
            "Downloaded {} bytes in {:.2}s",
            size,
            started.elapsed().as_secs_f64()
        );

        Ok(FetchedArtifact {
            path,
            size,
            sha256: format!("{:x}", hasher.finalize()),
        })
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}

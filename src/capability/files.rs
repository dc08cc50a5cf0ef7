use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// How [`LocalFiles::write`] treats an existing file at the target path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Create the file, or truncate it if it already exists.
    #[default]
    Overwrite,
    /// Refuse to touch an existing file.
    CreateNew,
}

/// Outcome of a write. Write failures are reported here, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WriteStatus {
    Created { path: PathBuf },
    AlreadyExists { path: PathBuf },
    Failed { path: PathBuf, reason: String },
}

impl WriteStatus {
    pub fn is_written(&self) -> bool {
        matches!(self, WriteStatus::Created { .. })
    }

    pub fn path(&self) -> &Path {
        match self {
            WriteStatus::Created { path }
            | WriteStatus::AlreadyExists { path }
            | WriteStatus::Failed { path, .. } => path,
        }
    }
}

impl fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteStatus::Created { path } => write!(f, "New file created: {}", path.display()),
            WriteStatus::AlreadyExists { path } => {
                write!(f, "File already exists: {}", path.display())
            }
            WriteStatus::Failed { reason, .. } => write!(f, "Error writing file: {reason}"),
        }
    }
}

/// Whole-file read and write.
///
/// `read` failures are errors the caller must propagate. `write` failures are
/// folded into the returned [`WriteStatus`].
pub trait FileAccess {
    async fn read(&self, path: &Path) -> io::Result<String>;
    async fn write(&self, path: &Path, content: &str) -> WriteStatus;
}

/// [`FileAccess`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles {
    mode: WriteMode,
}

impl LocalFiles {
    pub fn new(mode: WriteMode) -> Self {
        Self { mode }
    }

    async fn write_inner(&self, path: &Path, content: &str) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true);
        match self.mode {
            WriteMode::Overwrite => options.create(true).truncate(true),
            WriteMode::CreateNew => options.create_new(true),
        };
        let mut file = options.open(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await
    }
}

impl FileAccess for LocalFiles {
    async fn read(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write(&self, path: &Path, content: &str) -> WriteStatus {
        let path_buf = path.to_path_buf();
        match self.write_inner(path, content).await {
            Ok(()) => WriteStatus::Created { path: path_buf },
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                WriteStatus::AlreadyExists { path: path_buf }
            }
            Err(e) => WriteStatus::Failed {
                path: path_buf,
                reason: e.to_string(),
            },
        }
    }
}

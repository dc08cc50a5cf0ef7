//! In-memory capability doubles shared by the pipeline tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::capability::{FileAccess, TextGenerator, WriteStatus};
use crate::inference::EndpointError;

#[derive(Default)]
pub struct MemoryFiles {
    files: RefCell<HashMap<PathBuf, String>>,
    pub reads: RefCell<Vec<PathBuf>>,
    pub writes: RefCell<Vec<(PathBuf, String)>>,
    fail_writes: bool,
}

impl MemoryFiles {
    pub fn with(files: &[(&str, &str)]) -> Self {
        let map = files
            .iter()
            .map(|(p, c)| (PathBuf::from(p), c.to_string()))
            .collect();
        Self {
            files: RefCell::new(map),
            ..Default::default()
        }
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files.borrow().get(Path::new(path)).cloned()
    }
}

impl FileAccess for MemoryFiles {
    async fn read(&self, path: &Path) -> io::Result<String> {
        self.reads.borrow_mut().push(path.to_path_buf());
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No such file or directory"))
    }

    async fn write(&self, path: &Path, content: &str) -> WriteStatus {
        self.writes
            .borrow_mut()
            .push((path.to_path_buf(), content.to_string()));
        if self.fail_writes {
            return WriteStatus::Failed {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            };
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        WriteStatus::Created {
            path: path.to_path_buf(),
        }
    }
}

pub struct FakeGenerator {
    reply: Result<String, u16>,
    pub prompts: RefCell<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, EndpointError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(EndpointError::ApiError {
                status: *status,
                message: "mock error".into(),
            }),
        }
    }
}

use serde::Serialize;
use thiserror::Error;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable size: one decimal below 10 of a unit, none otherwise.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 || value >= 10.0 {
        format!("{:.0} {}", value, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

fn size_label(limit: &u64) -> String {
    format_bytes(*limit)
}

/// Whether a MIME type can be previewed as an avatar.
pub fn is_image(mime: &str) -> bool {
    mime.get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// A file dropped onto an attachment zone, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime: mime.into(),
        }
    }

    /// `"report.pdf (1.5 MB)"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, format_bytes(self.size))
    }
}

/// Why a file was not staged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StageError {
    #[error("{name} is empty")]
    Empty { name: String },

    #[error("{name} is larger than {}", size_label(.limit))]
    TooLarge { name: String, limit: u64 },

    #[error("adding {name} would exceed the {} total limit", size_label(.limit))]
    TotalTooLarge { name: String, limit: u64 },

    #[error("{name} is already attached")]
    Duplicate { name: String },
}

/// Drag-and-drop staging list for project and message attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFiles {
    files: Vec<StagedFile>,
    max_file_size: u64,
    max_total_size: u64,
}

impl Default for StagedFiles {
    fn default() -> Self {
        Self::new(10 * 1024 * 1024, 50 * 1024 * 1024)
    }
}

impl StagedFiles {
    pub fn new(max_file_size: u64, max_total_size: u64) -> Self {
        Self {
            files: Vec::new(),
            max_file_size,
            max_total_size,
        }
    }

    /// Stage one file. Duplicates are matched on name and size.
    pub fn add(&mut self, file: StagedFile) -> Result<(), StageError> {
        if file.size == 0 {
            return Err(StageError::Empty { name: file.name });
        }
        if file.size > self.max_file_size {
            return Err(StageError::TooLarge {
                name: file.name,
                limit: self.max_file_size,
            });
        }
        if self
            .files
            .iter()
            .any(|f| f.name == file.name && f.size == file.size)
        {
            return Err(StageError::Duplicate { name: file.name });
        }
        if self.total_size() + file.size > self.max_total_size {
            return Err(StageError::TotalTooLarge {
                name: file.name,
                limit: self.max_total_size,
            });
        }
        self.files.push(file);
        Ok(())
    }

    /// Stage a whole drop; returns the files that were refused.
    pub fn add_all(&mut self, files: impl IntoIterator<Item = StagedFile>) -> Vec<StageError> {
        files
            .into_iter()
            .filter_map(|f| self.add(f).err())
            .collect()
    }

    pub fn remove(&mut self, name: &str) -> Option<StagedFile> {
        let idx = self.files.iter().position(|f| f.name == name)?;
        Some(self.files.remove(idx))
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// `"3 files, 4.2 MB"`
    pub fn summary(&self) -> String {
        let n = self.files.len();
        let noun = if n == 1 { "file" } else { "files" };
        format!("{n} {noun}, {}", format_bytes(self.total_size()))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

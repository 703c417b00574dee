use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::shared::error::AnalysisError;
use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

/// A temporary file holding staged input. Deleted on drop.
pub struct StagedFile {
    file: NamedTempFile,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Writes video frames and uploaded buffers to temporary files so they can
/// be analyzed through the same path as images on disk.
///
/// Files land in `dir` when set, otherwise in the system temp directory.
pub struct FrameStager {
    writer: Box<dyn ImageWriter>,
    dir: Option<PathBuf>,
}

impl FrameStager {
    pub fn new(writer: Box<dyn ImageWriter>, dir: Option<PathBuf>) -> Self {
        Self { writer, dir }
    }

    fn builder_file(&self, prefix: &str, suffix: &str) -> std::io::Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix).suffix(suffix);
        match &self.dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }

    /// Encodes `frame` as a JPEG named after its index.
    pub fn stage_frame(&self, frame: &Frame) -> Result<StagedFile, AnalysisError> {
        let file = self.builder_file(&format!("temp_frame_{}_", frame.index()), ".jpg")?;
        self.writer
            .write(file.path(), frame)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        Ok(StagedFile { file })
    }

    /// Copies an in-memory upload to disk, keeping `extension` so the file
    /// type can still be recognised.
    pub fn stage_bytes(&self, bytes: &[u8], extension: &str) -> Result<StagedFile, AnalysisError> {
        let suffix = format!(".{}", extension.trim_start_matches('.'));
        let mut file = self.builder_file("upload_", &suffix)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(StagedFile { file })
    }
}

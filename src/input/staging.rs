//! Scoped transient storage for documents handed to the format parsers
//!
//! A [`StagedInput`] owns whatever resource backs the document while it is
//! being parsed. The resource is released when the handle is dropped, so
//! every exit path of an extraction (success, empty text, parse failure)
//! cleans up. Cleanup failures are logged and never surface to the caller.

use crate::error::Result;
use crate::input::file_detector::DocumentFormat;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// How documents are staged before parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Staging {
    /// Write the bytes to a named temporary file
    #[default]
    TempFile,
    /// Parse straight from memory
    Memory,
}

/// Acquires staged inputs according to a [`Staging`] strategy
#[derive(Debug, Clone, Default)]
pub struct Stager {
    strategy: Staging,
    dir: Option<PathBuf>,
}

impl Stager {
    pub fn new(strategy: Staging) -> Self {
        Self { strategy, dir: None }
    }

    /// Stage temporary files under `dir` instead of the system temp directory
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Acquire a staged copy of `bytes`
    pub fn stage<'a>(&self, bytes: &'a [u8], format: DocumentFormat) -> Result<StagedInput<'a>> {
        match self.strategy {
            Staging::Memory => Ok(StagedInput {
                memory: Some(bytes),
                file: None,
            }),
            Staging::TempFile => {
                let mut builder = tempfile::Builder::new();
                builder.prefix("lumora-").suffix(format.suffix());

                let mut file = match &self.dir {
                    Some(dir) => builder.tempfile_in(dir)?,
                    None => builder.tempfile()?,
                };
                file.write_all(bytes)?;
                file.flush()?;
                debug!("Staged {} bytes at {}", bytes.len(), file.path().display());

                Ok(StagedInput {
                    memory: None,
                    file: Some(file),
                })
            }
        }
    }
}

/// A document held in transient storage for the duration of one parse
pub struct StagedInput<'a> {
    memory: Option<&'a [u8]>,
    file: Option<NamedTempFile>,
}

impl<'a> StagedInput<'a> {
    /// Path of the backing file, if staged on disk
    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|f| f.path())
    }

    /// Read the staged bytes back
    pub fn bytes(&self) -> Result<Cow<'a, [u8]>> {
        match (&self.memory, &self.file) {
            (Some(bytes), _) => Ok(Cow::Borrowed(*bytes)),
            (None, Some(file)) => Ok(Cow::Owned(std::fs::read(file.path())?)),
            (None, None) => Ok(Cow::Borrowed(&[])),
        }
    }

    /// Release the backing resource now instead of at drop
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(file) = self.file.take() {
            let path = file.path().to_path_buf();
            match file.close() {
                Ok(()) => debug!("Released staged file {}", path.display()),
                Err(e) => warn!("Failed to remove staged file {}: {}", path.display(), e),
            }
        }
        self.memory = None;
    }
}

impl Drop for StagedInput<'_> {
    fn drop(&mut self) {
        self.release_inner();
    }
}

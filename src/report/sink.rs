//! Fan-out sink for rendered report text.
//!
//! The renderer is a pure projection; this object owns the output
//! streams. The caller assembles the sink at the command boundary and
//! the underlying file handle is released when the sink drops.

use crate::utils::error::OutputError;
use log::debug;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Fan-out writer: every emitted chunk goes to all attached streams
#[derive(Default)]
pub struct ReportSink {
    streams: Vec<Box<dyn Write>>,
}

impl ReportSink {
    /// Create a sink with no streams attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the terminal
    pub fn with_stdout(mut self) -> Self {
        self.streams.push(Box::new(io::stdout()));
        self
    }

    /// Attach a report file, creating parent directories as needed
    ///
    /// # Errors
    /// * `OutputError::InvalidPath` - Empty path, or path is a directory
    /// * `OutputError::WriteFailed` - File cannot be created
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self, OutputError> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            return Err(OutputError::InvalidPath("Path is empty".to_string()));
        }

        if path.exists() && path.is_dir() {
            return Err(OutputError::InvalidPath(format!(
                "Path is a directory: {}",
                path.display()
            )));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directories: {}", parent.display());
                std::fs::create_dir_all(parent).map_err(|e| {
                    OutputError::InvalidPath(format!(
                        "Cannot create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(OutputError::WriteFailed)?;
        self.streams.push(Box::new(file));

        Ok(self)
    }

    /// Write a chunk of report text to every attached stream
    pub fn emit(&mut self, text: &str) -> Result<(), OutputError> {
        for stream in &mut self.streams {
            stream
                .write_all(text.as_bytes())
                .map_err(OutputError::WriteFailed)?;
        }
        Ok(())
    }

    /// Flush all attached streams
    pub fn flush(&mut self) -> Result<(), OutputError> {
        for stream in &mut self.streams {
            stream.flush().map_err(OutputError::WriteFailed)?;
        }
        Ok(())
    }
}

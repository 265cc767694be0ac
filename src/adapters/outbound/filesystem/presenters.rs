use std::path::PathBuf;

use anyhow::Context;

use crate::ports::outbound::OutputPresenter;
use crate::shared::Result;

/// Writes formatted output to stdout.
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        println!("{}", content);
        Ok(())
    }
}

/// Writes formatted output to a file.
pub struct FilePresenter {
    path: PathBuf,
}

impl FilePresenter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl OutputPresenter for FilePresenter {
    fn present(&self, content: &str) -> Result<()> {
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write output to {}", self.path.display()))?;
        Ok(())
    }
}

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::Result;
use crate::models::{EmojiName, Word};

mod imagemagick;

pub use imagemagick::ImageMagickRenderer;

#[async_trait]
pub trait Renderer: Send + Sync {
    /// Draws `word` into a transparent PNG named after `name`.
    async fn render(&self, word: &Word, name: &EmojiName) -> Result<RenderedEmoji>;
}

/// A file on disk that is removed when this value goes out of scope.
#[derive(Debug)]
pub struct RenderedEmoji {
    path: PathBuf,
}

impl RenderedEmoji {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RenderedEmoji {
    fn drop(&mut self) {
        remove_quietly(&self.path);
    }
}

fn remove_quietly(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove {}: {}", path.display(), e),
    }
}

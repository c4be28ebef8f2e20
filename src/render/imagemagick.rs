use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::RenderSettings;
use crate::error::{Result, SlackmojiError};
use crate::models::{EmojiName, Word};
use crate::render::{RenderedEmoji, Renderer};

/// Renders labels with ImageMagick's `convert`, in two passes: draw the text on
/// a white square, then knock the white out.
pub struct ImageMagickRenderer {
    settings: RenderSettings,
    out_dir: PathBuf,
}

impl ImageMagickRenderer {
    pub fn new(settings: RenderSettings, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            out_dir: out_dir.into(),
        }
    }

    fn label_args(&self, label: &str, scratch: &Path) -> Vec<OsString> {
        let size = self.settings.size;
        let mut png32 = OsString::from("PNG32:");
        png32.push(scratch);

        vec![
            "-size".into(),
            format!("{}x{}", size, size).into(),
            "-gravity".into(),
            "center".into(),
            "-fill".into(),
            "black".into(),
            "-kerning".into(),
            self.settings.kerning.to_string().into(),
            "-font".into(),
            self.settings.font.clone().into_os_string(),
            format!("label:{}", label).into(),
            png32,
        ]
    }

    fn transparency_args(&self, scratch: &Path, output: &Path) -> Vec<OsString> {
        vec![
            scratch.as_os_str().to_owned(),
            "-transparent".into(),
            "white".into(),
            "-fuzz".into(),
            format!("{}%", self.settings.fuzz).into(),
            output.as_os_str().to_owned(),
        ]
    }

    async fn convert(&self, word: &Word, args: Vec<OsString>) -> Result<()> {
        let program = &self.settings.program;
        debug!("{} {:?}", program, args);

        let status = Command::new(program)
            .args(&args)
            .status()
            .await
            .map_err(|e| render_failed(word, format!("could not run {}: {}", program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(render_failed(word, format!("{} exited with {}", program, status)))
        }
    }
}

#[async_trait]
impl Renderer for ImageMagickRenderer {
    async fn render(&self, word: &Word, name: &EmojiName) -> Result<RenderedEmoji> {
        let scratch = RenderedEmoji::new(self.out_dir.join(name.scratch_file_name()));
        let output = RenderedEmoji::new(self.out_dir.join(name.file_name()));
        info!("Rendering {}", output.path().display());

        self.convert(word, self.label_args(&word.label_text(), scratch.path()))
            .await?;
        self.convert(word, self.transparency_args(scratch.path(), output.path()))
            .await?;
        drop(scratch);

        if !output.path().is_file() {
            return Err(render_failed(
                word,
                format!("{} was not written", output.path().display()),
            ));
        }

        Ok(output)
    }
}

fn render_failed(word: &Word, reason: String) -> SlackmojiError {
    SlackmojiError::RenderFailed {
        word: word.to_string(),
        reason,
    }
}

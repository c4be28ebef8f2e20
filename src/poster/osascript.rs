use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::Result;
use crate::poster::MessagePoster;

const OSASCRIPT: &str = "osascript";

/// Compiled into the binary so posting works from any working directory.
const BUNDLED_SCRIPT: &str = include_str!("../../scripts/paste_in_slack.applescript");

/// Types the message into the foreground Slack window through an AppleScript.
pub struct OsaScriptPoster {
    program: String,
    script: Option<PathBuf>,
}

impl OsaScriptPoster {
    /// `None` runs the bundled script.
    pub fn new(script: Option<PathBuf>) -> Self {
        Self {
            program: OSASCRIPT.to_string(),
            script,
        }
    }

    #[cfg(test)]
    fn with_program(program: &str, script: Option<PathBuf>) -> Self {
        Self {
            program: program.to_string(),
            script,
        }
    }

    fn args(&self, text: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = match &self.script {
            Some(path) => vec![path.clone().into_os_string()],
            None => BUNDLED_SCRIPT
                .lines()
                .filter(|line| !line.trim().is_empty())
                .flat_map(|line| [OsString::from("-e"), OsString::from(line)])
                .collect(),
        };
        args.push(text.into());
        args
    }
}

#[async_trait]
impl MessagePoster for OsaScriptPoster {
    async fn post(&self, text: &str) -> Result<()> {
        let args = self.args(text);
        debug!("{} {:?}", self.program, args);

        let status = Command::new(&self.program).args(&args).status().await?;

        if !status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} exited with {}", self.program, status),
            )
            .into());
        }

        info!("Posted message to Slack");
        Ok(())
    }
}

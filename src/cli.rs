use clap::Parser;
use std::path::PathBuf;

/// Turn the words of a message into Slack emoji, upload the missing ones and
/// post the message back as emoji.
#[derive(Parser, Debug, Default)]
#[command(name = "slackmoji", version)]
pub struct Cli {
    /// Defaults to the $SLACK_TEAM environment variable.
    #[arg(short, long)]
    pub team_name: Option<String>,

    /// Defaults to the $SLACK_COOKIE environment variable.
    #[arg(short, long)]
    pub cookie: Option<String>,

    /// Original text to send
    #[arg(short, long)]
    pub message: Option<String>,

    /// Font file used for the label
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Canvas width and height in pixels
    #[arg(long, value_name = "PX")]
    pub size: Option<u32>,

    /// Colour distance (percent) still treated as white background
    #[arg(long, value_name = "PERCENT")]
    pub fuzz: Option<u32>,

    /// ImageMagick program to invoke
    #[arg(long, value_name = "PROGRAM")]
    pub convert: Option<String>,

    /// AppleScript that pastes the message into Slack (defaults to the bundled
    /// scripts/paste_in_slack.applescript)
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Directory the per-word images are written to
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

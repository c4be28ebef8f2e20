use anyhow::Result;
use config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::SlackmojiError;

const DEFAULT_FONT: &str = "/System/Library/Fonts/Helvetica.ttc";

/// Everything a run needs, fixed before any network or subprocess work starts.
#[derive(Debug, Clone)]
pub struct Settings {
    pub team_name: String,
    pub cookie: String,
    pub message: String,
    pub render: RenderSettings,
    /// `None` uses the AppleScript compiled into the binary.
    pub script: Option<PathBuf>,
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub program: String,
    pub font: PathBuf,
    pub size: u32,
    pub kerning: i32,
    pub fuzz: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            program: "convert".to_string(),
            font: PathBuf::from(DEFAULT_FONT),
            size: 128,
            kerning: -1,
            fuzz: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostSettings {
    pub script: Option<PathBuf>,
}

/// Optional `slackmoji.toml` (or .yaml/.json) in the working directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub render: RenderSettings,
    pub post: PostSettings,
}

impl FileSettings {
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(File::with_name("slackmoji").required(false))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

/// `$SLACK_TEAM` and `$SLACK_COOKIE`.
#[derive(Debug, Clone, Default)]
pub struct EnvDefaults {
    pub team_name: Option<String>,
    pub cookie: Option<String>,
}

impl EnvDefaults {
    pub fn load() -> Result<Self> {
        let env = config::Config::builder()
            .add_source(Environment::with_prefix("SLACK"))
            .build()?;

        Ok(Self {
            team_name: env.get_string("team").ok(),
            cookie: env.get_string("cookie").ok(),
        })
    }
}

pub trait Prompt {
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", question)?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn or_prompt(value: Option<String>, prompt: &mut dyn Prompt, question: &str) -> Result<String> {
    match non_empty(value) {
        Some(v) => Ok(v),
        None => Ok(prompt.ask(question)?),
    }
}

/// Flag, then environment, then prompt. Fails when team name or cookie is
/// still empty afterwards.
pub fn resolve(
    cli: Cli,
    env: EnvDefaults,
    file: FileSettings,
    prompt: &mut dyn Prompt,
) -> Result<Settings> {
    let team_name = or_prompt(
        non_empty(cli.team_name).or(env.team_name),
        prompt,
        "Please enter the team name: ",
    )?;
    let cookie = or_prompt(
        non_empty(cli.cookie).or(env.cookie),
        prompt,
        "Please enter the \"/customize/emoji\" cookie: ",
    )?;
    let message = or_prompt(cli.message, prompt, "please enter message: ")?;

    if cookie.trim().is_empty() {
        return Err(SlackmojiError::MissingCredential("Cookie").into());
    }
    if team_name.trim().is_empty() {
        return Err(SlackmojiError::MissingCredential("Team name").into());
    }

    let mut render = file.render;
    if let Some(program) = cli.convert {
        render.program = program;
    }
    if let Some(font) = cli.font {
        render.font = font;
    }
    if let Some(size) = cli.size {
        render.size = size;
    }
    if let Some(fuzz) = cli.fuzz {
        render.fuzz = fuzz;
    }

    Ok(Settings {
        team_name: team_name.trim().to_string(),
        cookie: cookie.trim().to_string(),
        message,
        render,
        script: cli.script.or(file.post.script),
        out_dir: cli.out_dir.unwrap_or_else(|| PathBuf::from(".")),
    })
}

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::{Result, SlackmojiError};

static EMOJI_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9_+'-]+$")
        .expect("Invalid emoji name regex")
});

/// One whitespace-delimited token of the message, kept as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word(String);

impl Word {
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(Self(text.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text drawn on the image.
    pub fn label_text(&self) -> String {
        self.0.to_uppercase()
    }

    /// Name the emoji is registered under. Not validated yet.
    pub fn emoji_name(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// NewType pattern: a name that is safe both for the registry and as a file stem
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmojiName(String);

impl EmojiName {
    pub fn parse(name: &str) -> Result<Self> {
        if EMOJI_NAME_REGEX.is_match(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(SlackmojiError::InvalidEmojiName(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.0)
    }

    pub fn scratch_file_name(&self) -> String {
        format!("tmp-{}.png", self.0)
    }
}

impl fmt::Display for EmojiName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    words: Vec<Word>,
}

impl Message {
    pub fn parse(text: &str) -> Self {
        Self {
            words: text.split_whitespace().filter_map(Word::new).collect(),
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `hello world` becomes `:hello: :world:`.
    pub fn slackmoji_text(&self) -> String {
        self.words
            .iter()
            .map(|word| format!(":{}:", word.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

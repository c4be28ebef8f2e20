use async_trait::async_trait;

use crate::error::Result;

mod osascript;

pub use osascript::OsaScriptPoster;

/// Delivers the finished message to the chat client.
#[async_trait]
pub trait MessagePoster: Send + Sync {
    async fn post(&self, text: &str) -> Result<()>;
}

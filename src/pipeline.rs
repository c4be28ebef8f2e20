use std::collections::HashSet;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::models::{BatchSummary, EmojiName, Message};
use crate::parsers::UploadOutcome;
use crate::poster::MessagePoster;
use crate::registry::EmojiRegistry;
use crate::render::Renderer;

/// Uploads an emoji for every word that does not have one yet, then posts the
/// message as emoji. Only a failed registry read aborts the batch.
pub async fn run_batch(
    registry: &EmojiRegistry,
    renderer: &dyn Renderer,
    poster: &dyn MessagePoster,
    message: &Message,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    if message.is_empty() {
        warn!("Message has no words, nothing to do");
        return Ok(summary);
    }

    let existing = registry.existing_emoji().await?;
    let mut handled: HashSet<String> = HashSet::new();

    for word in message.words() {
        let emoji_name = word.emoji_name();
        info!("Processing {}.", word);

        if existing.contains(&emoji_name) || handled.contains(&emoji_name) {
            info!("Skipping {}. Emoji already exists", emoji_name);
            summary.skipped += 1;
            continue;
        }
        handled.insert(emoji_name.clone());

        let name = match EmojiName::parse(&emoji_name) {
            Ok(name) => name,
            Err(e) => {
                error!("Skipping {}: {}, rejected before upload", emoji_name, e);
                summary.failed += 1;
                continue;
            }
        };

        let rendered = match renderer.render(word, &name).await {
            Ok(rendered) => rendered,
            Err(e) => {
                error!("Could not render {}: {}", name, e);
                summary.failed += 1;
                continue;
            }
        };

        match registry.upload(&name, rendered.path()).await {
            Ok(UploadOutcome::Accepted) => {
                info!("{} upload complete.", rendered.path().display());
                summary.uploaded += 1;
            }
            Ok(UploadOutcome::Rejected(reason)) => {
                error!("Error with uploading {}: {}", name, reason);
                summary.failed += 1;
            }
            Err(e) => {
                error!("Error with uploading {}: {}", name, e);
                summary.failed += 1;
            }
        }
    }

    if let Err(e) = poster.post(&message.slackmoji_text()).await {
        warn!("Could not post message to Slack: {}", e);
    }

    Ok(summary)
}

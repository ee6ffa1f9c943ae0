//! Per-message pipeline: soft trigger, blocklist enforcement, then command
//! dispatch. Enforcement wins over dispatch when a message is both.

use crate::{GraywardBot, Result};
use grayward_core::{Invocation, ReportStore, dispatch, moderation};
use teloxide::{
    payloads::{SendMessageSetters, SendPhotoSetters},
    requests::Requester,
    types::{ChatId, InputFile, Message, ReplyParameters, UserId},
};
use tracing::{info, warn};
use url::Url;

const CURSED_IMAGE_URL: &str = "https://cdn.discordapp.com/emojis/1337169044742078565.png";
const CURSED_IMAGE_CAPTION: &str = "🩸 The Dark Ones Whisper...";

/// Handle any inbound message (commands or regular text).
pub async fn handle_message(bot: GraywardBot, msg: Message) -> Result<()> {
    // Bot-authored messages are ignored to prevent feedback loops.
    let Some(author) = msg.from.clone() else {
        return Ok(());
    };
    if author.is_bot {
        return Ok(());
    }
    let Some(text) = msg.text() else {
        return Ok(());
    };

    if moderation::is_soft_trigger(text) {
        let image = Url::parse(CURSED_IMAGE_URL)?;
        bot.bot
            .send_photo(msg.chat.id, InputFile::url(image))
            .caption(CURSED_IMAGE_CAPTION)
            .await?;
        return Ok(());
    }

    // One snapshot serves both enforcement and dispatch; a storage failure
    // degrades to an empty list rather than dropping the message.
    let snapshot = match ReportStore::list_all(bot.engine.as_ref()).await {
        Ok(ids) => ids,
        Err(e) => {
            warn!("Error loading banned IDs: {e}");
            Vec::new()
        }
    };

    let hits = moderation::blocked_ids(text, &snapshot);
    if !hits.is_empty() {
        info!(
            "[{}] Flagged message referencing: {}",
            author.full_name(),
            hits.join(", ")
        );
        // No retry on delete failure (already gone, missing rights).
        if let Err(e) = bot.bot.delete_message(msg.chat.id, msg.id).await {
            warn!("Failed to delete flagged message: {e}");
        }
        bot.bot
            .send_message(
                msg.chat.id,
                format!(
                    "{}, your message has been obliterated for containing a cursed ID.",
                    author.full_name()
                ),
            )
            .await?;
        return Ok(());
    }

    // Unrecognized first tokens are normal chat traffic, not an error.
    let Some(invocation) = Invocation::parse(text) else {
        return Ok(());
    };

    info!(
        "[{}] Command: {:?} {:?}",
        author.full_name(),
        invocation.command,
        invocation.args
    );

    if invocation.command.requires_admin() && !is_admin(&bot, msg.chat.id, author.id).await {
        reply(&bot, &msg, invocation.command.auth_rejection()).await?;
        return Ok(());
    }

    let reply_text = dispatch(
        &invocation,
        &snapshot,
        bot.engine.as_ref(),
        bot.engine.as_ref(),
    )
    .await;
    reply(&bot, &msg, &reply_text).await?;

    Ok(())
}

/// Whether the user holds administrator rights in the chat. Lookup failures
/// deny rather than grant.
async fn is_admin(bot: &GraywardBot, chat_id: ChatId, user_id: UserId) -> bool {
    match bot.bot.get_chat_member(chat_id, user_id).await {
        Ok(member) => member.is_privileged(),
        Err(e) => {
            warn!("Failed to resolve chat member rights: {e}");
            false
        }
    }
}

async fn reply(bot: &GraywardBot, msg: &Message, text: &str) -> Result<()> {
    bot.bot
        .send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}

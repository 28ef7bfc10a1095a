use anyhow::{anyhow, Result};
use lazy_regex::regex;

/// Telegram's limit for a plain text message.
pub const MAX_MESSAGE_LEN: usize = 4096;
/// Telegram's limit for a photo caption.
pub const MAX_CAPTION_LEN: usize = 1024;

pub fn validate_invitation_text(text: &str) -> Result<()> {
    validate_body(text, MAX_MESSAGE_LEN)
}

pub fn validate_invitation_caption(text: &str) -> Result<()> {
    validate_body(text, MAX_CAPTION_LEN)
}

fn validate_body(text: &str, max_len: usize) -> Result<()> {
    if text.trim().is_empty() {
        return Err(anyhow!("Invitation text cannot be empty"));
    }

    let len = text.chars().count();
    if len > max_len {
        return Err(anyhow!(
            "Invitation text is too long ({len} characters, max {max_len})"
        ));
    }

    Ok(())
}

/// Returns true when `text` is exactly a YouTube watch or short link. Extra
/// query parameters or a fragment after the video id are allowed.
pub fn is_valid_video_link(text: &str) -> bool {
    regex!(r"^(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)[a-zA-Z0-9_-]{11}(?:[?&#]\S*)?$")
        .is_match(text)
}

/// Validates a video link and returns it with an explicit scheme so it can be
/// used as a URL button.
pub fn normalize_video_link(text: &str) -> Result<String> {
    let link = text.trim();

    if link.is_empty() || link.contains(char::is_whitespace) || !is_valid_video_link(link) {
        return Err(anyhow!("Not a valid YouTube link"));
    }

    if link.starts_with("http://") || link.starts_with("https://") {
        Ok(link.to_string())
    } else {
        Ok(format!("https://{link}"))
    }
}

/// Extracts the invitation id from a `/start` deep-link payload (`inv_<id>`).
pub fn parse_invitation_payload(payload: &str) -> Option<&str> {
    payload
        .trim()
        .strip_prefix("inv_")
        .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
}

//! Texts, keyboards and callback payloads shown by the bot.

use crate::invitation::{GuestResponse, Invitation, InvitationSummary, RecordError, Rsvp, Tally};
use crate::utils::datetime::{format_date, format_datetime};
use reqwest::Url;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

pub const MENU_CREATE: &str = "➕ Create invitation";
pub const MENU_STATS: &str = "📊 Statistics";
pub const MENU_LIST: &str = "📋 Invitations";

pub const CREATE_TEXT: &str = "create_text";
pub const CREATE_PHOTO: &str = "create_photo";
pub const SKIP_VIDEO: &str = "skip_video";

const RSVP_PREFIX: &str = "rsvp";

pub const EXAMPLE_INVITATION: &str = "💑 Dear friends!\n\n\
    We are delighted to invite you to our wedding!\n\n\
    👰 Bride: Malika\n\
    🤵 Groom: Javohir\n\n\
    📅 Date: 15 December 2025\n\
    🕐 Time: 18:00\n\
    📍 Venue: Grand Palace";

/// Telegram's limit for a single text message.
pub const MESSAGE_LIMIT: usize = 4096;

pub fn admin_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(MENU_CREATE)],
        vec![KeyboardButton::new(MENU_STATS), KeyboardButton::new(MENU_LIST)],
    ])
    .resize_keyboard()
}

pub fn type_choice_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("📝 Text only", CREATE_TEXT)],
        vec![InlineKeyboardButton::callback("🖼 With photo", CREATE_PHOTO)],
    ])
}

pub fn skip_video_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "⏭️ Skip",
        SKIP_VIDEO,
    )]])
}

pub fn rsvp_callback(inv_id: &str, response: Rsvp) -> String {
    format!("{RSVP_PREFIX}:{inv_id}:{response}")
}

/// Parses `rsvp:<inv_id>:<yes|no>`.
pub fn parse_rsvp_callback(data: &str) -> Option<(&str, Rsvp)> {
    let mut parts = data.splitn(3, ':');
    if parts.next()? != RSVP_PREFIX {
        return None;
    }
    let inv_id = parts.next().filter(|id| !id.is_empty())?;
    let response = parts.next()?.parse().ok()?;
    Some((inv_id, response))
}

/// Yes/no buttons plus a link to the video when the invitation has one.
pub fn guest_keyboard(invitation: &Invitation) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![
        InlineKeyboardButton::callback(
            "✅ Yes, I'll come!",
            rsvp_callback(&invitation.inv_id, Rsvp::Yes),
        ),
        InlineKeyboardButton::callback(
            "❌ No, I can't come",
            rsvp_callback(&invitation.inv_id, Rsvp::No),
        ),
    ]];

    if let Some(link) = &invitation.video_url {
        match Url::parse(link) {
            Ok(url) => rows.push(vec![InlineKeyboardButton::url("🎥 Watch video", url)]),
            Err(e) => tracing::warn!("Invitation {} has an unusable video link: {}", invitation.inv_id, e),
        }
    }

    InlineKeyboardMarkup::new(rows)
}

pub fn share_link(bot_username: &str, inv_id: &str) -> String {
    format!("https://t.me/{bot_username}?start=inv_{inv_id}")
}

pub fn prompt_enter_text() -> String {
    format!("📝 Send the invitation text:\n\nFor example:\n{EXAMPLE_INVITATION}")
}

pub fn prompt_enter_caption() -> String {
    format!("✅ Photo received!\n\n📝 Now send the invitation text:\n\nFor example:\n{EXAMPLE_INVITATION}")
}

pub const PROMPT_CHOOSE_TYPE: &str = "Choose the invitation type:";
pub const PROMPT_ENTER_PHOTO: &str = "🖼 Send the invitation photo:";
pub const PROMPT_ENTER_VIDEO: &str =
    "🎥 Want to add a YouTube video link?\n\nSend the link or press Skip:";

pub const INVITATION_REPLACED: &str =
    "ℹ️ The invitation from this link has been replaced. Here is the current one:";

pub fn publication_summary(invitation: &Invitation, bot_username: &str) -> String {
    let mut text = String::from("✅ Invitation created!");
    if let Some(url) = &invitation.video_url {
        text.push_str(&format!("\n\n🎥 Video: {url}"));
    }
    text.push_str(&format!(
        "\n\n📢 Now share the bot link with your guests:\n{}",
        share_link(bot_username, &invitation.inv_id)
    ));
    text
}

pub fn display_username(username: Option<&str>) -> String {
    match username {
        Some(name) if !name.is_empty() => format!("@{name}"),
        _ => "no username".to_string(),
    }
}

pub fn rsvp_toast(response: Rsvp) -> &'static str {
    match response {
        Rsvp::Yes => "✅ Your answer has been recorded!",
        Rsvp::No => "📝 Your answer has been recorded",
    }
}

pub fn rsvp_thanks(response: Rsvp) -> &'static str {
    match response {
        Rsvp::Yes => "✅ Thank you! We look forward to seeing you! 🎉",
        Rsvp::No => "😔 What a pity! If you find the time, please come anyway!",
    }
}

pub fn rsvp_rejected(error: &RecordError) -> &'static str {
    match error {
        RecordError::NoActiveInvitation => "There is no active invitation right now.",
        RecordError::NotCurrent(_) => "This invitation is no longer active.",
    }
}

pub fn admin_notice(guest: &GuestResponse) -> String {
    let who = format!("{} ({})", guest.name, display_username(guest.username.as_deref()));
    match guest.response {
        Rsvp::Yes => format!("✅ {who} is coming!"),
        Rsvp::No => format!("❌ {who} is not coming"),
    }
}

fn push_guest_list(text: &mut String, guests: &[GuestResponse]) {
    if guests.is_empty() {
        text.push_str("none\n");
        return;
    }
    for (i, guest) in guests.iter().enumerate() {
        text.push_str(&format!(
            "{}. {} ({})\n",
            i + 1,
            guest.name,
            display_username(guest.username.as_deref())
        ));
    }
}

pub fn format_stats(invitation: &Invitation, tally: &Tally) -> String {
    let mut text = format!(
        "📊 STATISTICS\nInvitation {} ({})\n\n",
        invitation.inv_id,
        format_date(&invitation.created_at)
    );
    text.push_str(&format!("✅ Coming: {}\n", tally.attending.len()));
    text.push_str(&format!("❌ Not coming: {}\n", tally.declining.len()));
    text.push_str(&format!("📝 Total answers: {}\n\n", tally.total()));

    text.push_str("✅ COMING:\n");
    push_guest_list(&mut text, &tally.attending);
    text.push_str("\n❌ NOT COMING:\n");
    push_guest_list(&mut text, &tally.declining);
    text
}

pub fn format_invitation_list(summaries: &[InvitationSummary], current_id: Option<&str>) -> String {
    let mut text = String::from("📋 INVITATIONS:\n\n");
    for (i, summary) in summaries.iter().enumerate() {
        let marker = if Some(summary.invitation.inv_id.as_str()) == current_id {
            " (current)"
        } else {
            ""
        };
        text.push_str(&format!(
            "{}. ID: {}{}\n   📅 {}\n   👥 Responses: {}\n\n",
            i + 1,
            summary.invitation.inv_id,
            marker,
            format_datetime(&summary.invitation.created_at),
            summary.response_count
        ));
    }
    text
}

/// Splits `text` on line boundaries into pieces of at most `limit`
/// characters. A single line longer than `limit` is split mid-line.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();
        if current_len + line_len > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if line_len > limit {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(limit) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }
        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

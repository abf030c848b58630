//! Text and URL forms of a letter for social sharing.

use urlencoding::encode;

use crate::letter::LetterRecord;

const X_PREVIEW_CHARS: usize = 240;
const X_HASHTAGS: &str = "ValentinesDay,PixelArt,LoveLetters";
const SHARE_CARD_EXCERPT_CHARS: usize = 150;
const APP_URL: &str = "https://valentine-letters.manus.space";

/// Title attached to native shares.
pub const SHARE_TITLE: &str = "Valentine's Letter";

/// Caption attached to a native share of the card image.
pub fn share_caption(letter: &LetterRecord, branding: &str) -> String {
    format!(
        "Check out this Valentine's letter from {} to {}! 💕 {}",
        letter.sender, letter.recipient, branding
    )
}

/// Instagram Stories deep link for the image behind `reference`.
pub fn instagram_story_link(reference: &str) -> String {
    format!(
        "instagram://stories/share?media_type=image&source_url={}",
        encode(reference)
    )
}

/// Quoted preview, cut to `max_chars` characters of the message.
pub fn letter_preview(letter: &LetterRecord, max_chars: usize) -> String {
    format!(
        "💌 A Valentine's letter from {} to {}:\n\n\"{}\"",
        letter.sender,
        letter.recipient,
        excerpt(&letter.message, max_chars)
    )
}

/// Compose URL for a post on X.
pub fn x_intent_url(letter: &LetterRecord) -> String {
    format!(
        "https://twitter.com/intent/tweet?text={}&hashtags={}",
        encode(&letter_preview(letter, X_PREVIEW_CHARS)),
        X_HASHTAGS
    )
}

/// `mailto:` link carrying the whole letter.
pub fn email_link(letter: &LetterRecord) -> String {
    let subject = format!("A Valentine's Letter from {}", letter.sender);
    let body = format!(
        "Dear {},\n\n{}\n\n💌 Sent with love from Valentine's Day Letters\n{}",
        letter.recipient, letter.message, APP_URL
    );
    format!("mailto:?subject={}&body={}", encode(&subject), encode(&body))
}

/// Plain-text summary card with date and a short excerpt.
pub fn share_card_text(letter: &LetterRecord, branding: &str) -> String {
    format!(
        "✨ Valentine's Letter ✨\n\nTo: {}\nFrom: {}\nDate: {}\n\n\"{}\"\n\nSent by {}",
        letter.recipient,
        letter.sender,
        letter.created_at.format("%Y-%m-%d"),
        excerpt(&letter.message, SHARE_CARD_EXCERPT_CHARS),
        branding
    )
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn letter(message: &str) -> LetterRecord {
        LetterRecord::new("abc123", "Sam", "Lee", message)
    }

    #[test]
    fn preview_truncates_by_chars() {
        let preview = letter_preview(&letter("💕💕💕💕"), 2);
        assert_eq!(preview, "💌 A Valentine's letter from Lee to Sam:\n\n\"💕💕...\"");
        let whole = letter_preview(&letter("hi"), 2);
        assert!(whole.ends_with("\"hi\""));
    }

    #[test]
    fn deep_link_encodes_reference() {
        assert_eq!(
            instagram_story_link("blob:local/1"),
            "instagram://stories/share?media_type=image&source_url=blob%3Alocal%2F1"
        );
    }

    #[test]
    fn intent_and_mail_links_are_encoded() {
        let x = x_intent_url(&letter("be mine"));
        assert!(x.starts_with("https://twitter.com/intent/tweet?text="));
        assert!(x.ends_with("&hashtags=ValentinesDay,PixelArt,LoveLetters"));
        assert!(!x.contains(' '));

        let mail = email_link(&letter("be mine"));
        assert!(mail.starts_with("mailto:?subject=A%20Valentine%27s%20Letter%20from%20Lee"));
        assert!(mail.contains("be%20mine"));
    }

    #[test]
    fn caption_names_both_people() {
        assert_eq!(
            share_caption(&letter("x"), "@danmced"),
            "Check out this Valentine's letter from Lee to Sam! 💕 @danmced"
        );
        let card = share_card_text(&letter(&"a".repeat(200)), "@danmced");
        assert!(card.contains("To: Sam\nFrom: Lee"));
        assert!(card.contains(&format!("\"{}...\"", "a".repeat(150))));
    }
}

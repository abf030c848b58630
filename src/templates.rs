use std::fmt;

use thiserror::Error;

const RECIPIENT_PLACEHOLDER: &str = "[RECIPIENT]";
const SENDER_PLACEHOLDER: &str = "[YOUR NAME]";

#[derive(Debug, Error)]
#[error("unknown template '{0}'")]
pub struct UnknownTemplate(pub String);

/// Mood a template is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateTheme {
    Romantic,
    Funny,
    Friendship,
}

impl TemplateTheme {
    pub fn emoji(self) -> &'static str {
        match self {
            TemplateTheme::Romantic => "💕",
            TemplateTheme::Funny => "😄",
            TemplateTheme::Friendship => "👯",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TemplateTheme::Romantic => "Express your love and affection",
            TemplateTheme::Funny => "Make them laugh with humor",
            TemplateTheme::Friendship => "Celebrate your friendship",
        }
    }
}

impl fmt::Display for TemplateTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateTheme::Romantic => write!(f, "romantic"),
            TemplateTheme::Funny => write!(f, "funny"),
            TemplateTheme::Friendship => write!(f, "friendship"),
        }
    }
}

/// Pre-written letter body with `[RECIPIENT]` and `[YOUR NAME]` placeholders.
#[derive(Debug, Clone)]
pub struct LetterTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub theme: TemplateTheme,
    pub emoji: &'static str,
    pub description: &'static str,
    pub body: &'static str,
}

impl LetterTemplate {
    /// Substitute both placeholders. Empty names leave the placeholder in place.
    pub fn fill(&self, recipient: &str, sender: &str) -> String {
        let mut text = self.body.to_string();
        if !recipient.trim().is_empty() {
            text = text.replace(RECIPIENT_PLACEHOLDER, recipient.trim());
        }
        if !sender.trim().is_empty() {
            text = text.replace(SENDER_PLACEHOLDER, sender.trim());
        }
        text
    }
}

/// Registry of the built-in letter templates.
pub struct TemplateRegistry;

impl TemplateRegistry {
    pub fn list() -> Vec<&'static LetterTemplate> {
        TEMPLATES.iter().collect()
    }

    /// Resolve a template by id (case-insensitive).
    pub fn get(id: &str) -> Result<&'static LetterTemplate, UnknownTemplate> {
        TEMPLATES
            .iter()
            .find(|tpl| tpl.id.eq_ignore_ascii_case(id.trim()))
            .ok_or_else(|| UnknownTemplate(id.to_string()))
    }

    pub fn by_theme(theme: TemplateTheme) -> Vec<&'static LetterTemplate> {
        TEMPLATES.iter().filter(|tpl| tpl.theme == theme).collect()
    }
}

static TEMPLATES: [LetterTemplate; 9] = [
    LetterTemplate {
        id: "romantic-1",
        name: "Classic Romance",
        theme: TemplateTheme::Romantic,
        emoji: "💕",
        description: "A timeless romantic declaration",
        body: "Dear [RECIPIENT],\n\n\
Every moment with you feels like a pixel-perfect dream. Your smile brightens my world like the glow of an 8-bit sunset.\n\n\
I wanted to tell you that you mean everything to me. You're my favorite adventure, my greatest treasure, and my forever player two.\n\n\
Thank you for being the love of my life.\n\n\
With all my heart,\n[YOUR NAME]",
    },
    LetterTemplate {
        id: "romantic-2",
        name: "Poetic Love",
        theme: TemplateTheme::Romantic,
        emoji: "💌",
        description: "A poetic expression of deep affection",
        body: "My Dearest [RECIPIENT],\n\n\
In the game of life, you're my winning combination. Every pixel of my heart belongs to you.\n\n\
You've filled my world with colors I never knew existed. Your love is the greatest power-up I could ever receive.\n\n\
I promise to love you with the intensity of a thousand retro arcade games, forever and always.\n\n\
Forever yours,\n[YOUR NAME]",
    },
    LetterTemplate {
        id: "romantic-3",
        name: "Modern Romance",
        theme: TemplateTheme::Romantic,
        emoji: "💗",
        description: "A contemporary love letter",
        body: "Hi [RECIPIENT],\n\n\
I've been thinking about you non-stop. You make my heart race like a high-score chase.\n\n\
Being with you feels right in a way nothing else ever has. You're my favorite person, my safe space, and my greatest joy.\n\n\
I'm so grateful for every moment we share. Here's to many more adventures together.\n\n\
Love always,\n[YOUR NAME]",
    },
    LetterTemplate {
        id: "funny-1",
        name: "Gamer's Love",
        theme: TemplateTheme::Funny,
        emoji: "🎮",
        description: "A playful gaming-themed love letter",
        body: "Dear [RECIPIENT],\n\n\
You've unlocked a special achievement in my heart: LOVE LEVEL 99.\n\n\
I'd give up all my high scores just to spend one more day with you. You're the only game I want to play forever.\n\n\
Warning: This love is permanent and cannot be uninstalled.\n\n\
Your devoted player one,\n[YOUR NAME]",
    },
    LetterTemplate {
        id: "funny-2",
        name: "Cheesy Pickup Lines",
        theme: TemplateTheme::Funny,
        emoji: "😄",
        description: "Hilariously corny Valentine's message",
        body: "Hey [RECIPIENT],\n\n\
Are you a pixel? Because you're absolutely perfect to me.\n\n\
I'd swipe right on you every single day. You're the only match I need.\n\n\
Fair warning: I'm terrible at flirting, but I'm excellent at loving you. So let's skip the awkward part and just be together forever?\n\n\
Awkwardly yours,\n[YOUR NAME]",
    },
    LetterTemplate {
        id: "funny-3",
        name: "Meme Energy",
        theme: TemplateTheme::Funny,
        emoji: "😂",
        description: "A funny, relatable love message",
        body: "[RECIPIENT],\n\n\
You know that feeling when you find the perfect meme? That's how I feel about you.\n\n\
You're my favorite notification, my best notification, and honestly my only notification that matters.\n\n\
Thanks for being my ride or die. I promise to laugh at your jokes (even the bad ones).\n\n\
Your meme partner for life,\n[YOUR NAME]",
    },
    LetterTemplate {
        id: "friendship-1",
        name: "Best Friend Forever",
        theme: TemplateTheme::Friendship,
        emoji: "👯",
        description: "A heartfelt friendship appreciation",
        body: "Dear [RECIPIENT],\n\n\
I wanted to take a moment to tell you how much your friendship means to me. You're not just my friend, you're my family.\n\n\
You've been there for me through every level of life, celebrating my wins and supporting me through the tough times.\n\n\
Thank you for being the most amazing friend anyone could ask for. I'm so lucky to have you in my life.\n\n\
Forever grateful,\n[YOUR NAME]",
    },
    LetterTemplate {
        id: "friendship-2",
        name: "Partner in Crime",
        theme: TemplateTheme::Friendship,
        emoji: "🤝",
        description: "A fun friendship celebration",
        body: "[RECIPIENT],\n\n\
You're my favorite person to get into trouble with. Life is infinitely better when you're around.\n\n\
We've had so many amazing adventures together, and I can't wait for all the ones still to come.\n\n\
Thanks for being my partner in crime, my shoulder to cry on, and my biggest cheerleader.\n\n\
Your ride or die,\n[YOUR NAME]",
    },
    LetterTemplate {
        id: "friendship-3",
        name: "Grateful Friend",
        theme: TemplateTheme::Friendship,
        emoji: "🌟",
        description: "An expression of deep friendship gratitude",
        body: "My Dear Friend [RECIPIENT],\n\n\
I don't say it enough, but I want you to know how much you mean to me. You're one of the best things that ever happened to me.\n\n\
Your kindness, humor, and loyalty inspire me every single day. I'm so grateful to call you my friend.\n\n\
Here's to a lifetime of memories, laughter, and unconditional friendship.\n\n\
With love and appreciation,\n[YOUR NAME]",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letter::{MAX_MESSAGE_CHARS, NewLetter};

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(TemplateRegistry::get("Funny-2").unwrap().name, "Cheesy Pickup Lines");
        assert!(TemplateRegistry::get("haiku").is_err());
    }

    #[test]
    fn three_templates_per_theme() {
        for theme in [
            TemplateTheme::Romantic,
            TemplateTheme::Funny,
            TemplateTheme::Friendship,
        ] {
            assert_eq!(TemplateRegistry::by_theme(theme).len(), 3, "{theme}");
        }
    }

    #[test]
    fn fill_replaces_placeholders() {
        let text = TemplateRegistry::get("romantic-1").unwrap().fill("Sam", "Lee");
        assert!(text.starts_with("Dear Sam,"));
        assert!(text.ends_with("Lee"));
        assert!(!text.contains(RECIPIENT_PLACEHOLDER));

        let partial = TemplateRegistry::get("funny-3").unwrap().fill(" ", "Lee");
        assert!(partial.starts_with(RECIPIENT_PLACEHOLDER));
    }

    #[test]
    fn filled_templates_fit_the_message_limit() {
        for tpl in TemplateRegistry::list() {
            let letter = NewLetter {
                recipient: "Sam".into(),
                sender: "Lee".into(),
                message: tpl.fill("Sam", "Lee"),
            };
            assert!(letter.message.chars().count() <= MAX_MESSAGE_CHARS, "{}", tpl.id);
            assert!(letter.validate().is_ok());
        }
    }
}

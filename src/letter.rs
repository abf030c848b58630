use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

pub const MAX_NAME_CHARS: usize = 50;
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Emoji offered for reacting to a letter.
pub const AVAILABLE_REACTIONS: [&str; 6] = ["❤️", "😍", "🥰", "😊", "💕", "✨"];
const MAX_SHOWN_REACTIONS: usize = 6;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed letter record at line {line} in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize letter {id}: {source}")]
    Serialize {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("letter '{0}' not found")]
    NotFound(String),
    #[error("invalid letter: {0}")]
    Invalid(String),
}

/// Per-emoji reaction counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Reactions(BTreeMap<String, u64>);

impl Reactions {
    /// Bump the counter for `emoji`, returning the new count.
    pub fn add(&mut self, emoji: &str) -> u64 {
        let count = self.0.entry(emoji.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, emoji: &str) -> u64 {
        self.0.get(emoji).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most popular first, at most six. Ties keep emoji order.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> =
            self.0.iter().map(|(emoji, count)| (emoji.as_str(), *count)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(MAX_SHOWN_REACTIONS);
        entries
    }

    /// Display form such as `❤️ 3 ✨ 1`.
    pub fn format(&self) -> String {
        self.sorted()
            .iter()
            .map(|(emoji, count)| format!("{emoji} {count}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A stored letter. Rendering and sharing only ever read it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LetterRecord {
    pub id: String,
    pub recipient: String,
    pub sender: String,
    pub message: String,
    #[serde(default)]
    pub reactions: Reactions,
    pub created_at: DateTime<Utc>,
}

impl LetterRecord {
    /// Build a record directly, stamped with the current time.
    pub fn new<S: Into<String>>(id: S, recipient: S, sender: S, message: S) -> Self {
        Self {
            id: id.into(),
            recipient: recipient.into(),
            sender: sender.into(),
            message: message.into(),
            reactions: Reactions::default(),
            created_at: Utc::now(),
        }
    }

    /// Name of the exported card image.
    pub fn export_filename(&self) -> String {
        export_filename(&self.id)
    }
}

/// `valentine-letter-<id>.png`
pub fn export_filename(id: &str) -> String {
    format!("valentine-letter-{id}.png")
}

/// Input for [`LetterStore::create`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewLetter {
    pub recipient: String,
    pub sender: String,
    pub message: String,
}

impl NewLetter {
    /// Reject blank fields and over-long names or messages.
    pub fn validate(&self) -> Result<(), StoreError> {
        check_field("recipient", &self.recipient, MAX_NAME_CHARS)?;
        check_field("sender", &self.sender, MAX_NAME_CHARS)?;
        check_field("message", &self.message, MAX_MESSAGE_CHARS)
    }
}

fn check_field(name: &str, value: &str, max: usize) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Invalid(format!("{name} must not be empty")));
    }
    let len = value.chars().count();
    if len > max {
        return Err(StoreError::Invalid(format!(
            "{name} must not exceed {max} characters (got {len})"
        )));
    }
    Ok(())
}

/// Letters kept in a JSON-lines file, one record per line.
#[derive(Debug, Clone, Default)]
pub struct LetterStore {
    letters: Vec<LetterRecord>,
    path: Option<PathBuf>,
}

impl LetterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, or start empty when the file does not exist yet.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self {
                letters: Vec::new(),
                path: Some(path.to_path_buf()),
            });
        }
        Self::load(path)
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|source| StoreError::Io {
                action: "failed to open letter store",
                path: path.to_path_buf(),
                source,
            })?;
        let mut letters = Vec::new();
        for (idx, raw) in BufReader::new(file).lines().enumerate() {
            let raw = raw.map_err(|source| StoreError::Io {
                action: "failed to read letter store",
                path: path.to_path_buf(),
                source,
            })?;
            if raw.trim().is_empty() {
                continue;
            }
            let letter = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
            letters.push(letter);
        }
        Ok(Self {
            letters,
            path: Some(path.to_path_buf()),
        })
    }

    /// Write every letter to `path` and remember it as the store location.
    pub fn save(&mut self, path: &Path) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            action: "failed to write letter store",
            path: path.to_path_buf(),
            source,
        };
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        for letter in &self.letters {
            serde_json::to_writer(&mut writer, letter).map_err(|source| {
                StoreError::Serialize {
                    id: letter.id.clone(),
                    source,
                }
            })?;
            writer.write_all(b"\n").map_err(io_err)?;
        }
        writer.flush().map_err(io_err)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Validate and append a new letter with a fresh id and no reactions.
    pub fn create(&mut self, input: NewLetter) -> Result<&LetterRecord, StoreError> {
        input.validate()?;
        let letter = LetterRecord {
            id: Uuid::new_v4().to_string(),
            recipient: input.recipient,
            sender: input.sender,
            message: input.message,
            reactions: Reactions::default(),
            created_at: Utc::now(),
        };
        self.letters.push(letter);
        let idx = self.letters.len() - 1;
        Ok(&self.letters[idx])
    }

    pub fn get(&self, id: &str) -> Option<&LetterRecord> {
        self.letters.iter().find(|letter| letter.id == id)
    }

    /// All letters, oldest first.
    pub fn all(&self) -> Vec<&LetterRecord> {
        let mut letters: Vec<&LetterRecord> = self.letters.iter().collect();
        letters.sort_by_key(|letter| letter.created_at);
        letters
    }

    /// Count one `emoji` reaction on letter `id` and return the updated record.
    pub fn add_reaction(&mut self, id: &str, emoji: &str) -> Result<&LetterRecord, StoreError> {
        let emoji = emoji.trim();
        if emoji.is_empty() {
            return Err(StoreError::Invalid("emoji must not be empty".to_string()));
        }
        let letter = self
            .letters
            .iter_mut()
            .find(|letter| letter.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        letter.reactions.add(emoji);
        Ok(letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn new_letter(message: &str) -> NewLetter {
        NewLetter {
            recipient: "Sam".to_string(),
            sender: "Lee".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn export_filename_embeds_id() {
        assert_eq!(export_filename("abc123"), "valentine-letter-abc123.png");
        let letter = LetterRecord::new("x9", "a", "b", "c");
        assert_eq!(letter.export_filename(), "valentine-letter-x9.png");
    }

    #[test]
    fn created_letters_get_distinct_v4_ids() {
        let mut store = LetterStore::new();
        let first = store.create(new_letter("one")).unwrap().id.clone();
        let second = store.create(new_letter("two")).unwrap().id.clone();
        assert_ne!(first, second);
        assert_eq!(Uuid::parse_str(&first).unwrap().get_version_num(), 4);
    }

    #[test]
    fn validate_rejects_blank_and_long_fields() {
        assert!(new_letter("hello").validate().is_ok());
        assert!(matches!(new_letter("  ").validate(), Err(StoreError::Invalid(_))));
        let long = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(matches!(new_letter(&long).validate(), Err(StoreError::Invalid(_))));
        let mut named = new_letter("hi");
        named.sender = "n".repeat(MAX_NAME_CHARS + 1);
        assert!(named.validate().is_err());
    }

    #[test]
    fn reactions_sort_by_count_and_cap_at_six() {
        let mut reactions = Reactions::default();
        for emoji in ["✨", "❤️", "❤️", "❤️", "😊", "😊", "a", "b", "c", "d"] {
            reactions.add(emoji);
        }
        assert_eq!(reactions.total(), 10);
        assert_eq!(reactions.count("❤️"), 3);
        assert_eq!(reactions.count("🥰"), 0);
        let sorted = reactions.sorted();
        assert_eq!(sorted.len(), 6);
        assert_eq!(sorted[0], ("❤️", 3));
        assert_eq!(sorted[1], ("😊", 2));
        assert!(reactions.format().starts_with("❤️ 3 😊 2"));
    }

    #[test]
    fn add_reaction_increments_and_reports_missing() {
        let mut store = LetterStore::new();
        let id = store.create(new_letter("hi")).unwrap().id.clone();
        store.add_reaction(&id, "💕").unwrap();
        let updated = store.add_reaction(&id, "💕").unwrap();
        assert_eq!(updated.reactions.count("💕"), 2);
        assert!(matches!(
            store.add_reaction("nope", "💕"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.add_reaction(&id, " "), Err(StoreError::Invalid(_))));
    }
}

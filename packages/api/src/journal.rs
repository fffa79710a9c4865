//! # Journal entries, mood tracking, and aggregates
//!
//! Each user's entries live in their own table, `journal:<user_id>`; the
//! table name is the only thing tying entries to an account. An entry
//! carries free text, an optional [`Mood`] out of a fixed set of five, and
//! up to three gratitude items.
//!
//! [`JournalStats`] is the aggregation behind the insights screen (total
//! entries, entries in the trailing week, per-mood counts) and
//! [`export_text`] renders the plain-text export offered on the profile
//! screen.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use store::{ObjectStore, Record, Storage, StoreError};

/// Fetch limit for entry listings.
const ENTRY_FETCH_LIMIT: usize = 100;

/// Gratitude items kept per entry.
const MAX_GRATITUDE: usize = 3;

fn journal_table(user_id: &str) -> String {
    format!("journal:{user_id}")
}

#[derive(Debug, Error)]
pub enum JournalError {
    /// An entry with no text, no mood, and no gratitude is not stored.
    #[error("journal entry is empty")]
    EmptyEntry,
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// The five moods an entry can record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Amazing,
    Good,
    Okay,
    Low,
    Difficult,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Amazing,
        Mood::Good,
        Mood::Okay,
        Mood::Low,
        Mood::Difficult,
    ];

    /// The label stored on disk and shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Mood::Amazing => "Amazing",
            Mood::Good => "Good",
            Mood::Okay => "Okay",
            Mood::Low => "Low",
            Mood::Difficult => "Difficult",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Amazing => "😊",
            Mood::Good => "😄",
            Mood::Okay => "😐",
            Mood::Low => "😔",
            Mood::Difficult => "😢",
        }
    }

    /// Parse a stored mood label. The empty string and unrecognized
    /// labels both read as "no mood".
    pub fn from_label(label: &str) -> Option<Mood> {
        Mood::ALL.into_iter().find(|m| m.label() == label)
    }
}

/// A journal entry as written in the editor, before it is stored.
#[derive(Clone, Debug, Default)]
pub struct NewEntry {
    pub text: String,
    pub mood: Option<Mood>,
    pub gratitude: Vec<String>,
}

impl NewEntry {
    /// Gratitude items that will actually be stored: the non-empty ones,
    /// capped at three.
    fn kept_gratitude(&self) -> Vec<String> {
        self.gratitude
            .iter()
            .filter(|g| !g.is_empty())
            .take(MAX_GRATITUDE)
            .cloned()
            .collect()
    }

    fn is_blank(&self) -> bool {
        self.text.is_empty() && self.mood.is_none() && self.kept_gratitude().is_empty()
    }
}

/// A stored journal entry.
#[derive(Clone, Debug, PartialEq)]
pub struct JournalEntry {
    pub id: String,
    pub text: String,
    pub mood: Option<Mood>,
    pub gratitude: Vec<String>,
    pub date: DateTime<Utc>,
}

impl JournalEntry {
    /// Read an entry back from a stored record. `None` when the payload
    /// is not an entry.
    pub fn from_record(record: &Record) -> Option<JournalEntry> {
        let data = record.object_data.as_object()?;
        let gratitude = data
            .get("gratitude")?
            .as_array()?
            .iter()
            .map(|g| g.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()?;
        Some(JournalEntry {
            id: record.object_id.clone(),
            text: data.get("entry")?.as_str()?.to_string(),
            mood: Mood::from_label(data.get("mood")?.as_str()?),
            gratitude,
            date: data.get("date")?.as_str()?.parse().ok()?,
        })
    }
}

/// Entry persistence and aggregates over per-user journal tables.
pub struct JournalService<S: Storage> {
    store: ObjectStore<S>,
}

impl<S: Storage> JournalService<S> {
    pub fn new(storage: S) -> Self {
        Self {
            store: ObjectStore::new(storage),
        }
    }

    pub fn store(&self) -> &ObjectStore<S> {
        &self.store
    }

    /// Store a new entry for `user_id` and return it as persisted.
    pub async fn save_entry(
        &self,
        user_id: &str,
        entry: NewEntry,
    ) -> Result<JournalEntry, JournalError> {
        if entry.is_blank() {
            return Err(JournalError::EmptyEntry);
        }

        let gratitude = entry.kept_gratitude();
        let mut stored = JournalEntry {
            id: String::new(),
            text: entry.text,
            mood: entry.mood,
            gratitude,
            date: Utc::now(),
        };
        let data = json!({
            "entry": &stored.text,
            "mood": stored.mood.map(Mood::label).unwrap_or(""),
            "gratitude": &stored.gratitude,
            "date": stored.date,
        });

        let record = self
            .store
            .create_object(&journal_table(user_id), data)
            .await?;
        stored.id = record.object_id;
        Ok(stored)
    }

    /// Entries for `user_id` in the order they were written (oldest
    /// first), up to the fetch limit. Records that do not parse as
    /// entries are skipped.
    pub async fn list_entries(&self, user_id: &str) -> Result<Vec<JournalEntry>, JournalError> {
        let records = self
            .store
            .list_objects(&journal_table(user_id), ENTRY_FETCH_LIMIT, true)
            .await?;
        let entries: Vec<JournalEntry> =
            records.iter().filter_map(JournalEntry::from_record).collect();
        if entries.len() != records.len() {
            tracing::warn!(
                user = user_id,
                skipped = records.len() - entries.len(),
                "journal table contains records that do not parse as entries"
            );
        }
        Ok(entries)
    }

    /// Aggregates for the insights screen, as of now.
    pub async fn stats(&self, user_id: &str) -> Result<JournalStats, JournalError> {
        let entries = self.list_entries(user_id).await?;
        Ok(JournalStats::compute(&entries, Utc::now()))
    }
}

/// Aggregates shown on the insights screen.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct JournalStats {
    /// All entries on record.
    pub total: usize,
    /// Entries dated within the trailing seven days.
    pub this_week: usize,
    /// How often each recorded mood appears. Moods never recorded are
    /// omitted.
    pub mood_counts: Vec<(Mood, usize)>,
}

impl JournalStats {
    /// Compute aggregates over `entries` as of `now`.
    pub fn compute(entries: &[JournalEntry], now: DateTime<Utc>) -> JournalStats {
        let week_ago = now - Duration::days(7);
        let mood_counts = Mood::ALL
            .into_iter()
            .map(|m| (m, entries.iter().filter(|e| e.mood == Some(m)).count()))
            .filter(|&(_, n)| n > 0)
            .collect();
        JournalStats {
            total: entries.len(),
            this_week: entries.iter().filter(|e| e.date > week_ago).count(),
            mood_counts,
        }
    }
}

/// Render entries as the plain-text export offered on the profile screen.
pub fn export_text(user_name: &str, entries: &[JournalEntry]) -> String {
    let mut text = format!("Journal Export - {user_name}\n\n");
    for entry in entries {
        text.push_str(&format!("Date: {}\n", entry.date.format("%Y-%m-%d")));
        text.push_str(&format!(
            "Mood: {}\n",
            entry.mood.map(Mood::label).unwrap_or("Not recorded")
        ));
        text.push_str(&format!("Entry: {}\n", entry.text));
        if !entry.gratitude.is_empty() {
            text.push_str(&format!("Gratitude: {}\n", entry.gratitude.join(", ")));
        }
        text.push_str("\n---\n\n");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStorage;

    fn service() -> JournalService<MemoryStorage> {
        JournalService::new(MemoryStorage::new())
    }

    fn entry_at(date: &str, mood: Option<Mood>) -> JournalEntry {
        JournalEntry {
            id: "1".to_string(),
            text: "t".to_string(),
            mood,
            gratitude: Vec::new(),
            date: date.parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_save_and_list_roundtrip() {
        let journal = service();
        let saved = journal
            .save_entry(
                "u1",
                NewEntry {
                    text: "Walked by the river".to_string(),
                    mood: Some(Mood::Good),
                    gratitude: vec!["coffee".to_string(), "sunshine".to_string()],
                },
            )
            .await
            .unwrap();
        assert!(!saved.id.is_empty());

        let entries = journal.list_entries("u1").await.unwrap();
        assert_eq!(entries, vec![saved]);
    }

    #[tokio::test]
    async fn test_blank_entry_is_rejected() {
        let journal = service();
        let err = journal
            .save_entry(
                "u1",
                NewEntry {
                    text: String::new(),
                    mood: None,
                    gratitude: vec![String::new(), String::new(), String::new()],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::EmptyEntry));
        assert!(journal.list_entries("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_gratitude_is_filtered_and_capped() {
        let journal = service();
        let saved = journal
            .save_entry(
                "u1",
                NewEntry {
                    text: String::new(),
                    mood: None,
                    gratitude: vec![
                        "one".to_string(),
                        String::new(),
                        "two".to_string(),
                        "three".to_string(),
                        "four".to_string(),
                    ],
                },
            )
            .await
            .unwrap();
        assert_eq!(saved.gratitude, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_mood_only_entry_is_stored_with_empty_text() {
        let journal = service();
        journal
            .save_entry(
                "u1",
                NewEntry {
                    mood: Some(Mood::Difficult),
                    ..NewEntry::default()
                },
            )
            .await
            .unwrap();

        let entries = journal.list_entries("u1").await.unwrap();
        assert_eq!(entries[0].mood, Some(Mood::Difficult));
        assert!(entries[0].text.is_empty());
    }

    #[tokio::test]
    async fn test_entries_are_scoped_per_user() {
        let journal = service();
        journal
            .save_entry("u1", NewEntry { text: "mine".to_string(), ..NewEntry::default() })
            .await
            .unwrap();

        assert!(journal.list_entries("u2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_entry_records_are_skipped() {
        let journal = service();
        journal
            .store()
            .create_object("journal:u1", json!({"unexpected": "shape"}))
            .await
            .unwrap();
        journal
            .save_entry("u1", NewEntry { text: "ok".to_string(), ..NewEntry::default() })
            .await
            .unwrap();

        let entries = journal.list_entries("u1").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "ok");
    }

    #[test]
    fn test_stats_counts_week_and_moods() {
        let now: DateTime<Utc> = "2024-01-15T12:00:00Z".parse().unwrap();
        let entries = vec![
            entry_at("2024-01-14T09:00:00Z", Some(Mood::Good)),
            entry_at("2024-01-10T09:00:00Z", Some(Mood::Good)),
            entry_at("2024-01-01T09:00:00Z", Some(Mood::Low)),
            entry_at("2023-12-20T09:00:00Z", None),
        ];

        let stats = JournalStats::compute(&entries, now);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.this_week, 2);
        assert_eq!(stats.mood_counts, vec![(Mood::Good, 2), (Mood::Low, 1)]);
    }

    #[test]
    fn test_stats_on_empty_journal() {
        let stats = JournalStats::compute(&[], Utc::now());
        assert_eq!(stats, JournalStats::default());
    }

    #[test]
    fn test_export_text_format() {
        let mut entry = entry_at("2024-01-14T09:00:00Z", Some(Mood::Good));
        entry.text = "A fine day".to_string();
        entry.gratitude = vec!["tea".to_string(), "rain".to_string()];
        let plain = entry_at("2024-01-10T09:00:00Z", None);

        let text = export_text("Ava", &[entry, plain]);
        assert!(text.starts_with("Journal Export - Ava\n\n"));
        assert!(text.contains("Date: 2024-01-14\n"));
        assert!(text.contains("Mood: Good\n"));
        assert!(text.contains("Entry: A fine day\n"));
        assert!(text.contains("Gratitude: tea, rain\n"));
        assert!(text.contains("Mood: Not recorded\n"));
        assert_eq!(text.matches("---").count(), 2);
    }

    #[test]
    fn test_mood_labels_roundtrip() {
        for mood in Mood::ALL {
            assert_eq!(Mood::from_label(mood.label()), Some(mood));
            assert!(!mood.emoji().is_empty());
        }
        assert_eq!(Mood::from_label(""), None);
        assert_eq!(Mood::from_label("Ecstatic"), None);
    }
}

//! Feedback and unresolved-question sinks.
//!
//! Two append-only SQLite tables: thumbs-up/down verdicts on answers, and
//! questions the engine could not resolve. Both exist so someone can later
//! read them and improve the dataset; nothing in the answer path depends on
//! them, so every write failure is fatal to the call but never to the chat.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use askdesk_core::error::{AskDeskError, Result};
use askdesk_core::types::FeedbackVerdict;

/// Recorded when the user downvotes without saying why.
const NO_REASON: &str = "No specific reason provided";

pub struct FeedbackStore {
    conn: Mutex<Connection>,
}

#[derive(Debug, Clone)]
pub struct FeedbackRecord {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub verdict: FeedbackVerdict,
    pub reason: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct UnresolvedRecord {
    pub id: String,
    pub question: String,
    pub created_at: String,
}

impl FeedbackStore {
    /// Open (creating if needed) the store at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)
            .map_err(|e| AskDeskError::Feedback(e.to_string()))?;
        Self::init(conn)
    }

    /// In-memory store, used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AskDeskError::Feedback(e.to_string()))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS feedback (
                id TEXT PRIMARY KEY,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                verdict TEXT NOT NULL,
                reason TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS unresolved (
                id TEXT PRIMARY KEY,
                question TEXT NOT NULL,
                created_at TEXT NOT NULL
            );",
        )
        .map_err(|e| AskDeskError::Feedback(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Record a verdict on an answered question. A negative verdict without a
    /// reason is stored with a fixed placeholder so downstream readers never
    /// see an empty reason column.
    pub fn save_feedback(
        &self,
        question: &str,
        answer: &str,
        verdict: FeedbackVerdict,
        reason: Option<&str>,
    ) -> Result<()> {
        let reason = match (verdict, reason) {
            (_, Some(r)) if !r.trim().is_empty() => r.trim().to_string(),
            (FeedbackVerdict::Negative, _) => NO_REASON.to_string(),
            _ => String::new(),
        };
        let verdict_str = match verdict {
            FeedbackVerdict::Positive => "positive",
            FeedbackVerdict::Negative => "negative",
        };

        let conn = self
            .conn
            .lock()
            .map_err(|e| AskDeskError::Feedback(e.to_string()))?;
        conn.execute(
            "INSERT INTO feedback (id, question, answer, verdict, reason, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                uuid::Uuid::new_v4().to_string(),
                question,
                answer,
                verdict_str,
                reason,
                chrono::Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| AskDeskError::Feedback(e.to_string()))?;
        tracing::debug!(verdict = verdict_str, "feedback recorded");
        Ok(())
    }

    /// Record a question the engine could not answer.
    pub fn save_unresolved(&self, question: &str) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| AskDeskError::Feedback(e.to_string()))?;
        conn.execute(
            "INSERT INTO unresolved (id, question, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                uuid::Uuid::new_v4().to_string(),
                question,
                chrono::Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| AskDeskError::Feedback(e.to_string()))?;
        tracing::info!("unresolved question recorded");
        Ok(())
    }

    /// All feedback rows, newest first.
    pub fn list_feedback(&self) -> Result<Vec<FeedbackRecord>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| AskDeskError::Feedback(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT id, question, answer, verdict, reason, created_at
                 FROM feedback ORDER BY created_at DESC",
            )
            .map_err(|e| AskDeskError::Feedback(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                let verdict: String = row.get(3)?;
                Ok(FeedbackRecord {
                    id: row.get(0)?,
                    question: row.get(1)?,
                    answer: row.get(2)?,
                    verdict: if verdict == "positive" {
                        FeedbackVerdict::Positive
                    } else {
                        FeedbackVerdict::Negative
                    },
                    reason: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })
            .map_err(|e| AskDeskError::Feedback(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// All unresolved questions, newest first.
    pub fn list_unresolved(&self) -> Result<Vec<UnresolvedRecord>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| AskDeskError::Feedback(e.to_string()))?;
        let mut stmt = conn
            .prepare("SELECT id, question, created_at FROM unresolved ORDER BY created_at DESC")
            .map_err(|e| AskDeskError::Feedback(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(UnresolvedRecord {
                    id: row.get(0)?,
                    question: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })
            .map_err(|e| AskDeskError::Feedback(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    pub fn unresolved_count(&self) -> usize {
        let Ok(conn) = self.conn.lock() else {
            return 0;
        };
        conn.query_row("SELECT COUNT(*) FROM unresolved", [], |r| r.get::<_, i64>(0))
            .unwrap_or(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_feedback_without_reason_gets_placeholder() {
        let store = FeedbackStore::in_memory().unwrap();
        store
            .save_feedback("Q?", "A.", FeedbackVerdict::Negative, None)
            .unwrap();

        let rows = store.list_feedback().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].verdict, FeedbackVerdict::Negative);
        assert_eq!(rows[0].reason, "No specific reason provided");
    }

    #[test]
    fn test_explicit_reason_is_kept() {
        let store = FeedbackStore::in_memory().unwrap();
        store
            .save_feedback("Q?", "A.", FeedbackVerdict::Negative, Some("  too vague  "))
            .unwrap();
        assert_eq!(store.list_feedback().unwrap()[0].reason, "too vague");
    }

    #[test]
    fn test_positive_feedback_without_reason_stays_empty() {
        let store = FeedbackStore::in_memory().unwrap();
        store
            .save_feedback("Q?", "A.", FeedbackVerdict::Positive, None)
            .unwrap();
        assert_eq!(store.list_feedback().unwrap()[0].reason, "");
    }

    #[test]
    fn test_unresolved_roundtrip() {
        let store = FeedbackStore::in_memory().unwrap();
        assert_eq!(store.unresolved_count(), 0);

        store.save_unresolved("what are the hostel fees").unwrap();
        store.save_unresolved("do you teach french").unwrap();

        assert_eq!(store.unresolved_count(), 2);
        let rows = store.list_unresolved().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|r| r.question == "do you teach french"));
        assert!(rows.iter().all(|r| !r.id.is_empty()));
    }
}

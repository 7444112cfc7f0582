// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeSet;

use chrono::Local;
use serde::Deserialize;
use serde::Serialize;

use crate::db::Database;
use crate::error::Fallible;

/// Storage key of the progress record.
pub const PROGRESS_KEY: &str = "progress";

/// Minutes of study time credited per completed quiz.
const QUIZ_MINUTES: u64 = 10;
/// Minutes of study time credited per summarized text.
const SUMMARY_MINUTES: u64 = 5;
/// Number of activity entries shown on the dashboard.
const RECENT_ACTIVITIES: usize = 5;

/// The durable summary of a user's learning activity.
///
/// Topics are a set: serialized as an ordered sequence, deduplicated by
/// construction. Activities are append-only and unbounded in storage; only
/// the display is windowed. The stored JSON uses camelCase keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressRecord {
    pub quizzes_completed: u64,
    pub total_score: u64,
    pub topics_studied: BTreeSet<String>,
    pub study_time: u64,
    pub activities: Vec<String>,
}

/// What the dashboard shows.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDisplay {
    pub quizzes_completed: u64,
    pub average_score: u64,
    pub topics_studied: usize,
    pub study_hours: u64,
    pub recent_activities: Vec<String>,
}

/// Owns the progress record and keeps it persisted. Every mutation writes
/// the record back to the database before returning.
pub struct ProgressStore {
    db: Database,
    record: ProgressRecord,
}

impl ProgressStore {
    /// Load the stored record. Missing or malformed data falls back to the
    /// default record rather than failing startup.
    pub fn load(db: Database) -> Self {
        let record = match db.get(PROGRESS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("Malformed progress record, starting fresh: {e}");
                    ProgressRecord::default()
                }
            },
            Ok(None) => ProgressRecord::default(),
            Err(e) => {
                log::warn!("Failed to read progress record, starting fresh: {e}");
                ProgressRecord::default()
            }
        };
        Self { db, record }
    }

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    /// Record a submitted quiz: the percentage score accumulates into the
    /// average, and ten minutes of study time are credited.
    pub fn record_quiz_result(&mut self, percentage: u64) -> Fallible<()> {
        debug_assert!(percentage <= 100);
        self.record.quizzes_completed += 1;
        self.record.total_score += percentage;
        self.record.study_time += QUIZ_MINUTES;
        self.save()
    }

    /// Credit the study time for one summarized text.
    pub fn record_summary(&mut self) -> Fallible<()> {
        self.record.study_time += SUMMARY_MINUTES;
        self.save()
    }

    /// Add a topic to the set of topics studied. A no-op if it is already
    /// there.
    pub fn record_topic(&mut self, topic: &str) -> Fallible<()> {
        if self.record.topics_studied.insert(topic.to_string()) {
            self.save()?;
        }
        Ok(())
    }

    /// Append a timestamped entry to the activity log.
    pub fn append_activity(&mut self, message: &str) -> Fallible<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.record.activities.push(format!("{timestamp}: {message}"));
        self.save()
    }

    fn save(&self) -> Fallible<()> {
        let json = serde_json::to_string(&self.record)?;
        self.db.put(PROGRESS_KEY, &json)
    }

    pub fn display(&self) -> ProgressDisplay {
        let record = &self.record;
        let average_score = if record.quizzes_completed > 0 {
            ((record.total_score as f64) / (record.quizzes_completed as f64)).round() as u64
        } else {
            0
        };
        let study_hours = ((record.study_time as f64) / 60.0).round() as u64;
        let recent_activities = record
            .activities
            .iter()
            .rev()
            .take(RECENT_ACTIVITIES)
            .cloned()
            .collect();
        ProgressDisplay {
            quizzes_completed: record.quizzes_completed,
            average_score,
            topics_studied: record.topics_studied.len(),
            study_hours,
            recent_activities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_store() -> ProgressStore {
        let db = Database::new(":memory:").unwrap();
        ProgressStore::load(db)
    }

    #[test]
    fn test_fresh_store_displays_zeroes() {
        let store = empty_store();
        let display = store.display();
        assert_eq!(display.quizzes_completed, 0);
        assert_eq!(display.average_score, 0);
        assert_eq!(display.topics_studied, 0);
        assert_eq!(display.study_hours, 0);
        assert!(display.recent_activities.is_empty());
    }

    #[test]
    fn test_quiz_results_accumulate() -> Fallible<()> {
        let mut store = empty_store();
        let scores = [100, 50, 67];
        for score in scores {
            store.record_quiz_result(score)?;
        }
        let display = store.display();
        assert_eq!(display.quizzes_completed, 3);
        // round(217 / 3) = round(72.33) = 72.
        assert_eq!(display.average_score, 72);
        assert_eq!(display.study_hours, 1);
        Ok(())
    }

    #[test]
    fn test_average_rounds_to_nearest() -> Fallible<()> {
        let mut store = empty_store();
        store.record_quiz_result(50)?;
        store.record_quiz_result(51)?;
        assert_eq!(store.display().average_score, 51);
        Ok(())
    }

    #[test]
    fn test_record_topic_is_idempotent() -> Fallible<()> {
        let mut store = empty_store();
        store.record_topic("algebra")?;
        store.record_topic("chemistry")?;
        store.record_topic("algebra")?;
        assert_eq!(store.display().topics_studied, 2);
        Ok(())
    }

    #[test]
    fn test_topics_are_case_sensitive() -> Fallible<()> {
        let mut store = empty_store();
        store.record_topic("Algebra")?;
        store.record_topic("algebra")?;
        assert_eq!(store.display().topics_studied, 2);
        Ok(())
    }

    #[test]
    fn test_summary_study_time() -> Fallible<()> {
        let mut store = empty_store();
        store.record_summary()?;
        assert_eq!(store.record().study_time, 5);
        // 5 minutes rounds down to zero hours.
        assert_eq!(store.display().study_hours, 0);
        Ok(())
    }

    #[test]
    fn test_record_round_trips_through_storage() -> Fallible<()> {
        let db = Database::new(":memory:")?;
        let mut store = ProgressStore::load(db.clone());
        store.record_quiz_result(80)?;
        store.record_topic("biology")?;
        store.record_topic("physics")?;
        store.append_activity("Completed quiz - Score: 80%")?;

        let reloaded = ProgressStore::load(db);
        assert_eq!(reloaded.record(), store.record());
        Ok(())
    }

    #[test]
    fn test_malformed_record_falls_back_to_defaults() {
        let db = Database::new(":memory:").unwrap();
        db.put(PROGRESS_KEY, "{not json").unwrap();
        let store = ProgressStore::load(db);
        assert_eq!(store.record(), &ProgressRecord::default());
    }

    #[test]
    fn test_missing_fields_merge_over_defaults() {
        let db = Database::new(":memory:").unwrap();
        db.put(PROGRESS_KEY, r#"{"quizzesCompleted": 2, "totalScore": 150}"#)
            .unwrap();
        let store = ProgressStore::load(db);
        assert_eq!(store.record().quizzes_completed, 2);
        assert_eq!(store.record().total_score, 150);
        assert!(store.record().activities.is_empty());
        assert_eq!(store.display().average_score, 75);
    }

    #[test]
    fn test_recent_activities_shows_last_five_newest_first() -> Fallible<()> {
        let mut store = empty_store();
        for n in 1..=7 {
            store.append_activity(&format!("Activity {n}"))?;
        }
        let display = store.display();
        assert_eq!(display.recent_activities.len(), 5);
        assert!(display.recent_activities[0].ends_with("Activity 7"));
        assert!(display.recent_activities[4].ends_with("Activity 3"));
        Ok(())
    }

    #[test]
    fn test_activity_entries_carry_a_timestamp() -> Fallible<()> {
        let mut store = empty_store();
        store.append_activity("Generated study plan")?;
        let entry = &store.record().activities[0];
        assert!(entry.ends_with(": Generated study plan"));
        assert!(entry.len() > ": Generated study plan".len());
        Ok(())
    }
}

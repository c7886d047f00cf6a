//! Calculation history
//!
//! A bounded list of past calculations, newest first. Only successful
//! evaluations are ever recorded.

use chrono::{Local, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single entry in the calculation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression that was evaluated, after glyph normalization
    pub expression: String,
    /// The formatted result text
    pub result: String,
    /// Local wall-clock time of the evaluation
    pub recorded_at: NaiveTime,
}

impl HistoryEntry {
    /// Creates a new entry stamped with the current local time
    #[must_use]
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self::with_time(expression, result, Local::now().time())
    }

    /// Creates an entry with a specific time (for testing)
    #[must_use]
    pub fn with_time(
        expression: impl Into<String>,
        result: impl Into<String>,
        recorded_at: NaiveTime,
    ) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
            recorded_at,
        }
    }

    /// Returns `expression = result`
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }

    /// Returns `HH:MM:SS: expression = result`
    #[must_use]
    pub fn display_timestamped(&self) -> String {
        format!("{}: {}", self.recorded_at.format("%H:%M:%S"), self.display())
    }
}

/// Bounded calculation history, newest entry first
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_MAX_ENTRIES: usize = 10;

    /// Creates a new history with default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Creates a history with custom maximum size
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Prepends an entry, evicting the oldest beyond capacity
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.max_entries);
    }

    /// Records a calculation stamped with the current time
    pub fn record(&mut self, expression: &str, result: &str) {
        self.push(HistoryEntry::new(expression, result));
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Clears all history entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates newest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Returns the oldest retained entry
    #[must_use]
    pub fn oldest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Returns the entry at the given index (0 = newest)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Rendered display lines, newest first
    #[must_use]
    pub fn lines(&self, timestamped: bool) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| {
                if timestamped {
                    entry.display_timestamped()
                } else {
                    entry.display()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    // ===== HistoryEntry tests =====

    #[test]
    fn test_history_entry_new() {
        let entry = HistoryEntry::new("2+2", "4");
        assert_eq!(entry.expression, "2+2");
        assert_eq!(entry.result, "4");
    }

    #[test]
    fn test_history_entry_display() {
        let entry = HistoryEntry::new("2+2", "4");
        assert_eq!(entry.display(), "2+2 = 4");
    }

    #[test]
    fn test_history_entry_display_timestamped() {
        let entry = HistoryEntry::with_time("7/2", "3.5", at(9, 5, 3));
        assert_eq!(entry.display_timestamped(), "09:05:03: 7/2 = 3.5");
    }

    #[test]
    fn test_history_entry_serialize() {
        let entry = HistoryEntry::with_time("2*3", "6", at(12, 0, 0));
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"expression\":\"2*3\""));
        assert!(json.contains("\"result\":\"6\""));
        assert!(json.contains("12:00:00"));
    }

    #[test]
    fn test_history_entry_deserialize() {
        let json = r#"{"expression":"10/2","result":"5","recorded_at":"08:30:00"}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.expression, "10/2");
        assert_eq!(entry.recorded_at, at(8, 30, 0));
    }

    // ===== History tests =====

    #[test]
    fn test_history_new() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.max_entries(), 10);
    }

    #[test]
    fn test_history_record_is_newest_first() {
        let mut history = History::new();
        history.record("1+1", "2");
        history.record("2+2", "4");
        assert_eq!(history.latest().unwrap().expression, "2+2");
        assert_eq!(history.oldest().unwrap().expression, "1+1");
        assert_eq!(history.get(0).unwrap().result, "4");
        assert_eq!(history.get(1).unwrap().result, "2");
        assert!(history.get(2).is_none());
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = History::new();
        for i in 0..11 {
            history.record(&format!("{i}+0"), &i.to_string());
        }
        assert_eq!(history.len(), 10);
        assert_eq!(history.latest().unwrap().expression, "10+0");
        assert_eq!(history.oldest().unwrap().expression, "1+0");
        assert!(history.iter().all(|e| e.expression != "0+0"));
    }

    #[test]
    fn test_history_with_capacity() {
        let mut history = History::with_capacity(3);
        for i in 0..5 {
            history.record("x", &i.to_string());
        }
        let results: Vec<&str> = history.iter().map(|e| e.result.as_str()).collect();
        assert_eq!(results, vec!["4", "3", "2"]);
    }

    #[test]
    fn test_history_clear() {
        let mut history = History::new();
        history.record("1", "1");
        history.clear();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
    }

    #[test]
    fn test_history_lines() {
        let mut history = History::new();
        history.push(HistoryEntry::with_time("1+1", "2", at(10, 0, 0)));
        history.push(HistoryEntry::with_time("2*3", "6", at(10, 0, 5)));

        assert_eq!(history.lines(false), vec!["2*3 = 6", "1+1 = 2"]);
        assert_eq!(
            history.lines(true),
            vec!["10:00:05: 2*3 = 6", "10:00:00: 1+1 = 2"]
        );
    }

    #[test]
    fn test_history_lines_empty() {
        assert!(History::new().lines(true).is_empty());
    }
}

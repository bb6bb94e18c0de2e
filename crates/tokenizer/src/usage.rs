//! Per-day token usage tallies.
//!
//! The chat front end counts the tokens of every outgoing request and every
//! incoming response, grouped by calendar day. Counts belong to the current
//! day only: when the day changes, the tallies start over.

use crate::tokenizer::Tokenizer;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which side of a chat exchange a count belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Text sent by the user
    Request,
    /// Text generated by the model
    Response,
}

/// Token total for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Request and response token counts per day.
///
/// Serializes to the shape the document store keeps per user:
/// `{"currentDay": ..., "requestTokenCounts": [...], "responseTokenCounts": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLedger {
    current_day: Option<NaiveDate>,
    request_token_counts: Vec<DailyCount>,
    response_token_counts: Vec<DailyCount>,
}

impl UsageLedger {
    /// Create an empty ledger with no current day.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty ledger for `today`.
    pub fn starting(today: NaiveDate) -> Self {
        Self {
            current_day: Some(today),
            ..Self::default()
        }
    }

    /// The day the tallies belong to.
    pub fn current_day(&self) -> Option<NaiveDate> {
        self.current_day
    }

    /// Start a new day if `today` differs from the current one.
    ///
    /// Returns `true` when the tallies were cleared.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.current_day == Some(today) {
            return false;
        }

        debug!(from = ?self.current_day, to = %today, "usage ledger rolled over");
        self.current_day = Some(today);
        self.request_token_counts.clear();
        self.response_token_counts.clear();
        true
    }

    /// Add `tokens` to the count for `date`. Returns the new total for that day.
    pub fn record(&mut self, direction: Direction, date: NaiveDate, tokens: u64) -> u64 {
        let counts = self.counts_mut(direction);
        match counts.iter_mut().find(|c| c.date == date) {
            Some(entry) => {
                entry.count += tokens;
                entry.count
            }
            None => {
                counts.push(DailyCount {
                    date,
                    count: tokens,
                });
                tokens
            }
        }
    }

    /// Count and record one request/response exchange made on `date`.
    ///
    /// Returns the token counts of the request and the response.
    pub fn record_exchange(
        &mut self,
        tokenizer: &Tokenizer,
        date: NaiveDate,
        request: &str,
        response: &str,
    ) -> (usize, usize) {
        self.roll_over(date);

        let request_tokens = tokenizer.count(request);
        let response_tokens = tokenizer.count(response);
        self.record(Direction::Request, date, request_tokens as u64);
        self.record(Direction::Response, date, response_tokens as u64);

        (request_tokens, response_tokens)
    }

    /// Per-day counts in the order the days were first recorded.
    pub fn daily(&self, direction: Direction) -> &[DailyCount] {
        match direction {
            Direction::Request => &self.request_token_counts,
            Direction::Response => &self.response_token_counts,
        }
    }

    /// Total for one day, zero if nothing was recorded.
    pub fn total(&self, direction: Direction, date: NaiveDate) -> u64 {
        self.daily(direction)
            .iter()
            .find(|c| c.date == date)
            .map_or(0, |c| c.count)
    }

    fn counts_mut(&mut self, direction: Direction) -> &mut Vec<DailyCount> {
        match direction {
            Direction::Request => &mut self.request_token_counts,
            Direction::Response => &mut self.response_token_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatbpe_core::MergeTable;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn tokenizer() -> Tokenizer {
        Tokenizer::initialize(
            [("he", 0), ("llo", 1)].into_iter().collect(),
            MergeTable::from_pairs([("he", "llo")]),
        )
    }

    #[test]
    fn test_record_accumulates() {
        let mut ledger = UsageLedger::starting(day(1));
        assert_eq!(ledger.record(Direction::Request, day(1), 5), 5);
        assert_eq!(ledger.record(Direction::Request, day(1), 3), 8);
        assert_eq!(ledger.total(Direction::Request, day(1)), 8);
        assert_eq!(ledger.total(Direction::Response, day(1)), 0);
    }

    #[test]
    fn test_record_exchange_counts_both_sides() {
        let tok = tokenizer();
        let mut ledger = UsageLedger::new();

        let (req, resp) = ledger.record_exchange(&tok, day(2), "hello there", "hello");
        // "there" seeds as t + he + r + e
        assert_eq!(req, 5);
        assert_eq!(resp, 1);
        assert_eq!(ledger.current_day(), Some(day(2)));

        ledger.record_exchange(&tok, day(2), "hello", "");
        assert_eq!(ledger.total(Direction::Request, day(2)), 6);
        assert_eq!(ledger.total(Direction::Response, day(2)), 1);
    }

    #[test]
    fn test_roll_over_clears_previous_day() {
        let tok = tokenizer();
        let mut ledger = UsageLedger::starting(day(3));
        ledger.record_exchange(&tok, day(3), "hello", "hello");

        assert!(!ledger.roll_over(day(3)));
        assert!(ledger.roll_over(day(4)));
        assert!(ledger.daily(Direction::Request).is_empty());

        ledger.record_exchange(&tok, day(4), "hello", "hello hello");
        assert_eq!(
            ledger.daily(Direction::Response),
            &[DailyCount {
                date: day(4),
                count: 2
            }]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let mut ledger = UsageLedger::starting(day(5));
        ledger.record(Direction::Response, day(5), 12);

        let value = serde_json::to_value(&ledger).unwrap();
        assert_eq!(value["currentDay"], "2024-03-05");
        assert_eq!(value["responseTokenCounts"][0]["count"], 12);
        assert_eq!(value["requestTokenCounts"].as_array().map(Vec::len), Some(0));

        let back: UsageLedger = serde_json::from_value(value).unwrap();
        assert_eq!(back, ledger);
    }
}

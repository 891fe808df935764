use crate::error::{GameError, Result};
use crate::util::{ceil_hundredths, mean};

/// Shown in place of an average when no words were recorded.
pub const NO_DATA: &str = "n/a";

/// End-of-game statistics, computed once when the session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    word_lengths: Vec<usize>,
    elapsed_ms: u64,
}

impl Statistics {
    pub fn new(used_words: &[String], elapsed_ms: u64) -> Self {
        Self {
            word_lengths: used_words.iter().map(|w| w.chars().count()).collect(),
            elapsed_ms,
        }
    }

    pub fn word_count(&self) -> usize {
        self.word_lengths.len()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Whole seconds played.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms / 1000
    }

    /// Seconds per word, rounded up to two decimals.
    pub fn average_time_per_word(&self) -> Result<f64> {
        ceil_hundredths(self.elapsed_secs(), self.word_count() as u64).ok_or(GameError::NoData)
    }

    /// Mean word length in characters, truncated.
    pub fn average_word_length(&self) -> Result<usize> {
        let lengths: Vec<f64> = self.word_lengths.iter().map(|&l| l as f64).collect();
        mean(&lengths).map(|m| m as usize).ok_or(GameError::NoData)
    }

    /// The four lines of the results screen.
    pub fn summary_lines(&self) -> Vec<String> {
        let per_word = self
            .average_time_per_word()
            .map(|a| format!("{} seconds", display_seconds(a)))
            .unwrap_or_else(|_| NO_DATA.to_string());
        let length = self
            .average_word_length()
            .map(|l| format!("{l} characters"))
            .unwrap_or_else(|_| NO_DATA.to_string());

        vec![
            format!("Number of words used: {}", self.word_count()),
            format!("Time used: {} seconds", self.elapsed_secs()),
            format!("Average time per word: {per_word}"),
            format!("Average word length: {length}"),
        ]
    }
}

/// Whole values keep one decimal place (`10.0`), others print as-is (`2.34`).
fn display_seconds(secs: f64) -> String {
    if secs.fract() == 0.0 {
        format!("{secs:.1}")
    } else {
        secs.to_string()
    }
}

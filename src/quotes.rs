//! Custom quotes per day and the built-in fallback collection.

use chrono::Datelike;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::date_key::{DateKey, DateKeyError};
use crate::storage::{Storage, StorageError, CUSTOM_QUOTES_KEY};

/// Message shown when a save is attempted without a date or text
pub const VALIDATION_MESSAGE: &str = "Please select a date and enter a quote";

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("no date selected")]
    MissingDate,
    #[error("invalid date: {0}")]
    InvalidDate(#[from] DateKeyError),
    #[error("quote text is empty")]
    EmptyQuote,
    #[error("quote saved for this session only: {0}")]
    Storage(#[from] StorageError),
}

impl QuoteError {
    /// Whether the input itself was rejected (nothing was changed)
    pub fn is_validation(&self) -> bool {
        !matches!(self, QuoteError::Storage(_))
    }
}

/// Date-keyed map of user-authored quotes, persisted as a JSON object
pub struct QuoteStore {
    quotes: BTreeMap<DateKey, String>,
    storage: Storage,
}

impl QuoteStore {
    /// Load every stored quote.
    ///
    /// Missing or corrupt data yields an empty store; individual entries
    /// with malformed keys are dropped.
    pub fn load_all(storage: Storage) -> Self {
        let quotes = match storage.get_item(CUSTOM_QUOTES_KEY) {
            Some(raw) => parse_quotes(&raw),
            None => BTreeMap::new(),
        };
        tracing::info!("Loaded {} custom quotes", quotes.len());
        Self { quotes, storage }
    }

    pub fn get(&self, key: &DateKey) -> Option<&str> {
        self.quotes.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &DateKey) -> bool {
        self.quotes.contains_key(key)
    }

    /// Save `text` for `key`, replacing any previous quote for that day.
    ///
    /// Surrounding whitespace is trimmed. A missing key or blank text is
    /// rejected without touching the store. If persisting fails the quote
    /// is kept in memory and `QuoteError::Storage` is returned.
    pub fn set(&mut self, key: Option<DateKey>, text: &str) -> Result<DateKey, QuoteError> {
        let text = text.trim();
        let key = key.ok_or(QuoteError::MissingDate)?;
        if text.is_empty() {
            return Err(QuoteError::EmptyQuote);
        }

        self.quotes.insert(key, text.to_string());
        tracing::debug!("Saved quote for {}", key);
        self.persist()?;
        Ok(key)
    }

    /// Quotes sorted by date
    pub fn entries(&self) -> impl Iterator<Item = (&DateKey, &str)> {
        self.quotes.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&self.quotes)?;
        self.storage.set_item(CUSTOM_QUOTES_KEY, &encoded)
    }
}

fn parse_quotes(raw: &str) -> BTreeMap<DateKey, String> {
    let map: BTreeMap<String, String> = match serde_json::from_str(raw) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!("Stored quotes are unreadable, starting empty: {}", e);
            return BTreeMap::new();
        }
    };

    map.into_iter()
        .filter_map(|(key, text)| match key.parse::<DateKey>() {
            Ok(key) => Some((key, text)),
            Err(e) => {
                tracing::warn!("Skipping stored quote: {}", e);
                None
            }
        })
        .collect()
}

/// How a quote is chosen for a day without a custom one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSelection {
    /// A fresh uniform pick every time the day is opened
    #[default]
    Random,
    /// The same pick every time for a given day
    Daily,
}

const BUILTIN_QUOTES: &[&str] = &[
    "The only way to do great work is to love what you do. - Steve Jobs",
    "It does not matter how slowly you go as long as you do not stop. - Confucius",
    "The future belongs to those who believe in the beauty of their dreams. - Eleanor Roosevelt",
    "Believe you can and you're halfway there. - Theodore Roosevelt",
    "Act as if what you do makes a difference. It does. - William James",
    "Well done is better than well said. - Benjamin Franklin",
    "You miss 100% of the shots you don't take. - Wayne Gretzky",
    "The best time to plant a tree was 20 years ago. The second best time is now. - Chinese Proverb",
    "Quality is not an act, it is a habit. - Aristotle",
    "What you do today can improve all your tomorrows. - Ralph Marston",
    "Start where you are. Use what you have. Do what you can. - Arthur Ashe",
    "Everything you've ever wanted is on the other side of fear. - George Addair",
    "It always seems impossible until it's done. - Nelson Mandela",
    "Keep your face always toward the sunshine, and shadows will fall behind you. - Walt Whitman",
    "The secret of getting ahead is getting started. - Mark Twain",
    "Dream big and dare to fail. - Norman Vaughan",
    "Our greatest glory is not in never falling, but in rising every time we fall. - Confucius",
    "With the new day comes new strength and new thoughts. - Eleanor Roosevelt",
    "Little by little, one travels far. - J.R.R. Tolkien",
    "You are never too old to set another goal or to dream a new dream. - C.S. Lewis",
];

/// Source of quotes for days the user has not written one for
#[derive(Debug, Clone)]
pub struct QuotePicker {
    quotes: Vec<String>,
    selection: QuoteSelection,
}

impl QuotePicker {
    /// Built-in quotes followed by `extra`
    pub fn new(selection: QuoteSelection, extra: &[String]) -> Self {
        let quotes = BUILTIN_QUOTES
            .iter()
            .map(|q| q.to_string())
            .chain(extra.iter().map(|q| q.trim().to_string()).filter(|q| !q.is_empty()))
            .collect();
        Self { quotes, selection }
    }

    pub fn selection(&self) -> QuoteSelection {
        self.selection
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Pick a quote for `key`; never persisted
    pub fn pick(&self, key: &DateKey) -> &str {
        let choice = match self.selection {
            QuoteSelection::Random => self.quotes.choose(&mut rand::thread_rng()),
            QuoteSelection::Daily => {
                let seed = key.date().num_days_from_ce() as u64;
                self.quotes.choose(&mut StdRng::seed_from_u64(seed))
            }
        };
        // The built-in list is never empty
        choice.map(String::as_str).unwrap_or(BUILTIN_QUOTES[0])
    }

    #[cfg(test)]
    fn contains(&self, quote: &str) -> bool {
        self.quotes.iter().any(|q| q == quote)
    }
}

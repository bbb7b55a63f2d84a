//! Game symbols and the alphabet they are drawn from.
//!
//! A `Symbol` is an opaque index into an `Alphabet`. The engine only compares
//! symbols for equality; labels exist for presentation layers and for parsing
//! player input from text.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Labels of the default five-token alphabet.
pub const DEFAULT_LABELS: [&str; 5] = ["star", "heart", "fire", "smile", "bolt"];

/// A single game token.
///
/// Symbols are plain indices; two symbols are the same token iff their
/// indices are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(pub u8);

impl Symbol {
    /// Create a new symbol.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the index within the alphabet.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Fixed, ordered set of equally-likely symbols.
///
/// Serializes as its list of labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Alphabet {
    labels: Vec<String>,
    lookup: FxHashMap<String, Symbol>,
}

impl Alphabet {
    /// Build an alphabet from labels.
    ///
    /// Labels must be non-empty, unique, and at most 256 of them.
    pub fn new<I, S>(labels: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        if labels.len() > usize::from(u8::MAX) + 1 {
            return Err(ConfigError::AlphabetTooLarge(labels.len()));
        }

        let mut lookup = FxHashMap::default();
        for (index, label) in labels.iter().enumerate() {
            if lookup.insert(label.clone(), Symbol(index as u8)).is_some() {
                return Err(ConfigError::DuplicateLabel(label.clone()));
            }
        }

        Ok(Self { labels, lookup })
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed alphabet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Does this alphabet contain the symbol?
    #[must_use]
    pub fn contains(&self, symbol: Symbol) -> bool {
        symbol.index() < self.labels.len()
    }

    /// Label of a symbol, if it belongs to this alphabet.
    #[must_use]
    pub fn label(&self, symbol: Symbol) -> Option<&str> {
        self.labels.get(symbol.index()).map(String::as_str)
    }

    /// Look up a symbol by its label.
    #[must_use]
    pub fn parse(&self, label: &str) -> Option<Symbol> {
        self.lookup.get(label).copied()
    }

    /// Iterate over all symbols in order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.labels.len()).map(|i| Symbol(i as u8))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let labels = DEFAULT_LABELS.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
        let lookup = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), Symbol(i as u8)))
            .collect();
        Self { labels, lookup }
    }
}

impl TryFrom<Vec<String>> for Alphabet {
    type Error = ConfigError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

impl From<Alphabet> for Vec<String> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.labels
    }
}

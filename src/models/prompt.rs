use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Identity of a saved prompt. New ids are numeric; string ids are accepted so
/// data written by other tools still loads.
///
/// Ids compare by their text form, so `Text("17")` and `Number(17)` are the
/// same id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptId {
    Number(u64),
    Text(String),
}

impl PromptId {
    pub fn as_number(&self) -> Option<u64> {
        match self {
            PromptId::Number(n) => Some(*n),
            PromptId::Text(s) => s.parse().ok(),
        }
    }

    fn key(&self) -> Cow<'_, str> {
        match self {
            PromptId::Number(n) => Cow::Owned(n.to_string()),
            PromptId::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl PartialEq for PromptId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PromptId::Number(a), PromptId::Number(b)) => a == b,
            _ => self.key() == other.key(),
        }
    }
}

impl Eq for PromptId {}

impl Hash for PromptId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptId::Number(n) => write!(f, "{}", n),
            PromptId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for PromptId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<u64>() {
            Ok(n) => PromptId::Number(n),
            Err(_) => PromptId::Text(s.to_string()),
        })
    }
}

impl From<u64> for PromptId {
    fn from(n: u64) -> Self {
        PromptId::Number(n)
    }
}

/// A previously generated prompt the user chose to keep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedPrompt {
    pub id: PromptId,
    pub topic: String,
    pub prompt: String,
    /// Human-readable local creation time.
    pub timestamp: String,
}

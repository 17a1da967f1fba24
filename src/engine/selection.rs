use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::ScoredCandidate;
use crate::error::{config_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
    /// Relevance score first, rating as the tie breaker.
    Relevance,
    /// Rating only.
    Rating,
}

/// How scored candidates are filtered, ordered and capped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionPolicy {
    pub ranking: Ranking,
    pub min_score: f64,
    pub max_results: usize,
}

impl SelectionPolicy {
    pub const fn tag_weighted() -> Self {
        Self {
            ranking: Ranking::Relevance,
            min_score: 5.0,
            max_results: 4,
        }
    }

    pub const fn rating_only() -> Self {
        Self {
            ranking: Ranking::Rating,
            min_score: 0.0,
            max_results: 10,
        }
    }

    fn compare(&self, a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
        let by_rating = b.rating().total_cmp(&a.rating());

        match self.ranking {
            Ranking::Relevance => b.score.total_cmp(&a.score).then(by_rating),
            Ranking::Rating => by_rating,
        }
    }

    /// Drops candidates under `min_score`, orders the rest best first and
    /// keeps at most `max_results`. Ties keep their incoming order.
    pub fn select(&self, mut candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
        candidates.retain(|c| c.score >= self.min_score);
        candidates.sort_by(|a, b| self.compare(a, b));
        candidates.truncate(self.max_results);
        candidates
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::tag_weighted()
    }
}

impl FromStr for SelectionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tag_weighted" => Ok(Self::tag_weighted()),
            "rating_only" => Ok(Self::rating_only()),
            other => Err(config_error(format!("unknown selection policy: {}", other))),
        }
    }
}

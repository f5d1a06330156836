//! Show records, payload allowlists and genre filtering

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status of a show that is no longer produced
pub const STATUS_CANCELED: &str = "canceled";
/// Status of a show that is still airing
pub const STATUS_ON_GOING: &str = "on-going";

/// Show entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub id: Uuid,
    pub title: String,
    pub genre: String,
    pub rating: Option<String>,
    pub available: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Show creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewShow {
    pub title: String,
    pub genre: String,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Partial show update payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct UpdateShow {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<String>,
    pub available: Option<bool>,
    pub status: Option<String>,
}

impl Show {
    /// Build a fresh record with a generated identifier
    pub fn from_new(new_show: &NewShow) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: new_show.title.clone(),
            genre: new_show.genre.clone(),
            rating: new_show.rating.clone(),
            available: new_show.available.unwrap_or(true),
            status: new_show
                .status
                .clone()
                .unwrap_or_else(|| STATUS_ON_GOING.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the supplied fields into this record
    pub fn apply(&mut self, changes: UpdateShow) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(genre) = changes.genre {
            self.genre = genre;
        }
        if let Some(rating) = changes.rating {
            self.rating = Some(rating);
        }
        if let Some(available) = changes.available {
            self.available = available;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
    }

    /// Flip the status between canceled and on-going
    pub fn toggle_status(&mut self) {
        self.status = toggled_status(&self.status).to_string();
    }
}

/// Anything that is not canceled counts as on-going and becomes canceled.
pub fn toggled_status(current: &str) -> &'static str {
    if current == STATUS_CANCELED {
        STATUS_ON_GOING
    } else {
        STATUS_CANCELED
    }
}

/// Case-insensitive substring filter on the genre column
///
/// `_` in the normalized text matches any single character, so `sci fi`
/// finds `Sci Fi`, `Sci-Fi` and `Sci_Fi` alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreFilter {
    normalized: String,
}

impl GenreFilter {
    /// Lower-case the input and turn every whitespace character into `_`
    pub fn new(raw: &str) -> Self {
        let normalized = raw
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();

        Self { normalized }
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// `ILIKE` pattern with `%` and `\` escaped; `_` stays a wildcard
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.normalized.len() + 2);
        pattern.push('%');
        for c in self.normalized.chars() {
            if matches!(c, '\\' | '%') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// Whether a stored genre satisfies the filter
    pub fn matches(&self, genre: &str) -> bool {
        let needle: Vec<char> = self.normalized.chars().collect();
        let haystack: Vec<char> = genre.to_lowercase().chars().collect();
        if needle.is_empty() {
            return true;
        }

        haystack.windows(needle.len()).any(|window| {
            window
                .iter()
                .zip(&needle)
                .all(|(stored, wanted)| *wanted == '_' || stored == wanted)
        })
    }
}

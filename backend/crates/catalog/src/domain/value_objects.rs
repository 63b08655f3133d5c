//! Domain Value Objects
//!
//! Validated input for catalog writes. Constructors run before any
//! storage call.

use chrono::NaiveDate;

use crate::error::{CatalogError, CatalogResult};

/// Release date wire format
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validated game fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDraft {
    pub title: String,
    pub developer: String,
    pub release_date: NaiveDate,
    pub description: String,
}

impl GameDraft {
    pub fn new(
        title: impl Into<String>,
        developer: impl Into<String>,
        release_date: &str,
        description: impl Into<String>,
    ) -> CatalogResult<Self> {
        let title = required(title.into())?;
        let developer = required(developer.into())?;
        let description = required(description.into())?;

        let release_date = NaiveDate::parse_from_str(release_date.trim(), RELEASE_DATE_FORMAT)
            .map_err(|_| {
                CatalogError::validation("Invalid Release Date format. Use 'YYYY-MM-DD'.")
            })?;

        Ok(Self {
            title,
            developer,
            release_date,
            description,
        })
    }
}

fn required(value: String) -> CatalogResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::validation("Fill all the blank!"));
    }
    Ok(trimmed.to_string())
}

/// Review score in `0..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 10;

    pub fn new(value: i64) -> CatalogResult<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or_else(|| CatalogError::validation("Rating should be 0-10"))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Rebuild a rating read back from storage
    pub fn from_db(value: i16) -> CatalogResult<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or_else(|| CatalogError::Internal(format!("Invalid rating in database: {}", value)))
    }
}

/// Non-empty review body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewText(String);

impl ReviewText {
    pub fn new(text: impl Into<String>) -> CatalogResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(CatalogError::validation("Write something, please"));
        }
        Ok(Self(text))
    }

    pub fn from_db(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

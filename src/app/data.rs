// src/app/data.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type FilmId = i64;

/// Placeholder shown for missing numeric values.
pub const EMPTY_CELL: &str = "—";

/// A film as the remote API stores it. `id` is `None` for an unsaved draft.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Film {
    #[serde(default)]
    pub id: Option<FilmId>,
    pub title: String,
    #[serde(default)]
    pub length: Option<i64>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub genre: Option<i64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilmField {
    Title,
    Length,
    Year,
    Score,
    Genre,
}

impl FilmField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Length => "length",
            Self::Year => "year",
            Self::Score => "score",
            Self::Genre => "genre",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "title" => Some(Self::Title),
            "length" => Some(Self::Length),
            "year" => Some(Self::Year),
            "score" => Some(Self::Score),
            "genre" => Some(Self::Genre),
            _ => None,
        }
    }
}

/// Input constraints the form enforces before a submit is allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("field `{}` is required", .0.as_str())]
    Missing(FilmField),
    #[error("field `{}` must be a number", .0.as_str())]
    NotNumeric(FilmField),
}

/// Working copy bound to the form. Every editable field stays text until submit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilmDraft {
    pub id: Option<FilmId>,
    pub title: String,
    pub length: String,
    pub year: String,
    pub score: String,
    pub genre: String,
}

impl FilmDraft {
    pub fn from_film(film: &Film) -> Self {
        Self {
            id: film.id,
            title: film.title.clone(),
            length: opt_to_text(film.length),
            year: opt_to_text(film.year),
            score: opt_to_text(film.score),
            genre: opt_to_text(film.genre),
        }
    }

    pub fn field(&self, field: FilmField) -> &str {
        match field {
            FilmField::Title => &self.title,
            FilmField::Length => &self.length,
            FilmField::Year => &self.year,
            FilmField::Score => &self.score,
            FilmField::Genre => &self.genre,
        }
    }

    pub fn field_mut(&mut self, field: FilmField) -> &mut String {
        match field {
            FilmField::Title => &mut self.title,
            FilmField::Length => &mut self.length,
            FilmField::Year => &mut self.year,
            FilmField::Score => &mut self.score,
            FilmField::Genre => &mut self.genre,
        }
    }

    /// Same checks a browser applies to the `required` / `type=number` inputs.
    pub fn check(&self) -> Result<(), FormError> {
        if self.title.is_empty() {
            return Err(FormError::Missing(FilmField::Title));
        }
        for field in [FilmField::Length, FilmField::Year, FilmField::Score] {
            let text = self.field(field);
            if text.is_empty() {
                return Err(FormError::Missing(field));
            }
            let ok = match field {
                FilmField::Score => parse_decimal(text).is_some(),
                _ => parse_integer(text).is_some(),
            };
            if !ok {
                return Err(FormError::NotNumeric(field));
            }
        }
        Ok(())
    }

    /// Coerce to the payload sent to the API. Blank numeric text becomes `None`.
    pub fn to_film(&self) -> Film {
        Film {
            id: self.id,
            title: self.title.clone(),
            length: parse_integer(&self.length),
            year: parse_integer(&self.year),
            score: parse_decimal(&self.score),
            genre: parse_integer(&self.genre),
        }
    }
}

fn opt_to_text<T: ToString>(v: Option<T>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

/// Number syntax a `type=number` input accepts: no sign prefix `+`,
/// no `NaN`/`inf` spellings. Blank text is `None`.
fn number_text(text: &str) -> Option<&str> {
    let t = text.trim();
    if t.is_empty() || t.starts_with('+') {
        return None;
    }
    Some(t)
}

fn parse_integer(text: &str) -> Option<i64> {
    number_text(text)?.parse().ok()
}

fn parse_decimal(text: &str) -> Option<f64> {
    number_text(text)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Table cell text: the value, or the em-dash placeholder when absent.
pub fn cell_text<T: ToString>(v: Option<T>) -> String {
    v.map(|n| n.to_string())
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

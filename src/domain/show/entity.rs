use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder artwork used when the API has no image for a show
pub const DEFAULT_IMAGE_URL: &str =
    "https://static.tvmaze.com/images/no-img/no-img-portrait-text.png";

/// A show as returned by the catalog API.
/// Immutable once fetched; almost every field may be null upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: u64,

    #[serde(default)]
    pub url: Option<String>,

    pub name: String,

    /// Scripted, Animation, Reality, ...
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub runtime: Option<u32>,

    #[serde(default)]
    pub average_runtime: Option<u32>,

    /// ISO date, e.g. "2013-06-24"
    #[serde(default)]
    pub premiered: Option<String>,

    #[serde(default)]
    pub ended: Option<String>,

    #[serde(default)]
    pub official_site: Option<String>,

    /// HTML fragment
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: Rating,

    #[serde(default)]
    pub image: Option<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

/// Which rendition of the artwork to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Medium,
    Original,
}

/// Ranked result from the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub score: f64,
    pub show: Show,
}

impl Show {
    /// Minimal show, mostly useful for fixtures
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            url: None,
            name: name.into(),
            kind: None,
            language: None,
            genres: Vec::new(),
            status: None,
            runtime: None,
            average_runtime: None,
            premiered: None,
            ended: None,
            official_site: None,
            summary: None,
            rating: Rating::default(),
            image: None,
        }
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rating(mut self, average: Option<f64>) -> Self {
        self.rating.average = average;
        self
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    pub fn rating_average(&self) -> Option<f64> {
        self.rating.average
    }

    pub fn premiere_year(&self) -> Option<i32> {
        self.premiered.as_deref().and_then(year_of)
    }

    pub fn end_year(&self) -> Option<i32> {
        self.ended.as_deref().and_then(year_of)
    }

    /// Artwork URL, falling back to the placeholder
    pub fn image_url(&self, size: ImageSize) -> &str {
        image_url_or_default(self.image.as_ref(), size)
    }

    /// Summary with HTML tags removed
    pub fn plain_summary(&self) -> Option<String> {
        self.summary.as_deref().map(strip_html)
    }
}

pub(crate) fn image_url_or_default(image: Option<&Image>, size: ImageSize) -> &str {
    image
        .and_then(|img| match size {
            ImageSize::Medium => img.medium.as_deref(),
            ImageSize::Original => img.original.as_deref(),
        })
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_IMAGE_URL)
}

pub(crate) fn year_of(date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

pub(crate) fn strip_html(html: &str) -> String {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    let tags = TAGS.get_or_init(|| Regex::new(r"<[^>]*>").expect("static regex"));
    tags.replace_all(html, "").trim().to_string()
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

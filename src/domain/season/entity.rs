use serde::{Deserialize, Serialize};

use crate::domain::show::entity::{
    image_url_or_default, null_as_default, strip_html, year_of, Image, ImageSize, Rating,
};

/// A season of a show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: u64,

    #[serde(default)]
    pub url: Option<String>,

    pub number: u32,

    /// Frequently an empty string upstream
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub episode_order: Option<u32>,

    #[serde(default)]
    pub premiere_date: Option<String>,

    #[serde(default)]
    pub end_date: Option<String>,

    #[serde(default)]
    pub network: Option<Network>,

    #[serde(default)]
    pub web_channel: Option<Network>,

    #[serde(default)]
    pub image: Option<Image>,

    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub country: Option<Country>,
    #[serde(default)]
    pub official_site: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub code: String,
    pub timezone: String,
}

/// A single episode of a season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,

    #[serde(default)]
    pub url: Option<String>,

    pub name: String,

    pub season: u32,

    /// Specials have no number
    #[serde(default)]
    pub number: Option<u32>,

    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub airdate: Option<String>,

    #[serde(default)]
    pub airtime: Option<String>,

    #[serde(default)]
    pub airstamp: Option<String>,

    #[serde(default)]
    pub runtime: Option<u32>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: Rating,

    #[serde(default)]
    pub image: Option<Image>,

    #[serde(default)]
    pub summary: Option<String>,
}

impl Season {
    /// Display label: the season name when present, "Season N" otherwise
    pub fn label(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Season {}", self.number),
        }
    }

    pub fn premiere_year(&self) -> Option<i32> {
        self.premiere_date.as_deref().and_then(year_of)
    }

    pub fn image_url(&self, size: ImageSize) -> &str {
        image_url_or_default(self.image.as_ref(), size)
    }

    pub fn plain_summary(&self) -> Option<String> {
        self.summary.as_deref().map(strip_html)
    }
}

impl Episode {
    /// Short code such as "S01E05"; specials get "S01 Special"
    pub fn code(&self) -> String {
        match self.number {
            Some(number) => format!("S{:02}E{:02}", self.season, number),
            None => format!("S{:02} Special", self.season),
        }
    }

    pub fn air_year(&self) -> Option<i32> {
        self.airdate.as_deref().and_then(year_of)
    }

    pub fn image_url(&self, size: ImageSize) -> &str {
        image_url_or_default(self.image.as_ref(), size)
    }

    pub fn plain_summary(&self) -> Option<String> {
        self.summary.as_deref().map(strip_html)
    }
}

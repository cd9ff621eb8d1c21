use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;

use crate::error::{Result, TrendsError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// A closed ring of positions: at least two vertices, first equal to last.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Position>,
}

impl Polygon {
    pub fn new(vertices: Vec<Position>) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(TrendsError::InvalidPolygon(format!(
                "ring has {} vertices, need at least 2",
                vertices.len()
            )));
        }
        if let Some(p) = vertices.iter().find(|p| !p.is_finite()) {
            return Err(TrendsError::InvalidPolygon(format!("non-finite vertex {}", p)));
        }
        if vertices.first() != vertices.last() {
            return Err(TrendsError::InvalidPolygon(
                "first and last vertices differ".to_string(),
            ));
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Position] {
        &self.vertices
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub latitude: f64,
    pub longitude: f64,
    pub area: f64,
}

impl Centroid {
    pub fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }
}

/// Degree of positive or negative feeling, or no value at all. An absent
/// sentiment means unknown, which is not the same thing as a neutral 0.
///
/// The value is private so every present sentiment lies in [-1, 1]:
///
/// ```compile_fail
/// let s = tweet_trends::Sentiment(Some(7.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment(Option<f64>);

impl Sentiment {
    pub const ABSENT: Sentiment = Sentiment(None);

    pub fn new(value: Option<f64>) -> Result<Self> {
        match value {
            None => Ok(Self::ABSENT),
            Some(v) if (-1.0..=1.0).contains(&v) => Ok(Sentiment(Some(v))),
            Some(v) => Err(TrendsError::SentimentOutOfRange(v)),
        }
    }

    /// For values already known to be in range, such as lexicon entries
    /// validated on insert or means of in-range values.
    pub(crate) fn present(value: f64) -> Self {
        debug_assert!((-1.0..=1.0).contains(&value), "sentiment {} out of range", value);
        Sentiment(Some(value))
    }

    pub fn has_sentiment(&self) -> bool {
        self.0.is_some()
    }

    pub fn value(&self) -> Result<f64> {
        self.0.ok_or(TrendsError::NoSentimentValue)
    }

    pub fn as_option(&self) -> Option<f64> {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tweet {
    text: String,
    time: Option<NaiveDateTime>,
    location: Position,
}

impl Tweet {
    pub fn new(text: impl Into<String>, time: Option<NaiveDateTime>, lat: f64, lon: f64) -> Self {
        Self {
            text: text.into(),
            time,
            location: Position::new(lat, lon),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn time(&self) -> Option<NaiveDateTime> {
        self.time
    }

    pub fn location(&self) -> Position {
        self.location
    }

    pub fn latitude(&self) -> f64 {
        self.location.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.location.longitude
    }

    pub fn words(&self) -> Vec<String> {
        crate::sentiment::extract_words(&self.text)
    }
}

impl fmt::Display for Tweet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" @ {}", self.text, self.location)
    }
}

pub type StateShapes = BTreeMap<String, Vec<Polygon>>;
pub type StateCenters = BTreeMap<String, Position>;
pub type GroupedTweets<'a, K> = BTreeMap<K, Vec<&'a Tweet>>;
pub type SentimentTable<K> = BTreeMap<K, f64>;

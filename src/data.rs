//! Loaders for the lexicon, state shapes and tweet corpus.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::Path;

use chrono::NaiveDateTime;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Result, TrendsError};
use crate::sentiment::Lexicon;
use crate::types::{Polygon, Position, StateShapes, Tweet};

pub const TWEET_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| TrendsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Headerless `word,value` rows.
pub fn load_lexicon<P: AsRef<Path>>(path: P) -> Result<Lexicon> {
    let file = open(path.as_ref())?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut pairs = Vec::new();
    for row in reader.deserialize() {
        let (word, value): (String, f64) = row?;
        pairs.push((word, value));
    }
    let lexicon = Lexicon::from_pairs(pairs)?;
    info!(words = lexicon.len(), path = %path.as_ref().display(), "loaded lexicon");
    Ok(lexicon)
}

/// A ring is either written directly or wrapped in a single-element list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawShape {
    Ring(Vec<[f64; 2]>),
    Wrapped(Vec<Vec<[f64; 2]>>),
}

impl RawShape {
    fn into_polygon(self, state: &str) -> Result<Polygon> {
        let ring = match self {
            RawShape::Ring(ring) => ring,
            RawShape::Wrapped(mut rings) => {
                if rings.len() != 1 {
                    return Err(TrendsError::InvalidPolygon(format!(
                        "{} has a multi-ring shape with {} rings",
                        state,
                        rings.len()
                    )));
                }
                rings.remove(0)
            }
        };
        // Stored as [lon, lat].
        Polygon::new(ring.into_iter().map(|[lon, lat]| Position::new(lat, lon)).collect())
    }
}

pub fn parse_states(json: &str) -> Result<StateShapes> {
    let raw: BTreeMap<String, Vec<RawShape>> = serde_json::from_str(json)?;
    let mut states = StateShapes::new();
    for (name, shapes) in raw {
        let polygons = shapes
            .into_iter()
            .map(|s| s.into_polygon(&name))
            .collect::<Result<Vec<_>>>()?;
        debug!(state = %name, polygons = polygons.len(), "parsed state");
        states.insert(name, polygons);
    }
    Ok(states)
}

pub fn load_states<P: AsRef<Path>>(path: P) -> Result<StateShapes> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| TrendsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let states = parse_states(&json)?;
    info!(states = states.len(), path = %path.display(), "loaded state shapes");
    Ok(states)
}

/// Parse one `[lat, lon]\t<unused>\t<time>\t<text>` line. Text is lower-cased.
pub fn parse_tweet_line(line: &str, line_no: usize) -> Result<Tweet> {
    let malformed = |reason: &str| TrendsError::Tweet {
        line: line_no,
        reason: reason.to_string(),
    };

    let mut fields = line.splitn(4, '\t');
    let location = fields.next().ok_or_else(|| malformed("missing location"))?;
    let _ = fields.next().ok_or_else(|| malformed("missing second field"))?;
    let time = fields.next().ok_or_else(|| malformed("missing time"))?;
    let text = fields.next().ok_or_else(|| malformed("missing text"))?;

    let coords = location
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| malformed("location is not bracketed"))?;
    let (lat, lon) = coords
        .split_once(',')
        .ok_or_else(|| malformed("location needs two coordinates"))?;
    let lat: f64 = lat.trim().parse().map_err(|_| malformed("bad latitude"))?;
    let lon: f64 = lon.trim().parse().map_err(|_| malformed("bad longitude"))?;
    if !lat.is_finite() || !lon.is_finite() {
        return Err(malformed("location is not finite"));
    }

    let time = NaiveDateTime::parse_from_str(time.trim(), TWEET_TIME_FORMAT)
        .map_err(|e| malformed(&format!("bad time: {}", e)))?;

    Ok(Tweet::new(text.trim().to_lowercase(), Some(time), lat, lon))
}

/// Case-insensitive matcher for `term` bounded by non-word characters or the
/// ends of the text, so `#vma` and `:)` match as well as plain words. An
/// empty term matches everything.
pub fn term_pattern(term: &str) -> Result<Regex> {
    let term = term.trim();
    let pattern = if term.is_empty() {
        String::new()
    } else {
        format!(r"(?:^|\W){}(?:\W|$)", regex::escape(term))
    };
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| TrendsError::InvalidTerm {
            term: term.to_string(),
            reason: e.to_string(),
        })
}

/// Tweets whose text contains `term` (see [`term_pattern`]).
pub fn load_tweets<P: AsRef<Path>>(path: P, term: &str) -> Result<Vec<Tweet>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| TrendsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let pattern = term_pattern(term)?;

    let mut tweets = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let tweet = parse_tweet_line(line, idx + 1)?;
        if pattern.is_match(tweet.text()) {
            tweets.push(tweet);
        }
    }
    info!(term, matched = tweets.len(), "loaded tweets");
    Ok(tweets)
}

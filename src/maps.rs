//! Drawing states, names and tweet dots onto a map surface.

use std::fmt::Write;

use tracing::{debug, info};

use crate::error::{Result, TrendsError};
use crate::geo::{deg_to_rad, geo_distance};
use crate::sentiment::{analyze_tweet_sentiment, Lexicon};
use crate::trends::{average_sentiments, group_tweets_by_hour, group_tweets_by_state};
use crate::types::{Polygon, Position, SentimentTable, StateCenters, StateShapes, Tweet};

pub const GRAY: &str = "#AAAAAA";
pub const SENTIMENT_SCALE: f64 = 4.0;
pub const DOT_RADIUS: f64 = 3.0;

/// Negative (blue) through positive (red).
pub const SENTIMENT_COLORS: [&str; 9] = [
    "#313695", "#4575B4", "#74ADD1", "#ABD9E9", "#FFFFBF", "#FDAE61", "#F46D43", "#D73027",
    "#A50026",
];

pub trait MapSurface {
    fn draw_state(&mut self, shapes: &[Polygon], sentiment: Option<f64>);
    fn draw_name(&mut self, name: &str, at: Position);
    fn draw_dot(&mut self, at: Position, sentiment: f64, radius: f64);
    fn message(&mut self, text: &str);
}

/// Fill color for a sentiment. Values are amplified by [`SENTIMENT_SCALE`]
/// since real averages cluster near zero.
pub fn sentiment_color(sentiment: Option<f64>) -> &'static str {
    match sentiment {
        None => GRAY,
        Some(s) => {
            let scaled = ((s * SENTIMENT_SCALE + 1.0) / 2.0).clamp(0.0, 1.0);
            let idx = (scaled * (SENTIMENT_COLORS.len() - 1) as f64) as usize;
            SENTIMENT_COLORS[idx]
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl Bounds {
    fn of(states: &StateShapes) -> Self {
        let mut b = Bounds {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lon: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
        };
        for p in states.values().flatten().flat_map(|poly| poly.vertices()) {
            b.min_lat = b.min_lat.min(p.latitude);
            b.max_lat = b.max_lat.max(p.latitude);
            b.min_lon = b.min_lon.min(p.longitude);
            b.max_lon = b.max_lon.max(p.longitude);
        }
        if !b.min_lat.is_finite() {
            // Nothing to fit; fall back to the contiguous U.S.
            b = Bounds {
                min_lat: 24.0,
                max_lat: 50.0,
                min_lon: -125.0,
                max_lon: -66.0,
            };
        }
        b
    }
}

/// SVG map with an equirectangular projection fitted to a set of shapes.
#[derive(Debug, Clone)]
pub struct SvgMap {
    width: f64,
    height: f64,
    bounds: Bounds,
    x_scale: f64,
    y_scale: f64,
    body: String,
}

impl SvgMap {
    pub fn fitted(width: f64, height: f64, states: &StateShapes) -> Self {
        let bounds = Bounds::of(states);
        let mid_lat = (bounds.min_lat + bounds.max_lat) / 2.0;
        let lon_span = ((bounds.max_lon - bounds.min_lon) * deg_to_rad(mid_lat).cos()).max(1e-9);
        let lat_span = (bounds.max_lat - bounds.min_lat).max(1e-9);
        let scale = (width / lon_span).min(height / lat_span);
        Self {
            width,
            height,
            bounds,
            x_scale: scale * deg_to_rad(mid_lat).cos(),
            y_scale: scale,
            body: String::new(),
        }
    }

    pub fn project(&self, p: Position) -> (f64, f64) {
        let x = (p.longitude - self.bounds.min_lon) * self.x_scale;
        let y = (self.bounds.max_lat - p.latitude) * self.y_scale;
        (x, y)
    }

    pub fn to_svg(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n\
             <rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl MapSurface for SvgMap {
    fn draw_state(&mut self, shapes: &[Polygon], sentiment: Option<f64>) {
        let fill = sentiment_color(sentiment);
        for shape in shapes {
            let points: Vec<String> = shape
                .vertices()
                .iter()
                .map(|&p| {
                    let (x, y) = self.project(p);
                    format!("{:.2},{:.2}", x, y)
                })
                .collect();
            let _ = writeln!(
                self.body,
                "<polygon points=\"{}\" fill=\"{}\" stroke=\"#FFFFFF\" stroke-width=\"0.5\"/>",
                points.join(" "),
                fill
            );
        }
    }

    fn draw_name(&mut self, name: &str, at: Position) {
        let (x, y) = self.project(at);
        let _ = writeln!(
            self.body,
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"10\" text-anchor=\"middle\">{}</text>",
            x,
            y,
            escape(name)
        );
    }

    fn draw_dot(&mut self, at: Position, sentiment: f64, radius: f64) {
        let (x, y) = self.project(at);
        let _ = writeln!(
            self.body,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\" stroke=\"#000000\" stroke-width=\"0.3\"/>",
            x,
            y,
            radius,
            sentiment_color(Some(sentiment))
        );
    }

    fn message(&mut self, text: &str) {
        let _ = writeln!(
            self.body,
            "<text x=\"10\" y=\"20\" font-size=\"16\">{}</text>",
            escape(text)
        );
    }
}

/// Shade every state by its entry in `sentiments`; states without one are
/// gray. Unknown names in `sentiments` are ignored.
pub fn draw_state_sentiments<S: MapSurface>(
    surface: &mut S,
    states: &StateShapes,
    centers: &StateCenters,
    sentiments: &SentimentTable<String>,
) {
    for (name, shapes) in states {
        surface.draw_state(shapes, sentiments.get(name).copied());
    }
    for (name, &center) in centers {
        surface.draw_name(name, center);
    }
}

/// Draw the `n` states closest to `center_state` and mark it with a dot.
pub fn draw_centered_map<S: MapSurface>(
    surface: &mut S,
    states: &StateShapes,
    centers: &StateCenters,
    center_state: &str,
    n: usize,
) -> Result<()> {
    let key = center_state.to_uppercase();
    let center = *centers
        .get(&key)
        .ok_or_else(|| TrendsError::UnknownState(center_state.to_string()))?;

    let mut by_distance: Vec<(&String, f64)> = centers
        .iter()
        .map(|(name, &c)| (name, geo_distance(center, c)))
        .collect();
    by_distance.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (name, _) in by_distance.into_iter().take(n) {
        if let Some(shapes) = states.get(name) {
            surface.draw_state(shapes, None);
        }
        surface.draw_name(name, centers[name]);
    }
    surface.draw_dot(center, 1.0, 10.0);
    debug!(state = %key, n, "drew centered map");
    Ok(())
}

/// Shade states by the sentiment of `tweets` and dot each tweet that has one.
pub fn draw_map_for_term<S: MapSurface>(
    surface: &mut S,
    states: &StateShapes,
    centers: &StateCenters,
    tweets: &[Tweet],
    lexicon: &Lexicon,
) -> Result<()> {
    let by_state = group_tweets_by_state(tweets, centers)?;
    let sentiments = average_sentiments(&by_state, lexicon);
    draw_state_sentiments(surface, states, centers, &sentiments);
    for tweet in tweets {
        if let Some(s) = analyze_tweet_sentiment(tweet, lexicon).as_option() {
            surface.draw_dot(tweet.location(), s, DOT_RADIUS);
        }
    }
    info!(tweets = tweets.len(), states = sentiments.len(), "drew sentiment map");
    Ok(())
}

pub fn hour_label(hour: u32) -> String {
    format!("{0:02}:00-{0:02}:59", hour)
}

/// One frame per hour of the day, each shaded by the tweets posted in that hour.
pub fn draw_map_by_hour<S, F>(
    mut new_frame: F,
    states: &StateShapes,
    centers: &StateCenters,
    tweets: &[Tweet],
    lexicon: &Lexicon,
) -> Result<Vec<S>>
where
    S: MapSurface,
    F: FnMut() -> S,
{
    let by_hour = group_tweets_by_hour(tweets);
    let mut frames = Vec::with_capacity(24);
    for hour in 0..24 {
        let current = by_hour.get(&hour).into_iter().flatten().copied();
        let by_state = group_tweets_by_state(current, centers)?;
        let sentiments = average_sentiments(&by_state, lexicon);

        let mut frame = new_frame();
        draw_state_sentiments(&mut frame, states, centers, &sentiments);
        frame.message(&hour_label(hour));
        frames.push(frame);
    }
    Ok(frames)
}

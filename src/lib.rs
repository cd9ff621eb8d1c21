pub mod config;
pub mod data;
pub mod error;
pub mod geo;
pub mod maps;
pub mod sentiment;
pub mod trends;
pub mod types;

pub use config::TrendsConfig;

pub use data::{
    load_lexicon, load_states, load_tweets, parse_states, parse_tweet_line, term_pattern,
};

pub use error::{Result, TrendsError};

pub use geo::{
    deg_to_rad, find_center, find_centroid, geo_distance, state_centers, EARTH_RADIUS_MILES,
};

pub use maps::{
    draw_centered_map, draw_map_by_hour, draw_map_for_term, draw_state_sentiments, hour_label,
    sentiment_color, MapSurface, SvgMap,
};

pub use sentiment::{analyze_tweet_sentiment, extract_words, print_sentiment, word_sentiment, Lexicon};

pub use trends::{
    average_sentiments, find_closest_state, find_closest_state_by, group_tweets_by_hour,
    group_tweets_by_state, most_talkative_state,
};

pub use types::{
    Centroid, GroupedTweets, Polygon, Position, Sentiment, SentimentTable, StateCenters,
    StateShapes, Tweet,
};

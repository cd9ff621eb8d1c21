use chrono::Timelike;
use tracing::{debug, info, warn};

use crate::error::{Result, TrendsError};
use crate::geo::geo_distance;
use crate::sentiment::{analyze_tweet_sentiment, mean_present, Lexicon};
use crate::types::{GroupedTweets, Position, SentimentTable, StateCenters, Tweet};

pub fn find_closest_state<'c>(tweet: &Tweet, centers: &'c StateCenters) -> Option<&'c str> {
    find_closest_state_by(tweet, centers, geo_distance)
}

/// Nearest state under `distance`. Every center is compared; on a tie the
/// state that sorts first wins. Non-finite distances never win, so a tweet
/// with no finite distance to any center has no closest state.
pub fn find_closest_state_by<'c, F>(
    tweet: &Tweet,
    centers: &'c StateCenters,
    distance: F,
) -> Option<&'c str>
where
    F: Fn(Position, Position) -> f64,
{
    let location = tweet.location();
    let mut best: Option<(&'c str, f64)> = None;
    for (name, &center) in centers {
        let d = distance(location, center);
        if !d.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((name.as_str(), d));
        }
    }
    best.map(|(name, _)| name)
}

pub fn group_tweets_by_state<'a, I>(
    tweets: I,
    centers: &StateCenters,
) -> Result<GroupedTweets<'a, String>>
where
    I: IntoIterator<Item = &'a Tweet>,
{
    if centers.is_empty() {
        return Err(TrendsError::NoStateCenters);
    }
    let mut grouped = GroupedTweets::new();
    let mut count = 0usize;
    for tweet in tweets {
        count += 1;
        let state = find_closest_state(tweet, centers)
            .ok_or_else(|| TrendsError::Unlocatable(tweet.to_string()))?;
        grouped
            .entry(state.to_string())
            .or_insert_with(Vec::new)
            .push(tweet);
    }
    debug!(tweets = count, states = grouped.len(), "grouped tweets by state");
    Ok(grouped)
}

/// Group by hour of posting, 0 (midnight) through 23. Tweets without a
/// timestamp belong to no hour and are left out.
pub fn group_tweets_by_hour<'a, I>(tweets: I) -> GroupedTweets<'a, u32>
where
    I: IntoIterator<Item = &'a Tweet>,
{
    let mut grouped = GroupedTweets::new();
    for tweet in tweets {
        match tweet.time() {
            Some(time) => grouped
                .entry(time.hour())
                .or_insert_with(Vec::new)
                .push(tweet),
            None => warn!(tweet = %tweet, "tweet has no timestamp, skipping"),
        }
    }
    grouped
}

/// Mean tweet sentiment per group. Groups without a single sentiment-bearing
/// tweet are omitted rather than reported as 0.
pub fn average_sentiments<K: Ord + Clone>(
    grouped: &GroupedTweets<'_, K>,
    lexicon: &Lexicon,
) -> SentimentTable<K> {
    let mut averages = SentimentTable::new();
    for (key, tweets) in grouped {
        let sentiments = tweets.iter().map(|t| analyze_tweet_sentiment(t, lexicon));
        if let Some(avg) = mean_present(sentiments).as_option() {
            averages.insert(key.clone(), avg);
        }
    }
    averages
}

/// The state with the most tweets. Ties go to the state that sorts first.
pub fn most_talkative_state(tweets: &[Tweet], centers: &StateCenters) -> Result<Option<String>> {
    let grouped = group_tweets_by_state(tweets, centers)?;
    let mut winner: Option<(&String, usize)> = None;
    for (state, group) in &grouped {
        if winner.map_or(true, |(_, n)| group.len() > n) {
            winner = Some((state, group.len()));
        }
    }
    if let Some((state, n)) = winner {
        info!(state = %state, tweets = n, "most talkative state");
    }
    Ok(winner.map(|(state, _)| state.clone()))
}

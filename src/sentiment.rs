use std::collections::HashMap;

use crate::error::Result;
use crate::types::{Sentiment, Tweet};

/// Split text into runs of ASCII letters. Everything else, including digits,
/// `#` and apostrophes, separates words.
pub fn extract_words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Word to sentiment mapping. Lookups are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    words: HashMap<String, f64>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(word, value)` pairs, rejecting values outside [-1, 1].
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut words = HashMap::new();
        for (word, value) in pairs {
            Sentiment::new(Some(value))?;
            words.insert(word.into(), value);
        }
        Ok(Self { words })
    }

    pub fn get(&self, word: &str) -> Sentiment {
        match self.words.get(word) {
            Some(&v) => Sentiment::present(v),
            None => Sentiment::ABSENT,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

pub fn word_sentiment(word: &str, lexicon: &Lexicon) -> Sentiment {
    lexicon.get(word)
}

/// Mean sentiment over the words that have one, absent when none do.
pub fn analyze_tweet_sentiment(tweet: &Tweet, lexicon: &Lexicon) -> Sentiment {
    mean_present(tweet.words().iter().map(|w| lexicon.get(w)))
}

pub(crate) fn mean_present<I>(sentiments: I) -> Sentiment
where
    I: IntoIterator<Item = Sentiment>,
{
    let (total, count) = sentiments
        .into_iter()
        .filter_map(|s| s.as_option())
        .fold((0.0, 0usize), |(t, n), v| (t + v, n + 1));
    if count == 0 {
        Sentiment::ABSENT
    } else {
        Sentiment::present(total / count as f64)
    }
}

/// Lines of `word: +value` for each word of `text` that carries a sentiment,
/// with words right-aligned to the longest word in the text.
pub fn print_sentiment(text: &str, lexicon: &Lexicon) -> Vec<String> {
    let words = extract_words(&text.to_lowercase());
    let width = words.iter().map(String::len).max().unwrap_or(0);
    words
        .iter()
        .filter_map(|w| {
            lexicon
                .get(w)
                .as_option()
                .map(|v| format!("{:>width$}: {:+}", w, v, width = width))
        })
        .collect()
}

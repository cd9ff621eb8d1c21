use std::sync::LazyLock;

use tweet_trends::data::load_lexicon;
use tweet_trends::sentiment::*;
use tweet_trends::types::{Sentiment, Tweet};
use tweet_trends::TrendsError;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

static LEXICON: LazyLock<Lexicon> = LazyLock::new(|| {
    load_lexicon(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/sentiments.csv")).unwrap()
});

fn tweet(text: &str) -> Tweet {
    Tweet::new(text, None, 0.0, 0.0)
}

// ── extract_words ──

#[test]
fn test_extract_words_collapses_punctuation() {
    assert_eq!(
        extract_words("anything else.....not my job"),
        vec!["anything", "else", "not", "my", "job"]
    );
}

#[test]
fn test_extract_words_hashtags_and_digits() {
    assert_eq!(
        extract_words("make justin # 1 by tweeting #vma #justinbieber :)"),
        vec!["make", "justin", "by", "tweeting", "vma", "justinbieber"]
    );
    assert_eq!(
        extract_words("i love my job. #winning"),
        vec!["i", "love", "my", "job", "winning"]
    );
}

#[test]
fn test_extract_words_apostrophes_split() {
    assert_eq!(
        extract_words("paperclips! they're so awesome, cool, & useful!"),
        vec!["paperclips", "they", "re", "so", "awesome", "cool", "useful"]
    );
}

#[test]
fn test_extract_words_empty_and_symbol_only() {
    assert!(extract_words("").is_empty());
    assert!(extract_words("#  123 :) !!").is_empty());
}

#[test]
fn test_extract_words_non_ascii_letters_separate() {
    assert_eq!(extract_words("café au lait"), vec!["caf", "au", "lait"]);
}

// ── Sentiment ──

#[test]
fn test_sentiment_presence() {
    let s = Sentiment::new(Some(0.2)).unwrap();
    let t = Sentiment::new(None).unwrap();
    assert!(s.has_sentiment());
    assert!(!t.has_sentiment());
    assert_eq!(s.value().unwrap(), 0.2);
}

#[test]
fn test_sentiment_bounds_inclusive() {
    assert!(Sentiment::new(Some(-1.0)).is_ok());
    assert!(Sentiment::new(Some(1.0)).is_ok());
    assert!(Sentiment::new(Some(0.0)).unwrap().has_sentiment());
}

#[test]
fn test_sentiment_out_of_range_rejected() {
    for v in [1.0001, -1.5, f64::NAN, f64::INFINITY] {
        assert!(
            matches!(Sentiment::new(Some(v)), Err(TrendsError::SentimentOutOfRange(_))),
            "value {}",
            v
        );
    }
}

#[test]
fn test_present_sentiment_only_built_in_range() {
    // `new` is the only public way to a present value; the payload is private.
    assert!(Sentiment::new(Some(7.0)).is_err());
    assert!(Lexicon::from_pairs([("wow", 7.0)]).is_err());
    for word in ["awesome", "bad", "terrible", "meh", "good"] {
        let v = LEXICON.get(word).value().unwrap();
        assert!((-1.0..=1.0).contains(&v), "{}: {}", word, v);
    }
    let extreme = analyze_tweet_sentiment(&tweet("terrible terrible terrible"), &LEXICON);
    assert_eq!(extreme.value().unwrap(), -1.0);
}

#[test]
fn test_absent_sentiment_has_no_value() {
    assert!(matches!(Sentiment::ABSENT.value(), Err(TrendsError::NoSentimentValue)));
    assert_eq!(Sentiment::ABSENT.as_option(), None);
}

// ── Lexicon ──

#[test]
fn test_word_sentiment_known_words() {
    assert_eq!(word_sentiment("good", &LEXICON).value().unwrap(), 0.875);
    assert_eq!(word_sentiment("bad", &LEXICON).value().unwrap(), -0.625);
    assert_eq!(word_sentiment("winning", &LEXICON).value().unwrap(), 0.5);
}

#[test]
fn test_word_sentiment_is_case_sensitive() {
    assert!(!word_sentiment("Berkeley", &LEXICON).has_sentiment());
    assert!(!word_sentiment("Good", &LEXICON).has_sentiment());
}

#[test]
fn test_zero_valued_word_is_present() {
    assert_eq!(LEXICON.get("meh"), Sentiment::new(Some(0.0)).unwrap());
}

#[test]
fn test_lexicon_rejects_out_of_range_pairs() {
    assert!(Lexicon::from_pairs([("fine", 0.5)]).is_ok());
    assert!(Lexicon::from_pairs([("huge", 2.0)]).is_err());
}

// ── analyze_tweet_sentiment ──

#[test]
fn test_positive_tweet() {
    let s = analyze_tweet_sentiment(&tweet("i love my job. #winning"), &LEXICON);
    assert_approx!(s.value().unwrap(), 0.29167, 5e-6);
}

#[test]
fn test_negative_tweet() {
    let s = analyze_tweet_sentiment(&tweet("saying, 'i hate my job'"), &LEXICON);
    assert_approx!(s.value().unwrap(), -0.25, 1e-12);
}

#[test]
fn test_tweet_without_sentiment_is_absent() {
    let s = analyze_tweet_sentiment(&tweet("berkeley golden bears!"), &LEXICON);
    assert_eq!(s, Sentiment::ABSENT);
    assert!(analyze_tweet_sentiment(&tweet(""), &LEXICON) == Sentiment::ABSENT);
}

#[test]
fn test_neutral_tweet_is_present_zero() {
    let s = analyze_tweet_sentiment(&tweet("meh"), &LEXICON);
    assert_eq!(s.value().unwrap(), 0.0);
}

#[test]
fn test_repeated_words_each_count() {
    let s = analyze_tweet_sentiment(&tweet("good good bad"), &LEXICON);
    assert_approx!(s.value().unwrap(), (0.875 + 0.875 - 0.625) / 3.0, 1e-12);
}

// ── print_sentiment ──

#[test]
fn test_print_sentiment_aligns_words() {
    let lines = print_sentiment("Good day, BAD hair", &LEXICON);
    assert_eq!(lines, vec!["good: +0.875", " bad: -0.625"]);
}

#[test]
fn test_print_sentiment_nothing_known() {
    assert!(print_sentiment("Are you virtuous or verminous?", &LEXICON).is_empty());
    assert!(print_sentiment("", &LEXICON).is_empty());
}

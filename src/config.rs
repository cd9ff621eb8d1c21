use std::env;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "TRENDS_DATA_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct TrendsConfig {
    pub data_dir: PathBuf,
    pub lexicon_file: String,
    pub states_file: String,
    pub tweets_file: String,
    pub output_dir: PathBuf,
    pub map_width: f64,
    pub map_height: f64,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            lexicon_file: "sentiments.csv".to_string(),
            states_file: "states.json".to_string(),
            tweets_file: "all_tweets.txt".to_string(),
            output_dir: PathBuf::from("maps"),
            map_width: 960.0,
            map_height: 500.0,
        }
    }
}

impl TrendsConfig {
    /// Defaults, with the data directory taken from `TRENDS_DATA_DIR` when set.
    pub fn from_env() -> Self {
        Self::with_data_dir_override(env::var(DATA_DIR_ENV).ok().as_deref())
    }

    /// Defaults, with `data_dir` replaced by a non-empty override.
    pub fn with_data_dir_override(data_dir: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = data_dir.filter(|d| !d.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn lexicon_path(&self) -> PathBuf {
        self.data_dir.join(&self.lexicon_file)
    }

    pub fn states_path(&self) -> PathBuf {
        self.data_dir.join(&self.states_file)
    }

    pub fn tweets_path(&self) -> PathBuf {
        self.data_dir.join(&self.tweets_file)
    }
}

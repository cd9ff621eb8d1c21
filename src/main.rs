use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use tweet_trends::{
    draw_centered_map, draw_map_by_hour, draw_map_for_term, load_lexicon, load_states,
    load_tweets, most_talkative_state, print_sentiment, state_centers, StateCenters,
    StateShapes, SvgMap, TrendsConfig,
};

#[derive(Parser)]
#[command(name = "trends")]
#[command(version)]
#[command(about = "Visualize tweet sentiment across U.S. states", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding sentiments.csv, states.json and all_tweets.txt
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory SVG maps are written to
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Logging level
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the words of TEXT annotated with their sentiment
    Sentiment {
        #[arg(default_value = "Are you virtuous or verminous?")]
        text: Vec<String>,
    },

    /// Draw the N states closest to STATE
    CenteredMap {
        #[arg(default_value = "TX")]
        state: String,

        #[arg(short, long, default_value = "10")]
        n: usize,
    },

    /// Draw the sentiment map for tweets containing TERM
    TermMap {
        #[arg(default_value = "my job")]
        term: Vec<String>,
    },

    /// Draw one sentiment map per hour of the day for tweets containing TERM
    HourMap {
        #[arg(default_value = "my job")]
        term: Vec<String>,
    },

    /// Report the state with the most tweets containing TERM
    Talkative {
        #[arg(required = true)]
        term: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = TrendsConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.output {
        config.output_dir = dir;
    }

    match cli.command {
        Commands::Sentiment { text } => run_sentiment(&config, &text.join(" ")),
        Commands::CenteredMap { state, n } => run_centered_map(&config, &state, n),
        Commands::TermMap { term } => run_term_map(&config, &term.join(" ")),
        Commands::HourMap { term } => run_hour_map(&config, &term.join(" ")),
        Commands::Talkative { term } => run_talkative(&config, &term.join(" ")),
    }
}

fn load_geography(config: &TrendsConfig) -> Result<(StateShapes, StateCenters)> {
    let states = load_states(config.states_path())
        .with_context(|| format!("Failed to load states from {:?}", config.states_path()))?;
    let centers = state_centers(&states).context("Failed to compute state centers")?;
    Ok((states, centers))
}

fn write_svg(dir: &Path, name: &str, map: &SvgMap) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    let path = dir.join(name);
    fs::write(&path, map.to_svg()).with_context(|| format!("Failed to write {:?}", path))?;
    info!(path = %path.display(), "wrote map");
    Ok(())
}

fn run_sentiment(config: &TrendsConfig, text: &str) -> Result<()> {
    let lexicon = load_lexicon(config.lexicon_path())
        .with_context(|| format!("Failed to load lexicon from {:?}", config.lexicon_path()))?;
    for line in print_sentiment(text, &lexicon) {
        println!("{}", line);
    }
    Ok(())
}

fn run_centered_map(config: &TrendsConfig, state: &str, n: usize) -> Result<()> {
    let (states, centers) = load_geography(config)?;
    let mut map = SvgMap::fitted(config.map_width, config.map_height, &states);
    draw_centered_map(&mut map, &states, &centers, state, n)?;
    write_svg(&config.output_dir, &format!("centered_{}.svg", state.to_lowercase()), &map)
}

fn run_term_map(config: &TrendsConfig, term: &str) -> Result<()> {
    let lexicon = load_lexicon(config.lexicon_path())?;
    let (states, centers) = load_geography(config)?;
    let tweets = load_tweets(config.tweets_path(), term)?;
    let mut map = SvgMap::fitted(config.map_width, config.map_height, &states);
    draw_map_for_term(&mut map, &states, &centers, &tweets, &lexicon)?;
    write_svg(&config.output_dir, &format!("{}.svg", file_stem(term)), &map)
}

fn run_hour_map(config: &TrendsConfig, term: &str) -> Result<()> {
    let lexicon = load_lexicon(config.lexicon_path())?;
    let (states, centers) = load_geography(config)?;
    let tweets = load_tweets(config.tweets_path(), term)?;
    let frames = draw_map_by_hour(
        || SvgMap::fitted(config.map_width, config.map_height, &states),
        &states,
        &centers,
        &tweets,
        &lexicon,
    )?;
    for (hour, frame) in frames.iter().enumerate() {
        write_svg(
            &config.output_dir,
            &format!("{}_{:02}.svg", file_stem(term), hour),
            frame,
        )?;
    }
    Ok(())
}

fn run_talkative(config: &TrendsConfig, term: &str) -> Result<()> {
    let (_, centers) = load_geography(config)?;
    let tweets = load_tweets(config.tweets_path(), term)?;
    match most_talkative_state(&tweets, &centers)? {
        Some(state) => println!("{}", state),
        None => println!("No tweets contain {:?}", term),
    }
    Ok(())
}

fn file_stem(term: &str) -> String {
    let stem: String = term
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    if stem.is_empty() {
        "all".to_string()
    } else {
        stem
    }
}

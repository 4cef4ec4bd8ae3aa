//! CLI configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use battle_content::builtin::{DEFAULT_ENCOUNTER, DEFAULT_PARTY};
use battle_core::Difficulty;

/// Settings for one headless battle run.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Content directory; the built-in roster is used when unset.
    pub content_dir: Option<PathBuf>,
    pub seed: Option<u64>,
    pub party: Vec<String>,
    pub encounter: String,
    /// Probability that the auto-pilot answers a challenge correctly.
    pub accuracy: f64,
    pub difficulty: Difficulty,
    /// Also write logs to `battle.log` in this directory.
    pub log_dir: Option<PathBuf>,
    /// Keep the presentation delays between turns.
    pub paced: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            seed: None,
            party: DEFAULT_PARTY.iter().map(|id| id.to_string()).collect(),
            encounter: DEFAULT_ENCOUNTER.to_string(),
            accuracy: 0.8,
            difficulty: Difficulty::default(),
            log_dir: None,
            paced: false,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_CONTENT_DIR` - Directory with `companions.ron`, `encounters.ron`, `combat.toml`
    /// - `BATTLE_SEED` - Session seed (default: random)
    /// - `BATTLE_PARTY` - Comma-separated companion ids (default: aria,borin,lyra)
    /// - `BATTLE_ENCOUNTER` - Encounter id (default: forest)
    /// - `BATTLE_ACCURACY` - Correct-answer probability in [0, 1] (default: 0.8)
    /// - `BATTLE_DIFFICULTY` - easy, medium or hard (default: easy)
    /// - `BATTLE_LOG_DIR` - Directory for the log file (default: stderr only)
    /// - `BATTLE_PACED` - Keep turn delays (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.content_dir = env::var("BATTLE_CONTENT_DIR").ok().map(PathBuf::from);
        config.seed = read_env::<u64>("BATTLE_SEED");

        if let Ok(party) = env::var("BATTLE_PARTY") {
            let ids = parse_party(&party);
            if !ids.is_empty() {
                config.party = ids;
            }
        }

        if let Ok(encounter) = env::var("BATTLE_ENCOUNTER") {
            config.encounter = encounter;
        }

        if let Some(accuracy) = read_env::<f64>("BATTLE_ACCURACY") {
            config.accuracy = accuracy.clamp(0.0, 1.0);
        }

        if let Some(difficulty) = read_env::<Difficulty>("BATTLE_DIFFICULTY") {
            config.difficulty = difficulty;
        }

        config.log_dir = env::var("BATTLE_LOG_DIR").ok().map(PathBuf::from);

        if let Some(paced) = read_env::<bool>("BATTLE_PACED") {
            config.paced = paced;
        }

        config
    }
}

fn parse_party(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

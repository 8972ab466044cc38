//! Session configuration.
//!
//! Hosts configure a session at setup by providing:
//! - `player_count`: how many seats take part in the rotation (2..=4)
//! - `names`: display names for all four seats
//! - `cheat`: the demo mode switch and its favoured seat
//! - `pacing`: presentation timings the host may use for playback
//!
//! Configurations can be built in code with the `with_*` methods or
//! loaded from TOML:
//!
//! ```toml
//! player_count = 3
//! names = ["Ana", "Bo", "Cy", ""]
//! seed = 7
//!
//! [cheat]
//! enabled = true
//! favored_player = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::ConfigError;
use super::player::{PlayerId, SEAT_COUNT};

/// Demo ("favoured outcome") mode.
///
/// `favored_player == 0` means no seat is favoured, even when enabled;
/// such a configuration plays exactly like a normal game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheatConfig {
    pub enabled: bool,
    pub favored_player: u8,
}

impl CheatConfig {
    /// Normal play: uniform dice, every seat picks by hand.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            favored_player: 0,
        }
    }

    /// Demo mode steering the game towards `player`.
    #[must_use]
    pub const fn favoring(player: PlayerId) -> Self {
        Self {
            enabled: true,
            favored_player: player.seat(),
        }
    }

    /// The favoured seat, if demo mode is actually in effect.
    #[must_use]
    pub fn favored(&self) -> Option<PlayerId> {
        if self.enabled {
            PlayerId::try_new(self.favored_player)
        } else {
            None
        }
    }

    /// Whether demo mode is in effect.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.favored().is_some()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.favored_player as usize > SEAT_COUNT {
            return Err(ConfigError::Validation(format!(
                "cheat.favored_player must be 0..=4, got {}",
                self.favored_player
            )));
        }
        Ok(())
    }
}

/// Playback timings, in milliseconds. The engine never sleeps; hosts use
/// these to pace animation between observable steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Delay between movement steps.
    pub step_ms: u64,
    /// Dice animation before the face is revealed.
    pub roll_ms: u64,
    /// Pause before handing the turn on when no move is possible.
    pub pass_ms: u64,
    /// Pause after a piece enters the board.
    pub settle_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            step_ms: 200,
            roll_ms: 800,
            pass_ms: 600,
            settle_ms: 200,
        }
    }
}

impl Pacing {
    /// No delays at all, for headless simulation.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            step_ms: 0,
            roll_ms: 0,
            pass_ms: 0,
            settle_ms: 0,
        }
    }

    #[must_use]
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    #[must_use]
    pub fn roll(&self) -> Duration {
        Duration::from_millis(self.roll_ms)
    }

    #[must_use]
    pub fn pass(&self) -> Duration {
        Duration::from_millis(self.pass_ms)
    }

    #[must_use]
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seats in rotation (2..=4). Seats beyond this never take a turn.
    pub player_count: usize,

    /// Display names for seats 1..=4. Blank names fall back to `Player N`.
    pub names: Vec<String>,

    /// Demo mode.
    pub cheat: CheatConfig,

    /// RNG seed. `None` seeds from the operating system.
    pub seed: Option<u64>,

    /// Playback timings.
    pub pacing: Pacing,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_count: SEAT_COUNT,
            names: Vec::new(),
            cheat: CheatConfig::disabled(),
            seed: None,
            pacing: Pacing::default(),
        }
    }
}

impl SessionConfig {
    /// Create a configuration for `player_count` seats.
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Set display names.
    #[must_use]
    pub fn with_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the demo mode configuration.
    #[must_use]
    pub fn with_cheat(mut self, cheat: CheatConfig) -> Self {
        self.cheat = cheat;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set playback timings.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// The four display names, blanks replaced by `Player N`.
    #[must_use]
    pub fn resolved_names(&self) -> [String; SEAT_COUNT] {
        std::array::from_fn(|i| {
            self.names
                .get(i)
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map_or_else(|| format!("Player {}", i + 1), str::to_string)
        })
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=SEAT_COUNT).contains(&self.player_count) {
            return Err(ConfigError::Validation(format!(
                "player_count must be 2..=4, got {}",
                self.player_count
            )));
        }
        if self.names.len() > SEAT_COUNT {
            return Err(ConfigError::Validation(format!(
                "at most 4 names allowed, got {}",
                self.names.len()
            )));
        }
        self.cheat.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SessionConfig::default();
        assert_eq!(config.player_count, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::new(3)
            .with_names(["Ana", "  ", "Cy"])
            .with_cheat(CheatConfig::favoring(PlayerId::new(3)))
            .with_seed(9)
            .with_pacing(Pacing::instant());

        assert_eq!(config.player_count, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.cheat.favored(), Some(PlayerId::new(3)));
        assert_eq!(config.pacing.step(), Duration::ZERO);
        assert_eq!(
            config.resolved_names(),
            ["Ana", "Player 2", "Cy", "Player 4"].map(String::from)
        );
    }

    #[test]
    fn test_pacing_durations() {
        let pacing = Pacing::default();
        assert_eq!(pacing.step(), Duration::from_millis(200));
        assert_eq!(pacing.roll(), Duration::from_millis(800));
        assert_eq!(pacing.pass(), Duration::from_millis(600));
        assert_eq!(pacing.settle(), Duration::from_millis(200));

        let instant = Pacing::instant();
        for delay in [instant.step(), instant.roll(), instant.pass(), instant.settle()] {
            assert_eq!(delay, Duration::ZERO);
        }
    }

    #[test]
    fn test_player_count_validation() {
        assert!(SessionConfig::new(1).validate().is_err());
        assert!(SessionConfig::new(5).validate().is_err());
        assert!(SessionConfig::new(2).validate().is_ok());
    }

    #[test]
    fn test_cheat_favored_zero_means_none() {
        let cheat = CheatConfig {
            enabled: true,
            favored_player: 0,
        };
        assert_eq!(cheat.favored(), None);
        assert!(!cheat.is_active());

        let off = CheatConfig {
            enabled: false,
            favored_player: 2,
        };
        assert_eq!(off.favored(), None);
    }

    #[test]
    fn test_cheat_validation() {
        let bad = CheatConfig {
            enabled: true,
            favored_player: 5,
        };
        assert!(bad.validate().is_err());
        assert!(SessionConfig::new(4).with_cheat(bad).validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = SessionConfig::from_toml(
            r#"
            player_count = 3
            names = ["Ana", "Bo"]
            seed = 7

            [cheat]
            enabled = true
            favored_player = 2

            [pacing]
            step_ms = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.player_count, 3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.cheat.favored(), Some(PlayerId::new(2)));
        assert_eq!(config.pacing.step_ms, 50);
        assert_eq!(config.pacing.roll_ms, 800);
        assert_eq!(config.resolved_names()[3], "Player 4");
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        assert!(matches!(
            SessionConfig::from_toml("player_count = 9"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            SessionConfig::from_toml("player_count = \"four\""),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "player_count = 2\n").unwrap();

        let config = SessionConfig::load(&path).unwrap();
        assert_eq!(config.player_count, 2);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            SessionConfig::load(&missing),
            Err(ConfigError::FileRead { .. })
        ));
        assert_eq!(SessionConfig::load_or_default(&missing).unwrap(), SessionConfig::default());
    }
}

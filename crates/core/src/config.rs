//! Engine configuration and its validation.

use thiserror::Error;

use crate::policy::KeyPolicy;
use crate::types::{
    Glyphs, Keystroke, DEFAULT_HEIGHT, DEFAULT_SPEED, DEFAULT_WIDTH, MAX_HEIGHT, MAX_REFRESH_FRAMES, MAX_SPEED,
    MAX_TITLE_LEN, MAX_WIDTH, MIN_HEIGHT, MIN_SPEED, MIN_WIDTH,
};

/// How often the renderer tears the terminal down and redraws from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshInterval {
    /// Every `speed` frames, roughly once a second.
    #[default]
    Speed,
    /// Only when the refresh key is pressed.
    Never,
    /// Every `n` frames (1..=30).
    Frames(u32),
}

impl RefreshInterval {
    /// Frames between forced reinitializations at the given speed.
    pub fn threshold(self, speed: u8) -> Option<u32> {
        match self {
            RefreshInterval::Speed => Some(u32::from(speed)),
            RefreshInterval::Never => None,
            RefreshInterval::Frames(n) => Some(n),
        }
    }

    /// `0` disables the periodic refresh, matching the CLI flag.
    pub fn from_frames(frames: u32) -> Self {
        if frames == 0 {
            RefreshInterval::Never
        } else {
            RefreshInterval::Frames(frames)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("width {0} is outside {min}..={max}", min = MIN_WIDTH, max = MAX_WIDTH)]
    Width(u16),
    #[error("height {0} is outside {min}..={max}", min = MIN_HEIGHT, max = MAX_HEIGHT)]
    Height(u16),
    #[error("speed {0} is outside {min}..={max}", min = MIN_SPEED, max = MAX_SPEED)]
    Speed(u8),
    #[error("refresh interval {0} is outside 1..={max}", max = MAX_REFRESH_FRAMES)]
    Refresh(u32),
    #[error("{name} glyph {glyph:?} is not a printable character")]
    Glyph { name: &'static str, glyph: char },
    #[error("{name} glyph {glyph:?} collides with the board fill")]
    GlyphCollision { name: &'static str, glyph: char },
    #[error("title contains control character {0:?}")]
    TitleControl(char),
    #[error("title is {len} characters, at most {max} fit")]
    Title { len: usize, max: usize },
    #[error("{0}")]
    Game(String),
}

/// Everything the engine needs to know before `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: u16,
    pub height: u16,
    pub speed: u8,
    pub keep_score: bool,
    /// Clear the interior before every tick, so games repaint from scratch.
    pub clear_each_tick: bool,
    pub policy: KeyPolicy,
    pub glyphs: Glyphs,
    pub title: String,
    /// Pending keystroke at the start of every game.
    pub initial_key: Keystroke,
    pub refresh: RefreshInterval,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            speed: DEFAULT_SPEED,
            keep_score: true,
            clear_each_tick: true,
            policy: KeyPolicy::default(),
            glyphs: Glyphs::default(),
            title: String::new(),
            initial_key: Keystroke::empty(),
            refresh: RefreshInterval::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_speed(mut self, speed: u8) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_keep_score(mut self, keep_score: bool) -> Self {
        self.keep_score = keep_score;
        self
    }

    pub fn with_policy(mut self, policy: KeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_refresh(mut self, refresh: RefreshInterval) -> Self {
        self.refresh = refresh;
        self
    }

    /// Check bounds, glyphs and title. Nothing is acquired before this passes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&self.width) {
            return Err(ConfigError::Width(self.width));
        }
        if !(MIN_HEIGHT..=MAX_HEIGHT).contains(&self.height) {
            return Err(ConfigError::Height(self.height));
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            return Err(ConfigError::Speed(self.speed));
        }
        if let RefreshInterval::Frames(n) = self.refresh {
            if !(1..=MAX_REFRESH_FRAMES).contains(&n) {
                return Err(ConfigError::Refresh(n));
            }
        }

        let g = self.glyphs;
        for (name, glyph) in [
            ("title", g.title),
            ("corner", g.corner),
            ("horizontal", g.horizontal),
            ("vertical", g.vertical),
            ("board", g.fill),
        ] {
            check_printable(name, glyph)?;
        }
        for (name, glyph) in [("corner", g.corner), ("horizontal", g.horizontal), ("vertical", g.vertical)] {
            check_distinct_from_fill(name, glyph, g.fill)?;
        }

        if let Some(c) = self.title.chars().find(|c| c.is_control()) {
            return Err(ConfigError::TitleControl(c));
        }
        let len = self.title.chars().count();
        let max = MAX_TITLE_LEN.min(self.width as usize);
        if len > max {
            return Err(ConfigError::Title { len, max });
        }
        Ok(())
    }
}

/// Reject NUL and other control characters as glyphs.
pub fn check_printable(name: &'static str, glyph: char) -> Result<(), ConfigError> {
    if glyph.is_control() {
        return Err(ConfigError::Glyph { name, glyph });
    }
    Ok(())
}

/// Reject a glyph that would be indistinguishable from an empty cell.
pub fn check_distinct_from_fill(name: &'static str, glyph: char, fill: char) -> Result<(), ConfigError> {
    if glyph == fill {
        return Err(ConfigError::GlyphCollision { name, glyph });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn bounds_are_enforced() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.clone().with_size(22, 15).validate(), Err(ConfigError::Width(22)));
        assert_eq!(cfg.clone().with_size(129, 15).validate(), Err(ConfigError::Width(129)));
        assert_eq!(cfg.clone().with_size(40, 5).validate(), Err(ConfigError::Height(5)));
        assert_eq!(cfg.clone().with_size(40, 49).validate(), Err(ConfigError::Height(49)));
        assert_eq!(cfg.clone().with_speed(0).validate(), Err(ConfigError::Speed(0)));
        assert_eq!(cfg.clone().with_speed(11).validate(), Err(ConfigError::Speed(11)));
        assert_eq!(
            cfg.with_refresh(RefreshInterval::Frames(31)).validate(),
            Err(ConfigError::Refresh(31))
        );
    }

    #[test]
    fn glyphs_must_be_printable_and_distinct_from_fill() {
        let nul = Glyphs {
            corner: '\0',
            ..Glyphs::default()
        };
        assert!(matches!(
            EngineConfig::default().with_glyphs(nul).validate(),
            Err(ConfigError::Glyph { name: "corner", .. })
        ));

        let clash = Glyphs {
            vertical: ' ',
            ..Glyphs::default()
        };
        assert!(matches!(
            EngineConfig::default().with_glyphs(clash).validate(),
            Err(ConfigError::GlyphCollision { name: "vertical", .. })
        ));
    }

    #[test]
    fn title_must_fit() {
        let cfg = EngineConfig::default().with_title("x".repeat(MAX_TITLE_LEN + 1));
        assert!(matches!(cfg.validate(), Err(ConfigError::Title { .. })));
    }

    #[test]
    fn title_rejects_control_characters() {
        let cfg = EngineConfig::default().with_title(" \x1b[2J ");
        assert_eq!(cfg.validate(), Err(ConfigError::TitleControl('\x1b')));
        let cfg = EngineConfig::default().with_title(" A\tB ");
        assert_eq!(cfg.validate(), Err(ConfigError::TitleControl('\t')));
        assert_eq!(EngineConfig::default().with_title(" ARCADE ").validate(), Ok(()));
    }

    #[test]
    fn refresh_threshold_follows_speed() {
        assert_eq!(RefreshInterval::Speed.threshold(4), Some(4));
        assert_eq!(RefreshInterval::Never.threshold(4), None);
        assert_eq!(RefreshInterval::from_frames(0), RefreshInterval::Never);
        assert_eq!(RefreshInterval::from_frames(7).threshold(1), Some(7));
    }
}

//! Volume and mute state
//!
//! Volume is a linear fraction in `[0.0, 1.0]` that is handed straight to the
//! media element. Mute is not a separate gain stage: muting sets the level to
//! zero and remembers the previous level for the next unmute.

/// Default volume when nothing else is configured
pub const DEFAULT_VOLUME: f32 = 0.7;

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Effective level (0.0-1.0)
    level: f32,

    /// True exactly when `level == 0.0`
    muted: bool,

    /// Last positive level, restored by `toggle_mute`
    remembered: f32,
}

impl Volume {
    /// Create a volume controller at `level` (clamped)
    pub fn new(level: f32) -> Self {
        let mut volume = Self {
            level: DEFAULT_VOLUME,
            muted: false,
            remembered: DEFAULT_VOLUME,
        };
        volume.set_level(level);
        volume
    }

    /// Set the level
    ///
    /// Zero mutes; any positive value unmutes and becomes the remembered
    /// pre-mute level. Non-finite input is ignored.
    pub fn set_level(&mut self, level: f32) {
        if !level.is_finite() {
            return;
        }
        self.level = level.clamp(0.0, 1.0);
        self.muted = self.level == 0.0;
        if !self.muted {
            self.remembered = self.level;
        }
    }

    /// Swap between zero and the remembered level
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.level = self.remembered;
            self.muted = false;
        } else {
            self.remembered = self.level;
            self.level = 0.0;
            self.muted = true;
        }
    }

    /// Effective level (0.0 while muted)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Whether muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level restored by the next unmute
    pub fn remembered(&self) -> f32 {
        self.remembered
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

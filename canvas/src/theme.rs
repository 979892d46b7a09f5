//! Theme flag and the canvas background it selects.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::consts::{DARK_BACKGROUND_LEVEL, LIGHT_BACKGROUND_LEVEL};

/// The host's light/dark preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Build from the host's boolean dark-mode flag.
    #[must_use]
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Fill color for a fresh or reset canvas.
    #[must_use]
    pub fn background(self) -> Rgb {
        match self {
            Self::Light => Rgb::gray(LIGHT_BACKGROUND_LEVEL),
            Self::Dark => Rgb::gray(DARK_BACKGROUND_LEVEL),
        }
    }
}

//! Debug levels, reported debug modes and toolbar icons

use serde::{Deserialize, Serialize};

/// Toolbar icon, one per debug level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Icon {
    #[default]
    Off,
    On,
    Super,
}

impl Icon {
    /// Extension-relative image path
    pub fn path(self) -> &'static str {
        match self {
            Self::Off => "/images/icons/off_48.png",
            Self::On => "/images/icons/on_48.png",
            Self::Super => "/images/icons/super_48.png",
        }
    }

    /// Icon matching a mode reported by the page
    pub fn for_mode(mode: &DebugMode) -> Self {
        match mode {
            DebugMode::Assets => Self::Super,
            DebugMode::Basic => Self::On,
            _ => Self::Off,
        }
    }
}

/// Value of the `debug` query parameter as seen by the page
///
/// Truthiness follows string semantics: only the empty value is unset,
/// so `"0"` counts as an active mode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DebugMode {
    #[default]
    Unset,
    /// `debug=0`
    Disabled,
    /// `debug=1`
    Basic,
    /// `debug=assets`
    Assets,
    /// Anything else a page may carry
    Other(String),
}

impl DebugMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::Disabled => "0",
            Self::Basic => "1",
            Self::Assets => "assets",
            Self::Other(value) => value,
        }
    }

    /// Non-empty value
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Basic or elevated debug is already on
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Basic | Self::Assets)
    }
}

impl From<&str> for DebugMode {
    fn from(value: &str) -> Self {
        match value {
            "" => Self::Unset,
            "0" => Self::Disabled,
            "1" => Self::Basic,
            "assets" => Self::Assets,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for DebugMode {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<DebugMode> for String {
    fn from(mode: DebugMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Level selected by a click burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugLevel {
    Off,
    Basic,
    Assets,
}

impl DebugLevel {
    /// Map a burst to a level.
    ///
    /// A single click turns debug off when the last reported mode was set and
    /// turns basic debug on otherwise; two clicks always select assets.
    /// Bursts of three or more clicks select nothing.
    pub fn from_burst(clicks: u32, current: &DebugMode) -> Option<Self> {
        match clicks {
            1 if current.is_set() => Some(Self::Off),
            1 => Some(Self::Basic),
            2 => Some(Self::Assets),
            _ => None,
        }
    }

    /// Query value to write; "off" depends on the page generation
    pub fn query_value(self, legacy: bool) -> &'static str {
        match self {
            Self::Off if legacy => "0",
            Self::Off => "",
            Self::Basic => "1",
            Self::Assets => "assets",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            Self::Off => Icon::Off,
            Self::Basic => Icon::On,
            Self::Assets => Icon::Super,
        }
    }
}

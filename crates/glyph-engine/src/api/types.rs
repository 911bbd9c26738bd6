// api/types.rs
//
// Identifiers and the opaque color/visual values handed to renderers.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Unique identifier for a character on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CharacterId(pub u32);

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Name of a path registered on a character's motion.
    PathId
);
string_id!(
    /// Name of a waypoint, unique within its path.
    WaypointId
);
string_id!(
    /// Name of a scene registered on a character's animation.
    SceneId
);

/// An opaque color value.
///
/// Produced by an external color/gradient utility and handed to the renderer
/// untouched. The engine never converts between the two forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// XTerm-256 palette index.
    Xterm(u8),
    /// 24-bit RGB.
    Rgb(u8, u8, u8),
}

/// What a character looks like right now: a symbol and an optional color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visual {
    pub symbol: String,
    #[serde(default)]
    pub color: Option<Color>,
}

impl Visual {
    pub fn new(symbol: impl Into<String>, color: Option<Color>) -> Self {
        Self {
            symbol: symbol.into(),
            color,
        }
    }
}

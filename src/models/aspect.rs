use crate::error::PhotoshootError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AspectRatio {
    #[default]
    Square,
    Portrait9x16,
    Landscape16x9,
    Classic3x2,
    Portrait4x5,
    Cinematic21x9,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 6] = [
        AspectRatio::Square,
        AspectRatio::Portrait9x16,
        AspectRatio::Landscape16x9,
        AspectRatio::Classic3x2,
        AspectRatio::Portrait4x5,
        AspectRatio::Cinematic21x9,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait9x16 => "9:16",
            AspectRatio::Landscape16x9 => "16:9",
            AspectRatio::Classic3x2 => "3:2",
            AspectRatio::Portrait4x5 => "4:5",
            AspectRatio::Cinematic21x9 => "21:9",
        }
    }

    /// Label as shown in a picker.
    pub fn display_name(&self) -> String {
        match self {
            AspectRatio::Cinematic21x9 => format!("{} (Cinematic)", self.label()),
            _ => self.label().to_string(),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AspectRatio {
    type Err = PhotoshootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AspectRatio::ALL
            .iter()
            .copied()
            .find(|ratio| ratio.label() == s)
            .ok_or_else(|| PhotoshootError::InvalidInput(format!("unknown aspect ratio: {}", s)))
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = PhotoshootError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(value: AspectRatio) -> Self {
        value.label().to_string()
    }
}

//! Quality tiers accepted by the primary compressor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named compression-aggressiveness preset.
///
/// Closed set: anything else is rejected at argument parsing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    /// 72 dpi, smallest output
    Screen,
    /// 150 dpi
    #[default]
    Ebook,
    /// 300 dpi
    Printer,
    /// 300 dpi, color preserving
    Prepress,
}

impl QualityTier {
    pub const ALL: [QualityTier; 4] = [Self::Screen, Self::Ebook, Self::Printer, Self::Prepress];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Screen => "screen",
            Self::Ebook => "ebook",
            Self::Printer => "printer",
            Self::Prepress => "prepress",
        }
    }

    /// Value passed to Ghostscript's `-dPDFSETTINGS`
    pub fn pdf_settings(&self) -> &'static str {
        match self {
            Self::Screen => "/screen",
            Self::Ebook => "/ebook",
            Self::Printer => "/printer",
            Self::Prepress => "/prepress",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

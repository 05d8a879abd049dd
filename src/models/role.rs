//! Semantic file roles and their display attributes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category assigned to a file by the classifier
///
/// Variant order is the display order used for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    Main,
    Config,
    Model,
    Service,
    Utils,
    Test,
    Other,
}

impl FileRole {
    /// Lowercase role name
    pub fn name(&self) -> &'static str {
        match self {
            FileRole::Main => "main",
            FileRole::Config => "config",
            FileRole::Model => "model",
            FileRole::Service => "service",
            FileRole::Utils => "utils",
            FileRole::Test => "test",
            FileRole::Other => "other",
        }
    }

    /// Display icon for this role
    pub fn icon(&self) -> &'static str {
        match self {
            FileRole::Model => "📊",
            FileRole::Service => "🌐",
            FileRole::Utils => "🔧",
            FileRole::Test => "🧪",
            FileRole::Main => "🚀",
            FileRole::Config => "⚙️",
            FileRole::Other => "📄",
        }
    }

    /// Display color name for this role
    pub fn color(&self) -> &'static str {
        match self {
            FileRole::Model => "cyan",
            FileRole::Service => "green",
            FileRole::Utils => "yellow",
            FileRole::Test => "magenta",
            FileRole::Main => "red",
            FileRole::Config => "bright_blue",
            FileRole::Other => "white",
        }
    }

    /// Whether labels of this role are rendered bold
    pub fn is_bold(&self) -> bool {
        matches!(self, FileRole::Main)
    }

    /// Terminal style for this role
    pub fn style(&self) -> ansi_term::Style {
        use ansi_term::Colour;

        let style = match self {
            FileRole::Model => Colour::Cyan.normal(),
            FileRole::Service => Colour::Green.normal(),
            FileRole::Utils => Colour::Yellow.normal(),
            FileRole::Test => Colour::Purple.normal(),
            FileRole::Main => Colour::Red.normal(),
            // bright blue
            FileRole::Config => Colour::Fixed(12).normal(),
            FileRole::Other => Colour::White.normal(),
        };

        if self.is_bold() {
            style.bold()
        } else {
            style
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_icons() {
        assert_eq!(FileRole::Model.icon(), "📊");
        assert_eq!(FileRole::Service.icon(), "🌐");
        assert_eq!(FileRole::Utils.icon(), "🔧");
        assert_eq!(FileRole::Test.icon(), "🧪");
        assert_eq!(FileRole::Main.icon(), "🚀");
        assert_eq!(FileRole::Config.icon(), "⚙️");
        assert_eq!(FileRole::Other.icon(), "📄");
    }

    #[test]
    fn test_role_colors() {
        assert_eq!(FileRole::Model.color(), "cyan");
        assert_eq!(FileRole::Service.color(), "green");
        assert_eq!(FileRole::Utils.color(), "yellow");
        assert_eq!(FileRole::Test.color(), "magenta");
        assert_eq!(FileRole::Main.color(), "red");
        assert_eq!(FileRole::Config.color(), "bright_blue");
        assert_eq!(FileRole::Other.color(), "white");
        assert!(FileRole::Main.is_bold());
        assert!(!FileRole::Config.is_bold());
    }
}

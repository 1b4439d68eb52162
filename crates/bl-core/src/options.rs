//! Label options — the knobs a host can turn.

use crate::palette::DEFAULT_LIGHT;

/// Label used when neither an explicit label nor any context name is set.
pub const DEFAULT_FALLBACK_LABEL: &str = "TMUX";

/// Subsystem-wide settings, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelOptions {
    /// Last resort label text.
    pub fallback_label: String,
    /// xterm-256 index of lit pixels and fallback text.
    pub foreground: u8,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            fallback_label: DEFAULT_FALLBACK_LABEL.to_owned(),
            foreground: DEFAULT_LIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = LabelOptions::default();
        assert_eq!(options.fallback_label, "TMUX");
        assert_eq!(options.foreground, 15);
    }
}

//! Regional colour palettes the artisan can dress the studio in.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Rajasthani,
    Kerala,
    Bengal,
    Kashmiri,
    Gujarati,
    Punjabi,
}

impl ThemeId {
    pub const ALL: [ThemeId; 6] = [
        ThemeId::Rajasthani,
        ThemeId::Kerala,
        ThemeId::Bengal,
        ThemeId::Kashmiri,
        ThemeId::Gujarati,
        ThemeId::Punjabi,
    ];

    pub fn key(&self) -> &'static str {
        self.palette().key
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            ThemeId::Rajasthani => &RAJASTHANI,
            ThemeId::Kerala => &KERALA,
            ThemeId::Bengal => &BENGAL,
            ThemeId::Kashmiri => &KASHMIRI,
            ThemeId::Gujarati => &GUJARATI,
            ThemeId::Punjabi => &PUNJABI,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    Mandala,
    Paisley,
    BlockPrint,
    Ikat,
    Phulkari,
    Kantha,
}

impl Pattern {
    pub fn key(&self) -> &'static str {
        match self {
            Pattern::Mandala => "mandala",
            Pattern::Paisley => "paisley",
            Pattern::BlockPrint => "block-print",
            Pattern::Ikat => "ikat",
            Pattern::Phulkari => "phulkari",
            Pattern::Kantha => "kantha",
        }
    }

    /// CSS `background-image` value drawn in the palette's accent colour.
    pub fn css(&self, accent: &str) -> String {
        match self {
            Pattern::Mandala => format!(
                "radial-gradient(circle at center, {accent}33 0 12%, transparent 13% 30%, {accent}22 31% 34%, transparent 35%)"
            ),
            Pattern::Paisley => format!(
                "radial-gradient(ellipse 40% 60% at 30% 40%, {accent}26 0 45%, transparent 46%), radial-gradient(circle at 70% 70%, {accent}1a 0 15%, transparent 16%)"
            ),
            Pattern::BlockPrint => format!(
                "repeating-linear-gradient(45deg, {accent}1f 0 6px, transparent 6px 18px), repeating-linear-gradient(-45deg, {accent}14 0 6px, transparent 6px 18px)"
            ),
            Pattern::Ikat => format!(
                "repeating-linear-gradient(90deg, {accent}26 0 10px, transparent 10px 14px, {accent}14 14px 22px, transparent 22px 32px)"
            ),
            Pattern::Phulkari => format!(
                "conic-gradient(from 45deg, {accent}2e 0 25%, transparent 0 50%, {accent}2e 0 75%, transparent 0)"
            ),
            Pattern::Kantha => format!(
                "repeating-linear-gradient(0deg, {accent}1f 0 2px, transparent 2px 8px)"
            ),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Palette {
    pub key: &'static str,
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub pattern: Pattern,
}

impl Palette {
    /// Inline style declaring the `--kala-*` custom properties.
    pub fn css_variables(&self) -> String {
        format!(
            "--kala-primary: {}; --kala-secondary: {}; --kala-accent: {}; --kala-background: {}; --kala-pattern: {};",
            self.primary,
            self.secondary,
            self.accent,
            self.background,
            self.pattern.css(self.accent)
        )
    }

    pub fn swatches(&self) -> [&'static str; 4] {
        [self.primary, self.secondary, self.accent, self.background]
    }
}

static RAJASTHANI: Palette = Palette {
    key: "rajasthani",
    name: "Rajasthani",
    primary: "#c2410c",
    secondary: "#b45309",
    accent: "#db2777",
    background: "#fff7ed",
    pattern: Pattern::Mandala,
};

static KERALA: Palette = Palette {
    key: "kerala",
    name: "Kerala",
    primary: "#166534",
    secondary: "#a16207",
    accent: "#ca8a04",
    background: "#f7fee7",
    pattern: Pattern::Kantha,
};

static BENGAL: Palette = Palette {
    key: "bengal",
    name: "Bengal",
    primary: "#b91c1c",
    secondary: "#f5f5f4",
    accent: "#991b1b",
    background: "#fefce8",
    pattern: Pattern::BlockPrint,
};

static KASHMIRI: Palette = Palette {
    key: "kashmiri",
    name: "Kashmiri",
    primary: "#1e3a8a",
    secondary: "#0f766e",
    accent: "#be123c",
    background: "#f0f9ff",
    pattern: Pattern::Paisley,
};

static GUJARATI: Palette = Palette {
    key: "gujarati",
    name: "Gujarati",
    primary: "#7c2d12",
    secondary: "#15803d",
    accent: "#eab308",
    background: "#fffbeb",
    pattern: Pattern::Ikat,
};

static PUNJABI: Palette = Palette {
    key: "punjabi",
    name: "Punjabi",
    primary: "#9d174d",
    secondary: "#ea580c",
    accent: "#facc15",
    background: "#fdf2f8",
    pattern: Pattern::Phulkari,
};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn six_palettes_with_unique_keys_and_patterns() {
        let keys: HashSet<_> = ThemeId::ALL.iter().map(|id| id.key()).collect();
        let patterns: HashSet<_> = ThemeId::ALL
            .iter()
            .map(|id| id.palette().pattern.key())
            .collect();
        assert_eq!(keys.len(), 6);
        assert_eq!(patterns.len(), 6);
    }

    #[test]
    fn every_swatch_is_a_hex_colour() {
        for id in ThemeId::ALL {
            for colour in id.palette().swatches() {
                assert_eq!(colour.len(), 7, "{colour}");
                assert!(colour.starts_with('#'));
                assert!(colour[1..].chars().all(|c| c.is_ascii_hexdigit()));
            }
        }
    }

    #[test]
    fn keys_resolve_back_to_ids() {
        for id in ThemeId::ALL {
            assert_eq!(ThemeId::from_key(id.key()), Some(id));
        }
        assert_eq!(ThemeId::from_key(" Kerala "), Some(ThemeId::Kerala));
        assert_eq!(ThemeId::from_key("atlantis"), None);
    }

    #[test]
    fn css_variables_carry_palette_and_pattern() {
        let css = ThemeId::Kashmiri.palette().css_variables();
        assert!(css.contains("--kala-primary: #1e3a8a;"));
        assert!(css.contains("--kala-background: #f0f9ff;"));
        assert!(css.contains("--kala-pattern: radial-gradient(ellipse"));
        assert!(css.contains("#be123c26"));
    }
}

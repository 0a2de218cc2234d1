//! Mapping assignments and their aggregate statistics.

use serde::{Deserialize, Serialize};

use crate::facts::{SelectorStyles, SvgPaint};
use crate::palette::PaletteToken;

/// How an assignment was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingSource {
    /// The external classifier chose the token.
    Classifier,
    /// The deterministic local heuristic chose the token.
    Heuristic,
}

/// Accent slot for accent-bearing selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentRole {
    Main,
    Secondary,
    Tertiary,
}

/// A custom property assigned to a palette token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableMapping {
    pub name: String,
    pub token: PaletteToken,
    pub justification: String,
    pub source: MappingSource,
}

/// A single SVG paint color assigned to a palette token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgMapping {
    /// Index of the owning [`crate::facts::SvgInfo`] in the snapshot.
    pub svg_index: usize,
    pub paint: SvgPaint,
    /// The original literal to substitute.
    pub literal: String,
    pub token: PaletteToken,
    pub justification: String,
    pub source: MappingSource,
}

/// Hover-state gradient between two accent tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverGradient {
    pub angle_deg: u16,
    pub from: PaletteToken,
    pub to: PaletteToken,
    /// Background opacity applied to the gradient, in [0, 1].
    pub opacity: f64,
}

/// A selector's color properties assigned to palette tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorMapping {
    pub selector: String,
    /// Token per populated property, mirroring [`SelectorStyles`].
    pub color: Option<PaletteToken>,
    pub background_color: Option<PaletteToken>,
    pub border_color: Option<PaletteToken>,
    pub fill: Option<PaletteToken>,
    pub stroke: Option<PaletteToken>,
    pub justification: String,
    pub source: MappingSource,
    /// Set when the mapper judged this selector accent-bearing.
    pub accent_role: Option<AccentRole>,
    pub hover_gradient: Option<HoverGradient>,
    /// Emit the rule with `!important` priority.
    pub important: bool,
    /// Original styles, kept for justification and emission context.
    pub original: SelectorStyles,
}

impl SelectorMapping {
    /// Populated `(css-property, token)` pairs in emission order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, PaletteToken)> {
        let mut entries = Vec::new();
        if let Some(token) = self.color {
            entries.push(("color", token));
        }
        if let Some(token) = self.background_color {
            entries.push(("background-color", token));
        }
        if let Some(token) = self.border_color {
            entries.push(("border-color", token));
        }
        if let Some(token) = self.fill {
            entries.push(("fill", token));
        }
        if let Some(token) = self.stroke {
            entries.push(("stroke", token));
        }
        entries
    }

    /// All tokens referenced by this mapping, including gradient ends.
    #[must_use]
    pub fn tokens(&self) -> Vec<PaletteToken> {
        let mut tokens: Vec<PaletteToken> =
            self.entries().into_iter().map(|(_, token)| token).collect();
        if let Some(gradient) = &self.hover_gradient {
            tokens.push(gradient.from);
            tokens.push(gradient.to);
        }
        tokens
    }
}

/// Mapped/total counts for one fact kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindStats {
    pub mapped: usize,
    pub total: usize,
}

impl KindStats {
    /// Coverage percentage; 100 for an empty kind.
    #[must_use]
    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.mapped as f64 / self.total as f64) * 100.0
        }
    }
}

/// Realized accent-role counts (not the targeting ratio).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentUsage {
    pub main: usize,
    pub secondary: usize,
    pub tertiary: usize,
}

impl AccentUsage {
    #[must_use]
    pub fn total(&self) -> usize {
        self.main + self.secondary + self.tertiary
    }
}

/// The full mapping output for one snapshot.
///
/// Created once by the mapper, consumed by the generator and the mapping
/// validator; never mutated afterward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingResult {
    pub variables: Vec<VariableMapping>,
    pub svgs: Vec<SvgMapping>,
    pub selectors: Vec<SelectorMapping>,
    pub variable_stats: KindStats,
    pub svg_stats: KindStats,
    pub selector_stats: KindStats,
    pub accent_usage: AccentUsage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_is_full_for_empty_kind() {
        let stats = KindStats::default();
        assert_eq!(stats.coverage(), 100.0);
        let stats = KindStats { mapped: 3, total: 4 };
        assert_eq!(stats.coverage(), 75.0);
    }

    #[test]
    fn selector_mapping_collects_gradient_tokens() {
        let mapping = SelectorMapping {
            selector: ".cta".to_string(),
            color: Some(PaletteToken::Text),
            background_color: Some(PaletteToken::Blue),
            border_color: None,
            fill: None,
            stroke: None,
            justification: "test".to_string(),
            source: MappingSource::Heuristic,
            accent_role: Some(AccentRole::Main),
            hover_gradient: Some(HoverGradient {
                angle_deg: 135,
                from: PaletteToken::Blue,
                to: PaletteToken::Pink,
                opacity: 1.0,
            }),
            important: true,
            original: SelectorStyles::default(),
        };
        let tokens = mapping.tokens();
        assert!(tokens.contains(&PaletteToken::Text));
        assert!(tokens.contains(&PaletteToken::Pink));
        assert_eq!(tokens.len(), 4);
    }
}

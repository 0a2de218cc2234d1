//! The aggregate analysis snapshot consumed by the mapper.

use serde::{Deserialize, Serialize};

use crate::facts::{SelectorGroup, SvgInfo, VariableFact};
use crate::profile::DesignSystemProfile;

/// Detected page color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Dark,
    Light,
}

/// Raw discovery counters, before any mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryCounts {
    pub variables: usize,
    pub svgs: usize,
    pub selectors: usize,
}

/// Everything the analysis stages extracted from one page.
///
/// Immutable once produced; the mapper only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub url: String,
    pub variables: Vec<VariableFact>,
    pub svgs: Vec<SvgInfo>,
    pub selector_groups: Vec<SelectorGroup>,
    pub design_system: DesignSystemProfile,
    /// Most frequent page colors, branding hints first.
    pub dominant_colors: Vec<String>,
    /// Saturated colors likely used as accents.
    pub accent_colors: Vec<String>,
    pub color_scheme: ColorScheme,
    pub counts: DiscoveryCounts,
}

impl AnalysisSnapshot {
    /// All selector facts across groups, in group order.
    #[must_use]
    pub fn selectors(&self) -> impl Iterator<Item = &crate::facts::SelectorFact> {
        self.selector_groups
            .iter()
            .flat_map(|group| group.selectors.iter())
    }

    /// True when no stage found anything to work with.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.svgs.is_empty() && self.selector_groups.is_empty()
    }
}

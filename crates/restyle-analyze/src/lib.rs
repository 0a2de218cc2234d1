//! Analysis stages: extraction of color-bearing facts from raw HTML/CSS
//! and aggregation into an [`AnalysisSnapshot`].
//!
//! Every stage here is a pure function of the page text. Malformed
//! fragments are skipped fact-by-fact; no stage fails.

pub mod css;
pub mod design_system;
pub mod scheme;
pub mod selectors;
pub mod svg;
pub mod variables;

use serde::{Deserialize, Serialize};
use tracing::info;

use restyle_model::{AnalysisSnapshot, DiscoveryCounts};

pub use design_system::detect_design_system;
pub use scheme::{detect_color_scheme, extract_palette_signals};
pub use selectors::{categorize, discover_selectors, filter_colored, specificity};
pub use svg::analyze_svgs;
pub use variables::extract_variables;

/// Raw page text as delivered by the fetch collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInput {
    pub url: String,
    pub html: String,
    pub css: String,
    /// Externally derived branding colors, prepended to the dominant list.
    #[serde(default)]
    pub branding_colors: Vec<String>,
}

/// Run every extraction stage and compose the snapshot.
#[must_use]
pub fn analyze_page(input: &PageInput) -> AnalysisSnapshot {
    let variables = extract_variables(&input.html, &input.css);
    let svgs = analyze_svgs(&input.html, &input.css);
    let design_system = detect_design_system(&input.html, &input.css, &variables);
    let selector_groups = filter_colored(discover_selectors(&input.css, &input.html));
    let color_scheme = detect_color_scheme(&input.html, &input.css);
    let (dominant_colors, accent_colors) =
        extract_palette_signals(&input.css, &input.branding_colors);

    let counts = DiscoveryCounts {
        variables: variables.len(),
        svgs: svgs.len(),
        selectors: selector_groups
            .iter()
            .map(|group| group.selectors.len())
            .sum(),
    };
    info!(
        variables = counts.variables,
        svgs = counts.svgs,
        selectors = counts.selectors,
        system = design_system.system.as_str(),
        "analysis complete"
    );

    AnalysisSnapshot {
        url: input.url.clone(),
        variables,
        svgs,
        selector_groups,
        design_system,
        dominant_colors,
        accent_colors,
        color_scheme,
        counts,
    }
}

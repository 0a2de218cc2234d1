//! Deterministic fallback mapping: luminance bucketing plus keyword
//! accent bias.
//!
//! This path must produce a token for every fact it is handed; it is the
//! guarantee behind the total-coverage invariant when the classifier is
//! unavailable.

use restyle_model::color::{is_accent_like, luminance, rgb_distance};
use restyle_model::{ACCENT_WHEEL, AccentColor, ColorScheme, Flavor, PaletteToken};

/// Name fragments that bias a fact toward the session accent family.
const ACCENT_HINTS: [&str; 9] = [
    "primary",
    "accent",
    "brand",
    "link",
    "button",
    "active",
    "hover",
    "focus",
    "highlight",
];

/// A heuristic decision with its explanation.
#[derive(Debug, Clone)]
pub struct HeuristicChoice {
    pub token: PaletteToken,
    pub justification: String,
}

/// Map one source color (and its naming context) to a palette token.
///
/// Precedence: a name hint wins when the color is absent or reads as an
/// accent; otherwise saturated colors snap to the nearest wheel accent
/// and neutral colors bucket by luminance relative to the page scheme.
#[must_use]
pub fn choose_token(
    color: Option<&str>,
    name_hint: &str,
    scheme: ColorScheme,
    accent: AccentColor,
    flavor: Flavor,
) -> HeuristicChoice {
    let hinted = accent_hint(name_hint);

    if let Some(hex) = color {
        if is_accent_like(hex) {
            if let Some(hint) = hinted {
                return HeuristicChoice {
                    token: accent.token(),
                    justification: format!(
                        "'{hint}' in name and saturated source {hex}; assigned session accent"
                    ),
                };
            }
            let nearest = nearest_accent(hex, flavor);
            return HeuristicChoice {
                token: nearest.token(),
                justification: format!(
                    "saturated source {hex} is closest to {} on the wheel",
                    nearest.as_str()
                ),
            };
        }
        let token = neutral_bucket(hex, scheme);
        return HeuristicChoice {
            token,
            justification: format!(
                "neutral source {hex} (luminance {:.2}) bucketed to {}",
                luminance(hex),
                token.as_str()
            ),
        };
    }

    if let Some(hint) = hinted {
        return HeuristicChoice {
            token: accent.token(),
            justification: format!("no source color; '{hint}' in name suggests the accent family"),
        };
    }
    HeuristicChoice {
        token: PaletteToken::Text,
        justification: "no source color or naming signal; defaulted to text".to_string(),
    }
}

fn accent_hint(name: &str) -> Option<&'static str> {
    let lowered = name.to_lowercase();
    ACCENT_HINTS
        .into_iter()
        .find(|hint| lowered.contains(hint))
}

/// The wheel accent whose flavor hex is nearest the source color.
#[must_use]
pub fn nearest_accent(hex: &str, flavor: Flavor) -> AccentColor {
    let mut best = AccentColor::Blue;
    let mut best_distance = f64::MAX;
    for candidate in ACCENT_WHEEL {
        let distance = rgb_distance(hex, candidate.token().hex(flavor));
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }
    best
}

/// Bucket a desaturated color by its role-relative luminance.
///
/// On a light page, the lightest colors are surfaces and the darkest are
/// text; a dark page reads the other way around. Tokens are semantic, so
/// the same bucket works for every target flavor.
fn neutral_bucket(hex: &str, scheme: ColorScheme) -> PaletteToken {
    let lum = luminance(hex);
    let toward_background = match scheme {
        ColorScheme::Light => lum,
        ColorScheme::Dark => 1.0 - lum,
    };
    if toward_background > 0.9 {
        PaletteToken::Base
    } else if toward_background > 0.8 {
        PaletteToken::Mantle
    } else if toward_background > 0.65 {
        PaletteToken::Surface0
    } else if toward_background > 0.5 {
        PaletteToken::Surface1
    } else if toward_background > 0.4 {
        PaletteToken::Overlay0
    } else if toward_background > 0.3 {
        PaletteToken::Overlay1
    } else if toward_background > 0.2 {
        PaletteToken::Subtext0
    } else {
        PaletteToken::Text
    }
}

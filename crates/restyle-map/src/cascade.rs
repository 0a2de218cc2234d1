//! Accent cascade: bi-accent derivation, role distribution, and hover
//! gradient synthesis.

use restyle_model::color::rgb_distance;
use restyle_model::{AccentColor, AccentRole, Flavor, HoverGradient, PaletteToken};

/// RGB distance under which a source color "matches" an accent.
const ACCENT_MATCH_DISTANCE: f64 = 60.0;

/// Fixed angle for synthesized hover gradients.
const HOVER_GRADIENT_ANGLE: u16 = 135;

/// Role-distribution targets over accent-bearing selectors.
const MAIN_SHARE: f64 = 0.6;
const SECONDARY_SHARE: f64 = 0.2;

/// The session's accent triad, with one level of recursive cascade.
#[derive(Debug, Clone, Copy)]
pub struct AccentCascade {
    pub main: AccentColor,
    /// Companions of `main`, three wheel steps out.
    pub bi: (AccentColor, AccentColor),
    /// Companions of each bi-accent, for deeper hierarchy.
    pub sub_bi: ((AccentColor, AccentColor), (AccentColor, AccentColor)),
}

impl AccentCascade {
    #[must_use]
    pub fn new(main: AccentColor) -> Self {
        let bi = main.bi_accents();
        Self {
            main,
            bi,
            sub_bi: (bi.0.bi_accents(), bi.1.bi_accents()),
        }
    }

    /// The accent used for a given role.
    #[must_use]
    pub fn accent_for_role(&self, role: AccentRole) -> AccentColor {
        match role {
            AccentRole::Main => self.main,
            AccentRole::Secondary => self.bi.0,
            AccentRole::Tertiary => self.bi.1,
        }
    }

    /// The deeper companion for nested elements under a role's context.
    #[must_use]
    pub fn sub_accent_for_role(&self, role: AccentRole) -> AccentColor {
        match role {
            AccentRole::Main => self.bi.0,
            AccentRole::Secondary => self.sub_bi.0.0,
            AccentRole::Tertiary => self.sub_bi.1.0,
        }
    }

    /// Whether a source color matches the main accent or either bi-accent
    /// closely enough to mark its owner accent-bearing.
    #[must_use]
    pub fn matches_triad(&self, hex: &str, flavor: Flavor) -> bool {
        [self.main, self.bi.0, self.bi.1].iter().any(|candidate| {
            rgb_distance(hex, candidate.token().hex(flavor)) < ACCENT_MATCH_DISTANCE
        })
    }

    /// Hover gradient for a selector holding `role`: from the role's
    /// accent toward its nearest wheel companion.
    #[must_use]
    pub fn hover_gradient(&self, role: AccentRole) -> HoverGradient {
        let from = self.accent_for_role(role);
        let (to, _) = from.bi_accents();
        HoverGradient {
            angle_deg: HOVER_GRADIENT_ANGLE,
            from: from.token(),
            to: to.token(),
            opacity: 1.0,
        }
    }
}

/// Distribute roles across `count` accent-bearing selectors in the
/// 60/20/20 target split. Callers pass selectors ordered by descending
/// frequency so the most visible elements take the main accent.
///
/// This is a targeting policy, not an enforcement: every selector gets a
/// role, and realized counts are reported as-is.
#[must_use]
pub fn distribute_roles(count: usize) -> Vec<AccentRole> {
    if count == 0 {
        return Vec::new();
    }
    let main_end = ((count as f64) * MAIN_SHARE).ceil() as usize;
    let secondary_end = main_end + ((count as f64) * SECONDARY_SHARE).ceil() as usize;
    (0..count)
        .map(|index| {
            if index < main_end {
                AccentRole::Main
            } else if index < secondary_end {
                AccentRole::Secondary
            } else {
                AccentRole::Tertiary
            }
        })
        .collect()
}

/// Substitute a role's accent for any accent-family token, leaving
/// neutral tiers untouched.
#[must_use]
pub fn retint_for_role(
    token: PaletteToken,
    role: AccentRole,
    cascade: &AccentCascade,
) -> PaletteToken {
    if token.is_accent() {
        cascade.accent_for_role(role).token()
    } else {
        token
    }
}

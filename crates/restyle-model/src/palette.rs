//! The fixed target palette: four flavors, twelve neutral tiers, and a
//! fourteen-accent wheel.
//!
//! Every mapping produced anywhere in the pipeline must resolve to one of
//! the 26 [`PaletteToken`] members. Raw hex values never leave this module
//! except through [`PaletteToken::hex`].

use serde::{Deserialize, Serialize};

/// A palette flavor. Latte is the light variant; the other three are dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    Latte,
    Frappe,
    Macchiato,
    Mocha,
}

impl Flavor {
    pub const ALL: [Flavor; 4] = [
        Flavor::Latte,
        Flavor::Frappe,
        Flavor::Macchiato,
        Flavor::Mocha,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Flavor::Latte => "latte",
            Flavor::Frappe => "frappe",
            Flavor::Macchiato => "macchiato",
            Flavor::Mocha => "mocha",
        }
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        !matches!(self, Flavor::Latte)
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Flavor> {
        match value.trim().to_lowercase().as_str() {
            "latte" => Some(Flavor::Latte),
            "frappe" | "frappé" => Some(Flavor::Frappe),
            "macchiato" => Some(Flavor::Macchiato),
            "mocha" => Some(Flavor::Mocha),
            _ => None,
        }
    }
}

/// One of the fourteen accent colors.
///
/// Variant order follows the accent wheel used for bi-accent derivation:
/// stepping three positions in either direction yields the two companion
/// accents of a triad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    Red,
    Maroon,
    Peach,
    Yellow,
    Green,
    Teal,
    Sky,
    Sapphire,
    Blue,
    Lavender,
    Mauve,
    Pink,
    Flamingo,
    Rosewater,
}

/// The accent wheel, in cascade order.
pub const ACCENT_WHEEL: [AccentColor; 14] = [
    AccentColor::Red,
    AccentColor::Maroon,
    AccentColor::Peach,
    AccentColor::Yellow,
    AccentColor::Green,
    AccentColor::Teal,
    AccentColor::Sky,
    AccentColor::Sapphire,
    AccentColor::Blue,
    AccentColor::Lavender,
    AccentColor::Mauve,
    AccentColor::Pink,
    AccentColor::Flamingo,
    AccentColor::Rosewater,
];

/// Wheel distance between a main accent and each of its bi-accents.
pub const BI_ACCENT_STEP: usize = 3;

impl AccentColor {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.token().as_str()
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<AccentColor> {
        let needle = value.trim().to_lowercase();
        ACCENT_WHEEL
            .into_iter()
            .find(|accent| accent.as_str() == needle)
    }

    /// Position of this accent on the wheel.
    #[must_use]
    pub fn wheel_index(&self) -> usize {
        ACCENT_WHEEL
            .iter()
            .position(|candidate| candidate == self)
            .expect("accent is on the wheel")
    }

    /// The two companion accents, three steps away in each direction.
    ///
    /// The pair is always distinct from `self` and from each other, and the
    /// relation is symmetric: each bi-accent's own bi-accent pair contains
    /// the original accent.
    #[must_use]
    pub fn bi_accents(&self) -> (AccentColor, AccentColor) {
        let index = self.wheel_index();
        let len = ACCENT_WHEEL.len();
        let forward = ACCENT_WHEEL[(index + BI_ACCENT_STEP) % len];
        let backward = ACCENT_WHEEL[(index + len - BI_ACCENT_STEP) % len];
        (forward, backward)
    }

    /// The corresponding palette token.
    #[must_use]
    pub fn token(&self) -> PaletteToken {
        match self {
            AccentColor::Red => PaletteToken::Red,
            AccentColor::Maroon => PaletteToken::Maroon,
            AccentColor::Peach => PaletteToken::Peach,
            AccentColor::Yellow => PaletteToken::Yellow,
            AccentColor::Green => PaletteToken::Green,
            AccentColor::Teal => PaletteToken::Teal,
            AccentColor::Sky => PaletteToken::Sky,
            AccentColor::Sapphire => PaletteToken::Sapphire,
            AccentColor::Blue => PaletteToken::Blue,
            AccentColor::Lavender => PaletteToken::Lavender,
            AccentColor::Mauve => PaletteToken::Mauve,
            AccentColor::Pink => PaletteToken::Pink,
            AccentColor::Flamingo => PaletteToken::Flamingo,
            AccentColor::Rosewater => PaletteToken::Rosewater,
        }
    }
}

/// One name from the closed 26-member target vocabulary.
///
/// The twelve neutral tiers run from `Crust` (darkest surface in dark
/// flavors) up to `Text`; the remaining fourteen members mirror
/// [`AccentColor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteToken {
    Crust,
    Mantle,
    Base,
    Surface0,
    Surface1,
    Surface2,
    Overlay0,
    Overlay1,
    Overlay2,
    Subtext0,
    Subtext1,
    Text,
    Red,
    Maroon,
    Peach,
    Yellow,
    Green,
    Teal,
    Sky,
    Sapphire,
    Blue,
    Lavender,
    Mauve,
    Pink,
    Flamingo,
    Rosewater,
}

impl PaletteToken {
    pub const ALL: [PaletteToken; 26] = [
        PaletteToken::Crust,
        PaletteToken::Mantle,
        PaletteToken::Base,
        PaletteToken::Surface0,
        PaletteToken::Surface1,
        PaletteToken::Surface2,
        PaletteToken::Overlay0,
        PaletteToken::Overlay1,
        PaletteToken::Overlay2,
        PaletteToken::Subtext0,
        PaletteToken::Subtext1,
        PaletteToken::Text,
        PaletteToken::Red,
        PaletteToken::Maroon,
        PaletteToken::Peach,
        PaletteToken::Yellow,
        PaletteToken::Green,
        PaletteToken::Teal,
        PaletteToken::Sky,
        PaletteToken::Sapphire,
        PaletteToken::Blue,
        PaletteToken::Lavender,
        PaletteToken::Mauve,
        PaletteToken::Pink,
        PaletteToken::Flamingo,
        PaletteToken::Rosewater,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteToken::Crust => "crust",
            PaletteToken::Mantle => "mantle",
            PaletteToken::Base => "base",
            PaletteToken::Surface0 => "surface0",
            PaletteToken::Surface1 => "surface1",
            PaletteToken::Surface2 => "surface2",
            PaletteToken::Overlay0 => "overlay0",
            PaletteToken::Overlay1 => "overlay1",
            PaletteToken::Overlay2 => "overlay2",
            PaletteToken::Subtext0 => "subtext0",
            PaletteToken::Subtext1 => "subtext1",
            PaletteToken::Text => "text",
            PaletteToken::Red => "red",
            PaletteToken::Maroon => "maroon",
            PaletteToken::Peach => "peach",
            PaletteToken::Yellow => "yellow",
            PaletteToken::Green => "green",
            PaletteToken::Teal => "teal",
            PaletteToken::Sky => "sky",
            PaletteToken::Sapphire => "sapphire",
            PaletteToken::Blue => "blue",
            PaletteToken::Lavender => "lavender",
            PaletteToken::Mauve => "mauve",
            PaletteToken::Pink => "pink",
            PaletteToken::Flamingo => "flamingo",
            PaletteToken::Rosewater => "rosewater",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<PaletteToken> {
        let needle = value.trim().to_lowercase();
        PaletteToken::ALL
            .into_iter()
            .find(|token| token.as_str() == needle)
    }

    /// Whether this token is one of the fourteen accents.
    #[must_use]
    pub fn is_accent(&self) -> bool {
        self.accent().is_some()
    }

    #[must_use]
    pub fn accent(&self) -> Option<AccentColor> {
        ACCENT_WHEEL
            .into_iter()
            .find(|accent| accent.token() == *self)
    }

    /// Resolved hex value for this token under the given flavor.
    #[must_use]
    pub fn hex(&self, flavor: Flavor) -> &'static str {
        let table = match flavor {
            Flavor::Latte => &LATTE,
            Flavor::Frappe => &FRAPPE,
            Flavor::Macchiato => &MACCHIATO,
            Flavor::Mocha => &MOCHA,
        };
        let index = PaletteToken::ALL
            .iter()
            .position(|candidate| candidate == self)
            .expect("token is in ALL");
        table[index]
    }
}

// Hex tables, ordered as PaletteToken::ALL: crust..text, then the wheel
// colors in token declaration order (red..rosewater).
const LATTE: [&str; 26] = [
    "#dce0e8", "#e6e9ef", "#eff1f5", "#ccd0da", "#bcc0cc", "#acb0be", "#9ca0b0", "#8c8fa1",
    "#7c7f93", "#6c6f85", "#5c5f77", "#4c4f69", "#d20f39", "#e64553", "#fe640b", "#df8e1d",
    "#40a02b", "#179299", "#04a5e5", "#209fb5", "#1e66f5", "#7287fd", "#8839ef", "#ea76cb",
    "#dd7878", "#dc8a78",
];

const FRAPPE: [&str; 26] = [
    "#232634", "#292c3c", "#303446", "#414559", "#51576d", "#626880", "#737994", "#838ba7",
    "#949cbb", "#a5adce", "#b5bfe2", "#c6d0f5", "#e78284", "#ea999c", "#ef9f76", "#e5c890",
    "#a6d189", "#81c8be", "#99d1db", "#85c1dc", "#8caaee", "#babbf1", "#ca9ee6", "#f4b8e4",
    "#eebebe", "#f2d5cf",
];

const MACCHIATO: [&str; 26] = [
    "#181926", "#1e2030", "#24273a", "#363a4f", "#494d64", "#5b6078", "#6e738d", "#8087a2",
    "#939ab7", "#a5adcb", "#b8c0e0", "#cad3f5", "#ed8796", "#ee99a0", "#f5a97f", "#eed49f",
    "#a6da95", "#8bd5ca", "#91d7e3", "#7dc4e4", "#8aadf4", "#b7bdf8", "#c6a0f6", "#f5bde6",
    "#f0c6c6", "#f4dbd6",
];

const MOCHA: [&str; 26] = [
    "#11111b", "#181825", "#1e1e2e", "#313244", "#45475a", "#585b70", "#6c7086", "#7f849c",
    "#9399b2", "#a6adc8", "#bac2de", "#cdd6f4", "#f38ba8", "#eba0ac", "#fab387", "#f9e2af",
    "#a6e3a1", "#94e2d5", "#89dceb", "#74c7ec", "#89b4fa", "#b4befe", "#cba6f7", "#f5c2e7",
    "#f2cdcd", "#f5e0dc",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_vocabulary_is_closed_at_26() {
        assert_eq!(PaletteToken::ALL.len(), 26);
        for token in PaletteToken::ALL {
            assert_eq!(PaletteToken::parse(token.as_str()), Some(token));
        }
        assert_eq!(PaletteToken::parse("#ff0000"), None);
        assert_eq!(PaletteToken::parse("accent"), None);
    }

    #[test]
    fn bi_accents_are_distinct_members() {
        for accent in ACCENT_WHEEL {
            let (first, second) = accent.bi_accents();
            assert_ne!(first, accent);
            assert_ne!(second, accent);
            assert_ne!(first, second);
        }
    }

    #[test]
    fn bi_accent_relation_is_symmetric() {
        for accent in ACCENT_WHEEL {
            let (forward, backward) = accent.bi_accents();
            let (_, back_of_forward) = forward.bi_accents();
            let (forward_of_backward, _) = backward.bi_accents();
            assert_eq!(back_of_forward, accent);
            assert_eq!(forward_of_backward, accent);
        }
    }

    #[test]
    fn blue_triad_matches_wheel_step() {
        let (forward, backward) = AccentColor::Blue.bi_accents();
        assert_eq!(forward, AccentColor::Pink);
        assert_eq!(backward, AccentColor::Teal);
    }

    #[test]
    fn every_flavor_resolves_every_token() {
        for flavor in Flavor::ALL {
            for token in PaletteToken::ALL {
                let hex = token.hex(flavor);
                assert_eq!(hex.len(), 7);
                assert!(hex.starts_with('#'));
            }
        }
        assert_eq!(PaletteToken::Base.hex(Flavor::Mocha), "#1e1e2e");
        assert_eq!(PaletteToken::Blue.hex(Flavor::Latte), "#1e66f5");
    }

    #[test]
    fn flavor_parsing_and_darkness() {
        assert_eq!(Flavor::parse("Mocha"), Some(Flavor::Mocha));
        assert_eq!(Flavor::parse("frappé"), Some(Flavor::Frappe));
        assert_eq!(Flavor::parse("solarized"), None);
        assert!(!Flavor::Latte.is_dark());
        assert!(Flavor::Macchiato.is_dark());
    }
}

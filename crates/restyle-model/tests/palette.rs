use proptest::prelude::*;
use restyle_model::{ACCENT_WHEEL, AccentColor, Flavor, PaletteToken};

proptest! {
    #[test]
    fn bi_accents_stay_on_the_wheel(index in 0usize..14) {
        let accent = ACCENT_WHEEL[index];
        let (forward, backward) = accent.bi_accents();
        prop_assert!(ACCENT_WHEEL.contains(&forward));
        prop_assert!(ACCENT_WHEEL.contains(&backward));
        prop_assert_ne!(forward, accent);
        prop_assert_ne!(backward, accent);
        prop_assert_ne!(forward, backward);
    }

    #[test]
    fn inverse_step_recovers_the_main_accent(index in 0usize..14) {
        let accent = ACCENT_WHEEL[index];
        let (forward, backward) = accent.bi_accents();
        // Walking the wheel back from either companion lands on the origin.
        prop_assert_eq!(forward.bi_accents().1, accent);
        prop_assert_eq!(backward.bi_accents().0, accent);
    }

    #[test]
    fn token_round_trips_through_its_name(index in 0usize..26) {
        let token = PaletteToken::ALL[index];
        prop_assert_eq!(PaletteToken::parse(token.as_str()), Some(token));
    }
}

#[test]
fn accent_tokens_and_neutral_tiers_partition_the_vocabulary() {
    let accents = PaletteToken::ALL
        .into_iter()
        .filter(PaletteToken::is_accent)
        .count();
    assert_eq!(accents, 14);
    assert_eq!(PaletteToken::ALL.len() - accents, 12);
}

#[test]
fn accent_hex_values_are_saturated_in_every_flavor() {
    for flavor in Flavor::ALL {
        for accent in ACCENT_WHEEL {
            let hex = accent.token().hex(flavor);
            assert!(
                restyle_model::color::saturation(hex) > 0.1,
                "{} {} reads as gray",
                flavor.as_str(),
                accent.as_str()
            );
        }
    }
}

#[test]
fn accent_parse_accepts_wheel_names() {
    assert_eq!(AccentColor::parse("blue"), Some(AccentColor::Blue));
    assert_eq!(AccentColor::parse(" Rosewater "), Some(AccentColor::Rosewater));
    assert_eq!(AccentColor::parse("cyan"), None);
}

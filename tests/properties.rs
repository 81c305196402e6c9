// SPDX-License-Identifier: PMPL-1.0-or-later

use contrastbot::{
    check_contrast, contrast_ratio, parse_hex, to_hex, Color, ComplianceReport, Issue, Severity, WcagLevel,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn any_color() -> impl Strategy<Value = Color> {
    any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Color::rgb(r, g, b))
}

fn any_severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn hex_roundtrip(color in any_color()) {
        prop_assert_eq!(parse_hex(&to_hex(color)).expect("hex parse"), color);
    }

    #[test]
    fn hsl_roundtrip(color in any_color()) {
        let (h, s, l) = color.to_hsl();
        prop_assert!((0.0..360.0).contains(&h));
        prop_assert!((0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&l));

        let back = Color::from_hsl(h, s, l);
        for (a, b) in [(color.r, back.r), (color.g, back.g), (color.b, back.b)] {
            prop_assert!(a.abs_diff(b) <= 1, "{} -> ({}, {}, {}) -> {}", color, h, s, l, back);
        }
    }

    #[test]
    fn contrast_is_symmetric(a in any_color(), b in any_color()) {
        prop_assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn contrast_with_self_is_one(c in any_color()) {
        prop_assert_eq!(contrast_ratio(c, c), 1.0);
    }

    #[test]
    fn contrast_is_bounded(a in any_color(), b in any_color()) {
        let ratio = contrast_ratio(a, b);
        prop_assert!((1.0..=21.0).contains(&ratio), "ratio {} out of range", ratio);
    }

    #[test]
    fn stricter_level_passing_implies_weaker(a in any_color(), b in any_color(), large in any::<bool>()) {
        if check_contrast(a, b, WcagLevel::AAA, large).passes {
            prop_assert!(check_contrast(a, b, WcagLevel::AA, large).passes);
        }
        if check_contrast(a, b, WcagLevel::AA, large).passes {
            prop_assert!(check_contrast(a, b, WcagLevel::A, large).passes);
        }
        if contrast_ratio(a, b) >= 7.0 {
            prop_assert!(check_contrast(a, b, WcagLevel::AAA, false).passes);
        }
    }

    #[test]
    fn score_is_bounded(severities in prop::collection::vec(any_severity(), 0..40)) {
        let mut report = ComplianceReport::new();
        for severity in &severities {
            report.add_issue(Issue::new("rule", *severity, "issue"));
        }
        let score = report.score();
        prop_assert!((0.0..=100.0).contains(&score));
        prop_assert_eq!(score == 100.0, severities.is_empty());
    }
}

//! 주의 문구 규칙 테스트.
use vri_sink_calculator::i18n::Translator;
use vri_sink_calculator::projection::{
    advisory::CONSERVATIVE_PCT, calculate, evaluate, normalize, run, Advisory, NormalizedInput,
    PricingMode, RawInput,
};

fn advisories_for(input: NormalizedInput) -> Vec<Advisory> {
    evaluate(&input, &calculate(&input))
}

fn defaults() -> NormalizedInput {
    normalize(&RawInput::default())
}

#[test]
fn default_scenario_has_no_advisories() {
    assert!(advisories_for(defaults()).is_empty());
}

#[test]
fn zero_rate_without_override_warns() {
    let list = advisories_for(NormalizedInput {
        vri_per_1000_bed_days: 0.0,
        ..defaults()
    });
    assert_eq!(list, vec![Advisory::ZeroInfectionRate]);
}

#[test]
fn positive_override_suppresses_zero_rate_warning() {
    let list = advisories_for(NormalizedInput {
        vri_per_1000_bed_days: 0.0,
        vri_per_year_override: Some(30.0),
        ..defaults()
    });
    assert!(list.is_empty());
}

#[test]
fn ignored_override_does_not_suppress_zero_rate_warning() {
    let list = advisories_for(NormalizedInput {
        vri_per_1000_bed_days: 0.0,
        vri_per_year_override: Some(0.0),
        ..defaults()
    });
    assert_eq!(list, vec![Advisory::ZeroInfectionRate]);
}

#[test]
fn conservative_threshold_is_inclusive() {
    let at = advisories_for(NormalizedInput {
        sink_attributable_pct: CONSERVATIVE_PCT,
        ..defaults()
    });
    assert_eq!(at, vec![Advisory::LowAttribution]);

    let above = advisories_for(NormalizedInput {
        sink_attributable_pct: 5.01,
        ..defaults()
    });
    assert!(above.is_empty());

    let low_effect = advisories_for(NormalizedInput {
        effect_pct: 5.0,
        ..defaults()
    });
    assert_eq!(low_effect, vec![Advisory::LowEffect]);
}

#[test]
fn zero_cost_warning_follows_pricing_mode() {
    let bed_days = advisories_for(NormalizedInput {
        cost_per_bed_day: 0.0,
        cost_per_vri: 0.0,
        ..defaults()
    });
    assert_eq!(bed_days, vec![Advisory::ZeroBedDayCost]);

    let per_vri = advisories_for(NormalizedInput {
        pricing_mode: PricingMode::PerVri,
        cost_per_bed_day: 0.0,
        cost_per_vri: 0.0,
        ..defaults()
    });
    assert_eq!(per_vri, vec![Advisory::ZeroVriCost]);

    // 사용하지 않는 단가가 0이면 경고하지 않는다
    let unused = advisories_for(NormalizedInput {
        cost_per_vri: 0.0,
        ..defaults()
    });
    assert!(unused.is_empty());
}

#[test]
fn all_matching_rules_fire_in_declaration_order() {
    let list = advisories_for(NormalizedInput {
        vri_per_1000_bed_days: 0.0,
        sink_attributable_pct: 1.0,
        effect_pct: 0.0,
        cost_per_bed_day: 0.0,
        ..defaults()
    });
    assert_eq!(
        list,
        vec![
            Advisory::ZeroInfectionRate,
            Advisory::LowAttribution,
            Advisory::LowEffect,
            Advisory::ZeroBedDayCost,
        ]
    );
}

#[test]
fn pipeline_attaches_advisories_from_raw_text() {
    let mut raw = RawInput::default();
    raw.effect_pct = "2,5".into();
    let eval = run(&raw);
    assert_eq!(eval.input.effect_pct, 2.5);
    assert_eq!(eval.advisories, vec![Advisory::LowEffect]);
}

#[test]
fn every_advisory_has_a_message_in_both_languages() {
    let all = [
        Advisory::ZeroInfectionRate,
        Advisory::LowAttribution,
        Advisory::LowEffect,
        Advisory::ZeroBedDayCost,
        Advisory::ZeroVriCost,
    ];
    for code in ["sv-se", "en-us"] {
        let tr = Translator::new(code);
        for advisory in all {
            let message = advisory.message(&tr);
            assert!(!message.is_empty());
            assert_ne!(message, advisory.key(), "{code}: {}", advisory.key());
        }
    }
}

//! 입력 정규화 회귀 테스트.
use vri_sink_calculator::projection::{
    normalize, normalize::clamp, normalize::parse_number, Field, PricingMode, RawInput, RawValue,
};

fn raw_with(field: Field, value: RawValue) -> RawInput {
    let mut raw = RawInput::default();
    raw.set(field, value);
    raw
}

#[test]
fn defaults_pass_through_unchanged() {
    let n = normalize(&RawInput::default());
    assert_eq!(n.beds, 24.0);
    assert_eq!(n.occupancy_pct, 92.0);
    assert_eq!(n.alos_days, 4.0);
    assert_eq!(n.vri_per_1000_bed_days, 6.0);
    assert_eq!(n.vri_per_year_override, None);
    assert_eq!(n.gram_neg_pct, 35.0);
    assert_eq!(n.sink_attributable_pct, 10.0);
    assert_eq!(n.effect_pct, 10.0);
    assert_eq!(n.extra_days_per_vri, 5.0);
    assert_eq!(n.cost_per_bed_day, 12_000.0);
    assert_eq!(n.cost_per_vri, 90_000.0);
    assert_eq!(n.pricing_mode, PricingMode::BedDays);
    assert_eq!(n.capex, 350_000.0);
    assert_eq!(n.opex_year, 25_000.0);
    assert_eq!(n.capex_amort_years, 5.0);
}

#[test]
fn text_with_decimal_comma_and_spaces() {
    assert_eq!(parse_number(&" 4,5 ".into()), 4.5);
    assert_eq!(parse_number(&"12 000".into()), 12_000.0);
    assert_eq!(parse_number(&"12\u{a0}000,25".into()), 12_000.25);
    assert_eq!(parse_number(&"1e3".into()), 1000.0);
}

#[test]
fn unparseable_text_is_nan() {
    assert!(parse_number(&"".into()).is_nan());
    assert!(parse_number(&"abc".into()).is_nan());
    assert!(parse_number(&"12kr".into()).is_nan());
    assert!(parse_number(&"1,2,3".into()).is_nan());
}

#[test]
fn clamp_maps_nan_to_lower_bound() {
    assert_eq!(clamp(f64::NAN, 1.0, 20.0), 1.0);
    assert_eq!(clamp(-3.0, 0.0, 100.0), 0.0);
    assert_eq!(clamp(250.0, 0.0, 100.0), 100.0);
    assert_eq!(clamp(f64::INFINITY, 0.0, 100.0), 100.0);
    assert_eq!(clamp(f64::NEG_INFINITY, 0.0, 100.0), 0.0);
    assert_eq!(clamp(42.0, 0.0, 100.0), 42.0);
}

#[test]
fn out_of_range_values_are_clamped_per_field() {
    assert_eq!(normalize(&raw_with(Field::Beds, RawValue::Number(5000.0))).beds, 2000.0);
    assert_eq!(
        normalize(&raw_with(Field::OccupancyPct, "140".into())).occupancy_pct,
        100.0
    );
    assert_eq!(
        normalize(&raw_with(Field::CostPerVri, RawValue::Number(2e7))).cost_per_vri,
        10_000_000.0
    );
    assert_eq!(
        normalize(&raw_with(Field::CapexAmortYears, RawValue::Number(0.0))).capex_amort_years,
        1.0
    );
    assert_eq!(
        normalize(&raw_with(Field::CapexAmortYears, "25".into())).capex_amort_years,
        20.0
    );
}

#[test]
fn garbage_text_falls_to_lower_bound() {
    assert_eq!(normalize(&raw_with(Field::Beds, "many".into())).beds, 0.0);
    assert_eq!(
        normalize(&raw_with(Field::CapexAmortYears, "".into())).capex_amort_years,
        1.0
    );
    assert_eq!(normalize(&raw_with(Field::Capex, f64::NAN.into())).capex, 0.0);
}

#[test]
fn override_is_kept_verbatim_but_not_clamped() {
    let n = normalize(&raw_with(Field::VriPerYearOverride, "-4".into()));
    assert_eq!(n.vri_per_year_override, Some(-4.0));
    let n = normalize(&raw_with(Field::VriPerYearOverride, "0".into()));
    assert_eq!(n.vri_per_year_override, Some(0.0));
    let n = normalize(&raw_with(Field::VriPerYearOverride, RawValue::Number(1e9)));
    assert_eq!(n.vri_per_year_override, Some(1e9));
}

#[test]
fn override_unset_when_blank_or_unparseable() {
    let n = normalize(&raw_with(Field::VriPerYearOverride, "".into()));
    assert_eq!(n.vri_per_year_override, None);
    let mut raw = RawInput::default();
    raw.vri_per_year_override = Some("n/a".into());
    assert_eq!(normalize(&raw).vri_per_year_override, None);
}

#[test]
fn pricing_mode_passes_through() {
    let raw = RawInput {
        pricing_mode: PricingMode::PerVri,
        ..RawInput::default()
    };
    assert_eq!(normalize(&raw).pricing_mode, PricingMode::PerVri);
}

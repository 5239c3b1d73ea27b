//! 입력 정규화. 어떤 입력이든 실패 없이 범위 안의 숫자로 바꾼다.

use super::params::{Field, NormalizedInput, RawInput, RawValue};

/// 원시 값을 숫자로 해석한다. 해석할 수 없으면 NaN.
///
/// 텍스트는 모든 공백을 제거하고 첫 소수점 쉼표를 점으로 바꾼 뒤 파싱한다.
pub fn parse_number(value: &RawValue) -> f64 {
    match value {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => {
            let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
            let normalized = compact.replacen(',', ".", 1);
            if normalized.is_empty() {
                return f64::NAN;
            }
            normalized.parse::<f64>().unwrap_or(f64::NAN)
        }
    }
}

/// NaN이면 하한, 아니면 [lo, hi]로 제한한다.
pub fn clamp(n: f64, lo: f64, hi: f64) -> f64 {
    if n.is_nan() {
        lo
    } else {
        hi.min(lo.max(n))
    }
}

fn bounded(raw: &RawInput, field: Field) -> f64 {
    let value = raw.get(field).map(parse_number).unwrap_or(f64::NAN);
    match field.bounds() {
        Some((lo, hi)) => clamp(value, lo, hi),
        None => value,
    }
}

/// 원시 입력 전체를 정규화한다.
pub fn normalize(raw: &RawInput) -> NormalizedInput {
    let vri_per_year_override = raw
        .vri_per_year_override
        .as_ref()
        .map(parse_number)
        .filter(|v| !v.is_nan());

    NormalizedInput {
        beds: bounded(raw, Field::Beds),
        occupancy_pct: bounded(raw, Field::OccupancyPct),
        alos_days: bounded(raw, Field::AlosDays),
        vri_per_1000_bed_days: bounded(raw, Field::VriPer1000BedDays),
        vri_per_year_override,
        gram_neg_pct: bounded(raw, Field::GramNegPct),
        sink_attributable_pct: bounded(raw, Field::SinkAttributablePct),
        effect_pct: bounded(raw, Field::EffectPct),
        extra_days_per_vri: bounded(raw, Field::ExtraDaysPerVri),
        cost_per_bed_day: bounded(raw, Field::CostPerBedDay),
        cost_per_vri: bounded(raw, Field::CostPerVri),
        pricing_mode: raw.pricing_mode,
        capex: bounded(raw, Field::Capex),
        opex_year: bounded(raw, Field::OpexYear),
        capex_amort_years: bounded(raw, Field::CapexAmortYears),
    }
}

use serde::{Deserialize, Serialize};

use super::params::{NormalizedInput, PricingMode};

const DAYS_PER_YEAR: f64 = 365.0;

/// 계산 결과. 입력이 같으면 항상 같은 값이 나온다.
///
/// NaN 필드는 "현재 입력에서 정의되지 않음"을 뜻하며 표시할 때는 `–`로 바꾼다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// 연간 병상일수
    pub bed_days: f64,
    /// 적용된 연간 감염 건수
    pub vri: f64,
    /// 역산한 1000 병상일당 감염률
    pub vri_per_1000: f64,
    /// 그람음성균 감염 건수
    pub gram_neg: f64,
    /// 그 중 세면대 기인 건수
    pub sink_gram_neg: f64,
    /// 예방된 감염 건수
    pub avoided: f64,
    /// 절감 병상일수
    pub saved_bed_days: f64,
    /// 연간 절감액 [SEK]
    #[serde(rename = "savedSEK")]
    pub saved_sek: f64,
    /// 연간 비용 (CAPEX 상각분 + OPEX) [SEK]
    pub annual_cost: f64,
    pub net: f64,
    pub roi: f64,
    /// 단순 회수기간 [년]. 절감액이 OPEX 이하이면 NaN.
    pub payback_years: f64,
    pub used_override: bool,
    /// 감염률로 추정한 연간 감염 건수
    pub vri_from_rate: f64,
}

/// 정규화된 입력으로 모든 지표를 계산한다.
pub fn calculate(input: &NormalizedInput) -> ProjectionResult {
    let occupancy = (input.occupancy_pct / 100.0).clamp(0.0, 1.0);
    let bed_days = input.beds * DAYS_PER_YEAR * occupancy;

    let vri_from_rate = (input.vri_per_1000_bed_days / 1000.0) * bed_days;
    let (vri, used_override) = match input.vri_per_year_override {
        Some(v) if v.is_finite() && v > 0.0 => (v, true),
        _ => (vri_from_rate, false),
    };

    let gram_neg = vri * input.gram_neg_pct / 100.0;
    let sink_gram_neg = gram_neg * input.sink_attributable_pct / 100.0;
    let avoided = sink_gram_neg * input.effect_pct / 100.0;
    let saved_bed_days = avoided * input.extra_days_per_vri;

    let saved_sek = match input.pricing_mode {
        PricingMode::PerVri => avoided * input.cost_per_vri,
        PricingMode::BedDays => saved_bed_days * input.cost_per_bed_day,
    };

    let annualized_capex = if input.capex_amort_years > 0.0 {
        input.capex / input.capex_amort_years
    } else {
        input.capex
    };
    let annual_cost = annualized_capex + input.opex_year;

    let net = saved_sek - annual_cost;
    let roi = if annual_cost > 0.0 {
        net / annual_cost
    } else {
        f64::NAN
    };

    // CAPEX는 연간 절감액이 OPEX를 넘을 때만 회수 가능
    let payback_years = if saved_sek > input.opex_year {
        input.capex / (saved_sek - input.opex_year).max(1.0)
    } else {
        f64::NAN
    };

    let vri_per_1000 = if bed_days > 0.0 {
        (vri / bed_days) * 1000.0
    } else {
        f64::NAN
    };

    ProjectionResult {
        bed_days,
        vri,
        vri_per_1000,
        gram_neg,
        sink_gram_neg,
        avoided,
        saved_bed_days,
        saved_sek,
        annual_cost,
        net,
        roi,
        payback_years,
        used_override,
        vri_from_rate,
    }
}

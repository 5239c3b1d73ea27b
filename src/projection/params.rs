use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::i18n::keys;

/// 사용자가 입력한 원시 값. 텍스트 또는 숫자 그대로 보관한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(f64),
}

impl RawValue {
    /// 입력창에 다시 표시할 문자열.
    pub fn display_text(&self) -> String {
        match self {
            RawValue::Text(s) => s.clone(),
            RawValue::Number(n) => n.to_string(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// 절감액 산정 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PricingMode {
    /// 절감 병상일수 × 병상일 단가
    #[default]
    #[serde(rename = "bedDays")]
    BedDays,
    /// 예방된 감염 건수 × 감염 1건당 비용
    #[serde(rename = "perVRI")]
    PerVri,
}

impl PricingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingMode::BedDays => "bedDays",
            PricingMode::PerVri => "perVRI",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            PricingMode::BedDays => keys::PRICING_BED_DAYS,
            PricingMode::PerVri => keys::PRICING_PER_VRI,
        }
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beddays" | "bed-days" | "bed_days" => Ok(PricingMode::BedDays),
            "pervri" | "per-vri" | "per_vri" => Ok(PricingMode::PerVri),
            other => Err(other.to_string()),
        }
    }
}

/// 입력 필드 목록. 키는 외부(CLI, 보고서)에 노출되는 이름이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Beds,
    OccupancyPct,
    AlosDays,
    VriPer1000BedDays,
    VriPerYearOverride,
    GramNegPct,
    SinkAttributablePct,
    EffectPct,
    ExtraDaysPerVri,
    CostPerBedDay,
    CostPerVri,
    Capex,
    OpexYear,
    CapexAmortYears,
}

impl Field {
    /// 화면/보고서 표시 순서.
    pub const ALL: [Field; 14] = [
        Field::Beds,
        Field::OccupancyPct,
        Field::AlosDays,
        Field::VriPer1000BedDays,
        Field::VriPerYearOverride,
        Field::GramNegPct,
        Field::SinkAttributablePct,
        Field::EffectPct,
        Field::ExtraDaysPerVri,
        Field::CostPerBedDay,
        Field::CostPerVri,
        Field::Capex,
        Field::OpexYear,
        Field::CapexAmortYears,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Beds => "beds",
            Field::OccupancyPct => "occupancyPct",
            Field::AlosDays => "alosDays",
            Field::VriPer1000BedDays => "vriPer1000BedDays",
            Field::VriPerYearOverride => "vriPerYearOverride",
            Field::GramNegPct => "gramNegPct",
            Field::SinkAttributablePct => "sinkAttributablePct",
            Field::EffectPct => "effectPct",
            Field::ExtraDaysPerVri => "extraDaysPerVRI",
            Field::CostPerBedDay => "costPerBedDay",
            Field::CostPerVri => "costPerVRI",
            Field::Capex => "capex",
            Field::OpexYear => "opexYear",
            Field::CapexAmortYears => "capexAmortYears",
        }
    }

    /// 키 문자열로 필드를 찾는다. 대소문자, `-`/`_` 구분자는 무시한다.
    pub fn from_key(key: &str) -> Option<Field> {
        let wanted: String = key
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        Field::ALL
            .into_iter()
            .find(|f| f.key().to_lowercase() == wanted)
    }

    /// 정규화 시 적용되는 (하한, 상한). 덮어쓰기 값은 범위 제한이 없으므로 None.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let b = match self {
            Field::Beds => (0.0, 2000.0),
            Field::OccupancyPct => (0.0, 100.0),
            Field::AlosDays => (0.0, 365.0),
            Field::VriPer1000BedDays => (0.0, 200.0),
            Field::VriPerYearOverride => return None,
            Field::GramNegPct | Field::SinkAttributablePct | Field::EffectPct => (0.0, 100.0),
            Field::ExtraDaysPerVri => (0.0, 365.0),
            Field::CostPerBedDay => (0.0, 1_000_000.0),
            Field::CostPerVri => (0.0, 10_000_000.0),
            Field::Capex | Field::OpexYear => (0.0, 100_000_000.0),
            Field::CapexAmortYears => (1.0, 20.0),
        };
        Some(b)
    }

    /// 화면 라벨 번역 키.
    pub fn label_key(&self) -> &'static str {
        match self {
            Field::Beds => keys::FIELD_BEDS,
            Field::OccupancyPct => keys::FIELD_OCCUPANCY,
            Field::AlosDays => keys::FIELD_ALOS,
            Field::VriPer1000BedDays => keys::FIELD_VRI_RATE,
            Field::VriPerYearOverride => keys::FIELD_VRI_OVERRIDE,
            Field::GramNegPct => keys::FIELD_GRAM_NEG,
            Field::SinkAttributablePct => keys::FIELD_SINK,
            Field::EffectPct => keys::FIELD_EFFECT,
            Field::ExtraDaysPerVri => keys::FIELD_EXTRA_DAYS,
            Field::CostPerBedDay => keys::FIELD_COST_BED_DAY,
            Field::CostPerVri => keys::FIELD_COST_VRI,
            Field::Capex => keys::FIELD_CAPEX,
            Field::OpexYear => keys::FIELD_OPEX,
            Field::CapexAmortYears => keys::FIELD_AMORT,
        }
    }

    /// 0~100 범위의 백분율 필드인지 여부 (GUI 슬라이더 대상).
    pub fn is_percent(&self) -> bool {
        matches!(
            self,
            Field::OccupancyPct
                | Field::GramNegPct
                | Field::SinkAttributablePct
                | Field::EffectPct
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 사용자가 입력한 그대로의 파라미터 묶음.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInput {
    pub beds: RawValue,
    pub occupancy_pct: RawValue,
    pub alos_days: RawValue,
    pub vri_per_1000_bed_days: RawValue,
    /// None = 빈칸
    pub vri_per_year_override: Option<RawValue>,
    pub gram_neg_pct: RawValue,
    pub sink_attributable_pct: RawValue,
    pub effect_pct: RawValue,
    #[serde(rename = "extraDaysPerVRI")]
    pub extra_days_per_vri: RawValue,
    pub cost_per_bed_day: RawValue,
    #[serde(rename = "costPerVRI")]
    pub cost_per_vri: RawValue,
    pub pricing_mode: PricingMode,
    pub capex: RawValue,
    pub opex_year: RawValue,
    pub capex_amort_years: RawValue,
}

impl Default for RawInput {
    fn default() -> Self {
        Self {
            beds: RawValue::Number(24.0),
            occupancy_pct: RawValue::Number(92.0),
            alos_days: RawValue::Number(4.0),
            vri_per_1000_bed_days: RawValue::Number(6.0),
            vri_per_year_override: None,
            gram_neg_pct: RawValue::Number(35.0),
            sink_attributable_pct: RawValue::Number(10.0),
            effect_pct: RawValue::Number(10.0),
            extra_days_per_vri: RawValue::Number(5.0),
            cost_per_bed_day: RawValue::Number(12_000.0),
            cost_per_vri: RawValue::Number(90_000.0),
            pricing_mode: PricingMode::BedDays,
            capex: RawValue::Number(350_000.0),
            opex_year: RawValue::Number(25_000.0),
            capex_amort_years: RawValue::Number(5.0),
        }
    }
}

impl RawInput {
    /// 필드 값을 조회한다. 덮어쓰기 필드가 비어 있으면 None.
    pub fn get(&self, field: Field) -> Option<&RawValue> {
        let v = match field {
            Field::Beds => &self.beds,
            Field::OccupancyPct => &self.occupancy_pct,
            Field::AlosDays => &self.alos_days,
            Field::VriPer1000BedDays => &self.vri_per_1000_bed_days,
            Field::VriPerYearOverride => return self.vri_per_year_override.as_ref(),
            Field::GramNegPct => &self.gram_neg_pct,
            Field::SinkAttributablePct => &self.sink_attributable_pct,
            Field::EffectPct => &self.effect_pct,
            Field::ExtraDaysPerVri => &self.extra_days_per_vri,
            Field::CostPerBedDay => &self.cost_per_bed_day,
            Field::CostPerVri => &self.cost_per_vri,
            Field::Capex => &self.capex,
            Field::OpexYear => &self.opex_year,
            Field::CapexAmortYears => &self.capex_amort_years,
        };
        Some(v)
    }

    /// 필드 값을 교체한다. 덮어쓰기 필드에 빈 텍스트를 넣으면 미설정으로 되돌린다.
    pub fn set(&mut self, field: Field, value: RawValue) {
        let slot = match field {
            Field::Beds => &mut self.beds,
            Field::OccupancyPct => &mut self.occupancy_pct,
            Field::AlosDays => &mut self.alos_days,
            Field::VriPer1000BedDays => &mut self.vri_per_1000_bed_days,
            Field::VriPerYearOverride => {
                self.vri_per_year_override = match value {
                    RawValue::Text(ref s) if s.trim().is_empty() => None,
                    other => Some(other),
                };
                return;
            }
            Field::GramNegPct => &mut self.gram_neg_pct,
            Field::SinkAttributablePct => &mut self.sink_attributable_pct,
            Field::EffectPct => &mut self.effect_pct,
            Field::ExtraDaysPerVri => &mut self.extra_days_per_vri,
            Field::CostPerBedDay => &mut self.cost_per_bed_day,
            Field::CostPerVri => &mut self.cost_per_vri,
            Field::Capex => &mut self.capex,
            Field::OpexYear => &mut self.opex_year,
            Field::CapexAmortYears => &mut self.capex_amort_years,
        };
        *slot = value;
    }

    /// 입력창 표시용 문자열. 빈 덮어쓰기는 빈 문자열.
    pub fn text_of(&self, field: Field) -> String {
        self.get(field).map(RawValue::display_text).unwrap_or_default()
    }
}

/// 정규화가 끝난 파라미터. 계산 엔진의 입력 계약이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedInput {
    pub beds: f64,
    pub occupancy_pct: f64,
    /// 평균 재원일수. 계산식에는 쓰이지 않는다.
    pub alos_days: f64,
    pub vri_per_1000_bed_days: f64,
    /// 연간 감염 건수 직접 입력. 양수이며 유한할 때만 적용된다.
    pub vri_per_year_override: Option<f64>,
    pub gram_neg_pct: f64,
    pub sink_attributable_pct: f64,
    pub effect_pct: f64,
    #[serde(rename = "extraDaysPerVRI")]
    pub extra_days_per_vri: f64,
    pub cost_per_bed_day: f64,
    #[serde(rename = "costPerVRI")]
    pub cost_per_vri: f64,
    pub pricing_mode: PricingMode,
    pub capex: f64,
    pub opex_year: f64,
    pub capex_amort_years: f64,
}

impl NormalizedInput {
    /// 범위가 있는 필드의 값을 조회한다. 덮어쓰기 필드는 미설정이면 NaN.
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Beds => self.beds,
            Field::OccupancyPct => self.occupancy_pct,
            Field::AlosDays => self.alos_days,
            Field::VriPer1000BedDays => self.vri_per_1000_bed_days,
            Field::VriPerYearOverride => self.vri_per_year_override.unwrap_or(f64::NAN),
            Field::GramNegPct => self.gram_neg_pct,
            Field::SinkAttributablePct => self.sink_attributable_pct,
            Field::EffectPct => self.effect_pct,
            Field::ExtraDaysPerVri => self.extra_days_per_vri,
            Field::CostPerBedDay => self.cost_per_bed_day,
            Field::CostPerVri => self.cost_per_vri,
            Field::Capex => self.capex,
            Field::OpexYear => self.opex_year,
            Field::CapexAmortYears => self.capex_amort_years,
        }
    }
}

/// 효과(effectPct)만 미리 채우는 시나리오 프리셋.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioPreset {
    Conservative,
    Low,
    Ambitious,
}

impl ScenarioPreset {
    pub const ALL: [ScenarioPreset; 3] = [
        ScenarioPreset::Conservative,
        ScenarioPreset::Low,
        ScenarioPreset::Ambitious,
    ];

    pub fn effect_pct(&self) -> f64 {
        match self {
            ScenarioPreset::Conservative => 5.0,
            ScenarioPreset::Low => 10.0,
            ScenarioPreset::Ambitious => 20.0,
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            ScenarioPreset::Conservative => keys::PRESET_CONSERVATIVE,
            ScenarioPreset::Low => keys::PRESET_LOW,
            ScenarioPreset::Ambitious => keys::PRESET_AMBITIOUS,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ScenarioPreset::Conservative => "conservative",
            ScenarioPreset::Low => "low",
            ScenarioPreset::Ambitious => "ambitious",
        }
    }

    /// effectPct만 프리셋 값으로 바꾼다. 다른 필드는 건드리지 않는다.
    pub fn apply(&self, raw: &mut RawInput) {
        raw.effect_pct = RawValue::Number(self.effect_pct());
    }

    /// 현재 효과 값과 일치하는 프리셋을 찾는다.
    pub fn matching(effect_pct: f64) -> Option<ScenarioPreset> {
        ScenarioPreset::ALL
            .into_iter()
            .find(|p| (p.effect_pct() - effect_pct).abs() < 1e-9)
    }
}

impl FromStr for ScenarioPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ScenarioPreset::ALL
            .into_iter()
            .find(|p| p.key() == wanted)
            .ok_or(wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keys_resolve_case_insensitively() {
        assert_eq!(Field::from_key("costPerVRI"), Some(Field::CostPerVri));
        assert_eq!(Field::from_key("cost-per-vri"), Some(Field::CostPerVri));
        assert_eq!(Field::from_key("OPEX_YEAR"), Some(Field::OpexYear));
        assert_eq!(Field::from_key("unknown"), None);
        for f in Field::ALL {
            assert_eq!(Field::from_key(f.key()), Some(f));
        }
    }

    #[test]
    fn override_blank_text_unsets() {
        let mut raw = RawInput::default();
        raw.set(Field::VriPerYearOverride, "12".into());
        assert_eq!(raw.vri_per_year_override, Some(RawValue::Text("12".into())));
        raw.set(Field::VriPerYearOverride, "  ".into());
        assert_eq!(raw.vri_per_year_override, None);
        assert_eq!(raw.text_of(Field::VriPerYearOverride), "");
    }

    #[test]
    fn preset_touches_only_effect() {
        let mut raw = RawInput::default();
        ScenarioPreset::Ambitious.apply(&mut raw);
        let mut expected = RawInput::default();
        expected.effect_pct = RawValue::Number(20.0);
        assert_eq!(raw, expected);
        assert_eq!(ScenarioPreset::matching(10.0), Some(ScenarioPreset::Low));
        assert_eq!(ScenarioPreset::matching(12.5), None);
    }

    #[test]
    fn pricing_mode_parses_aliases() {
        assert_eq!("perVRI".parse::<PricingMode>(), Ok(PricingMode::PerVri));
        assert_eq!("bed-days".parse::<PricingMode>(), Ok(PricingMode::BedDays));
        assert!("blended".parse::<PricingMode>().is_err());
    }
}

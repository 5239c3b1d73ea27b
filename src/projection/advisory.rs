use serde::Serialize;

use super::engine::ProjectionResult;
use super::params::{NormalizedInput, PricingMode};
use crate::i18n::{keys, Translator};

/// 보수적인 가정으로 간주하는 백분율 상한(포함).
pub const CONSERVATIVE_PCT: f64 = 5.0;

/// 비정상적이거나 극단적인 입력 조합에 대한 주의 문구.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Advisory {
    /// 감염률 0, 덮어쓰기 없음 → 감염 건수 0
    ZeroInfectionRate,
    /// 세면대 기인 비율이 매우 낮음
    LowAttribution,
    /// 효과 가정이 매우 낮음
    LowEffect,
    /// 병상일 방식인데 병상일 단가 0
    ZeroBedDayCost,
    /// 감염 건당 방식인데 건당 비용 0
    ZeroVriCost,
}

impl Advisory {
    pub fn key(&self) -> &'static str {
        match self {
            Advisory::ZeroInfectionRate => keys::ADVISORY_ZERO_RATE,
            Advisory::LowAttribution => keys::ADVISORY_LOW_ATTRIBUTION,
            Advisory::LowEffect => keys::ADVISORY_LOW_EFFECT,
            Advisory::ZeroBedDayCost => keys::ADVISORY_ZERO_BED_DAY_COST,
            Advisory::ZeroVriCost => keys::ADVISORY_ZERO_VRI_COST,
        }
    }

    /// 현재 언어의 문구.
    pub fn message<'a>(&self, tr: &'a Translator) -> &'a str {
        tr.t(self.key())
    }
}

/// 규칙을 선언 순서대로 평가한다. 해당하는 규칙은 모두 추가된다.
pub fn evaluate(input: &NormalizedInput, result: &ProjectionResult) -> Vec<Advisory> {
    let rules: [(bool, Advisory); 5] = [
        (
            input.vri_per_1000_bed_days == 0.0 && !result.used_override,
            Advisory::ZeroInfectionRate,
        ),
        (
            input.sink_attributable_pct <= CONSERVATIVE_PCT,
            Advisory::LowAttribution,
        ),
        (input.effect_pct <= CONSERVATIVE_PCT, Advisory::LowEffect),
        (
            input.pricing_mode == PricingMode::BedDays && input.cost_per_bed_day == 0.0,
            Advisory::ZeroBedDayCost,
        ),
        (
            input.pricing_mode == PricingMode::PerVri && input.cost_per_vri == 0.0,
            Advisory::ZeroVriCost,
        ),
    ];
    rules
        .into_iter()
        .filter_map(|(fires, advisory)| fires.then_some(advisory))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_text_comes_from_language_pack() {
        let en = Translator::new("en-us");
        let sv = Translator::new("sv-se");
        for advisory in [
            Advisory::ZeroInfectionRate,
            Advisory::LowAttribution,
            Advisory::LowEffect,
            Advisory::ZeroBedDayCost,
            Advisory::ZeroVriCost,
        ] {
            assert_eq!(advisory.message(&en), en.t(advisory.key()));
            assert_ne!(advisory.message(&en), advisory.message(&sv));
        }
    }
}

use serde::Serialize;
use tracing::debug;

use super::advisory::{self, Advisory};
use super::engine::{self, ProjectionResult};
use super::normalize;
use super::params::{NormalizedInput, RawInput};

/// 한 번의 평가 사이클 스냅샷. 보고서와 화면은 이것만 읽는다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub raw: RawInput,
    pub input: NormalizedInput,
    pub result: ProjectionResult,
    pub advisories: Vec<Advisory>,
}

/// 정규화 → 계산 → 주의 규칙 평가를 순서대로 수행한다.
pub fn run(raw: &RawInput) -> Evaluation {
    let input = normalize::normalize(raw);
    let result = engine::calculate(&input);
    let advisories = advisory::evaluate(&input, &result);
    debug!(
        vri = result.vri,
        avoided = result.avoided,
        saved_sek = result.saved_sek,
        net = result.net,
        advisories = advisories.len(),
        "projection evaluated"
    );
    Evaluation {
        raw: raw.clone(),
        input,
        result,
        advisories,
    }
}

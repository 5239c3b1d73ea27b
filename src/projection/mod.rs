//! 병원 세면대 위생 투자에 대한 감염/비용 예측 계산 모듈 모음.
//! 입력 정규화, 계산 엔진, 주의 규칙 평가로 구성한다.

pub mod advisory;
pub mod engine;
pub mod normalize;
pub mod params;
pub mod pipeline;

pub use advisory::{evaluate, Advisory};
pub use engine::{calculate, ProjectionResult};
pub use normalize::normalize;
pub use params::*;
pub use pipeline::{run, Evaluation};

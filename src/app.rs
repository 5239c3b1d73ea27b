use thiserror::Error;
use tracing::info;

use crate::config::{Config, ConfigError};
use crate::i18n::{self, keys, Translator};
use crate::projection::{self, Field, RawInput, RawValue};
use crate::report::{self, ReportError};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("report error: {0}")]
    Report(#[from] ReportError),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("expected key=value, got: {0}")]
    InvalidAssignment(String),
    #[error("unknown pricing mode: {0} (expected bedDays or perVRI)")]
    InvalidPricingMode(String),
    #[error("unknown scenario preset: {0} (expected conservative, low or ambitious)")]
    InvalidPreset(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// `key=value` 형식의 값을 입력에 반영한다. 값은 텍스트 그대로 보관해 정규화에 맡긴다.
pub fn apply_assignment(raw: &mut RawInput, assignment: &str) -> Result<(), AppError> {
    let (key, value) = assignment
        .split_once('=')
        .ok_or_else(|| AppError::InvalidAssignment(assignment.to_string()))?;
    let key = key.trim();
    if key.eq_ignore_ascii_case("pricingMode") {
        raw.pricing_mode = value.parse().map_err(AppError::InvalidPricingMode)?;
        return Ok(());
    }
    let field = Field::from_key(key).ok_or_else(|| AppError::UnknownField(key.to_string()))?;
    raw.set(field, RawValue::Text(value.to_string()));
    Ok(())
}

/// 설정에서 번역기를 만든다.
pub fn translator_for(config: &Config, cli_lang: &str) -> Translator {
    let code = i18n::resolve_language(cli_lang, Some(config.language.as_str()));
    Translator::new_with_pack(&code, config.language_pack_dir.as_deref())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &mut Translator) -> Result<(), AppError> {
    let mut raw = RawInput {
        pricing_mode: config.pricing_mode,
        ..RawInput::default()
    };
    ui_cli::print_evaluation(&projection::run(&raw), tr);
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::EditParameter => ui_cli::handle_edit(tr, &mut raw)?,
            MenuChoice::ScenarioPreset => ui_cli::handle_preset(tr, &mut raw)?,
            MenuChoice::PricingMode => ui_cli::handle_pricing(tr, &mut raw)?,
            MenuChoice::ShowResult => {}
            MenuChoice::ExportReport => {
                let path = ui_cli::handle_export(tr, config, &projection::run(&raw))?;
                info!(path = %path.display(), "report written from interactive session");
            }
            MenuChoice::Reset => {
                raw = RawInput {
                    pricing_mode: config.pricing_mode,
                    ..RawInput::default()
                };
                println!("{}", tr.t(keys::RESET_DONE));
            }
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
                *tr = translator_for(config, "auto");
                println!("{}", tr.t(keys::SETTINGS_SAVED));
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
        // 입력이 바뀔 때마다 전체 파이프라인을 다시 돌린다
        ui_cli::print_evaluation(&projection::run(&raw), tr);
    }
    Ok(())
}

use std::io::{self, Write};
use std::path::PathBuf;

use crate::app::AppError;
use crate::config::Config;
use crate::format;
use crate::i18n::{keys, Translator};
use crate::projection::{Evaluation, Field, PricingMode, RawInput, RawValue, ScenarioPreset};
use crate::report;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    EditParameter,
    ScenarioPreset,
    PricingMode,
    ShowResult,
    ExportReport,
    Reset,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_EDIT,
        keys::MAIN_MENU_PRESET,
        keys::MAIN_MENU_PRICING,
        keys::MAIN_MENU_RESULT,
        keys::MAIN_MENU_EXPORT,
        keys::MAIN_MENU_RESET,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::EditParameter),
            "2" => return Ok(MenuChoice::ScenarioPreset),
            "3" => return Ok(MenuChoice::PricingMode),
            "4" => return Ok(MenuChoice::ShowResult),
            "5" => return Ok(MenuChoice::ExportReport),
            "6" => return Ok(MenuChoice::Reset),
            "7" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 파라미터 하나를 골라 새 값을 입력받는다.
pub fn handle_edit(tr: &Translator, raw: &mut RawInput) -> Result<(), AppError> {
    println!("{}", tr.t(keys::EDIT_HEADING));
    for (i, field) in Field::ALL.iter().enumerate() {
        let range = field
            .bounds()
            .map(|(lo, hi)| format!(" [{lo}..{hi}]"))
            .unwrap_or_default();
        println!(
            "{:>2}) {}: {}{range}",
            i + 1,
            tr.t(field.label_key()),
            raw.text_of(*field)
        );
    }
    println!("{}", tr.t(keys::EDIT_OVERRIDE_HINT));
    let field = loop {
        let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
        match sel.trim().parse::<usize>() {
            Ok(n) if (1..=Field::ALL.len()).contains(&n) => break Field::ALL[n - 1],
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    };
    let value = read_line(tr.t(keys::PROMPT_FIELD_VALUE))?;
    raw.set(field, RawValue::Text(value.trim().to_string()));
    Ok(())
}

/// 시나리오 프리셋으로 효과 값을 채운다.
pub fn handle_preset(tr: &Translator, raw: &mut RawInput) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PRESET_HEADING));
    for (i, preset) in ScenarioPreset::ALL.iter().enumerate() {
        println!("{}) {} ({} %)", i + 1, tr.t(preset.label_key()), preset.effect_pct());
    }
    let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
    let preset = match sel.trim() {
        "1" => ScenarioPreset::Conservative,
        "2" => ScenarioPreset::Low,
        "3" => ScenarioPreset::Ambitious,
        _ => {
            println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
            return Ok(());
        }
    };
    preset.apply(raw);
    println!(
        "{}",
        tr.tf(keys::PRESET_APPLIED, &[("effect", preset.effect_pct().to_string())])
    );
    Ok(())
}

/// 절감액 산정 방식을 선택한다.
pub fn handle_pricing(tr: &Translator, raw: &mut RawInput) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PRICING_HEADING));
    println!("1) {}", tr.t(keys::PRICING_BED_DAYS));
    println!("2) {}", tr.t(keys::PRICING_PER_VRI));
    let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "1" => raw.pricing_mode = PricingMode::BedDays,
        "2" => raw.pricing_mode = PricingMode::PerVri,
        _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
    }
    Ok(())
}

/// 보고서 파일명을 입력받아 저장하고, 저장 경로를 돌려준다.
pub fn handle_export(
    tr: &Translator,
    cfg: &Config,
    eval: &Evaluation,
) -> Result<PathBuf, AppError> {
    let name = read_line(tr.t(keys::PROMPT_REPORT_PATH))?;
    let name = match name.trim() {
        "" => "report.md",
        other => other,
    };
    let path = cfg.report_path(name);
    report::export(&path, eval, tr)?;
    println!(
        "{}",
        tr.tf(keys::EXPORT_DONE, &[("path", path.display().to_string())])
    );
    Ok(path)
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {} ({})",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        cfg.language,
        tr.language_code()
    );
    let sel = read_line(tr.t(keys::PROMPT_LANGUAGE))?;
    if !sel.trim().is_empty() {
        cfg.language = sel.trim().to_string();
    }
    Ok(())
}

/// 결과와 주의 문구를 출력한다.
pub fn print_evaluation(eval: &Evaluation, tr: &Translator) {
    let lang = tr.language();
    let r = &eval.result;
    println!("{}", tr.t(keys::RESULT_HEADING));
    let source = if r.used_override {
        tr.t(keys::RESULT_VRI_SOURCE_OVERRIDE)
    } else {
        tr.t(keys::RESULT_VRI_SOURCE_RATE)
    };
    let rows = [
        (keys::RESULT_BED_DAYS, format::number(r.bed_days, 1, lang)),
        (
            keys::RESULT_VRI,
            format!("{} {source}", format::number(r.vri, 2, lang)),
        ),
        (keys::RESULT_VRI_PER_1000, format::number(r.vri_per_1000, 2, lang)),
        (keys::RESULT_AVOIDED, format::number(r.avoided, 3, lang)),
        (keys::RESULT_SAVED_BED_DAYS, format::number(r.saved_bed_days, 2, lang)),
        (keys::RESULT_SAVED_SEK, format::currency(r.saved_sek, lang)),
        (keys::RESULT_ANNUAL_COST, format::currency(r.annual_cost, lang)),
        (keys::RESULT_NET, format::currency(r.net, lang)),
        (keys::RESULT_PAYBACK, format::years(r.payback_years, lang)),
    ];
    for (key, value) in &rows {
        println!("  {:<40} {value}", tr.t(key));
    }
    if !eval.advisories.is_empty() {
        println!("{}:", tr.t(keys::ADVISORY_HEADING));
        for advisory in &eval.advisories {
            println!("  ! {}", advisory.message(tr));
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    // 입력 스트림이 닫히면 메뉴 루프를 끝낸다
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

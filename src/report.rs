//! 평가 스냅샷을 출력용 Markdown 문서로 만든다.
//! 스냅샷을 읽기만 하며 계산 파이프라인에 값을 되돌려 주지 않는다.

use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::format;
use crate::i18n::{keys, Translator};
use crate::projection::{Evaluation, Field};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not write report: {0}")]
    Io(#[from] std::io::Error),
}

/// 파라미터 표의 "사용" 열. 덮어쓰기 필드는 적용 여부를 함께 표시한다.
fn used_value(eval: &Evaluation, field: Field, tr: &Translator) -> String {
    let lang = tr.language();
    match field {
        Field::VriPerYearOverride => match eval.input.vri_per_year_override {
            None => tr.t(keys::NOT_SET).to_string(),
            Some(v) if eval.result.used_override => format::number(v, 2, lang),
            Some(v) => format!("{} ({})", format::number(v, 2, lang), tr.t(keys::IGNORED)),
        },
        Field::CostPerBedDay | Field::CostPerVri | Field::Capex | Field::OpexYear => {
            format::currency(eval.input.value(field), lang)
        }
        f if f.is_percent() => format::percent(eval.input.value(f), lang),
        f => format::number(eval.input.value(f), 2, lang),
    }
}

fn entered_value(eval: &Evaluation, field: Field) -> String {
    let text = eval.raw.text_of(field);
    if text.trim().is_empty() {
        format::SENTINEL.to_string()
    } else {
        text.replace('|', "\\|")
    }
}

/// 보고서 본문을 만든다.
pub fn render(eval: &Evaluation, tr: &Translator) -> String {
    let mut out = String::new();
    // String에 쓰는 것은 실패하지 않는다
    let _ = write_doc(&mut out, eval, tr);
    out
}

fn write_doc(out: &mut String, eval: &Evaluation, tr: &Translator) -> fmt::Result {
    let lang = tr.language();
    let r = &eval.result;

    writeln!(out, "# {}\n", tr.t(keys::REPORT_TITLE))?;

    writeln!(out, "## {}\n", tr.t(keys::REPORT_PARAMETERS))?;
    writeln!(
        out,
        "| {} | {} | {} |\n|---|---:|---:|",
        tr.t(keys::REPORT_COL_PARAMETER),
        tr.t(keys::REPORT_COL_ENTERED),
        tr.t(keys::REPORT_COL_USED)
    )?;
    for field in Field::ALL {
        writeln!(
            out,
            "| {} | {} | {} |",
            tr.t(field.label_key()),
            entered_value(eval, field),
            used_value(eval, field, tr)
        )?;
    }
    writeln!(
        out,
        "\n{}: **{}**\n",
        tr.t(keys::REPORT_PRICING_MODE),
        tr.t(eval.input.pricing_mode.label_key())
    )?;

    let vri_source = if r.used_override {
        tr.t(keys::RESULT_VRI_SOURCE_OVERRIDE)
    } else {
        tr.t(keys::RESULT_VRI_SOURCE_RATE)
    };
    let rows = [
        (keys::RESULT_BED_DAYS, format::number(r.bed_days, 1, lang)),
        (
            keys::RESULT_VRI,
            format!("{} {vri_source}", format::number(r.vri, 2, lang)),
        ),
        (keys::RESULT_VRI_PER_1000, format::number(r.vri_per_1000, 2, lang)),
        (keys::RESULT_GRAM_NEG, format::number(r.gram_neg, 2, lang)),
        (keys::RESULT_SINK_GRAM_NEG, format::number(r.sink_gram_neg, 3, lang)),
        (keys::RESULT_AVOIDED, format::number(r.avoided, 3, lang)),
        (keys::RESULT_SAVED_BED_DAYS, format::number(r.saved_bed_days, 2, lang)),
        (keys::RESULT_SAVED_SEK, format::currency(r.saved_sek, lang)),
        (keys::RESULT_ANNUAL_COST, format::currency(r.annual_cost, lang)),
        (keys::RESULT_NET, format::currency(r.net, lang)),
        (keys::RESULT_PAYBACK, format::years(r.payback_years, lang)),
    ];
    writeln!(out, "## {}\n", tr.t(keys::REPORT_RESULTS))?;
    writeln!(
        out,
        "| {} | {} |\n|---|---:|",
        tr.t(keys::REPORT_COL_METRIC),
        tr.t(keys::REPORT_COL_VALUE)
    )?;
    for (key, value) in &rows {
        writeln!(out, "| {} | {} |", tr.t(key), value)?;
    }
    if !r.payback_years.is_finite() {
        writeln!(out, "\n_{}_", tr.t(keys::RESULT_PAYBACK_UNDEFINED))?;
    }

    writeln!(out, "\n## {}\n", tr.t(keys::ADVISORY_HEADING))?;
    if eval.advisories.is_empty() {
        writeln!(out, "{}", tr.t(keys::ADVISORY_NONE))?;
    } else {
        for advisory in &eval.advisories {
            writeln!(out, "- {}", advisory.message(tr))?;
        }
    }

    writeln!(out, "\n## {}\n", tr.t(keys::REPORT_FORMULAS))?;
    for key in [
        keys::REPORT_FORMULA_BED_DAYS,
        keys::REPORT_FORMULA_CHAIN,
        keys::REPORT_FORMULA_SAVINGS,
        keys::REPORT_FORMULA_PAYBACK,
    ] {
        writeln!(out, "- {}", tr.t(key))?;
    }
    Ok(())
}

/// 보고서를 파일로 저장한다. 상위 폴더가 없으면 만든다.
pub fn export(path: &Path, eval: &Evaluation, tr: &Translator) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render(eval, tr))?;
    info!(path = %path.display(), "report exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{self, RawInput, RawValue};

    #[test]
    fn default_report_shows_sentinel_for_undefined_payback() {
        let eval = projection::run(&RawInput::default());
        let tr = Translator::new("en-us");
        let doc = render(&eval, &tr);
        assert!(doc.starts_with("# "));
        assert!(doc.contains(tr.t(keys::RESULT_PAYBACK_UNDEFINED)));
        assert!(doc.contains(&format!("| {} | {} |", tr.t(keys::RESULT_PAYBACK), format::SENTINEL)));
        assert!(doc.contains(tr.t(keys::ADVISORY_NONE)));
        assert!(doc.contains("SEK\u{a0}10,155"));
    }

    #[test]
    fn ignored_override_is_labelled() {
        let mut raw = RawInput::default();
        raw.vri_per_year_override = Some(RawValue::Number(0.0));
        let eval = projection::run(&raw);
        let tr = Translator::new("en-us");
        let doc = render(&eval, &tr);
        assert!(doc.contains(&format!("0.00 ({})", tr.t(keys::IGNORED))));
    }

    #[test]
    fn blank_entry_uses_sentinel_and_not_set_label() {
        let eval = projection::run(&RawInput::default());
        let tr = Translator::new("en-us");
        let doc = render(&eval, &tr);
        let row = format!(
            "| {} | {} | {} |",
            tr.t(keys::FIELD_VRI_OVERRIDE),
            format::SENTINEL,
            tr.t(keys::NOT_SET)
        );
        assert!(doc.contains(&row), "{doc}");
        assert!(!doc.contains('—'));
    }

    #[test]
    fn advisories_are_listed_in_order() {
        let mut raw = RawInput::default();
        raw.sink_attributable_pct = RawValue::Number(3.0);
        raw.effect_pct = RawValue::Number(5.0);
        let eval = projection::run(&raw);
        let tr = Translator::new("sv-se");
        let doc = render(&eval, &tr);
        let a = doc.find(tr.t(keys::ADVISORY_LOW_ATTRIBUTION)).unwrap();
        let b = doc.find(tr.t(keys::ADVISORY_LOW_EFFECT)).unwrap();
        assert!(a < b);
    }

    #[test]
    fn export_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.md");
        let eval = projection::run(&RawInput::default());
        export(&path, &eval, &Translator::new("sv")).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("10\u{a0}155\u{a0}kr"));
    }
}

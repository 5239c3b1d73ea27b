use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::warn;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";
    pub const NOT_SET: &str = "general.not_set";
    pub const IGNORED: &str = "general.ignored";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_EDIT: &str = "main_menu.edit";
    pub const MAIN_MENU_PRESET: &str = "main_menu.preset";
    pub const MAIN_MENU_PRICING: &str = "main_menu.pricing";
    pub const MAIN_MENU_RESULT: &str = "main_menu.result";
    pub const MAIN_MENU_EXPORT: &str = "main_menu.export";
    pub const MAIN_MENU_RESET: &str = "main_menu.reset";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_FIELD_VALUE: &str = "prompt.field_value";
    pub const PROMPT_REPORT_PATH: &str = "prompt.report_path";
    pub const PROMPT_LANGUAGE: &str = "prompt.language";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const EDIT_HEADING: &str = "edit.heading";
    pub const EDIT_OVERRIDE_HINT: &str = "edit.override_hint";
    pub const PRESET_HEADING: &str = "preset.heading";
    pub const PRESET_APPLIED: &str = "preset.applied";
    pub const PRICING_HEADING: &str = "pricing.heading";
    pub const RESET_DONE: &str = "reset.done";
    pub const EXPORT_DONE: &str = "export.done";
    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const FIELD_BEDS: &str = "field.beds";
    pub const FIELD_OCCUPANCY: &str = "field.occupancy_pct";
    pub const FIELD_ALOS: &str = "field.alos_days";
    pub const FIELD_VRI_RATE: &str = "field.vri_per_1000_bed_days";
    pub const FIELD_VRI_OVERRIDE: &str = "field.vri_per_year_override";
    pub const FIELD_GRAM_NEG: &str = "field.gram_neg_pct";
    pub const FIELD_SINK: &str = "field.sink_attributable_pct";
    pub const FIELD_EFFECT: &str = "field.effect_pct";
    pub const FIELD_EXTRA_DAYS: &str = "field.extra_days_per_vri";
    pub const FIELD_COST_BED_DAY: &str = "field.cost_per_bed_day";
    pub const FIELD_COST_VRI: &str = "field.cost_per_vri";
    pub const FIELD_CAPEX: &str = "field.capex";
    pub const FIELD_OPEX: &str = "field.opex_year";
    pub const FIELD_AMORT: &str = "field.capex_amort_years";

    pub const PRICING_BED_DAYS: &str = "pricing.bed_days";
    pub const PRICING_PER_VRI: &str = "pricing.per_vri";

    pub const PRESET_CONSERVATIVE: &str = "preset.conservative";
    pub const PRESET_LOW: &str = "preset.low";
    pub const PRESET_AMBITIOUS: &str = "preset.ambitious";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_BED_DAYS: &str = "result.bed_days";
    pub const RESULT_VRI: &str = "result.vri";
    pub const RESULT_VRI_SOURCE_OVERRIDE: &str = "result.vri_source_override";
    pub const RESULT_VRI_SOURCE_RATE: &str = "result.vri_source_rate";
    pub const RESULT_VRI_PER_1000: &str = "result.vri_per_1000";
    pub const RESULT_GRAM_NEG: &str = "result.gram_neg";
    pub const RESULT_SINK_GRAM_NEG: &str = "result.sink_gram_neg";
    pub const RESULT_AVOIDED: &str = "result.avoided";
    pub const RESULT_SAVED_BED_DAYS: &str = "result.saved_bed_days";
    pub const RESULT_SAVED_SEK: &str = "result.saved_sek";
    pub const RESULT_ANNUAL_COST: &str = "result.annual_cost";
    pub const RESULT_NET: &str = "result.net";
    pub const RESULT_PAYBACK: &str = "result.payback";
    pub const RESULT_PAYBACK_UNDEFINED: &str = "result.payback_undefined";

    pub const ADVISORY_HEADING: &str = "advisory.heading";
    pub const ADVISORY_NONE: &str = "advisory.none";
    pub const ADVISORY_ZERO_RATE: &str = "advisory.zero_rate";
    pub const ADVISORY_LOW_ATTRIBUTION: &str = "advisory.low_attribution";
    pub const ADVISORY_LOW_EFFECT: &str = "advisory.low_effect";
    pub const ADVISORY_ZERO_BED_DAY_COST: &str = "advisory.zero_bed_day_cost";
    pub const ADVISORY_ZERO_VRI_COST: &str = "advisory.zero_vri_cost";

    pub const GUI_TAB_REPORT: &str = "gui.tab_report";
    pub const GUI_RESET: &str = "gui.reset";
    pub const GUI_SETTINGS: &str = "gui.settings";
    pub const GUI_HELP: &str = "gui.help";
    pub const GUI_SAVE: &str = "gui.save";
    pub const GUI_EXPORT: &str = "gui.export";

    pub const REPORT_TITLE: &str = "report.title";
    pub const REPORT_PARAMETERS: &str = "report.parameters";
    pub const REPORT_RESULTS: &str = "report.results";
    pub const REPORT_COL_PARAMETER: &str = "report.col_parameter";
    pub const REPORT_COL_ENTERED: &str = "report.col_entered";
    pub const REPORT_COL_USED: &str = "report.col_used";
    pub const REPORT_COL_METRIC: &str = "report.col_metric";
    pub const REPORT_COL_VALUE: &str = "report.col_value";
    pub const REPORT_PRICING_MODE: &str = "report.pricing_mode";
    pub const REPORT_FORMULAS: &str = "report.formulas";
    pub const REPORT_FORMULA_BED_DAYS: &str = "report.formula_bed_days";
    pub const REPORT_FORMULA_CHAIN: &str = "report.formula_chain";
    pub const REPORT_FORMULA_SAVINGS: &str = "report.formula_savings";
    pub const REPORT_FORMULA_PAYBACK: &str = "report.formula_payback";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Sv,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Sv
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Sv => "sv-se",
            Language::En => "en-us",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    strings: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Translator {
    /// 언어 코드(sv/en)에 따라 내장 언어팩으로 번역기를 생성한다. 알 수 없는 코드는 sv로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self::new_with_pack(lang_code, None)
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리에 있는 키는 내장 문자열을 덮어쓰고, 없는 키는 내장 문자열을 쓴다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let lang = Language::from_code(lang_code);
        let mut strings = built_in_pack(lang);
        if let Some(extra) = pack_dir.and_then(|dir| load_overrides(dir, lang_code)) {
            strings.extend(extra);
        }
        Self {
            lang,
            strings,
            fallback: built_in_pack(Language::Sv),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 현재 언어에 없으면 스웨덴어, 그래도 없으면 키 자체를 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// `{name}` 자리표시자를 채운 번역.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        let mut out = self.t(key).to_string();
        for (k, v) in vars {
            out = out.replace(&format!("{{{k}}}"), v);
        }
        out
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "sv-se".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("sv") => Some("sv-se".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "sv" => Some("sv-se".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        let map = parse_toml_to_map(&content);
        if map.is_none() {
            warn!(path = %path.display(), "language pack is empty or not valid TOML");
        }
        map
    };

    // 1) full code (e.g., sv-se)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., sv)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: Language) -> HashMap<String, String> {
    let src = match lang {
        Language::Sv => include_str!("../locales/sv-se.toml"),
        Language::En => include_str!("../locales/en-us.toml"),
    };
    parse_toml_to_map(src).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_packs_cover_the_same_keys() {
        let sv = built_in_pack(Language::Sv);
        let en = built_in_pack(Language::En);
        assert!(!sv.is_empty());
        let mut sv_keys: Vec<_> = sv.keys().collect();
        let mut en_keys: Vec<_> = en.keys().collect();
        sv_keys.sort();
        en_keys.sort();
        assert_eq!(sv_keys, en_keys);
    }

    #[test]
    fn every_declared_key_is_translated() {
        let tr = Translator::new("sv-se");
        for key in [
            keys::ADVISORY_ZERO_RATE,
            keys::ADVISORY_LOW_ATTRIBUTION,
            keys::ADVISORY_LOW_EFFECT,
            keys::ADVISORY_ZERO_BED_DAY_COST,
            keys::ADVISORY_ZERO_VRI_COST,
            keys::REPORT_TITLE,
            keys::RESULT_PAYBACK,
            keys::FIELD_CAPEX,
        ] {
            assert_ne!(tr.t(key), key, "missing translation for {key}");
        }
    }

    #[test]
    fn unknown_key_falls_back_to_itself() {
        let tr = Translator::new("en");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn language_resolution_prefers_cli_then_config() {
        assert_eq!(resolve_language("en", Some("sv")), "en-us");
        assert_eq!(resolve_language("auto", Some("sv_SE")), "sv-se");
        assert_eq!(normalize_locale_string("en_GB.UTF-8").as_deref(), Some("en-us"));
    }

    #[test]
    fn pack_dir_overrides_single_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("en-us.toml"),
            "[report]\ntitle = \"Custom title\"\n",
        )
        .unwrap();
        let tr = Translator::new_with_pack("en-us", dir.path().to_str());
        assert_eq!(tr.t(keys::REPORT_TITLE), "Custom title");
        assert_ne!(tr.t(keys::RESULT_NET), keys::RESULT_NET);
    }

    #[test]
    fn placeholders_are_filled() {
        let tr = Translator::new("en");
        let s = tr.tf(keys::PRESET_APPLIED, &[("effect", "20".into())]);
        assert!(s.contains("20"), "{s}");
    }
}

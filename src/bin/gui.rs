#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path, path::PathBuf};
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vri_sink_calculator::{
    config, format,
    i18n::{self, keys},
    projection::{self, Evaluation, Field, PricingMode, RawInput, RawValue, ScenarioPreset},
    report,
};

fn main() -> Result<(), eframe::Error> {
    // CLI 옵션 처리: --lang xx / --lang=xx, --config path / --config=path
    let mut cli_lang: Option<String> = None;
    let mut config_path = PathBuf::from(config::DEFAULT_CONFIG_PATH);
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if let Some(val) = a.strip_prefix("--config=") {
            config_path = PathBuf::from(val);
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        } else if (a == "--config" || a == "-c") && i + 1 < args.len() {
            config_path = PathBuf::from(&args[i + 1]);
            i += 1;
        }
        i += 1;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = load_config(&config_path);
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "VRI Sink Calculator",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg))),
    )
}

/// 설정을 읽지 못하면 기본값을 쓰되, 저장 위치는 요청한 경로를 유지한다.
fn load_config(path: &Path) -> config::Config {
    match config::load_or_default(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, path = %path.display(), "config could not be loaded, using defaults");
            config::Config::with_path(path)
        }
    }
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Parameters,
    Result,
    Report,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    tab: Tab,
    raw: RawInput,
    /// Field::ALL 순서의 입력창 버퍼
    buffers: Vec<String>,
    eval: Evaluation,
    window_alpha: f32,
    lang_input: String,
    status: Option<String>,
    show_settings_modal: bool,
    show_help_modal: bool,
    show_formula_modal: bool,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&code, config.language_pack_dir.as_deref());
        let raw = RawInput {
            pricing_mode: config.pricing_mode,
            ..RawInput::default()
        };
        let eval = projection::run(&raw);
        let mut app = Self {
            window_alpha: config.window_alpha,
            lang_input: config.language.clone(),
            config,
            tr,
            tab: Tab::Parameters,
            raw,
            buffers: Vec::new(),
            eval,
            status: None,
            show_settings_modal: false,
            show_help_modal: false,
            show_formula_modal: false,
        };
        app.sync_buffers();
        app
    }

    fn sync_buffers(&mut self) {
        self.buffers = Field::ALL.iter().map(|f| self.raw.text_of(*f)).collect();
    }

    fn recompute(&mut self) {
        self.eval = projection::run(&self.raw);
    }

    #[cfg(test)]
    fn set_field_text(&mut self, field: Field, text: String) {
        self.raw.set(field, RawValue::Text(text));
        self.recompute();
    }

    fn apply_preset(&mut self, preset: ScenarioPreset) {
        preset.apply(&mut self.raw);
        self.sync_buffers();
        self.recompute();
    }

    fn set_pricing_mode(&mut self, mode: PricingMode) {
        self.raw.pricing_mode = mode;
        self.recompute();
    }

    fn reset(&mut self) {
        self.raw = RawInput {
            pricing_mode: self.config.pricing_mode,
            ..RawInput::default()
        };
        self.sync_buffers();
        self.recompute();
    }

    fn export_report(&mut self) {
        let mut dialog = FileDialog::new()
            .add_filter("Markdown", &["md"])
            .set_file_name("report.md");
        if let Some(dir) = &self.config.report_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };
        self.status = Some(match report::export(&path, &self.eval, &self.tr) {
            Ok(()) => self
                .tr
                .tf(keys::EXPORT_DONE, &[("path", path.display().to_string())]),
            Err(e) => {
                error!(error = %e, "report export failed");
                format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX))
            }
        });
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        for (tab, label) in [
            (Tab::Parameters, self.tr.t(keys::REPORT_PARAMETERS).to_string()),
            (Tab::Result, self.tr.t(keys::REPORT_RESULTS).to_string()),
            (Tab::Report, self.tr.t(keys::GUI_TAB_REPORT).to_string()),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_parameters(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for preset in ScenarioPreset::ALL {
                let label = format!("{} ({} %)", self.tr.t(preset.label_key()), preset.effect_pct());
                let active = ScenarioPreset::matching(self.eval.input.effect_pct) == Some(preset);
                if ui.selectable_label(active, label).clicked() {
                    self.apply_preset(preset);
                }
            }
            ui.separator();
            if ui.button(self.tr.t(keys::GUI_RESET)).clicked() {
                self.reset();
            }
        });
        ui.add_space(8.0);

        let mut mode = self.raw.pricing_mode;
        ui.horizontal(|ui| {
            ui.label(self.tr.t(keys::REPORT_PRICING_MODE));
            ui.radio_value(&mut mode, PricingMode::BedDays, self.tr.t(keys::PRICING_BED_DAYS));
            ui.radio_value(&mut mode, PricingMode::PerVri, self.tr.t(keys::PRICING_PER_VRI));
        });
        if mode != self.raw.pricing_mode {
            self.set_pricing_mode(mode);
        }
        ui.add_space(8.0);

        let mut changed: Vec<(Field, RawValue)> = Vec::new();
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("param_grid")
                .num_columns(3)
                .spacing([12.0, 8.0])
                .striped(true)
                .show(ui, |ui| {
                    for (idx, field) in Field::ALL.iter().enumerate() {
                        let tip = match field.bounds() {
                            Some((lo, hi)) => format!("{} [{lo} – {hi}]", field.key()),
                            None => self.tr.t(keys::EDIT_OVERRIDE_HINT).to_string(),
                        };
                        label_with_tip(ui, self.tr.t(field.label_key()), &tip);
                        let resp = ui.add(
                            egui::TextEdit::singleline(&mut self.buffers[idx]).desired_width(140.0),
                        );
                        if resp.changed() {
                            changed.push((*field, RawValue::Text(self.buffers[idx].clone())));
                        }
                        if field.is_percent() {
                            let mut v = self.eval.input.value(*field);
                            if ui
                                .add(egui::Slider::new(&mut v, 0.0..=100.0).suffix(" %"))
                                .changed()
                            {
                                self.buffers[idx] = format!("{v:.1}");
                                changed.push((*field, RawValue::Number(v)));
                            }
                        } else {
                            let used = self.eval.input.value(*field);
                            ui.weak(format::number(used, 2, self.tr.language()));
                        }
                        ui.end_row();
                    }
                });
        });
        if !changed.is_empty() {
            for (field, value) in changed {
                self.raw.set(field, value);
            }
            self.recompute();
        }
        ui.add_space(8.0);
        self.ui_advisories(ui);
    }

    fn ui_result(&mut self, ui: &mut egui::Ui) {
        let lang = self.tr.language();
        let r = self.eval.result;
        let source = if r.used_override {
            self.tr.t(keys::RESULT_VRI_SOURCE_OVERRIDE)
        } else {
            self.tr.t(keys::RESULT_VRI_SOURCE_RATE)
        };
        let rows = [
            (keys::RESULT_BED_DAYS, format::number(r.bed_days, 1, lang)),
            (keys::RESULT_VRI, format!("{} {source}", format::number(r.vri, 2, lang))),
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
        egui::Grid::new("result_grid")
            .num_columns(2)
            .spacing([24.0, 6.0])
            .striped(true)
            .show(ui, |ui| {
                for (key, value) in &rows {
                    ui.label(self.tr.t(key));
                    if *key == keys::RESULT_NET {
                        let color = if r.net < 0.0 {
                            egui::Color32::from_rgb(200, 60, 60)
                        } else {
                            egui::Color32::from_rgb(40, 150, 70)
                        };
                        ui.colored_label(color, value);
                    } else {
                        ui.strong(value);
                    }
                    ui.end_row();
                }
            });
        if !r.payback_years.is_finite() {
            ui.add_space(4.0);
            ui.small(self.tr.t(keys::RESULT_PAYBACK_UNDEFINED));
        }
        ui.add_space(8.0);
        self.ui_advisories(ui);
    }

    fn ui_advisories(&self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::ADVISORY_HEADING));
        if self.eval.advisories.is_empty() {
            ui.label(self.tr.t(keys::ADVISORY_NONE));
        }
        for advisory in &self.eval.advisories {
            ui.colored_label(
                egui::Color32::from_rgb(210, 140, 20),
                format!("⚠ {}", advisory.message(&self.tr)),
            );
        }
    }

    fn ui_report(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(self.tr.t(keys::GUI_EXPORT)).clicked() {
                self.export_report();
            }
            if let Some(msg) = &self.status {
                ui.label(msg);
            }
        });
        ui.separator();
        let preview = report::render(&self.eval, &self.tr);
        ui.add(
            egui::TextEdit::multiline(&mut preview.as_str())
                .code_editor()
                .desired_width(f32::INFINITY),
        );
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 투명도 적용
        let mut style = (*ctx.style()).clone();
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(self.tr.t(keys::REPORT_FORMULAS)).clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button(self.tr.t(keys::GUI_SETTINGS)).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(self.tr.t(keys::GUI_HELP)).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            let mut open = true;
            let mut save_clicked = false;
            egui::Window::new(self.tr.t(keys::GUI_SETTINGS))
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(self.tr.t(keys::SETTINGS_CURRENT_LANGUAGE));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.lang_input, "auto".into(), "auto");
                            ui.selectable_value(&mut self.lang_input, "sv-se".into(), "Svenska");
                            ui.selectable_value(&mut self.lang_input, "en-us".into(), "English");
                        });
                    ui.separator();
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                    ui.separator();
                    if ui.button(self.tr.t(keys::GUI_SAVE)).clicked() {
                        save_clicked = true;
                    }
                });
            if save_clicked {
                self.config.language = self.lang_input.clone();
                self.config.window_alpha = self.window_alpha;
                let resolved = i18n::resolve_language(&self.config.language, None);
                self.tr = i18n::Translator::new_with_pack(
                    &resolved,
                    self.config.language_pack_dir.as_deref(),
                );
                self.status = Some(match self.config.save() {
                    Ok(()) => self.tr.t(keys::SETTINGS_SAVED).to_string(),
                    Err(e) => {
                        warn!(error = %e, "config save failed");
                        format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX))
                    }
                });
            }
            self.show_settings_modal = open;
        }

        if self.show_help_modal {
            egui::Window::new(self.tr.t(keys::GUI_HELP))
                .collapsible(false)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.heading(self.tr.t(keys::APP_TITLE));
                    ui.label(format!("v{}", env!("CARGO_PKG_VERSION")));
                    ui.label(self.tr.t(keys::EDIT_OVERRIDE_HINT));
                });
        }

        if self.show_formula_modal {
            egui::Window::new(self.tr.t(keys::REPORT_FORMULAS))
                .collapsible(true)
                .resizable(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    for key in [
                        keys::REPORT_FORMULA_BED_DAYS,
                        keys::REPORT_FORMULA_CHAIN,
                        keys::REPORT_FORMULA_SAVINGS,
                        keys::REPORT_FORMULA_PAYBACK,
                    ] {
                        ui.label(self.tr.t(key));
                    }
                });
        }

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(180.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Parameters => self.ui_parameters(ui),
                    Tab::Result => self.ui_result(ui),
                    Tab::Report => self.ui_report(ui),
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_index(field: Field) -> usize {
        Field::ALL.iter().position(|f| *f == field).unwrap()
    }

    #[test]
    fn new_app_starts_from_defaults() {
        let app = GuiApp::new(config::Config::default());
        assert_eq!(app.raw, RawInput::default());
        assert_eq!(app.buffers[field_index(Field::Beds)], "24");
        assert_eq!(app.buffers[field_index(Field::VriPerYearOverride)], "");
        assert!(app.eval.advisories.is_empty());
    }

    #[test]
    fn text_edit_recomputes_with_decimal_comma() {
        let mut app = GuiApp::new(config::Config::default());
        app.set_field_text(Field::VriPer1000BedDays, "0,0".into());
        assert_eq!(app.eval.input.vri_per_1000_bed_days, 0.0);
        assert_eq!(app.eval.result.vri, 0.0);
        assert_eq!(
            app.eval.advisories.first(),
            Some(&projection::Advisory::ZeroInfectionRate)
        );
    }

    #[test]
    fn preset_updates_buffer_and_result() {
        let mut app = GuiApp::new(config::Config::default());
        let before = app.eval.result.avoided;
        app.apply_preset(ScenarioPreset::Ambitious);
        assert_eq!(app.buffers[field_index(Field::EffectPct)], "20");
        assert!((app.eval.result.avoided - 2.0 * before).abs() < 1e-12);
    }

    #[test]
    fn unreadable_config_keeps_requested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "language = [").unwrap();
        let cfg = load_config(&path);
        assert_eq!(cfg.path(), path.as_path());
        assert_eq!(cfg.language, "auto");
    }

    #[test]
    fn reset_restores_config_pricing_mode() {
        let mut cfg = config::Config::default();
        cfg.pricing_mode = PricingMode::PerVri;
        let mut app = GuiApp::new(cfg);
        app.set_pricing_mode(PricingMode::BedDays);
        app.set_field_text(Field::Beds, "100".into());
        app.reset();
        assert_eq!(app.raw.pricing_mode, PricingMode::PerVri);
        assert_eq!(app.eval.input.beds, 24.0);
    }
}

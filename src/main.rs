use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vri_sink_calculator::{
    app::{self, AppError},
    config,
    format,
    i18n::{keys, Translator},
    projection::{self, Advisory, Field, NormalizedInput, ProjectionResult, RawInput, ScenarioPreset},
    report, ui_cli,
};

/// 세면대 위생 투자에 대한 감염/비용 예측 계산기 (터미널)
#[derive(Parser)]
#[command(name = "vri_sink_calculator_cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 언어 코드 (auto, sv, en)
    #[arg(short = 'L', long, global = true, default_value = "auto")]
    lang: String,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 메뉴 방식으로 파라미터를 바꿔 가며 계산한다
    Interactive,
    /// 한 번 계산하고 결과를 출력한다
    Calc {
        #[command(flatten)]
        params: ParamArgs,
        /// 출력 형식
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// 계산 후 보고서를 파일로 저장한다
    Report {
        #[command(flatten)]
        params: ParamArgs,
        /// 보고서 파일 경로
        #[arg(short, long)]
        output: PathBuf,
    },
    /// 입력 필드 키, 범위, 기본값을 나열한다
    Fields,
}

#[derive(clap::Args)]
struct ParamArgs {
    /// 파라미터 지정 (예: --set beds=30 --set effectPct=15)
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    assignments: Vec<String>,

    /// 시나리오 프리셋 (conservative, low, ambitious)
    #[arg(short, long)]
    preset: Option<String>,

    /// 산정 방식 (bedDays, perVRI)
    #[arg(long)]
    pricing: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    input: &'a NormalizedInput,
    result: &'a ProjectionResult,
    advisories: Vec<JsonAdvisory>,
}

#[derive(Serialize)]
struct JsonAdvisory {
    code: Advisory,
    message: String,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령을 실행한다.
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(err) = try_run(cli) {
        let tr = Translator::new("auto");
        eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default(&cli.config)?;
    let mut tr = app::translator_for(&cfg, &cli.lang);
    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => app::run(&mut cfg, &mut tr)?,
        Commands::Calc { params, format } => {
            let raw = build_input(&cfg, &params)?;
            let eval = projection::run(&raw);
            match format {
                OutputFormat::Text => ui_cli::print_evaluation(&eval, &tr),
                OutputFormat::Json => {
                    let out = JsonOutput {
                        input: &eval.input,
                        result: &eval.result,
                        advisories: eval
                            .advisories
                            .iter()
                            .map(|a| JsonAdvisory {
                                code: *a,
                                message: a.message(&tr).to_string(),
                            })
                            .collect(),
                    };
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
            }
        }
        Commands::Report { params, output } => {
            let raw = build_input(&cfg, &params)?;
            let eval = projection::run(&raw);
            let path = cfg.report_path(&output.to_string_lossy());
            report::export(&path, &eval, &tr)?;
            println!(
                "{}",
                tr.tf(keys::EXPORT_DONE, &[("path", path.display().to_string())])
            );
        }
        Commands::Fields => print_fields(&tr),
    }
    Ok(())
}

/// 기본값 → 설정의 산정 방식 → 프리셋 → 개별 지정 순으로 입력을 만든다.
fn build_input(cfg: &config::Config, params: &ParamArgs) -> Result<RawInput, AppError> {
    let mut raw = RawInput {
        pricing_mode: cfg.pricing_mode,
        ..RawInput::default()
    };
    if let Some(mode) = &params.pricing {
        raw.pricing_mode = mode.parse().map_err(AppError::InvalidPricingMode)?;
    }
    if let Some(name) = &params.preset {
        let preset: ScenarioPreset = name.parse().map_err(AppError::InvalidPreset)?;
        preset.apply(&mut raw);
    }
    for assignment in &params.assignments {
        app::apply_assignment(&mut raw, assignment)?;
    }
    Ok(raw)
}

fn print_fields(tr: &Translator) {
    let defaults = projection::normalize(&RawInput::default());
    for field in Field::ALL {
        let range = field
            .bounds()
            .map(|(lo, hi)| format!("{lo}..{hi}"))
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<22} {:<16} {:>12}  {}",
            field.key(),
            range,
            format::number(defaults.value(field), 1, tr.language()),
            tr.t(field.label_key())
        );
    }
    println!("{:<22} bedDays | perVRI", "pricingMode");
}

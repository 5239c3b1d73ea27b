use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::projection::PricingMode;

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다. 계산 입력값은 저장하지 않는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/sv-se/en-us)
    pub language: String,
    /// 사용자 언어팩 디렉터리
    pub language_pack_dir: Option<String>,
    /// GUI 창 투명도 (0.3~1.0)
    pub window_alpha: f32,
    /// 보고서 기본 저장 폴더
    pub report_dir: Option<String>,
    /// 새 세션의 초기 산정 방식
    pub pricing_mode: PricingMode,
    #[serde(skip)]
    path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            window_alpha: 1.0,
            report_dir: None,
            pricing_mode: PricingMode::BedDays,
            path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let mut cfg: Config = toml::from_str(&content)?;
        cfg.window_alpha = cfg.window_alpha.clamp(0.3, 1.0);
        cfg.path = path.to_path_buf();
        Ok(cfg)
    } else {
        let cfg = Config::with_path(path);
        cfg.save()?;
        info!(path = %path.display(), "created default config");
        Ok(cfg)
    }
}

impl Config {
    /// 기본값으로 채우되 저장 위치만 지정한 설정.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// 설정을 로드한 파일에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 보고서 파일명을 기본 저장 폴더 기준 경로로 바꾼다. 절대 경로는 그대로 둔다.
    pub fn report_path(&self, file_name: &str) -> PathBuf {
        let name = Path::new(file_name);
        match &self.report_dir {
            Some(dir) if name.is_relative() => Path::new(dir).join(name),
            _ => name.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = load_or_default(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.language, "auto");
        assert_eq!(cfg.pricing_mode, PricingMode::BedDays);
    }

    #[test]
    fn saved_values_round_trip_and_alpha_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "language = \"en-us\"\nwindow_alpha = 0.05\npricing_mode = \"perVRI\"\n",
        )
        .unwrap();
        let cfg = load_or_default(&path).unwrap();
        assert_eq!(cfg.language, "en-us");
        assert_eq!(cfg.pricing_mode, PricingMode::PerVri);
        assert!((cfg.window_alpha - 0.3).abs() < f32::EPSILON);
        assert_eq!(cfg.path(), path.as_path());
    }

    #[test]
    fn broken_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "language = [").unwrap();
        assert!(matches!(load_or_default(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn defaults_with_path_save_to_the_requested_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "language = [").unwrap();
        assert!(load_or_default(&path).is_err());

        let mut cfg = Config::with_path(&path);
        assert_eq!(cfg.path(), path.as_path());
        assert_eq!(cfg.language, "auto");
        cfg.language = "en-us".into();
        cfg.save().unwrap();
        assert_eq!(load_or_default(&path).unwrap().language, "en-us");
    }

    #[test]
    fn report_path_uses_report_dir_for_relative_names() {
        let cfg = Config {
            report_dir: Some("reports".into()),
            ..Config::default()
        };
        assert_eq!(cfg.report_path("a.md"), Path::new("reports").join("a.md"));
    }
}

//! 設定モジュール

use crate::error::ConfigError;
use crate::level::LevelFilter;
use crate::settings;
use crate::sink::{Destination, SinkKind};
use serde::Deserialize;
use std::convert::Infallible;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// 出力先の指定（"stdout" / "stderr" / ファイルパス）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl FromStr for Target {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            t if t.eq_ignore_ascii_case("stdout") => Target::Stdout,
            t if t.eq_ignore_ascii_case("stderr") => Target::Stderr,
            t => Target::File(PathBuf::from(t)),
        })
    }
}

impl Target {
    /// 出力先を開く
    pub fn open(&self) -> Result<Destination, ConfigError> {
        match self {
            Target::Stdout => Ok(Destination::Stdout),
            Target::Stderr => Ok(Destination::Stderr),
            Target::File(path) => {
                Destination::append_file(path).map_err(|source| ConfigError::OpenTarget {
                    path: path.clone(),
                    source,
                })
            }
        }
    }

    /// デフォルト以外の出力先だけを開く
    fn open_unless_default(&self, kind: SinkKind) -> Result<Option<Destination>, ConfigError> {
        if self.is_default_for(kind) {
            return Ok(None);
        }
        self.open().map(Some)
    }

    fn is_default_for(&self, kind: SinkKind) -> bool {
        matches!(
            (self, kind),
            (Target::Stdout, SinkKind::Normal) | (Target::Stderr, SinkKind::Diagnostic)
        )
    }
}

/// ロガー設定
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// しきい値（未指定なら環境変数から読む）
    pub level: Option<LevelFilter>,
    /// しきい値を読む環境変数名
    pub level_env_var: Option<String>,
    /// DEBUG/INFO の出力先
    pub normal: Target,
    /// ERROR/FATAL/PANIC の出力先
    pub diagnostic: Target,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: None,
            level_env_var: None,
            normal: Target::Stdout,
            diagnostic: Target::Stderr,
        }
    }
}

/// TOML設定ファイル用構造体
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    level: Option<String>,
    level_env_var: Option<String>,
    normal: Option<String>,
    diagnostic: Option<String>,
}

/// CLI引数
#[derive(Debug, Default)]
pub struct CliArgs {
    pub level: Option<LevelFilter>,
    pub level_env_var: Option<String>,
    pub normal: Option<Target>,
    pub diagnostic: Option<Target>,
}

impl Config {
    /// 設定を読み込む
    ///
    /// 優先順位: CLI引数 > 設定ファイル > デフォルト値
    /// `config_path` を省略した場合は `~/.leveled-log/config.toml` を存在すれば読む。
    pub fn load(config_path: Option<&Path>, cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // 明示されたファイルは存在しなければエラー
        let path = config_path.map_or_else(default_config_path, Path::to_path_buf);
        if config_path.is_some() || path.exists() {
            let content = fs::read_to_string(&path)?;
            let file_config: FileConfig = toml::from_str(&content)?;
            config.merge_file_config(&file_config)?;
        }

        config.merge_cli_args(cli_args);

        Ok(config)
    }

    /// ファイル設定をマージ
    fn merge_file_config(&mut self, file_config: &FileConfig) -> Result<(), ConfigError> {
        if let Some(ref level) = file_config.level {
            let level = level
                .parse::<LevelFilter>()
                .map_err(|_| ConfigError::InvalidLevel(level.clone()))?;
            self.level = Some(level);
        }
        if let Some(ref name) = file_config.level_env_var {
            self.level_env_var = Some(name.clone());
        }
        if let Some(ref target) = file_config.normal {
            self.normal = parse_target(target);
        }
        if let Some(ref target) = file_config.diagnostic {
            self.diagnostic = parse_target(target);
        }
        Ok(())
    }

    /// CLI引数をマージ
    fn merge_cli_args(&mut self, cli_args: &CliArgs) {
        if let Some(level) = cli_args.level {
            self.level = Some(level);
        }
        if let Some(ref name) = cli_args.level_env_var {
            self.level_env_var = Some(name.clone());
        }
        if let Some(ref target) = cli_args.normal {
            self.normal = target.clone();
        }
        if let Some(ref target) = cli_args.diagnostic {
            self.diagnostic = target.clone();
        }
    }

    /// プロセス全体のロガー設定に反映
    ///
    /// 最初のログ出力より前に呼ぶこと。
    /// 出力先を開けなかった場合は何も変更しない。
    pub fn apply(&self) -> Result<(), ConfigError> {
        let normal = self.normal.open_unless_default(SinkKind::Normal)?;
        let diagnostic = self.diagnostic.open_unless_default(SinkKind::Diagnostic)?;

        // しきい値の解決に使うので先に設定する
        if let Some(ref name) = self.level_env_var {
            settings::set_log_level_env_var(name.clone())?;
        }
        if let Some(level) = self.level {
            settings::set_threshold(level)?;
        }
        if let Some(destination) = normal {
            settings::redirect_normal(destination)?;
        }
        if let Some(destination) = diagnostic {
            settings::redirect_diagnostic(destination)?;
        }
        Ok(())
    }

}

fn parse_target(value: &str) -> Target {
    match value.parse() {
        Ok(target) => target,
        Err(never) => match never {},
    }
}

/// 設定ファイルのデフォルトパス
fn default_config_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".leveled-log").join("config.toml")
}

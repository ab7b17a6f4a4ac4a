//! エラー型定義モジュール

use crate::level::LevelFilter;
use crate::sink::SinkKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// ロガーのエラー
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("ログレベルはログ出力前に設定してください。ログレベルは {current} のままです")]
    ThresholdFrozen { current: LevelFilter },

    #[error("ログレベルの環境変数はログ出力前に設定してください。環境変数は {current} のままです")]
    EnvVarFrozen { current: String },

    #[error("{sink}のリダイレクトはログ出力前に行ってください")]
    RedirectFrozen { sink: SinkKind },

    #[error("不明なログレベル: {0}")]
    UnknownLevel(String),

    #[error("tracing初期化エラー: {0}")]
    TracingInit(#[from] tracing_subscriber::util::TryInitError),
}

/// 設定エラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IOエラー: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML解析エラー: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("不正なログレベル: {0}")]
    InvalidLevel(String),

    #[error("出力先を開けません: {path}: {source}")]
    OpenTarget {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("ロガー設定エラー: {0}")]
    Logger(#[from] LoggerError),
}

//! CLIモジュール

use anyhow::Result;
use clap::{Parser, Subcommand};
use leveled_log::bridge;
use leveled_log::config::{CliArgs, Config, Target};
use leveled_log::{LevelFilter, Severity};
use std::fmt::Display;
use std::path::PathBuf;
use tracing::Level;

/// logemit - シェルスクリプトからレベル付きログを出力
#[derive(Parser, Debug)]
#[command(name = "logemit")]
#[command(about = "レベル付きログを出力するツール", long_about = None)]
pub struct Cli {
    /// 設定ファイルのパス
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 出力する最小レベル（debug/info/error/fatal/panic/off）
    #[arg(short, long, global = true)]
    pub level: Option<LevelFilter>,

    /// レベルを読む環境変数名（デフォルト: LOG_LEVEL）
    #[arg(long, global = true)]
    pub env_var: Option<String>,

    /// DEBUG/INFO の出力先（stdout/stderr/ファイルパス）
    #[arg(long, global = true)]
    pub normal: Option<Target>,

    /// ERROR/FATAL/PANIC の出力先（stdout/stderr/ファイルパス）
    #[arg(long, global = true)]
    pub diagnostic: Option<Target>,

    #[command(subcommand)]
    pub command: Commands,
}

/// サブコマンド
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 指定レベルでログを出力
    Emit {
        /// レベル（debug/info/error/fatal/panic）
        severity: Severity,

        /// 出力する語（空白区切りで連結）
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// tracing経由でログを出力
    Trace {
        /// tracingのレベル（trace/debug/info/warn/error）
        // グローバルの --level と別のIDにする
        #[arg(id = "tracing_level", value_name = "LEVEL")]
        level: Level,

        /// 出力する語（空白区切りで連結）
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// 有効なしきい値を表示
    Threshold,
}

/// CLIエントリポイント
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let cli_args = CliArgs {
        level: cli.level,
        level_env_var: cli.env_var,
        normal: cli.normal,
        diagnostic: cli.diagnostic,
    };
    let config = Config::load(cli.config.as_deref(), &cli_args)?;
    config.apply()?;
    bridge::install()?;

    match cli.command {
        Commands::Emit { severity, words } => emit(severity, &words),
        Commands::Trace { level, words } => trace(level, &words.join(" ")),
        Commands::Threshold => println!("{}", leveled_log::current_threshold()),
    }

    Ok(())
}

fn emit(severity: Severity, words: &[String]) {
    let args: Vec<&dyn Display> = words.iter().map(|w| w as &dyn Display).collect();
    match severity {
        Severity::Debug => leveled_log::debug(&args),
        Severity::Info => leveled_log::info(&args),
        Severity::Error => leveled_log::error(&args),
        Severity::Fatal => leveled_log::fatal(&args),
        Severity::Panic => leveled_log::panic(&args),
    }
}

fn trace(level: Level, message: &str) {
    if level == Level::TRACE {
        tracing::trace!("{}", message);
    } else if level == Level::DEBUG {
        tracing::debug!("{}", message);
    } else if level == Level::INFO {
        tracing::info!("{}", message);
    } else if level == Level::WARN {
        tracing::warn!("{}", message);
    } else {
        tracing::error!("{}", message);
    }
}

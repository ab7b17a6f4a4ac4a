//! leveled-log - プロセス全体で共有するレベル付きロガー
//!
//! DEBUG < INFO < ERROR < FATAL < PANIC の5段階。しきい値未満の呼び出しは何も出力しない。
//! DEBUG/INFO はstdout、ERROR/FATAL/PANIC はstderrに書き込む（どちらも変更可能）。
//! FATALは出力後に終了コード1でプロセスを終了し、PANICは出力したメッセージでpanicする。
//!
//! しきい値・出力先の設定は最初のログ出力より前に行うこと。
//!
//! ```no_run
//! use leveled_log::{infof, infoln, Destination, Severity};
//!
//! leveled_log::set_threshold(Severity::Info).unwrap();
//! leveled_log::redirect_diagnostic(Destination::Stdout).unwrap();
//!
//! infoln!("server", "started");
//! infof!("listening on port {}", 8080);
//! ```

mod macros;

pub mod bridge;
pub mod call_site;
pub mod config;
pub mod error;
pub mod facade;
pub mod level;
pub mod settings;
pub mod sink;

pub use call_site::{CallSite, DEFAULT_CALL_DEPTH};
pub use error::{ConfigError, LoggerError};
pub use facade::{
    call_depth_debug, call_depth_debugf, call_depth_error, call_depth_errorf, call_depth_fatal,
    call_depth_fatalf, call_depth_info, call_depth_infof, call_depth_panic, call_depth_panicf,
    debug, debugf, error, errorf, fatal, fatalf, info, infof, init, instance, panic, panicf,
    Logger, FATAL_EXIT_CODE,
};
pub use level::{LevelFilter, Severity};
pub use settings::{
    current_threshold, level_env_var, redirect_diagnostic, redirect_normal,
    set_log_level_env_var, set_threshold, DEFAULT_LEVEL_ENV_VAR, DEFAULT_THRESHOLD,
};
pub use sink::{CaptureBuffer, Destination, SinkKind};

//! 初期設定モジュール
//!
//! しきい値・出力先・ログレベル環境変数名はプロセス全体で1つだけ持つ。
//! ロガーが構築された時点で凍結され、それ以降の変更はERRORログを出して拒否する。

use crate::call_site::{CallSite, DEFAULT_CALL_DEPTH};
use crate::error::LoggerError;
use crate::facade;
use crate::level::{LevelFilter, Severity};
use crate::sink::{Destination, SinkKind};
use std::borrow::Cow;
use std::env;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// しきい値を読む環境変数のデフォルト名
pub const DEFAULT_LEVEL_ENV_VAR: &str = "LOG_LEVEL";

/// 環境変数が未設定・不正な場合のしきい値
pub const DEFAULT_THRESHOLD: LevelFilter = LevelFilter::Debug;

static PENDING: Mutex<Pending> = Mutex::new(Pending::new());

/// ロガー構築前の設定値
struct Pending {
    frozen: bool,
    threshold: Option<LevelFilter>,
    env_var: Cow<'static, str>,
    normal: Option<Destination>,
    diagnostic: Option<Destination>,
}

/// ロガー構築時に取り出す設定
pub(crate) struct Snapshot {
    pub(crate) threshold: LevelFilter,
    pub(crate) normal: Destination,
    pub(crate) diagnostic: Destination,
}

impl Pending {
    const fn new() -> Self {
        Self {
            frozen: false,
            threshold: None,
            env_var: Cow::Borrowed(DEFAULT_LEVEL_ENV_VAR),
            normal: None,
            diagnostic: None,
        }
    }

    fn current_threshold(&self) -> LevelFilter {
        self.threshold
            .unwrap_or_else(|| threshold_from_env(&self.env_var))
    }

    fn set_threshold(&mut self, level: LevelFilter) -> Result<(), LoggerError> {
        let current = self.current_threshold();
        if level == current {
            return Ok(());
        }
        if self.frozen {
            return Err(LoggerError::ThresholdFrozen { current });
        }
        self.threshold = Some(level);
        Ok(())
    }

    fn set_env_var(&mut self, name: String) -> Result<(), LoggerError> {
        if self.frozen {
            return Err(LoggerError::EnvVarFrozen {
                current: self.env_var.to_string(),
            });
        }
        self.env_var = Cow::Owned(name);
        Ok(())
    }

    fn redirect(&mut self, kind: SinkKind, destination: Destination) -> Result<(), LoggerError> {
        if self.frozen {
            return Err(LoggerError::RedirectFrozen { sink: kind });
        }
        match kind {
            SinkKind::Normal => self.normal = Some(destination),
            SinkKind::Diagnostic => self.diagnostic = Some(destination),
        }
        Ok(())
    }

    fn freeze(&mut self) -> Snapshot {
        let threshold = self.current_threshold();
        self.threshold = Some(threshold);
        self.frozen = true;
        Snapshot {
            threshold,
            normal: self
                .normal
                .take()
                .unwrap_or_else(|| Destination::default_for(SinkKind::Normal)),
            diagnostic: self
                .diagnostic
                .take()
                .unwrap_or_else(|| Destination::default_for(SinkKind::Diagnostic)),
        }
    }
}

fn pending() -> MutexGuard<'static, Pending> {
    PENDING.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 環境変数からしきい値を読む（大文字小文字は区別しない）
pub(crate) fn threshold_from_env(name: &str) -> LevelFilter {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<Severity>().ok())
        .map_or(DEFAULT_THRESHOLD, LevelFilter::from)
}

/// 設定を凍結してスナップショットを取り出す（ロガー構築時に1回だけ呼ぶ）
pub(crate) fn freeze() -> Snapshot {
    pending().freeze()
}

/// 拒否をERRORログとして出力し、エラーをそのまま返す
#[track_caller]
fn reject(err: LoggerError) -> LoggerError {
    let logger = facade::instance();
    if logger.enabled(Severity::Error) {
        logger.write(
            Severity::Error,
            &CallSite::caller(DEFAULT_CALL_DEPTH),
            &err.to_string(),
        );
    }
    err
}

/// 出力する最小の重要度を設定
///
/// ログを1行でも書く前に呼ぶこと。構築後に呼んだ場合は値を変えずにERRORログを出す。
/// 現在値と同じ値なら何もしない。
#[track_caller]
pub fn set_threshold(level: impl Into<LevelFilter>) -> Result<(), LoggerError> {
    // ロックを解放してから拒否ログを出す
    let result = pending().set_threshold(level.into());
    if let Err(err) = result {
        return Err(reject(err));
    }
    Ok(())
}

/// 現在のしきい値（構築前は保留中の値）
pub fn current_threshold() -> LevelFilter {
    pending().current_threshold()
}

/// しきい値を読む環境変数名を変更
#[track_caller]
pub fn set_log_level_env_var(name: impl Into<String>) -> Result<(), LoggerError> {
    let result = pending().set_env_var(name.into());
    if let Err(err) = result {
        return Err(reject(err));
    }
    Ok(())
}

/// しきい値を読む環境変数名
pub fn level_env_var() -> String {
    pending().env_var.to_string()
}

/// DEBUG/INFO の出力先を変更
#[track_caller]
pub fn redirect_normal(destination: Destination) -> Result<(), LoggerError> {
    let result = pending().redirect(SinkKind::Normal, destination);
    if let Err(err) = result {
        return Err(reject(err));
    }
    Ok(())
}

/// ERROR/FATAL/PANIC の出力先を変更
#[track_caller]
pub fn redirect_diagnostic(destination: Destination) -> Result<(), LoggerError> {
    let result = pending().redirect(SinkKind::Diagnostic, destination);
    if let Err(err) = result {
        return Err(reject(err));
    }
    Ok(())
}

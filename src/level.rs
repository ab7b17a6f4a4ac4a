//! ログレベルモジュール

use crate::error::LoggerError;
use std::fmt;
use std::str::FromStr;

/// ログの重要度
///
/// DEBUG < INFO < ERROR < FATAL < PANIC の順で全順序を持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    Debug = 1,
    Info = 2,
    Error = 3,
    Fatal = 4,
    Panic = 5,
}

impl Severity {
    /// 全ての重要度（昇順）
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Error,
        Severity::Fatal,
        Severity::Panic,
    ];

    /// 大文字の名前
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Panic => "PANIC",
        }
    }

    /// 数値から重要度を取得
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Severity::Debug),
            2 => Some(Severity::Info),
            3 => Some(Severity::Error),
            4 => Some(Severity::Fatal),
            5 => Some(Severity::Panic),
            _ => None,
        }
    }

    /// 数値を名前に変換（範囲外は空文字列）
    pub fn name_of(raw: u8) -> &'static str {
        Self::from_raw(raw).map_or("", Self::as_str)
    }

    /// 診断出力（stderr側）に書き込む重要度かどうか
    pub const fn is_diagnostic(self) -> bool {
        matches!(self, Severity::Error | Severity::Fatal | Severity::Panic)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 幅指定（"{:<5}"）を効かせるためpadを使う
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| LoggerError::UnknownLevel(s.to_string()))
    }
}

/// 出力する最小の重要度（しきい値）
///
/// `Off` はPANICより上で、全ての出力を抑制する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LevelFilter {
    Debug,
    Info,
    Error,
    Fatal,
    Panic,
    Off,
}

impl LevelFilter {
    /// 指定の重要度が出力対象かどうか
    pub fn allows(self, severity: Severity) -> bool {
        match self.severity() {
            Some(threshold) => severity >= threshold,
            None => false,
        }
    }

    /// しきい値となる重要度（`Off` は `None`）
    pub const fn severity(self) -> Option<Severity> {
        match self {
            LevelFilter::Debug => Some(Severity::Debug),
            LevelFilter::Info => Some(Severity::Info),
            LevelFilter::Error => Some(Severity::Error),
            LevelFilter::Fatal => Some(Severity::Fatal),
            LevelFilter::Panic => Some(Severity::Panic),
            LevelFilter::Off => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self.severity() {
            Some(severity) => severity.as_str(),
            None => "OFF",
        }
    }
}

impl From<Severity> for LevelFilter {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => LevelFilter::Debug,
            Severity::Info => LevelFilter::Info,
            Severity::Error => LevelFilter::Error,
            Severity::Fatal => LevelFilter::Fatal,
            Severity::Panic => LevelFilter::Panic,
        }
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LevelFilter {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("off") {
            return Ok(LevelFilter::Off);
        }
        s.parse::<Severity>().map(LevelFilter::from)
    }
}

//! tracing連携モジュール
//!
//! `tracing` のイベントをロガーに流す。しきい値と出力先はロガーの設定に従う。
//!
//! | tracing | 重要度 |
//! |---|---|
//! | TRACE, DEBUG | DEBUG |
//! | INFO | INFO |
//! | WARN, ERROR | ERROR |

use crate::call_site::CallSite;
use crate::error::LoggerError;
use crate::facade::{self, Logger};
use crate::level::Severity;
use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// tracingのイベントをロガーに書き込むレイヤー
#[derive(Clone, Copy, Default)]
pub struct FacadeLayer {
    logger: Option<&'static Logger>,
}

impl FacadeLayer {
    /// プロセス全体のロガーに書き込む（ロガーは最初のイベントで構築される）
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定のロガーに書き込む
    pub fn with_logger(logger: &'static Logger) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    fn logger(&self) -> &'static Logger {
        self.logger.unwrap_or_else(facade::instance)
    }
}

/// tracingのレベルを重要度に変換
pub fn severity_for(level: &Level) -> Severity {
    if *level == Level::TRACE || *level == Level::DEBUG {
        Severity::Debug
    } else if *level == Level::INFO {
        Severity::Info
    } else {
        Severity::Error
    }
}

impl<S: Subscriber> Layer<S> for FacadeLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let severity = severity_for(metadata.level());
        let logger = self.logger();
        if !logger.enabled(severity) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let site = CallSite::new(metadata.file().unwrap_or("???"), metadata.line().unwrap_or(0));
        logger.write(severity, &site, &visitor.finish());
    }
}

/// `message` フィールドを本文に、その他を `name=value` として末尾に並べる
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        let mut out = self.message;
        if !self.fields.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&self.fields);
        }
        out
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}

/// tracingのグローバルサブスクライバーとして登録
///
/// RUST_LOG環境変数でtarget単位の絞り込みが可能（デフォルト: trace）。
/// 重要度による絞り込みはロガーのしきい値で行う。
pub fn install() -> Result<(), LoggerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));

    tracing_subscriber::registry()
        .with(filter)
        .with(FacadeLayer::new())
        .try_init()?;
    Ok(())
}

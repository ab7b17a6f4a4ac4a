//! ロガー本体モジュール
//!
//! 初回のログ出力（または [`init`]）で一度だけ構築され、プロセス終了まで生き続ける。
//! DEBUG/INFO は通常出力へ、ERROR/FATAL/PANIC は診断出力へ書き込む。

use crate::call_site::{CallSite, DEFAULT_CALL_DEPTH};
use crate::level::{LevelFilter, Severity};
use crate::settings;
use crate::sink::{Destination, Sink};
use chrono::{DateTime, Local};
use std::fmt::{self, Display, Write as _};
use std::process;
use std::sync::{Arc, OnceLock};

/// FATAL出力後の終了コード
pub const FATAL_EXIT_CODE: i32 = 1;

const FATAL_SUFFIX: &str = ". Exiting...";
const PANIC_SUFFIX: &str = ". Panicing...";
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

static INSTANCE: OnceLock<Logger> = OnceLock::new();

/// ロガーを取得（未構築なら構築する）
///
/// 同時に複数スレッドから呼ばれても構築は1回だけで、全員が構築済みのロガーを受け取る。
pub fn instance() -> &'static Logger {
    INSTANCE.get_or_init(|| {
        let snapshot = settings::freeze();
        Logger::new(snapshot.threshold, snapshot.normal, snapshot.diagnostic)
    })
}

/// ロガーを明示的に構築
///
/// 以降、しきい値と出力先は変更できない。
pub fn init() -> &'static Logger {
    instance()
}

/// 重要度ごとの書き込み口
struct LevelWriter {
    severity: Severity,
    sink: Arc<Sink>,
}

impl LevelWriter {
    fn output(&self, site: &CallSite, message: &str) {
        let line = render_line(self.severity, &Local::now(), site, message);
        // 書き込み失敗の報告先はない
        let _ = self.sink.write_line(&line);
    }
}

/// ロガー
pub struct Logger {
    threshold: LevelFilter,
    writers: [LevelWriter; 5],
}

impl Logger {
    pub(crate) fn new(threshold: LevelFilter, normal: Destination, diagnostic: Destination) -> Self {
        let normal = Arc::new(Sink::new(normal));
        let diagnostic = Arc::new(Sink::new(diagnostic));
        let writers = Severity::ALL.map(|severity| LevelWriter {
            severity,
            sink: if severity.is_diagnostic() {
                Arc::clone(&diagnostic)
            } else {
                Arc::clone(&normal)
            },
        });
        Self { threshold, writers }
    }

    /// 構築時に確定したしきい値
    pub fn threshold(&self) -> LevelFilter {
        self.threshold
    }

    /// 指定の重要度が出力されるかどうか
    pub fn enabled(&self, severity: Severity) -> bool {
        self.threshold.allows(severity)
    }

    fn writer(&self, severity: Severity) -> &LevelWriter {
        &self.writers[severity as usize - 1]
    }

    /// しきい値を見ずに書き込む
    pub(crate) fn write(&self, severity: Severity, site: &CallSite, message: &str) {
        self.writer(severity).output(site, message);
    }

    /// しきい値を満たす場合だけ書き込む
    pub(crate) fn print(&self, severity: Severity, site: &CallSite, message: &str) -> bool {
        if !self.enabled(severity) {
            return false;
        }
        self.write(severity, site, message);
        true
    }

    /// PANICを書き込み、同じ文字列でpanicする（しきい値未満なら何もしない）
    #[track_caller]
    pub(crate) fn raise(&self, site: &CallSite, message: String) {
        if self.print(Severity::Panic, site, &message) {
            std::panic::panic_any(message);
        }
    }
}

/// 1行分の文字列を組み立てる: `<重要度> <日時> <ファイル>:<行>: <メッセージ>`
fn render_line(severity: Severity, now: &DateTime<Local>, site: &CallSite, message: &str) -> String {
    let mut line = format!(
        "{:<5} {} {}: {}",
        severity,
        now.format(TIMESTAMP_FORMAT),
        site,
        message
    );
    if !line.ends_with('\n') {
        line.push('\n');
    }
    line
}

/// 引数を空白区切りで連結
fn sprint(args: &[&dyn Display]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", arg);
    }
    out
}

/// 引数を空白区切りで連結し、末尾に改行を付ける
fn sprintln(args: &[&dyn Display]) -> String {
    let mut out = sprint(args);
    out.push('\n');
    out
}

fn with_suffix(body: impl Display, suffix: &str) -> String {
    let mut message = format!("{}{}", body, suffix);
    if !message.ends_with('\n') {
        message.push('\n');
    }
    message
}

#[track_caller]
fn print_with(severity: Severity, depth: usize, message: impl FnOnce() -> String) {
    let logger = instance();
    if logger.enabled(severity) {
        logger.write(severity, &CallSite::caller(depth), &message());
    }
}

#[track_caller]
fn fatal_with(depth: usize, message: impl FnOnce() -> String) -> ! {
    let logger = instance();
    if logger.enabled(Severity::Fatal) {
        logger.write(Severity::Fatal, &CallSite::caller(depth), &message());
    }
    // 抑制された場合も終了する
    process::exit(FATAL_EXIT_CODE)
}

#[track_caller]
fn panic_with(depth: usize, message: impl FnOnce() -> String) {
    let logger = instance();
    if logger.enabled(Severity::Panic) {
        logger.raise(&CallSite::caller(depth), message());
    }
}

/// DEBUGで出力（引数は空白区切り、末尾に改行）
#[track_caller]
pub fn debug(args: &[&dyn Display]) {
    call_depth_debug(DEFAULT_CALL_DEPTH, args);
}

/// DEBUGで書式付き出力
#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    call_depth_debugf(DEFAULT_CALL_DEPTH, args);
}

/// DEBUGで出力し、`depth` だけ外側の呼び出し元を記録
#[track_caller]
pub fn call_depth_debug(depth: usize, args: &[&dyn Display]) {
    print_with(Severity::Debug, depth, || sprintln(args));
}

#[track_caller]
pub fn call_depth_debugf(depth: usize, args: fmt::Arguments<'_>) {
    print_with(Severity::Debug, depth, || args.to_string());
}

/// INFOで出力（引数は空白区切り、末尾に改行）
#[track_caller]
pub fn info(args: &[&dyn Display]) {
    call_depth_info(DEFAULT_CALL_DEPTH, args);
}

/// INFOで書式付き出力
#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    call_depth_infof(DEFAULT_CALL_DEPTH, args);
}

#[track_caller]
pub fn call_depth_info(depth: usize, args: &[&dyn Display]) {
    print_with(Severity::Info, depth, || sprintln(args));
}

#[track_caller]
pub fn call_depth_infof(depth: usize, args: fmt::Arguments<'_>) {
    print_with(Severity::Info, depth, || args.to_string());
}

/// ERRORで出力（引数は空白区切り、末尾に改行）
#[track_caller]
pub fn error(args: &[&dyn Display]) {
    call_depth_error(DEFAULT_CALL_DEPTH, args);
}

/// ERRORで書式付き出力
#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    call_depth_errorf(DEFAULT_CALL_DEPTH, args);
}

#[track_caller]
pub fn call_depth_error(depth: usize, args: &[&dyn Display]) {
    print_with(Severity::Error, depth, || sprintln(args));
}

#[track_caller]
pub fn call_depth_errorf(depth: usize, args: fmt::Arguments<'_>) {
    print_with(Severity::Error, depth, || args.to_string());
}

/// FATALで出力してプロセスを終了（終了コード1）
///
/// しきい値で出力が抑制されても終了する。
#[track_caller]
pub fn fatal(args: &[&dyn Display]) -> ! {
    call_depth_fatal(DEFAULT_CALL_DEPTH, args)
}

/// FATALで書式付き出力してプロセスを終了
#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    call_depth_fatalf(DEFAULT_CALL_DEPTH, args)
}

#[track_caller]
pub fn call_depth_fatal(depth: usize, args: &[&dyn Display]) -> ! {
    fatal_with(depth, || with_suffix(sprint(args), FATAL_SUFFIX))
}

#[track_caller]
pub fn call_depth_fatalf(depth: usize, args: fmt::Arguments<'_>) -> ! {
    fatal_with(depth, || with_suffix(args, FATAL_SUFFIX))
}

/// PANICで出力し、書き込んだメッセージでpanicする
///
/// しきい値で抑制された場合は出力もpanicもしない。
#[track_caller]
pub fn panic(args: &[&dyn Display]) {
    call_depth_panic(DEFAULT_CALL_DEPTH, args);
}

/// PANICで書式付き出力し、書き込んだメッセージでpanicする
#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) {
    call_depth_panicf(DEFAULT_CALL_DEPTH, args);
}

/// `depth` は記録する呼び出し元にだけ効く。panic自体の発生位置
/// は常に直接の呼び出し元になる。
#[track_caller]
pub fn call_depth_panic(depth: usize, args: &[&dyn Display]) {
    panic_with(depth, || with_suffix(sprint(args), PANIC_SUFFIX));
}

/// `depth` は記録する呼び出し元にだけ効く。panic自体の発生位置
/// は常に直接の呼び出し元になる。
#[track_caller]
pub fn call_depth_panicf(depth: usize, args: fmt::Arguments<'_>) {
    panic_with(depth, || with_suffix(args, PANIC_SUFFIX));
}

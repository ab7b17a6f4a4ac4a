//! 呼び出し元モジュール
//!
//! ログ行に記録するソース位置を解決する。公開APIは全て `#[track_caller]` なので、
//! 深さ0はログ関数を直接呼んだ位置になる。ラッパー関数から呼ぶ場合は深さを指定すると、
//! スタックをその分だけ遡った位置を記録する。

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::path::Path;

/// 直接呼び出し時の深さ
pub const DEFAULT_CALL_DEPTH: usize = 0;

/// ソース上の呼び出し位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    file: Cow<'static, str>,
    line: u32,
}

impl CallSite {
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// 呼び出し元を解決
    ///
    /// `depth` が0なら直接の呼び出し元。スタックを解決できない場合も直接の呼び出し元になる。
    #[track_caller]
    pub fn caller(depth: usize) -> Self {
        let anchor = Location::caller();
        if depth == DEFAULT_CALL_DEPTH {
            return Self::from_location(anchor);
        }
        ascend(anchor, depth).unwrap_or_else(|| Self::from_location(anchor))
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// ファイル名部分のみ
    pub fn short_file(&self) -> &str {
        Path::new(self.file.as_ref())
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file.as_ref())
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.short_file(), self.line)
    }
}

/// スタックを辿り、`anchor` のフレームから `depth` 個外側の位置を返す
fn ascend(anchor: &Location<'_>, depth: usize) -> Option<CallSite> {
    let mut remaining: Option<usize> = None;
    let mut found: Option<CallSite> = None;

    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            if found.is_some() {
                return;
            }
            let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) else {
                return;
            };
            match remaining {
                None => {
                    if line == anchor.line() && file.ends_with(anchor.file()) {
                        remaining = Some(depth);
                    }
                }
                Some(n) => {
                    let n = n - 1;
                    remaining = Some(n);
                    if n == 0 {
                        found = Some(CallSite::new(file.to_string_lossy().into_owned(), line));
                    }
                }
            }
        });
        found.is_none()
    });

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline(never)]
    fn wrapped_caller(depth: usize) -> CallSite {
        CallSite::caller(depth)
    }

    #[test]
    fn test_default_depth_is_direct_caller() {
        let expected = line!() + 1;
        let site = CallSite::caller(DEFAULT_CALL_DEPTH);
        assert_eq!(site.line(), expected);
        assert_eq!(site.short_file(), "call_site.rs");
    }

    #[test]
    fn test_depth_one_reports_wrapper_caller() {
        let expected = line!() + 1;
        let site = wrapped_caller(1);
        assert_eq!(site.line(), expected);
        assert_eq!(site.short_file(), "call_site.rs");
    }

    #[test]
    fn test_display_uses_short_file() {
        let site = CallSite::new("src/nested/handler.rs", 42);
        assert_eq!(site.to_string(), "handler.rs:42");
        assert_eq!(site.file(), "src/nested/handler.rs");
    }
}

//! ログ出力マクロ
//!
//! `infof!("{} {}", a, b)` は書式付き、`infoln!(a, b)` は空白区切り＋改行で出力する。

/// DEBUGで書式付き出力
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::debugf(::std::format_args!($($arg)+))
    };
}

/// INFOで書式付き出力
#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::infof(::std::format_args!($($arg)+))
    };
}

/// ERRORで書式付き出力
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::errorf(::std::format_args!($($arg)+))
    };
}

/// FATALで書式付き出力して終了
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::fatalf(::std::format_args!($($arg)+))
    };
}

/// PANICで書式付き出力してpanic
#[macro_export]
macro_rules! panicf {
    ($($arg:tt)+) => {
        $crate::panicf(::std::format_args!($($arg)+))
    };
}

/// DEBUGで空白区切り出力
#[macro_export]
macro_rules! debugln {
    ($($arg:expr),* $(,)?) => {
        $crate::debug(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// INFOで空白区切り出力
#[macro_export]
macro_rules! infoln {
    ($($arg:expr),* $(,)?) => {
        $crate::info(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// ERRORで空白区切り出力
#[macro_export]
macro_rules! errorln {
    ($($arg:expr),* $(,)?) => {
        $crate::error(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// FATALで空白区切り出力して終了
#[macro_export]
macro_rules! fatalln {
    ($($arg:expr),* $(,)?) => {
        $crate::fatal(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// PANICで空白区切り出力してpanic
#[macro_export]
macro_rules! panicln {
    ($($arg:expr),* $(,)?) => {
        $crate::panic(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

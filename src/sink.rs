//! 出力先モジュール

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// 出力先の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// DEBUG/INFO の出力先（デフォルト: stdout）
    Normal,
    /// ERROR/FATAL/PANIC の出力先（デフォルト: stderr）
    Diagnostic,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Normal => write!(f, "通常出力(stdout)"),
            SinkKind::Diagnostic => write!(f, "診断出力(stderr)"),
        }
    }
}

/// ログの書き込み先
pub enum Destination {
    Stdout,
    Stderr,
    Writer(Box<dyn Write + Send>),
}

impl Destination {
    /// 任意のWriterを出力先にする
    pub fn writer<W: Write + Send + 'static>(writer: W) -> Self {
        Destination::Writer(Box::new(writer))
    }

    /// ファイルを追記モードで開く
    ///
    /// 親ディレクトリが存在しない場合は作成する。
    pub fn append_file(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let file: File = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Destination::writer(file))
    }

    /// 種類ごとのデフォルト出力先
    pub fn default_for(kind: SinkKind) -> Self {
        match kind {
            SinkKind::Normal => Destination::Stdout,
            SinkKind::Diagnostic => Destination::Stderr,
        }
    }

    fn into_writer(self) -> Box<dyn Write + Send> {
        match self {
            Destination::Stdout => Box::new(io::stdout()),
            Destination::Stderr => Box::new(io::stderr()),
            Destination::Writer(writer) => writer,
        }
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => f.write_str("Stdout"),
            Destination::Stderr => f.write_str("Stderr"),
            Destination::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

/// 排他制御付きの出力先
///
/// 1行を1回のロック内で書き込むため、複数スレッドからの出力が混ざらない。
pub(crate) struct Sink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Sink {
    pub(crate) fn new(destination: Destination) -> Self {
        Self {
            out: Mutex::new(destination.into_writer()),
        }
    }

    /// 1行を書き込んでフラッシュ
    pub(crate) fn write_line(&self, line: &str) -> io::Result<()> {
        // ロック保持中にpanicしないので、poisonされていても中身は壊れていない
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(line.as_bytes())?;
        out.flush()
    }
}

/// メモリ上に出力を溜めるWriter
///
/// クローンは同じバッファを共有する。
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// 新しいCaptureBufferを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// これまでの出力を文字列で取得
    pub fn contents(&self) -> String {
        let buf = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// バッファを空にする
    pub fn clear(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

//! 複数スレッドからの同時初回呼び出し
//!
//! ロガーが未構築の状態から始める必要があるので、このファイルのテストは1つだけ。

use leveled_log::{CaptureBuffer, Destination, LevelFilter, Logger, LoggerError, SinkKind};
use std::sync::{Arc, Barrier};
use std::thread;

const WORKERS: usize = 16;

#[test]
fn test_concurrent_first_use_builds_once() {
    let normal = CaptureBuffer::new();
    let diagnostic = CaptureBuffer::new();
    let late_normal = CaptureBuffer::new();

    leveled_log::redirect_normal(Destination::writer(normal.clone())).unwrap();
    leveled_log::redirect_diagnostic(Destination::writer(diagnostic.clone())).unwrap();
    leveled_log::set_threshold(LevelFilter::Debug).unwrap();

    // ワーカーに加えて、構築と競合する出力先変更を1スレッド
    let barrier = Arc::new(Barrier::new(WORKERS + 1));
    let workers: Vec<_> = (0..WORKERS)
        .map(|i| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let logger = leveled_log::instance();
                leveled_log::infof(format_args!("worker {}", i));
                logger as *const Logger as usize
            })
        })
        .collect();
    let redirector = {
        let barrier = Arc::clone(&barrier);
        let late_normal = late_normal.clone();
        thread::spawn(move || {
            barrier.wait();
            leveled_log::redirect_normal(Destination::writer(late_normal))
        })
    };

    let addresses: Vec<usize> = workers
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    let redirected = redirector.join().unwrap();

    let built = leveled_log::instance() as *const Logger as usize;
    assert!(addresses.iter().all(|&address| address == built));

    // 競合した変更は反映されるか拒否されるかのどちらかで、失われない
    let (taken, untouched) = match redirected {
        Ok(()) => {
            assert_eq!(diagnostic.contents(), "");
            (late_normal, normal)
        }
        Err(err) => {
            assert!(matches!(
                err,
                LoggerError::RedirectFrozen {
                    sink: SinkKind::Normal
                }
            ));
            let rejected = diagnostic.contents();
            assert_eq!(rejected.lines().count(), 1);
            assert!(rejected.starts_with("ERROR"), "got: {}", rejected);
            (normal, late_normal)
        }
    };

    assert_eq!(untouched.contents(), "");
    let output = taken.contents();
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines.len(), WORKERS);
    for i in 0..WORKERS {
        let suffix = format!(": worker {}", i);
        assert_eq!(
            lines.iter().filter(|line| line.ends_with(&suffix)).count(),
            1,
            "missing worker {} in {}",
            i,
            output
        );
    }
    assert!(lines.iter().all(|line| line.starts_with("INFO")));
}

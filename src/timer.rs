use std::time::{Duration, Instant};

use log::info;

/// スコープの実行時間を計測する。
///
/// `stop`を呼ぶか値が破棄されたときに経過時間を`info`レベルでログに出力する。
/// 計測値は同じ実行内での比較にのみ使うこと。
#[derive(Debug)]
pub struct ScopeTimer {
    label: String,
    start: Instant,
    reported: bool,
}

impl ScopeTimer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
            reported: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// 計測を終了し、経過時間を返す。
    pub fn stop(mut self) -> Duration {
        self.report().unwrap_or_else(|| self.elapsed())
    }

    /// 経過時間をログに出力する。出力済みなら何もせず`None`を返す。
    fn report(&mut self) -> Option<Duration> {
        if self.reported {
            return None;
        }
        let elapsed = self.elapsed();
        self.reported = true;
        let us = elapsed.as_micros();
        info!("{}: {us}us ({}ms)", self.label, us as f64 * 0.001);
        Some(elapsed)
    }
}

impl Drop for ScopeTimer {
    fn drop(&mut self) {
        self.report();
    }
}

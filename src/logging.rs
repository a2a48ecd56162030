use crate::error::Result;
use crate::notifier::{ChangeDirective, DirectiveSink};
use crate::options::{ensure_parent_dir, TrackerOptions};
use log::warn;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// ログ出力先の既定優先度（読み上げ・点字の出力先は既定で0）
pub const DEFAULT_LOG_PRIORITY: i32 = -10;

/// ディレクティブを JSON Lines 形式で出力するロガー
pub struct DirectiveLog {
    path: PathBuf,
    priority: i32,
}

impl DirectiveLog {
    pub fn new(path: PathBuf) -> Result<Self> {
        ensure_parent_dir(&path)?;
        Ok(Self {
            path,
            priority: DEFAULT_LOG_PRIORITY,
        })
    }

    /// オプションで指定された出力先（未指定時は既定パス）で作成
    pub fn from_options(options: &TrackerOptions) -> Result<Option<Self>> {
        options.resolve_log_path().map(Self::new).transpose()
    }

    /// 配信優先度を指定（既定では読み上げ系の出力先より後に受け取る）
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn log_event<T: Serialize>(&self, tag: &str, payload: &T) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let record = serde_json::json!({
            "tag": tag,
            "ts": timestamp_ms(),
            "payload": payload
        });
        let line = serde_json::to_string(&record).map_err(io::Error::from)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl DirectiveSink for DirectiveLog {
    fn on_directive(&mut self, directive: &ChangeDirective) {
        if let Err(err) = self.log_event("directive", directive) {
            warn!("failed to write directive log {}: {}", self.path.display(), err);
        }
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_millis())
        .unwrap_or_default()
}

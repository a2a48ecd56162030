use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 編集追跡の動作オプション
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackerOptions {
    /// ホストが報告する折り返し候補を行区切りとして扱うか
    pub honor_soft_wraps: bool,
    /// 値の末尾空白を取り除いてから差分を取るか（電話番号入力欄など）
    pub trim_trailing_whitespace: bool,
    /// ディレクティブログ出力先（未指定時は `~/.edittrack-log/directives.log`）
    pub directive_log_path: Option<PathBuf>,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            honor_soft_wraps: true,
            trim_trailing_whitespace: false,
            directive_log_path: None,
        }
    }
}

impl TrackerOptions {
    /// JSON文字列から読み込む（省略されたキーは既定値）
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::from(e).into())
    }

    /// JSONファイルから読み込む
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|_| ConfigError::InvalidFile {
            path: path.display().to_string(),
        })?;
        Self::from_json_str(&json)
    }

    pub fn resolve_log_path(&self) -> Option<PathBuf> {
        match &self.directive_log_path {
            Some(path) => Some(path.clone()),
            None => default_log_path(),
        }
    }

    /// `overrides` 側で指定された値を優先して合成する
    pub fn merged_with(&self, overrides: &PartialTrackerOptions) -> TrackerOptions {
        TrackerOptions {
            honor_soft_wraps: overrides.honor_soft_wraps.unwrap_or(self.honor_soft_wraps),
            trim_trailing_whitespace: overrides
                .trim_trailing_whitespace
                .unwrap_or(self.trim_trailing_whitespace),
            directive_log_path: overrides
                .directive_log_path
                .clone()
                .or_else(|| self.directive_log_path.clone()),
        }
    }
}

/// フィールド単位の上書き設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialTrackerOptions {
    pub honor_soft_wraps: Option<bool>,
    pub trim_trailing_whitespace: Option<bool>,
    pub directive_log_path: Option<PathBuf>,
}

fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".edittrack-log").join("directives.log"))
}

/// ヘルパー：親ディレクトリを作成
pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

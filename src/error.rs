//! エラーハンドリングシステム
//!
//! 編集追跡で使用される統一されたエラー型を定義
//! イベント処理のホットパス（update/describe/行クエリ）はエラーを返さず、範囲外の値は丸める

use thiserror::Error;

/// クレート全体のエラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditTrackError {
    /// モデル生成元のノードが存在しない（ライフサイクル所有者の設定ミス）
    #[error("Editable source is missing")]
    MissingSource,

    /// レジストリに登録されていないハンドル
    #[error("Unknown field handle: {handle}")]
    UnknownHandle { handle: String },

    /// 設定エラー
    #[error("Configuration error")]
    Config(#[from] ConfigError),

    /// 入出力エラー（ディレクティブログ）
    #[error("IO error: {message}")]
    Io { message: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration file: {path}")]
    InvalidFile { path: String },

    #[error("Failed to parse configuration: {message}")]
    Parse { message: String },
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, EditTrackError>;

// std::io::Error から EditTrackError への変換
impl From<std::io::Error> for EditTrackError {
    fn from(error: std::io::Error) -> Self {
        EditTrackError::Io {
            message: error.to_string(),
        }
    }
}

// serde_json::Error から ConfigError への変換
impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Parse {
            message: error.to_string(),
        }
    }
}

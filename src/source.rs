//! 編集可能ノードの抽象
//!
//! ホスト側のアクセシビリティノードをこのクレートに渡すための能力インターフェース。
//! 値・選択範囲・折り返し候補・フラグを提供できる型なら何でもモデルの入力になる。

use crate::line_breaks::SoftWrapOffsets;
use serde::{Deserialize, Serialize};

/// 編集可能フィールドの読み取り能力
pub trait EditableSource {
    /// 現在の値
    fn value(&self) -> &str;

    /// 選択開始オフセット（ホストの生の値、範囲外でもよい）
    fn selection_start(&self) -> isize;

    /// 選択終了オフセット（ホストの生の値、範囲外でもよい）
    fn selection_end(&self) -> isize;

    /// ホストが報告する折り返し候補
    fn soft_wrap_offsets(&self) -> SoftWrapOffsets {
        SoftWrapOffsets::new()
    }

    fn is_password(&self) -> bool {
        false
    }

    fn is_multiline(&self) -> bool {
        false
    }
}

/// イベント1件分のフィールド状態
///
/// ホストアダプターやリプレイ用の素朴な実装。JSONから読み込める。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldEvent {
    pub value: String,
    pub selection_start: isize,
    pub selection_end: isize,
    pub soft_wrap_offsets: SoftWrapOffsets,
    pub is_password: bool,
    pub is_multiline: bool,
}

impl FieldEvent {
    /// 単一行フィールドのイベント
    pub fn single_line(value: impl Into<String>, selection_start: isize, selection_end: isize) -> Self {
        Self {
            value: value.into(),
            selection_start,
            selection_end,
            ..Self::default()
        }
    }

    /// 複数行フィールドのイベント
    pub fn multiline(value: impl Into<String>, selection_start: isize, selection_end: isize) -> Self {
        Self {
            is_multiline: true,
            ..Self::single_line(value, selection_start, selection_end)
        }
    }

    pub fn with_soft_wraps(mut self, offsets: impl IntoIterator<Item = usize>) -> Self {
        self.soft_wrap_offsets = offsets.into_iter().collect();
        self
    }

    pub fn password(mut self) -> Self {
        self.is_password = true;
        self
    }
}

impl EditableSource for FieldEvent {
    fn value(&self) -> &str {
        &self.value
    }

    fn selection_start(&self) -> isize {
        self.selection_start
    }

    fn selection_end(&self) -> isize {
        self.selection_end
    }

    fn soft_wrap_offsets(&self) -> SoftWrapOffsets {
        self.soft_wrap_offsets.clone()
    }

    fn is_password(&self) -> bool {
        self.is_password
    }

    fn is_multiline(&self) -> bool {
        self.is_multiline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_event_from_json_uses_defaults() {
        let event: FieldEvent =
            serde_json::from_str(r#"{"value":"a\nb","selection_start":2,"is_multiline":true}"#)
                .unwrap();

        assert_eq!(event.value(), "a\nb");
        assert_eq!(event.selection_start(), 2);
        assert_eq!(event.selection_end(), 0);
        assert!(event.is_multiline());
        assert!(!event.is_password());
        assert!(event.soft_wrap_offsets().is_empty());
    }

    #[test]
    fn test_builders() {
        let event = FieldEvent::multiline("wrap me", 0, 0)
            .with_soft_wraps([5, 2, 5])
            .password();

        assert!(event.is_multiline());
        assert!(event.is_password());
        assert_eq!(event.soft_wrap_offsets().into_iter().collect::<Vec<_>>(), vec![2, 5]);
    }
}

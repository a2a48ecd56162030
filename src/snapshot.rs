//! テキストスナップショット
//!
//! イベント発生時点のフィールド状態を不変値として保持する

use crate::text::{TextRange, TextValue};
use serde::{Deserialize, Serialize};

/// 選択範囲（`start <= end` を常に満たす）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// ホストから届いた生のオフセットを `[0, len]` に丸め、順序を正規化する
    ///
    /// アクセシビリティツリーの値はテキスト長と瞬間的に食い違うことがあるため、
    /// 範囲外の値は拒否せず丸める。
    pub fn clamped(start: isize, end: isize, len: usize) -> Self {
        let clamp = |offset: isize| -> usize {
            if offset <= 0 {
                0
            } else {
                (offset as usize).min(len)
            }
        };
        let (a, b) = (clamp(start), clamp(end));
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// カーソル位置（選択なし）
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn as_range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }
}

/// フィールド状態のスナップショット
///
/// 更新イベントごとに丸ごと置き換えられ、部分的に変更されることはない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSnapshot {
    value: TextValue,
    selection: Selection,
    is_password: bool,
    is_multiline: bool,
}

impl TextSnapshot {
    pub fn new(
        value: TextValue,
        selection_start: isize,
        selection_end: isize,
        is_password: bool,
        is_multiline: bool,
    ) -> Self {
        let selection = Selection::clamped(selection_start, selection_end, value.len());
        Self {
            value,
            selection,
            is_password,
            is_multiline,
        }
    }

    /// 同じフラグで値と選択範囲を差し替えた新しいスナップショット
    pub fn successor(&self, value: TextValue, selection_start: isize, selection_end: isize) -> Self {
        Self::new(
            value,
            selection_start,
            selection_end,
            self.is_password,
            self.is_multiline,
        )
    }

    pub fn value(&self) -> &TextValue {
        &self.value
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selection_start(&self) -> usize {
        self.selection.start
    }

    pub fn selection_end(&self) -> usize {
        self.selection.end
    }

    pub fn is_password(&self) -> bool {
        self.is_password
    }

    pub fn is_multiline(&self) -> bool {
        self.is_multiline
    }

    /// 読み上げ側に渡してよい本文（パスワードの場合は `None`）
    pub fn exposed_text(&self, range: TextRange) -> Option<String> {
        if self.is_password {
            None
        } else {
            Some(self.value.slice(range))
        }
    }
}

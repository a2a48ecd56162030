//! テキスト差分
//!
//! 旧値と新値の共通接頭辞・共通接尾辞を取り除き、変化した最小区間を求める

use crate::text::{TextRange, TextValue};
use serde::{Deserialize, Serialize};

/// 変更の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    /// 文字が挿入された
    Inserted,
    /// 文字が削除された
    Deleted,
    /// 文字が置き換えられた
    Replaced,
}

/// 旧値 `[start, old_end)` が新値 `[start, new_end)` に置き換わったことを表す
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChange {
    pub start: usize,
    pub old_end: usize,
    pub new_end: usize,
}

impl TextChange {
    /// 文字列を比較して変化区間を求める（同一なら `None`）
    pub fn between(old: &TextValue, new: &TextValue) -> Option<Self> {
        if old.same_content(new) {
            return None;
        }
        Some(Self::from_chars(old.chars(), new.chars()))
    }

    /// 文字配列から変化区間を求める
    ///
    /// 接尾辞は接頭辞と重ならない範囲でのみ一致を数える。
    pub fn from_chars(old: &[char], new: &[char]) -> Self {
        let prefix = old
            .iter()
            .zip(new.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let max_suffix = old.len().min(new.len()) - prefix;
        let suffix = old
            .iter()
            .rev()
            .zip(new.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        Self {
            start: prefix,
            old_end: old.len() - suffix,
            new_end: new.len() - suffix,
        }
    }

    /// 新値における変化範囲
    pub fn changed_range(&self) -> TextRange {
        TextRange::new(self.start, self.new_end)
    }

    /// 旧値における変化範囲
    pub fn replaced_range(&self) -> TextRange {
        TextRange::new(self.start, self.old_end)
    }

    pub fn inserted_len(&self) -> usize {
        self.new_end - self.start
    }

    pub fn deleted_len(&self) -> usize {
        self.old_end - self.start
    }

    pub fn kind(&self) -> ChangeKind {
        match (self.deleted_len(), self.inserted_len()) {
            (0, _) => ChangeKind::Inserted,
            (_, 0) => ChangeKind::Deleted,
            _ => ChangeKind::Replaced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(old: &str, new: &str) -> Option<TextChange> {
        TextChange::between(&TextValue::new(old), &TextValue::new(new))
    }

    #[test]
    fn test_identical_values_have_no_change() {
        assert_eq!(change("same", "same"), None);
        assert_eq!(change("", ""), None);
    }

    #[test]
    fn test_suffix_replacement_is_minimal() {
        let diff = change("hello world", "hello there").unwrap();
        assert_eq!(diff.changed_range(), TextRange::new(6, 11));
        assert_eq!(diff.replaced_range(), TextRange::new(6, 11));
        assert_eq!(diff.kind(), ChangeKind::Replaced);
    }

    #[test]
    fn test_insertion_in_middle() {
        let diff = change("helo", "hello").unwrap();
        // the repeated 'l' makes the prefix absorb the insertion point
        assert_eq!(diff.start, 3);
        assert_eq!(diff.inserted_len(), 1);
        assert_eq!(diff.deleted_len(), 0);
        assert_eq!(diff.kind(), ChangeKind::Inserted);
    }

    #[test]
    fn test_deletion_at_end() {
        let diff = change("this is a test", "this is a ").unwrap();
        assert_eq!(diff.replaced_range(), TextRange::new(10, 14));
        assert_eq!(diff.changed_range(), TextRange::collapsed(10));
        assert_eq!(diff.kind(), ChangeKind::Deleted);
    }

    #[test]
    fn test_suffix_does_not_overlap_prefix() {
        // "aa" -> "aaa": prefix 2, suffix may only cover what is left
        let diff = change("aa", "aaa").unwrap();
        assert_eq!(diff.start, 2);
        assert_eq!(diff.old_end, 2);
        assert_eq!(diff.new_end, 3);
    }

    #[test]
    fn test_full_replacement() {
        let diff = change("abc", "xyz").unwrap();
        assert_eq!(diff.changed_range(), TextRange::new(0, 3));
        assert_eq!(diff.kind(), ChangeKind::Replaced);
    }

    #[test]
    fn test_multibyte_offsets_are_in_chars() {
        let diff = change("日本語です", "日本人です").unwrap();
        assert_eq!(diff.changed_range(), TextRange::new(2, 3));
    }
}

//! テキスト値と範囲
//!
//! 文字（Unicodeスカラー値）単位のオフセットで扱う不変テキスト

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 世代番号の払い出しカウンター
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// 半開区間 `[start, end)` の文字範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    /// 範囲を作成（start > end の場合は入れ替える）
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// 長さ0の範囲
    pub fn collapsed(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// 上限 `len` に収まるよう丸める
    pub fn clamped_to(&self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// 不変のテキスト値
///
/// 文字列と文字配列を共有ストレージで保持する。生成ごとに一意な世代番号を持ち、
/// 行区切りキャッシュはこの世代番号で無効化を判定する。
#[derive(Clone)]
pub struct TextValue {
    text: Arc<str>,
    chars: Arc<[char]>,
    generation: u64,
}

impl TextValue {
    pub fn new(text: impl Into<String>) -> Self {
        let text: String = text.into();
        let chars: Arc<[char]> = text.chars().collect::<Vec<_>>().into();
        Self {
            text: Arc::from(text),
            chars,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn empty() -> Self {
        Self::new(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// 文字数
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// 内容が等しいか（世代番号は比較しない）
    pub fn same_content(&self, other: &TextValue) -> bool {
        self.generation == other.generation || self.chars == other.chars
    }

    /// 範囲内の文字列を取り出す（範囲は丸められる）
    pub fn slice(&self, range: TextRange) -> String {
        let range = range.clamped_to(self.len());
        self.chars[range.start..range.end].iter().collect()
    }
}

impl PartialEq for TextValue {
    fn eq(&self, other: &Self) -> bool {
        self.same_content(other)
    }
}

impl Eq for TextValue {}

impl fmt::Debug for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextValue")
            .field("text", &self.text)
            .field("generation", &self.generation)
            .finish()
    }
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Default for TextValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for TextValue {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextValue {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

//! 行区切りインデクサー
//!
//! テキスト中の改行（ハードブレーク）と、ホストから報告される折り返し候補位置
//! （ソフトブレーク）を統合し、各行の開始オフセット列を求める。
//! 行番号・行頭・行末の問い合わせは二分探索で O(log n)。

use crate::text::{TextRange, TextValue};
use log::trace;
use serde::Serialize;
use std::collections::BTreeSet;

/// ホストが報告する折り返し候補オフセット
pub type SoftWrapOffsets = BTreeSet<usize>;

static EMPTY_BREAKS: LineBreakSet = LineBreakSet { breaks: Vec::new() };

/// 行開始オフセットの集合（狭義単調増加）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LineBreakSet {
    breaks: Vec<usize>,
}

impl LineBreakSet {
    /// 文字列を一度だけ走査して行区切りを求める
    ///
    /// * 直前の文字が `'\n'` なら必ず採用（ハードブレーク）
    /// * 報告済みのソフト候補は、ハードブレーク位置とその前後1文字を除いて採用
    ///   （`value[i-1]`・`value[i]` が `'\n'` の位置、および `value[i-2]` が
    ///   `'\n'` となるハードブレーク直後の位置は不採用）
    ///
    /// 走査順がそのまま昇順になるため、ソートや重複除去は不要。
    pub fn compute(chars: &[char], soft_offsets: &SoftWrapOffsets) -> Self {
        let mut breaks = Vec::new();

        for i in 1..chars.len() {
            if chars[i - 1] == '\n' {
                breaks.push(i);
            } else if soft_offsets.contains(&i)
                && chars[i] != '\n'
                && (i < 2 || chars[i - 2] != '\n')
            {
                breaks.push(i);
            }
        }

        Self { breaks }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.breaks
    }

    pub fn len(&self) -> usize {
        self.breaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breaks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<usize> {
        self.breaks.get(index).copied()
    }

    /// `offset` 以下の区切りの数（境界上のオフセットは後続行に属する）
    pub fn line_index_of(&self, offset: usize) -> usize {
        self.breaks.partition_point(|&start| start <= offset)
    }
}

/// キャッシュ済みの計算結果
#[derive(Debug, Clone)]
struct BreakCache {
    generation: u64,
    soft_offsets: SoftWrapOffsets,
    breaks: LineBreakSet,
}

/// 行区切りの計算と行クエリ
///
/// 計算結果はテキストの世代番号と候補集合をキーにキャッシュされ、
/// 同じ入力での再計算は行わない。範囲外の問い合わせは境界値に丸める。
#[derive(Debug, Clone)]
pub struct LineBreakIndexer {
    multiline: bool,
    value: TextValue,
    cache: Option<BreakCache>,
    computations: usize,
}

impl LineBreakIndexer {
    /// 複数行フィールド用のインデクサー
    pub fn new() -> Self {
        Self::with_multiline(true)
    }

    /// 単一行フィールド用（行区切りは常に空）
    pub fn single_line() -> Self {
        Self::with_multiline(false)
    }

    pub fn with_multiline(multiline: bool) -> Self {
        Self {
            multiline,
            value: TextValue::empty(),
            cache: None,
            computations: 0,
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// 複数行フラグを切り替える（変化した場合はキャッシュを破棄）
    pub fn set_multiline(&mut self, multiline: bool) {
        if self.multiline != multiline {
            self.multiline = multiline;
            self.invalidate();
        }
    }

    /// キャッシュを破棄する
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// 実際に走査を行った回数
    pub fn computations(&self) -> usize {
        self.computations
    }

    /// 行区切りを計算する（入力が前回と同じならキャッシュを返す）
    pub fn compute_breaks(
        &mut self,
        value: &TextValue,
        soft_offsets: &SoftWrapOffsets,
    ) -> &LineBreakSet {
        let hit = self.cache.as_ref().is_some_and(|cache| {
            cache.soft_offsets == *soft_offsets
                && (cache.generation == value.generation() || self.value.same_content(value))
        });

        if hit {
            if let Some(cache) = self.cache.as_mut() {
                cache.generation = value.generation();
            }
        } else {
            let breaks = if self.multiline {
                self.computations += 1;
                LineBreakSet::compute(value.chars(), soft_offsets)
            } else {
                LineBreakSet::default()
            };
            trace!(
                "line breaks rebuilt: generation={} chars={} breaks={}",
                value.generation(),
                value.len(),
                breaks.len()
            );
            self.cache = Some(BreakCache {
                generation: value.generation(),
                soft_offsets: soft_offsets.clone(),
                breaks,
            });
        }

        self.value = value.clone();
        self.breaks()
    }

    /// 現在の行区切り（未計算なら空）
    pub fn breaks(&self) -> &LineBreakSet {
        self.cache
            .as_ref()
            .map(|cache| &cache.breaks)
            .unwrap_or(&EMPTY_BREAKS)
    }

    /// 計算対象のテキスト
    pub fn value(&self) -> &TextValue {
        &self.value
    }

    /// 行数（最終行は開いた区間として数える）
    pub fn line_count(&self) -> usize {
        self.breaks().len() + 1
    }

    /// 文字オフセットが属する行番号
    pub fn line_index_of(&self, offset: usize) -> usize {
        if !self.multiline {
            return 0;
        }
        self.breaks().line_index_of(offset)
    }

    /// 行頭オフセット（存在しない行はテキスト末尾）
    pub fn line_start(&self, line: usize) -> usize {
        if line == 0 {
            return 0;
        }
        self.breaks()
            .get(line - 1)
            .unwrap_or_else(|| self.value.len())
    }

    /// 行の最後の文字のオフセット
    ///
    /// ハードブレークの改行文字自体は含まない。空行では行頭に丸める。
    /// 最終行以降はテキスト長を返す。
    pub fn line_end(&self, line: usize) -> usize {
        if line >= self.breaks().len() {
            return self.value.len();
        }
        let exclusive = self.line_end_exclusive(line);
        exclusive.saturating_sub(1).max(self.line_start(line))
    }

    /// 行末（改行文字を除いた排他的な終端）
    ///
    /// 末尾の改行は区切りを生まないため、最終行でも改行文字を除く。
    pub fn line_end_exclusive(&self, line: usize) -> usize {
        let start = self.line_start(line);
        let end = self
            .breaks()
            .get(line)
            .unwrap_or_else(|| self.value.len())
            .max(start);
        if end > start && self.value.char_at(end - 1) == Some('\n') {
            end - 1
        } else {
            end
        }
    }

    /// 行の範囲（改行文字を除く）
    pub fn line_range(&self, line: usize) -> TextRange {
        TextRange::new(self.line_start(line), self.line_end_exclusive(line))
    }
}

impl Default for LineBreakIndexer {
    fn default() -> Self {
        Self::new()
    }
}

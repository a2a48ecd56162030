//! 編集可能テキストモデル
//!
//! フォーカス中のフィールド1つにつき1インスタンス。最新のスナップショットと
//! 行区切りキャッシュを排他的に所有し、更新イベントごとにディレクティブを返す。

use crate::error::{EditTrackError, Result};
use crate::line_breaks::{LineBreakIndexer, SoftWrapOffsets};
use crate::notifier::{ChangeDirective, ChangeNotifier};
use crate::options::TrackerOptions;
use crate::snapshot::{Selection, TextSnapshot};
use crate::source::EditableSource;
use crate::text::{TextRange, TextValue};
use unicode_width::UnicodeWidthChar;

static NO_SOFT_WRAPS: SoftWrapOffsets = SoftWrapOffsets::new();

/// 行・列を含む位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePosition {
    /// 行番号（0ベース）
    pub line: usize,
    /// 行頭からの文字数
    pub column: usize,
    /// 行頭からの表示幅（全角文字は2セル）
    pub display_column: usize,
}

/// 編集可能フィールドの状態
#[derive(Debug, Clone)]
pub struct EditableTextModel {
    snapshot: TextSnapshot,
    soft_wraps: SoftWrapOffsets,
    indexer: LineBreakIndexer,
    options: TrackerOptions,
}

impl EditableTextModel {
    /// 既定オプションでモデルを作成
    pub fn initialize(
        value: impl Into<String>,
        selection_start: isize,
        selection_end: isize,
        is_password: bool,
        is_multiline: bool,
    ) -> Self {
        Self::with_options(
            value,
            selection_start,
            selection_end,
            is_password,
            is_multiline,
            TrackerOptions::default(),
        )
    }

    pub fn with_options(
        value: impl Into<String>,
        selection_start: isize,
        selection_end: isize,
        is_password: bool,
        is_multiline: bool,
        options: TrackerOptions,
    ) -> Self {
        Self::build(
            value.into(),
            selection_start,
            selection_end,
            is_password,
            is_multiline,
            SoftWrapOffsets::new(),
            options,
        )
    }

    fn build(
        value: String,
        selection_start: isize,
        selection_end: isize,
        is_password: bool,
        is_multiline: bool,
        soft_wraps: SoftWrapOffsets,
        options: TrackerOptions,
    ) -> Self {
        let value = TextValue::new(normalize(value, is_multiline, &options));
        let snapshot = TextSnapshot::new(
            value,
            selection_start,
            selection_end,
            is_password,
            is_multiline,
        );
        let mut model = Self {
            snapshot,
            soft_wraps,
            indexer: LineBreakIndexer::with_multiline(is_multiline),
            options,
        };
        model.refresh_breaks();
        model
    }

    /// ホストのノードからモデルを作成
    ///
    /// ノードが無い場合はライフサイクル所有者側の設定ミスとして扱う。
    pub fn from_source(
        source: Option<&dyn EditableSource>,
        options: &TrackerOptions,
    ) -> Result<Self> {
        let source = source.ok_or(EditTrackError::MissingSource)?;
        Ok(Self::build(
            source.value().to_string(),
            source.selection_start(),
            source.selection_end(),
            source.is_password(),
            source.is_multiline(),
            source.soft_wrap_offsets(),
            options.clone(),
        ))
    }

    /// 値と選択範囲の更新（フラグと折り返し候補は維持）
    pub fn update(
        &mut self,
        new_value: impl Into<String>,
        selection_start: isize,
        selection_end: isize,
    ) -> ChangeDirective {
        let is_password = self.snapshot.is_password();
        let is_multiline = self.snapshot.is_multiline();
        self.transition(
            new_value.into(),
            selection_start,
            selection_end,
            is_password,
            is_multiline,
        )
    }

    /// ホストのイベントをまとめて適用
    pub fn apply(&mut self, source: &dyn EditableSource) -> ChangeDirective {
        self.soft_wraps = source.soft_wrap_offsets();
        self.transition(
            source.value().to_string(),
            source.selection_start(),
            source.selection_end(),
            source.is_password(),
            source.is_multiline(),
        )
    }

    /// 折り返し候補を差し替える
    pub fn set_soft_wraps(&mut self, offsets: SoftWrapOffsets) {
        if self.soft_wraps != offsets {
            self.soft_wraps = offsets;
            self.refresh_breaks();
        }
    }

    fn transition(
        &mut self,
        new_value: String,
        selection_start: isize,
        selection_end: isize,
        is_password: bool,
        is_multiline: bool,
    ) -> ChangeDirective {
        let new_value = normalize(new_value, is_multiline, &self.options);
        let value = if self.snapshot.value().as_str() == new_value {
            self.snapshot.value().clone()
        } else {
            self.indexer.invalidate();
            TextValue::new(new_value)
        };

        let next = TextSnapshot::new(
            value,
            selection_start,
            selection_end,
            is_password,
            is_multiline,
        );
        let previous = std::mem::replace(&mut self.snapshot, next);

        self.indexer.set_multiline(is_multiline);
        self.refresh_breaks();
        ChangeNotifier::describe(&previous, &self.snapshot, &self.indexer)
    }

    fn refresh_breaks(&mut self) {
        let offsets = if self.options.honor_soft_wraps {
            &self.soft_wraps
        } else {
            &NO_SOFT_WRAPS
        };
        self.indexer.compute_breaks(self.snapshot.value(), offsets);
    }

    pub fn snapshot(&self) -> &TextSnapshot {
        &self.snapshot
    }

    pub fn value(&self) -> &str {
        self.snapshot.value().as_str()
    }

    pub fn selection(&self) -> Selection {
        self.snapshot.selection()
    }

    pub fn soft_wraps(&self) -> &SoftWrapOffsets {
        &self.soft_wraps
    }

    pub fn indexer(&self) -> &LineBreakIndexer {
        &self.indexer
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    /// 選択開始位置の行番号
    pub fn current_line(&self) -> usize {
        self.indexer.line_index_of(self.snapshot.selection_start())
    }

    /// 行の本文（パスワードまたは存在しない行は `None`）
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.indexer.line_count() {
            return None;
        }
        self.snapshot.exposed_text(self.indexer.line_range(line))
    }

    /// 範囲の本文（パスワードは `None`）
    pub fn exposed_text(&self, range: TextRange) -> Option<String> {
        self.snapshot.exposed_text(range)
    }

    /// 文字オフセットを行・列に変換（範囲外はテキスト末尾に丸める）
    pub fn position_of(&self, offset: usize) -> LinePosition {
        let value = self.snapshot.value();
        let offset = offset.min(value.len());
        let line = self.indexer.line_index_of(offset);
        let start = self.indexer.line_start(line).min(offset);
        // パスワードは文字幅から内容が推測できるため列数をそのまま使う
        let display_column = if self.snapshot.is_password() {
            offset - start
        } else {
            value.chars()[start..offset]
                .iter()
                .map(|ch| ch.width().unwrap_or(0))
                .sum()
        };

        LinePosition {
            line,
            column: offset - start,
            display_column,
        }
    }
}

/// 末尾の空白詰めを取り除く（単一行フィールドのみ、改行は対象外）
fn normalize(value: String, is_multiline: bool, options: &TrackerOptions) -> String {
    if options.trim_trailing_whitespace && !is_multiline {
        value.trim_end_matches(' ').to_string()
    } else {
        value
    }
}

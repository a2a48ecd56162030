//! 変更通知システム
//!
//! 新旧スナップショットから読み上げ/点字出力向けのディレクティブを組み立て、
//! 登録済みの出力先へ優先度順に配信する

use crate::diff::TextChange;
use crate::line_breaks::LineBreakIndexer;
use crate::snapshot::TextSnapshot;
use crate::text::TextRange;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 出力先の一意識別子
pub type SinkId = usize;

/// 出力側が何を読み上げるべきかを表す判定結果
///
/// 本文そのものは含まない。パスワードフィールドではオフセットのみを扱う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeDirective {
    /// 新値で変化した範囲（値が変わっていなければ `None`）
    pub changed_range: Option<TextRange>,
    /// 差分の詳細
    pub change: Option<TextChange>,
    /// 新しい選択範囲
    pub new_selection: TextRange,
    /// 直前の選択範囲
    pub previous_selection: TextRange,
    /// 選択開始位置の行番号
    pub line_index_of_selection: usize,
    /// 選択開始位置の行の範囲（改行文字を除く）
    pub line_range: TextRange,
    /// 行をまたいで移動したため行全体を読み上げるべきか
    pub emit_whole_line: bool,
    /// パスワードフィールドか
    pub is_password: bool,
}

impl ChangeDirective {
    /// 値も選択範囲も変化していないか
    pub fn is_noop(&self) -> bool {
        self.changed_range.is_none() && self.new_selection == self.previous_selection
    }
}

/// ディレクティブの出力先
pub trait DirectiveSink {
    /// ディレクティブを受け取る
    fn on_directive(&mut self, directive: &ChangeDirective);

    /// 出力先の優先度を返す（高い値ほど先に受け取る）
    fn priority(&self) -> i32 {
        0
    }
}

/// 配信統計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifierStats {
    /// 登録中の出力先数
    pub total_sinks: usize,
    /// 配信したディレクティブ数
    pub events_dispatched: usize,
    /// フィルターで除外した数
    pub filtered: usize,
}

/// ディレクティブ生成と配信
pub struct ChangeNotifier {
    sinks: HashMap<SinkId, (Box<dyn DirectiveSink>, i32)>,
    next_sink_id: AtomicUsize,
    filter: Option<Box<dyn Fn(&ChangeDirective) -> bool>>,
    stats: NotifierStats,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self {
            sinks: HashMap::new(),
            next_sink_id: AtomicUsize::new(0),
            filter: None,
            stats: NotifierStats::default(),
        }
    }

    /// 新旧スナップショットからディレクティブを組み立てる
    ///
    /// `indexer` は新しいスナップショットの値で計算済みであること。
    /// 旧選択位置の行番号も同じ行区切りで判定する。
    pub fn describe(
        old: &TextSnapshot,
        new: &TextSnapshot,
        indexer: &LineBreakIndexer,
    ) -> ChangeDirective {
        let change = TextChange::between(old.value(), new.value());
        let line_index_of_selection = indexer.line_index_of(new.selection_start());
        let emit_whole_line = new.is_multiline()
            && indexer.line_index_of(old.selection_start()) != line_index_of_selection;

        ChangeDirective {
            changed_range: change.map(|c| c.changed_range()),
            change,
            new_selection: new.selection().as_range(),
            previous_selection: old.selection().as_range(),
            line_index_of_selection,
            line_range: indexer.line_range(line_index_of_selection),
            emit_whole_line,
            is_password: new.is_password(),
        }
    }

    /// 出力先を追加
    pub fn add_sink(&mut self, sink: Box<dyn DirectiveSink>) -> SinkId {
        let id = self.next_sink_id.fetch_add(1, Ordering::SeqCst);
        let priority = sink.priority();
        self.sinks.insert(id, (sink, priority));
        self.stats.total_sinks = self.sinks.len();
        id
    }

    /// 出力先を削除
    pub fn remove_sink(&mut self, id: SinkId) -> bool {
        let removed = self.sinks.remove(&id).is_some();
        self.stats.total_sinks = self.sinks.len();
        removed
    }

    /// フィルターを設定（`false` を返したディレクティブは配信しない）
    pub fn set_filter<F>(&mut self, filter: F)
    where
        F: Fn(&ChangeDirective) -> bool + 'static,
    {
        self.filter = Some(Box::new(filter));
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    pub fn stats(&self) -> &NotifierStats {
        &self.stats
    }

    /// 出力先へ優先度の降順で配信
    pub fn publish(&mut self, directive: &ChangeDirective) {
        if let Some(ref filter) = self.filter {
            if !filter(directive) {
                self.stats.filtered += 1;
                return;
            }
        }

        let mut sorted: Vec<_> = self.sinks.iter_mut().collect();
        sorted.sort_by(|a, b| b.1 .1.cmp(&a.1 .1).then(a.0.cmp(b.0)));

        for (_, (sink, _)) in sorted {
            sink.on_directive(directive);
        }

        self.stats.events_dispatched += 1;
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

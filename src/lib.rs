//! edittrack - テキストフィールド編集状態トラッカー
//!
//! スクリーンリーダー向けに、編集可能フィールドの値・選択範囲・行区切りを追跡し、
//! 読み上げ/点字出力側へ渡す変更ディレクティブを生成する

// コアモジュール
pub mod error;
pub mod logging;
pub mod options;

// データ層
pub mod snapshot;
pub mod text;

// ロジック層
pub mod diff;
pub mod line_breaks;
pub mod model;
pub mod notifier;

// ホスト連携層
pub mod registry;
pub mod source;

// 公開API
pub use diff::{ChangeKind, TextChange};
pub use error::{ConfigError, EditTrackError, Result};
pub use line_breaks::{LineBreakIndexer, LineBreakSet, SoftWrapOffsets};
pub use logging::{DirectiveLog, DEFAULT_LOG_PRIORITY};
pub use model::{EditableTextModel, LinePosition};
pub use notifier::{ChangeDirective, ChangeNotifier, DirectiveSink};
pub use options::{PartialTrackerOptions, TrackerOptions};
pub use registry::{FieldHandle, ModelRegistry};
pub use snapshot::{Selection, TextSnapshot};
pub use source::{EditableSource, FieldEvent};
pub use text::{TextRange, TextValue};

//! フィールドモデルのレジストリ
//!
//! ホスト側の不透明なハンドルと、このクレートで構築したモデルを対応付ける。
//! レジストリはホストのコンテキストが所有し、参照で受け渡す。

use crate::error::{EditTrackError, Result};
use crate::model::EditableTextModel;
use crate::notifier::ChangeDirective;
use crate::options::{PartialTrackerOptions, TrackerOptions};
use crate::source::EditableSource;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// ホストが割り当てるフィールドの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldHandle(pub u64);

/// ハンドルとモデルの対応表
#[derive(Debug)]
pub struct ModelRegistry<H = FieldHandle> {
    models: HashMap<H, EditableTextModel>,
    options: TrackerOptions,
}

impl<H> ModelRegistry<H>
where
    H: Hash + Eq + Debug,
{
    pub fn new() -> Self {
        Self::with_options(TrackerOptions::default())
    }

    /// フォーカス時に生成するモデルのオプションを指定
    pub fn with_options(options: TrackerOptions) -> Self {
        Self {
            models: HashMap::new(),
            options,
        }
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    /// モデルを登録（既存のモデルがあれば返す）
    pub fn register(&mut self, handle: H, model: EditableTextModel) -> Option<EditableTextModel> {
        debug!("registering model for {:?}", handle);
        self.models.insert(handle, model)
    }

    pub fn lookup(&self, handle: &H) -> Option<&EditableTextModel> {
        self.models.get(handle)
    }

    pub fn lookup_mut(&mut self, handle: &H) -> Option<&mut EditableTextModel> {
        self.models.get_mut(handle)
    }

    /// 登録を解除してモデルを返す
    pub fn unregister(&mut self, handle: &H) -> Option<EditableTextModel> {
        let removed = self.models.remove(handle);
        if removed.is_some() {
            debug!("unregistered model for {:?}", handle);
        }
        removed
    }

    /// フィールドがフォーカスを得た：新しいモデルを構築する
    ///
    /// 同じハンドルの古いモデルは破棄される。
    pub fn focus(
        &mut self,
        handle: H,
        source: Option<&dyn EditableSource>,
    ) -> Result<&mut EditableTextModel> {
        let model = EditableTextModel::from_source(source, &self.options)?;
        debug!("focus {:?}", handle);
        self.install(handle, model)
    }

    /// フィールド固有の上書き設定を適用してフォーカスする
    ///
    /// 電話番号欄だけ末尾空白を詰める、といった入力種別ごとの調整に使う。
    pub fn focus_with(
        &mut self,
        handle: H,
        source: Option<&dyn EditableSource>,
        overrides: &PartialTrackerOptions,
    ) -> Result<&mut EditableTextModel> {
        let options = self.options.merged_with(overrides);
        let model = EditableTextModel::from_source(source, &options)?;
        debug!("focus {:?} with overrides {:?}", handle, overrides);
        self.install(handle, model)
    }

    fn install(&mut self, handle: H, model: EditableTextModel) -> Result<&mut EditableTextModel> {
        match self.models.entry(handle) {
            Entry::Occupied(mut entry) => {
                entry.insert(model);
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => Ok(entry.insert(model)),
        }
    }

    /// フィールドがフォーカスを失った：モデルを破棄する
    pub fn blur(&mut self, handle: &H) -> bool {
        debug!("blur {:?}", handle);
        self.models.remove(handle).is_some()
    }

    /// 更新イベントを対応するモデルへ配送
    pub fn dispatch(&mut self, handle: &H, source: &dyn EditableSource) -> Result<ChangeDirective> {
        let model = self
            .models
            .get_mut(handle)
            .ok_or_else(|| EditTrackError::UnknownHandle {
                handle: format!("{:?}", handle),
            })?;
        Ok(model.apply(source))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl<H> Default for ModelRegistry<H>
where
    H: Hash + Eq + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

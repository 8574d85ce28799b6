//! # ファイルストレージ
//!
//! 文書ファイル本体の保存と削除を行う。
//!
//! ## 設計方針
//!
//! - **URL のみを保持**: ドメイン層にはファイル URL だけを渡し、
//!   バイト列はストレージ層に閉じる
//! - **キーは呼び出し側が採番**: オブジェクトキーはドメイン層の
//!   `StorageKeyGenerator` が生成し、ストレージはキーと URL の対応だけを持つ
//! - **インメモリ実装**: 実ブロブストレージはスコープ外のため、
//!   `memory://{キー}` 形式の URL を発行するインメモリ実装を正とする

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use kessaiflow_domain::document::{FileUpload, FileUrl};

use crate::error::InfraError;

/// ファイルストレージのインターフェース
///
/// ファイルの保存と削除を提供する。テスト時はモックに差し替え可能。
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// ファイルを保存し、参照用の URL を返す
    ///
    /// 同じキーへの保存は上書きとなる。
    ///
    /// # 引数
    ///
    /// * `upload` - 検証済みのアップロードファイル
    /// * `key` - オブジェクトキー（例: `documents/{id}/v1/契約書.pdf`）
    async fn put(&self, upload: &FileUpload, key: &str) -> Result<FileUrl, InfraError>;

    /// URL が指すファイルを削除する
    ///
    /// 対象が存在しない場合は
    /// [`InfraErrorKind::Storage`](crate::error::InfraErrorKind::Storage) を返す。
    async fn delete(&self, file_url: &FileUrl) -> Result<(), InfraError>;
}

/// インメモリ実装の FileStorage
#[derive(Clone, Default)]
pub struct InMemoryFileStorage {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryFileStorage {
    /// 新しいストレージインスタンスを作成
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// URL が指すファイルが保存されているかチェックする
    pub fn contains(&self, file_url: &FileUrl) -> bool {
        self.objects
            .lock()
            .unwrap()
            .contains_key(file_url.as_str())
    }

    /// 保存されているオブジェクトが 1 つもないかを返す
    pub fn is_empty(&self) -> bool {
        self.objects.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(filename = %upload.filename, key)
    )]
    async fn put(&self, upload: &FileUpload, key: &str) -> Result<FileUrl, InfraError> {
        let url = format!("memory://{key}");
        let file_url = FileUrl::new(url.clone())
            .map_err(|e| InfraError::unexpected(format!("ファイル URL の生成に失敗: {e}")))?;

        self.objects
            .lock()
            .unwrap()
            .insert(url, upload.content.clone());

        Ok(file_url)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%file_url))]
    async fn delete(&self, file_url: &FileUrl) -> Result<(), InfraError> {
        let removed = self.objects.lock().unwrap().remove(file_url.as_str());
        if removed.is_none() {
            return Err(InfraError::storage(format!(
                "削除対象のファイルが存在しません: {file_url}"
            )));
        }
        Ok(())
    }
}

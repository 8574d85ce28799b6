//! 文書コマンド共通のヘルパー
//!
//! {取得 → 遷移 → バージョンチェック付き保存} のサイクルと、
//! 競合時の再試行・アップロード失敗時の後始末を共通化する。

use kessaiflow_domain::document::{Document, DocumentId, FileUrl};

use super::super::DocumentUseCaseImpl;
use crate::{error::CoreError, usecase::helpers::FindResultExt};

impl DocumentUseCaseImpl {
    /// 文書を取得し、遷移を適用してバージョンチェック付きで保存する
    ///
    /// 楽観的ロックの競合時は最新の文書を取り直して遷移からやり直す。
    /// 試行回数が `optimistic_retry_max` に達したら `Concurrency` を返す。
    /// 競合以外のエラーは再試行せず即座に返す。
    pub(super) async fn mutate_document<F>(
        &self,
        document_id: &DocumentId,
        mutate: F,
    ) -> Result<Document, CoreError>
    where
        F: Fn(Document) -> Result<Document, CoreError>,
    {
        let mut attempts = 0;
        loop {
            attempts += 1;

            let document = self
                .document_repo
                .find_by_id(document_id)
                .await
                .or_not_found("文書")?;
            let expected_version = document.version();

            let mutated = mutate(document)?;

            match self
                .document_repo
                .update_with_version_check(&mutated, expected_version)
                .await
            {
                Ok(()) => return Ok(mutated),
                Err(e) if e.as_conflict().is_none() => return Err(CoreError::Database(e)),
                Err(_) if attempts < self.config.optimistic_retry_max => {
                    // 競合したので最新の状態を取り直す
                }
                Err(_) => {
                    return Err(CoreError::Concurrency(
                        "文書は既に更新されています。最新の情報を取得してください。".to_string(),
                    ));
                }
            }
        }
    }

    /// 保存済みファイルをベストエフォートで削除する
    ///
    /// 後続処理が失敗したときの後始末に使う。削除の失敗は警告ログに残すだけで伝播しない。
    pub(super) async fn delete_uploaded_file(&self, file_url: &FileUrl) {
        if let Err(e) = self.storage.delete(file_url).await {
            tracing::warn!(%file_url, error = %e, "アップロード済みファイルの削除に失敗");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use kessaiflow_domain::{
        clock::FixedClock,
        document::{Document, DocumentId},
        principal::{Principal, UserId},
        value_objects::Version,
    };
    use kessaiflow_infra::{
        InfraError,
        repository::{DocumentFilter, DocumentRepository, InMemoryDocumentRepository},
        storage::InMemoryFileStorage,
    };
    use pretty_assertions::assert_eq;

    use super::super::test_helpers::{document, employee, now};
    use crate::{config::CoreConfig, error::CoreError, usecase::document::DocumentUseCaseImpl};

    /// `update_with_version_check` の失敗を差し込めるテスト用リポジトリ
    ///
    /// `fail` は何回目の呼び出しかを受け取り、失敗させる場合はエラーを返す。
    struct FlakyRepository {
        inner: InMemoryDocumentRepository,
        update_calls: Mutex<u32>,
        fail: Box<dyn Fn(u32) -> Option<InfraError> + Send + Sync>,
    }

    impl FlakyRepository {
        fn new(
            inner: InMemoryDocumentRepository,
            fail: impl Fn(u32) -> Option<InfraError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                inner,
                update_calls: Mutex::new(0),
                fail: Box::new(fail),
            }
        }

        fn update_calls(&self) -> u32 {
            *self.update_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl DocumentRepository for FlakyRepository {
        async fn insert(&self, document: &Document) -> Result<(), InfraError> {
            self.inner.insert(document).await
        }

        async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, InfraError> {
            self.inner.find_by_id(id).await
        }

        async fn update_with_version_check(
            &self,
            document: &Document,
            expected_version: Version,
        ) -> Result<(), InfraError> {
            let calls = {
                let mut calls = self.update_calls.lock().unwrap();
                *calls += 1;
                *calls
            };
            if let Some(e) = (self.fail)(calls) {
                return Err(e);
            }
            self.inner
                .update_with_version_check(document, expected_version)
                .await
        }

        async fn find_page(
            &self,
            filter: &DocumentFilter,
            limit: usize,
            offset: usize,
        ) -> Result<(Vec<Document>, usize), InfraError> {
            self.inner.find_page(filter, limit, offset).await
        }

        async fn find_pending_page(
            &self,
            principal: &Principal,
            limit: usize,
            offset: usize,
        ) -> Result<(Vec<Document>, usize), InfraError> {
            self.inner.find_pending_page(principal, limit, offset).await
        }
    }

    async fn build_sut_with(
        repo: Arc<FlakyRepository>,
    ) -> (DocumentUseCaseImpl, Principal, DocumentId) {
        let now = now();
        let user_id = UserId::new();
        let principal = employee(&user_id);

        let draft = document(&user_id, vec![], now);
        let document_id = draft.id().clone();
        repo.insert(&draft).await.unwrap();

        let sut = DocumentUseCaseImpl::new(
            repo,
            Arc::new(InMemoryFileStorage::new()),
            Arc::new(FixedClock::new(now)),
            CoreConfig::default(),
        );
        (sut, principal, document_id)
    }

    #[tokio::test]
    async fn test_mutate_document_競合が解消すれば再試行して成功する() {
        // Arrange: 最初の 2 回だけ競合させる（上限 3 回以内で成功する）
        let repo = Arc::new(FlakyRepository::new(
            InMemoryDocumentRepository::new(),
            |calls| {
                (calls <= 2).then(|| InfraError::conflict("Document", "test".to_string()))
            },
        ));
        let (sut, principal, document_id) = build_sut_with(repo.clone()).await;
        let at = now();

        // Act
        let result = sut
            .mutate_document(&document_id, |document| {
                Ok(document.archive(&principal, at)?)
            })
            .await;

        // Assert
        assert!(result.is_ok());
        assert_eq!(repo.update_calls(), 3);
    }

    #[tokio::test]
    async fn test_mutate_document_競合が続けば上限で諦める() {
        // Arrange: 常に競合させる
        let repo = Arc::new(FlakyRepository::new(
            InMemoryDocumentRepository::new(),
            |_| Some(InfraError::conflict("Document", "test".to_string())),
        ));
        let (sut, principal, document_id) = build_sut_with(repo.clone()).await;
        let at = now();

        // Act
        let result = sut
            .mutate_document(&document_id, |document| {
                Ok(document.archive(&principal, at)?)
            })
            .await;

        // Assert: デフォルト設定の 3 回で打ち切る
        assert!(matches!(result, Err(CoreError::Concurrency(_))));
        assert_eq!(repo.update_calls(), 3);
    }

    #[tokio::test]
    async fn test_mutate_document_競合以外のエラーは再試行しない() {
        // Arrange
        let repo = Arc::new(FlakyRepository::new(
            InMemoryDocumentRepository::new(),
            |_| Some(InfraError::unexpected("接続失敗")),
        ));
        let (sut, principal, document_id) = build_sut_with(repo.clone()).await;
        let at = now();

        // Act
        let result = sut
            .mutate_document(&document_id, |document| {
                Ok(document.archive(&principal, at)?)
            })
            .await;

        // Assert
        assert!(matches!(result, Err(CoreError::Database(_))));
        assert_eq!(repo.update_calls(), 1);
    }

    #[tokio::test]
    async fn test_mutate_document_遷移が失敗したら保存しない() {
        // Arrange: 別人によるアーカイブは Forbidden になる
        let repo = Arc::new(FlakyRepository::new(
            InMemoryDocumentRepository::new(),
            |_| None,
        ));
        let (sut, _, document_id) = build_sut_with(repo.clone()).await;
        let other = employee(&UserId::new());
        let at = now();

        // Act
        let result = sut
            .mutate_document(&document_id, |document| {
                Ok(document.archive(&other, at)?)
            })
            .await;

        // Assert
        assert!(matches!(result, Err(CoreError::Forbidden(_))));
        assert_eq!(repo.update_calls(), 0);
    }
}

//! # DocumentRepository
//!
//! 文書集約の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **楽観的ロック**: 更新は [`update_with_version_check`] 経由のみ。
//!   期待バージョンと保存中のバージョンの不一致は Conflict として返す
//! - **検索条件の集約**: フィルタ・ページングの解釈はリポジトリ層の責務
//! - **インメモリ実装**: 外部データベースはスコープ外のため、
//!   `Mutex<Vec<Document>>` ベースの実装を正とする
//!
//! [`update_with_version_check`]: DocumentRepository::update_with_version_check

use std::{
    cmp::Reverse,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use kessaiflow_domain::{
    document::{Document, DocumentId, DocumentStatus, DocumentType},
    principal::{Principal, UserId},
    value_objects::{DepartmentName, TagName, Version},
};

use crate::error::InfraError;

/// 文書一覧の検索条件
///
/// 指定されたフィールドのみで絞り込む（`None` は条件なし）。
/// `search` はタイトル・説明・タグに対する大文字小文字を区別しない部分一致。
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    pub status: Option<DocumentStatus>,
    pub document_type: Option<DocumentType>,
    pub department: Option<DepartmentName>,
    pub created_by: Option<UserId>,
    pub tag: Option<TagName>,
    pub search: Option<String>,
}

impl DocumentFilter {
    /// 文書がこの検索条件に一致するかチェックする
    pub fn matches(&self, document: &Document) -> bool {
        if self.status.is_some_and(|status| document.status() != status) {
            return false;
        }
        if self
            .document_type
            .is_some_and(|document_type| document.document_type() != document_type)
        {
            return false;
        }
        if let Some(department) = &self.department
            && document.department() != department
        {
            return false;
        }
        if let Some(created_by) = &self.created_by
            && document.created_by() != created_by
        {
            return false;
        }
        if let Some(tag) = &self.tag
            && !document.tags().contains(tag)
        {
            return false;
        }
        if let Some(search) = &self.search
            && !Self::matches_search(document, search)
        {
            return false;
        }
        true
    }

    fn matches_search(document: &Document, search: &str) -> bool {
        let needle = search.to_lowercase();
        document.title().as_str().to_lowercase().contains(&needle)
            || document
                .description()
                .is_some_and(|description| description.to_lowercase().contains(&needle))
            || document
                .tags()
                .iter()
                .any(|tag| tag.as_str().to_lowercase().contains(&needle))
    }
}

/// 文書リポジトリトレイト
///
/// 文書集約の CRUD 操作と一覧検索を定義する。一覧系の戻り値は
/// `(ページ内の文書, 条件に一致した総件数)` のタプル。
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// 文書を挿入する
    async fn insert(&self, document: &Document) -> Result<(), InfraError>;

    /// ID で文書を検索する
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, InfraError>;

    /// バージョンチェック付きで文書を更新する
    ///
    /// 保存中の文書のバージョンが `expected_version` と一致する場合のみ
    /// 全体を置き換える。不一致（または文書が存在しない）場合は
    /// [`InfraErrorKind::Conflict`](crate::error::InfraErrorKind::Conflict) を返す。
    async fn update_with_version_check(
        &self,
        document: &Document,
        expected_version: Version,
    ) -> Result<(), InfraError>;

    /// 検索条件に一致する文書を作成日時の新しい順に検索する
    ///
    /// `offset` 件スキップして最大 `limit` 件を返す。
    async fn find_page(
        &self,
        filter: &DocumentFilter,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<Document>, usize), InfraError>;

    /// 指定プリンシパルの承認アクション待ちの文書を作成日時の新しい順に検索する
    ///
    /// 現在の承認ステップでアクション可能、かつ未アクションの文書のみを返す。
    async fn find_pending_page(
        &self,
        principal: &Principal,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<Document>, usize), InfraError>;
}

/// インメモリ実装の DocumentRepository
#[derive(Clone, Default)]
pub struct InMemoryDocumentRepository {
    documents: Arc<Mutex<Vec<Document>>>,
}

impl InMemoryDocumentRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new() -> Self {
        Self {
            documents: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn collect_page(
        mut matched: Vec<Document>,
        limit: usize,
        offset: usize,
    ) -> (Vec<Document>, usize) {
        matched.sort_by_key(|document| Reverse(document.created_at()));
        let total = matched.len();
        let page = matched.into_iter().skip(offset).take(limit).collect();
        (page, total)
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(id = %document.id()))]
    async fn insert(&self, document: &Document) -> Result<(), InfraError> {
        let mut documents = self.documents.lock().unwrap();
        documents.push(document.clone());
        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, InfraError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|document| document.id() == id)
            .cloned())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %document.id()))]
    async fn update_with_version_check(
        &self,
        document: &Document,
        expected_version: Version,
    ) -> Result<(), InfraError> {
        let mut documents = self.documents.lock().unwrap();
        let Some(pos) = documents
            .iter()
            .position(|stored| stored.id() == document.id())
        else {
            return Err(InfraError::conflict("Document", document.id().to_string()));
        };
        if documents[pos].version() != expected_version {
            return Err(InfraError::conflict("Document", document.id().to_string()));
        }
        documents[pos] = document.clone();
        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(limit, offset))]
    async fn find_page(
        &self,
        filter: &DocumentFilter,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<Document>, usize), InfraError> {
        let matched: Vec<Document> = self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|document| filter.matches(document))
            .cloned()
            .collect();
        Ok(Self::collect_page(matched, limit, offset))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(user_id = %principal.user_id()))]
    async fn find_pending_page(
        &self,
        principal: &Principal,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<Document>, usize), InfraError> {
        let matched: Vec<Document> = self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|document| document.is_pending_approval_for(principal))
            .cloned()
            .collect();
        Ok(Self::collect_page(matched, limit, offset))
    }
}

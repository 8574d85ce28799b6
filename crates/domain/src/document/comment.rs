//! # 文書コメント
//!
//! 文書に対するコメントスレッドを管理する。
//! 承認プロセス中に作成者と承認者がやり取りするために使用する。
//!
//! ## ステップの判定コメントとの違い
//!
//! - `ApprovalStep` のコメント: 承認・却下時の判定理由（ステップに紐づく）
//! - `DocumentComment`: 文書単位のコメントスレッド（自由なやり取り、追記専用）

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DomainError, document::DocumentId, principal::UserId};

/// 文書コメント ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct CommentId(Uuid);

impl CommentId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

/// コメント本文
///
/// 1〜1,000 文字のバリデーションを型レベルで強制する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBody(String);

/// コメント本文の最大文字数
const COMMENT_BODY_MAX_LENGTH: usize = 1000;

impl CommentBody {
    /// コメント本文を作成する
    ///
    /// # Errors
    ///
    /// - 空文字列の場合
    /// - 1,000 文字を超える場合
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation(
                "コメント本文は必須です".to_string(),
            ));
        }
        if value.chars().count() > COMMENT_BODY_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "コメント本文は{}文字以内で入力してください",
                COMMENT_BODY_MAX_LENGTH
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// 文書コメントエンティティ
///
/// 文書に対するコメント。追記専用で、投稿後の編集・削除は行わない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentComment {
    id:          CommentId,
    document_id: DocumentId,
    posted_by:   UserId,
    body:        CommentBody,
    created_at:  DateTime<Utc>,
}

/// 文書コメントの新規作成パラメータ
pub struct NewDocumentComment {
    pub id:          CommentId,
    pub document_id: DocumentId,
    pub posted_by:   UserId,
    pub body:        CommentBody,
    pub now:         DateTime<Utc>,
}

/// 文書コメントの DB 復元パラメータ
pub struct DocumentCommentRecord {
    pub id:          CommentId,
    pub document_id: DocumentId,
    pub posted_by:   UserId,
    pub body:        CommentBody,
    pub created_at:  DateTime<Utc>,
}

impl DocumentComment {
    /// 新しい文書コメントを作成する
    pub fn new(params: NewDocumentComment) -> Self {
        Self {
            id:          params.id,
            document_id: params.document_id,
            posted_by:   params.posted_by,
            body:        params.body,
            created_at:  params.now,
        }
    }

    /// 既存のデータから復元する
    pub fn from_db(record: DocumentCommentRecord) -> Self {
        Self {
            id:          record.id,
            document_id: record.document_id,
            posted_by:   record.posted_by,
            body:        record.body,
            created_at:  record.created_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &CommentId {
        &self.id
    }

    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    pub fn posted_by(&self) -> &UserId {
        &self.posted_by
    }

    pub fn body(&self) -> &CommentBody {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//! # 文書バージョン
//!
//! 文書に添付されるファイルの版管理を扱う。
//! バージョン履歴は追記専用で、一度登録された版は変更されない。
//!
//! ## 設計判断
//!
//! - `FileValidation` でファイルの Content-Type・サイズを検証
//! - `StorageKeyGenerator` で文書・版ごとに分離されたオブジェクトキーを生成

use chrono::{DateTime, Utc};

use crate::{DomainError, document::DocumentId, principal::UserId, value_objects::Version};

// ============================================================================
// FileUrl
// ============================================================================

define_validated_string! {
    /// アップロード済みファイルの格納先 URL
    pub struct FileUrl {
        label: "ファイル URL",
        max_length: 2048,
    }
}

// ============================================================================
// FileUpload
// ============================================================================

/// アップロード対象ファイル
///
/// バリデーションは `FileValidation` で行い、格納は infra 層のストレージに委譲する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

// ============================================================================
// FileValidation
// ============================================================================

/// ファイルアップロードのバリデーション
///
/// Content-Type とファイルサイズの制限を検証する。
pub struct FileValidation;

impl FileValidation {
    /// 対応 Content-Type の一覧
    const ALLOWED_CONTENT_TYPES: &[&str] = &[
        "application/pdf",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "application/vnd.ms-excel",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "text/plain",
        "text/csv",
        "image/png",
        "image/jpeg",
    ];
    /// 最大ファイルサイズ（20 MB）
    pub const MAX_FILE_SIZE: i64 = 20 * 1024 * 1024;

    /// 単一ファイルのバリデーション
    ///
    /// Content-Type とファイルサイズを検証する。
    pub fn validate_file(content_type: &str, content_length: i64) -> Result<(), DomainError> {
        if !Self::ALLOWED_CONTENT_TYPES.contains(&content_type) {
            return Err(DomainError::Validation(format!(
                "非対応のファイル形式です: {}",
                content_type
            )));
        }

        if content_length <= 0 {
            return Err(DomainError::Validation(
                "ファイルサイズは 1 バイト以上である必要があります".to_string(),
            ));
        }

        if content_length > Self::MAX_FILE_SIZE {
            return Err(DomainError::Validation(format!(
                "ファイルサイズが上限（{} MB）を超えています",
                Self::MAX_FILE_SIZE / (1024 * 1024)
            )));
        }

        Ok(())
    }
}

// ============================================================================
// StorageKeyGenerator
// ============================================================================

/// ストレージオブジェクトキーの生成
///
/// 文書・版ごとに分離されたキーを生成する。
/// 形式: `documents/{document_id}/v{version}/{filename}`
pub struct StorageKeyGenerator;

impl StorageKeyGenerator {
    /// ストレージオブジェクトキーを生成する
    pub fn generate(document_id: &DocumentId, version: Version, filename: &str) -> String {
        format!(
            "documents/{}/v{}/{}",
            document_id.as_uuid(),
            version.as_u32(),
            filename
        )
    }
}

// ============================================================================
// DocumentVersion
// ============================================================================

/// 文書の 1 つの版
///
/// 文書集約に埋め込まれる追記専用の値オブジェクト。
/// `version` は 1 始まりの連番で、履歴内の並び順と一致する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentVersion {
    version: Version,
    file_url: FileUrl,
    created_by: UserId,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl DocumentVersion {
    /// 新しい版を作成する
    pub fn new(
        version: Version,
        file_url: FileUrl,
        created_by: UserId,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            version,
            file_url,
            created_by,
            comment,
            created_at: now,
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn file_url(&self) -> &FileUrl {
        &self.file_url
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// ============================================================================
// テスト
// ============================================================================

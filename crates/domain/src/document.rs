//! # 文書
//!
//! 承認フロー付きで管理される文書のドメインモデル。
//!
//! ## 概念モデル
//!
//! - **Document**: 文書集約のルート。版・承認ステップ・コメントを内包する
//! - **ApprovalStep**: 文書内の順序付き承認ステージ
//! - **DocumentVersion**: 添付ファイルの版（追記専用）
//! - **DocumentComment**: 文書単位のコメントスレッド（追記専用）
//!
//! ## ステータス遷移
//!
//! - `draft` → `pending_review`: 承認依頼（作成時にステップがあれば直接 `pending_review`）
//! - `pending_review` → `approved`: 最終ステップの成立
//! - `pending_review` → `rejected`: 却下 1 件（即時確定）
//! - `rejected` → `draft`: 新しい版の追加（承認フローは全リセット）
//! - `draft` / `approved` / `rejected` → `archived`: アーカイブ（審査中は不可）
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use kessaiflow_domain::document::{
//!     ApprovalStep, Document, DocumentId, DocumentStatus, DocumentType, FileUrl,
//!     NewApprovalStep, NewDocument, StepTarget,
//! };
//! use kessaiflow_domain::principal::{Department, UserId, UserRole};
//! use kessaiflow_domain::value_objects::{DepartmentName, DocumentTitle, StepPosition};
//!
//! let creator = UserId::new();
//! let document = Document::new(NewDocument {
//!     id: DocumentId::new(),
//!     title: DocumentTitle::new("2026年度 業務委託契約書")?,
//!     description: None,
//!     document_type: DocumentType::Contract,
//!     created_by: creator.clone(),
//!     department: DepartmentName::new("経理部")?,
//!     file_url: FileUrl::new("https://storage.example.com/documents/a/v1/契約書.pdf")?,
//!     tags: Vec::new(),
//!     metadata: None,
//!     expires_at: None,
//!     approval_steps: vec![ApprovalStep::new(NewApprovalStep {
//!         position: StepPosition::first(),
//!         target: StepTarget::RoleDepartment {
//!             role: UserRole::DepartmentHead,
//!             department: Some(Department::Finance),
//!         },
//!         all_approvers_required: true,
//!     })?],
//!     now: chrono::Utc::now(),
//! })?;
//! assert_eq!(document.status(), DocumentStatus::PendingReview);
//! # Ok(())
//! # }
//! ```

mod comment;
mod step;
mod version;

pub use comment::*;
pub use step::*;
pub use version::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use strum::IntoStaticStr;

use crate::{
    DomainError,
    principal::{Principal, UserId},
    value_objects::{DepartmentName, DocumentTitle, StepPosition, TagName, Version},
};

// ============================================================================
// DocumentId
// ============================================================================

define_uuid_id! {
    /// 文書の一意識別子
    pub struct DocumentId;
}

// ============================================================================
// DocumentStatus
// ============================================================================

/// 文書のステータス
///
/// ステップの `StepStatus` と語彙が重なるが、文書全体の状態を表す別型として定義する。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DocumentStatus {
    /// 下書き
    Draft,
    /// 審査中
    PendingReview,
    /// 承認済み
    Approved,
    /// 却下
    Rejected,
    /// アーカイブ済み
    Archived,
}

impl std::str::FromStr for DocumentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending_review" => Ok(Self::PendingReview),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::Validation(format!(
                "不正な文書ステータス: {}",
                s
            ))),
        }
    }
}

// ============================================================================
// DocumentType
// ============================================================================

/// 文書の種別
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DocumentType {
    /// 契約書
    Contract,
    /// 請求書
    Invoice,
    /// 報告書
    Report,
    /// 提案書
    Proposal,
    /// 規程
    Policy,
    /// 稟議メモ
    Memo,
    /// その他
    Other,
}

impl std::str::FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contract" => Ok(Self::Contract),
            "invoice" => Ok(Self::Invoice),
            "report" => Ok(Self::Report),
            "proposal" => Ok(Self::Proposal),
            "policy" => Ok(Self::Policy),
            "memo" => Ok(Self::Memo),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::Validation(format!(
                "不正な文書種別: {}",
                s
            ))),
        }
    }
}

// ============================================================================
// DocumentState
// ============================================================================

/// 文書の状態（ADT ベースステートマシン）
///
/// 各状態で有効なフィールドのみを持たせることで、不正な状態を型レベルで防止する。
/// `draft` に現在ステップが存在する、`pending_review` に現在ステップがない、
/// といった組み合わせは表現できない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentState {
    /// 下書き
    Draft,
    /// 審査中
    PendingReview(InReviewState),
    /// 承認済み
    Approved(ResolvedState),
    /// 却下
    Rejected(ResolvedState),
    /// アーカイブ済み
    Archived(ArchivedState),
}

/// PendingReview 状態の固有フィールド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InReviewState {
    /// 現在審査中のステップ位置（1 始まり）
    pub current_position: StepPosition,
}

/// Approved/Rejected 共通の確定状態フィールド
///
/// 承認は最終ステップで、却下は却下が発生したステップで確定する。
/// どちらも確定時のステップ位置をそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedState {
    /// 確定時のステップ位置
    pub current_position: StepPosition,
}

/// Archived 状態の固有フィールド
///
/// Draft/Approved/Rejected から遷移可能。
/// 前状態に依存するフィールドは Option で表現する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedState {
    /// アーカイブ前のステップ位置（Draft から遷移時は None）
    pub current_position: Option<StepPosition>,
}

// ============================================================================
// Document
// ============================================================================

/// 説明の最大文字数
const DESCRIPTION_MAX_LENGTH: usize = 2000;

/// 文書集約のルート
///
/// 版・承認ステップ・コメントを内包し、1 つの単位として原子的に更新される。
/// ステータスは定義された遷移操作を通じてのみ変化する。
///
/// ## 楽観的ロック
///
/// `version` フィールドにより、並行更新時の競合を検出する。
/// 更新操作時はリクエストの version と保存済みの version を比較し、
/// 一致しない場合は競合エラーを返す。文書の版番号 `current_version` とは別物。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: DocumentId,
    title: DocumentTitle,
    description: Option<String>,
    document_type: DocumentType,
    created_by: UserId,
    department: DepartmentName,
    current_version: Version,
    versions: Vec<DocumentVersion>,
    tags: Vec<TagName>,
    metadata: Option<JsonValue>,
    expires_at: Option<DateTime<Utc>>,
    approval_steps: Vec<ApprovalStep>,
    comments: Vec<DocumentComment>,
    version: Version,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    state: DocumentState,
}

/// 文書の新規作成パラメータ
pub struct NewDocument {
    pub id: DocumentId,
    pub title: DocumentTitle,
    pub description: Option<String>,
    pub document_type: DocumentType,
    pub created_by: UserId,
    pub department: DepartmentName,
    pub file_url: FileUrl,
    pub tags: Vec<TagName>,
    pub metadata: Option<JsonValue>,
    pub expires_at: Option<DateTime<Utc>>,
    pub approval_steps: Vec<ApprovalStep>,
    pub now: DateTime<Utc>,
}

/// 文書の DB 復元パラメータ
///
/// DB スキーマのフラット構造を表現する。`from_db()` で不変条件を検証して ADT に変換する。
pub struct DocumentRecord {
    pub id: DocumentId,
    pub title: DocumentTitle,
    pub description: Option<String>,
    pub document_type: DocumentType,
    pub status: DocumentStatus,
    pub created_by: UserId,
    pub department: DepartmentName,
    pub current_version: Version,
    pub versions: Vec<DocumentVersion>,
    pub tags: Vec<TagName>,
    pub metadata: Option<JsonValue>,
    pub expires_at: Option<DateTime<Utc>>,
    pub current_position: Option<StepPosition>,
    pub approval_steps: Vec<ApprovalStep>,
    pub comments: Vec<DocumentComment>,
    pub version: Version,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// 新しい文書を作成する
    ///
    /// 承認ステップは position 昇順にソートされる。ステップが 1 つ以上あれば
    /// `pending_review`（現在ステップ 1）、なければ `draft` で作成される。
    /// 最初の版はファイル URL から version 1 として登録される。
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation`: 説明が最大文字数を超える場合、
    ///   またはステップの position が 1 始まりの連番でない場合
    pub fn new(params: NewDocument) -> Result<Self, DomainError> {
        if params
            .description
            .as_ref()
            .is_some_and(|description| description.chars().count() > DESCRIPTION_MAX_LENGTH)
        {
            return Err(DomainError::Validation(format!(
                "説明は {} 文字以内である必要があります",
                DESCRIPTION_MAX_LENGTH
            )));
        }

        let mut approval_steps = params.approval_steps;
        approval_steps.sort_by_key(|step| step.position());
        Self::validate_positions(&approval_steps)?;

        // タグは順序を保って重複を除去する
        let mut tags = Vec::new();
        for tag in params.tags {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let state = if approval_steps.is_empty() {
            DocumentState::Draft
        } else {
            DocumentState::PendingReview(InReviewState {
                current_position: StepPosition::first(),
            })
        };

        let initial_version = DocumentVersion::new(
            Version::initial(),
            params.file_url,
            params.created_by.clone(),
            None,
            params.now,
        );

        Ok(Self {
            id: params.id,
            title: params.title,
            description: params.description,
            document_type: params.document_type,
            created_by: params.created_by,
            department: params.department,
            current_version: Version::initial(),
            versions: vec![initial_version],
            tags,
            metadata: params.metadata,
            expires_at: params.expires_at,
            approval_steps,
            comments: Vec::new(),
            version: Version::initial(),
            created_at: params.now,
            updated_at: params.now,
            state,
        })
    }

    /// 既存のデータから復元する
    ///
    /// DB のフラット構造から ADT に変換し、不変条件を検証する。
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation`: 不変条件違反（例: pending_review で現在ステップが None）
    pub fn from_db(record: DocumentRecord) -> Result<Self, DomainError> {
        Self::validate_versions(&record.versions, record.current_version)?;
        Self::validate_positions(&record.approval_steps)?;

        let state = match record.status {
            DocumentStatus::Draft => DocumentState::Draft,
            DocumentStatus::PendingReview => {
                let current_position = record.current_position.ok_or_else(|| {
                    DomainError::Validation(
                        "審査中の文書には現在ステップが必要です".to_string(),
                    )
                })?;
                if !record.approval_steps.is_empty()
                    && current_position.as_index() >= record.approval_steps.len()
                {
                    return Err(DomainError::Validation(
                        "現在ステップが承認ステップの範囲外です".to_string(),
                    ));
                }
                DocumentState::PendingReview(InReviewState { current_position })
            }
            DocumentStatus::Approved => {
                let current_position = record.current_position.ok_or_else(|| {
                    DomainError::Validation(
                        "承認済みの文書には確定時のステップが必要です".to_string(),
                    )
                })?;
                if current_position.as_index() >= record.approval_steps.len() {
                    return Err(DomainError::Validation(
                        "確定時のステップが承認ステップの範囲外です".to_string(),
                    ));
                }
                DocumentState::Approved(ResolvedState { current_position })
            }
            DocumentStatus::Rejected => {
                let current_position = record.current_position.ok_or_else(|| {
                    DomainError::Validation(
                        "却下された文書には確定時のステップが必要です".to_string(),
                    )
                })?;
                if current_position.as_index() >= record.approval_steps.len() {
                    return Err(DomainError::Validation(
                        "確定時のステップが承認ステップの範囲外です".to_string(),
                    ));
                }
                DocumentState::Rejected(ResolvedState { current_position })
            }
            DocumentStatus::Archived => DocumentState::Archived(ArchivedState {
                current_position: record.current_position,
            }),
        };

        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            document_type: record.document_type,
            created_by: record.created_by,
            department: record.department,
            current_version: record.current_version,
            versions: record.versions,
            tags: record.tags,
            metadata: record.metadata,
            expires_at: record.expires_at,
            approval_steps: record.approval_steps,
            comments: record.comments,
            version: record.version,
            created_at: record.created_at,
            updated_at: record.updated_at,
            state,
        })
    }

    /// position がソート済みの 1 始まり連番であることを検証する
    fn validate_positions(steps: &[ApprovalStep]) -> Result<(), DomainError> {
        for (index, step) in steps.iter().enumerate() {
            if step.position().as_index() != index {
                return Err(DomainError::Validation(
                    "承認ステップの position は 1 から始まる連番である必要があります".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// 版番号が 1 始まりの連番で、current_version が末尾と一致することを検証する
    fn validate_versions(
        versions: &[DocumentVersion],
        current_version: Version,
    ) -> Result<(), DomainError> {
        if versions.is_empty() {
            return Err(DomainError::Validation(
                "文書には版が 1 つ以上必要です".to_string(),
            ));
        }
        for (index, entry) in versions.iter().enumerate() {
            if entry.version().as_u32() as usize != index + 1 {
                return Err(DomainError::Validation(
                    "版番号は 1 から始まる連番である必要があります".to_string(),
                ));
            }
        }
        if let Some(last) = versions.last()
            && last.version() != current_version
        {
            return Err(DomainError::Validation(
                "current_version が最新の版番号と一致していません".to_string(),
            ));
        }
        Ok(())
    }

    // Getter メソッド

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn title(&self) -> &DocumentTitle {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn department(&self) -> &DepartmentName {
        &self.department
    }

    pub fn current_version(&self) -> Version {
        self.current_version
    }

    pub fn versions(&self) -> &[DocumentVersion] {
        &self.versions
    }

    pub fn tags(&self) -> &[TagName] {
        &self.tags
    }

    pub fn metadata(&self) -> Option<&JsonValue> {
        self.metadata.as_ref()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn approval_steps(&self) -> &[ApprovalStep] {
        &self.approval_steps
    }

    pub fn comments(&self) -> &[DocumentComment] {
        &self.comments
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// 状態への直接アクセス（パターンマッチ用）
    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    pub fn status(&self) -> DocumentStatus {
        match &self.state {
            DocumentState::Draft => DocumentStatus::Draft,
            DocumentState::PendingReview(_) => DocumentStatus::PendingReview,
            DocumentState::Approved(_) => DocumentStatus::Approved,
            DocumentState::Rejected(_) => DocumentStatus::Rejected,
            DocumentState::Archived(_) => DocumentStatus::Archived,
        }
    }

    pub fn current_position(&self) -> Option<StepPosition> {
        match &self.state {
            DocumentState::Draft => None,
            DocumentState::PendingReview(s) => Some(s.current_position),
            DocumentState::Approved(s) | DocumentState::Rejected(s) => Some(s.current_position),
            DocumentState::Archived(s) => s.current_position,
        }
    }

    /// 現在審査中のステップを取得する
    ///
    /// 審査中以外の文書、またはステップのない文書では None を返す。
    pub fn current_step(&self) -> Option<&ApprovalStep> {
        let DocumentState::PendingReview(in_review) = &self.state else {
            return None;
        };
        self.approval_steps.get(in_review.current_position.as_index())
    }

    // ビジネスロジックメソッド

    /// 文書が有効期限切れかチェックする
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }

    /// プリンシパルの承認待ちかチェックする
    ///
    /// 審査中で、現在ステップの承認対象者に該当し、かつ未判断の場合のみ true。
    pub fn is_pending_approval_for(&self, principal: &Principal) -> bool {
        self.current_step()
            .is_some_and(|step| step.can_act(principal) && !step.has_entry_for(principal.user_id()))
    }

    /// 文書を承認依頼した新しいインスタンスを返す
    ///
    /// ステップのない文書も承認依頼はできるが、その場合は承認操作が
    /// ステップ不在エラーになるため、新しい版でステップを定義し直すことになる。
    ///
    /// # Errors
    ///
    /// - `DomainError::Forbidden`: 作成者以外が呼び出した場合
    /// - `DomainError::InvalidState`: ドラフト以外の状態で呼び出した場合
    pub fn submit_for_approval(
        self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if principal.user_id() != &self.created_by {
            return Err(DomainError::Forbidden(
                "文書の作成者のみ承認依頼できます".to_string(),
            ));
        }

        match self.state {
            DocumentState::Draft => Ok(Self {
                state: DocumentState::PendingReview(InReviewState {
                    current_position: StepPosition::first(),
                }),
                version: self.version.next(),
                updated_at: now,
                ..self
            }),
            _ => Err(DomainError::InvalidState(format!(
                "承認依頼はドラフト状態でのみ可能です（現在: {}）",
                self.status()
            ))),
        }
    }

    /// 現在ステップに承認を記録した新しいインスタンスを返す
    ///
    /// ステップが成立した場合、次のステップに進むか、最終ステップなら文書を承認済みにする。
    /// 定足数未達の場合は記録のみで文書の状態は変わらない。
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidState`: 審査中以外、または現在ステップが存在しない場合
    /// - `DomainError::Forbidden`: 現在ステップの承認対象者でない場合
    /// - `DomainError::DuplicateAction`: 同一ユーザーが既に判断済みの場合
    pub fn approve(
        self,
        principal: &Principal,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let DocumentState::PendingReview(in_review) = &self.state else {
            return Err(DomainError::InvalidState(format!(
                "承認は審査中の文書でのみ可能です（現在: {}）",
                self.status()
            )));
        };

        let position = in_review.current_position;
        let index = position.as_index();
        let Some(step) = self.approval_steps.get(index) else {
            return Err(DomainError::InvalidState(
                "承認ステップが存在しません".to_string(),
            ));
        };
        if !step.can_act(principal) {
            return Err(DomainError::Forbidden(
                "このステップで承認する権限がありません".to_string(),
            ));
        }

        let step = step
            .clone()
            .record_approval(principal.user_id().clone(), comment, now)?;
        let step_resolved = step.status() == StepStatus::Approved;
        let is_last = index + 1 == self.approval_steps.len();

        let mut approval_steps = self.approval_steps.clone();
        approval_steps[index] = step;

        let state = if step_resolved {
            if is_last {
                DocumentState::Approved(ResolvedState {
                    current_position: position,
                })
            } else {
                DocumentState::PendingReview(InReviewState {
                    current_position: position.next(),
                })
            }
        } else {
            DocumentState::PendingReview(InReviewState {
                current_position: position,
            })
        };

        Ok(Self {
            approval_steps,
            state,
            version: self.version.next(),
            updated_at: now,
            ..self
        })
    }

    /// 現在ステップに却下を記録した新しいインスタンスを返す
    ///
    /// 却下は 1 件で現在ステップと文書全体を即時に却下として確定する。
    /// 残りのステップは審査されない。確定時のステップ位置は保持される。
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation`: コメントが空の場合
    /// - `DomainError::InvalidState`: 審査中以外、または現在ステップが存在しない場合
    /// - `DomainError::Forbidden`: 現在ステップの承認対象者でない場合
    /// - `DomainError::DuplicateAction`: 同一ユーザーが既に判断済みの場合
    pub fn reject(
        self,
        principal: &Principal,
        comment: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let DocumentState::PendingReview(in_review) = &self.state else {
            return Err(DomainError::InvalidState(format!(
                "却下は審査中の文書でのみ可能です（現在: {}）",
                self.status()
            )));
        };

        let position = in_review.current_position;
        let index = position.as_index();
        let Some(step) = self.approval_steps.get(index) else {
            return Err(DomainError::InvalidState(
                "承認ステップが存在しません".to_string(),
            ));
        };
        if !step.can_act(principal) {
            return Err(DomainError::Forbidden(
                "このステップで却下する権限がありません".to_string(),
            ));
        }

        let step = step
            .clone()
            .record_rejection(principal.user_id().clone(), comment, now)?;

        let mut approval_steps = self.approval_steps.clone();
        approval_steps[index] = step;

        Ok(Self {
            approval_steps,
            state: DocumentState::Rejected(ResolvedState {
                current_position: position,
            }),
            version: self.version.next(),
            updated_at: now,
            ..self
        })
    }

    /// 新しい版を追加した新しいインスタンスを返す
    ///
    /// ステータスの前提条件はない。却下された文書の場合はドラフトに戻し、
    /// 全ステップの判断記録をリセットして承認フローを最初からやり直せるようにする。
    /// 再度 `submit_for_approval` を呼ぶまで承認フローは再開しない。
    ///
    /// # Errors
    ///
    /// - `DomainError::Forbidden`: 作成者・管理者以外が呼び出した場合
    pub fn add_version(
        self,
        principal: &Principal,
        file_url: FileUrl,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if principal.user_id() != &self.created_by && !principal.is_admin_equivalent() {
            return Err(DomainError::Forbidden(
                "文書の作成者または管理者のみ新しい版を追加できます".to_string(),
            ));
        }

        let (state, approval_steps) = match self.state {
            DocumentState::Rejected(_) => {
                let reset_steps = self
                    .approval_steps
                    .iter()
                    .cloned()
                    .map(ApprovalStep::reset)
                    .collect();
                (DocumentState::Draft, reset_steps)
            }
            state => (state, self.approval_steps.clone()),
        };

        let next_version = self.current_version.next();
        let mut versions = self.versions.clone();
        versions.push(DocumentVersion::new(
            next_version,
            file_url,
            principal.user_id().clone(),
            comment,
            now,
        ));

        Ok(Self {
            state,
            approval_steps,
            current_version: next_version,
            versions,
            version: self.version.next(),
            updated_at: now,
            ..self
        })
    }

    /// 文書をアーカイブした新しいインスタンスを返す
    ///
    /// 審査中の文書はアーカイブできない。アーカイブ済みの文書への再実行は成功する。
    ///
    /// # Errors
    ///
    /// - `DomainError::Forbidden`: 作成者・管理者以外が呼び出した場合
    /// - `DomainError::InvalidState`: 審査中の文書に対して呼び出した場合
    pub fn archive(self, principal: &Principal, now: DateTime<Utc>) -> Result<Self, DomainError> {
        if principal.user_id() != &self.created_by && !principal.is_admin_equivalent() {
            return Err(DomainError::Forbidden(
                "文書の作成者または管理者のみアーカイブできます".to_string(),
            ));
        }

        let state = match self.state {
            DocumentState::PendingReview(_) => {
                return Err(DomainError::InvalidState(
                    "審査中の文書はアーカイブできません".to_string(),
                ));
            }
            DocumentState::Draft => DocumentState::Archived(ArchivedState {
                current_position: None,
            }),
            DocumentState::Approved(resolved) | DocumentState::Rejected(resolved) => {
                DocumentState::Archived(ArchivedState {
                    current_position: Some(resolved.current_position),
                })
            }
            DocumentState::Archived(archived) => DocumentState::Archived(archived),
        };

        Ok(Self {
            state,
            version: self.version.next(),
            updated_at: now,
            ..self
        })
    }

    /// コメントを追加した新しいインスタンスを返す
    ///
    /// ステータスとの相互作用はなく、どの状態でも追加できる。
    pub fn with_comment(
        self,
        id: CommentId,
        posted_by: UserId,
        body: CommentBody,
        now: DateTime<Utc>,
    ) -> Self {
        let comment = DocumentComment::new(NewDocumentComment {
            id,
            document_id: self.id.clone(),
            posted_by,
            body,
            now,
        });

        let mut comments = self.comments.clone();
        comments.push(comment);

        Self {
            comments,
            version: self.version.next(),
            updated_at: now,
            ..self
        }
    }
}

// ============================================================================
// テスト
// ============================================================================

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::principal::{Department, UserRole};

    /// テスト用の固定タイムスタンプ
    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn explicit_step(position: u32, assigned_to: Vec<UserId>, all_required: bool) -> ApprovalStep {
        ApprovalStep::new(NewApprovalStep {
            position: StepPosition::new(position).unwrap(),
            target: StepTarget::ExplicitUsers { assigned_to },
            all_approvers_required: all_required,
        })
        .unwrap()
    }

    fn role_step(position: u32, role: UserRole, department: Option<Department>) -> ApprovalStep {
        ApprovalStep::new(NewApprovalStep {
            position: StepPosition::new(position).unwrap(),
            target: StepTarget::RoleDepartment { role, department },
            all_approvers_required: false,
        })
        .unwrap()
    }

    fn test_document(
        created_by: &UserId,
        approval_steps: Vec<ApprovalStep>,
        now: DateTime<Utc>,
    ) -> Document {
        Document::new(NewDocument {
            id: DocumentId::new(),
            title: DocumentTitle::new("2026年度 業務委託契約書").unwrap(),
            description: Some("委託範囲と支払条件の確認".to_string()),
            document_type: DocumentType::Contract,
            created_by: created_by.clone(),
            department: DepartmentName::new("経理部").unwrap(),
            file_url: FileUrl::new("https://storage.example.com/documents/a/v1/契約書.pdf")
                .unwrap(),
            tags: Vec::new(),
            metadata: None,
            expires_at: None,
            approval_steps,
            now,
        })
        .unwrap()
    }

    fn employee(user_id: &UserId) -> Principal {
        Principal::new(user_id.clone(), UserRole::Employee, Department::Finance)
    }

    mod new {
        use pretty_assertions::assert_eq;

        use super::*;

        #[rstest]
        fn test_ステップなしで作成するとドラフト(now: DateTime<Utc>) {
            let creator = UserId::new();

            let sut = test_document(&creator, Vec::new(), now);

            assert_eq!(sut.status(), DocumentStatus::Draft);
            assert_eq!(sut.current_position(), None);
            assert_eq!(sut.current_version(), Version::initial());
            assert_eq!(sut.versions().len(), 1);
            assert_eq!(sut.versions()[0].version(), Version::initial());
            assert_eq!(sut.versions()[0].created_by(), &creator);
            assert_eq!(sut.version(), Version::initial());
        }

        #[rstest]
        fn test_ステップありで作成すると審査中(now: DateTime<Utc>) {
            let creator = UserId::new();
            let steps = vec![explicit_step(1, vec![UserId::new()], true)];

            let sut = test_document(&creator, steps, now);

            assert_eq!(sut.status(), DocumentStatus::PendingReview);
            assert_eq!(sut.current_position(), Some(StepPosition::first()));
        }

        #[rstest]
        fn test_ステップはposition順にソートされる(now: DateTime<Utc>) {
            let creator = UserId::new();
            let steps = vec![
                explicit_step(2, vec![UserId::new()], true),
                explicit_step(1, vec![UserId::new()], true),
            ];

            let sut = test_document(&creator, steps, now);

            assert_eq!(sut.approval_steps()[0].position().as_u32(), 1);
            assert_eq!(sut.approval_steps()[1].position().as_u32(), 2);
        }

        #[rstest]
        fn test_positionが連番でない場合はエラー(now: DateTime<Utc>) {
            let steps = vec![
                explicit_step(1, vec![UserId::new()], true),
                explicit_step(3, vec![UserId::new()], true),
            ];

            let result = Document::new(NewDocument {
                id: DocumentId::new(),
                title: DocumentTitle::new("承認フロー検証").unwrap(),
                description: None,
                document_type: DocumentType::Memo,
                created_by: UserId::new(),
                department: DepartmentName::new("総務部").unwrap(),
                file_url: FileUrl::new("https://storage.example.com/documents/b/v1/メモ.pdf")
                    .unwrap(),
                tags: Vec::new(),
                metadata: None,
                expires_at: None,
                approval_steps: steps,
                now,
            });

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[rstest]
        fn test_positionが重複する場合はエラー(now: DateTime<Utc>) {
            let steps = vec![
                explicit_step(1, vec![UserId::new()], true),
                explicit_step(1, vec![UserId::new()], true),
            ];

            let result = Document::new(NewDocument {
                id: DocumentId::new(),
                title: DocumentTitle::new("承認フロー検証").unwrap(),
                description: None,
                document_type: DocumentType::Memo,
                created_by: UserId::new(),
                department: DepartmentName::new("総務部").unwrap(),
                file_url: FileUrl::new("https://storage.example.com/documents/b/v1/メモ.pdf")
                    .unwrap(),
                tags: Vec::new(),
                metadata: None,
                expires_at: None,
                approval_steps: steps,
                now,
            });

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[rstest]
        fn test_説明が2001文字以上の場合はエラー(now: DateTime<Utc>) {
            let result = Document::new(NewDocument {
                id: DocumentId::new(),
                title: DocumentTitle::new("承認フロー検証").unwrap(),
                description: Some("あ".repeat(2001)),
                document_type: DocumentType::Memo,
                created_by: UserId::new(),
                department: DepartmentName::new("総務部").unwrap(),
                file_url: FileUrl::new("https://storage.example.com/documents/b/v1/メモ.pdf")
                    .unwrap(),
                tags: Vec::new(),
                metadata: None,
                expires_at: None,
                approval_steps: Vec::new(),
                now,
            });

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[rstest]
        fn test_タグは順序を保って重複が除去される(now: DateTime<Utc>) {
            let sut = Document::new(NewDocument {
                id: DocumentId::new(),
                title: DocumentTitle::new("承認フロー検証").unwrap(),
                description: None,
                document_type: DocumentType::Memo,
                created_by: UserId::new(),
                department: DepartmentName::new("総務部").unwrap(),
                file_url: FileUrl::new("https://storage.example.com/documents/b/v1/メモ.pdf")
                    .unwrap(),
                tags: vec![
                    TagName::new("2026年度").unwrap(),
                    TagName::new("委託").unwrap(),
                    TagName::new("2026年度").unwrap(),
                ],
                metadata: None,
                expires_at: None,
                approval_steps: Vec::new(),
                now,
            })
            .unwrap();

            assert_eq!(sut.tags().len(), 2);
            assert_eq!(sut.tags()[0].as_str(), "2026年度");
            assert_eq!(sut.tags()[1].as_str(), "委託");
        }
    }

    mod submit_for_approval {
        use pretty_assertions::assert_eq;

        use super::*;

        #[rstest]
        fn test_作成者はドラフトを承認依頼できる(now: DateTime<Utc>) {
            let creator = UserId::new();
            let document = test_document(&creator, Vec::new(), now);

            let sut = document.submit_for_approval(&employee(&creator), now).unwrap();

            assert_eq!(sut.status(), DocumentStatus::PendingReview);
            assert_eq!(sut.current_position(), Some(StepPosition::first()));
        }

        #[rstest]
        fn test_作成者以外はエラー(now: DateTime<Utc>) {
            let document = test_document(&UserId::new(), Vec::new(), now);

            let result = document.submit_for_approval(&employee(&UserId::new()), now);

            assert!(matches!(result, Err(DomainError::Forbidden(_))));
        }

        #[rstest]
        fn test_ドラフト以外はエラー(now: DateTime<Utc>) {
            let creator = UserId::new();
            // ステップありで作成した文書は既に審査中
            let steps = vec![explicit_step(1, vec![UserId::new()], true)];
            let document = test_document(&creator, steps, now);

            let result = document.submit_for_approval(&employee(&creator), now);

            assert!(matches!(result, Err(DomainError::InvalidState(_))));
        }
    }

    mod approve {
        use pretty_assertions::assert_eq;

        use super::*;

        #[rstest]
        fn test_定足数未達では文書は審査中のまま(now: DateTime<Utc>) {
            let first = UserId::new();
            let second = UserId::new();
            let steps = vec![explicit_step(1, vec![first.clone(), second], true)];
            let document = test_document(&UserId::new(), steps, now);

            let sut = document.approve(&employee(&first), None, now).unwrap();

            assert_eq!(sut.status(), DocumentStatus::PendingReview);
            assert_eq!(sut.current_position(), Some(StepPosition::first()));
            assert_eq!(sut.approval_steps()[0].approvers().len(), 1);
        }

        #[rstest]
        fn test_ステップ成立で次のステップに進む(now: DateTime<Utc>) {
            let first = UserId::new();
            let steps = vec![
                explicit_step(1, vec![first.clone()], true),
                explicit_step(2, vec![UserId::new()], true),
            ];
            let document = test_document(&UserId::new(), steps, now);

            let sut = document.approve(&employee(&first), None, now).unwrap();

            assert_eq!(sut.status(), DocumentStatus::PendingReview);
            assert_eq!(
                sut.current_position(),
                Some(StepPosition::new(2).unwrap())
            );
            assert_eq!(sut.approval_steps()[0].status(), StepStatus::Approved);
        }

        #[rstest]
        fn test_最終ステップの成立で文書が承認される(now: DateTime<Utc>) {
            let first = UserId::new();
            let steps = vec![explicit_step(1, vec![first.clone()], true)];
            let document = test_document(&UserId::new(), steps, now);

            let sut = document.approve(&employee(&first), None, now).unwrap();

            assert_eq!(sut.status(), DocumentStatus::Approved);
            // 確定時のステップ位置は保持される
            assert_eq!(sut.current_position(), Some(StepPosition::first()));
        }

        #[rstest]
        fn test_審査中以外はエラー(now: DateTime<Utc>) {
            let first = UserId::new();
            let document = test_document(&UserId::new(), Vec::new(), now);

            let result = document.approve(&employee(&first), None, now);

            assert!(matches!(result, Err(DomainError::InvalidState(_))));
        }

        #[rstest]
        fn test_ステップのない審査中文書の承認はエラー(now: DateTime<Utc>) {
            let creator = UserId::new();
            let document = test_document(&creator, Vec::new(), now);
            // ステップなしのまま承認依頼した文書
            let document = document.submit_for_approval(&employee(&creator), now).unwrap();

            let result = document.approve(&employee(&creator), None, now);

            assert!(matches!(result, Err(DomainError::InvalidState(_))));
        }

        #[rstest]
        fn test_承認対象者でないユーザーはエラー(now: DateTime<Utc>) {
            let steps = vec![explicit_step(1, vec![UserId::new()], true)];
            let document = test_document(&UserId::new(), steps, now);

            let result = document.approve(&employee(&UserId::new()), None, now);

            assert!(matches!(result, Err(DomainError::Forbidden(_))));
        }

        #[rstest]
        fn test_同一ユーザーの重複承認はエラー(now: DateTime<Utc>) {
            let first = UserId::new();
            let steps = vec![explicit_step(1, vec![first.clone(), UserId::new()], true)];
            let document = test_document(&UserId::new(), steps, now);
            let document = document.approve(&employee(&first), None, now).unwrap();

            let result = document.approve(&employee(&first), None, now);

            assert!(matches!(result, Err(DomainError::DuplicateAction(_))));
        }

        #[rstest]
        fn test_2段階の承認フローを完走できる(now: DateTime<Utc>) {
            let first = UserId::new();
            let second = UserId::new();
            let steps = vec![
                explicit_step(1, vec![first.clone(), second.clone()], true),
                role_step(2, UserRole::DepartmentHead, None),
            ];
            let document = test_document(&UserId::new(), steps, now);

            // ステップ 1: 指名された 2 名が承認してはじめて成立する
            let document = document.approve(&employee(&first), None, now).unwrap();
            assert_eq!(document.current_position(), Some(StepPosition::first()));

            let document = document.approve(&employee(&second), None, now).unwrap();
            assert_eq!(
                document.current_position(),
                Some(StepPosition::new(2).unwrap())
            );

            // ステップ 2: 部門長ロールなら誰でも 1 名で成立する
            let head = Principal::new(UserId::new(), UserRole::DepartmentHead, Department::Legal);
            let document = document.approve(&head, Some("内容確認済み".to_string()), now).unwrap();

            assert_eq!(document.status(), DocumentStatus::Approved);
            assert_eq!(document.approval_steps()[1].status(), StepStatus::Approved);
        }
    }

    mod reject {
        use pretty_assertions::assert_eq;

        use super::*;

        #[rstest]
        fn test_却下で文書が即時確定する(now: DateTime<Utc>) {
            let first = UserId::new();
            let steps = vec![
                explicit_step(1, vec![first.clone()], true),
                explicit_step(2, vec![UserId::new()], true),
            ];
            let document = test_document(&UserId::new(), steps, now);

            let sut = document
                .reject(&employee(&first), "署名が不足しています", now)
                .unwrap();

            assert_eq!(sut.status(), DocumentStatus::Rejected);
            // 確定時のステップ位置は変わらない
            assert_eq!(sut.current_position(), Some(StepPosition::first()));
            assert_eq!(sut.approval_steps()[0].status(), StepStatus::Rejected);
            assert_eq!(sut.approval_steps()[0].comment(), Some("署名が不足しています"));
            // 後続ステップは手つかずのまま
            assert_eq!(sut.approval_steps()[1].status(), StepStatus::PendingReview);
        }

        #[rstest]
        fn test_空コメントはエラー(now: DateTime<Utc>) {
            let first = UserId::new();
            let steps = vec![explicit_step(1, vec![first.clone()], true)];
            let document = test_document(&UserId::new(), steps, now);

            let result = document.reject(&employee(&first), "  ", now);

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[rstest]
        fn test_承認対象者でないユーザーはエラー(now: DateTime<Utc>) {
            let steps = vec![explicit_step(1, vec![UserId::new()], true)];
            let document = test_document(&UserId::new(), steps, now);

            let result = document.reject(&employee(&UserId::new()), "確認できません", now);

            assert!(matches!(result, Err(DomainError::Forbidden(_))));
        }

        #[rstest]
        fn test_審査中以外はエラー(now: DateTime<Utc>) {
            let document = test_document(&UserId::new(), Vec::new(), now);

            let result = document.reject(&employee(&UserId::new()), "確認できません", now);

            assert!(matches!(result, Err(DomainError::InvalidState(_))));
        }
    }

    mod add_version {
        use pretty_assertions::assert_eq;

        use super::*;

        fn second_version_url() -> FileUrl {
            FileUrl::new("https://storage.example.com/documents/a/v2/契約書.pdf").unwrap()
        }

        #[rstest]
        fn test_作成者は新しい版を追加できる(now: DateTime<Utc>) {
            let creator = UserId::new();
            let document = test_document(&creator, Vec::new(), now);

            let sut = document
                .add_version(
                    &employee(&creator),
                    second_version_url(),
                    Some("支払条件を修正".to_string()),
                    now,
                )
                .unwrap();

            assert_eq!(sut.current_version(), Version::new(2).unwrap());
            assert_eq!(sut.versions().len(), 2);
            assert_eq!(sut.versions()[1].version(), Version::new(2).unwrap());
            assert_eq!(sut.versions()[1].comment(), Some("支払条件を修正"));
        }

        #[rstest]
        fn test_管理者は作成者でなくても追加できる(now: DateTime<Utc>) {
            let document = test_document(&UserId::new(), Vec::new(), now);
            let admin = Principal::new(UserId::new(), UserRole::Admin, Department::Management);

            let result = document.add_version(&admin, second_version_url(), None, now);

            assert!(result.is_ok());
        }

        #[rstest]
        fn test_作成者でも管理者でもないユーザーはエラー(now: DateTime<Utc>) {
            let document = test_document(&UserId::new(), Vec::new(), now);

            let result =
                document.add_version(&employee(&UserId::new()), second_version_url(), None, now);

            assert!(matches!(result, Err(DomainError::Forbidden(_))));
        }

        #[rstest]
        fn test_却下された文書は下書きに戻りフローがリセットされる(
            now: DateTime<Utc>,
        ) {
            let creator = UserId::new();
            let approver = UserId::new();
            let steps = vec![explicit_step(1, vec![approver.clone()], true)];
            let document = test_document(&creator, steps, now);
            let document = document
                .reject(&employee(&approver), "金額が不正です", now)
                .unwrap();

            let sut = document
                .add_version(&employee(&creator), second_version_url(), None, now)
                .unwrap();

            assert_eq!(sut.status(), DocumentStatus::Draft);
            assert_eq!(sut.current_position(), None);
            assert_eq!(sut.approval_steps()[0].status(), StepStatus::PendingReview);
            assert_eq!(sut.approval_steps()[0].approvers().len(), 0);
            assert_eq!(sut.approval_steps()[0].comment(), None);

            // 再度承認依頼すると最初のステップから審査が始まる
            let sut = sut.submit_for_approval(&employee(&creator), now).unwrap();
            assert_eq!(sut.status(), DocumentStatus::PendingReview);
            assert_eq!(sut.current_position(), Some(StepPosition::first()));
        }

        #[rstest]
        fn test_審査中の文書への追加はステータスを変えない(now: DateTime<Utc>) {
            let creator = UserId::new();
            let steps = vec![explicit_step(1, vec![UserId::new()], true)];
            let document = test_document(&creator, steps, now);

            let sut = document
                .add_version(&employee(&creator), second_version_url(), None, now)
                .unwrap();

            assert_eq!(sut.status(), DocumentStatus::PendingReview);
            assert_eq!(sut.current_version(), Version::new(2).unwrap());
        }
    }

    mod archive {
        use pretty_assertions::assert_eq;

        use super::*;

        #[rstest]
        fn test_作成者はドラフトをアーカイブできる(now: DateTime<Utc>) {
            let creator = UserId::new();
            let document = test_document(&creator, Vec::new(), now);

            let sut = document.archive(&employee(&creator), now).unwrap();

            assert_eq!(sut.status(), DocumentStatus::Archived);
            assert_eq!(sut.current_position(), None);
        }

        #[rstest]
        fn test_承認済み文書のアーカイブは確定位置を保持する(now: DateTime<Utc>) {
            let creator = UserId::new();
            let approver = UserId::new();
            let steps = vec![explicit_step(1, vec![approver.clone()], true)];
            let document = test_document(&creator, steps, now);
            let document = document.approve(&employee(&approver), None, now).unwrap();

            let sut = document.archive(&employee(&creator), now).unwrap();

            assert_eq!(sut.status(), DocumentStatus::Archived);
            assert_eq!(sut.current_position(), Some(StepPosition::first()));
        }

        #[rstest]
        fn test_審査中の文書はアーカイブできない(now: DateTime<Utc>) {
            let creator = UserId::new();
            let steps = vec![explicit_step(1, vec![UserId::new()], true)];
            let document = test_document(&creator, steps, now);

            let result = document.archive(&employee(&creator), now);

            assert!(matches!(result, Err(DomainError::InvalidState(_))));
        }

        #[rstest]
        fn test_アーカイブ済み文書への再実行は成功する(now: DateTime<Utc>) {
            let creator = UserId::new();
            let document = test_document(&creator, Vec::new(), now);
            let document = document.archive(&employee(&creator), now).unwrap();

            let sut = document.archive(&employee(&creator), now).unwrap();

            assert_eq!(sut.status(), DocumentStatus::Archived);
        }

        #[rstest]
        fn test_作成者でも管理者でもないユーザーはエラー(now: DateTime<Utc>) {
            let document = test_document(&UserId::new(), Vec::new(), now);

            let result = document.archive(&employee(&UserId::new()), now);

            assert!(matches!(result, Err(DomainError::Forbidden(_))));
        }
    }

    mod with_comment {
        use pretty_assertions::assert_eq;

        use super::*;

        #[rstest]
        fn test_コメントを追加できる(now: DateTime<Utc>) {
            let creator = UserId::new();
            let poster = UserId::new();
            let document = test_document(&creator, Vec::new(), now);
            let document_id = document.id().clone();

            let sut = document.with_comment(
                CommentId::new(),
                poster.clone(),
                CommentBody::new("期限内に確認お願いします").unwrap(),
                now,
            );

            assert_eq!(sut.comments().len(), 1);
            assert_eq!(sut.comments()[0].document_id(), &document_id);
            assert_eq!(sut.comments()[0].posted_by(), &poster);
            assert_eq!(sut.comments()[0].body().as_str(), "期限内に確認お願いします");
        }
    }

    mod is_pending_approval_for {
        use super::*;

        #[rstest]
        fn test_現在ステップの未判断の対象者のみ承認待ち(now: DateTime<Utc>) {
            let first = UserId::new();
            let second = UserId::new();
            let steps = vec![explicit_step(1, vec![first.clone(), second.clone()], true)];
            let document = test_document(&UserId::new(), steps, now);

            assert!(document.is_pending_approval_for(&employee(&first)));

            // 判断済みのユーザーは承認待ちから外れる
            let document = document.approve(&employee(&first), None, now).unwrap();
            assert!(!document.is_pending_approval_for(&employee(&first)));
            assert!(document.is_pending_approval_for(&employee(&second)));
        }

        #[rstest]
        fn test_対象者でないユーザーは承認待ちでない(now: DateTime<Utc>) {
            let steps = vec![explicit_step(1, vec![UserId::new()], true)];
            let document = test_document(&UserId::new(), steps, now);

            assert!(!document.is_pending_approval_for(&employee(&UserId::new())));
        }

        #[rstest]
        fn test_審査中以外の文書は承認待ちでない(now: DateTime<Utc>) {
            let approver = UserId::new();
            let steps = vec![explicit_step(1, vec![approver.clone()], true)];
            let document = test_document(&UserId::new(), steps, now);
            let document = document.approve(&employee(&approver), None, now).unwrap();

            assert!(!document.is_pending_approval_for(&employee(&approver)));
        }
    }

    mod from_db {
        use super::*;

        fn base_record(now: DateTime<Utc>) -> DocumentRecord {
            let creator = UserId::new();
            DocumentRecord {
                id: DocumentId::new(),
                title: DocumentTitle::new("2026年度 業務委託契約書").unwrap(),
                description: None,
                document_type: DocumentType::Contract,
                status: DocumentStatus::Draft,
                created_by: creator.clone(),
                department: DepartmentName::new("経理部").unwrap(),
                current_version: Version::initial(),
                versions: vec![DocumentVersion::new(
                    Version::initial(),
                    FileUrl::new("https://storage.example.com/documents/a/v1/契約書.pdf").unwrap(),
                    creator,
                    None,
                    now,
                )],
                tags: Vec::new(),
                metadata: None,
                expires_at: None,
                current_position: None,
                approval_steps: Vec::new(),
                comments: Vec::new(),
                version: Version::initial(),
                created_at: now,
                updated_at: now,
            }
        }

        #[rstest]
        fn test_ドラフトを復元できる(now: DateTime<Utc>) {
            let result = Document::from_db(base_record(now));

            assert!(result.is_ok());
        }

        #[rstest]
        fn test_版が空の場合はエラー(now: DateTime<Utc>) {
            let mut record = base_record(now);
            record.versions = Vec::new();

            let result = Document::from_db(record);

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[rstest]
        fn test_current_versionが末尾の版と不一致の場合はエラー(
            now: DateTime<Utc>,
        ) {
            let mut record = base_record(now);
            record.current_version = Version::new(2).unwrap();

            let result = Document::from_db(record);

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[rstest]
        fn test_審査中で現在ステップがない場合はエラー(now: DateTime<Utc>) {
            let mut record = base_record(now);
            record.status = DocumentStatus::PendingReview;
            record.current_position = None;

            let result = Document::from_db(record);

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[rstest]
        fn test_審査中で現在ステップが範囲外の場合はエラー(now: DateTime<Utc>) {
            let mut record = base_record(now);
            record.status = DocumentStatus::PendingReview;
            record.approval_steps = vec![explicit_step(1, vec![UserId::new()], true)];
            record.current_position = Some(StepPosition::new(2).unwrap());

            let result = Document::from_db(record);

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }
    }

    mod document_status {
        use pretty_assertions::assert_eq;

        use super::*;

        #[rstest]
        #[case(DocumentStatus::Draft, "draft")]
        #[case(DocumentStatus::PendingReview, "pending_review")]
        #[case(DocumentStatus::Approved, "approved")]
        #[case(DocumentStatus::Rejected, "rejected")]
        #[case(DocumentStatus::Archived, "archived")]
        fn test_文字列との相互変換(#[case] status: DocumentStatus, #[case] text: &str) {
            assert_eq!(status.to_string(), text);
            assert_eq!(text.parse::<DocumentStatus>().unwrap(), status);
        }

        #[rstest]
        fn test_不正な文字列はエラー() {
            let result = "deleted".parse::<DocumentStatus>();

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }
    }

    mod document_type {
        use pretty_assertions::assert_eq;

        use super::*;

        #[rstest]
        #[case(DocumentType::Contract, "contract")]
        #[case(DocumentType::Invoice, "invoice")]
        #[case(DocumentType::Report, "report")]
        #[case(DocumentType::Proposal, "proposal")]
        #[case(DocumentType::Policy, "policy")]
        #[case(DocumentType::Memo, "memo")]
        #[case(DocumentType::Other, "other")]
        fn test_文字列との相互変換(#[case] document_type: DocumentType, #[case] text: &str) {
            assert_eq!(document_type.to_string(), text);
            assert_eq!(text.parse::<DocumentType>().unwrap(), document_type);
        }
    }

    mod is_expired {
        use super::*;

        #[rstest]
        fn test_有効期限切れの場合trueを返す(now: DateTime<Utc>) {
            let mut record_now = now;
            record_now -= chrono::Duration::days(1);
            let creator = UserId::new();
            let document = Document::new(NewDocument {
                id: DocumentId::new(),
                title: DocumentTitle::new("2025年度 保守契約").unwrap(),
                description: None,
                document_type: DocumentType::Contract,
                created_by: creator,
                department: DepartmentName::new("情報システム部").unwrap(),
                file_url: FileUrl::new("https://storage.example.com/documents/c/v1/保守.pdf")
                    .unwrap(),
                tags: Vec::new(),
                metadata: None,
                expires_at: Some(record_now),
                approval_steps: Vec::new(),
                now: record_now,
            })
            .unwrap();

            assert!(document.is_expired(now));
        }

        #[rstest]
        fn test_有効期限内の場合falseを返す(now: DateTime<Utc>) {
            let later = now + chrono::Duration::days(30);
            let creator = UserId::new();
            let document = Document::new(NewDocument {
                id: DocumentId::new(),
                title: DocumentTitle::new("2026年度 保守契約").unwrap(),
                description: None,
                document_type: DocumentType::Contract,
                created_by: creator,
                department: DepartmentName::new("情報システム部").unwrap(),
                file_url: FileUrl::new("https://storage.example.com/documents/c/v1/保守.pdf")
                    .unwrap(),
                tags: Vec::new(),
                metadata: None,
                expires_at: Some(later),
                approval_steps: Vec::new(),
                now,
            })
            .unwrap();

            assert!(!document.is_expired(now));
        }

        #[rstest]
        fn test_有効期限のない文書はfalseを返す(now: DateTime<Utc>) {
            let document = test_document(&UserId::new(), Vec::new(), now);

            assert!(!document.is_expired(now));
        }
    }
}

//! # 文書ユースケース
//!
//! 文書の作成・承認フロー・版管理・アーカイブ・コメントに関する
//! ビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **Principal の明示**: すべての操作で実行者を引数として受け取る。
//!   スレッドローカル等の暗黙のコンテキストからは復元しない
//! - **集約単位の原子性**: 状態遷移はメモリ上の文書コピーに適用し、
//!   バージョンチェック付き更新 1 回で永続化する。部分的な保存は起きない
//! - **競合時の再試行**: 楽観的ロックの競合は設定された上限まで
//!   自動で再試行し、上限到達で `Concurrency` を返す

mod command;
mod query;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kessaiflow_domain::{
    clock::Clock,
    document::{DocumentType, FileUpload, StepTarget},
};
use kessaiflow_infra::{repository::DocumentRepository, storage::FileStorage};
use serde_json::Value as JsonValue;

use crate::config::CoreConfig;

/// 文書作成入力
#[derive(Debug, Clone)]
pub struct CreateDocumentInput {
    /// タイトル
    pub title: String,
    /// 説明（任意）
    pub description: Option<String>,
    /// 文書種別
    pub document_type: DocumentType,
    /// 所属部署名
    pub department: String,
    /// タグ（重複は除去される）
    pub tags: Vec<String>,
    /// 任意のメタデータ
    pub metadata: Option<JsonValue>,
    /// 有効期限（任意）
    pub expires_at: Option<DateTime<Utc>>,
    /// 初版として添付するファイル
    pub file: FileUpload,
    /// 承認ステップ定義（空ならドラフトとして作成）
    pub approval_steps: Vec<ApprovalStepInput>,
}

/// 承認ステップ定義入力
#[derive(Debug, Clone)]
pub struct ApprovalStepInput {
    /// ステップ位置（1 始まり）
    pub position: u32,
    /// 承認対象（指名制 or ロール・部署制）
    pub target: StepTarget,
    /// 全員承認が必要か（未指定は true）
    pub all_approvers_required: Option<bool>,
}

/// 承認入力
#[derive(Debug, Clone)]
pub struct ApproveDocumentInput {
    /// コメント（任意）
    pub comment: Option<String>,
}

/// 却下入力
#[derive(Debug, Clone)]
pub struct RejectDocumentInput {
    /// 却下理由（必須）
    pub comment: String,
}

/// 新しい版の追加入力
#[derive(Debug, Clone)]
pub struct AddVersionInput {
    /// 添付するファイル
    pub file: FileUpload,
    /// 変更内容の説明（任意）
    pub comment: Option<String>,
}

/// コメント投稿入力
#[derive(Debug, Clone)]
pub struct PostCommentInput {
    /// コメント本文
    pub body: String,
}

/// ページネーション指定
///
/// 未指定の項目は設定のデフォルト値で補完される。
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRequest {
    /// ページ番号（1 始まり、未指定・0 は 1 として扱う）
    pub page: Option<usize>,
    /// 1 ページあたりの件数（設定の最大値で頭打ち）
    pub per_page: Option<usize>,
}

/// 文書ユースケース実装
///
/// 文書のライフサイクル操作と読み取り操作を実装する。
/// リポジトリ・ストレージ・時刻は `Arc<dyn Trait>` で外部から注入する。
pub struct DocumentUseCaseImpl {
    document_repo: Arc<dyn DocumentRepository>,
    storage:       Arc<dyn FileStorage>,
    clock:         Arc<dyn Clock>,
    config:        CoreConfig,
}

impl DocumentUseCaseImpl {
    /// 新しい文書ユースケースを作成
    pub fn new(
        document_repo: Arc<dyn DocumentRepository>,
        storage: Arc<dyn FileStorage>,
        clock: Arc<dyn Clock>,
        config: CoreConfig,
    ) -> Self {
        Self {
            document_repo,
            storage,
            clock,
            config,
        }
    }
}

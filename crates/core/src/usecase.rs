//! # ユースケース層
//!
//! 文書ライフサイクルエンジンのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリ・ストレージ・時刻を `Arc<dyn Trait>` で外部から注入
//! - **コマンドとクエリの分離**: 状態変更操作と読み取り操作をモジュールで分ける
//!
//! ## モジュール構成
//!
//! - `document`: 文書関連のユースケース

pub(crate) mod helpers;

pub mod document;

pub use document::{
    AddVersionInput,
    ApprovalStepInput,
    ApproveDocumentInput,
    CreateDocumentInput,
    DocumentUseCaseImpl,
    PageRequest,
    PostCommentInput,
    RejectDocumentInput,
};

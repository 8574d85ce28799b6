//! # エンジンのエラー定義
//!
//! ユースケース層で発生するエラーと、ドメイン層・インフラ層からの変換を定義する。
//!
//! ## エラーの対応関係
//!
//! | ドメイン層 | エンジン |
//! |---|---|
//! | `Validation` | `BadRequest` |
//! | `NotFound` | `NotFound` |
//! | `Forbidden` | `Forbidden` |
//! | `InvalidState` | `InvalidState` |
//! | `DuplicateAction` | `DuplicateAction` |
//! | （インフラ層の `Conflict`、再試行上限到達時） | `Concurrency` |
//! | （インフラ層のその他） | `Database` |
//!
//! HTTP レスポンスへの変換は呼び出し側（ワイヤ層）の責務であり、
//! このクレートには含めない。

use kessaiflow_domain::DomainError;
use thiserror::Error;

/// ワークフローエンジンで発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 権限不足
    #[error("権限がありません: {0}")]
    Forbidden(String),

    /// 現在の状態では実行できない操作
    #[error("現在の状態では実行できません: {0}")]
    InvalidState(String),

    /// 同一ユーザーによる二重アクション
    #[error("操作が重複しています: {0}")]
    DuplicateAction(String),

    /// 楽観的ロックの競合（再試行上限到達）
    #[error("競合が発生しました: {0}")]
    Concurrency(String),

    /// データベース・ストレージエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] kessaiflow_infra::InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<DomainError> for CoreError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) => Self::BadRequest(msg),
            err @ DomainError::NotFound { .. } => Self::NotFound(err.to_string()),
            DomainError::Forbidden(msg) => Self::Forbidden(msg),
            DomainError::InvalidState(msg) => Self::InvalidState(msg),
            DomainError::DuplicateAction(msg) => Self::DuplicateAction(msg),
        }
    }
}

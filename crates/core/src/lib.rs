//! # KessaiFlow コア
//!
//! 文書のライフサイクルと多段承認フローのユースケースを実装する。
//!
//! ## 責務
//!
//! - 文書の作成・承認申請・承認・却下・版管理・アーカイブ・コメント
//! - 一覧・詳細・承認待ちの読み取り
//! - 楽観的ロック競合の再試行とドメインエラーのユースケースエラーへの変換
//!
//! ## 依存関係の方向
//!
//! ```text
//! core → infra → domain
//! ```
//!
//! HTTP や RPC などの外部公開層は持たない。組み込み先のサービスが
//! [`DocumentUseCaseImpl`] を直接呼び出し、[`CoreError`] を自身の
//! レスポンス形式に変換する。
//!
//! ## モジュール構成
//!
//! - [`config`] - エンジン動作の設定
//! - [`error`] - ユースケース層のエラー定義
//! - [`usecase`] - 文書ユースケースの実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use kessaiflow_core::{CoreConfig, DocumentUseCaseImpl};
//! use kessaiflow_domain::clock::SystemClock;
//! use kessaiflow_infra::{repository::InMemoryDocumentRepository, storage::InMemoryFileStorage};
//!
//! let usecase = DocumentUseCaseImpl::new(
//!     Arc::new(InMemoryDocumentRepository::new()),
//!     Arc::new(InMemoryFileStorage::new()),
//!     Arc::new(SystemClock),
//!     CoreConfig::from_env(),
//! );
//! ```
//!
//! 組み込み先のサービスは起動時に `kessaiflow_shared::observability::init_tracing`
//! を呼び出して構造化ログを初期化する。

pub mod config;
pub mod error;
pub mod usecase;

pub use config::CoreConfig;
pub use error::CoreError;
pub use usecase::DocumentUseCaseImpl;

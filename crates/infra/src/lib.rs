//! # KessaiFlow インフラ層
//!
//! 永続化と外部リソースアクセスを担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートは文書集約の永続化インターフェース（リポジトリトレイト）と
//! ファイルストレージのインターフェース、およびそれぞれのインメモリ実装を
//! 提供する。外部リソースの詳細をカプセル化し、ユースケース層を
//! インフラの変更から保護する。
//!
//! ## 責務
//!
//! - **リポジトリ実装**: 文書集約の保存・検索・楽観的ロック付き更新
//! - **ファイルストレージ**: 文書ファイル本体の保存と削除
//! - **エラー定義**: インフラ層エラー（SpanTrace 付き）
//!
//! ## 依存関係
//!
//! ```text
//! core → infra → domain
//! ```
//!
//! インフラ層は `domain` にのみ依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - 文書リポジトリ
//! - [`storage`] - ファイルストレージ
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use kessaiflow_infra::{
//!     repository::{DocumentRepository, InMemoryDocumentRepository},
//!     storage::{FileStorage, InMemoryFileStorage},
//! };
//!
//! let repository: Arc<dyn DocumentRepository> = Arc::new(InMemoryDocumentRepository::new());
//! let storage: Arc<dyn FileStorage> = Arc::new(InMemoryFileStorage::new());
//! ```

pub mod error;
pub mod repository;
pub mod storage;

pub use error::{InfraError, InfraErrorKind};
pub use repository::{DocumentFilter, DocumentRepository, InMemoryDocumentRepository};
pub use storage::{FileStorage, InMemoryFileStorage};

//! # リポジトリ実装
//!
//! 文書集約の永続化トレイトとその実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: トレイトでインターフェースを定義し、ユースケース層は
//!   `Arc<dyn DocumentRepository>` 経由で利用する
//! - **楽観的ロック**: 更新系はバージョンチェック付きの操作のみを公開
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod document_repository;

pub use document_repository::{DocumentFilter, DocumentRepository, InMemoryDocumentRepository};

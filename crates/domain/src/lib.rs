//! # KessaiFlow ドメイン層
//!
//! ビジネスロジックの中核を担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートは DDD（ドメイン駆動設計）の原則に従い、以下を提供する:
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: Document）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: Version,
//!   StepPosition）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! core → infra → domain
//! ```
//!
//! ドメイン層は他の内部クレートに依存せず、インフラ層（DB、外部サービス）にも
//! 一切依存しない。これにより、ビジネスロジックの純粋性が保たれる。
//!
//! ## モジュール構成
//!
//! - [`clock`] - 現在時刻取得の抽象化
//! - [`document`] - 文書集約（承認ステップ・版・コメントを内包）
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`principal`] - 認証済みの操作主体
//! - [`value_objects`] - 複数エンティティで共有される値オブジェクト
//!
//! ## 使用例
//!
//! ```rust
//! use kessaiflow_domain::{DomainError, document::DocumentId};
//!
//! // 文書 ID の生成
//! let document_id = DocumentId::new();
//!
//! // ドメインエラーの生成
//! let error = DomainError::NotFound {
//!     entity_type: "Document",
//!     id:          document_id.to_string(),
//! };
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod document;
pub mod error;
pub mod principal;
pub mod value_objects;

pub use error::DomainError;

//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **HTTP ステータスへのマッピング**: 外側の層でステータスコードに変換可能
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//! | `Forbidden` | 403 Forbidden | 権限不足 |
//! | `InvalidState` | 409 Conflict | 現在の状態では実行できない操作 |
//! | `DuplicateAction` | 409 Conflict | 同一ユーザーによる二重アクション |
//!
//! ## 使用例
//!
//! ```rust
//! use kessaiflow_domain::DomainError;
//!
//! fn validate_title(title: &str) -> Result<(), DomainError> {
//!     if title.is_empty() {
//!         return Err(DomainError::Validation("タイトルは必須です".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! fn find_document(id: &str) -> Result<(), DomainError> {
//!     // データベースから検索...
//!     Err(DomainError::NotFound {
//!         entity_type: "Document",
//!         id:          id.to_string(),
//!     })
//! }
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// ビジネスロジックの実行中に発生する例外状態を表現する。
/// ユースケース層でこのエラーを受け取り、適切なレスポンスに変換する。
///
/// # 設計判断
///
/// - `thiserror` を使用し、`std::error::Error` トレイトを自動実装
/// - 各バリアントに `#[error(...)]` で人間可読なメッセージを定義
/// - `Debug` derive により、ログ出力時に詳細情報を表示可能
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - 必須フィールドが未入力
    /// - 文字数制限の超過
    /// - 承認ステップの position が 1..N の連番になっていない
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// エンティティが見つからない
    ///
    /// 指定された ID のエンティティがストアに存在しない場合に使用する。
    /// `entity_type` にはエンティティの種類（"Document" など）を指定し、
    /// エラーメッセージを具体的にする。
    ///
    /// # フィールド
    ///
    /// - `entity_type`: エンティティの種類（コンパイル時に決定される `&'static str`）
    /// - `id`: 検索に使用した識別子
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"Document" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },

    /// 権限エラー
    ///
    /// ユーザーに操作の実行権限がない場合に使用する。
    /// 認証（Authentication）ではなく認可（Authorization）の失敗を表す。
    ///
    /// # 認証エラーとの違い
    ///
    /// - 認証エラー（401）: ユーザーが誰か不明
    /// - 認可エラー（403）: ユーザーは特定できたが、権限がない
    #[error("権限がありません: {0}")]
    Forbidden(String),

    /// 状態遷移エラー
    ///
    /// 文書の現在のステータスでは実行できない操作が要求された場合に使用する。
    ///
    /// # 例
    ///
    /// - 下書き以外の文書を申請する
    /// - 承認待ちでない文書を承認する
    /// - 承認フロー進行中の文書をアーカイブする
    #[error("現在の状態では実行できません: {0}")]
    InvalidState(String),

    /// 二重アクションエラー
    ///
    /// 同一ユーザーが同じ承認ステップに対して二度目のアクションを
    /// 試みた場合に使用する。最初に記録されたアクションは保持される。
    #[error("既にアクション済みです: {0}")]
    DuplicateAction(String),
}

//! # KessaiFlow 共有ユーティリティ
//!
//! このクレートは、KessaiFlow
//! プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のクレート（core など）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える

pub mod event_log;
#[cfg(feature = "observability")]
pub mod observability;
pub mod paginated_response;

pub use paginated_response::PaginatedResponse;

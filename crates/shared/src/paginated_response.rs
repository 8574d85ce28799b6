//! # ページネーション付きレスポンス
//!
//! ページ番号ベースのページネーションに対応したレスポンス型。

use serde::{Deserialize, Serialize};

/// ページネーション付きレスポンス
///
/// リストデータにページ番号と総件数を添えるページネーション形式。
///
/// ## JSON 形式
///
/// ```json
/// {
///   "data": [...],
///   "total": 42,
///   "page": 1,
///   "page_count": 5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_count: usize,
}

impl<T> PaginatedResponse<T> {
    /// ページ内データと件数情報からレスポンスを組み立てる
    ///
    /// `page_count` は `total / per_page` の切り上げ。`total` が 0 の場合は 0。
    pub fn new(data: Vec<T>, total: usize, page: usize, per_page: usize) -> Self {
        let page_count = total.div_ceil(per_page.max(1));
        Self {
            data,
            total,
            page,
            page_count,
        }
    }
}

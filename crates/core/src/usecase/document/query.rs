//! 文書ユースケースの読み取り操作

use kessaiflow_domain::{
    document::{Document, DocumentId},
    principal::Principal,
};
use kessaiflow_infra::repository::DocumentFilter;
use kessaiflow_shared::PaginatedResponse;

use super::{DocumentUseCaseImpl, PageRequest};
use crate::{error::CoreError, usecase::helpers::FindResultExt};

impl DocumentUseCaseImpl {
    // ===== GET 系メソッド =====

    /// 文書の詳細を取得する
    ///
    /// ## 引数
    ///
    /// - `document_id`: 文書 ID
    ///
    /// ## 戻り値
    ///
    /// - `Ok(document)`: 文書（承認ステップ・版・コメントを含む集約全体）
    /// - `Err(NotFound)`: 文書が見つからない場合
    /// - `Err(_)`: データベースエラー
    pub async fn get_document(&self, document_id: &DocumentId) -> Result<Document, CoreError> {
        self.document_repo
            .find_by_id(document_id)
            .await
            .or_not_found("文書")
    }

    /// 文書の一覧を取得する
    ///
    /// 検索条件に一致する文書を作成日時の新しい順に返す。
    ///
    /// ## 引数
    ///
    /// - `filter`: 検索条件（`None` のフィールドは条件なし）
    /// - `page`: ページ指定（未指定時は設定のデフォルト値を使う）
    ///
    /// ## 戻り値
    ///
    /// - `Ok(response)`: ページ内の文書と件数情報
    /// - `Err(_)`: データベースエラー
    pub async fn list_documents(
        &self,
        filter: DocumentFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Document>, CoreError> {
        let (number, per_page) = self.normalize_page(&page);
        let offset = (number - 1) * per_page;
        let (data, total) = self
            .document_repo
            .find_page(&filter, per_page, offset)
            .await?;
        Ok(PaginatedResponse::new(data, total, number, per_page))
    }

    /// 自分が承認すべき文書の一覧を取得する
    ///
    /// 審査中かつ現在ステップの承認対象者で、まだ判断を記録していない文書
    /// だけを作成日時の新しい順に返す。
    ///
    /// ## 引数
    ///
    /// - `principal`: 操作主体
    /// - `page`: ページ指定（未指定時は設定のデフォルト値を使う）
    ///
    /// ## 戻り値
    ///
    /// - `Ok(response)`: ページ内の文書と件数情報
    /// - `Err(_)`: データベースエラー
    pub async fn list_pending_approvals(
        &self,
        principal: &Principal,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Document>, CoreError> {
        let (number, per_page) = self.normalize_page(&page);
        let offset = (number - 1) * per_page;
        let (data, total) = self
            .document_repo
            .find_pending_page(principal, per_page, offset)
            .await?;
        Ok(PaginatedResponse::new(data, total, number, per_page))
    }

    /// ページ指定を設定の範囲に正規化する
    ///
    /// ページ番号は 1 始まり（0 は 1 扱い）。1 ページあたりの件数は未指定時に
    /// デフォルト値を使い、1 〜 最大値の範囲に丸める。
    fn normalize_page(&self, page: &PageRequest) -> (usize, usize) {
        let number = page.page.unwrap_or(1).max(1);
        let per_page = page
            .per_page
            .unwrap_or(self.config.default_page_size)
            .clamp(1, self.config.max_page_size);
        (number, per_page)
    }
}

//! ユースケース層の共通ヘルパー
//!
//! リポジトリ呼び出し結果の変換など、複数のユースケースで
//! 繰り返されるパターンを共通化する。

use kessaiflow_infra::InfraError;

use crate::error::CoreError;

/// リポジトリの `Result<Option<T>, InfraError>` を `Result<T, CoreError>` に変換する
///
/// `find_by_id` 等の `Option` を返すリポジトリメソッドの結果を、
/// `CoreError::NotFound` または `CoreError::Database` に変換する。
///
/// ```ignore
/// // Before
/// let document = self.document_repo.find_by_id(&document_id).await
///     .map_err(CoreError::Database)?
///     .ok_or_else(|| CoreError::NotFound("文書が見つかりません".to_string()))?;
///
/// // After
/// let document = self.document_repo.find_by_id(&document_id).await
///     .or_not_found("文書")?;
/// ```
pub(crate) trait FindResultExt<T> {
    /// `None` の場合は `CoreError::NotFound`、`InfraError` の場合は `CoreError::Database` を返す
    fn or_not_found(self, entity_name: &str) -> Result<T, CoreError>;
}

impl<T> FindResultExt<T> for Result<Option<T>, InfraError> {
    fn or_not_found(self, entity_name: &str) -> Result<T, CoreError> {
        self?.ok_or_else(|| CoreError::NotFound(format!("{entity_name}が見つかりません")))
    }
}

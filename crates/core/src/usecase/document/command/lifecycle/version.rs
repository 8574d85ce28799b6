//! 文書の版管理

use kessaiflow_domain::{
    document::{Document, DocumentId, FileValidation, StorageKeyGenerator},
    principal::Principal,
};
use kessaiflow_shared::{event_log::event, log_business_event};

use crate::{
    error::CoreError,
    usecase::{
        document::{AddVersionInput, DocumentUseCaseImpl},
        helpers::FindResultExt,
    },
};

impl DocumentUseCaseImpl {
    /// 文書に新しい版を追加する
    ///
    /// 却下された文書に版を追加するとドラフトに戻り、全承認ステップの
    /// 判断記録がリセットされる。承認フローの再開には再度の承認申請が必要。
    ///
    /// ## 処理フロー
    ///
    /// 1. ファイルの形式・サイズを検証
    /// 2. 現在の版番号から次版のオブジェクトキーを採番
    /// 3. ファイルをストレージに保存
    /// 4. 版を追加して保存（失敗時はアップロード済みファイルを削除）
    ///
    /// ## エラー
    ///
    /// - ファイル形式が非対応、またはサイズ超過の場合
    /// - 文書が見つからない場合
    /// - 作成者・管理者以外が追加した場合
    /// - 保存の競合が解消しない場合
    pub async fn add_document_version(
        &self,
        input: AddVersionInput,
        document_id: &DocumentId,
        principal: &Principal,
    ) -> Result<Document, CoreError> {
        // 1. ファイルの形式・サイズを検証
        FileValidation::validate_file(&input.file.content_type, input.file.content.len() as i64)?;

        // 2. 次版のオブジェクトキーを採番（版番号は申請時点の値を使う）
        let current = self
            .document_repo
            .find_by_id(document_id)
            .await
            .or_not_found("文書")?;
        let next_version = current.current_version().next();
        let key = StorageKeyGenerator::generate(document_id, next_version, &input.file.filename);

        // 3. ファイルをストレージに保存
        let file_url = self.storage.put(&input.file, &key).await?;

        // 4. 版を追加して保存
        let now = self.clock.now();
        let result = self
            .mutate_document(document_id, |document| {
                Ok(document.add_version(principal, file_url.clone(), input.comment.clone(), now)?)
            })
            .await;
        if result.is_err() {
            self.delete_uploaded_file(&file_url).await;
        }
        let document = result?;

        log_business_event!(
            event.category = event::category::DOCUMENT,
            event.action = event::action::VERSION_ADDED,
            event.entity_type = event::entity_type::DOCUMENT,
            event.entity_id = %document.id(),
            event.actor_id = %principal.user_id(),
            event.result = event::result::SUCCESS,
            "版追加"
        );

        Ok(document)
    }
}

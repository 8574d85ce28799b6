//! 文書の却下

use kessaiflow_domain::{
    document::{Document, DocumentId},
    principal::Principal,
};
use kessaiflow_shared::{event_log::event, log_business_event};

use crate::{
    error::CoreError,
    usecase::document::{DocumentUseCaseImpl, RejectDocumentInput},
};

impl DocumentUseCaseImpl {
    /// 現在の承認ステップに却下を記録する
    ///
    /// 却下は 1 件で現在ステップと文書全体を即時に却下として確定する。
    /// 残りのステップは審査されず、確定時のステップ位置は保持される。
    /// コメントは必須。
    ///
    /// ## エラー
    ///
    /// - コメントが空の場合
    /// - 文書が見つからない場合
    /// - 現在ステップの承認対象者でない場合
    /// - 審査中以外、または承認対象のステップが存在しない場合
    /// - 同一ユーザーが既に判断済みの場合
    /// - 保存の競合が解消しない場合
    pub async fn reject_document(
        &self,
        input: RejectDocumentInput,
        document_id: &DocumentId,
        principal: &Principal,
    ) -> Result<Document, CoreError> {
        let now = self.clock.now();
        let document = self
            .mutate_document(document_id, |document| {
                Ok(document.reject(principal, &input.comment, now)?)
            })
            .await?;

        log_business_event!(
            event.category = event::category::DOCUMENT,
            event.action = event::action::STEP_REJECTED,
            event.entity_type = event::entity_type::DOCUMENT,
            event.entity_id = %document.id(),
            event.actor_id = %principal.user_id(),
            event.result = event::result::SUCCESS,
            "ステップ却下"
        );

        Ok(document)
    }
}

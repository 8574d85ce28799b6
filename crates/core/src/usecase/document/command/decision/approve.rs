//! 文書の承認

use kessaiflow_domain::{
    document::{Document, DocumentId},
    principal::Principal,
};
use kessaiflow_shared::{event_log::event, log_business_event};

use crate::{
    error::CoreError,
    usecase::document::{ApproveDocumentInput, DocumentUseCaseImpl},
};

impl DocumentUseCaseImpl {
    /// 現在の承認ステップに承認を記録する
    ///
    /// ステップが成立した場合は次のステップに進み、最終ステップなら文書を
    /// 承認済みにする。定足数未達の場合は記録のみで審査中のまま変わらない。
    ///
    /// ## エラー
    ///
    /// - 文書が見つからない場合
    /// - 現在ステップの承認対象者でない場合
    /// - 審査中以外、または承認対象のステップが存在しない場合
    /// - 同一ユーザーが既に判断済みの場合
    /// - 保存の競合が解消しない場合
    pub async fn approve_document(
        &self,
        input: ApproveDocumentInput,
        document_id: &DocumentId,
        principal: &Principal,
    ) -> Result<Document, CoreError> {
        let now = self.clock.now();
        let document = self
            .mutate_document(document_id, |document| {
                Ok(document.approve(principal, input.comment.clone(), now)?)
            })
            .await?;

        log_business_event!(
            event.category = event::category::DOCUMENT,
            event.action = event::action::STEP_APPROVED,
            event.entity_type = event::entity_type::DOCUMENT,
            event.entity_id = %document.id(),
            event.actor_id = %principal.user_id(),
            event.result = event::result::SUCCESS,
            "ステップ承認"
        );

        Ok(document)
    }
}

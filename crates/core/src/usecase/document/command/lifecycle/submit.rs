//! 文書の承認申請

use kessaiflow_domain::{
    document::{Document, DocumentId},
    principal::Principal,
};
use kessaiflow_shared::{event_log::event, log_business_event};

use crate::{error::CoreError, usecase::document::DocumentUseCaseImpl};

impl DocumentUseCaseImpl {
    /// 文書を承認申請する
    ///
    /// 下書き状態の文書を審査中に遷移させ、先頭の承認ステップを審査対象にする。
    ///
    /// ## エラー
    ///
    /// - 文書が見つからない場合
    /// - 作成者以外が申請した場合
    /// - 下書き状態でない場合
    /// - 保存の競合が解消しない場合
    pub async fn submit_document(
        &self,
        document_id: &DocumentId,
        principal: &Principal,
    ) -> Result<Document, CoreError> {
        let now = self.clock.now();
        let document = self
            .mutate_document(document_id, |document| {
                Ok(document.submit_for_approval(principal, now)?)
            })
            .await?;

        log_business_event!(
            event.category = event::category::DOCUMENT,
            event.action = event::action::DOCUMENT_SUBMITTED,
            event.entity_type = event::entity_type::DOCUMENT,
            event.entity_id = %document.id(),
            event.actor_id = %principal.user_id(),
            event.result = event::result::SUCCESS,
            "承認申請"
        );

        Ok(document)
    }
}

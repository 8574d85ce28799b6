//! 文書のアーカイブ

use kessaiflow_domain::{
    document::{Document, DocumentId},
    principal::Principal,
};
use kessaiflow_shared::{event_log::event, log_business_event};

use crate::{error::CoreError, usecase::document::DocumentUseCaseImpl};

impl DocumentUseCaseImpl {
    /// 文書をアーカイブする
    ///
    /// 審査中の文書はアーカイブできない。アーカイブ済みの文書への再実行は
    /// 成功し、状態は変わらない。
    ///
    /// ## エラー
    ///
    /// - 文書が見つからない場合
    /// - 作成者・管理者以外がアーカイブした場合
    /// - 審査中の文書をアーカイブした場合
    /// - 保存の競合が解消しない場合
    pub async fn archive_document(
        &self,
        document_id: &DocumentId,
        principal: &Principal,
    ) -> Result<Document, CoreError> {
        let now = self.clock.now();
        let document = self
            .mutate_document(document_id, |document| {
                Ok(document.archive(principal, now)?)
            })
            .await?;

        log_business_event!(
            event.category = event::category::DOCUMENT,
            event.action = event::action::DOCUMENT_ARCHIVED,
            event.entity_type = event::entity_type::DOCUMENT,
            event.entity_id = %document.id(),
            event.actor_id = %principal.user_id(),
            event.result = event::result::SUCCESS,
            "文書アーカイブ"
        );

        Ok(document)
    }
}

//! 文書へのコメント投稿

use kessaiflow_domain::{
    document::{CommentBody, CommentId, Document, DocumentId},
    principal::Principal,
};
use kessaiflow_shared::{event_log::event, log_business_event};

use crate::{
    error::CoreError,
    usecase::document::{DocumentUseCaseImpl, PostCommentInput},
};

impl DocumentUseCaseImpl {
    /// 文書にコメントを投稿する
    ///
    /// ステータスとの相互作用はなく、アーカイブ済みを含むどの状態の文書にも
    /// 投稿できる。
    ///
    /// ## エラー
    ///
    /// - 本文が空、または長すぎる場合
    /// - 文書が見つからない場合
    /// - 保存の競合が解消しない場合
    pub async fn post_comment(
        &self,
        input: PostCommentInput,
        document_id: &DocumentId,
        principal: &Principal,
    ) -> Result<Document, CoreError> {
        let body = CommentBody::new(input.body)?;
        let now = self.clock.now();
        let document = self
            .mutate_document(document_id, |document| {
                Ok(document.with_comment(
                    CommentId::new(),
                    principal.user_id().clone(),
                    body.clone(),
                    now,
                ))
            })
            .await?;

        log_business_event!(
            event.category = event::category::DOCUMENT,
            event.action = event::action::COMMENT_ADDED,
            event.entity_type = event::entity_type::DOCUMENT,
            event.entity_id = %document.id(),
            event.actor_id = %principal.user_id(),
            event.result = event::result::SUCCESS,
            "コメント追加"
        );

        Ok(document)
    }
}

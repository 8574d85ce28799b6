//! 文書の作成

use kessaiflow_domain::{
    document::{
        ApprovalStep,
        Document,
        DocumentId,
        FileValidation,
        NewApprovalStep,
        NewDocument,
        StorageKeyGenerator,
    },
    principal::Principal,
    value_objects::{DepartmentName, DocumentTitle, StepPosition, TagName, Version},
};
use kessaiflow_shared::{event_log::event, log_business_event};

use crate::{
    error::CoreError,
    usecase::document::{ApprovalStepInput, CreateDocumentInput, DocumentUseCaseImpl},
};

impl DocumentUseCaseImpl {
    /// 文書を作成する
    ///
    /// ## 処理フロー
    ///
    /// 1. ファイルの形式・サイズを検証
    /// 2. 入力を値オブジェクトへ変換
    /// 3. 初版ファイルをストレージに保存
    /// 4. Document を作成（承認ステップありなら審査中、なしなら下書き）
    /// 5. リポジトリに保存
    ///
    /// ## エラー
    ///
    /// - ファイル形式が非対応、またはサイズ超過の場合
    /// - タイトル・部門・タグ・承認ステップのバリデーションに失敗した場合
    /// - データベースエラー
    pub async fn create_document(
        &self,
        input: CreateDocumentInput,
        principal: &Principal,
    ) -> Result<Document, CoreError> {
        // 1. ファイルの形式・サイズを検証
        FileValidation::validate_file(&input.file.content_type, input.file.content.len() as i64)?;

        // 2. 入力を値オブジェクトへ変換
        let title = DocumentTitle::new(input.title)?;
        let department = DepartmentName::new(input.department)?;
        let tags = input
            .tags
            .into_iter()
            .map(TagName::new)
            .collect::<Result<Vec<_>, _>>()?;
        let approval_steps = input
            .approval_steps
            .into_iter()
            .map(build_step)
            .collect::<Result<Vec<_>, _>>()?;

        // 3. 初版ファイルをストレージに保存
        let document_id = DocumentId::new();
        let key =
            StorageKeyGenerator::generate(&document_id, Version::initial(), &input.file.filename);
        let file_url = self.storage.put(&input.file, &key).await?;

        // 4. Document を作成（以降の失敗時はアップロード済みファイルを削除する）
        let now = self.clock.now();
        let document = Document::new(NewDocument {
            id: document_id,
            title,
            description: input.description,
            document_type: input.document_type,
            created_by: principal.user_id().clone(),
            department,
            file_url: file_url.clone(),
            tags,
            metadata: input.metadata,
            expires_at: input.expires_at,
            approval_steps,
            now,
        });
        let document = match document {
            Ok(document) => document,
            Err(e) => {
                self.delete_uploaded_file(&file_url).await;
                return Err(e.into());
            }
        };

        // 5. リポジトリに保存
        if let Err(e) = self.document_repo.insert(&document).await {
            self.delete_uploaded_file(&file_url).await;
            return Err(CoreError::Database(e));
        }

        log_business_event!(
            event.category = event::category::DOCUMENT,
            event.action = event::action::DOCUMENT_CREATED,
            event.entity_type = event::entity_type::DOCUMENT,
            event.entity_id = %document.id(),
            event.actor_id = %principal.user_id(),
            event.result = event::result::SUCCESS,
            "文書作成"
        );

        Ok(document)
    }
}

/// 承認ステップ入力を検証済みのステップへ変換する
fn build_step(input: ApprovalStepInput) -> Result<ApprovalStep, CoreError> {
    Ok(ApprovalStep::new(NewApprovalStep {
        position: StepPosition::new(input.position)?,
        target: input.target,
        all_approvers_required: input.all_approvers_required.unwrap_or(true),
    })?)
}

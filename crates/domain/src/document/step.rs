//! # 承認ステップ
//!
//! 文書の承認フローを構成する個々の承認ステージを管理する。
//! 承認対象者の選択方式と承認者の判断記録を保持し、
//! 定足数ルールに基づいてステップの成立・不成立を評価する。

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{
    DomainError,
    principal::{Department, Principal, UserId, UserRole},
    value_objects::StepPosition,
};

/// 承認ステップステータス
///
/// 文書ステータスと語彙が重なるが、ステップ専用の別型として定義する。
/// 文書全体の状態とステップ単体の状態を取り違えないようにするため。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StepStatus {
    /// 審査中
    PendingReview,
    /// 承認済み
    Approved,
    /// 却下
    Rejected,
}

impl std::str::FromStr for StepStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_review" => Ok(Self::PendingReview),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::Validation(format!(
                "不正な承認ステップステータス: {}",
                s
            ))),
        }
    }
}

/// 承認者個人の判断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "snake_case")]
pub enum StepDecision {
    /// 承認
    Approved,
    /// 却下
    Rejected,
}

impl std::str::FromStr for StepDecision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::Validation(format!(
                "不正な承認判断: {}",
                s
            ))),
        }
    }
}

/// 承認対象者の選択方式
///
/// 指名制とロール・部署制は排他であり、両方の同時指定は型として表現できない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepTarget {
    /// 指名されたユーザー集合による承認
    ExplicitUsers { assigned_to: Vec<UserId> },
    /// ロール（および任意で部署）に属するユーザーによる承認
    RoleDepartment {
        role: UserRole,
        department: Option<Department>,
    },
}

/// ステップ評価の結果
///
/// 承認記録の集合から純粋に導出される。評価自体は状態を変更しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// 定足数未達
    Pending,
    /// 成立
    Approved,
    /// 不成立（却下が 1 件以上存在する）
    Rejected,
}

/// 承認者 1 名分の判断記録
///
/// 一度追加された記録は変更されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproverEntry {
    user_id: UserId,
    decision: StepDecision,
    comment: Option<String>,
    decided_at: DateTime<Utc>,
}

impl ApproverEntry {
    /// 承認の記録を作成する
    pub fn approved(user_id: UserId, comment: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            decision: StepDecision::Approved,
            comment,
            decided_at: now,
        }
    }

    /// 却下の記録を作成する
    pub fn rejected(user_id: UserId, comment: String, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            decision: StepDecision::Rejected,
            comment: Some(comment),
            decided_at: now,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn decision(&self) -> StepDecision {
        self.decision
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn decided_at(&self) -> DateTime<Utc> {
        self.decided_at
    }
}

/// 承認ステップ
///
/// 文書集約に埋め込まれる値オブジェクト。`position` は 1 始まりの連番で、
/// 文書内の承認順序を定める。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalStep {
    position: StepPosition,
    target: StepTarget,
    all_approvers_required: bool,
    status: StepStatus,
    approvers: Vec<ApproverEntry>,
    comment: Option<String>,
    approved_at: Option<DateTime<Utc>>,
    rejected_at: Option<DateTime<Utc>>,
}

/// 承認ステップの新規作成パラメータ
pub struct NewApprovalStep {
    pub position: StepPosition,
    pub target: StepTarget,
    pub all_approvers_required: bool,
}

/// 承認ステップの DB 復元パラメータ
pub struct ApprovalStepRecord {
    pub position: StepPosition,
    pub target: StepTarget,
    pub all_approvers_required: bool,
    pub status: StepStatus,
    pub approvers: Vec<ApproverEntry>,
    pub comment: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
}

impl ApprovalStep {
    /// 新しい承認ステップを作成する
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation`: 指名制で承認者が空、または重複している場合
    pub fn new(params: NewApprovalStep) -> Result<Self, DomainError> {
        Self::validate_target(&params.target)?;

        Ok(Self {
            position: params.position,
            target: params.target,
            all_approvers_required: params.all_approvers_required,
            status: StepStatus::PendingReview,
            approvers: Vec::new(),
            comment: None,
            approved_at: None,
            rejected_at: None,
        })
    }

    /// 既存のデータから復元する
    pub fn from_db(record: ApprovalStepRecord) -> Self {
        Self {
            position: record.position,
            target: record.target,
            all_approvers_required: record.all_approvers_required,
            status: record.status,
            approvers: record.approvers,
            comment: record.comment,
            approved_at: record.approved_at,
            rejected_at: record.rejected_at,
        }
    }

    fn validate_target(target: &StepTarget) -> Result<(), DomainError> {
        match target {
            StepTarget::ExplicitUsers { assigned_to } => {
                if assigned_to.is_empty() {
                    return Err(DomainError::Validation(
                        "承認者を 1 名以上指定してください".to_string(),
                    ));
                }
                let mut seen = HashSet::new();
                if !assigned_to.iter().all(|user_id| seen.insert(user_id)) {
                    return Err(DomainError::Validation(
                        "承認者が重複しています".to_string(),
                    ));
                }
                Ok(())
            }
            StepTarget::RoleDepartment { .. } => Ok(()),
        }
    }

    // Getter メソッド

    pub fn position(&self) -> StepPosition {
        self.position
    }

    pub fn target(&self) -> &StepTarget {
        &self.target
    }

    pub fn all_approvers_required(&self) -> bool {
        self.all_approvers_required
    }

    pub fn status(&self) -> StepStatus {
        self.status
    }

    pub fn approvers(&self) -> &[ApproverEntry] {
        &self.approvers
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }

    pub fn rejected_at(&self) -> Option<DateTime<Utc>> {
        self.rejected_at
    }

    // ビジネスロジックメソッド

    /// 指定ユーザーの判断記録が既に存在するかチェックする
    pub fn has_entry_for(&self, user_id: &UserId) -> bool {
        self.approvers
            .iter()
            .any(|entry| entry.user_id() == user_id)
    }

    /// プリンシパルがこのステップで承認・却下を行えるかチェックする
    ///
    /// - 指名制: 指名リストに含まれるユーザーのみ
    /// - ロール・部署制: ロールが一致し、かつ部署指定がないか一致するユーザーのみ
    ///
    /// どちらにも該当しない場合は拒否する。管理者であっても対象外なら行動できない。
    pub fn can_act(&self, principal: &Principal) -> bool {
        match &self.target {
            StepTarget::ExplicitUsers { assigned_to } => {
                assigned_to.contains(principal.user_id())
            }
            StepTarget::RoleDepartment { role, department } => {
                *role == principal.role()
                    && department.is_none_or(|dept| dept == principal.department())
            }
        }
    }

    /// 現在の判断記録から定足数ルールを評価する
    ///
    /// 副作用はない。記録の順序は結果に影響しない。
    ///
    /// - 記録が 1 件もなければ定足数未達
    /// - 却下が 1 件でもあれば不成立（全員必須フラグに関わらず拒否権が働く）
    /// - 指名制かつ全員必須の場合のみ、指名された全員の承認が揃って成立
    /// - それ以外は 1 件の承認で成立する。ロール・部署制は全員必須フラグが
    ///   立っていても閉じた承認者集合を持たないため、1 件で成立する
    pub fn evaluate(&self) -> StepOutcome {
        if self.approvers.is_empty() {
            return StepOutcome::Pending;
        }

        if self
            .approvers
            .iter()
            .any(|entry| entry.decision() == StepDecision::Rejected)
        {
            return StepOutcome::Rejected;
        }

        match (&self.target, self.all_approvers_required) {
            (StepTarget::ExplicitUsers { assigned_to }, true) => {
                let everyone_approved = assigned_to
                    .iter()
                    .all(|assignee| self.has_entry_for(assignee));
                if everyone_approved {
                    StepOutcome::Approved
                } else {
                    StepOutcome::Pending
                }
            }
            (StepTarget::RoleDepartment { .. }, true) => StepOutcome::Approved,
            (StepTarget::ExplicitUsers { .. } | StepTarget::RoleDepartment { .. }, false) => {
                StepOutcome::Approved
            }
        }
    }

    /// 承認を記録した新しいインスタンスを返す
    ///
    /// 記録後に定足数ルールを再評価し、成立した場合はステップを承認済みに解決する。
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidState`: 審査中以外のステップに記録しようとした場合
    /// - `DomainError::DuplicateAction`: 同一ユーザーが既に判断済みの場合
    pub fn record_approval(
        self,
        user_id: UserId,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if self.status != StepStatus::PendingReview {
            return Err(DomainError::InvalidState(format!(
                "承認の記録は審査中のステップでのみ可能です（現在: {}）",
                self.status
            )));
        }
        if self.has_entry_for(&user_id) {
            return Err(DomainError::DuplicateAction(format!(
                "ユーザー {} はこのステップで判断済みです",
                user_id
            )));
        }

        let mut approvers = self.approvers.clone();
        approvers.push(ApproverEntry::approved(user_id, comment, now));

        let step = Self { approvers, ..self };
        if step.evaluate() == StepOutcome::Approved {
            Ok(Self {
                status: StepStatus::Approved,
                approved_at: Some(now),
                ..step
            })
        } else {
            Ok(step)
        }
    }

    /// 却下を記録した新しいインスタンスを返す
    ///
    /// 却下は 1 件で即座にステップを不成立として解決する。コメントは必須。
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation`: コメントが空の場合
    /// - `DomainError::InvalidState`: 審査中以外のステップに記録しようとした場合
    /// - `DomainError::DuplicateAction`: 同一ユーザーが既に判断済みの場合
    pub fn record_rejection(
        self,
        user_id: UserId,
        comment: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(DomainError::Validation(
                "却下にはコメントが必須です".to_string(),
            ));
        }
        if self.status != StepStatus::PendingReview {
            return Err(DomainError::InvalidState(format!(
                "却下の記録は審査中のステップでのみ可能です（現在: {}）",
                self.status
            )));
        }
        if self.has_entry_for(&user_id) {
            return Err(DomainError::DuplicateAction(format!(
                "ユーザー {} はこのステップで判断済みです",
                user_id
            )));
        }

        let mut approvers = self.approvers.clone();
        approvers.push(ApproverEntry::rejected(user_id, comment.to_string(), now));

        Ok(Self {
            approvers,
            status: StepStatus::Rejected,
            comment: Some(comment.to_string()),
            rejected_at: Some(now),
            ..self
        })
    }

    /// ステップを初期状態に戻した新しいインスタンスを返す
    ///
    /// 判断記録と解決結果をすべて消去する。position・対象者・定足数ルールは保持する。
    /// 却下後の新バージョン登録で承認フローを最初からやり直すために使用する。
    pub fn reset(self) -> Self {
        Self {
            status: StepStatus::PendingReview,
            approvers: Vec::new(),
            comment: None,
            approved_at: None,
            rejected_at: None,
            ..self
        }
    }
}

//! # プリンシパル（操作主体）
//!
//! 外部の認証基盤が解決した「操作を行うユーザー」のモデル。
//!
//! ## 設計方針
//!
//! 認証・ユーザー管理はこのシステムの責務外であり、すべての操作は
//! 認証済みのプリンシパル（ID・ロール・部署）を**明示的な引数**として
//! 受け取る。リクエストコンテキストやスレッドローカルなど、
//! 暗黙の状態からプリンシパルを復元することはない。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`Principal`] | 操作主体 | すべてのユースケース操作の第一級引数 |
//! | [`UserRole`] | ユーザーロール | 承認ステップの対象選択と特権判定 |
//! | [`Department`] | 部署区分 | ロールベースのステップ対象を部署で絞り込む |

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::DomainError;

define_uuid_id! {
    /// ユーザー ID（一意識別子）
    ///
    /// ユーザーエンティティ自体は外部の認証基盤が管理するため、
    /// このシステムでは ID の参照のみを保持する。
    pub struct UserId;
}

/// ユーザーロール
///
/// 承認ステップの「ロール指定」対象選択と、特権操作
/// （他人の文書への新バージョン追加・アーカイブ）の判定に使用する。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
    /// システム管理者
    Admin,
    /// 部門長
    DepartmentHead,
    /// 一般従業員
    Employee,
    /// 閲覧のみ
    Viewer,
}

impl std::str::FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "department_head" => Ok(Self::DepartmentHead),
            "employee" => Ok(Self::Employee),
            "viewer" => Ok(Self::Viewer),
            _ => Err(DomainError::Validation(format!(
                "不正なユーザーロール: {}",
                s
            ))),
        }
    }
}

/// 部署区分
///
/// 承認ステップの「ロール + 部署」対象選択と、プリンシパルの所属に使用する
/// 閉じた区分。文書自体の所属を表す自由記述の
/// [`DepartmentName`](crate::value_objects::DepartmentName) とは別物。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Department {
    /// 経営管理
    Management,
    /// 経理・財務
    Finance,
    /// 人事
    Hr,
    /// 法務
    Legal,
    /// 情報システム
    It,
    /// マーケティング
    Marketing,
    /// 営業
    Sales,
    /// 業務・オペレーション
    Operations,
}

impl std::str::FromStr for Department {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "management" => Ok(Self::Management),
            "finance" => Ok(Self::Finance),
            "hr" => Ok(Self::Hr),
            "legal" => Ok(Self::Legal),
            "it" => Ok(Self::It),
            "marketing" => Ok(Self::Marketing),
            "sales" => Ok(Self::Sales),
            "operations" => Ok(Self::Operations),
            _ => Err(DomainError::Validation(format!("不正な部署区分: {}", s))),
        }
    }
}

/// プリンシパル（認証済みの操作主体）
///
/// 外部の認証基盤が解決した ID・ロール・部署の組。
/// ドメイン・ユースケースの各操作はこの値を無条件に信頼する
/// （トークン検証は責務外）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id:    UserId,
    role:       UserRole,
    department: Department,
}

impl Principal {
    /// プリンシパルを作成する
    pub fn new(user_id: UserId, role: UserRole, department: Department) -> Self {
        Self {
            user_id,
            role,
            department,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn department(&self) -> Department {
        self.department
    }

    /// 管理者相当の特権を持つか判定する
    ///
    /// 作成者以外による新バージョン追加・アーカイブを許可するロールかどうか。
    pub fn is_admin_equivalent(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}

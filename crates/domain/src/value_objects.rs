//! # 共通値オブジェクト
//!
//! 複数のエンティティで共有される値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: プリミティブ型をラップし、型安全性を確保
//! - **バリデーション**: 生成時に検証し、不正な値の存在を型レベルで排除
//! - **不変性**: 一度作成したら変更不可
//!
//! ## 含まれる型
//!
//! | 型 | ラップ対象 | 用途 |
//! |---|-----------|------|
//! | [`Version`] | `u32` | バージョン番号（楽観的ロック・文書バージョンの両方） |
//! | [`StepPosition`] | `u32` | 承認ステップの 1 始まり位置 |
//! | [`DocumentTitle`] | `String` | 文書タイトル |
//! | [`DepartmentName`] | `String` | 文書の所属部署（自由記述の組織単位名） |
//! | [`TagName`] | `String` | 文書に付与するタグ |

use serde::{Deserialize, Serialize};

use crate::DomainError;

// =========================================================================
// Version（バージョン番号）
// =========================================================================

/// バージョン番号（値オブジェクト）
///
/// 1 から始まり、更新のたびにインクリメントされる。
/// 文書集約では 2 つの用途で使用する:
///
/// - 楽観的ロック用バージョン（状態遷移のたびに増加）
/// - 文書コンテンツのバージョン番号（新バージョン追加のたびに増加）
///
/// # 不変条件
///
/// - バージョン番号は 1 以上
/// - u32 の範囲内（0 〜 4,294,967,295）
///
/// # 使用例
///
/// ```rust
/// use kessaiflow_domain::value_objects::Version;
///
/// let v1 = Version::initial();
/// assert_eq!(v1.as_u32(), 1);
///
/// let v2 = v1.next();
/// assert_eq!(v2.as_u32(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version(u32);

impl Version {
    /// 初期バージョン（1）を作成する
    pub fn initial() -> Self {
        Self(1)
    }

    /// 指定した値からバージョンを作成する
    ///
    /// # バリデーション
    ///
    /// - 0 は無効（バージョンは 1 以上）
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::Validation(
                "バージョン番号は 1 以上である必要があります".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// 次のバージョンを返す
    ///
    /// # パニック
    ///
    /// u32 の最大値を超える場合はパニックする。
    /// 実運用では到達しない想定。
    pub fn next(&self) -> Self {
        Self(
            self.0
                .checked_add(1)
                .expect("バージョン番号がオーバーフローしました"),
        )
    }

    /// 内部の u32 値を取得する
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Version {
    type Error = DomainError;

    /// i64 から Version への変換を試みる
    ///
    /// # エラー
    ///
    /// - 値が 0 以下、または u32 の範囲外の場合は `DomainError::Validation` を返す
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let value = u32::try_from(value).map_err(|_| {
            DomainError::Validation("バージョン番号は 1 以上である必要があります".to_string())
        })?;
        Self::new(value)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

// =========================================================================
// StepPosition（承認ステップ位置）
// =========================================================================

/// 承認ステップの位置（値オブジェクト）
///
/// 承認フロー内でのステップの 1 始まりの順位。
/// 文書の `approval_steps` は position 昇順に並び、
/// 1..N の連番になっていることを集約が保証する。
///
/// # 不変条件
///
/// - 1 以上の正整数
///
/// # 使用例
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use kessaiflow_domain::value_objects::StepPosition;
///
/// let pos = StepPosition::new(2)?;
/// assert_eq!(pos.as_u32(), 2);
/// assert_eq!(pos.as_index(), 1); // Vec 添字（0 始まり）
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StepPosition(u32);

impl StepPosition {
    /// 先頭位置（1）を作成する
    pub fn first() -> Self {
        Self(1)
    }

    /// 指定した値からステップ位置を作成する
    ///
    /// # バリデーション
    ///
    /// - 0 は無効（位置は 1 以上）
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::Validation(
                "承認ステップの位置は 1 以上である必要があります".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// 次の位置を返す
    ///
    /// # パニック
    ///
    /// u32 の最大値を超える場合はパニックする。
    /// 実運用では到達しない想定。
    pub fn next(&self) -> Self {
        Self(
            self.0
                .checked_add(1)
                .expect("承認ステップの位置がオーバーフローしました"),
        )
    }

    /// 内部の u32 値を取得する
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Vec 添字（0 始まり）に変換する
    pub fn as_index(&self) -> usize {
        (self.0 - 1) as usize
    }
}

impl std::fmt::Display for StepPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// DocumentTitle（文書タイトル）
// =========================================================================

define_validated_string! {
    /// 文書タイトル（値オブジェクト）
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 255 文字
    pub struct DocumentTitle {
        label: "タイトル",
        max_length: 255,
    }
}

// =========================================================================
// DepartmentName（所属部署名）
// =========================================================================

define_validated_string! {
    /// 文書の所属部署名（値オブジェクト）
    ///
    /// 文書がどの組織単位に属するかを示す自由記述の名前。
    /// 承認ステップの対象選択に使う閉じた部署区分
    /// [`Department`](crate::principal::Department) とは別物で、
    /// こちらは表示・絞り込み用のラベルにすぎない。
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 100 文字
    pub struct DepartmentName {
        label: "部署名",
        max_length: 100,
    }
}

// =========================================================================
// TagName（タグ）
// =========================================================================

define_validated_string! {
    /// 文書タグ（値オブジェクト）
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 50 文字
    pub struct TagName {
        label: "タグ",
        max_length: 50,
    }
}

// =========================================================================
// テスト
// =========================================================================

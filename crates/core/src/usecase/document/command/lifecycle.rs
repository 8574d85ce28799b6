//! 文書のライフサイクル管理（作成・申請・版管理・アーカイブ）

mod archive;
mod create;
mod submit;
mod version;

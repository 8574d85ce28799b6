//! 文書ユースケースの状態変更操作

mod comment;
mod decision;
mod helpers;
mod lifecycle;

//! 承認・却下の判断操作

mod approve;
mod reject;

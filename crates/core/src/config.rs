//! # エンジン設定
//!
//! 環境変数からワークフローエンジンの設定を読み込む。
//! すべての項目にデフォルト値があるため、未設定でも起動できる。

use std::env;

/// ワークフローエンジンの設定
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// 楽観的ロック競合時の最大試行回数（初回実行を含む）
    pub optimistic_retry_max: u32,
    /// 一覧取得のデフォルト件数
    pub default_page_size: usize,
    /// 一覧取得の最大件数（リクエストの指定値はこの値で頭打ちになる）
    pub max_page_size: usize,
}

impl CoreConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            optimistic_retry_max: env::var("OPTIMISTIC_RETRY_MAX")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .expect("OPTIMISTIC_RETRY_MAX は正の整数である必要があります"),
            default_page_size: env::var("DEFAULT_PAGE_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("DEFAULT_PAGE_SIZE は正の整数である必要があります"),
            max_page_size: env::var("MAX_PAGE_SIZE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .expect("MAX_PAGE_SIZE は正の整数である必要があります"),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            optimistic_retry_max: 3,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

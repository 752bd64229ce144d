//! FesOrder Server - 学园祭模拟店的点单与销售统计服务
//!
//! # 架构概述
//!
//! - **存储** (`store`): 嵌入式 redb，订单、菜单/配料目录、社团与活动名录
//! - **HTTP API** (`api`): 订单登记、后台状态切换、目录维护、社团名录、销售报表
//! - **报表** (`shared::report`): 纯函数聚合，服务端只负责取数与过滤
//!
//! # 模块结构
//!
//! ```text
//! fes-server/src/
//! ├── core/          # 配置、状态、服务器、启动错误
//! ├── store/         # redb 存储 + OrderStore / CatalogStore / DirectoryStore
//! ├── services/      # HTTP 路由装配与中间件
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、输入校验
//! ```

pub mod api;
pub mod core;
pub mod services;
pub mod store;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use store::{CatalogStore, DirectoryStore, FesStorage, OrderStore, StorageError};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

pub use utils::logger::init_logger_with_file;

/// Load `.env` and install the global subscriber
///
/// Reads `LOG_LEVEL`, `LOG_JSON` and `LOG_DIR` straight from the
/// environment, since logging must be up before [`Config::from_env`] runs.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_json = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);
    let log_dir = std::env::var("LOG_DIR").ok();

    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }

    init_logger_with_file(log_level.as_deref(), log_json, log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ______          ____           __
   / ____/__  _____/ __ \_________/ /__  _____
  / /_  / _ \/ ___/ / / / ___/ __  / _ \/ ___/
 / __/ /  __(__  ) /_/ / /  / /_/ /  __/ /
/_/    \___/____/\____/_/   \__,_/\___/_/
    "#
    );
}

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono_tz::Tz;

use crate::core::{Config, Result};
use crate::store::{CatalogStore, DirectoryStore, FesStorage, OrderStore};

/// 服务器状态 - 持有配置和存储的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆一次。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | orders | Arc<dyn OrderStore> | 订单存储 |
/// | catalog | Arc<dyn CatalogStore> | 菜单/配料目录 |
/// | directory | Arc<dyn DirectoryStore> | 社团与活动名录 |
/// | started_at | Instant | 启动时刻 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 订单存储
    pub orders: Arc<dyn OrderStore>,
    /// 菜单/配料目录
    pub catalog: Arc<dyn CatalogStore>,
    /// 社团与活动名录
    pub directory: Arc<dyn DirectoryStore>,
    started_at: Instant,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    pub fn new(
        config: Config,
        orders: Arc<dyn OrderStore>,
        catalog: Arc<dyn CatalogStore>,
        directory: Arc<dyn DirectoryStore>,
    ) -> Self {
        Self {
            config,
            orders,
            catalog,
            directory,
            started_at: Instant::now(),
        }
    }

    /// 同一个 redb 数据库同时作为订单存储、目录和名录
    pub fn with_storage(config: Config, storage: FesStorage) -> Self {
        let storage = Arc::new(storage);
        Self::new(config, storage.clone(), storage.clone(), storage)
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录 (确保存在)
    /// 2. 数据库 (默认 work_dir/fes-order.redb)
    pub fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db_path = config.database_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let storage = FesStorage::open(&db_path)?;
        tracing::info!(
            path = %db_path.display(),
            timezone = %config.timezone,
            "Database ready"
        );

        Ok(Self::with_storage(config.clone(), storage))
    }

    /// 报表时区
    pub fn timezone(&self) -> Tz {
        self.config.timezone
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

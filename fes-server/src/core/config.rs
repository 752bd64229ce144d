use std::path::PathBuf;

use chrono_tz::Tz;

/// Report time zone used when `TIMEZONE` is unset
pub const DEFAULT_TIMEZONE: Tz = Tz::Asia__Tokyo;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_FILE | {WORK_DIR}/fes-order.redb | redb 数据库文件 |
/// | TIMEZONE | Asia/Tokyo | 报表时区 (IANA) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | - | 日志目录 (按天滚动) |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/fes HTTP_PORT=8080 TIMEZONE=Asia/Tokyo cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存放数据库等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 显式指定的数据库文件 (否则位于工作目录下)
    pub database_file: Option<String>,
    /// 报表时区：分桶键和小时分布都按此时区计算
    pub timezone: Tz,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_file: std::env::var("DATABASE_FILE").ok(),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .map(|name| parse_timezone(&name))
                .unwrap_or(DEFAULT_TIMEZONE),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景；数据库文件随工作目录一起改变
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.database_file = None;
        config
    }

    /// redb 数据库路径
    pub fn database_path(&self) -> PathBuf {
        match &self.database_file {
            Some(file) => PathBuf::from(file),
            None => PathBuf::from(&self.work_dir).join("fes-order.redb"),
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Unknown zone names fall back to UTC
pub fn parse_timezone(name: &str) -> Tz {
    match name.trim().parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!(timezone = %name, "Unknown TIMEZONE, falling back to UTC");
            Tz::UTC
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Asia/Tokyo"), Tz::Asia__Tokyo);
        assert_eq!(parse_timezone(" Europe/Madrid "), Tz::Europe__Madrid);
        assert_eq!(parse_timezone("Mars/Olympus"), Tz::UTC);
    }

    #[test]
    fn test_database_path() {
        let mut config = Config::with_overrides("/tmp/fes", 0);
        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/fes").join("fes-order.redb")
        );

        config.database_file = Some("/var/fes/orders.redb".to_string());
        assert_eq!(config.database_path(), PathBuf::from("/var/fes/orders.redb"));
    }
}

// ==========================================
// 过程质量控制台 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、快照导出
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::classifier_config_trait::ClassifierConfigReader;
use crate::db::open_sqlite_connection;
use crate::engine::classifier::DEFAULT_WARNING_RATIO;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 历史判定默认回溯小时数
pub const DEFAULT_HISTORY_HOURS: u32 = 24;

/// 历史判定回溯小时数上限（一年）
pub const MAX_HISTORY_HOURS: u32 = 24 * 366;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 用途
    /// - 判定结果追溯时记录当时生效的参数
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key"
        )?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }
}

// ==========================================
// ClassifierConfigReader Trait 实现
// ==========================================
#[async_trait]
impl ClassifierConfigReader for ConfigManager {
    async fn get_warning_ratio(&self) -> Result<f64, Box<dyn Error>> {
        let raw = match self.get_config_value(config_keys::WARNING_RATIO)? {
            Some(v) => v,
            None => return Ok(DEFAULT_WARNING_RATIO),
        };

        match raw.trim().parse::<f64>() {
            Ok(ratio) if ratio.is_finite() && (0.0..=1.0).contains(&ratio) => Ok(ratio),
            _ => {
                tracing::warn!(
                    config_key = config_keys::WARNING_RATIO,
                    raw_value = %raw,
                    "预警带比例配置非法，使用默认值"
                );
                Ok(DEFAULT_WARNING_RATIO)
            }
        }
    }

    async fn get_default_history_hours(&self) -> Result<u32, Box<dyn Error>> {
        let raw = match self.get_config_value(config_keys::DEFAULT_HISTORY_HOURS)? {
            Some(v) => v,
            None => return Ok(DEFAULT_HISTORY_HOURS),
        };

        match raw.trim().parse::<u32>() {
            Ok(hours) if (1..=MAX_HISTORY_HOURS).contains(&hours) => Ok(hours),
            _ => {
                tracing::warn!(
                    config_key = config_keys::DEFAULT_HISTORY_HOURS,
                    raw_value = %raw,
                    "历史回溯小时数配置非法，使用默认值"
                );
                Ok(DEFAULT_HISTORY_HOURS)
            }
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 判定规则
    pub const WARNING_RATIO: &str = "spc/warning_ratio";

    // 历史判定
    pub const DEFAULT_HISTORY_HOURS: &str = "spc/default_history_hours";
}

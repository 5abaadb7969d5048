// ==========================================
// 过程质量控制台 - 应用状态
// ==========================================
// 职责: 启动时装配 数据库 → 数据源 → 配置 → 检测 API
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{ApiError, ApiResult, InspectionApi};
use crate::config::ConfigManager;
use crate::db::{ensure_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use crate::repository::SqliteDataSource;

/// 应用状态
pub struct AppState {
    pub db_path: String,
    pub inspection_api: InspectionApi,
}

impl AppState {
    /// 初始化应用状态
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（不存在时自动建库建表）
    pub async fn new(db_path: String) -> ApiResult<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?;
        ensure_schema(&conn).map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        match read_schema_version(&conn) {
            Ok(Some(v)) if v > CURRENT_SCHEMA_VERSION => {
                tracing::warn!(
                    db_version = v,
                    expected = CURRENT_SCHEMA_VERSION,
                    "数据库 schema 版本高于当前程序"
                );
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("读取 schema_version 失败: {}", e),
        }

        let conn = Arc::new(Mutex::new(conn));
        let data_source = Arc::new(SqliteDataSource::from_connection(conn.clone()));
        let config_manager = ConfigManager::from_connection(conn)
            .map_err(|e| ApiError::InternalError(format!("初始化ConfigManager失败: {}", e)))?;

        let inspection_api = InspectionApi::from_config(data_source, &config_manager).await?;

        tracing::info!(
            warning_ratio = inspection_api.classifier().config().warning_ratio,
            "AppState初始化完成"
        );

        Ok(Self {
            db_path,
            inspection_api,
        })
    }
}

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 INPROCESS_QC_DB_PATH（非空时优先）
/// - 开发环境: 用户数据目录/inprocess-qc-dev/inprocess_qc.db
/// - 生产环境: 用户数据目录/inprocess-qc/inprocess_qc.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("INPROCESS_QC_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./inprocess_qc.db");

    if let Some(data_dir) = dirs::data_dir() {
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("inprocess-qc-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("inprocess-qc");
        }

        // 确保目录存在
        std::fs::create_dir_all(&path).ok();
        path = path.join("inprocess_qc.db");
    }

    path.to_string_lossy().to_string()
}

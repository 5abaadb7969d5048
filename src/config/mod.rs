// ==========================================
// 过程质量控制台 - 配置层
// ==========================================
// 职责: 判定参数管理
// 存储: config_kv 表
// ==========================================

pub mod classifier_config_trait;
pub mod config_manager;

// 重导出核心配置管理器
pub use classifier_config_trait::ClassifierConfigReader;
pub use config_manager::{config_keys, ConfigManager, DEFAULT_HISTORY_HOURS, MAX_HISTORY_HOURS};

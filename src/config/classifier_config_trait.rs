// ==========================================
// 过程质量控制台 - 判定配置读取 Trait
// ==========================================
// 职责: 定义判定引擎/检测 API 所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含判定逻辑
// ==========================================

use crate::engine::classifier::ClassifierConfig;
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// ClassifierConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ClassifierConfigReader: Send + Sync {
    /// 获取预警带比例
    ///
    /// # 返回
    /// - f64: 取值 [0, 1]
    ///
    /// # 默认值
    /// - 0.3
    async fn get_warning_ratio(&self) -> Result<f64, Box<dyn Error>>;

    /// 获取历史判定默认回溯小时数
    ///
    /// # 返回
    /// - u32: 取值 [1, 8784]
    ///
    /// # 默认值
    /// - 24
    async fn get_default_history_hours(&self) -> Result<u32, Box<dyn Error>>;

    /// 组装判定引擎参数
    async fn load_classifier_config(&self) -> Result<ClassifierConfig, Box<dyn Error>> {
        Ok(ClassifierConfig {
            warning_ratio: self.get_warning_ratio().await?,
        })
    }
}

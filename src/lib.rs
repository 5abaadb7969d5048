// ==========================================
// 过程质量控制台 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 在线检测判定 (SPC 四级判定,人工最终处置)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 判定规则
pub mod engine;

// 配置层 - 判定参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 启动装配与视图状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Characteristic, ControlItem, Device, EvaluationReason, LimitSet, QualityStatus, Sample,
    SampleRange,
};

// 引擎
pub use engine::{classify_measurement, ClassifierConfig, EngineError, MeasurementClassifier};

// 数据源
pub use repository::{InMemoryDataSource, QualityDataSource, SqliteDataSource};

// API
pub use api::{ApiError, InspectionApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "过程质量控制台";

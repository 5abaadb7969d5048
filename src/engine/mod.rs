// ==========================================
// 过程质量控制台 - 引擎层
// ==========================================
// 职责: 实现判定规则,不拼 SQL
// 红线: Engine 不拼 SQL, 所有判定必须输出 reason
// ==========================================

pub mod classifier;
pub mod error;

// 重导出核心引擎
pub use classifier::{
    classify_measurement, BatchEvaluation, ClassifierConfig, MeasurementClassifier,
    MeasurementEvaluation, StatusSummary, WarningBand, DEFAULT_WARNING_RATIO,
};
pub use error::{EngineError, EngineResult};

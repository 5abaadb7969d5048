// ==========================================
// 过程质量控制台 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含判定逻辑
// ==========================================

pub mod characteristic;
pub mod limits;
pub mod sample;
pub mod types;

// 重导出核心类型
pub use characteristic::{Characteristic, ControlItem, Device};
pub use limits::LimitSet;
pub use sample::{Sample, SampleRange};
pub use types::{EvaluationReason, QualityStatus};

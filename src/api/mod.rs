// ==========================================
// 过程质量控制台 - API 层
// ==========================================
// 职责: 操作员界面调用的业务接口,封装引擎与数据源
// ==========================================

pub mod error;
pub mod inspection_api;

pub use error::{ApiError, ApiResult};
pub use inspection_api::{
    ControlItemStatus, HistoryEvaluation, InspectionApi, InspectionRecord, SamplePoint,
};

// ==========================================
// 过程质量控制台 - 应用层
// ==========================================
// 职责: 启动装配 + 界面视图状态
// ==========================================

pub mod state;
pub mod view_state;

// 重导出
pub use state::{get_default_db_path, AppState};
pub use view_state::{ConsoleDialog, ConsoleTab, ConsoleViewState, SampleFilter};

// ==========================================
// 过程质量控制台 - 数据仓储层
// ==========================================
// 红线: Repository 不含判定逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod data_source;
pub mod error;
pub mod memory_source;
pub mod sqlite_source;

// 重导出核心仓储
pub use data_source::QualityDataSource;
pub use error::{RepositoryError, RepositoryResult};
pub use memory_source::InMemoryDataSource;
pub use sqlite_source::SqliteDataSource;

// ==========================================
// 过程质量控制台 - 质量数据源接口
// ==========================================
// 红线: Repository 不含判定逻辑
// 职责: 提供控制项、特性、量具、历史样本的只读访问
// 实现者: SqliteDataSource (生产) / InMemoryDataSource (测试、演示)
// ==========================================

use crate::domain::characteristic::{Characteristic, ControlItem, Device};
use crate::domain::sample::{Sample, SampleRange};
use crate::repository::error::RepositoryResult;

// ==========================================
// QualityDataSource Trait
// ==========================================
pub trait QualityDataSource: Send + Sync {
    /// 查询全部控制项（按 id 排序）
    fn fetch_control_items(&self) -> RepositoryResult<Vec<ControlItem>>;

    /// 查询控制项下的全部特性（按 id 排序）
    ///
    /// 控制项不存在时返回空列表
    fn fetch_characteristics(&self, control_item_id: &str)
        -> RepositoryResult<Vec<Characteristic>>;

    /// 按 id 查询单个特性
    ///
    /// # 返回
    /// - Ok(Some(Characteristic)): 找到
    /// - Ok(None): 未找到
    fn find_characteristic(&self, characteristic_id: &str)
        -> RepositoryResult<Option<Characteristic>>;

    /// 查询全部量具（按 id 排序）
    fn fetch_devices(&self) -> RepositoryResult<Vec<Device>>;

    /// 查询特性在时间窗内的历史样本
    ///
    /// 时间窗两端闭区间，按 measured_at 升序
    fn fetch_samples(
        &self,
        characteristic_id: &str,
        range: &SampleRange,
    ) -> RepositoryResult<Vec<Sample>>;
}

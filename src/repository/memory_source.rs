// ==========================================
// 过程质量控制台 - 内存数据源
// ==========================================
// 用途: 单元测试、演示;生产环境使用 SqliteDataSource
// ==========================================

use crate::domain::characteristic::{Characteristic, ControlItem, Device};
use crate::domain::sample::{Sample, SampleRange};
use crate::repository::data_source::QualityDataSource;
use crate::repository::error::RepositoryResult;

/// 内存数据源
///
/// 通过链式 `with_*` 方法装载数据，装载后只读
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    control_items: Vec<ControlItem>,
    characteristics: Vec<Characteristic>,
    devices: Vec<Device>,
    samples: Vec<Sample>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_control_item(mut self, item: ControlItem) -> Self {
        self.control_items.push(item);
        self
    }

    pub fn with_characteristic(mut self, characteristic: Characteristic) -> Self {
        self.characteristics.push(characteristic);
        self
    }

    pub fn with_device(mut self, device: Device) -> Self {
        self.devices.push(device);
        self
    }

    pub fn with_sample(mut self, sample: Sample) -> Self {
        self.samples.push(sample);
        self
    }

    pub fn with_samples<I: IntoIterator<Item = Sample>>(mut self, samples: I) -> Self {
        self.samples.extend(samples);
        self
    }
}

impl QualityDataSource for InMemoryDataSource {
    fn fetch_control_items(&self) -> RepositoryResult<Vec<ControlItem>> {
        let mut items = self.control_items.clone();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    fn fetch_characteristics(
        &self,
        control_item_id: &str,
    ) -> RepositoryResult<Vec<Characteristic>> {
        let mut found: Vec<Characteristic> = self
            .characteristics
            .iter()
            .filter(|c| c.control_item_id == control_item_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(found)
    }

    fn find_characteristic(
        &self,
        characteristic_id: &str,
    ) -> RepositoryResult<Option<Characteristic>> {
        Ok(self
            .characteristics
            .iter()
            .find(|c| c.id == characteristic_id)
            .cloned())
    }

    fn fetch_devices(&self) -> RepositoryResult<Vec<Device>> {
        let mut devices = self.devices.clone();
        devices.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(devices)
    }

    fn fetch_samples(
        &self,
        characteristic_id: &str,
        range: &SampleRange,
    ) -> RepositoryResult<Vec<Sample>> {
        let mut found: Vec<Sample> = self
            .samples
            .iter()
            .filter(|s| s.characteristic_id == characteristic_id && range.contains(s.measured_at))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.measured_at.cmp(&b.measured_at));
        Ok(found)
    }
}

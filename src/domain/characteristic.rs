// ==========================================
// 过程质量控制台 - 检测项/特性/量具领域模型
// ==========================================
// 依据: 在线检测控制台 - 控制项清单
// ==========================================

use crate::domain::limits::LimitSet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ControlItem - 控制项 (产线检测点)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlItem {
    pub id: String,                     // 控制项ID
    pub name: String,                   // 控制项名称
    pub process_step: String,           // 所属工序
    pub device_id: Option<String>,      // 默认量具
    pub check_interval_minutes: u32,    // 巡检间隔 (分钟)
}

// ==========================================
// Characteristic - 检测特性
// ==========================================
// 一个控制项下可有多个特性 (如孔径、扭矩)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Characteristic {
    pub id: String,              // 特性ID
    pub control_item_id: String, // 所属控制项
    pub name: String,            // 特性名称
    pub limits: LimitSet,        // 限值集
}

// ==========================================
// Device - 量具/检测设备
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,                          // 设备ID
    pub name: String,                        // 设备名称
    pub calibrated_until: Option<NaiveDate>, // 校准有效期
}

impl Device {
    /// 在指定日期是否处于校准有效期内
    ///
    /// 未记录校准有效期的设备视为无效
    pub fn is_calibrated_on(&self, date: NaiveDate) -> bool {
        self.calibrated_until.map_or(false, |until| date <= until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_calibration_window() {
        let device = Device {
            id: "DEV-01".to_string(),
            name: "数显卡尺".to_string(),
            calibrated_until: NaiveDate::from_ymd_opt(2026, 3, 31),
        };
        assert!(device.is_calibrated_on(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()));
        assert!(!device.is_calibrated_on(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));

        let unknown = Device {
            calibrated_until: None,
            ..device
        };
        assert!(!unknown.is_calibrated_on(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
    }
}

// ==========================================
// 过程质量控制台 - 历史样本领域模型
// ==========================================
// 用途: 数据源提供的历史测量值,只读
// 说明: 操作员实时提交的测量值不落库,不使用本结构
// ==========================================

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

// ==========================================
// Sample - 历史样本
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub sample_id: String,          // 样本ID
    pub characteristic_id: String,  // 所属特性
    pub value: f64,                 // 测量值
    pub measured_at: NaiveDateTime, // 测量时间
    pub operator: Option<String>,   // 操作员
    pub device_id: Option<String>,  // 量具
}

// ==========================================
// SampleRange - 查询时间窗 [from, to]
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl SampleRange {
    /// 创建时间窗
    ///
    /// # 返回
    /// - Some(SampleRange): from <= to
    /// - None: from > to
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Option<Self> {
        if from > to {
            return None;
        }
        Some(Self { from, to })
    }

    /// 以 `end` 为终点、向前回溯 `hours` 小时的时间窗
    ///
    /// 两端截断到整秒（与存储精度一致）；回溯超出可表示范围时起点取 `NaiveDateTime::MIN`
    pub fn last_hours(end: NaiveDateTime, hours: u32) -> Self {
        let to = end.with_nanosecond(0).unwrap_or(end);
        let from = to
            .checked_sub_signed(Duration::hours(i64::from(hours)))
            .unwrap_or(NaiveDateTime::MIN);
        Self { from, to }
    }

    /// 时间点是否落在窗口内（两端闭区间）
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.from <= at && at <= self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 20)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        assert!(SampleRange::new(at(10, 0), at(9, 0)).is_none());
        assert!(SampleRange::new(at(9, 0), at(9, 0)).is_some());
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = SampleRange::new(at(8, 0), at(12, 0)).unwrap();
        assert!(range.contains(at(8, 0)));
        assert!(range.contains(at(12, 0)));
        assert!(!range.contains(at(12, 1)));
    }

    #[test]
    fn test_last_hours() {
        let range = SampleRange::last_hours(at(12, 0), 4);
        assert_eq!(range.from, at(8, 0));
        assert_eq!(range.to, at(12, 0));
    }

    #[test]
    fn test_last_hours_truncates_sub_seconds() {
        let end = at(12, 0) + Duration::milliseconds(750);
        let range = SampleRange::last_hours(end, 1);
        assert_eq!(range.to, at(12, 0));
        assert_eq!(range.from, at(11, 0));
        assert!(range.contains(at(11, 0)));
    }

    #[test]
    fn test_last_hours_clamps_on_overflow() {
        let range = SampleRange::last_hours(at(12, 0), u32::MAX);
        assert_eq!(range.from, NaiveDateTime::MIN);
        assert_eq!(range.to, at(12, 0));
        assert!(range.contains(at(0, 0)));
    }
}

// ==========================================
// 过程质量控制台 - 界面视图状态
// ==========================================
// 职责: 记录当前会话的选择状态 (页签/控制项/特性/弹窗/筛选)
// 红线: 纯内存视图模型,不持久化,不含判定逻辑
// ==========================================

use crate::domain::sample::SampleRange;
use crate::domain::types::QualityStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// 页签
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsoleTab {
    #[default]
    Entry, // 测量录入
    Chart,   // 控制图
    History, // 历史记录
    Devices, // 量具
}

// ==========================================
// 弹窗
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsoleDialog {
    MeasurementResult { inspection_id: String }, // 判定结果
    LimitDetail { characteristic_id: String },   // 限值详情
    DeviceDetail { device_id: String },          // 量具详情
}

// ==========================================
// 样本筛选
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleFilter {
    pub statuses: Vec<QualityStatus>, // 空表示不过滤
    pub range: Option<SampleRange>,
}

impl SampleFilter {
    /// 状态是否通过筛选
    pub fn accepts(&self, status: QualityStatus) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&status)
    }

    /// 切换单个状态的勾选
    pub fn toggle_status(&mut self, status: QualityStatus) {
        if let Some(pos) = self.statuses.iter().position(|s| *s == status) {
            self.statuses.remove(pos);
        } else {
            self.statuses.push(status);
            self.statuses.sort();
        }
    }
}

// ==========================================
// ConsoleViewState - 控制台视图状态
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleViewState {
    pub active_tab: ConsoleTab,
    pub selected_control_item: Option<String>,
    pub selected_characteristic: Option<String>,
    pub open_dialog: Option<ConsoleDialog>,
    pub filter: SampleFilter,
}

impl ConsoleViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn switch_tab(&mut self, tab: ConsoleTab) {
        self.active_tab = tab;
    }

    /// 选择控制项
    ///
    /// 控制项变化时清空特性选择
    pub fn select_control_item(&mut self, control_item_id: &str) {
        if self.selected_control_item.as_deref() != Some(control_item_id) {
            self.selected_characteristic = None;
        }
        self.selected_control_item = Some(control_item_id.to_string());
    }

    pub fn select_characteristic(&mut self, characteristic_id: &str) {
        self.selected_characteristic = Some(characteristic_id.to_string());
    }

    pub fn open_dialog(&mut self, dialog: ConsoleDialog) {
        self.open_dialog = Some(dialog);
    }

    /// 关闭弹窗，返回被关闭的弹窗
    pub fn close_dialog(&mut self) -> Option<ConsoleDialog> {
        self.open_dialog.take()
    }

    /// 清空选择与筛选，保留当前页签
    pub fn reset_selection(&mut self) {
        self.selected_control_item = None;
        self.selected_characteristic = None;
        self.open_dialog = None;
        self.filter = SampleFilter::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = ConsoleViewState::new();
        assert_eq!(state.active_tab, ConsoleTab::Entry);
        assert!(state.selected_control_item.is_none());
        assert!(state.open_dialog.is_none());
    }

    #[test]
    fn test_changing_control_item_clears_characteristic() {
        let mut state = ConsoleViewState::new();
        state.select_control_item("CI-10");
        state.select_characteristic("CH-TQ");

        // 重复选择同一控制项不清空
        state.select_control_item("CI-10");
        assert_eq!(state.selected_characteristic.as_deref(), Some("CH-TQ"));

        state.select_control_item("CI-20");
        assert_eq!(state.selected_control_item.as_deref(), Some("CI-20"));
        assert!(state.selected_characteristic.is_none());
    }

    #[test]
    fn test_dialog_open_close() {
        let mut state = ConsoleViewState::new();
        state.open_dialog(ConsoleDialog::LimitDetail {
            characteristic_id: "CH-TQ".to_string(),
        });
        let closed = state.close_dialog();
        assert!(matches!(closed, Some(ConsoleDialog::LimitDetail { .. })));
        assert!(state.close_dialog().is_none());
    }

    #[test]
    fn test_filter_toggle() {
        let mut filter = SampleFilter::default();
        assert!(filter.accepts(QualityStatus::Ok));

        filter.toggle_status(QualityStatus::OutOfSpecification);
        filter.toggle_status(QualityStatus::Warning);
        assert_eq!(
            filter.statuses,
            vec![QualityStatus::Warning, QualityStatus::OutOfSpecification]
        );
        assert!(!filter.accepts(QualityStatus::Ok));
        assert!(filter.accepts(QualityStatus::Warning));

        filter.toggle_status(QualityStatus::Warning);
        assert_eq!(filter.statuses, vec![QualityStatus::OutOfSpecification]);
    }

    #[test]
    fn test_reset_keeps_tab() {
        let mut state = ConsoleViewState::new();
        state.switch_tab(ConsoleTab::History);
        state.select_control_item("CI-10");
        state.filter.toggle_status(QualityStatus::OutOfControl);
        state.reset_selection();
        assert_eq!(state.active_tab, ConsoleTab::History);
        assert!(state.selected_control_item.is_none());
        assert!(state.filter.statuses.is_empty());
    }
}

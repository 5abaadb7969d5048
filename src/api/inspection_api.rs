// ==========================================
// 过程质量控制台 - 在线检测 API
// ==========================================
// 职责: 操作员界面调用的业务接口
//   1. 控制项/特性/量具查询
//   2. 测量值提交与判定 (不落库)
//   3. 历史样本批量判定
// 架构: API 层 → Engine (判定) + Repository (数据源)
// ==========================================

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::config::classifier_config_trait::ClassifierConfigReader;
use crate::config::config_manager::DEFAULT_HISTORY_HOURS;
use crate::domain::characteristic::{Characteristic, ControlItem, Device};
use crate::domain::limits::LimitSet;
use crate::domain::sample::SampleRange;
use crate::domain::types::{EvaluationReason, QualityStatus};
use crate::engine::classifier::{
    MeasurementClassifier, MeasurementEvaluation, StatusSummary, WarningBand,
};
use crate::i18n::t_with_args;
use crate::repository::data_source::QualityDataSource;

// ==========================================
// 响应结构
// ==========================================

/// 单次检测记录（提交即判定，不持久化）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionRecord {
    pub inspection_id: String,
    pub characteristic_id: String,
    pub characteristic_name: String,
    pub operator: Option<String>,
    pub value: f64,
    pub status: QualityStatus,
    pub status_label: String,
    pub reason: EvaluationReason,
    pub limits: LimitSet,
    pub warning_band: WarningBand,
    pub inspected_at: NaiveDateTime,
}

/// 历史样本判定点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplePoint {
    pub sample_id: String,
    pub measured_at: NaiveDateTime,
    pub evaluation: MeasurementEvaluation,
}

/// 历史判定结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvaluation {
    pub characteristic: Characteristic,
    pub range: SampleRange,
    pub warning_band: WarningBand,
    pub points: Vec<SamplePoint>,
    pub summary: StatusSummary,
}

/// 控制项整体状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlItemStatus {
    pub control_item_id: String,
    pub evaluations: Vec<(String, MeasurementEvaluation)>,
    pub summary: StatusSummary,
}

// ==========================================
// InspectionApi - 在线检测 API
// ==========================================
pub struct InspectionApi {
    data_source: Arc<dyn QualityDataSource>,
    classifier: MeasurementClassifier,
    default_history_hours: u32,
}

impl InspectionApi {
    /// 创建新的InspectionApi实例
    ///
    /// # 参数
    /// - data_source: 质量数据源
    /// - classifier: 判定引擎
    pub fn new(data_source: Arc<dyn QualityDataSource>, classifier: MeasurementClassifier) -> Self {
        Self {
            data_source,
            classifier,
            default_history_hours: DEFAULT_HISTORY_HOURS,
        }
    }

    /// 按配置创建（判定参数 + 默认回溯窗口）
    pub async fn from_config(
        data_source: Arc<dyn QualityDataSource>,
        reader: &dyn ClassifierConfigReader,
    ) -> ApiResult<Self> {
        let config = reader
            .load_classifier_config()
            .await
            .map_err(|e| ApiError::InternalError(format!("读取判定配置失败: {}", e)))?;
        let hours = reader
            .get_default_history_hours()
            .await
            .map_err(|e| ApiError::InternalError(format!("读取回溯窗口配置失败: {}", e)))?;

        let classifier = MeasurementClassifier::new(config)?;
        Ok(Self::new(data_source, classifier).with_default_history_hours(hours))
    }

    /// 设置历史判定默认回溯小时数
    pub fn with_default_history_hours(mut self, hours: u32) -> Self {
        self.default_history_hours = hours;
        self
    }

    pub fn classifier(&self) -> &MeasurementClassifier {
        &self.classifier
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询全部控制项
    pub fn list_control_items(&self) -> ApiResult<Vec<ControlItem>> {
        Ok(self.data_source.fetch_control_items()?)
    }

    /// 查询控制项下的特性
    pub fn list_characteristics(&self, control_item_id: &str) -> ApiResult<Vec<Characteristic>> {
        let control_item_id = require_id("control_item_id", control_item_id)?;
        Ok(self.data_source.fetch_characteristics(control_item_id)?)
    }

    /// 查询全部量具
    pub fn list_devices(&self) -> ApiResult<Vec<Device>> {
        Ok(self.data_source.fetch_devices()?)
    }

    // ==========================================
    // 判定接口
    // ==========================================

    /// 提交测量值并判定
    ///
    /// # 参数
    /// - characteristic_id: 特性ID
    /// - value: 测量值
    /// - operator: 操作员（可选）
    ///
    /// # 返回
    /// - Ok(InspectionRecord): 判定结果（不持久化）
    /// - Err(InvalidInput): id 为空、测量值非有限、限值非法
    /// - Err(NotFound): 特性不存在
    pub fn submit_measurement(
        &self,
        characteristic_id: &str,
        value: f64,
        operator: Option<&str>,
    ) -> ApiResult<InspectionRecord> {
        let characteristic = self.load_characteristic(characteristic_id)?;
        let evaluation = self.classifier.evaluate(value, &characteristic.limits)?;

        if evaluation.status.requires_action() {
            tracing::warn!(
                characteristic_id = %characteristic.id,
                value,
                status = %evaluation.status,
                reason = %evaluation.reason,
                "测量值超限"
            );
        } else {
            tracing::info!(
                characteristic_id = %characteristic.id,
                value,
                status = %evaluation.status,
                "测量值已判定"
            );
        }

        Ok(InspectionRecord {
            inspection_id: Uuid::new_v4().to_string(),
            characteristic_id: characteristic.id.clone(),
            characteristic_name: characteristic.name.clone(),
            operator: operator
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            value,
            status: evaluation.status,
            status_label: evaluation.status.label(),
            reason: evaluation.reason,
            warning_band: self.classifier.warning_band(&characteristic.limits),
            limits: characteristic.limits,
            inspected_at: chrono::Local::now().naive_local(),
        })
    }

    /// 历史样本批量判定
    ///
    /// # 参数
    /// - characteristic_id: 特性ID
    /// - range: 时间窗（None 时取最近 default_history_hours 小时）
    pub fn evaluate_history(
        &self,
        characteristic_id: &str,
        range: Option<SampleRange>,
    ) -> ApiResult<HistoryEvaluation> {
        let characteristic = self.load_characteristic(characteristic_id)?;
        let range = range.unwrap_or_else(|| {
            SampleRange::last_hours(chrono::Local::now().naive_local(), self.default_history_hours)
        });

        let samples = self.data_source.fetch_samples(&characteristic.id, &range)?;
        let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
        let batch = self.classifier.evaluate_batch(&values, &characteristic.limits)?;

        let points = samples
            .into_iter()
            .zip(batch.evaluations)
            .map(|(sample, evaluation)| SamplePoint {
                sample_id: sample.sample_id,
                measured_at: sample.measured_at,
                evaluation,
            })
            .collect();

        tracing::info!(
            characteristic_id = %characteristic.id,
            total = batch.summary.total,
            worst = ?batch.summary.worst,
            "历史样本判定完成"
        );

        Ok(HistoryEvaluation {
            warning_band: self.classifier.warning_band(&characteristic.limits),
            characteristic,
            range,
            points,
            summary: batch.summary,
        })
    }

    /// 控制项整体判定（取各特性读数的最严重状态）
    ///
    /// # 参数
    /// - control_item_id: 控制项ID
    /// - readings: (特性ID, 测量值) 列表，特性必须属于该控制项
    pub fn control_item_status(
        &self,
        control_item_id: &str,
        readings: &[(&str, f64)],
    ) -> ApiResult<ControlItemStatus> {
        let control_item_id = require_id("control_item_id", control_item_id)?;
        let characteristics = self.data_source.fetch_characteristics(control_item_id)?;
        if characteristics.is_empty() {
            return Err(ApiError::NotFound(format!(
                "控制项(id={})不存在或未配置特性",
                control_item_id
            )));
        }

        let mut evaluations = Vec::with_capacity(readings.len());
        let mut summary = StatusSummary::default();
        for &(characteristic_id, value) in readings {
            let characteristic = characteristics
                .iter()
                .find(|c| c.id == characteristic_id)
                .ok_or_else(|| {
                    ApiError::InvalidInput(format!(
                        "特性{}不属于控制项{}",
                        characteristic_id, control_item_id
                    ))
                })?;
            let evaluation = self.classifier.evaluate(value, &characteristic.limits)?;
            summary.record(evaluation.status);
            evaluations.push((characteristic.id.clone(), evaluation));
        }

        Ok(ControlItemStatus {
            control_item_id: control_item_id.to_string(),
            evaluations,
            summary,
        })
    }

    // ==========================================
    // 内部方法
    // ==========================================

    fn load_characteristic(&self, characteristic_id: &str) -> ApiResult<Characteristic> {
        let characteristic_id = require_id("characteristic_id", characteristic_id)?;
        self.data_source
            .find_characteristic(characteristic_id)?
            .ok_or_else(|| {
                ApiError::NotFound(t_with_args(
                    "inspection.not_found",
                    &[("id", characteristic_id)],
                ))
            })
    }
}

/// 校验 id 非空，返回去除首尾空白后的值
fn require_id<'a>(field: &str, id: &'a str) -> ApiResult<&'a str> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{}不能为空", field)));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory_source::InMemoryDataSource;

    fn api() -> InspectionApi {
        let source = InMemoryDataSource::new().with_characteristic(Characteristic {
            id: "CH-TQ".to_string(),
            control_item_id: "CI-10".to_string(),
            name: "螺栓扭矩".to_string(),
            limits: LimitSet::new(45.0, 55.0, 46.0, 54.0, 50.0, "N·m"),
        });
        InspectionApi::new(Arc::new(source), MeasurementClassifier::with_defaults())
    }

    #[test]
    fn test_require_id_trims() {
        assert_eq!(require_id("x", "  CH-1 ").unwrap(), "CH-1");
        assert!(matches!(require_id("x", "   "), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_submit_blank_operator_is_dropped() {
        let record = api().submit_measurement("CH-TQ", 50.0, Some("  ")).unwrap();
        assert_eq!(record.operator, None);
        assert_eq!(record.status, QualityStatus::Ok);
    }

    #[test]
    fn test_unknown_characteristic_message_names_id() {
        match api().submit_measurement("CH-404", 50.0, None) {
            Err(ApiError::NotFound(msg)) => assert!(msg.contains("CH-404")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_control_item() {
        let err = api().control_item_status("CI-404", &[]).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}

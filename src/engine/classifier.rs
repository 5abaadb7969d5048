// ==========================================
// 过程质量控制台 - 测量值判定引擎
// ==========================================
// 依据: 在线检测判定规则 (SPC 四级判定)
// 红线: 判定是纯函数,无状态、无 I/O
// 红线: 边界一律严格不等式 (< / >),不得改为 <= / >=
// ==========================================
// 职责: (测量值, 限值集) → 质量状态 + 判定原因
// 输入: value + LimitSet
// 输出: QualityStatus / MeasurementEvaluation
// ==========================================

use crate::domain::limits::LimitSet;
use crate::domain::types::{EvaluationReason, QualityStatus};
use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 默认预警带比例 (控制限至中心线距离的 30%)
pub const DEFAULT_WARNING_RATIO: f64 = 0.3;

// ==========================================
// ClassifierConfig - 判定参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// 预警带比例，取值 [0, 1]
    pub warning_ratio: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            warning_ratio: DEFAULT_WARNING_RATIO,
        }
    }
}

impl ClassifierConfig {
    /// 校验参数
    pub fn validate(&self) -> EngineResult<()> {
        if !self.warning_ratio.is_finite() || !(0.0..=1.0).contains(&self.warning_ratio) {
            return Err(EngineError::invalid(
                "warning_ratio",
                format!("预警带比例必须位于 [0, 1]，实际为 {}", self.warning_ratio),
            ));
        }
        Ok(())
    }
}

// ==========================================
// WarningBand - 预警带内侧阈值
// ==========================================
// value < lower 或 value > upper (且在控制限内) → Warning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WarningBand {
    pub lower: f64, // lcl + (cl - lcl) * ratio
    pub upper: f64, // ucl - (ucl - cl) * ratio
}

// ==========================================
// MeasurementEvaluation - 单值判定结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementEvaluation {
    pub value: f64,                // 测量值
    pub status: QualityStatus,     // 质量状态
    pub reason: EvaluationReason,  // 判定原因 (可解释性)
    pub deviation_from_cl: f64,    // 与中心线偏差 (value - cl)
}

// ==========================================
// StatusSummary - 状态分布统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total: usize,
    pub ok_count: usize,
    pub warning_count: usize,
    pub ooc_count: usize,
    pub oos_count: usize,
    pub worst: Option<QualityStatus>, // 最严重状态 (空集为 None)
}

impl StatusSummary {
    /// 计入一个状态
    pub fn record(&mut self, status: QualityStatus) {
        self.total += 1;
        match status {
            QualityStatus::Ok => self.ok_count += 1,
            QualityStatus::Warning => self.warning_count += 1,
            QualityStatus::OutOfControl => self.ooc_count += 1,
            QualityStatus::OutOfSpecification => self.oos_count += 1,
        }
        self.worst = Some(self.worst.map_or(status, |w| w.max(status)));
    }

    /// 从状态序列汇总
    pub fn from_statuses<I: IntoIterator<Item = QualityStatus>>(statuses: I) -> Self {
        let mut summary = Self::default();
        for status in statuses {
            summary.record(status);
        }
        summary
    }

    /// 指定状态的计数
    pub fn count_of(&self, status: QualityStatus) -> usize {
        match status {
            QualityStatus::Ok => self.ok_count,
            QualityStatus::Warning => self.warning_count,
            QualityStatus::OutOfControl => self.ooc_count,
            QualityStatus::OutOfSpecification => self.oos_count,
        }
    }
}

// ==========================================
// BatchEvaluation - 批量判定结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEvaluation {
    pub evaluations: Vec<MeasurementEvaluation>,
    pub summary: StatusSummary,
}

// ==========================================
// MeasurementClassifier - 测量值判定引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct MeasurementClassifier {
    config: ClassifierConfig,
}

impl MeasurementClassifier {
    /// 创建判定引擎
    ///
    /// # 返回
    /// - Err(InvalidInput): warning_ratio 越界或非有限
    pub fn new(config: ClassifierConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 使用默认参数 (ratio = 0.3)
    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 判定单个测量值
    pub fn classify(&self, value: f64, limits: &LimitSet) -> EngineResult<QualityStatus> {
        Ok(self.evaluate(value, limits)?.status)
    }

    /// 判定单个测量值 (带原因)
    ///
    /// 规则（顺序执行，命中即返回）:
    /// 1) value < lsl 或 value > usl → OOS
    /// 2) value < lcl 或 value > ucl → OOC
    /// 3) value < 预警下阈值 或 value > 预警上阈值 → Warning
    /// 4) 其他 → Ok
    pub fn evaluate(&self, value: f64, limits: &LimitSet) -> EngineResult<MeasurementEvaluation> {
        if !value.is_finite() {
            return Err(EngineError::invalid(
                "value",
                format!("测量值必须为有限数，实际为 {}", value),
            ));
        }
        Self::validate_limits(limits)?;

        let reason = self.determine_reason(value, limits);

        Ok(MeasurementEvaluation {
            value,
            status: reason.status(),
            reason,
            deviation_from_cl: value - limits.cl,
        })
    }

    /// 批量判定 (同一限值集)
    ///
    /// 任一测量值非法则整批失败，不返回部分结果
    #[instrument(skip(self, values, limits), fields(count = values.len()))]
    pub fn evaluate_batch(
        &self,
        values: &[f64],
        limits: &LimitSet,
    ) -> EngineResult<BatchEvaluation> {
        Self::validate_limits(limits)?;

        let evaluations = values
            .iter()
            .map(|&v| self.evaluate(v, limits))
            .collect::<EngineResult<Vec<_>>>()?;

        let summary = StatusSummary::from_statuses(evaluations.iter().map(|e| e.status));

        tracing::debug!(
            ok = summary.ok_count,
            warning = summary.warning_count,
            ooc = summary.ooc_count,
            oos = summary.oos_count,
            "batch evaluated"
        );

        Ok(BatchEvaluation {
            evaluations,
            summary,
        })
    }

    /// 计算预警带内侧阈值
    pub fn warning_band(&self, limits: &LimitSet) -> WarningBand {
        let ratio = self.config.warning_ratio;
        WarningBand {
            lower: limits.lcl + (limits.cl - limits.lcl) * ratio,
            upper: limits.ucl - (limits.ucl - limits.cl) * ratio,
        }
    }

    /// 校验限值集
    ///
    /// 拒绝: 非有限值、lcl > ucl、lsl > usl
    /// 不校验嵌套关系 (lsl <= lcl 等)
    pub fn validate_limits(limits: &LimitSet) -> EngineResult<()> {
        let fields = [
            ("lsl", limits.lsl),
            ("usl", limits.usl),
            ("lcl", limits.lcl),
            ("ucl", limits.ucl),
            ("cl", limits.cl),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(EngineError::invalid(
                    name,
                    format!("限值必须为有限数，实际为 {}", v),
                ));
            }
        }

        if limits.lcl > limits.ucl {
            return Err(EngineError::invalid(
                "lcl",
                format!("控制下限 {} 大于控制上限 {}", limits.lcl, limits.ucl),
            ));
        }
        if limits.lsl > limits.usl {
            return Err(EngineError::invalid(
                "lsl",
                format!("规格下限 {} 大于规格上限 {}", limits.lsl, limits.usl),
            ));
        }
        Ok(())
    }

    // ==========================================
    // 规则判定
    // ==========================================

    fn determine_reason(&self, value: f64, limits: &LimitSet) -> EvaluationReason {
        // 1. 规格限: 优先级最高
        if value < limits.lsl {
            return EvaluationReason::OosBelowLsl;
        }
        if value > limits.usl {
            return EvaluationReason::OosAboveUsl;
        }

        // 2. 控制限
        if value < limits.lcl {
            return EvaluationReason::OocBelowLcl;
        }
        if value > limits.ucl {
            return EvaluationReason::OocAboveUcl;
        }

        // 3. 预警带
        let band = self.warning_band(limits);
        if value < band.lower {
            return EvaluationReason::WarnLowerBand;
        }
        if value > band.upper {
            return EvaluationReason::WarnUpperBand;
        }

        EvaluationReason::OkWithinControl
    }
}

/// 使用默认参数判定单个测量值
pub fn classify_measurement(value: f64, limits: &LimitSet) -> EngineResult<QualityStatus> {
    MeasurementClassifier::with_defaults().classify(value, limits)
}

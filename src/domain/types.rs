// ==========================================
// 过程质量控制台 - 领域类型定义
// ==========================================
// 依据: 在线检测判定规则 - 四级质量状态
// 红线: 状态是"等级制",不是评分制
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 质量状态 (Quality Status)
// ==========================================
// 顺序: Ok < Warning < OutOfControl < OutOfSpecification
// 序列化格式: ok / warning / ooc / oos (与前端一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityStatus {
    #[serde(rename = "ok")]
    Ok, // 正常
    #[serde(rename = "warning")]
    Warning, // 预警(接近控制限)
    #[serde(rename = "ooc")]
    OutOfControl, // 失控(超控制限)
    #[serde(rename = "oos")]
    OutOfSpecification, // 超规(超规格限)
}

impl fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl QualityStatus {
    /// 全部状态（按严重度升序）
    pub const ALL: [QualityStatus; 4] = [
        QualityStatus::Ok,
        QualityStatus::Warning,
        QualityStatus::OutOfControl,
        QualityStatus::OutOfSpecification,
    ];

    /// 从字符串解析状态
    ///
    /// 同时接受短码 (ok/warning/ooc/oos) 与全称，大小写不敏感
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ok" => Some(QualityStatus::Ok),
            "warning" => Some(QualityStatus::Warning),
            "ooc" | "out_of_control" => Some(QualityStatus::OutOfControl),
            "oos" | "out_of_specification" => Some(QualityStatus::OutOfSpecification),
            _ => None,
        }
    }

    /// 转换为存储/接口使用的短码
    pub fn to_db_str(&self) -> &'static str {
        match self {
            QualityStatus::Ok => "ok",
            QualityStatus::Warning => "warning",
            QualityStatus::OutOfControl => "ooc",
            QualityStatus::OutOfSpecification => "oos",
        }
    }

    /// 是否需要操作员处置（失控或超规）
    pub fn requires_action(&self) -> bool {
        matches!(
            self,
            QualityStatus::OutOfControl | QualityStatus::OutOfSpecification
        )
    }

    /// 本地化显示名称（跟随当前 locale）
    pub fn label(&self) -> String {
        crate::i18n::t(&format!("status.{}", self.to_db_str()))
    }
}

// ==========================================
// 判定原因 (Evaluation Reason)
// ==========================================
// 红线: 所有判定必须输出 reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationReason {
    OosBelowLsl,     // 低于规格下限
    OosAboveUsl,     // 高于规格上限
    OocBelowLcl,     // 低于控制下限
    OocAboveUcl,     // 高于控制上限
    WarnLowerBand,   // 落入下侧预警带
    WarnUpperBand,   // 落入上侧预警带
    OkWithinControl, // 控制限内正常区
}

impl fmt::Display for EvaluationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl EvaluationReason {
    /// 转换为存储/接口使用的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EvaluationReason::OosBelowLsl => "OOS_BELOW_LSL",
            EvaluationReason::OosAboveUsl => "OOS_ABOVE_USL",
            EvaluationReason::OocBelowLcl => "OOC_BELOW_LCL",
            EvaluationReason::OocAboveUcl => "OOC_ABOVE_UCL",
            EvaluationReason::WarnLowerBand => "WARN_LOWER_BAND",
            EvaluationReason::WarnUpperBand => "WARN_UPPER_BAND",
            EvaluationReason::OkWithinControl => "OK_WITHIN_CONTROL",
        }
    }

    /// 原因对应的质量状态
    pub fn status(&self) -> QualityStatus {
        match self {
            EvaluationReason::OosBelowLsl | EvaluationReason::OosAboveUsl => {
                QualityStatus::OutOfSpecification
            }
            EvaluationReason::OocBelowLcl | EvaluationReason::OocAboveUcl => {
                QualityStatus::OutOfControl
            }
            EvaluationReason::WarnLowerBand | EvaluationReason::WarnUpperBand => {
                QualityStatus::Warning
            }
            EvaluationReason::OkWithinControl => QualityStatus::Ok,
        }
    }
}

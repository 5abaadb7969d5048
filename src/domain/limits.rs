// ==========================================
// 过程质量控制台 - 规格限/控制限领域模型
// ==========================================
// 依据: 在线检测判定规则 - LimitSet
// 约定: lsl <= lcl <= cl <= ucl <= usl (期望关系,领域层不强制)
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// LimitSet - 特性限值集
// ==========================================
// 用途: 单个检测特性的规格限 + 控制限 + 中心线
// 生命周期: 一次判定期间不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitSet {
    // ===== 规格限 (客户/工程要求) =====
    pub lsl: f64, // 规格下限
    pub usl: f64, // 规格上限

    // ===== 控制限 (过程统计边界) =====
    pub lcl: f64, // 控制下限
    pub ucl: f64, // 控制上限

    // ===== 中心线 =====
    pub cl: f64, // 中心线/目标值

    // ===== 显示 =====
    #[serde(default)]
    pub unit: String, // 单位 (仅显示用)
}

impl LimitSet {
    /// 构造限值集
    pub fn new(lsl: f64, usl: f64, lcl: f64, ucl: f64, cl: f64, unit: impl Into<String>) -> Self {
        Self {
            lsl,
            usl,
            lcl,
            ucl,
            cl,
            unit: unit.into(),
        }
    }

    /// 规格公差宽度 (usl - lsl)
    pub fn spec_width(&self) -> f64 {
        self.usl - self.lsl
    }

    /// 控制限宽度 (ucl - lcl)
    pub fn control_width(&self) -> f64 {
        self.ucl - self.lcl
    }

    /// 是否满足完整嵌套关系 lsl <= lcl <= cl <= ucl <= usl
    ///
    /// 仅用于提示，判定引擎不以此拒绝输入
    pub fn is_nested(&self) -> bool {
        self.lsl <= self.lcl && self.lcl <= self.cl && self.cl <= self.ucl && self.ucl <= self.usl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        let limits = LimitSet::new(45.0, 55.0, 46.0, 54.0, 50.0, "N·m");
        assert!((limits.spec_width() - 10.0).abs() < f64::EPSILON);
        assert!((limits.control_width() - 8.0).abs() < f64::EPSILON);
        assert!(limits.is_nested());
    }

    #[test]
    fn test_not_nested_when_control_exceeds_spec_limits() {
        let limits = LimitSet::new(9.97, 10.03, 9.96, 10.04, 10.0, "mm");
        assert!(!limits.is_nested());
    }

    #[test]
    fn test_unit_defaults_when_missing() {
        let json = r#"{"lsl":1.0,"usl":5.0,"lcl":2.0,"ucl":4.0,"cl":3.0}"#;
        let limits: LimitSet = serde_json::from_str(json).unwrap();
        assert!(limits.unit.is_empty());
        assert!((limits.cl - 3.0).abs() < f64::EPSILON);
    }
}

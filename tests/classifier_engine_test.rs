// ==========================================
// 判定引擎集成测试
// ==========================================
// 测试目标: 孔径/扭矩两个产线场景下的四级判定
// ==========================================

use inprocess_qc::engine::{
    classify_measurement, ClassifierConfig, EngineError, MeasurementClassifier, StatusSummary,
};
use inprocess_qc::{EvaluationReason, LimitSet, QualityStatus};

fn hole_limits() -> LimitSet {
    LimitSet::new(9.95, 10.05, 9.96, 10.04, 10.0, "mm")
}

fn torque_limits() -> LimitSet {
    LimitSet::new(45.0, 55.0, 46.0, 54.0, 50.0, "N·m")
}

#[test]
fn test_hole_diameter_scenario() {
    let limits = hole_limits();
    let cases = [
        (10.00, QualityStatus::Ok),
        (9.97, QualityStatus::Warning),
        (10.05, QualityStatus::OutOfControl),
        (10.06, QualityStatus::OutOfSpecification),
        (9.95, QualityStatus::OutOfControl),
        (9.94, QualityStatus::OutOfSpecification),
    ];

    for (value, expected) in cases {
        let status = classify_measurement(value, &limits).unwrap();
        assert_eq!(status, expected, "孔径 {} 判定错误", value);
    }

    println!("✓ 孔径场景判定正确");
}

#[test]
fn test_torque_scenario() {
    let limits = torque_limits();
    let classifier = MeasurementClassifier::with_defaults();

    let band = classifier.warning_band(&limits);
    assert!((band.lower - 47.2).abs() < 1e-9);
    assert!((band.upper - 52.8).abs() < 1e-9);

    let lsl_hit = classifier.evaluate(45.0, &limits).unwrap();
    assert_eq!(lsl_hit.status, QualityStatus::OutOfControl);
    assert_eq!(lsl_hit.reason, EvaluationReason::OocBelowLcl);

    let upper_warn = classifier.evaluate(53.0, &limits).unwrap();
    assert_eq!(upper_warn.status, QualityStatus::Warning);
    assert_eq!(upper_warn.reason, EvaluationReason::WarnUpperBand);
    assert!((upper_warn.deviation_from_cl - 3.0).abs() < 1e-9);

    let centered = classifier.evaluate(50.0, &limits).unwrap();
    assert_eq!(centered.status, QualityStatus::Ok);
    assert_eq!(centered.reason, EvaluationReason::OkWithinControl);

    let above_usl = classifier.evaluate(55.5, &limits).unwrap();
    assert_eq!(above_usl.reason, EvaluationReason::OosAboveUsl);

    println!("✓ 扭矩场景判定正确");
}

#[test]
fn test_wider_warning_ratio_moves_band_inward() {
    let limits = torque_limits();
    let default = MeasurementClassifier::with_defaults();
    let wide = MeasurementClassifier::new(ClassifierConfig { warning_ratio: 0.5 }).unwrap();

    // 48.0 在默认预警线 47.2 之内，但落在 0.5 比例的预警线 48.0 上（严格比较，仍为正常）
    assert_eq!(default.classify(48.0, &limits).unwrap(), QualityStatus::Ok);
    assert_eq!(wide.classify(48.0, &limits).unwrap(), QualityStatus::Ok);
    assert_eq!(wide.classify(47.9, &limits).unwrap(), QualityStatus::Warning);
    assert_eq!(default.classify(47.9, &limits).unwrap(), QualityStatus::Ok);

    println!("✓ 预警带比例可配置");
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let classifier = MeasurementClassifier::with_defaults();

    let err = classifier.classify(f64::NAN, &hole_limits()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput { ref field, .. } if field == "value"));

    let inverted = LimitSet::new(9.95, 10.05, 10.04, 9.96, 10.0, "mm");
    assert!(classifier.classify(10.0, &inverted).is_err());

    let infinite = LimitSet::new(f64::NEG_INFINITY, 10.05, 9.96, 10.04, 10.0, "mm");
    assert!(classifier.classify(10.0, &infinite).is_err());

    assert!(MeasurementClassifier::new(ClassifierConfig { warning_ratio: 1.5 }).is_err());

    println!("✓ 非法输入被拒绝");
}

#[test]
fn test_batch_summary_reports_worst_status() {
    let classifier = MeasurementClassifier::with_defaults();
    let values = [10.0, 9.97, 10.05, 10.01, 10.06];

    let batch = classifier.evaluate_batch(&values, &hole_limits()).unwrap();
    assert_eq!(batch.evaluations.len(), values.len());

    let expected = StatusSummary::from_statuses([
        QualityStatus::Ok,
        QualityStatus::Warning,
        QualityStatus::OutOfControl,
        QualityStatus::Ok,
        QualityStatus::OutOfSpecification,
    ]);
    assert_eq!(batch.summary, expected);
    assert_eq!(batch.summary.worst, Some(QualityStatus::OutOfSpecification));
    assert_eq!(batch.summary.count_of(QualityStatus::Ok), 2);

    // 任一测量值非法时整批失败
    assert!(classifier
        .evaluate_batch(&[10.0, f64::INFINITY], &hole_limits())
        .is_err());

    println!("✓ 批量判定汇总正确");
}

// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、基础数据装载等功能
// ==========================================

#![allow(dead_code)]

use inprocess_qc::db::{ensure_schema, open_sqlite_connection};
use rusqlite::{params, Connection};
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    ensure_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库连接
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(open_sqlite_connection(db_path)?)
}

/// 写入 global scope 配置
pub fn insert_config(conn: &Connection, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT OR REPLACE INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

/// 装载基础数据
///
/// - 量具: GAUGE-01 (孔径塞规), TW-02 (扭矩扳手)
/// - 控制项: CI-HOLE (钻孔工序), CI-BOLT (拧紧工序)
/// - 特性: CH-HOLE 孔径 9.95/10.05/9.96/10.04/10.0
///         CH-TQ   扭矩 45/55/46/54/50
///         CH-LEN  螺栓长度 29.5/30.5/29.7/30.3/30.0
pub fn seed_reference_data(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute_batch(
        r#"
        INSERT INTO device (device_id, name, calibrated_until) VALUES
            ('GAUGE-01', '孔径塞规', '2030-12-31'),
            ('TW-02', '扭矩扳手', NULL);

        INSERT INTO control_item (control_item_id, name, process_step, device_id, check_interval_minutes) VALUES
            ('CI-HOLE', '孔径检查', '钻孔', 'GAUGE-01', 30),
            ('CI-BOLT', '螺栓拧紧检查', '拧紧', 'TW-02', 60);

        INSERT INTO characteristic (characteristic_id, control_item_id, name, lsl, usl, lcl, ucl, cl, unit) VALUES
            ('CH-HOLE', 'CI-HOLE', '孔径', 9.95, 10.05, 9.96, 10.04, 10.0, 'mm'),
            ('CH-TQ', 'CI-BOLT', '扭矩', 45.0, 55.0, 46.0, 54.0, 50.0, 'N·m'),
            ('CH-LEN', 'CI-BOLT', '螺栓长度', 29.5, 30.5, 29.7, 30.3, 30.0, 'mm');
        "#,
    )?;
    Ok(())
}

/// 写入一条历史样本
pub fn insert_sample(
    conn: &Connection,
    sample_id: &str,
    characteristic_id: &str,
    value: f64,
    measured_at: &str,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        r#"
        INSERT INTO sample (sample_id, characteristic_id, value, measured_at, operator, device_id)
        VALUES (?1, ?2, ?3, ?4, 'OP-01', NULL)
        "#,
        params![sample_id, characteristic_id, value, measured_at],
    )?;
    Ok(())
}

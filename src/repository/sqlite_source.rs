// ==========================================
// 过程质量控制台 - SQLite 数据源
// ==========================================
// 红线: Repository 不含判定逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// 约束: 只读,不写入测量值
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::characteristic::{Characteristic, ControlItem, Device};
use crate::domain::limits::LimitSet;
use crate::domain::sample::{Sample, SampleRange};
use crate::repository::data_source::QualityDataSource;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 时间戳存储格式 (字典序即时间序)
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// 日期存储格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const CHARACTERISTIC_COLUMNS: &str =
    "characteristic_id, control_item_id, name, lsl, usl, lcl, ucl, cl, unit";

// ==========================================
// SqliteDataSource - SQLite 质量数据源
// ==========================================
pub struct SqliteDataSource {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDataSource {
    /// 创建数据源实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(SqliteDataSource): 数据源实例
    /// - Err: 数据库连接错误
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建数据源实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

// ==========================================
// 行映射
// ==========================================

fn map_characteristic(row: &rusqlite::Row<'_>) -> rusqlite::Result<Characteristic> {
    Ok(Characteristic {
        id: row.get(0)?,
        control_item_id: row.get(1)?,
        name: row.get(2)?,
        limits: LimitSet {
            lsl: row.get(3)?,
            usl: row.get(4)?,
            lcl: row.get(5)?,
            ucl: row.get(6)?,
            cl: row.get(7)?,
            unit: row.get(8)?,
        },
    })
}

fn parse_datetime(field: &str, raw: &str) -> RepositoryResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT).map_err(|e| {
        RepositoryError::FieldValueError {
            field: field.to_string(),
            message: format!("无法解析时间 '{}': {}", raw, e),
        }
    })
}

fn parse_date(field: &str, raw: &str) -> RepositoryResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| RepositoryError::FieldValueError {
        field: field.to_string(),
        message: format!("无法解析日期 '{}': {}", raw, e),
    })
}

/// 向上取整到整秒
///
/// 存储精度为秒，窗口起点带亚秒时不能包含截断后的那一秒
fn ceil_to_second(at: NaiveDateTime) -> NaiveDateTime {
    if at.nanosecond() == 0 {
        return at;
    }
    at.with_nanosecond(0)
        .and_then(|t| t.checked_add_signed(Duration::seconds(1)))
        .unwrap_or(at)
}

impl QualityDataSource for SqliteDataSource {
    fn fetch_control_items(&self) -> RepositoryResult<Vec<ControlItem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT control_item_id, name, process_step, device_id, check_interval_minutes
            FROM control_item
            ORDER BY control_item_id
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name, process_step, device_id, interval)| {
                let check_interval_minutes =
                    u32::try_from(interval).map_err(|_| RepositoryError::FieldValueError {
                        field: "check_interval_minutes".to_string(),
                        message: format!("control_item={} 巡检间隔非法: {}", id, interval),
                    })?;
                Ok(ControlItem {
                    id,
                    name,
                    process_step,
                    device_id,
                    check_interval_minutes,
                })
            })
            .collect()
    }

    fn fetch_characteristics(
        &self,
        control_item_id: &str,
    ) -> RepositoryResult<Vec<Characteristic>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM characteristic WHERE control_item_id = ?1 ORDER BY characteristic_id",
            CHARACTERISTIC_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let found = stmt
            .query_map(params![control_item_id], map_characteristic)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(found)
    }

    fn find_characteristic(
        &self,
        characteristic_id: &str,
    ) -> RepositoryResult<Option<Characteristic>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM characteristic WHERE characteristic_id = ?1",
            CHARACTERISTIC_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let found = stmt
            .query_row(params![characteristic_id], map_characteristic)
            .optional()?;
        Ok(found)
    }

    fn fetch_devices(&self) -> RepositoryResult<Vec<Device>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT device_id, name, calibrated_until FROM device ORDER BY device_id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name, calibrated_until)| {
                let calibrated_until = calibrated_until
                    .as_deref()
                    .map(|raw| parse_date("calibrated_until", raw))
                    .transpose()?;
                Ok(Device {
                    id,
                    name,
                    calibrated_until,
                })
            })
            .collect()
    }

    fn fetch_samples(
        &self,
        characteristic_id: &str,
        range: &SampleRange,
    ) -> RepositoryResult<Vec<Sample>> {
        let conn = self.get_conn()?;
        let from_str = ceil_to_second(range.from).format(DATETIME_FORMAT).to_string();
        let to_str = range.to.format(DATETIME_FORMAT).to_string();

        let mut stmt = conn.prepare(
            r#"
            SELECT sample_id, characteristic_id, value, measured_at, operator, device_id
            FROM sample
            WHERE characteristic_id = ?1 AND measured_at >= ?2 AND measured_at <= ?3
            ORDER BY measured_at, sample_id
            "#,
        )?;

        let rows = stmt
            .query_map(params![characteristic_id, from_str, to_str], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, Option<String>>(5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(
                |(sample_id, characteristic_id, value, measured_at, operator, device_id)| {
                    Ok(Sample {
                        measured_at: parse_datetime("measured_at", &measured_at)?,
                        sample_id,
                        characteristic_id,
                        value,
                        operator,
                        device_id,
                    })
                },
            )
            .collect()
    }
}

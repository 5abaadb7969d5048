// ==========================================
// 过程质量控制台 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发读写时的偶发 busy 错误
// - 提供只读数据源所需的最小 schema
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 数据源 schema（幂等）
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS config_kv (
    scope_id TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (scope_id, key)
);

CREATE TABLE IF NOT EXISTS device (
    device_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    calibrated_until TEXT
);

CREATE TABLE IF NOT EXISTS control_item (
    control_item_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    process_step TEXT NOT NULL,
    device_id TEXT REFERENCES device(device_id),
    check_interval_minutes INTEGER NOT NULL DEFAULT 60
);

CREATE TABLE IF NOT EXISTS characteristic (
    characteristic_id TEXT PRIMARY KEY,
    control_item_id TEXT NOT NULL REFERENCES control_item(control_item_id),
    name TEXT NOT NULL,
    lsl REAL NOT NULL,
    usl REAL NOT NULL,
    lcl REAL NOT NULL,
    ucl REAL NOT NULL,
    cl REAL NOT NULL,
    unit TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS sample (
    sample_id TEXT PRIMARY KEY,
    characteristic_id TEXT NOT NULL REFERENCES characteristic(characteristic_id),
    value REAL NOT NULL,
    measured_at TEXT NOT NULL,
    operator TEXT,
    device_id TEXT
);

CREATE INDEX IF NOT EXISTS idx_sample_characteristic_time
    ON sample (characteristic_id, measured_at);
"#;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建表（幂等），并登记当前 schema_version
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

// ==========================================
// 过程质量控制台 - 命令行入口
// ==========================================
// 用法:
//   inprocess-qc <characteristic_id> <value> [operator]
//   inprocess-qc --list
//   inprocess-qc --history <characteristic_id>
// 结果以 JSON 输出到 stdout,日志输出到 stderr
// ==========================================

use anyhow::{bail, Context};
use inprocess_qc::app::{get_default_db_path, AppState};
use inprocess_qc::i18n::{self, t_with_args};
use inprocess_qc::logging;

const USAGE: &str = "用法:
  inprocess-qc <characteristic_id> <value> [operator]   提交测量值并判定
  inprocess-qc --list                                    列出控制项与特性
  inprocess-qc --history <characteristic_id>             判定最近历史样本";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();
    let locale = i18n::init_from_env();

    tracing::info!("==================================================");
    tracing::info!("{} - 在线检测判定", inprocess_qc::APP_NAME);
    tracing::info!("系统版本: {}, 语言: {}", inprocess_qc::VERSION, locale);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{}", USAGE);
        bail!("缺少参数");
    }

    let db_path = get_default_db_path();
    let state = AppState::new(db_path).await?;
    let api = &state.inspection_api;

    match args.as_slice() {
        [flag] if flag == "--list" => {
            let mut catalog = Vec::new();
            for item in api.list_control_items()? {
                let characteristics = api.list_characteristics(&item.id)?;
                catalog.push(serde_json::json!({
                    "control_item": item,
                    "characteristics": characteristics,
                }));
            }
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        [flag, characteristic_id] if flag == "--history" => {
            let history = api.evaluate_history(characteristic_id, None)?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        [characteristic_id, raw_value, rest @ ..] if rest.len() <= 1 => {
            let value: f64 = raw_value
                .trim()
                .parse()
                .with_context(|| format!("测量值不是数字: {}", raw_value))?;
            let operator = rest.first().map(String::as_str);

            let record = api.submit_measurement(characteristic_id, value, operator)?;
            eprintln!(
                "{}",
                t_with_args(
                    "inspection.result",
                    &[
                        ("name", &record.characteristic_name),
                        ("value", &record.value.to_string()),
                        ("status", &record.status_label),
                    ],
                )
            );
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        _ => {
            eprintln!("{}", USAGE);
            bail!("参数无法识别: {:?}", args);
        }
    }

    Ok(())
}

// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["zh-CN", "en"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 从环境变量 INPROCESS_QC_LOCALE 设置语言
///
/// 未设置或不受支持时保持默认语言，返回最终生效的语言
pub fn init_from_env() -> String {
    if let Ok(raw) = std::env::var("INPROCESS_QC_LOCALE") {
        let requested = raw.trim();
        if SUPPORTED_LOCALES.contains(&requested) {
            set_locale(requested);
        } else if !requested.is_empty() {
            tracing::warn!(locale = requested, "不支持的语言，保持默认");
        }
    }
    current_locale()
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use inprocess_qc::i18n::t;
/// let msg = t("status.ok");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use inprocess_qc::i18n::t_with_args;
/// let msg = t_with_args("inspection.not_found", &[("id", "CH-01")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::QualityStatus;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
    // 为避免测试互相干扰，这里对 i18n 相关测试串行化。
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(current_locale(), "en");

        // 恢复默认语言
        set_locale("zh-CN");
        assert_eq!(current_locale(), "zh-CN");
    }

    #[test]
    fn test_status_labels() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(QualityStatus::OutOfControl.label(), "失控");
        assert_eq!(QualityStatus::OutOfSpecification.label(), "超规");

        set_locale("en");
        assert_eq!(QualityStatus::Warning.label(), "Warning");
        assert_eq!(QualityStatus::Ok.label(), "OK");

        set_locale("zh-CN");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        let msg = t_with_args("inspection.not_found", &[("id", "CH-01")]);
        assert!(msg.contains("CH-01"));
        assert!(msg.contains("特性不存在"));

        set_locale("en");
        let msg = t_with_args("inspection.not_found", &[("id", "CH-01")]);
        assert!(msg.contains("Characteristic not found"));

        set_locale("zh-CN");
    }
}

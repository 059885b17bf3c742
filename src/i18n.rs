// ==========================================
// 舞蹈比赛计分系统 - 国际化
// ==========================================
// 语言包: locales/en.yml（默认）, locales/zh-CN.yml
// rust_i18n::i18n! 宏在 lib.rs 中初始化
// 语言来源: 配置项 ui/locale，由 AppState 启动时应用
// ==========================================

/// 已提供语言包的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "zh-CN"];

/// 把配置值归一到已支持的语言
///
/// `zh`、`zh_CN`、`zh-Hans` 归到 `zh-CN`；`en-US` 等归到 `en`；其余返回 None
pub fn normalize_locale(raw: &str) -> Option<&'static str> {
    let lower = raw.trim().to_ascii_lowercase().replace('_', "-");
    let primary = lower.split('-').next().unwrap_or_default();
    match primary {
        "zh" => Some("zh-CN"),
        "en" => Some("en"),
        _ => None,
    }
}

pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 切换语言，返回实际生效的语言；不支持的语言回退到 en
pub fn set_locale(raw: &str) -> &'static str {
    let locale = normalize_locale(raw).unwrap_or_else(|| {
        tracing::warn!(locale = raw, "不支持的语言，回退到 en");
        "en"
    });
    rust_i18n::set_locale(locale);
    locale
}

/// 翻译消息
///
/// ```no_run
/// use dance_tabulation::i18n::t;
/// let msg = t("ranking.empty");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息并替换 `%{name}` 占位符
///
/// ```no_run
/// use dance_tabulation::i18n::t_with_args;
/// let msg = t_with_args("qualification.entry_not_found", &[("id", "EN-001")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(t(key), |msg, (name, value)| {
        msg.replace(&format!("%{{{}}}", name), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // locale 是进程级全局状态，相关测试串行执行
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("zh_CN"), Some("zh-CN"));
        assert_eq!(normalize_locale("zh-Hans"), Some("zh-CN"));
        assert_eq!(normalize_locale(" EN-us "), Some("en"));
        assert_eq!(normalize_locale("fr"), None);
        assert_eq!(normalize_locale(""), None);
    }

    #[test]
    fn test_set_locale_falls_back_to_en() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        assert_eq!(set_locale("zh"), "zh-CN");
        assert_eq!(current_locale(), "zh-CN");

        assert_eq!(set_locale("af-ZA"), "en");
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_translate_empty_ranking() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(t("ranking.empty"), "No rankings available yet");

        set_locale("zh-CN");
        assert_eq!(t("ranking.empty"), "暂无排名数据");

        set_locale("en");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let msg = t_with_args("score.out_of_range", &[("field", "styling"), ("value", "25")]);
        assert!(msg.contains("styling"));
        assert!(msg.contains("25"));
        assert!(!msg.contains("%{"));
    }
}

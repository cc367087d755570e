//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

const MAX_TIMEOUT_SECS: u64 = 120;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub enhance: EnhanceSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnhanceSettings {
    pub endpoint: String,
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub prompt: String,
}

impl EnhanceSettings {
    /// Fill the prompt template in a single pass. Substituted text is never
    /// scanned again, so placeholders inside the input stay literal.
    pub fn render_prompt(&self, source: &str, rule_based: &str) -> String {
        let mut out = String::with_capacity(self.prompt.len() + source.len() + rule_based.len());
        let mut rest = self.prompt.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            if let Some(after) = tail.strip_prefix("{source}") {
                out.push_str(source);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{rule_based}") {
                out.push_str(rule_based);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub file_name: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! invalid {
        ($field:expr, $reason:expr) => {
            return Err(SettingsError::InvalidValue {
                field: $field.to_string(),
                reason: $reason.to_string(),
            })
        };
    }
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                invalid!(
                    concat!(stringify!($section), ".", stringify!($field)),
                    "must not be empty"
                );
            }
        };
    }

    check_non_empty!(enhance.endpoint);
    check_non_empty!(enhance.api_key_env);
    check_non_empty!(enhance.prompt);
    check_non_empty!(output.file_name);

    if !s.enhance.endpoint.starts_with("http://") && !s.enhance.endpoint.starts_with("https://") {
        invalid!("enhance.endpoint", "must be an http(s) URL");
    }
    if s.enhance.timeout_secs == 0 || s.enhance.timeout_secs > MAX_TIMEOUT_SECS {
        invalid!(
            "enhance.timeout_secs",
            format!("must be between 1 and {MAX_TIMEOUT_SECS}")
        );
    }
    if s.enhance.max_new_tokens == 0 {
        invalid!("enhance.max_new_tokens", "must be positive");
    }
    if !(0.0..=2.0).contains(&s.enhance.temperature) {
        invalid!("enhance.temperature", "must be between 0.0 and 2.0");
    }
    if !s.enhance.prompt.contains("{rule_based}") {
        invalid!("enhance.prompt", "must contain the {rule_based} placeholder");
    }
    if s.output.file_name.contains(['/', '\\']) {
        invalid!("output.file_name", "must be a bare file name");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
[enhance]
endpoint = "https://example.test/models/m"
api_key_env = "TEST_KEY"
timeout_secs = 5
max_new_tokens = 128
temperature = 0.2
prompt = "Fix: {rule_based}"

[output]
file_name = "out.txt"
"#;

    fn expect_invalid(toml: &str, field: &str) {
        match parse_settings_toml(toml) {
            Err(SettingsError::InvalidValue { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected InvalidValue for {field}, got {other:?}"),
        }
    }

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert!(s.enhance.endpoint.starts_with("https://api-inference.huggingface.co/"));
        assert_eq!(s.enhance.api_key_env, "HF_API_KEY");
        assert_eq!(s.enhance.timeout_secs, 10);
        assert_eq!(s.enhance.max_new_tokens, 512);
        assert!((s.enhance.temperature - 0.7).abs() < f64::EPSILON);
        assert!(s.enhance.prompt.contains("{source}"));
        assert_eq!(s.output.file_name, "transliterated_output.txt");
    }

    #[test]
    fn parse_valid_custom_toml() {
        let s = parse_settings_toml(VALID).unwrap();
        assert_eq!(s.enhance.timeout_secs, 5);
        assert_eq!(s.output.file_name, "out.txt");
    }

    #[test]
    fn render_prompt_fills_placeholders() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        let prompt = s.enhance.render_prompt("ⲁⲅⲁⲡⲏ", "agape");
        assert!(prompt.contains("Coptic: ⲁⲅⲁⲡⲏ"));
        assert!(prompt.contains("Transliteration: agape"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn render_prompt_keeps_placeholders_in_input_literal() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        let prompt = s
            .enhance
            .render_prompt("note {rule_based} ⲁ {source}", "note {rule_based} a {source}");
        assert!(prompt.contains("Coptic: note {rule_based} ⲁ {source}"), "{prompt}");
        assert!(
            prompt.contains("Transliteration: note {rule_based} a {source}"),
            "{prompt}"
        );
    }

    #[test]
    fn render_prompt_leaves_other_braces() {
        let mut s = parse_settings_toml(VALID).unwrap();
        s.enhance.prompt = "{ {x} {source}={rule_based} }".to_string();
        assert_eq!(s.enhance.render_prompt("ⲁ", "a"), "{ {x} ⲁ=a }");
    }

    #[test]
    fn error_zero_timeout() {
        expect_invalid(
            &VALID.replace("timeout_secs = 5", "timeout_secs = 0"),
            "enhance.timeout_secs",
        );
    }

    #[test]
    fn error_huge_timeout() {
        expect_invalid(
            &VALID.replace("timeout_secs = 5", "timeout_secs = 600"),
            "enhance.timeout_secs",
        );
    }

    #[test]
    fn error_temperature_out_of_range() {
        expect_invalid(
            &VALID.replace("temperature = 0.2", "temperature = 3.5"),
            "enhance.temperature",
        );
    }

    #[test]
    fn error_prompt_without_placeholder() {
        expect_invalid(&VALID.replace("Fix: {rule_based}", "Fix this"), "enhance.prompt");
    }

    #[test]
    fn error_non_http_endpoint() {
        expect_invalid(
            &VALID.replace("https://example.test/models/m", "ftp://example.test"),
            "enhance.endpoint",
        );
    }

    #[test]
    fn error_empty_key_env() {
        expect_invalid(&VALID.replace("TEST_KEY", " "), "enhance.api_key_env");
    }

    #[test]
    fn error_file_name_with_path() {
        expect_invalid(&VALID.replace("out.txt", "dir/out.txt"), "output.file_name");
    }

    #[test]
    fn error_missing_section() {
        let toml = "[enhance]\nendpoint = \"https://x\"\n";
        assert!(matches!(
            parse_settings_toml(toml),
            Err(SettingsError::Parse(_))
        ));
    }
}

//! Request-level façade: rule-based transliteration plus optional
//! enhancement, combined into one immutable result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::enhance::{EnhanceError, EnhanceRequest, Enhancer};
use crate::translit::Transliterator;

/// Which collaborators a request uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    #[default]
    RuleBased,
    Hybrid,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RuleBased => f.write_str("rule-based"),
            Self::Hybrid => f.write_str("hybrid"),
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rule-based" | "rule_based" => Ok(Self::RuleBased),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(format!("unknown method: {other}")),
        }
    }
}

/// A [`Method`] resolved against the collaborators that will serve it.
pub enum Mode<'a> {
    RuleBased,
    Hybrid(&'a dyn Enhancer),
}

/// Outcome of one transliteration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransliterationResult {
    source_text: String,
    rule_based_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    enhanced_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enhancement_error: Option<EnhanceError>,
}

impl TransliterationResult {
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Always present, whatever happened to the enhancement.
    pub fn rule_based_output(&self) -> &str {
        &self.rule_based_output
    }

    pub fn enhanced_output(&self) -> Option<&str> {
        self.enhanced_output.as_deref()
    }

    pub fn enhancement_error(&self) -> Option<&EnhanceError> {
        self.enhancement_error.as_ref()
    }

    /// Enhanced text when there is some, rule-based output otherwise.
    pub fn preferred_output(&self) -> &str {
        self.enhanced_output
            .as_deref()
            .unwrap_or(&self.rule_based_output)
    }
}

impl Transliterator {
    /// Run one request. The rule-based path always completes first; an
    /// enhancer only ever adds to the result.
    pub fn transliterate(&self, text: &str, mode: Mode<'_>) -> TransliterationResult {
        let hybrid = matches!(mode, Mode::Hybrid(_));
        let _span = debug_span!("transliterate", hybrid).entered();

        let rule_based_output = self.translit(text);

        let (enhanced_output, enhancement_error) = match mode {
            Mode::RuleBased => (None, None),
            Mode::Hybrid(_) if rule_based_output.trim().is_empty() => {
                debug!("nothing to enhance");
                (None, None)
            }
            Mode::Hybrid(enhancer) => {
                let request = EnhanceRequest {
                    source: text,
                    rule_based: &rule_based_output,
                };
                match enhancer.enhance(&request) {
                    Ok(enhanced) if enhanced.trim().is_empty() => {
                        (None, Some(EnhanceError::malformed("empty enhancement")))
                    }
                    Ok(enhanced) => (Some(enhanced), None),
                    Err(e) => {
                        debug!(error = %e, "enhancement failed, keeping rule-based output");
                        (None, Some(e))
                    }
                }
            }
        };

        TransliterationResult {
            source_text: text.to_string(),
            rule_based_output,
            enhanced_output,
            enhancement_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn engine() -> &'static Transliterator {
        Transliterator::global()
    }

    #[test]
    fn test_rule_based_mode() {
        let result = engine().transliterate("ⲁⲅⲁⲡⲏ", Mode::RuleBased);
        assert_eq!(result.source_text(), "ⲁⲅⲁⲡⲏ");
        assert_eq!(result.rule_based_output(), "agape");
        assert_eq!(result.enhanced_output(), None);
        assert_eq!(result.enhancement_error(), None);
        assert_eq!(result.preferred_output(), "agape");
    }

    #[test]
    fn test_hybrid_success() {
        let enhancer =
            |req: &EnhanceRequest<'_>| Ok::<_, EnhanceError>(format!("{}!", req.rule_based));
        let result = engine().transliterate("ⲁⲅⲁⲡⲏ", Mode::Hybrid(&enhancer));
        assert_eq!(result.rule_based_output(), "agape");
        assert_eq!(result.enhanced_output(), Some("agape!"));
        assert_eq!(result.preferred_output(), "agape!");
        assert!(result.enhancement_error().is_none());
    }

    #[test]
    fn test_hybrid_failure_keeps_rule_based_output() {
        let failing = |_: &EnhanceRequest<'_>| -> Result<String, EnhanceError> {
            Err(EnhanceError::network("connection refused"))
        };
        let result = engine().transliterate("ⲡⲛⲟⲩⲧⲉ", Mode::Hybrid(&failing));
        assert_eq!(result.rule_based_output(), "pnoute");
        assert_eq!(result.enhanced_output(), None);
        assert_eq!(
            result.enhancement_error(),
            Some(&EnhanceError::network("connection refused"))
        );
        assert_eq!(result.preferred_output(), "pnoute");
    }

    #[test]
    fn test_hybrid_each_error_kind_is_non_fatal() {
        let errors = [
            EnhanceError::network("down"),
            EnhanceError::auth("bad token"),
            EnhanceError::RateLimit {
                retry_after_secs: Some(10),
                message: "busy".into(),
            },
            EnhanceError::malformed("not json"),
        ];
        for err in errors {
            let expected = err.clone();
            let failing = move |_: &EnhanceRequest<'_>| -> Result<String, EnhanceError> {
                Err(err.clone())
            };
            let result = engine().transliterate("ⲙⲁⲣⲓⲁ", Mode::Hybrid(&failing));
            assert_eq!(result.rule_based_output(), "maria");
            assert_eq!(result.enhancement_error(), Some(&expected));
        }
    }

    #[test]
    fn test_hybrid_empty_enhancement_is_malformed() {
        let blank = |_: &EnhanceRequest<'_>| Ok::<_, EnhanceError>("   ".to_string());
        let result = engine().transliterate("ⲁⲅⲁⲡⲏ", Mode::Hybrid(&blank));
        assert_eq!(result.enhanced_output(), None);
        assert!(matches!(
            result.enhancement_error(),
            Some(EnhanceError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_hybrid_skips_blank_input() {
        let calls = Cell::new(0);
        let counting = |_: &EnhanceRequest<'_>| {
            calls.set(calls.get() + 1);
            Ok::<_, EnhanceError>("x".to_string())
        };
        let result = engine().transliterate("  \n", Mode::Hybrid(&counting));
        assert_eq!(result.rule_based_output(), "  \n");
        assert_eq!(calls.get(), 0);
        assert!(result.enhancement_error().is_none());
    }

    #[test]
    fn test_enhancer_sees_source_and_rule_based() {
        let echo = |req: &EnhanceRequest<'_>| {
            Ok::<_, EnhanceError>(format!("{}|{}", req.source, req.rule_based))
        };
        let result = engine().transliterate("ⲙⲁⲣⲓⲁ", Mode::Hybrid(&echo));
        assert_eq!(result.enhanced_output(), Some("ⲙⲁⲣⲓⲁ|maria"));
    }

    #[test]
    fn test_method_parse_and_display() {
        assert_eq!("hybrid".parse::<Method>(), Ok(Method::Hybrid));
        assert_eq!("rule-based".parse::<Method>(), Ok(Method::RuleBased));
        assert_eq!("rule_based".parse::<Method>(), Ok(Method::RuleBased));
        assert!("llm".parse::<Method>().is_err());
        assert_eq!(Method::Hybrid.to_string(), "hybrid");
        assert_eq!(Method::default(), Method::RuleBased);
    }

    #[test]
    fn test_result_json_omits_absent_fields() {
        let result = engine().transliterate("ⲁⲅⲁⲡⲏ", Mode::RuleBased);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["rule_based_output"], "agape");
        assert!(json.get("enhanced_output").is_none());
        assert!(json.get("enhancement_error").is_none());
    }
}

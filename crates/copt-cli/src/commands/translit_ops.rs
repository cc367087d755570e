use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use copt_core::settings::settings;
use copt_core::{Method, Mode, TransliterationResult, Transliterator};

use super::load_engine;
use crate::enhance::HfEnhancer;

pub struct TranslitOptions<'a> {
    pub text: Option<&'a str>,
    pub file: Option<&'a str>,
    pub output: Option<&'a str>,
    pub method: Method,
    pub json: bool,
    pub charmap: Option<&'a str>,
    pub rules: Option<&'a str>,
}

pub fn translit_cmd(opts: &TranslitOptions<'_>) {
    let engine = die!(load_engine(opts.charmap, opts.rules), "Error: {}");
    let input = die!(read_input(opts.text, opts.file), "Error reading input: {}");

    let result = run(&engine, &input, opts.method);

    let unmapped = engine.unmapped_letters(&input);
    if !unmapped.is_empty() {
        let list: String = unmapped
            .iter()
            .map(|c| format!(" {c} (U+{:04X})", *c as u32))
            .collect();
        warn!(count = unmapped.len(), "unmapped Coptic letters");
        eprintln!("Warning: no mapping for{list}; kept as is");
    }
    if let Some(err) = result.enhancement_error() {
        warn!(error = %err, "enhancement failed");
        eprintln!("Warning: enhancement unavailable ({err}); using rule-based output");
    }

    let rendered = render(&result, opts.json);
    match opts.output {
        Some(out) => {
            let path = resolve_output_path(Path::new(out), &settings().output.file_name);
            die!(
                fs::write(&path, &rendered),
                "Error writing {}: {}",
                path.display()
            );
            info!(path = %path.display(), "wrote output");
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
}

fn run(engine: &Transliterator, input: &str, method: Method) -> TransliterationResult {
    match method {
        Method::RuleBased => engine.transliterate(input, Mode::RuleBased),
        Method::Hybrid => {
            let enhancer = HfEnhancer::from_env(&settings().enhance);
            engine.transliterate(input, Mode::Hybrid(&enhancer))
        }
    }
}

/// Text from the argument, else the file, else all of stdin.
pub fn read_input(text: Option<&str>, file: Option<&str>) -> io::Result<String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }
    if let Some(file) = file {
        return fs::read_to_string(file);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// An existing directory receives the default file name; anything else is
/// taken as the file path.
pub fn resolve_output_path(output: &Path, default_name: &str) -> PathBuf {
    if output.is_dir() {
        output.join(default_name)
    } else {
        output.to_path_buf()
    }
}

fn render(result: &TransliterationResult, json: bool) -> String {
    if json {
        let mut s = serde_json::to_string_pretty(result).unwrap_or_else(|e| {
            eprintln!("Error: JSON serialization failed: {e}");
            std::process::exit(1);
        });
        s.push('\n');
        return s;
    }
    let mut s = result.preferred_output().to_string();
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}

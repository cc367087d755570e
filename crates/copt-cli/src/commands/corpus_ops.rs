//! Regression check of the engine against a TOML corpus of expected
//! transliterations.

use std::collections::BTreeMap;
use std::fs;
use std::process;

use serde::{Deserialize, Serialize};

use copt_core::Transliterator;

use super::load_engine;

#[derive(Debug, Deserialize)]
pub struct Corpus {
    pub cases: Vec<CorpusCase>,
}

#[derive(Debug, Deserialize)]
pub struct CorpusCase {
    pub coptic: String,
    pub expected: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CaseResult {
    pub coptic: String,
    pub expected: String,
    pub actual: String,
    pub status: CaseStatus,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub skip: usize,
    pub pass_rate: String,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub results: Vec<CaseResult>,
    pub summary: Summary,
}

#[derive(Default)]
pub struct CaseFilter<'a> {
    pub tag: Option<&'a str>,
    pub category: Option<&'a str>,
}

impl CaseFilter<'_> {
    fn accepts(&self, case: &CorpusCase) -> bool {
        if let Some(tag) = self.tag {
            if !case.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if case.category != category {
                return false;
            }
        }
        true
    }
}

pub fn parse_corpus(content: &str) -> Result<Corpus, toml::de::Error> {
    toml::from_str(content)
}

/// Run every case that passes `filter`. Returns `None` if none does.
pub fn run_corpus(
    engine: &Transliterator,
    corpus: &Corpus,
    filter: &CaseFilter<'_>,
) -> Option<Report> {
    let results: Vec<CaseResult> = corpus
        .cases
        .iter()
        .filter(|c| filter.accepts(c))
        .map(|case| {
            let (actual, status) = if case.skip {
                (String::new(), CaseStatus::Skip)
            } else {
                let actual = engine.translit(&case.coptic);
                let status = if actual == case.expected {
                    CaseStatus::Pass
                } else {
                    CaseStatus::Fail
                };
                (actual, status)
            };
            CaseResult {
                coptic: case.coptic.clone(),
                expected: case.expected.clone(),
                actual,
                status,
                category: case.category.clone(),
                note: case.note.clone(),
            }
        })
        .collect();

    if results.is_empty() {
        return None;
    }

    let count = |s: CaseStatus| results.iter().filter(|r| r.status == s).count();
    let (pass, fail, skip) = (
        count(CaseStatus::Pass),
        count(CaseStatus::Fail),
        count(CaseStatus::Skip),
    );
    let tested = results.len() - skip;
    let rate = if tested > 0 {
        pass as f64 / tested as f64 * 100.0
    } else {
        0.0
    };
    let summary = Summary {
        total: results.len(),
        pass,
        fail,
        skip,
        pass_rate: format!("{rate:.1}%"),
    };
    Some(Report { results, summary })
}

pub struct CheckOptions<'a> {
    pub filter: CaseFilter<'a>,
    pub verbose: bool,
    pub json: bool,
    pub charmap: Option<&'a str>,
    pub rules: Option<&'a str>,
}

pub fn check_cmd(corpus_file: &str, opts: &CheckOptions<'_>) {
    let engine = die!(load_engine(opts.charmap, opts.rules), "Error: {}");
    let content = die!(
        fs::read_to_string(corpus_file),
        "Failed to read corpus file {corpus_file}: {}"
    );
    let corpus = die!(parse_corpus(&content), "Failed to parse corpus TOML: {}");

    let Some(report) = run_corpus(&engine, &corpus, &opts.filter) else {
        eprintln!("No cases match the given filters");
        process::exit(1);
    };

    if opts.json {
        let json = die!(
            serde_json::to_string_pretty(&report),
            "JSON serialization failed: {}"
        );
        println!("{json}");
    } else {
        print_report(&report, opts.verbose);
    }

    if report.summary.fail > 0 {
        process::exit(1);
    }
}

fn print_report(report: &Report, verbose: bool) {
    let mut grouped: BTreeMap<&str, Vec<&CaseResult>> = BTreeMap::new();
    for r in &report.results {
        grouped.entry(&r.category).or_default().push(r);
    }

    for (category, group) in &grouped {
        println!("\n=== {} ({} cases) ===", category, group.len());
        for r in group {
            match r.status {
                CaseStatus::Pass => {
                    if verbose {
                        println!("  \u{2713} {} \u{2192} {}", r.coptic, r.expected);
                    }
                }
                CaseStatus::Fail => println!(
                    "  \u{2717} {} \u{2192} {} (got: {})",
                    r.coptic, r.expected, r.actual
                ),
                CaseStatus::Skip => {
                    let reason = r.note.as_deref().unwrap_or("known failure");
                    println!("  - {} [skip: {}]", r.coptic, reason);
                }
            }
        }
    }

    let s = &report.summary;
    println!();
    println!("=== Summary ===");
    println!("  Total:     {}", s.total);
    println!("  Pass:      {:>3}", s.pass);
    println!("  Fail:      {:>3}", s.fail);
    println!("  Skip:      {:>3}", s.skip);
    println!("  Pass rate: {} ({}/{})", s.pass_rate, s.pass, s.total - s.skip);
}

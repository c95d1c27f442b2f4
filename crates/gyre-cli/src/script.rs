//! # Script — Scripted Ring Simulation
//!
//! A TOML script names a capacity, a policy and a list of steps:
//!
//! ```text
//! capacity = 14
//! policy = "no-overwrite"
//!
//! [[steps]]
//! op = "push"
//! data = "ABCDE"
//!
//! [[steps]]
//! op = "pop-to"
//! offset = 3
//! ```
//!
//! Elements are `char`s, one per character of a `push` string.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gyre_core::{HeapRing, NoOverwrite, Overwrite, OverwritePolicy, PolicyKind};

// =============================================================================
// Config
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default)]
    pub policy: PolicyKind,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    /// Append every character of `data`.
    Push { data: String },
    /// Remove `count` elements from the front.
    Pop {
        #[serde(default = "default_pop_count")]
        count: usize,
    },
    /// Remove everything before the element at logical `offset`.
    PopTo { offset: usize },
    Clear,
}

fn default_capacity() -> usize {
    14
}
fn default_pop_count() -> usize {
    1
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid script {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

// =============================================================================
// Report
// =============================================================================

/// Final ring state after a script run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub capacity: usize,
    pub policy: PolicyKind,
    pub len: usize,
    pub head: usize,
    pub tail: usize,
    pub contiguous: bool,
    pub contents: String,
    pub first_span: usize,
    pub second_span: usize,
    pub appended: usize,
    pub rejected: usize,
    pub removed: usize,
}

// =============================================================================
// Execution
// =============================================================================

/// Run `script`, writing a dump of the ring after every step to `dump`
/// when given.
pub fn run(script: &Script, dump: Option<&mut dyn Write>) -> Result<Report> {
    match script.policy {
        PolicyKind::NoOverwrite => execute::<NoOverwrite>(script, dump),
        PolicyKind::Overwrite => execute::<Overwrite>(script, dump),
    }
}

fn execute<P: OverwritePolicy>(script: &Script, mut dump: Option<&mut dyn Write>) -> Result<Report> {
    let mut rb = HeapRing::<char, P>::with_capacity(script.capacity);
    let mut appended = 0;
    let mut rejected = 0;
    let mut removed = 0;

    if let Some(out) = dump.as_deref_mut() {
        writeln!(out, "--- initial ---\n{}", rb.dump())?;
    }

    for (n, step) in script.steps.iter().enumerate() {
        match step {
            Step::Push { data } => {
                let wanted = data.chars().count();
                let stored = rb.push_back_iter(data.chars());
                appended += stored;
                if stored < wanted {
                    rejected += wanted - stored;
                    tracing::warn!(step = n, stored, dropped = wanted - stored, "ring full, input dropped");
                }
            }
            Step::Pop { count } => removed += rb.pop_front_n(*count),
            Step::PopTo { offset } => removed += rb.pop_front_to(rb.offset(*offset)),
            Step::Clear => {
                removed += rb.len();
                rb.clear();
            }
        }

        tracing::debug!(
            step = n,
            ?step,
            len = rb.len(),
            head = rb.head(),
            tail = rb.tail(),
            "applied step"
        );

        if let Some(out) = dump.as_deref_mut() {
            writeln!(out, "--- step {}: {:?} ---\n{}", n, step, rb.dump())?;
        }
    }

    let (first, second) = rb.as_slices();
    let report = Report {
        capacity: rb.capacity(),
        policy: rb.policy(),
        len: rb.len(),
        head: rb.head(),
        tail: rb.tail(),
        contiguous: rb.is_contiguous(),
        contents: rb.iter().collect(),
        first_span: first.len(),
        second_span: second.len(),
        appended,
        rejected,
        removed,
    };

    tracing::info!(
        policy = %report.policy,
        len = report.len,
        appended,
        rejected,
        removed,
        "script complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
capacity = 14
policy = "no-overwrite"

[[steps]]
op = "push"
data = "ABCDE"

[[steps]]
op = "pop-to"
offset = 3

[[steps]]
op = "push"
data = "abcde"
"#;

    #[test]
    fn test_parse_scenario() {
        let script = Script::parse(SCENARIO).unwrap();
        assert_eq!(script.capacity, 14);
        assert_eq!(script.policy, PolicyKind::NoOverwrite);
        assert_eq!(script.steps.len(), 3);
        assert_eq!(script.steps[1], Step::PopTo { offset: 3 });
    }

    #[test]
    fn test_defaults() {
        let script = Script::parse("[[steps]]\nop = \"pop\"\n[[steps]]\nop = \"clear\"").unwrap();
        assert_eq!(script.capacity, 14);
        assert_eq!(script.policy, PolicyKind::NoOverwrite);
        assert_eq!(script.steps, vec![Step::Pop { count: 1 }, Step::Clear]);
    }

    #[test]
    fn test_rejects_unknown_fields_and_ops() {
        assert!(Script::parse("capacity = 4\nsize = 3").is_err());
        assert!(Script::parse("[[steps]]\nop = \"shuffle\"").is_err());
        assert!(Script::parse("policy = \"sometimes\"").is_err());
    }

    #[test]
    fn test_run_scenario() {
        let script = Script::parse(SCENARIO).unwrap();
        let report = run(&script, None).unwrap();
        assert_eq!(report.contents, "DEabcde");
        assert_eq!(report.len, 7);
        assert_eq!(report.head, 3);
        assert_eq!(report.tail, 10);
        assert!(report.contiguous);
        assert_eq!(report.appended, 10);
        assert_eq!(report.removed, 3);
        assert_eq!(report.rejected, 0);
    }

    #[test]
    fn test_run_counts_rejections() {
        let script = Script::parse(
            "capacity = 3\n[[steps]]\nop = \"push\"\ndata = \"abcde\"",
        )
        .unwrap();
        let report = run(&script, None).unwrap();
        assert_eq!(report.contents, "abc");
        assert_eq!(report.appended, 3);
        assert_eq!(report.rejected, 2);
    }

    #[test]
    fn test_run_overwrite_wraps() {
        let script = Script::parse(
            "capacity = 4\npolicy = \"overwrite\"\n[[steps]]\nop = \"push\"\ndata = \"abcdef\"\n[[steps]]\nop = \"pop\"\ncount = 1",
        )
        .unwrap();
        let report = run(&script, None).unwrap();
        assert_eq!(report.policy, PolicyKind::Overwrite);
        assert_eq!(report.contents, "def");
        assert!(!report.contiguous);
        assert_eq!((report.first_span, report.second_span), (1, 2));
    }

    #[test]
    fn test_dump_written_per_step() {
        let script = Script::parse(SCENARIO).unwrap();
        let mut out = Vec::new();
        run(&script, Some(&mut out)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("--- initial ---\n"));
        assert_eq!(text.matches("--- step").count(), 3);
        assert!(text.contains("PopTo { offset: 3 }"));
    }

    #[test]
    fn test_bundled_wraparound_script() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scripts/wraparound.toml");
        let report = run(&Script::load(&path).unwrap(), None).unwrap();
        assert_eq!(report.contents, "abcdefghijkl");
        assert_eq!((report.head, report.tail), (5, 3));
        assert!(!report.contiguous);
        assert_eq!((report.first_span, report.second_span), (9, 3));
        assert_eq!((report.appended, report.removed), (17, 5));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = Script::load(Path::new("/nonexistent/ring.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/ring.toml"));
    }

    #[test]
    fn test_report_serializes_policy_kebab_case() {
        let script = Script::parse("policy = \"overwrite\"").unwrap();
        let report = run(&script, None).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["policy"], "overwrite");
        assert_eq!(json["contents"], "");
    }
}

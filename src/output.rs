//! Machine-readable output for `--json` mode.

use std::path::Path;

use serde::Serialize;

use crate::report::{CandidateOutcome, FlattenReport, Summary};

/// The single JSON document printed to stdout in `--json` mode.
#[derive(Serialize)]
pub struct JsonOutput<'a> {
    /// `"dry_run"` or `"flatten"`
    pub mode: &'static str,

    /// Root directory that was processed
    pub root: &'a Path,

    /// Whether the run stopped after the first failure
    pub aborted: bool,

    /// Aggregated counters
    pub summary: Summary,

    /// Per-child outcomes with their actions
    pub candidates: &'a [CandidateOutcome],
}

impl<'a> JsonOutput<'a> {
    /// Build the JSON document from a finished report.
    #[must_use]
    pub fn from_report(report: &'a FlattenReport) -> Self {
        Self {
            mode: if report.dry_run { "dry_run" } else { "flatten" },
            root: &report.root,
            aborted: report.aborted,
            summary: report.summary(),
            candidates: &report.outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Action, Status};
    use std::path::PathBuf;

    #[test]
    fn test_json_output_shape() {
        let mut report = FlattenReport::new(PathBuf::from("/dist"), false);
        report.outcomes.push(CandidateOutcome {
            path: PathBuf::from("/dist/x64"),
            status: Status::Flattened { leftovers: 0 },
            actions: vec![Action::RemoveDir {
                path: PathBuf::from("/dist/x64/bin"),
            }],
        });

        let json = serde_json::to_value(JsonOutput::from_report(&report)).unwrap();

        assert_eq!(json["mode"], "flatten");
        assert_eq!(json["root"], "/dist");
        assert_eq!(json["aborted"], false);
        assert_eq!(json["summary"]["flattened"], 1);
        assert_eq!(json["summary"]["removed_dirs"], 1);
        assert_eq!(json["candidates"][0]["status"], "flattened");
        assert_eq!(json["candidates"][0]["leftovers"], 0);
        assert_eq!(json["candidates"][0]["actions"][0]["action"], "remove_dir");
    }

    #[test]
    fn test_json_output_dry_run_mode() {
        let report = FlattenReport::new(PathBuf::from("/dist"), true);
        let json = serde_json::to_value(JsonOutput::from_report(&report)).unwrap();

        assert_eq!(json["mode"], "dry_run");
        assert!(json["candidates"].as_array().unwrap().is_empty());
    }
}

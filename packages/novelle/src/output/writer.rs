//! Change reports and output artifacts of one amendment run.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::amendment::ChangeType;
use crate::apply::{Amendment, ChangeResult, Outcome};
use crate::error::Result;
use crate::tree::LawTree;

/// One change result in a report.
#[derive(Debug, Serialize)]
struct YamlChangeResult {
    raw_text: String,
    change_type: ChangeType,
    location: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sentences: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    text: Vec<String>,
    status: u8,
    outcome: Outcome,
    message: String,
}

impl From<&ChangeResult> for YamlChangeResult {
    fn from(result: &ChangeResult) -> Self {
        Self {
            raw_text: result.change.raw_text.clone(),
            change_type: result.change.change_type,
            location: result.change.location.clone(),
            sentences: result.change.sentences.clone(),
            text: result.change.text.clone(),
            status: result.status(),
            outcome: result.outcome,
            message: result.message.clone(),
        }
    }
}

/// Full report of one run.
#[derive(Debug, Serialize)]
struct YamlReport {
    generated_at: DateTime<Utc>,
    applied: usize,
    total: usize,
    changes: Vec<YamlChangeResult>,
}

/// Generate a YAML report of change results.
pub fn generate_report(results: &[ChangeResult]) -> Result<String> {
    let report = YamlReport {
        generated_at: Utc::now(),
        applied: results.iter().filter(|r| r.status() == 1).count(),
        total: results.len(),
        changes: results.iter().map(YamlChangeResult::from).collect(),
    };
    let yaml = serde_yaml_ng::to_string(&report)?;

    let lines: Vec<&str> = yaml.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Write `content` to `path` through a temp file in the same directory.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

/// Save the source tree, the modified tree and the change report.
///
/// Writes `<name>_source.txt`, `<name>_modified.txt` and
/// `<name>_changes.yaml` into `output_dir`, creating it if needed.
///
/// # Returns
/// Paths of the written files, in that order
pub fn save_outcome(
    output_dir: &Path,
    name: &str,
    source: &LawTree,
    amendment: &Amendment,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;

    let artifacts = [
        (format!("{name}_source.txt"), source.to_text()),
        (format!("{name}_modified.txt"), amendment.tree.to_text()),
        (format!("{name}_changes.yaml"), generate_report(&amendment.results)?),
    ];

    let mut paths = Vec::with_capacity(artifacts.len());
    for (file_name, content) in artifacts {
        let path = output_dir.join(file_name);
        write_atomic(&path, &content)?;
        tracing::debug!(path = %path.display(), "Wrote artifact");
        paths.push(path);
    }
    Ok(paths)
}

//! `<stem>.provenance.json` sidecars: which build, run settings and input
//! files produced a loop file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Deserialize, Serialize)]
pub struct Sidecar<R> {
    pub code_rev: String,
    pub version: String,
    pub written_by: Callsite,
    /// Run-specific record (settings, seed, counters).
    pub run: R,
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Callsite {
    pub file: String,
    pub line: u32,
}

impl<R: Serialize> Sidecar<R> {
    /// Describe `artifact`; the caller's source location is recorded.
    #[track_caller]
    pub fn for_artifact(artifact: impl AsRef<Path>, run: R) -> Self {
        let at = Location::caller();
        Self {
            code_rev: code_revision(),
            version: loopfinder::VERSION.to_string(),
            written_by: Callsite {
                file: at.file().to_string(),
                line: at.line(),
            },
            run,
            inputs: Vec::new(),
            output: artifact.as_ref().to_path_buf(),
        }
    }

    pub fn with_input(mut self, path: impl AsRef<Path>) -> Self {
        self.inputs.push(path.as_ref().to_path_buf());
        self
    }

    pub fn path(&self) -> PathBuf {
        sidecar_path(&self.output)
    }

    pub fn write(&self) -> Result<PathBuf> {
        let path = self.path();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating provenance dir {}", dir.display()))?;
        }
        fs::write(&path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// `loops.json` -> `loops.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else "unknown".
pub fn code_revision() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .or_else(head_commit)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn head_commit() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_artifact() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/results/loops_2.75km.json")),
            Path::new("/tmp/results/loops_2.75km.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("out/loops")),
            Path::new("out/loops.provenance.json")
        );
    }

    #[test]
    fn written_sidecar_reads_back() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("nested/loops.json");
        let written = Sidecar::for_artifact(&artifact, json!({"seed": 7, "target_km": 5.0}))
            .with_input("parameters.yaml")
            .with_input("graph.json")
            .write()
            .unwrap();
        assert_eq!(written, dir.path().join("nested/loops.provenance.json"));

        let back: Sidecar<Value> = serde_json::from_slice(&fs::read(&written).unwrap()).unwrap();
        assert_eq!(back.output, artifact);
        assert_eq!(back.inputs[1], Path::new("graph.json"));
        assert_eq!(back.run["seed"], 7);
        assert_eq!(back.version, loopfinder::VERSION);
        assert!(back.written_by.file.ends_with("provenance.rs"));
        assert!(!back.code_rev.is_empty());
    }
}

//! Run storage API.
//!
//! Layout: `<root>/<run_id>/manifest.json` plus one JSON line per snapshot
//! in `<root>/<run_id>/snapshots.jsonl`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use hs_sim::{Snapshot, SnapshotError, SnapshotResult, SnapshotWriter};

use crate::types::RunManifest;
use crate::{ResultsError, ResultsResult};

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        if !root_dir.is_dir() {
            return Err(ResultsError::InvalidPath {
                message: format!("{} is not a directory", root_dir.display()),
            });
        }
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &std::path::Path {
        &self.root_dir
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    fn snapshots_path(&self, run_id: &str) -> PathBuf {
        self.run_dir(run_id).join("snapshots.jsonl")
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    /// Write the manifest, replacing any earlier version.
    pub fn save_manifest(&self, manifest: &RunManifest) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join("manifest.json"), manifest_json)?;
        Ok(())
    }

    /// Start a fresh run: write the manifest and drop old snapshots.
    pub fn begin_run(&self, manifest: &RunManifest) -> ResultsResult<RunWriter> {
        self.save_manifest(manifest)?;
        let snapshots = self.snapshots_path(&manifest.run_id);
        if snapshots.exists() {
            fs::remove_file(&snapshots)?;
        }
        Ok(RunWriter {
            store: self.clone(),
            run_id: manifest.run_id.clone(),
            written: 0,
        })
    }

    pub fn append_snapshot(&self, run_id: &str, snapshot: &Snapshot) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if !run_dir.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        let mut line = serde_json::to_string(snapshot)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.snapshots_path(run_id))?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join("manifest.json");

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_snapshots(&self, run_id: &str) -> ResultsResult<Vec<Snapshot>> {
        if !self.has_run(run_id) {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        let path = self.snapshots_path(run_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        let mut snapshots = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                snapshots.push(serde_json::from_str(line)?);
            }
        }
        Ok(snapshots)
    }

    pub fn list_runs(&self, scenario_name: &str) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id)
                    && manifest.scenario_name == scenario_name
                {
                    runs.push(manifest);
                }
            }
        }

        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}

/// Snapshot writer bound to one run of a [`RunStore`].
#[derive(Clone, Debug)]
pub struct RunWriter {
    store: RunStore,
    run_id: String,
    written: usize,
}

impl RunWriter {
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl SnapshotWriter for RunWriter {
    fn write_snapshot(&mut self, snapshot: &Snapshot) -> SnapshotResult<()> {
        self.store
            .append_snapshot(&self.run_id, snapshot)
            .map_err(|e| SnapshotError::Write {
                message: e.to_string(),
            })?;
        self.written += 1;
        tracing::debug!(
            run_id = %self.run_id,
            step = snapshot.step,
            time_s = snapshot.time_s,
            "snapshot written"
        );
        Ok(())
    }
}

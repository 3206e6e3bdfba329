//! Shared integration-test harness: built-in catalog, seeded RNGs, data
//! fixtures and a helper for running the compiled binary.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use plexus::anatomy::{BUILTIN_GRAPH, BUILTIN_LESIONS, BUILTIN_MUSCLES, Catalog};
use plexus::config::EngineConfig;
use plexus::quiz::CaseGenerator;

/// Loads the embedded reference data.
pub fn catalog() -> Arc<Catalog> {
    Catalog::builtin().expect("built-in data must load")
}

/// Case generator over the built-in data with default sample sizes.
pub fn generator() -> CaseGenerator {
    CaseGenerator::new(catalog(), &EngineConfig::default())
}

/// Deterministic RNG.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Path to a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// A temporary data directory holding the built-in documents, with any
/// of them replaced by the named fixture.
pub struct DataDir {
    dir: tempfile::TempDir,
}

impl DataDir {
    /// Copies the built-in documents into a fresh directory.
    pub fn builtin() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        std::fs::write(dir.path().join("plexus.yaml"), BUILTIN_GRAPH).unwrap();
        std::fs::write(dir.path().join("muscles.yaml"), BUILTIN_MUSCLES).unwrap();
        std::fs::write(dir.path().join("lesions.yaml"), BUILTIN_LESIONS).unwrap();
        Self { dir }
    }

    /// Replaces `file` (e.g. `lesions.yaml`) with the fixture `fixture`.
    pub fn with_fixture(self, file: &str, fixture: &str) -> Self {
        std::fs::copy(fixture_path(fixture), self.dir.path().join(file))
            .expect("failed to copy fixture");
        self
    }

    /// Replaces `file` with literal text.
    pub fn with_text(self, file: &str, text: &str) -> Self {
        std::fs::write(self.dir.path().join(file), text).unwrap();
        self
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Runs the `plexus` binary with `args`, feeding `stdin` to it.
pub fn run_plexus(args: &[&str], stdin: &str) -> Output {
    use std::io::Write;

    let mut child = Command::new(env!("CARGO_BIN_EXE_plexus"))
        .args(args)
        .env_remove("PLEXUS_DATA")
        .env_remove("PLEXUS_CONFIG")
        .env_remove("PLEXUS_SEED")
        .env_remove("PLEXUS_LOG_LEVEL")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn plexus");

    child
        .stdin
        .take()
        .expect("stdin not captured")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");

    child.wait_with_output().expect("failed to wait for plexus")
}

/// Runs the `plexus` binary with `args` and empty stdin.
pub fn plexus(args: &[&str]) -> Output {
    run_plexus(args, "")
}

/// Stdout as text.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr as text.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

//! Hermetic filesystem sandbox for CLI tests.
//!
//! - Everything lives under an `assert_fs::TempDir`, cleaned up on drop
//! - Commands run with a private `HOME` and a minimal environment, so neither
//!   `RUST_LOG` nor color settings of the host leak into captured output
//! - Cargo binaries are located with `assert_cmd`
//!
//! ## Quick example
//! ```no_run
//! use projfix_test_utils::sandbox::Sandbox;
//!
//! let mut sb = Sandbox::new();
//! sb.write("app/project.json", r#"{"content": "*.txt"}"#);
//!
//! let out = sb.output("projfix", ["."]);
//! assert_eq!(out.code, Some(0));
//! assert!(sb.read("app/project.json").contains("publishOptions"));
//! ```

use assert_fs::TempDir;
use assert_fs::fixture::PathChild;
use duct::Expression;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Captured result of a command run in the sandbox.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CmdOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

pub struct Sandbox {
    root: TempDir,
    pub home: PathBuf,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {
    /// Create a new sandbox; all state is under an auto-cleaned TempDir.
    pub fn new() -> Self {
        let root = TempDir::new().expect("create sandbox TempDir");
        let home = root.child("home").to_path_buf();
        fs::create_dir_all(&home).expect("create home dir");
        Self { root, home }
    }

    /// Absolute path to the sandbox root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Write/overwrite a file relative to the sandbox root.
    pub fn write<P: AsRef<Path>, S: AsRef<[u8]>>(&mut self, rel: P, contents: S) -> &mut Self {
        let p = self.root_path().join(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(p, contents).expect("write file");
        self
    }

    /// Read a file relative to the sandbox root.
    pub fn read<P: AsRef<Path>>(&self, rel: P) -> String {
        let p = self.root_path().join(rel);
        fs::read_to_string(&p).unwrap_or_else(|e| panic!("read {}: {e}", p.display()))
    }

    /// Modification time of a file relative to the sandbox root.
    pub fn modified<P: AsRef<Path>>(&self, rel: P) -> SystemTime {
        let p = self.root_path().join(rel);
        fs::metadata(&p)
            .and_then(|m| m.modified())
            .unwrap_or_else(|e| panic!("stat {}: {e}", p.display()))
    }

    /// Build a `duct::Expression` pre-wired with the sandbox env, run from the sandbox root.
    pub fn cmd<S: AsRef<OsStr>, I: IntoIterator>(&self, program: S, args: I) -> Expression
    where
        I::Item: AsRef<OsStr>,
    {
        let program_str = program.as_ref().to_string_lossy();
        let args: Vec<_> = args
            .into_iter()
            .map(|arg| arg.as_ref().to_string_lossy().to_string())
            .collect();
        let expr = duct::cmd(program_str.as_ref(), args).dir(self.root_path());
        self.inject_env(expr)
    }

    /// Run a cargo binary in the sandbox root and capture its exit code and output.
    /// A non-zero exit is not an error here; inspect [`CmdOutput::code`].
    pub fn output<I>(&self, program: &str, args: I) -> CmdOutput
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let cargo_bin_path = assert_cmd::cargo::cargo_bin(program);
        let output = self
            .cmd(&cargo_bin_path, args)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .unwrap_or_else(|e| panic!("failed to spawn {program}: {e}"));

        CmdOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Run a cargo binary and render exit code, stdout and stderr as one string,
    /// with the sandbox root replaced by `<ROOT>`.
    pub fn snapshot_run<I>(&self, program: &str, args: I) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let out = self.output(program, args);
        let root = self.root_path().to_string_lossy().into_owned();
        let rendered = format!(
            "Exit Code: {}\n--- STDOUT ---\n{}--- STDERR ---\n{}",
            out.code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
            out.stdout,
            out.stderr
        );
        rendered.replace(&root, "<ROOT>")
    }

    pub fn inject_env(&self, mut expr: Expression) -> Expression {
        let mut env_map: HashMap<String, String> = HashMap::new();
        if let Ok(path) = std::env::var("PATH") {
            env_map.insert("PATH".into(), path);
        }
        env_map.insert("HOME".into(), self.home.to_string_lossy().into_owned());
        env_map.insert(
            "XDG_CONFIG_HOME".into(),
            self.home.to_string_lossy().into_owned(),
        );
        env_map.insert("NO_COLOR".into(), "1".into());

        expr = expr.full_env(&env_map);

        expr
    }
}

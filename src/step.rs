use std::{
    env, fs, io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
};

use tracing::{debug, error, info, warn};

use crate::{
    error::{Error, Result},
    rundef::StepCommand,
    script::RunDir,
};

pub const STOP_FILE: &str = ".stop.rst";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Begin,
    End,
    Error,
}

impl Marker {
    fn suffix(&self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::End => "end",
            Self::Error => "error",
        }
    }
}

/// Runs one tool inside a run directory and leaves the begin/end/error markers
/// the vendor IDE polls for.
pub struct Step<'a> {
    command: &'a StepCommand,
    run_dir: &'a RunDir,
}

#[derive(Debug, Clone, Copy)]
pub struct StepOutcome {
    status: ExitStatus,
}

impl StepOutcome {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code of the tool, `1` if it was terminated by a signal.
    pub fn exit_code(&self) -> i32 {
        self.status.code().unwrap_or(1)
    }
}

impl<'a> Step<'a> {
    pub fn new(command: &'a StepCommand, run_dir: &'a RunDir) -> Self {
        Self { command, run_dir }
    }

    fn tool_name(&self) -> &str {
        Path::new(&self.command.program)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.command.program)
    }

    pub fn marker(&self, marker: Marker) -> PathBuf {
        self.run_dir
            .sibling(&format!(".{}.{}.rst", self.tool_name(), marker.suffix()))
    }

    pub fn run(&self) -> Result<StepOutcome> {
        let stop_file = self.run_dir.sibling(STOP_FILE);
        if stop_file.exists() {
            error!("*** Halting run - EA reset detected ***");
            return Err(Error::Halted { stop_file });
        }

        for marker in [Marker::Begin, Marker::End, Marker::Error] {
            let path = self.marker(marker);
            if let Err(e) = remove_stale(&path) {
                warn!("cannot remove {}: {e}", path.display());
            }
        }

        info!("*** Running {}", self.command.program);
        info!("    with args {}", self.command.args.join(" "));

        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args)
            .current_dir(self.run_dir.path())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let mut child = cmd.spawn().map_err(|source| Error::Spawn {
            program: self.command.program.clone(),
            source,
        })?;

        // Marker writes never change the reported status.
        if let Err(e) = self.write_begin(child.id()) {
            error!("cannot write {}: {e}", self.marker(Marker::Begin).display());
        }

        let status = child.wait()?;
        let outcome = StepOutcome { status };
        debug!("{} exited with {status}", self.command.program);

        let marker = if outcome.success() {
            Marker::End
        } else {
            Marker::Error
        };
        let path = self.marker(marker);
        if let Err(e) = fs::File::create(&path) {
            error!("cannot write {}: {e}", path.display());
        }

        Ok(outcome)
    }

    fn write_begin(&self, pid: u32) -> io::Result<()> {
        let handle = format!(
            "<?xml version=\"1.0\"?>\n\
             <ProcessHandle Version=\"1\" Minor=\"0\">\n    \
             <Process Command=\"{}\" Owner=\"{}\" Host=\"{}\" Pid=\"{pid}\">\n    \
             </Process>\n\
             </ProcessHandle>\n",
            escape_attr(self.tool_name()),
            escape_attr(&owner()),
            escape_attr(&host_name()),
        );

        fs::write(self.marker(Marker::Begin), handle)
    }
}

fn remove_stale(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn owner() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".into())
}

fn host_name() -> String {
    fs::read_to_string("/proc/sys/kernel/hostname")
        .map(|name| name.trim().to_string())
        .ok()
        .filter(|name| !name.is_empty())
        .or_else(|| env::var("HOSTNAME").ok())
        .or_else(|| env::var("COMPUTERNAME").ok())
        .unwrap_or_else(|| "unknown".into())
}

#[cfg(all(test, unix))]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn sh(script: &str) -> StepCommand {
        StepCommand {
            program: "sh".into(),
            args: vec!["-c".into(), script.into()],
        }
    }

    fn run_dir() -> (TempDir, RunDir) {
        let dir = TempDir::new().unwrap();
        let run_dir = RunDir::resolve(Some(dir.path())).unwrap();
        (dir, run_dir)
    }

    #[test]
    fn success_writes_end_marker() {
        let (_dir, run_dir) = run_dir();
        let command = sh("exit 0");
        let step = Step::new(&command, &run_dir);

        let outcome = step.run().unwrap();

        assert!(outcome.success());
        assert_eq!(outcome.exit_code(), 0);
        assert!(step.marker(Marker::End).is_file());
        assert!(!step.marker(Marker::Error).exists());

        let begin = fs::read_to_string(step.marker(Marker::Begin)).unwrap();
        assert!(begin.contains("<Process Command=\"sh\""));
        assert!(begin.contains("Pid=\""));
    }

    #[test]
    fn failure_propagates_code() {
        let (_dir, run_dir) = run_dir();
        let command = sh("exit 3");
        let step = Step::new(&command, &run_dir);

        let outcome = step.run().unwrap();

        assert!(!outcome.success());
        assert_eq!(outcome.exit_code(), 3);
        assert!(step.marker(Marker::Error).is_file());
        assert!(!step.marker(Marker::End).exists());
    }

    #[test]
    fn signal_is_failure() {
        let (_dir, run_dir) = run_dir();
        let command = sh("kill -9 $$");

        let outcome = Step::new(&command, &run_dir).run().unwrap();

        assert_eq!(outcome.exit_code(), 1);
    }

    #[test]
    fn stale_markers_removed() {
        let (_dir, run_dir) = run_dir();
        let command = sh("exit 0");
        let step = Step::new(&command, &run_dir);
        fs::write(step.marker(Marker::Error), "").unwrap();

        step.run().unwrap();

        assert!(!step.marker(Marker::Error).exists());
        assert!(step.marker(Marker::End).exists());
    }

    #[test]
    fn args_are_literal() {
        let (dir, run_dir) = run_dir();
        let command = StepCommand {
            program: "sh".into(),
            args: vec![
                "-c".into(),
                "printf '%s\\n' \"$@\" > args.txt".into(),
                "sh".into(),
                "-log".into(),
                "$HOME board.vds".into(),
            ],
        };

        Step::new(&command, &run_dir).run().unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("args.txt")).unwrap(),
            "-log\n$HOME board.vds\n"
        );
    }

    #[test]
    fn marker_failures_keep_exit_code() {
        let (dir, run_dir) = run_dir();
        let command = sh("touch done.txt; exit 5");
        let step = Step::new(&command, &run_dir);
        fs::create_dir(step.marker(Marker::Begin)).unwrap();
        fs::create_dir(step.marker(Marker::Error)).unwrap();

        let outcome = step.run().unwrap();

        assert_eq!(outcome.exit_code(), 5);
        assert!(dir.path().join("done.txt").is_file());
        assert!(step.marker(Marker::Error).is_dir());
    }

    #[test]
    fn escape_attr_values() {
        assert_eq!(
            escape_attr(r#"a&b<c>"d""#),
            "a&amp;b&lt;c&gt;&quot;d&quot;"
        );
        assert_eq!(escape_attr("vivado"), "vivado");
    }

    #[test]
    fn stop_file_halts() {
        let (dir, run_dir) = run_dir();
        fs::write(dir.path().join(STOP_FILE), "").unwrap();
        let command = sh("touch ran.txt");
        let step = Step::new(&command, &run_dir);

        assert!(matches!(step.run(), Err(Error::Halted { .. })));
        assert!(!dir.path().join("ran.txt").exists());
        assert!(!step.marker(Marker::Begin).exists());
    }

    #[test]
    fn missing_program() {
        let (_dir, run_dir) = run_dir();
        let command = StepCommand {
            program: "vrun-test-no-such-tool".into(),
            args: vec![],
        };

        assert!(matches!(
            Step::new(&command, &run_dir).run(),
            Err(Error::Spawn { program, .. }) if program == "vrun-test-no-such-tool"
        ));
    }
}

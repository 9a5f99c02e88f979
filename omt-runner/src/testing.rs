//! Test helpers: stub scan tools and recording observers

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use omt_core::domain::config::RunConfig;
use omt_core::domain::job::JobDescriptor;
use omt_core::domain::outcome::Outcome;

use crate::config::RunnerConfig;
use crate::process::ScanCommand;
use crate::service::RunObserver;

/// Locates the `-oA` argument and stores it in `$out`
const STUB_PRELUDE: &str = r#"out=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "-oA" ]; then out="$arg"; fi
  prev="$arg"
done
"#;

/// Prints nmap-like chatter and writes the three output formats
pub const SUCCEED: &str = r#"echo "Starting Nmap 7.94 ( https://nmap.org )"
echo "Stats: 0:00:01 elapsed; 0 hosts completed (1 up), 1 undergoing Service Scan"
echo "Nmap scan report for 10.0.0.1"
echo "ETC: 12:00 (0:00:10 remaining)"
printf '<nmaprun out="%s"/>\n' "$out" > "$out.xml"
: > "$out.nmap"
: > "$out.gnmap"
"#;

/// Fails with a fixed stderr message
pub const FAIL: &str = r#"echo "Starting Nmap 7.94"
echo 'Failed to resolve "nowhere.invalid".' >&2
echo 'WARNING: No targets were specified, so 0 hosts scanned.' >&2
exit 1
"#;

/// Records its pid next to the output stem, then never finishes
pub const HANG: &str = r#"echo $$ > "$out.pid"
exec sleep 30
"#;

/// Forks a long sleep, records the forked pid, then waits on it
pub const FORK_AND_HANG: &str = r#"sleep 30 &
echo $! > "$out.pid"
wait
"#;

/// Exits cleanly without writing any output files
pub const NO_OUTPUT: &str = "exit 0\n";

/// Writes a stub script into `dir` and returns its path
///
/// The stub is run as `/bin/sh <script> ...` so it never needs the
/// executable bit.
pub fn write_stub(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("stub-scan.sh");
    std::fs::write(&path, format!("{}{}", STUB_PRELUDE, body)).expect("write stub script");
    path
}

/// Runner config and run config wired to a stub script
pub fn stub_setup(script: &Path, output_dir: &Path) -> (RunnerConfig, RunConfig) {
    let runner = RunnerConfig::new("/bin/sh");
    let run = RunConfig::new(format!("{} -sV", script.display()), output_dir);
    (runner, run)
}

pub fn job(name: &str, timeout_secs: Option<u64>) -> JobDescriptor {
    JobDescriptor::new(
        Some(name.to_string()),
        Some("10.0.0.1".to_string()),
        timeout_secs,
    )
    .expect("valid job")
}

/// Reads the pid a stub wrote next to its output stem in `dir`
#[cfg(unix)]
pub fn recorded_pid(dir: &Path) -> libc::pid_t {
    let pid_file = std::fs::read_dir(dir)
        .expect("read output dir")
        .map(|entry| entry.expect("dir entry").path())
        .find(|path| path.extension().is_some_and(|ext| ext == "pid"))
        .expect("stub wrote its pid");
    std::fs::read_to_string(pid_file)
        .expect("read pid file")
        .trim()
        .parse()
        .expect("numeric pid")
}

/// Observer that remembers everything it saw
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub started: Mutex<Vec<String>>,
    pub progress: Mutex<Vec<String>>,
    pub finished: Mutex<Vec<String>>,
}

impl RunObserver for RecordingObserver {
    fn job_started(&self, _job: &JobDescriptor, command: &ScanCommand) {
        self.started.lock().unwrap().push(command.to_string());
    }

    fn progress(&self, _job: &JobDescriptor, line: &str) {
        self.progress.lock().unwrap().push(line.to_string());
    }

    fn job_finished(&self, outcome: &Outcome) {
        self.finished.lock().unwrap().push(outcome.name.clone());
    }
}

//! External process handling
//!
//! Builds the scan tool's argv, spawns it with captured pipes, streams
//! its output and force-terminates it when a deadline passes.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::Path;
use std::process::Stdio;

use omt_core::domain::config::RunConfig;
use omt_core::domain::job::JobDescriptor;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::debug;

/// Fully resolved invocation of the scan tool for one job
///
/// Shape: `<tool> <flag tokens> <target> -oA <output stem>`. Arguments are
/// passed as discrete argv entries, never through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanCommand {
    pub program: String,
    pub args: Vec<OsString>,
}

impl ScanCommand {
    /// Builds the command for `job`
    ///
    /// # Arguments
    /// * `tool` - Program to launch
    /// * `job` - The job being executed
    /// * `config` - Shared run configuration supplying the flag string
    /// * `output_stem` - Path handed to `-oA`; the tool appends extensions
    pub fn build(tool: &str, job: &JobDescriptor, config: &RunConfig, output_stem: &Path) -> Self {
        let mut args: Vec<OsString> = config.arg_tokens().map(OsString::from).collect();
        args.push(OsString::from(job.target()));
        args.push(OsString::from("-oA"));
        args.push(output_stem.as_os_str().to_owned());

        Self {
            program: tool.to_string(),
            args,
        }
    }

    /// Spawns the command with stdout and stderr piped
    ///
    /// On unix the child leads its own process group so [`terminate`] can
    /// take down anything it forks.
    pub fn spawn(&self) -> io::Result<Child> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        command.process_group(0);

        command.spawn()
    }
}

impl fmt::Display for ScanCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Reads `reader` line by line until EOF
///
/// Each line, without its trailing newline, is passed to `on_line` as it
/// arrives. Returns the complete text read. Invalid UTF-8 is replaced
/// rather than treated as an error.
pub async fn stream_lines<R, F>(reader: R, mut on_line: F) -> io::Result<String>
where
    R: AsyncRead + Unpin,
    F: FnMut(&str),
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut captured = String::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        captured.push_str(&line);
        on_line(line.trim_end());
    }

    Ok(captured)
}

/// Reads `reader` to EOF as lossy UTF-8
pub async fn read_all<R>(mut reader: R) -> io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Kills `child` and everything in its process group, then reaps it
///
/// Returns once the child has exited, so no process outlives the call.
pub async fn terminate(child: &mut Child) -> io::Result<()> {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        debug!("Sending SIGKILL to process group {}", pid);
        // SAFETY: killpg has no memory-safety preconditions; the group id is
        // the child's pid because it was spawned with process_group(0).
        unsafe {
            libc::killpg(pid as libc::pid_t, libc::SIGKILL);
        }
    }

    child.kill().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> JobDescriptor {
        JobDescriptor::new(Some("web".to_string()), Some("10.0.0.1".to_string()), None).unwrap()
    }

    #[test]
    fn test_build_command_shape() {
        let config = RunConfig::new("-sV  -T4 -p 80,443", "/out");
        let command = ScanCommand::build("nmap", &job(), &config, Path::new("/out/web_20260102_030405"));

        assert_eq!(command.program, "nmap");
        let args: Vec<String> = command
            .args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec!["-sV", "-T4", "-p", "80,443", "10.0.0.1", "-oA", "/out/web_20260102_030405"]
        );
        assert_eq!(
            command.to_string(),
            "nmap -sV -T4 -p 80,443 10.0.0.1 -oA /out/web_20260102_030405"
        );
    }

    #[test]
    fn test_build_command_keeps_shell_metacharacters_literal() {
        let job = JobDescriptor::new(None, Some("10.0.0.1;rm -rf /".to_string()), None).unwrap();
        let config = RunConfig::new("-sn", "/out");
        let command = ScanCommand::build("nmap", &job, &config, Path::new("/out/scan_1"));

        assert_eq!(command.args[1], OsString::from("10.0.0.1;rm -rf /"));
        assert_eq!(command.args.len(), 4);
    }

    #[tokio::test]
    async fn test_stream_lines_reports_each_line() {
        let input: &[u8] = b"Starting\nStats: 1\r\npartial";
        let mut seen = Vec::new();

        let captured = stream_lines(input, |line| seen.push(line.to_string()))
            .await
            .unwrap();

        assert_eq!(seen, vec!["Starting", "Stats: 1", "partial"]);
        assert_eq!(captured, "Starting\nStats: 1\r\npartial");
    }

    #[tokio::test]
    async fn test_read_all_is_lossy() {
        let input: &[u8] = b"bad \xff byte\n";
        let text = read_all(input).await.unwrap();
        assert_eq!(text, "bad \u{fffd} byte\n");
    }
}

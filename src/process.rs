//! External command execution
//!
//! Every build step ultimately shells out to a tool on PATH (git, cmake,
//! ninja, meson, make). These helpers spawn the tool, capture or stream
//! its output, and turn nonzero exits into [`ForgeError::BuildTool`].

use crate::error::{ForgeError, ForgeResult};
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

/// Max number of output lines to include in build error messages.
const ERROR_TAIL_LINES: usize = 50;

/// Render a command for logs and error messages.
pub fn display_command(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Run a command and return its raw output.
pub async fn run(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
) -> ForgeResult<std::process::Output> {
    debug!("Executing: {}", display_command(program, args));

    let mut cmd = Command::new(program);
    cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    cmd.output()
        .await
        .map_err(|e| ForgeError::command_failed(display_command(program, args), e))
}

/// Run a command and fail with a `BuildTool` error on nonzero exit.
pub async fn run_checked(program: &str, args: &[String], cwd: Option<&Path>) -> ForgeResult<()> {
    let output = run(program, args, cwd).await?;

    if output.status.success() {
        return Ok(());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(ForgeError::BuildTool {
        command: display_command(program, args),
        code: output.status.code().unwrap_or(-1),
        output: output_tail(&stdout, &stderr),
    })
}

/// Run a command and return its stdout as a string.
///
/// Used for version probes; nonzero exit is reported the same way as for
/// any other tool invocation.
pub async fn capture_stdout(program: &str, args: &[String]) -> ForgeResult<String> {
    let output = run(program, args, None).await?;

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ForgeError::BuildTool {
            command: display_command(program, args),
            code: output.status.code().unwrap_or(-1),
            output: output_tail(&stdout, &stderr),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Run a command, streaming each output line through `on_line`.
///
/// Fails with a `BuildTool` error carrying the output tail on nonzero
/// exit. Used for long-running build steps so progress reaches the user
/// as it happens.
pub async fn run_streamed(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
    on_line: &(dyn Fn(String) + Send + Sync),
) -> ForgeResult<()> {
    debug!("Executing (streamed): {}", display_command(program, args));

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let mut child = cmd
        .spawn()
        .map_err(|e| ForgeError::command_failed(display_command(program, args), e))?;

    let collected = stream_child_output(&mut child, on_line).await;

    let status = child
        .wait()
        .await
        .map_err(|e| ForgeError::command_failed(display_command(program, args), e))?;

    if status.success() {
        Ok(())
    } else {
        let tail_start = collected.len().saturating_sub(ERROR_TAIL_LINES);
        Err(ForgeError::BuildTool {
            command: display_command(program, args),
            code: status.code().unwrap_or(-1),
            output: collected[tail_start..].join("\n"),
        })
    }
}

/// Extract the useful tail of tool output for error diagnostics.
///
/// Combines stdout and stderr, then returns the last `ERROR_TAIL_LINES`
/// lines so error messages are actionable without being overwhelming.
pub fn output_tail(stdout: &str, stderr: &str) -> String {
    let lines: Vec<&str> = stdout.lines().chain(stderr.lines()).collect();
    let total = lines.len();
    let tail: Vec<&str> = if total > ERROR_TAIL_LINES {
        lines[total - ERROR_TAIL_LINES..].to_vec()
    } else {
        lines
    };
    tail.join("\n")
}

/// Stream stdout+stderr from a child process, calling `on_line` for each line.
///
/// Returns all collected output lines for error reporting. This is a
/// standalone async function (not a method) to avoid lifetime issues with
/// the `dyn Fn` callback.
async fn stream_child_output(
    child: &mut tokio::process::Child,
    on_line: &(dyn Fn(String) + Send + Sync),
) -> Vec<String> {
    let stderr = child.stderr.take().expect("stderr piped");
    let stdout = child.stdout.take().expect("stdout piped");

    let mut stderr_reader = BufReader::new(stderr).lines();
    let mut stdout_reader = BufReader::new(stdout).lines();

    let mut all_output = Vec::new();
    let mut stderr_done = false;
    let mut stdout_done = false;

    while !stderr_done || !stdout_done {
        tokio::select! {
            line = stderr_reader.next_line(), if !stderr_done => {
                match line {
                    Ok(Some(line)) => {
                        on_line(line.clone());
                        all_output.push(line);
                    }
                    _ => stderr_done = true,
                }
            }
            line = stdout_reader.next_line(), if !stdout_done => {
                match line {
                    Ok(Some(line)) => {
                        on_line(line.clone());
                        all_output.push(line);
                    }
                    _ => stdout_done = true,
                }
            }
        }
    }

    all_output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_command_formats() {
        assert_eq!(display_command("ninja", &[]), "ninja");
        assert_eq!(
            display_command("cmake", &["--version".to_string()]),
            "cmake --version"
        );
    }

    #[test]
    fn output_tail_short_output_untruncated() {
        let tail = output_tail("line one\nline two", "err one");
        assert_eq!(tail, "line one\nline two\nerr one");
    }

    #[test]
    fn output_tail_truncates_long_output() {
        let stdout: String = (0..100).map(|i| format!("line {i}\n")).collect();
        let tail = output_tail(&stdout, "");
        assert_eq!(tail.lines().count(), ERROR_TAIL_LINES);
        assert!(tail.starts_with("line 50"));
        assert!(tail.ends_with("line 99"));
    }

    #[tokio::test]
    async fn run_captures_stdout() {
        let out = capture_stdout("echo", &["hello".to_string()]).await.unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[tokio::test]
    async fn run_checked_reports_exit_code() {
        let err = run_checked("false", &[], None).await.unwrap_err();
        match err {
            ForgeError::BuildTool { code, .. } => assert_eq!(code, 1),
            other => panic!("expected BuildTool error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_program_is_command_failed() {
        let err = run("crossforge-no-such-tool", &[], None).await.unwrap_err();
        assert!(matches!(err, ForgeError::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn run_streamed_collects_lines() {
        let lines = std::sync::Mutex::new(Vec::new());
        run_streamed(
            "sh",
            &["-c".to_string(), "echo one; echo two".to_string()],
            None,
            &|line| lines.lock().unwrap().push(line),
        )
        .await
        .unwrap();
        let lines = lines.into_inner().unwrap();
        assert_eq!(lines, vec!["one", "two"]);
    }
}

//! Test application invocation.
//!
//! This module:
//! 1. Builds the command from an [`InvocationSpec`]
//! 2. Spawns the test application in its own directory, with stdout and
//!    stderr both writing to one pipe
//! 3. Forwards each output line to the log sink in the order it was written
//! 4. Waits for exit once the pipe reaches end of stream
//!
//! A cancelled token kills the child and the run fails with
//! `RunnerError::Interrupted`.

use std::io;
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use unitrun_core::{
    InvocationOptions, InvocationSpec, ProcessOutcome, ResolvedApp, RunnerError, RunnerResult,
    TestLogSink,
};

/// Exit code reported when the platform gives no code and no signal.
const UNKNOWN_EXIT_CODE: i32 = -1;

/// Async read half of the shared output pipe.
#[cfg(unix)]
type OutputReader = tokio::net::unix::pipe::Receiver;
#[cfg(not(unix))]
type OutputReader = tokio::io::DuplexStream;

/// Run the resolved test application with the given options.
///
/// Output already forwarded to `sink` stays there whatever the outcome.
///
/// # Errors
///
/// - `RunnerError::Launch` if the process cannot be spawned or its output
///   cannot be read
/// - `RunnerError::Execution` if it exits with a nonzero status
/// - `RunnerError::Interrupted` if `cancel` fires before it exits
pub async fn run(
    app: &ResolvedApp,
    options: &InvocationOptions,
    sink: &dyn TestLogSink,
    cancel: &CancellationToken,
) -> RunnerResult<ProcessOutcome> {
    let spec = InvocationSpec::new(app, options)?;
    run_spec(&spec, sink, cancel).await
}

/// Run an already derived invocation.
pub async fn run_spec(
    spec: &InvocationSpec,
    sink: &dyn TestLogSink,
    cancel: &CancellationToken,
) -> RunnerResult<ProcessOutcome> {
    spec.log_settings(sink);
    debug!(
        cwd = %spec.working_dir.display(),
        "Executing: {}",
        spec.command_line().join(" ")
    );

    let (mut child, output) = spawn(spec)?;

    let outcome = drive(&mut child, output, spec, sink, cancel).await?;
    debug!(
        exit_code = outcome.exit_code,
        interrupted = outcome.interrupted,
        "Test application finished"
    );
    outcome.into_result()
}

/// Build the command for `spec`. Output redirection is added by [`spawn`].
fn build_command(spec: &InvocationSpec) -> Command {
    let mut cmd = Command::new(&spec.executable_path);
    cmd.args(spec.args())
        .current_dir(&spec.working_dir)
        .envs(&spec.env_overrides)
        .stdin(Stdio::null())
        .kill_on_drop(true);
    cmd
}

/// Spawn the child with stdout and stderr sharing the write end of one pipe.
fn spawn(spec: &InvocationSpec) -> RunnerResult<(Child, OutputReader)> {
    let (reader, writer) = io::pipe().map_err(|e| launch_error(spec, e))?;
    let stderr_writer = writer.try_clone().map_err(|e| launch_error(spec, e))?;

    let mut cmd = build_command(spec);
    cmd.stdout(writer).stderr(stderr_writer);
    let child = cmd.spawn().map_err(|e| launch_error(spec, e))?;
    // The command owns the parent's copies of the write end. The reader only
    // sees end of stream once they are closed.
    drop(cmd);

    let output = async_reader(reader).map_err(|e| launch_error(spec, e))?;
    Ok((child, output))
}

#[cfg(unix)]
fn async_reader(reader: io::PipeReader) -> io::Result<OutputReader> {
    tokio::net::unix::pipe::Receiver::from_owned_fd(reader.into())
}

/// Pump the blocking pipe into an in-memory stream from a plain thread.
///
/// The thread stops at end of stream, on a read error, or once the async
/// side has been dropped.
#[cfg(not(unix))]
fn async_reader(mut reader: io::PipeReader) -> io::Result<OutputReader> {
    use std::io::Read;
    use tokio::io::AsyncWriteExt;

    const CHUNK: usize = 8 * 1024;

    let (output, mut pump) = tokio::io::duplex(8 * CHUNK);
    let handle = tokio::runtime::Handle::current();
    std::thread::Builder::new()
        .name("unitrun-output".to_string())
        .spawn(move || {
            let mut buf = [0u8; CHUNK];
            loop {
                let n = match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        warn!("Failed to read test application output: {e}");
                        break;
                    }
                };
                if handle.block_on(pump.write_all(&buf[..n])).is_err() {
                    break;
                }
            }
        })?;
    Ok(output)
}

fn launch_error(spec: &InvocationSpec, source: io::Error) -> RunnerError {
    RunnerError::Launch {
        program: spec.executable_path.clone(),
        source,
    }
}

/// Forward output until end of stream, then wait for exit.
///
/// A read failure kills the child rather than leaving it blocked on a full
/// pipe.
async fn drive<R: AsyncRead + Unpin>(
    child: &mut Child,
    output: R,
    spec: &InvocationSpec,
    sink: &dyn TestLogSink,
    cancel: &CancellationToken,
) -> RunnerResult<ProcessOutcome> {
    let mut lines = LineStream::new(output);

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                return Ok(interrupt(child).await);
            }

            line = lines.next_line() => match line {
                Ok(Some(text)) => sink.info(&text),
                Ok(None) => break,
                Err(source) => {
                    warn!("Failed to read test application output: {source}");
                    terminate(child).await;
                    return Err(launch_error(spec, source));
                }
            },
        }
    }

    let status = tokio::select! {
        biased;

        () = cancel.cancelled() => {
            return Ok(interrupt(child).await);
        }

        status = child.wait() => status.map_err(|source| launch_error(spec, source))?,
    };

    Ok(ProcessOutcome::exited(exit_code(status)))
}

async fn interrupt(child: &mut Child) -> ProcessOutcome {
    warn!("Test application run interrupted, terminating process");
    ProcessOutcome::interrupted(terminate(child).await)
}

/// Kill the child and reap it, returning whatever exit code it reports.
async fn terminate(child: &mut Child) -> i32 {
    if let Err(e) = child.start_kill() {
        debug!("Kill failed (process may have exited): {e}");
    }
    match child.wait().await {
        Ok(status) => exit_code(status),
        Err(_) => UNKNOWN_EXIT_CODE,
    }
}

/// Exit code, or `128 + signal` for a signal-terminated process on Unix.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    UNKNOWN_EXIT_CODE
}

/// Line reader over the child's output pipe.
///
/// Bytes are accumulated in `buf` across calls, so a read abandoned by
/// `select!` resumes without losing data. Invalid UTF-8 is replaced.
struct LineStream<R> {
    reader: BufReader<R>,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> LineStream<R> {
    fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            buf: Vec::new(),
        }
    }

    async fn next_line(&mut self) -> io::Result<Option<String>> {
        let read = self.reader.read_until(b'\n', &mut self.buf).await?;
        if read == 0 && self.buf.is_empty() {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        Ok(Some(line))
    }
}

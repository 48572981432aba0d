use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use quick_error::quick_error;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    pin,
    process::Command,
};
use tokio_stream::{wrappers::SplitStream, Stream, StreamExt};

quick_error! {
    #[derive(Debug)]
    pub enum Error {
        Execution { program: String, args: String, cause: Cause } {
            display("failed to execute [{} {}]: {}", program, args, cause)
            source(cause)
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum Cause {
        Io(err: std::io::Error) {
            from()
            display("{}", err)
            source(err)
        }
        Status(status: ExitStatus) {
            display("{}", status)
        }
    }
}

impl Error {
    pub fn execution(program: &str, args: &[&str], cause: Cause) -> Error {
        Error::Execution {
            program: program.to_owned(),
            args: args.join(" "),
            cause,
        }
    }
}

/// Runs an external program and hands back its combined output, one entry per line.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Vec<String>, Error>;
}

/// Spawns real subprocesses.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessExecutor;

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Vec<String>, Error> {
        log::debug!("running `{} {}`", program, shell_words::join(args));

        let output = capture(program, args)
            .await
            .map_err(|cause| Error::execution(program, args, cause))?;

        let lines = split_output(&output);
        log::debug!("`{}` produced {} line(s)", program, lines.len());
        Ok(lines)
    }
}

async fn capture(program: &str, args: &[&str]) -> Result<Vec<String>, Cause> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let stdout = child.stdout.take().ok_or_else(|| missing_pipe("stdout"))?;
    let stderr = child.stderr.take().ok_or_else(|| missing_pipe("stderr"))?;

    let merged = lines(stdout).merge(lines(stderr));
    pin!(merged);

    let mut output = Vec::new();
    while let Some(line) = merged.next().await {
        output.push(line?);
    }

    let status = child.wait().await?;
    if !status.success() {
        return Err(Cause::Status(status));
    }

    Ok(output)
}

fn lines<R>(reader: R) -> impl Stream<Item = std::io::Result<String>>
where
    R: AsyncRead + Unpin,
{
    SplitStream::new(BufReader::new(reader).split(b'\n')).map(|segment| {
        segment.map(|bytes| {
            String::from_utf8_lossy(&bytes)
                .trim_end_matches('\r')
                .to_owned()
        })
    })
}

fn missing_pipe(name: &str) -> Cause {
    Cause::Io(std::io::Error::new(
        std::io::ErrorKind::BrokenPipe,
        format!("child {name} was not captured"),
    ))
}

/// Trims the captured output as a whole and splits it back into lines.
/// Output that is blank after trimming yields no lines at all.
pub fn split_output(lines: &[String]) -> Vec<String> {
    let joined = lines.join("\n");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    trimmed.split('\n').map(str::to_owned).collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn blank_output_has_no_lines() {
        assert!(split_output(&[]).is_empty());
        assert!(split_output(&owned(&[""])).is_empty());
        assert!(split_output(&owned(&["  ", "\t", ""])).is_empty());
    }

    #[test]
    fn surrounding_blank_lines_are_trimmed() {
        assert_eq!(
            split_output(&owned(&["", "  first", "", "second  ", ""])),
            owned(&["first", "", "second"])
        );
    }

    #[test]
    fn execution_error_names_program_and_arguments() {
        let cause = Cause::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = Error::execution("adb", &["devices", "-l"], cause);
        assert_eq!(err.to_string(), "failed to execute [adb devices -l]: gone");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_program_is_an_execution_error() {
        let program = "devlist-no-such-program";
        let args = ["-l", "devices", "--flag"];
        let err = ProcessExecutor.run(program, &args).await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains(program), "{message}");
        for arg in args {
            assert!(message.contains(arg), "{message}");
        }
        assert!(matches!(
            err,
            Error::Execution {
                cause: Cause::Io(_),
                ..
            }
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn empty_output_is_not_an_error() {
        let lines = ProcessExecutor.run("echo", &[]).await.unwrap();
        assert!(lines.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn single_line_is_kept_whole() {
        let lines = ProcessExecutor.run("echo", &["a b"]).await.unwrap();
        assert_eq!(lines, vec!["a b".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stderr_is_captured_with_stdout() {
        let mut lines = ProcessExecutor
            .run("sh", &["-c", "echo out; echo err >&2"])
            .await
            .unwrap();
        lines.sort();
        assert_eq!(lines, vec!["err".to_string(), "out".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_an_execution_error() {
        let err = ProcessExecutor
            .run("sh", &["-c", "echo partial; exit 3"])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Execution {
                cause: Cause::Status(_),
                ..
            }
        ));
        assert!(err.to_string().starts_with("failed to execute [sh -c"));
    }
}

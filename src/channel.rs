//! Write side of a spawned gnuplot process

use std::io::{self, BufWriter, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::Error;

// Large pipe buffer; bulk inline data would otherwise pay one syscall per line
const BUF_CAPACITY: usize = 64 * 1024;

/// One-directional byte channel to a gnuplot child process
///
/// The channel owns the child and a buffered writer over its standard input;
/// both live exactly as long as the `Pipe`. Nothing is ever read back: gnuplot
/// renders to whatever terminal it selected on its own, and its opinion of the
/// bytes it receives is unobservable from here.
///
/// Dropping a `Pipe` closes the child's stdin and reaps the process. Use
/// [`Session::close`](crate::Session::close) instead when the exit outcome
/// matters.
pub struct Pipe {
    stdin: Option<BufWriter<ChildStdin>>,
    child: Option<Child>,
}

impl Pipe {
    /// Spawns a gnuplot process with its standard input captured
    ///
    /// Fails with [`Error::Launch`] if the process cannot be started, in which
    /// case nothing is left allocated. On non-Windows platforms a missing
    /// `DISPLAY` variable produces an advisory warning on stderr; interactive
    /// terminals need it, file terminals do not, so initialization proceeds
    /// either way.
    pub fn open() -> Result<Pipe, Error> {
        #[cfg(not(windows))]
        {
            if std::env::var_os("DISPLAY").is_none() {
                eprintln!("cannot find DISPLAY variable: is it set?");
            }
        }

        let mut child = Command::new("gnuplot")
            .stdin(Stdio::piped())
            .spawn()
            .map_err(Error::Launch)?;

        // stdin was requested as piped, so it is always present here
        let stdin = child.stdin.take().unwrap();

        Ok(Pipe {
            stdin: Some(BufWriter::with_capacity(BUF_CAPACITY, stdin)),
            child: Some(child),
        })
    }

    /// Flushes pending bytes, closes the pipe and reaps the child
    ///
    /// The child sees end-of-file on its input and exits on its own; no signal
    /// is sent. All owned resources are released before any error is
    /// reported.
    pub(crate) fn shutdown(&mut self) -> Result<(), Error> {
        let flushed = match self.stdin.take() {
            Some(mut stdin) => stdin.flush(),
            None => Ok(()),
        };
        // stdin is dropped at this point, which is what makes gnuplot exit

        let waited = match self.child.take() {
            Some(mut child) => child.wait(),
            None => return Ok(()),
        };

        flushed.map_err(Error::Shutdown)?;
        let status = waited.map_err(Error::Shutdown)?;
        if !status.success() {
            return Err(Error::Shutdown(io::Error::new(
                io::ErrorKind::Other,
                format!("gnuplot exited with {}", status),
            )));
        }

        Ok(())
    }
}

impl Write for Pipe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.stdin {
            Some(ref mut stdin) => stdin.write(buf),
            None => Err(closed()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.stdin {
            Some(ref mut stdin) => stdin.flush(),
            None => Err(closed()),
        }
    }
}

impl Drop for Pipe {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.wait();
        }
    }
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "gnuplot pipe already closed")
}

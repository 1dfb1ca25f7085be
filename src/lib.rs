//! Session-oriented driver for a [gnuplot] process.
//!
//! [gnuplot]: http://www.gnuplot.info/
//!
//! A [`Gnuplot`] session spawns one `gnuplot` process and feeds it commands
//! and inline data over its standard input. The channel is write-only: there
//! is no way to learn how gnuplot interpreted what it was sent, so everything
//! past the pipe is best-effort by design.
//!
//! # Examples
//!
//! Drive a live gnuplot window:
//!
//! ```no_run
//! use gnuplot_pipe::Gnuplot;
//!
//! # fn main() -> Result<(), gnuplot_pipe::Error> {
//! let mut g = Gnuplot::open()?;
//! g.set_style("lines");
//! g.set_xlabel("time (s)")?;
//!
//! let x = (0..50).map(|i| f64::from(i) / 10.0).collect::<Vec<_>>();
//! let y = x.iter().map(|x| x * x).collect::<Vec<_>>();
//! g.plot_xy(&x, &y, Some("parabola"))?;
//! g.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! A session is generic over any [`std::io::Write`] sink, so the same command
//! stream can be captured in memory or saved as a script instead:
//!
//! ```
//! use gnuplot_pipe::{Series, Session};
//!
//! # fn main() -> Result<(), gnuplot_pipe::Error> {
//! let mut s = Session::new(Vec::new());
//! s.plot(Series::X(&[1.0, 4.0, 9.0]), "squares")?;
//!
//! let script = s.into_sink();
//! assert!(script.starts_with(b"plot '-' title \"squares\" with points\n"));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(bare_trait_objects)]

use std::fmt;
use std::io;
use std::process::Command;
use std::str;

mod data;
mod display;

pub mod channel;
pub mod prelude;
pub mod series;
pub mod session;
pub mod traits;

pub use crate::channel::Pipe;
pub use crate::series::{Series, Titles};
pub use crate::session::{Gnuplot, Session};

/// Plotting styles accepted by [`Session::set_style`]
///
/// The set is closed; a name outside of it falls back to the default,
/// [`Style::Points`].
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Lines,
    Points,
    LinesPoints,
    Impulses,
    Dots,
    Steps,
    ErrorBars,
    Boxes,
    BoxErrorBars,
}

impl Style {
    /// Looks a style up by its gnuplot name
    pub fn from_name(name: &str) -> Option<Style> {
        match name {
            "lines" => Some(Style::Lines),
            "points" => Some(Style::Points),
            "linespoints" => Some(Style::LinesPoints),
            "impulses" => Some(Style::Impulses),
            "dots" => Some(Style::Dots),
            "steps" => Some(Style::Steps),
            "errorbars" => Some(Style::ErrorBars),
            "boxes" => Some(Style::Boxes),
            "boxerrorbars" => Some(Style::BoxErrorBars),
            _ => None,
        }
    }
}

/// Errors raised by a session
#[derive(Debug)]
pub enum Error {
    /// The gnuplot process could not be started
    Launch(io::Error),
    /// Terminating the gnuplot process reported failure; all session
    /// resources have been released regardless
    Shutdown(io::Error),
    /// Writing to the gnuplot pipe failed on this side of the channel
    Pipe(io::Error),
    /// The call was rejected before a single byte was sent
    InvalidArgument(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Launch(err) => {
                write!(f, "error starting gnuplot, is it in your path? ({})", err)
            }
            Error::Shutdown(err) => {
                write!(f, "problem closing communication to gnuplot: {}", err)
            }
            Error::Pipe(err) => write!(f, "write to the gnuplot pipe failed: {}", err),
            Error::InvalidArgument(msg) => write!(f, "invalid plot call: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Launch(err) | Error::Shutdown(err) | Error::Pipe(err) => Some(err),
            Error::InvalidArgument(_) => None,
        }
    }
}

/// Enums that can produce gnuplot code
trait Display<S> {
    /// Translates the enum in gnuplot code
    fn display(&self) -> S;
}

/// Possible errors when probing the gnuplot version
#[derive(Debug)]
pub enum VersionError {
    /// The `gnuplot` command couldn't be executed
    Exec(io::Error),
    /// The `gnuplot` command returned an error message
    Error(String),
    /// The `gnuplot` command returned an unparsable version string
    Parse(String),
}

impl fmt::Display for VersionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VersionError::Exec(err) => write!(f, "`gnuplot --version` failed: {}", err),
            VersionError::Error(msg) => {
                write!(f, "`gnuplot --version` failed with error message:\n{}", msg)
            }
            VersionError::Parse(msg) => write!(
                f,
                "`gnuplot --version` returned an unparsable version string: {}",
                msg
            ),
        }
    }
}

impl std::error::Error for VersionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VersionError::Exec(err) => Some(err),
            _ => None,
        }
    }
}

/// A gnuplot version number
pub struct Version {
    /// The major version number
    pub major: usize,
    /// The minor version number
    pub minor: usize,
    /// The patch level
    pub patch: String,
}

/// Returns the version of the `gnuplot` executable found on the path
///
/// This runs `gnuplot --version` as a separate short-lived process; it does
/// not touch any open session. Useful to probe whether gnuplot is installed
/// before opening one.
pub fn version() -> Result<Version, VersionError> {
    let output = Command::new("gnuplot")
        .arg("--version")
        .output()
        .map_err(VersionError::Exec)?;
    if !output.status.success() {
        let message = String::from_utf8_lossy(&output.stderr).into_owned();
        return Err(VersionError::Error(message));
    }

    let stdout = str::from_utf8(&output.stdout)
        .map_err(|_| VersionError::Parse("<invalid utf-8>".to_owned()))?;
    parse_version(stdout).ok_or_else(|| VersionError::Parse(stdout.to_owned()))
}

// Expected shape: `gnuplot 5.4 patchlevel 2`, possibly with trailing cruft
fn parse_version(version_str: &str) -> Option<Version> {
    let mut words = version_str.split_whitespace().skip(1);
    let mut digits = words.next()?.split('.');
    let major = digits.next()?.parse().ok()?;
    let minor = digits.next()?.parse().ok()?;
    let patch = words.nth(1)?.to_owned();

    Some(Version {
        major,
        minor,
        patch,
    })
}

#[cfg(test)]
mod test {
    use super::Style;

    #[test]
    fn parse_version_on_valid_string() {
        let version = super::parse_version("gnuplot 5.0 patchlevel 7").unwrap();
        assert_eq!(5, version.major);
        assert_eq!(0, version.minor);
        assert_eq!("7", &version.patch);
    }

    #[test]
    fn parse_version_with_distro_suffix() {
        let version =
            super::parse_version("gnuplot 5.2 patchlevel 5a (Gentoo revision r0)").unwrap();
        assert_eq!(5, version.major);
        assert_eq!(2, version.minor);
        assert_eq!("5a", &version.patch);
    }

    #[test]
    fn parse_version_rejects_invalid_strings() {
        let strings = [
            "",
            "foobar",
            "gnuplot 50 patchlevel 7",
            "gnuplot 5.0 patchlevel",
            "gnuplot foo.bar patchlevel 7",
        ];
        for string in &strings {
            assert!(super::parse_version(string).is_none());
        }
    }

    #[test]
    fn style_names_round_trip() {
        for &(name, style) in &[
            ("lines", Style::Lines),
            ("points", Style::Points),
            ("linespoints", Style::LinesPoints),
            ("impulses", Style::Impulses),
            ("dots", Style::Dots),
            ("steps", Style::Steps),
            ("errorbars", Style::ErrorBars),
            ("boxes", Style::Boxes),
            ("boxerrorbars", Style::BoxErrorBars),
        ] {
            assert_eq!(Some(style), Style::from_name(name));
        }
    }

    #[test]
    fn unknown_style_names_are_rejected() {
        assert_eq!(None, Style::from_name("bogus"));
        assert_eq!(None, Style::from_name("Lines"));
        assert_eq!(None, Style::from_name(""));
    }
}

//! Session state and the command surface

use std::fmt;
use std::io::Write;

use itertools::Itertools;

use crate::channel::Pipe;
use crate::series::{Series, Titles, UNTITLED};
use crate::traits::Data;
use crate::{Display, Error, Style};

// Longest header line one plot call may send. A call whose header would not
// fit aborts before anything reaches the pipe; partial headers are never sent.
const MAX_HEADER: usize = 2048;

/// A plotting session over an arbitrary byte sink
///
/// The session accumulates display state (current [`Style`], the number of
/// active plots, the multiplot flag) and serializes plot calls into gnuplot's
/// scripting syntax. The plot count decides whether the next call layers onto
/// the existing plot (`replot`) or starts fresh (`plot`); while multiplot is
/// active, gnuplot's own layering takes over and `plot` is always used.
///
/// One session is single-threaded by construction. A host that shares one
/// across threads must serialize every call externally.
pub struct Session<W> {
    sink: W,
    style: Style,
    nplots: usize,
    multiplot: bool,
}

/// A session connected to a live gnuplot process
pub type Gnuplot = Session<Pipe>;

impl Gnuplot {
    /// Opens a session against a freshly spawned gnuplot process
    pub fn open() -> Result<Gnuplot, Error> {
        Ok(Session::new(Pipe::open()?))
    }

    /// Flushes pending output and terminates the gnuplot process
    ///
    /// Must be the last call on a session; the channel and its buffer are
    /// released on every path, including when termination itself reports
    /// failure.
    pub fn close(mut self) -> Result<(), Error> {
        self.sink.shutdown()
    }
}

impl<W> Session<W>
where
    W: Write,
{
    /// Creates a session that writes its command stream to `sink`
    ///
    /// The default style is [`Style::Points`], the plot count starts at zero
    /// and multiplot is off.
    pub fn new(sink: W) -> Session<W> {
        Session {
            sink,
            style: Style::Points,
            nplots: 0,
            multiplot: false,
        }
    }

    /// Borrows the underlying sink
    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Consumes the session and hands back the sink
    pub fn into_sink(self) -> W {
        self.sink
    }

    /// The current plotting style
    pub fn style(&self) -> Style {
        self.style
    }

    /// Number of curves plotted since the last [`reset_plot`](Session::reset_plot)
    pub fn nplots(&self) -> usize {
        self.nplots
    }

    /// Sends one raw command line and flushes
    ///
    /// A newline is appended; nothing else is touched, so arbitrary gnuplot
    /// commands pass through verbatim. `format_args!` gives printf-style
    /// interpolation checked at compile time:
    ///
    /// ```
    /// # use gnuplot_pipe::Session;
    /// # fn main() -> Result<(), gnuplot_pipe::Error> {
    /// # let mut s = Session::new(Vec::new());
    /// s.cmd(format_args!("set xrange [{}:{}]", 0.0, 2.5))?;
    /// # assert_eq!(b"set xrange [0:2.5]\n".as_ref(), s.sink().as_slice());
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// There is no way to know whether gnuplot accepted the command; the
    /// channel is one-directional.
    pub fn cmd<T>(&mut self, command: T) -> Result<(), Error>
    where
        T: fmt::Display,
    {
        self.cmd_unflushed(command)?;
        self.sink.flush().map_err(Error::Pipe)
    }

    /// Sends one command line without flushing
    ///
    /// Meant for bursts of inline data, where flushing every line would be a
    /// severe throughput penalty. Callers must follow a burst with one
    /// flushing [`cmd`](Session::cmd) to guarantee delivery.
    pub fn cmd_unflushed<T>(&mut self, command: T) -> Result<(), Error>
    where
        T: fmt::Display,
    {
        writeln!(self.sink, "{}", command).map_err(Error::Pipe)
    }

    /// Changes the plotting style for subsequent plot calls
    ///
    /// `name` must be one of the gnuplot style names in [`Style`]. An unknown
    /// name warns on stderr and falls back to the default `points`; it never
    /// fails the session.
    pub fn set_style(&mut self, name: &str) {
        self.style = match Style::from_name(name) {
            Some(style) => style,
            None => {
                eprintln!("warning: unknown requested style: using points");
                Style::Points
            }
        };
    }

    /// Sets the x axis label
    ///
    /// The text is interpolated verbatim inside double quotes; quoting hazards
    /// are the caller's problem.
    pub fn set_xlabel(&mut self, label: &str) -> Result<(), Error> {
        self.cmd(format_args!("set xlabel \"{}\"", label))
    }

    /// Sets the y axis label; same contract as [`set_xlabel`](Session::set_xlabel)
    pub fn set_ylabel(&mut self, label: &str) -> Result<(), Error> {
        self.cmd(format_args!("set ylabel \"{}\"", label))
    }

    /// Resets the plot count, so the next plot call erases previous curves
    ///
    /// Style and labels are left as they are.
    pub fn reset_plot(&mut self) {
        self.nplots = 0;
    }

    /// Switches gnuplot's multiplot mode on or off
    ///
    /// `options` is appended verbatim to `set multiplot` when enabling. While
    /// enabled, every plot call uses `plot` regardless of the plot count.
    pub fn multiplot(&mut self, enabled: bool, options: Option<&str>) -> Result<(), Error> {
        self.multiplot = enabled;
        if enabled {
            match options {
                Some(options) => self.cmd(format_args!("set multiplot {}", options)),
                None => self.cmd("set multiplot"),
            }
        } else {
            self.cmd("unset multiplot")
        }
    }

    /// Plots one series in any of the five shapes
    ///
    /// This is the emitter every `plot_*` convenience method funnels into. It
    /// sends one comma-joined header naming an inline-data clause per curve,
    /// then each curve's records closed by the `e` sentinel, and finally
    /// advances the plot count by the number of curves.
    ///
    /// Invalid shapes (empty data, mismatched lengths, a title list that does
    /// not match the curve count, a header past the line limit) are rejected
    /// with [`Error::InvalidArgument`] before a single byte is sent.
    pub fn plot<'a, T>(&mut self, series: Series<'a>, titles: T) -> Result<(), Error>
    where
        T: Into<Titles<'a>>,
    {
        series.validate()?;
        let curves = series.curves();
        let titles = titles.into().resolve(curves)?;
        let header = self.header(&titles)?;

        self.cmd(header)?;
        for curve in 0..curves {
            series
                .write_curve(curve, &mut self.sink)
                .map_err(Error::Pipe)?;
            self.cmd("e")?;
        }

        self.nplots += curves;
        Ok(())
    }

    /// Plots a single list; the x coordinate is the sample index
    pub fn plot_x<D>(&mut self, d: D, title: Option<&str>) -> Result<(), Error>
    where
        D: IntoIterator,
        D::Item: Data,
    {
        let d = d.into_iter().map(Data::f64).collect::<Vec<_>>();
        self.plot(Series::X(&d), title)
    }

    /// Plots several equal-length lists against the shared implicit x
    pub fn plot_multi_x(
        &mut self,
        d: &[&[f64]],
        titles: Option<&[Option<&str>]>,
    ) -> Result<(), Error> {
        self.plot(Series::MultiX(d), titles)
    }

    /// Plots explicit (x, y) pairs
    pub fn plot_xy<X, Y>(&mut self, x: X, y: Y, title: Option<&str>) -> Result<(), Error>
    where
        X: IntoIterator,
        X::Item: Data,
        Y: IntoIterator,
        Y::Item: Data,
    {
        let x = x.into_iter().map(Data::f64).collect::<Vec<_>>();
        let y = y.into_iter().map(Data::f64).collect::<Vec<_>>();
        self.plot(Series::Xy { x: &x, y: &y }, title)
    }

    /// Plots one x list against several y lists
    pub fn plot_x_multi_y(
        &mut self,
        x: &[f64],
        ys: &[&[f64]],
        titles: Option<&[Option<&str>]>,
    ) -> Result<(), Error> {
        self.plot(Series::XMultiY { x, ys }, titles)
    }

    /// Plots several independent (x, y) list pairs
    pub fn plot_multi_xy(
        &mut self,
        xs: &[&[f64]],
        ys: &[&[f64]],
        titles: Option<&[Option<&str>]>,
    ) -> Result<(), Error> {
        self.plot(Series::MultiXy { xs, ys }, titles)
    }

    /// Plots the line y = a*x + b
    ///
    /// Header-only: gnuplot evaluates the expression itself, so there is no
    /// data phase.
    pub fn plot_slope(&mut self, a: f64, b: f64, title: Option<&str>) -> Result<(), Error> {
        let verb = self.verb();
        let style = self.style.display();
        let title = title.unwrap_or(UNTITLED);

        self.cmd(format_args!(
            "{} {:.18e} * x + {:.18e} title \"{}\" with {}",
            verb, a, b, title, style
        ))?;
        self.nplots += 1;
        Ok(())
    }

    /// Plots a curve of equation y = f(x), given the `f(x)` side
    ///
    /// The formula is passed through verbatim in gnuplot's expression syntax,
    /// e.g. `sin(x) * cos(2 * x)`. Header-only, like
    /// [`plot_slope`](Session::plot_slope).
    pub fn plot_equation(&mut self, equation: &str, title: Option<&str>) -> Result<(), Error> {
        let verb = self.verb();
        let style = self.style.display();
        let title = title.unwrap_or(UNTITLED);

        self.cmd(format_args!(
            "{} {} title \"{}\" with {}",
            verb, equation, title, style
        ))?;
        self.nplots += 1;
        Ok(())
    }

    fn verb(&self) -> &'static str {
        if self.multiplot || self.nplots == 0 {
            "plot"
        } else {
            "replot"
        }
    }

    fn header(&self, titles: &[&str]) -> Result<String, Error> {
        let style = self.style.display();
        let clauses = titles
            .iter()
            .map(|title| format!("'-' title \"{}\" with {}", title, style))
            .join(", ");

        let header = format!("{} {}", self.verb(), clauses);
        if header.len() >= MAX_HEADER {
            return Err(Error::InvalidArgument(
                "plot header would exceed the line limit",
            ));
        }
        Ok(header)
    }
}

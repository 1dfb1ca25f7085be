//! Data-series shapes and their inline-data emission
//!
//! A [`Series`] is one plot call's worth of samples in one of five shapes.
//! Shapes are transient: the session serializes them into `'-'` inline data
//! blocks immediately and retains nothing.

use std::io::{self, Write};

use itertools::izip;

use crate::Error;

/// Title rendered for curves that were not given one
pub const UNTITLED: &str = "(none)";

/// One plot call's worth of numeric samples
///
/// Multi-curve shapes expand into several curves sharing one atomic plot
/// command; gnuplot then reads one inline data block per curve, each closed
/// by the `e` sentinel.
pub enum Series<'a> {
    /// A single list; x is implicit as the sample index
    X(&'a [f64]),
    /// Several equal-length lists, all sharing the implicit x
    MultiX(&'a [&'a [f64]]),
    /// Explicit (x, y) pairs
    Xy {
        /// X coordinate of the data points
        x: &'a [f64],
        /// Y coordinate of the data points
        y: &'a [f64],
    },
    /// One explicit x list shared by several y lists
    XMultiY {
        /// X coordinate shared by every curve
        x: &'a [f64],
        /// One y list per curve, each as long as `x`
        ys: &'a [&'a [f64]],
    },
    /// Independent (x, y) list pairs; curves may differ in length
    MultiXy {
        /// One x list per curve
        xs: &'a [&'a [f64]],
        /// One y list per curve, each as long as its x list
        ys: &'a [&'a [f64]],
    },
}

impl<'a> Series<'a> {
    /// Number of curves this shape expands to
    pub fn curves(&self) -> usize {
        match *self {
            Series::X(_) | Series::Xy { .. } => 1,
            Series::MultiX(d) => d.len(),
            Series::XMultiY { ys, .. } => ys.len(),
            Series::MultiXy { xs, .. } => xs.len(),
        }
    }

    /// Rejects shapes that cannot be emitted; nothing is sent on failure
    pub(crate) fn validate(&self) -> Result<(), Error> {
        match *self {
            Series::X(d) => nonempty(d),
            Series::MultiX(d) => {
                if d.is_empty() {
                    return Err(Error::InvalidArgument("series contains no curves"));
                }
                nonempty(d[0])?;
                if d.iter().any(|curve| curve.len() != d[0].len()) {
                    return Err(Error::InvalidArgument("curves must all have the same length"));
                }
                Ok(())
            }
            Series::Xy { x, y } => {
                nonempty(x)?;
                if x.len() != y.len() {
                    return Err(Error::InvalidArgument("x and y lengths differ"));
                }
                Ok(())
            }
            Series::XMultiY { x, ys } => {
                if ys.is_empty() {
                    return Err(Error::InvalidArgument("series contains no curves"));
                }
                nonempty(x)?;
                if ys.iter().any(|y| y.len() != x.len()) {
                    return Err(Error::InvalidArgument("curves must all have the same length"));
                }
                Ok(())
            }
            Series::MultiXy { xs, ys } => {
                if xs.is_empty() {
                    return Err(Error::InvalidArgument("series contains no curves"));
                }
                if xs.len() != ys.len() {
                    return Err(Error::InvalidArgument("x and y curve counts differ"));
                }
                for (x, y) in izip!(xs, ys) {
                    nonempty(x)?;
                    if x.len() != y.len() {
                        return Err(Error::InvalidArgument("x and y lengths differ"));
                    }
                }
                Ok(())
            }
        }
    }

    /// Writes the inline records of one curve, without the `e` sentinel
    ///
    /// Callers must have validated the shape; `curve` indexes into the curves
    /// counted by [`Series::curves`].
    pub(crate) fn write_curve<W>(&self, curve: usize, sink: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        match *self {
            Series::X(d) => {
                for &y in d {
                    put1(sink, y)?;
                }
            }
            Series::MultiX(d) => {
                for &y in d[curve] {
                    put1(sink, y)?;
                }
            }
            Series::Xy { x, y } => {
                for (&x, &y) in izip!(x, y) {
                    put2(sink, x, y)?;
                }
            }
            Series::XMultiY { x, ys } => {
                for (&x, &y) in izip!(x, ys[curve]) {
                    put2(sink, x, y)?;
                }
            }
            Series::MultiXy { xs, ys } => {
                for (&x, &y) in izip!(xs[curve], ys[curve]) {
                    put2(sink, x, y)?;
                }
            }
        }

        Ok(())
    }
}

/// Curve titles attached to a plot call
///
/// Anything missing renders as the literal [`UNTITLED`] placeholder, entry by
/// entry: a `Many` list may name some curves and skip others.
pub enum Titles<'a> {
    /// Every curve gets the placeholder
    Default,
    /// A title for a single-curve series
    One(&'a str),
    /// Per-curve titles; must be exactly as long as the series has curves
    Many(&'a [Option<&'a str>]),
}

impl<'a> Titles<'a> {
    /// Expands into one title per curve, or rejects a mismatched list
    pub(crate) fn resolve(&self, curves: usize) -> Result<Vec<&'a str>, Error> {
        match *self {
            Titles::Default => Ok(vec![UNTITLED; curves]),
            Titles::One(title) => {
                if curves != 1 {
                    return Err(Error::InvalidArgument(
                        "title list length does not match the curve count",
                    ));
                }
                Ok(vec![title])
            }
            Titles::Many(titles) => {
                if titles.len() != curves {
                    return Err(Error::InvalidArgument(
                        "title list length does not match the curve count",
                    ));
                }
                Ok(titles.iter().map(|t| t.unwrap_or(UNTITLED)).collect())
            }
        }
    }
}

impl<'a> From<&'a str> for Titles<'a> {
    fn from(title: &'a str) -> Titles<'a> {
        Titles::One(title)
    }
}

impl<'a> From<Option<&'a str>> for Titles<'a> {
    fn from(title: Option<&'a str>) -> Titles<'a> {
        match title {
            Some(title) => Titles::One(title),
            None => Titles::Default,
        }
    }
}

impl<'a> From<&'a [Option<&'a str>]> for Titles<'a> {
    fn from(titles: &'a [Option<&'a str>]) -> Titles<'a> {
        Titles::Many(titles)
    }
}

impl<'a> From<Option<&'a [Option<&'a str>]>> for Titles<'a> {
    fn from(titles: Option<&'a [Option<&'a str>]>) -> Titles<'a> {
        match titles {
            Some(titles) => Titles::Many(titles),
            None => Titles::Default,
        }
    }
}

fn nonempty(d: &[f64]) -> Result<(), Error> {
    if d.is_empty() {
        Err(Error::InvalidArgument("series contains no data"))
    } else {
        Ok(())
    }
}

// Fixed-width scientific notation so gnuplot's tokenizer always sees a
// well-formed float, whatever the magnitude
fn put1<W: Write>(sink: &mut W, y: f64) -> io::Result<()> {
    writeln!(sink, "{:>11.6e}", y)
}

fn put2<W: Write>(sink: &mut W, x: f64, y: f64) -> io::Result<()> {
    writeln!(sink, "{:>11.6e} {:>11.6e}", x, y)
}

#[cfg(test)]
mod test {
    use super::{Series, Titles, UNTITLED};
    use crate::Error;

    fn rejected(series: &Series) -> bool {
        matches!(series.validate(), Err(Error::InvalidArgument(_)))
    }

    #[test]
    fn curve_counts() {
        let d = [1.0, 2.0];
        let lists: &[&[f64]] = &[&d, &d, &d];

        assert_eq!(1, Series::X(&d).curves());
        assert_eq!(1, Series::Xy { x: &d, y: &d }.curves());
        assert_eq!(3, Series::MultiX(lists).curves());
        assert_eq!(3, Series::XMultiY { x: &d, ys: lists }.curves());
        assert_eq!(3, Series::MultiXy { xs: lists, ys: lists }.curves());
    }

    #[test]
    fn empty_data_is_rejected() {
        assert!(rejected(&Series::X(&[])));
        assert!(rejected(&Series::MultiX(&[])));
        assert!(rejected(&Series::MultiX(&[&[]])));
        assert!(rejected(&Series::Xy { x: &[], y: &[] }));
        assert!(rejected(&Series::XMultiY { x: &[1.0], ys: &[] }));
        assert!(rejected(&Series::MultiXy { xs: &[], ys: &[] }));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let two = [1.0, 2.0];
        let three = [1.0, 2.0, 3.0];

        assert!(rejected(&Series::Xy { x: &two, y: &three }));
        assert!(rejected(&Series::MultiX(&[&two, &three])));
        assert!(rejected(&Series::XMultiY {
            x: &two,
            ys: &[&two, &three],
        }));
        assert!(rejected(&Series::MultiXy {
            xs: &[&two],
            ys: &[&two, &three],
        }));
        assert!(rejected(&Series::MultiXy {
            xs: &[&two, &three],
            ys: &[&two, &two],
        }));
    }

    #[test]
    fn independent_lengths_are_accepted() {
        let two = [1.0, 2.0];
        let three = [1.0, 2.0, 3.0];
        let series = Series::MultiXy {
            xs: &[&two, &three],
            ys: &[&two, &three],
        };

        assert!(series.validate().is_ok());
    }

    #[test]
    fn titles_fall_back_to_the_placeholder() {
        assert_eq!(vec![UNTITLED; 2], Titles::Default.resolve(2).unwrap());
        assert_eq!(
            vec!["a", UNTITLED],
            Titles::Many(&[Some("a"), None]).resolve(2).unwrap()
        );
    }

    #[test]
    fn short_title_lists_are_rejected() {
        let titles = Titles::Many(&[Some("a")]);
        assert!(matches!(
            titles.resolve(2),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Titles::One("a").resolve(2),
            Err(Error::InvalidArgument(_))
        ));
    }
}

use crate::{Display, Style};

impl Display<&'static str> for Style {
    fn display(&self) -> &'static str {
        match *self {
            Style::Lines => "lines",
            Style::Points => "points",
            Style::LinesPoints => "linespoints",
            Style::Impulses => "impulses",
            Style::Dots => "dots",
            Style::Steps => "steps",
            Style::ErrorBars => "errorbars",
            Style::Boxes => "boxes",
            Style::BoxErrorBars => "boxerrorbars",
        }
    }
}

//! A collection of the most used traits, structs and enums

pub use crate::channel::Pipe;
pub use crate::series::{Series, Titles};
pub use crate::session::{Gnuplot, Session};
pub use crate::traits::Data;
pub use crate::{Error, Style};

//! Contains the common [`ErrorKind`] trait used by every error in the `symexpr` engine to build
//! user-facing reports, and the [`Error`] type that carries a kind together with the source
//! snippet it was raised against.
//!
//! Errors in the engine are never tied to a user-typed input (there is no parser), so each error
//! carries its own source: a short rendering of the call or value that failed, such as
//! `"x-y"` for a rejected variable name or `3/0` for a rational with a zero denominator. The spans
//! of the error point into that snippet.

extern crate self as symexpr_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display, Formatter}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// The broad class of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A value was rejected before any node was built, such as a zero denominator or an invalid
    /// variable name.
    Construction,

    /// An accessor asked for a variant other than the one that is active.
    Conversion,

    /// An arithmetic operation has no defined result, such as division by an exact zero.
    Arithmetic,

    /// A branch that exhaustive tagging should make unreachable was reached.
    Internal,
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Construction => write!(f, "construction"),
            Self::Conversion => write!(f, "conversion"),
            Self::Arithmetic => write!(f, "arithmetic"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// Represents any kind of error that can occur during some operation.
///
/// This trait is usually derived with `symexpr_attrs::ErrorKind`.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns `self` as [`Any`], so that the concrete kind can be recovered.
    fn as_any(&self) -> &dyn Any;

    /// The category this kind of error belongs to.
    fn category(&self) -> Category;

    /// The one-line message describing the error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of a source snippet that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The snippet the spans refer to.
    pub src: String,

    /// The regions of the snippet that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given source snippet, spans and kind.
    pub fn new(
        src: impl Into<String>,
        spans: Vec<Range<usize>>,
        kind: impl ErrorKind + 'static,
    ) -> Self {
        Self { src: src.into(), spans, kind: Box::new(kind) }
    }

    /// The category of the contained kind.
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Returns true if the contained kind is of type `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns a reference to the contained kind if it is of type `K`.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error against its own source snippet.
    ///
    /// The output contains ANSI color codes.
    pub fn report(&self, src_id: &str) -> String {
        let mut buf = Vec::new();
        let written = self
            .build_report(src_id)
            .write((src_id, Source::from(&self.src)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            // writing into a `Vec` can't fail, but fall back to the message just in case
            Err(_) => self.to_string(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.category(), self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use symexpr_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("`{}` is not allowed here", self.found),
        labels = ["this character"],
        help = "only letters and underscores can be used",
        category = Construction,
    )]
    struct BadChar {
        found: char,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "something impossible happened", category = Internal)]
    struct Impossible;

    #[test]
    fn display_contains_category_and_message() {
        let err = Error::new("x-y", vec![1..2], BadChar { found: '-' });
        assert_eq!(err.to_string(), "construction error: `-` is not allowed here");
        assert_eq!(err.category(), Category::Construction);
    }

    #[test]
    fn downcast_to_concrete_kind() {
        let err = Error::new("x-y", vec![1..2], BadChar { found: '-' });
        assert!(err.is::<BadChar>());
        assert!(!err.is::<Impossible>());
        assert_eq!(err.downcast_ref::<BadChar>().map(|k| k.found), Some('-'));
    }

    #[test]
    fn report_highlights_span() {
        let err = Error::new("x-y", vec![1..2], BadChar { found: '-' });
        let report = String::from_utf8(strip_ansi_escapes::strip(err.report("input"))).unwrap();
        assert!(report.contains("`-` is not allowed here"));
        assert!(report.contains("this character"));
        assert!(report.contains("only letters and underscores can be used"));
        assert!(report.contains("x-y"));
    }

    #[test]
    fn report_without_labels() {
        let err = Error::new("a / b", vec![0..5], Impossible);
        let report = String::from_utf8(strip_ansi_escapes::strip(err.report("input"))).unwrap();
        assert!(report.contains("something impossible happened"));
    }
}

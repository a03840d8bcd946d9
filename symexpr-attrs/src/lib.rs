mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::ToTokens;
use syn::parse_macro_input;

/// Derives the `symexpr_error::ErrorKind` trait for the given struct.
///
/// The information of the error is provided with the `error` attribute by adding the
/// corresponding tags to it:
///
/// ```ignore
/// use symexpr_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = "denominator cannot be zero",
///     labels = ["this denominator"],
///     category = Construction,
/// )]
/// pub struct ZeroDenominator;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error. Required.                     |
/// | `labels`    | An array of label texts, one per span of the error, in order.                |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
/// | `category`  | One of `Construction`, `Conversion`, `Arithmetic`, `Internal`. Required.     |
///
/// `message`, `labels` and `help` accept expressions. For structs with named fields, the
/// expressions are evaluated with the members of the struct in scope (tuple structs are not
/// supported). Labels without a matching span are dropped, and empty labels only highlight their
/// span.
///
/// The generated code refers to `::ariadne` and `::symexpr_error`, so both must be dependencies of
/// the crate using the derive.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    target.into_token_stream().into()
}

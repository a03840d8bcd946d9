use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    Attribute,
    Expr,
    Fields,
    Ident,
    ItemStruct,
    Result,
    Token,
};

/// The categories accepted by the `category` tag, mirroring `symexpr_error::Category`.
const CATEGORIES: [&str; 4] = ["Construction", "Conversion", "Arithmetic", "Internal"];

/// The tags that can be passed to the `error` attribute.
#[derive(Debug, Default)]
pub struct ErrorArgs {
    pub message: Option<Expr>,
    pub labels: Option<Expr>,
    pub help: Option<Expr>,
    pub category: Option<Ident>,
}

impl ErrorArgs {
    /// Parses the next `tag = value` pair in the input stream and applies it to itself.
    fn parse_arg(&mut self, input: ParseStream) -> Result<()> {
        let ident: Ident = input.parse()?;
        input.parse::<Token![=]>()?;

        let ident_str = ident.to_string();
        match ident_str.as_str() {
            "message" => self.message = Some(input.parse()?),
            "labels" => self.labels = Some(input.parse()?),
            "help" => self.help = Some(input.parse()?),
            "category" => {
                let category: Ident = input.parse()?;
                if !CATEGORIES.contains(&category.to_string().as_str()) {
                    return Err(syn::Error::new_spanned(
                        &category,
                        format!("unknown category `{}`, expected one of: {}", category, CATEGORIES.join(", ")),
                    ));
                }
                self.category = Some(category);
            },
            _ => return Err(syn::Error::new_spanned(ident, format!("unknown tag `{}`", ident_str))),
        }

        Ok(())
    }
}

impl Parse for ErrorArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = ErrorArgs::default();

        while !input.is_empty() {
            args.parse_arg(input)?;
            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(args)
    }
}

/// Creates a `let` statement that destructures `self` into its named fields, so that tag
/// expressions can refer to them directly. Returns a compile error for tuple structs.
fn destructure_fields(ident: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(fields) => {
            let fields = fields.named.iter().map(|field| {
                let field_name = field.ident.as_ref();
                quote! { #field_name }
            });
            quote! {
                #[allow(unused_variables)]
                let #ident { #(#fields),* } = self;
            }
        },
        Fields::Unnamed(_) => quote_spanned! { ident.span() => compile_error!("`ErrorKind` cannot be derived for tuple structs"); },
        Fields::Unit => quote! {},
    }
}

/// The target struct to derive `ErrorKind` for.
#[derive(Debug)]
pub struct ErrorKindTarget {
    pub name: Ident,
    pub fields: Fields,
    pub error_args: ErrorArgs,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        // outer attributes include documentation, so only the `error` attribute is inspected
        let attributes = input.call(Attribute::parse_outer)?;
        let remaining = input.parse::<ItemStruct>()?;

        let mut error_args = None;
        for attr in &attributes {
            if attr.path().is_ident("error") {
                error_args = Some(attr.parse_args::<ErrorArgs>()?);
                break;
            }
        }

        let error_args = error_args.ok_or_else(|| {
            syn::Error::new(remaining.ident.span(), "missing `#[error(...)]` attribute")
        })?;

        if error_args.message.is_none() {
            return Err(syn::Error::new(remaining.ident.span(), "the `message` tag is required"));
        }
        if error_args.category.is_none() {
            return Err(syn::Error::new(remaining.ident.span(), "the `category` tag is required"));
        }

        Ok(ErrorKindTarget {
            name: remaining.ident,
            fields: remaining.fields,
            error_args,
        })
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let name = &self.name;
        let destructure = destructure_fields(name, &self.fields);
        let message = self.error_args.message.as_ref();
        let category = self.error_args.category.as_ref();
        let labels = match self.error_args.labels.as_ref() {
            Some(labels) => quote! { #labels },
            None => quote! { <[&str; 0]>::default() },
        };
        let help = self.error_args.help.as_ref().map(|help| {
            quote! { builder.set_help(#help); }
        });

        tokens.extend(quote! {
            impl ::symexpr_error::ErrorKind for #name {
                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }

                fn category(&self) -> ::symexpr_error::Category {
                    ::symexpr_error::Category::#category
                }

                fn message(&self) -> ::std::string::String {
                    #destructure
                    ::std::string::ToString::to_string(&(#message))
                }

                fn build_report<'a>(
                    &self,
                    src_id: &'a str,
                    spans: &[::std::ops::Range<usize>],
                ) -> ::ariadne::Report<(&'a str, ::std::ops::Range<usize>)> {
                    #destructure

                    let offset = spans.first().map(|span| span.start).unwrap_or(0);
                    #[allow(unused_mut)]
                    let mut builder = ::ariadne::Report::build(::ariadne::ReportKind::Error, src_id, offset)
                        .with_message(::symexpr_error::ErrorKind::message(self))
                        .with_labels(
                            #labels
                                .into_iter()
                                .zip(spans.iter())
                                .map(|(label_str, span)| {
                                    let mut label = ::ariadne::Label::new((src_id, span.clone()))
                                        .with_color(::symexpr_error::EXPR);

                                    if !label_str.is_empty() {
                                        label = label.with_message(label_str);
                                    }

                                    label
                                })
                                .collect::<::std::vec::Vec<_>>()
                        );

                    #help
                    builder.finish()
                }
            }
        });
    }
}

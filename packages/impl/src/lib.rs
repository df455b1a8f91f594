use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Implements `Describe` and `Field`, plus `Transparent` for wrapper types.
///
/// A struct is a transparent wrapper when it carries `#[repr(transparent)]`
/// or `#[reflect(transparent)]`; it must then declare exactly one field other
/// than `PhantomData` markers. Container arguments: `transparent`,
/// `name = "..."`. Field arguments: `skip`.
#[proc_macro_derive(Describe, attributes(reflect))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    transval_lib::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

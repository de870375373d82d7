//! Procedural macros for Plant.
//!
//! Use through the `plant` crate, not directly.

use proc_macro::TokenStream;

mod model;

/// Derives `plant::Model` for a struct with named fields.
///
/// Every field gets a setter under its own name. Container attributes:
/// - `#[plant(default)]` registers `Default::default` as the zero-argument
///   constructor
/// - `#[plant(constructor = "new", params(a, b))]` registers `Self::new(a, b)`,
///   taking each parameter's type from the field of the same name
///
/// Field attributes:
/// - `#[plant(skip)]` leaves the field without a setter
/// - `#[plant(rename = "name")]` registers the setter under another name
#[proc_macro_derive(Model, attributes(plant))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    model::expand(&input)
        .unwrap_or_else(darling::Error::write_errors)
        .into()
}

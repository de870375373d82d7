use darling::util::{Ignored, PathList};
use darling::{FromDeriveInput, FromField, ast};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, Generics, Ident, Type};

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(plant), supports(struct_named))]
struct ModelOpts {
    ident: Ident,
    generics: Generics,
    data: ast::Data<Ignored, FieldOpts>,

    #[darling(default)]
    default: bool,

    #[darling(default)]
    constructor: Option<String>,

    #[darling(default)]
    params: Option<PathList>,
}

#[derive(Debug, FromField)]
#[darling(attributes(plant))]
struct FieldOpts {
    ident: Option<Ident>,
    ty: Type,

    #[darling(default)]
    skip: bool,

    #[darling(default)]
    rename: Option<String>,
}

impl FieldOpts {
    fn blueprint_name(&self, ident: &Ident) -> String {
        self.rename.clone().unwrap_or_else(|| ident.to_string())
    }
}

pub fn expand(input: &DeriveInput) -> darling::Result<TokenStream> {
    let opts = ModelOpts::from_derive_input(input)?;
    let fields = match &opts.data {
        ast::Data::Struct(fields) => &fields.fields,
        ast::Data::Enum(_) => {
            return Err(darling::Error::unsupported_shape("enum").with_span(&opts.ident));
        }
    };

    let ident = &opts.ident;
    let mut generics = opts.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!('static));
    }
    if opts.default && !opts.generics.params.is_empty() {
        let (_, self_generics, _) = opts.generics.split_for_impl();
        generics
            .make_where_clause()
            .predicates
            .push(syn::parse_quote!(#ident #self_generics: ::core::default::Default));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let default_constructor = opts.default.then(|| {
        quote! { .default_constructor(<Self as ::core::default::Default>::default) }
    });

    let setters = fields
        .iter()
        .filter(|field| !field.skip)
        .filter_map(|field| field.ident.as_ref().map(|ident| (ident, field)))
        .map(|(field_ident, field)| {
            let name = field.blueprint_name(field_ident);
            let ty = &field.ty;
            quote! {
                .field(#name, |model: &mut Self, value: #ty| model.#field_ident = value)
            }
        });

    let constructor = constructor_tokens(&opts, fields)?;

    Ok(quote! {
        impl #impl_generics ::plant::Model for #ident #ty_generics #where_clause {
            fn schema() -> ::plant::Schema<Self> {
                ::plant::Schema::new()
                    #default_constructor
                    #(#setters)*
                    #constructor
            }
        }
    })
}

fn constructor_tokens(opts: &ModelOpts, fields: &[FieldOpts]) -> darling::Result<Option<TokenStream>> {
    let Some(constructor) = &opts.constructor else {
        if opts.params.is_some() {
            return Err(darling::Error::custom("`params` requires `constructor`").with_span(&opts.ident));
        }
        return Ok(None);
    };

    let constructor = format_ident!("{}", constructor);
    let params: &[syn::Path] = opts.params.as_ref().map_or(&[], |params| params.as_slice());
    if params.is_empty() {
        return Err(
            darling::Error::custom("a constructor needs at least one parameter in `params(..)`")
                .with_span(&opts.ident),
        );
    }

    let mut errors = darling::Error::accumulator();
    let mut names = Vec::with_capacity(params.len());
    let mut bindings = Vec::with_capacity(params.len());
    let mut types = Vec::with_capacity(params.len());

    for path in params {
        let Some(param) = path.get_ident() else {
            errors.push(darling::Error::custom("expected a field name").with_span(path));
            continue;
        };

        let field = fields
            .iter()
            .find(|field| field.ident.as_ref().is_some_and(|ident| ident == param));
        match field {
            Some(field) => {
                names.push(param.to_string());
                bindings.push(param.clone());
                types.push(field.ty.clone());
            }
            None => errors.push(
                darling::Error::custom(format!("no field named `{param}`")).with_span(param),
            ),
        }
    }
    errors.finish()?;

    Ok(Some(quote! {
        .constructor(
            [#(#names),*],
            |(#(#bindings,)*): (#(#types,)*)| Self::#constructor(#(#bindings),*),
        )
    }))
}

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type, parse_macro_input, spanned::Spanned};

#[proc_macro_derive(Model, attributes(model, column))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_model(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[proc_macro_derive(Class, attributes(class))]
pub fn derive_class(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_class(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_model(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            input.generics,
            "Model does not support generic structs",
        ));
    }

    let model_options = parse_model_options(&input.attrs)?;

    let data_struct = match input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new(
                struct_name.span(),
                "Model can only be derived for structs",
            ));
        }
    };

    let named_fields = match data_struct.fields {
        Fields::Named(fields) => fields,
        _ => {
            return Err(syn::Error::new(
                struct_name.span(),
                "Model requires named fields",
            ));
        }
    };

    let mut column_names = Vec::<String>::new();
    let mut column_exprs = Vec::<TokenStream2>::new();
    let mut attribute_arms = Vec::<TokenStream2>::new();

    for field in named_fields.named {
        let span = field.span();
        let ident: Ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(span, "Model requires named fields"))?;
        let options = parse_column_options(&field.attrs)?;
        if options.skip {
            continue;
        }

        let field_ty: Type = field.ty;
        let column_name = options
            .name
            .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string());
        if column_names.contains(&column_name) {
            return Err(syn::Error::new(
                span,
                format!("Duplicate column name '{column_name}'"),
            ));
        }

        let primary_key = options.primary_key;
        column_exprs.push(quote! {
            {
                let column = ::memoform::Column::new(
                    #column_name,
                    <#field_ty as ::memoform::ColumnValue>::data_type(),
                );
                let column = if <#field_ty as ::memoform::ColumnValue>::nullable() {
                    column
                } else {
                    column.not_null()
                };
                if #primary_key { column.primary_key() } else { column }
            }
        });
        attribute_arms.push(quote! {
            #column_name => ::std::result::Result::Ok(
                ::memoform::ColumnValue::to_value(&self.#ident)
            ),
        });
        column_names.push(column_name);
    }

    if column_names.is_empty() {
        return Err(syn::Error::new(
            struct_name.span(),
            "Model requires at least one column",
        ));
    }

    let table_name = model_options
        .table_name
        .unwrap_or_else(|| to_snake_case(&struct_name.to_string()));

    let translations_method = match model_options.translation {
        Some(translation) => {
            let translated = model_options.translated;
            quote! {
                fn translations() -> ::std::option::Option<::memoform::Translations> {
                    ::std::option::Option::Some(::memoform::Translations::new(
                        <#translation as ::memoform::Model>::table,
                        [#(#translated),*],
                    ))
                }
            }
        }
        None => quote! {},
    };

    Ok(quote! {
        impl ::memoform::Entity for #struct_name {
            fn attribute(&self, name: &str) -> ::memoform::Result<::memoform::Value> {
                match name {
                    #(#attribute_arms)*
                    other => ::std::result::Result::Err(
                        ::memoform::FormError::attribute_not_found(stringify!(#struct_name), other)
                    ),
                }
            }
        }

        impl ::memoform::Model for #struct_name {
            fn table() -> ::memoform::Table {
                ::memoform::Table::new(#table_name, vec![#(#column_exprs),*])
            }

            #translations_method
        }
    })
}

fn expand_class(input: DeriveInput) -> syn::Result<TokenStream2> {
    let type_name = input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            input.generics,
            "Class does not support generic types",
        ));
    }

    let bases = parse_class_bases(&input.attrs)?;

    Ok(quote! {
        impl ::memoform::Class for #type_name {
            fn class() -> ::memoform::ClassRef {
                const BASES: &[fn() -> ::memoform::ClassRef] = &[
                    #(<#bases as ::memoform::Class>::class),*
                ];
                ::memoform::ClassRef::new::<Self>(stringify!(#type_name), BASES)
            }
        }
    })
}

struct ModelOptions {
    table_name: Option<String>,
    translation: Option<syn::Path>,
    translated: Vec<String>,
}

#[derive(Default)]
struct ColumnOptions {
    primary_key: bool,
    skip: bool,
    name: Option<String>,
}

fn to_snake_case(value: &str) -> String {
    let mut out = String::new();
    for (idx, ch) in value.chars().enumerate() {
        if ch.is_uppercase() {
            if idx > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn parse_model_options(attrs: &[syn::Attribute]) -> syn::Result<ModelOptions> {
    let mut options = ModelOptions {
        table_name: None,
        translation: None,
        translated: Vec::new(),
    };

    for attr in attrs {
        if !attr.path().is_ident("model") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let value = meta.value()?;
                let lit: LitStr = value.parse()?;
                options.table_name = Some(lit.value());
                return Ok(());
            }

            if meta.path.is_ident("translation") {
                let value = meta.value()?;
                options.translation = Some(value.parse()?);
                return Ok(());
            }

            if meta.path.is_ident("translated") {
                let value = meta.value()?;
                let lit: LitStr = value.parse()?;
                options.translated.extend(
                    lit.value()
                        .split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string),
                );
                return Ok(());
            }

            Err(meta.error(
                "Unsupported model attribute. Supported: table = \"...\", translation = Type, translated = \"a, b\"",
            ))
        })?;
    }

    if let Some(path) = &options.translation {
        if options.translated.is_empty() {
            return Err(syn::Error::new(
                path.span(),
                "#[model(translation = ...)] requires translated = \"...\"",
            ));
        }
    } else if !options.translated.is_empty() {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[model(translated = ...)] requires translation = Type",
        ));
    }

    Ok(options)
}

fn parse_column_options(attrs: &[syn::Attribute]) -> syn::Result<ColumnOptions> {
    let mut options = ColumnOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("column") {
            continue;
        }

        match &attr.meta {
            syn::Meta::Path(_) => {}
            syn::Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("primary_key") {
                        options.primary_key = true;
                        return Ok(());
                    }

                    if meta.path.is_ident("skip") {
                        options.skip = true;
                        return Ok(());
                    }

                    if meta.path.is_ident("name") {
                        let value = meta.value()?;
                        let lit: LitStr = value.parse()?;
                        options.name = Some(lit.value());
                        return Ok(());
                    }

                    Err(meta.error(
                        "Unsupported #[column(...)] option. Supported: primary_key, skip, name = \"...\"",
                    ))
                })?;
            }
            syn::Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "Unsupported #[column = ...] syntax. Use #[column(primary_key)], #[column(skip)], #[column(name = \"...\")]",
                ));
            }
        }

        if options.skip && (options.primary_key || options.name.is_some()) {
            return Err(syn::Error::new(
                attr.span(),
                "#[column(skip)] cannot be combined with other column options",
            ));
        }
    }

    Ok(options)
}

fn parse_class_bases(attrs: &[syn::Attribute]) -> syn::Result<Vec<syn::Path>> {
    let mut bases = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("class") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("extends") {
                return Err(meta.error(
                    "Unsupported class attribute. Supported: extends = Base, extends(A, B)",
                ));
            }

            if meta.input.peek(syn::Token![=]) {
                let value = meta.value()?;
                bases.push(value.parse::<syn::Path>()?);
                return Ok(());
            }

            meta.parse_nested_meta(|base| {
                bases.push(base.path.clone());
                Ok(())
            })
        })?;
    }

    Ok(bases)
}

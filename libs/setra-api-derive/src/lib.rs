use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Derive macro for settings-group declarations.
///
/// Generates a `setra_api::SettingsGroup` impl for the annotated struct:
///
/// - `definitions()` — one `SettingDefinition` per field, in declaration order.
/// - `fields()` — typed accessors over the same fields, same order.
///
/// Every field type must implement `setra_api::SettingType` (`bool`, `i64`,
/// `u64`, `f64`, `String`, the chrono temporal types, and `Option` of any of
/// them). All `#[setting(...)]` keys are optional:
///
/// - `name` — storage key (defaults to the field identifier)
/// - `serializer` — registry identifier of a custom serializer
/// - `default` — serialized default value
/// - `description` — human-readable description
///
/// # Example
///
/// ```ignore
/// #[derive(Settings, Default)]
/// pub struct PageSettings {
///     #[setting(description = "Items per page")]
///     pub page_size: i64,
///
///     #[setting(name = "page.title", serializer = "json")]
///     pub title: Option<String>,
/// }
/// ```
#[proc_macro_derive(Settings, attributes(setting))]
pub fn derive_settings(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Settings only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Settings only supports structs",
            ))
        }
    };

    let mut definition_tokens = Vec::new();
    let mut field_tokens = Vec::new();

    for field in fields {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let field_ty = &field.ty;

        // Parse #[setting(...)] attribute; every key is optional.
        let mut key = field_name.to_string();
        let mut serializer: Option<String> = None;
        let mut default: Option<String> = None;
        let mut description = String::new();

        for attr in &field.attrs {
            if !attr.path().is_ident("setting") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    key = value.value();
                } else if meta.path.is_ident("serializer") {
                    let value: LitStr = meta.value()?.parse()?;
                    serializer = Some(value.value());
                } else if meta.path.is_ident("default") {
                    let value: LitStr = meta.value()?.parse()?;
                    default = Some(value.value());
                } else if meta.path.is_ident("description") {
                    let value: LitStr = meta.value()?.parse()?;
                    description = value.value();
                } else {
                    return Err(meta.error(
                        "unknown setting key (expected name, serializer, default, description)",
                    ));
                }
                Ok(())
            })?;
        }

        let serializer_expr = match &serializer {
            Some(id) => quote! { Some(#id.to_string()) },
            None => quote! { None },
        };
        let default_expr = match &default {
            Some(v) => quote! { Some(#v.to_string()) },
            None => quote! { None },
        };

        definition_tokens.push(quote! {
            setra_api::definition::SettingDefinition {
                name: #key.to_string(),
                field_type: <#field_ty as setra_api::slot::SettingType>::field_type(),
                serializer: #serializer_expr,
                default: #default_expr,
                description: #description.to_string(),
            }
        });

        field_tokens.push(quote! {
            out.push(Box::new(setra_api::slot::TypedSlot::new(#key, &mut self.#field_name)));
        });
    }

    let expanded = quote! {
        impl setra_api::definition::SettingsGroup for #name {
            fn definitions() -> Vec<setra_api::definition::SettingDefinition> {
                vec![
                    #(#definition_tokens),*
                ]
            }

            fn fields(&mut self) -> Vec<Box<dyn setra_api::slot::SettingField + '_>> {
                let mut out: Vec<Box<dyn setra_api::slot::SettingField + '_>> = Vec::new();
                #(#field_tokens)*
                out
            }
        }
    };

    Ok(TokenStream::from(expanded))
}

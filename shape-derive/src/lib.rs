//! `#[derive(Shape)]` records the structure of a type and its `#[shape(...)]`
//! markers so the compatibility verifier can inspect it at runtime.
//!
//! Type level: `#[shape(object)]`, `#[shape(object(keys_as_names))]`,
//! `#[shape(enclosed_in = "Outer")]`.
//! Field level: `#[shape(key = 0)]`, `#[shape(key = "name")]`, `#[shape(ignore)]`.
//! Variant level: `#[shape(union_key = 0)]`.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Lit, LitStr, Visibility};

#[proc_macro_derive(Shape, attributes(shape))]
pub fn derive_shape(input: TokenStream) -> TokenStream {
  let input = parse_macro_input!(input as DeriveInput);
  expand(input).unwrap_or_else(|err| err.to_compile_error()).into()
}

#[derive(Default)]
struct TypeAttrs {
  object: bool,
  keys_as_names: bool,
  enclosing: Option<String>,
}

#[derive(Default)]
struct FieldAttrs {
  key: Option<TokenStream2>,
  ignored: bool,
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
  let name = &input.ident;
  let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
  let type_attrs = parse_type_attrs(&input.attrs)?;

  let visibility = match input.vis {
    Visibility::Public(_) => quote!(::stratum_core_rs::shape::Visibility::Public),
    _ => quote!(::stratum_core_rs::shape::Visibility::Restricted),
  };
  let enclosing = match &type_attrs.enclosing {
    Some(outer) => quote!(::core::option::Option::Some(#outer)),
    None => quote!(::core::option::Option::None),
  };
  let object = if type_attrs.object {
    let keys_as_names = type_attrs.keys_as_names;
    quote!(::core::option::Option::Some(::stratum_core_rs::shape::ObjectMarker { keys_as_names: #keys_as_names }))
  } else {
    quote!(::core::option::Option::None)
  };

  let kind = match &input.data {
    Data::Struct(data) => {
      let members = members_of(&data.fields)?;
      quote!(::stratum_core_rs::shape::ShapeKind::Struct(::std::vec![#(#members),*]))
    }
    Data::Enum(data) => {
      let mut cases = Vec::with_capacity(data.variants.len());
      for variant in &data.variants {
        let variant_name = LitStr::new(&variant.ident.to_string(), variant.ident.span());
        let key = parse_union_key(&variant.attrs)?;
        let key = match key {
          Some(key) => quote!(::core::option::Option::Some(#key)),
          None => quote!(::core::option::Option::None),
        };
        let subtype = match &variant.fields {
          Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
            let ty = &fields.unnamed[0].ty;
            quote! {
              ::core::option::Option::Some(
                <#ty as ::stratum_core_rs::shape::Shape>::shape as fn() -> ::stratum_core_rs::shape::TypeShape
              )
            }
          }
          _ => quote!(::core::option::Option::None),
        };
        cases.push(quote! {
          ::stratum_core_rs::shape::UnionCase {
            variant: #variant_name,
            key: #key,
            subtype: #subtype,
          }
        });
      }
      quote!(::stratum_core_rs::shape::ShapeKind::Union(::std::vec![#(#cases),*]))
    }
    Data::Union(data) => {
      return Err(syn::Error::new(
        data.union_token.span,
        "Shape cannot be derived for untagged unions",
      ));
    }
  };

  let type_name = LitStr::new(&name.to_string(), name.span());
  Ok(quote! {
    impl #impl_generics ::stratum_core_rs::shape::Shape for #name #ty_generics #where_clause {
      fn shape() -> ::stratum_core_rs::shape::TypeShape {
        ::stratum_core_rs::shape::TypeShape {
          name: #type_name,
          visibility: #visibility,
          enclosing: #enclosing,
          object: #object,
          kind: #kind,
        }
      }
    }
  })
}

fn members_of(fields: &Fields) -> syn::Result<Vec<TokenStream2>> {
  let mut members = Vec::new();
  for (index, field) in fields.iter().enumerate() {
    let member_name = match &field.ident {
      Some(ident) => LitStr::new(&ident.to_string(), ident.span()),
      None => LitStr::new(&index.to_string(), Span::call_site()),
    };
    let attrs = parse_field_attrs(&field.attrs)?;
    let key = match attrs.key {
      Some(key) => quote!(::core::option::Option::Some(#key)),
      None => quote!(::core::option::Option::None),
    };
    let ignored = attrs.ignored;
    members.push(quote! {
      ::stratum_core_rs::shape::MemberShape {
        name: #member_name,
        key: #key,
        ignored: #ignored,
      }
    });
  }
  Ok(members)
}

fn shape_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
  attrs.iter().filter(|attr| attr.path().is_ident("shape"))
}

fn parse_type_attrs(attrs: &[Attribute]) -> syn::Result<TypeAttrs> {
  let mut out = TypeAttrs::default();
  for attr in shape_attrs(attrs) {
    attr.parse_nested_meta(|meta| {
      if meta.path.is_ident("object") {
        out.object = true;
        if meta.input.peek(syn::token::Paren) {
          meta.parse_nested_meta(|option| {
            if option.path.is_ident("keys_as_names") {
              out.keys_as_names = true;
              Ok(())
            } else {
              Err(option.error("unsupported object option"))
            }
          })?;
        }
        Ok(())
      } else if meta.path.is_ident("enclosed_in") {
        let outer: LitStr = meta.value()?.parse()?;
        out.enclosing = Some(outer.value());
        Ok(())
      } else {
        Err(meta.error("unsupported type-level shape attribute"))
      }
    })?;
  }
  Ok(out)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
  let mut out = FieldAttrs::default();
  for attr in shape_attrs(attrs) {
    attr.parse_nested_meta(|meta| {
      if meta.path.is_ident("ignore") {
        out.ignored = true;
        Ok(())
      } else if meta.path.is_ident("key") {
        let lit: Lit = meta.value()?.parse()?;
        out.key = Some(match lit {
          Lit::Int(index) => {
            let index: u32 = index.base10_parse()?;
            quote!(::stratum_core_rs::shape::MemberKey::Index(#index))
          }
          Lit::Str(name) => quote!(::stratum_core_rs::shape::MemberKey::Name(#name)),
          other => return Err(syn::Error::new(other.span(), "key must be an integer or a string")),
        });
        Ok(())
      } else {
        Err(meta.error("unsupported field-level shape attribute"))
      }
    })?;
  }
  Ok(out)
}

fn parse_union_key(attrs: &[Attribute]) -> syn::Result<Option<u32>> {
  let mut key = None;
  for attr in shape_attrs(attrs) {
    attr.parse_nested_meta(|meta| {
      if meta.path.is_ident("union_key") {
        let lit: syn::LitInt = meta.value()?.parse()?;
        key = Some(lit.base10_parse::<u32>()?);
        Ok(())
      } else {
        Err(meta.error("unsupported variant-level shape attribute"))
      }
    })?;
  }
  Ok(key)
}

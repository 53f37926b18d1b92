//! `#[derive(Sanitize)]` expansion.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Generics, LitStr, Token, parse_macro_input, parse_quote};

pub fn derive_sanitize(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	match expand(&input) {
		Ok(tokens) => tokens.into(),
		Err(err) => err.to_compile_error().into(),
	}
}

/// Parsed `#[sanitag(...)]` attributes of a single field.
#[derive(Default)]
struct FieldAttrs {
	skip: bool,
	annotations: Vec<(String, String)>,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
	let Data::Struct(data) = &input.data else {
		return Err(syn::Error::new_spanned(
			input,
			"Sanitize can only be derived for structs",
		));
	};

	let name = &input.ident;
	let type_name = name.to_string();

	let mut field_defs = Vec::new();
	let mut match_arms = Vec::new();
	let mut nested_arms = Vec::new();

	for (position, field) in data.fields.iter().enumerate() {
		let attrs = parse_field_attrs(field)?;
		if attrs.skip {
			continue;
		}

		let index = field_defs.len();
		let (label, member) = match &field.ident {
			Some(ident) => (ident.unraw().to_string(), quote! { #ident }),
			None => {
				let member = syn::Index::from(position);
				(position.to_string(), quote! { #member })
			}
		};

		let annotations = attrs.annotations.iter().map(|(name, argument)| {
			quote! { ::sanitag::Annotation { name: #name, argument: #argument } }
		});
		field_defs.push(quote! {
			::sanitag::FieldDef {
				name: #label,
				annotations: &[#(#annotations),*],
			}
		});
		match_arms.push(quote! {
			#index => ::sanitag::AsField::as_field(&self.#member)
		});
		let ty = &field.ty;
		nested_arms.push(quote! {
			#index => <#ty as ::sanitag::AsField>::NESTED
		});
	}

	let generics = add_trait_bounds(input.generics.clone());
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

	Ok(quote! {
		impl #impl_generics ::sanitag::Record for #name #ty_generics #where_clause {
			fn schema(&self) -> &'static ::sanitag::Schema {
				static SCHEMA: ::sanitag::Schema = ::sanitag::Schema {
					type_name: #type_name,
					fields: &[#(#field_defs),*],
				};
				&SCHEMA
			}

			fn field(&self, index: usize) -> ::sanitag::FieldRef<'_> {
				match index {
					#(#match_arms,)*
					_ => ::sanitag::FieldRef::Absent,
				}
			}

			fn is_nested(&self, index: usize) -> bool {
				match index {
					#(#nested_arms,)*
					_ => false,
				}
			}
		}

		impl #impl_generics ::sanitag::AsField for #name #ty_generics #where_clause {
			const NESTED: bool = true;

			fn as_field(&self) -> ::sanitag::FieldRef<'_> {
				::sanitag::FieldRef::Record(self)
			}
		}
	})
}

fn parse_field_attrs(field: &Field) -> syn::Result<FieldAttrs> {
	let mut attrs = FieldAttrs::default();

	for attr in field.attrs.iter().filter(|a| a.path().is_ident("sanitag")) {
		attr.parse_nested_meta(|meta| {
			let Some(ident) = meta.path.get_ident() else {
				return Err(meta.error("expected an annotation name"));
			};
			let name = ident.unraw().to_string();

			if name == "skip" {
				if meta.input.peek(Token![=]) {
					return Err(meta.error("`skip` takes no argument"));
				}
				attrs.skip = true;
				return Ok(());
			}

			let argument = if meta.input.peek(Token![=]) {
				let lit: LitStr = meta.value()?.parse()?;
				lit.value()
			} else {
				String::new()
			};

			if attrs.annotations.iter().any(|(existing, _)| *existing == name) {
				return Err(meta.error(format!("duplicate annotation `{name}`")));
			}
			attrs.annotations.push((name, argument));
			Ok(())
		})?;
	}

	Ok(attrs)
}

fn add_trait_bounds(mut generics: Generics) -> Generics {
	for param in generics.type_params_mut() {
		param.bounds.push(parse_quote!(::sanitag::AsField));
	}
	generics
}

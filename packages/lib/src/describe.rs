use crate::{
    ast::{ContainerAttrs, FieldAttrs},
    utils::{is_marker, member_name},
};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, Data, DeriveInput, Member, Result, Type};

enum Storage {
    Backing,
    Marker,
}

struct MemberDef<'a> {
    member: Member,
    ty: &'a Type,
    storage: Storage,
}

impl MemberDef<'_> {
    fn to_member_tokens(&self, transparent: bool) -> TokenStream {
        let name = member_name(&self.member);
        match self.storage {
            Storage::Backing if !transparent => quote!(::transval::Member::stored(#name)),
            Storage::Backing => {
                let member = &self.member;
                let ty = self.ty;
                quote!(::transval::Member::backing(
                    #name,
                    <#ty as ::transval::Field>::classifier,
                    |this| {
                        this.downcast_ref::<Self>()
                            .and_then(|this| ::transval::Field::read(&this.#member))
                    },
                ))
            }
            Storage::Marker => quote!(::transval::Member::marker(#name)),
        }
    }
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let attrs = ContainerAttrs::from_attrs(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "only struct is supported now",
            ))
        }
    };
    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "lifetime parameters are not supported",
        ));
    }

    let mut members = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        if FieldAttrs::from_attrs(&field.attrs)?.skip {
            continue;
        }
        let member = field
            .ident
            .clone()
            .map(Member::Named)
            .unwrap_or_else(|| Member::Unnamed(i.into()));
        let storage = if is_marker(&field.ty) {
            Storage::Marker
        } else {
            Storage::Backing
        };
        members.push(MemberDef {
            member,
            ty: &field.ty,
            storage,
        });
    }

    let backing = members
        .iter()
        .filter(|def| matches!(def.storage, Storage::Backing))
        .collect::<Vec<_>>();
    let inner = match (attrs.transparent, backing.as_slice()) {
        (false, _) => None,
        (true, [inner]) => Some(*inner),
        (true, _) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "a transparent wrapper must declare exactly one backing field",
            ))
        }
    };

    // Only the backing field of a wrapper is ever read.
    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::core::marker::Send));
        param.bounds.push(parse_quote!(::core::marker::Sync));
        param.bounds.push(parse_quote!('static));
    }
    if let Some(MemberDef { ty, .. }) = inner {
        generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(#ty: ::transval::Field));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let name = &input.ident;
    let transparent = attrs.transparent;

    let type_name = attrs.name.map(|name| {
        quote!(
            fn type_name() -> &'static str {
                #name
            }
        )
    });
    let member_tokens = members.iter().map(|def| def.to_member_tokens(transparent));
    let mut tokens = quote!(
        impl #impl_generics ::transval::Describe for #name #ty_generics #where_clause {
            #type_name

            fn is_transparent()
                -> ::core::result::Result<bool, ::transval::IntrospectError>
            {
                ::core::result::Result::Ok(#transparent)
            }

            fn members() -> ::std::vec::Vec<::transval::Member> {
                ::std::vec![#(#member_tokens),*]
            }
        }

        impl #impl_generics ::transval::Field for #name #ty_generics #where_clause {
            fn classifier() -> ::transval::TypeHandle {
                ::transval::TypeHandle::of::<Self>()
            }

            fn read(&self) -> ::core::option::Option<&dyn ::transval::Reflect> {
                ::core::option::Option::Some(self)
            }
        }
    );

    if let Some(MemberDef { member, ty, .. }) = inner {
        tokens.extend(quote!(
            impl #impl_generics ::transval::Transparent for #name #ty_generics #where_clause {
                type Inner = #ty;

                fn inner(&self) -> &Self::Inner {
                    &self.#member
                }

                fn into_inner(self) -> Self::Inner {
                    self.#member
                }
            }
        ));
    }

    Ok(tokens)
}

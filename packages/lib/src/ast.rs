use crate::kw;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute, LitStr, Meta, NestedMeta, Result, Token,
};

pub enum ContainerArg {
    Transparent,
    Name { name_token: kw::name, value: LitStr },
}

impl Parse for ContainerArg {
    fn parse(input: ParseStream) -> Result<Self> {
        let lookahead = input.lookahead1();
        if lookahead.peek(kw::transparent) {
            input.parse::<kw::transparent>()?;
            Ok(ContainerArg::Transparent)
        } else if lookahead.peek(kw::name) {
            let name_token = input.parse()?;
            input.parse::<Token![=]>()?;
            Ok(ContainerArg::Name {
                name_token,
                value: input.parse()?,
            })
        } else {
            Err(lookahead.error())
        }
    }
}

pub enum FieldArg {
    Skip,
}

impl Parse for FieldArg {
    fn parse(input: ParseStream) -> Result<Self> {
        let lookahead = input.lookahead1();
        if lookahead.peek(kw::skip) {
            input.parse::<kw::skip>()?;
            Ok(FieldArg::Skip)
        } else {
            Err(lookahead.error())
        }
    }
}

#[derive(Default)]
pub struct ContainerAttrs {
    pub transparent: bool,
    pub name: Option<LitStr>,
}

impl ContainerAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path.is_ident("repr") {
                this.transparent |= is_repr_transparent(attr)?;
            } else if attr.path.is_ident("reflect") {
                for arg in parse_args::<ContainerArg>(attr)? {
                    match arg {
                        ContainerArg::Transparent => this.transparent = true,
                        ContainerArg::Name { name_token, value } => {
                            if this.name.is_some() {
                                return Err(syn::Error::new_spanned(
                                    name_token,
                                    "duplicate `name` argument",
                                ));
                            }
                            this.name = Some(value);
                        }
                    }
                }
            }
        }
        Ok(this)
    }
}

#[derive(Default)]
pub struct FieldAttrs {
    pub skip: bool,
}

impl FieldAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut this = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path.is_ident("reflect")) {
            for arg in parse_args::<FieldArg>(attr)? {
                match arg {
                    FieldArg::Skip => this.skip = true,
                }
            }
        }
        Ok(this)
    }
}

fn parse_args<T: Parse>(attr: &Attribute) -> Result<Punctuated<T, Token![,]>> {
    attr.parse_args_with(Punctuated::parse_terminated)
}

fn is_repr_transparent(attr: &Attribute) -> Result<bool> {
    Ok(match attr.parse_meta()? {
        Meta::List(list) => list.nested.iter().any(|nested| {
            matches!(nested, NestedMeta::Meta(Meta::Path(path)) if path.is_ident("transparent"))
        }),
        _ => false,
    })
}

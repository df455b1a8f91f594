use syn::{ext::IdentExt, Member, Type};

/// Zero-sized marker types: `PhantomData<_>` under any path, and `()`.
pub fn is_marker(ty: &Type) -> bool {
    match ty {
        Type::Path(ty) => ty
            .path
            .segments
            .last()
            .map(|t| t.ident == "PhantomData")
            .unwrap_or(false),
        Type::Tuple(ty) => ty.elems.is_empty(),
        Type::Paren(ty) => is_marker(&ty.elem),
        Type::Group(ty) => is_marker(&ty.elem),
        _ => false,
    }
}

pub fn member_name(member: &Member) -> String {
    match member {
        Member::Named(ident) => ident.unraw().to_string(),
        Member::Unnamed(index) => index.index.to_string(),
    }
}

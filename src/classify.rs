use crate::{IntrospectError, TypeHandle};
use log::debug;

/// Returns `true` if `ty` is a transparent single-field wrapper.
///
/// A failing capability query never reaches the caller: every
/// [`IntrospectError`] is read as "not a wrapper".
pub fn is_transparent(ty: TypeHandle) -> bool {
    match ty.query_transparent() {
        Ok(transparent) => transparent,
        Err(err @ IntrospectError::Internal(_))
        | Err(err @ IntrospectError::Unsupported)
        | Err(err @ IntrospectError::Incomplete) => {
            debug!("classifying `{ty}` as opaque: {err}");
            false
        }
    }
}

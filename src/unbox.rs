use crate::{is_transparent, AccessorCache, BackingAccessor, Describe, Reflect, TypeHandle};
use log::{trace, warn};

/// Declared return type of a call site.
///
/// The classifier is what the signature says the value logically is,
/// regardless of how the value is represented at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReturnContract {
    classifier: TypeHandle,
}

impl ReturnContract {
    pub fn new(classifier: TypeHandle) -> Self {
        Self { classifier }
    }

    pub fn of<T: Describe>() -> Self {
        Self::new(TypeHandle::of::<T>())
    }

    pub fn classifier(&self) -> TypeHandle {
        self.classifier
    }
}

/// Unwraps transparent wrappers through an [`AccessorCache`].
#[derive(Debug, Clone, Copy)]
pub struct Unboxer<'c> {
    cache: &'c AccessorCache,
}

impl Unboxer<'static> {
    /// An unboxer over the process-wide cache.
    pub fn global() -> Self {
        Self::new(AccessorCache::global())
    }
}

impl<'c> Unboxer<'c> {
    pub fn new(cache: &'c AccessorCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &'c AccessorCache {
        self.cache
    }

    pub fn is_transparent(&self, ty: TypeHandle) -> bool {
        is_transparent(ty)
    }

    /// Accessor of `ty` if it is a wrapper whose backing field resolves.
    fn accessor(&self, ty: TypeHandle) -> Option<BackingAccessor> {
        if !is_transparent(ty) {
            return None;
        }
        match self.cache.resolve_transparent(ty) {
            Ok(accessor) => Some(accessor),
            Err(err) => {
                warn!("treating `{ty}` as opaque: {err}");
                None
            }
        }
    }

    /// Unwraps `value` down to its innermost non-wrapper value.
    ///
    /// Absent values pass through, and so does any absent link in the chain.
    pub fn unwrap_fully<'a>(&self, value: Option<&'a dyn Reflect>) -> Option<&'a dyn Reflect> {
        let mut current = value?;
        while let Some(accessor) = self.accessor(current.type_handle()) {
            trace!("unwrapping `{}` via `{}`", accessor.owner(), accessor.name());
            current = accessor.read_unchecked(current)?;
        }
        Some(current)
    }

    /// Extracts one level of a wrapper; anything else is returned unchanged.
    ///
    /// The result may itself be a wrapper.
    pub fn boxed_value<'a>(&self, value: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        match self.accessor(value.type_handle()) {
            Some(accessor) => accessor.read_unchecked(value),
            None => Some(value),
        }
    }

    /// Unwraps `value` one level only if the call site declares exactly the
    /// wrapper type `value` has at runtime.
    ///
    /// A call site without a resolvable contract never unwraps.
    pub fn maybe_unwrap_for_return<'a>(
        &self,
        value: &'a dyn Reflect,
        contract: Option<&ReturnContract>,
    ) -> Option<&'a dyn Reflect> {
        let ty = value.type_handle();
        if !is_transparent(ty) {
            return Some(value);
        }
        match contract {
            Some(contract) if contract.classifier() == ty => self.boxed_value(value),
            _ => Some(value),
        }
    }

    /// Declared type of the backing field of `ty`, or `ty` itself when it is
    /// not a wrapper.
    ///
    /// The returned type may itself be a wrapper.
    pub fn boxed_class(&self, ty: TypeHandle) -> TypeHandle {
        self.accessor(ty)
            .map_or(ty, |accessor| accessor.field_type())
    }

    /// Repeats [`boxed_class`](Self::boxed_class) until reaching a non-wrapper.
    pub fn innermost_class(&self, mut ty: TypeHandle) -> TypeHandle {
        while let Some(accessor) = self.accessor(ty) {
            ty = accessor.field_type();
        }
        ty
    }
}

use crate::{is_transparent, reflect::ReadFn, Member, Reflect, Result, TypeHandle, UnwrapError};
use dashmap::DashMap;
use log::trace;
use once_cell::sync::Lazy;
use std::fmt;

static GLOBAL: Lazy<AccessorCache> = Lazy::new(AccessorCache::new);

/// Resolved reader of a wrapper's sole backing field.
#[derive(Clone, Copy)]
pub struct BackingAccessor {
    owner: TypeHandle,
    name: &'static str,
    field_type: TypeHandle,
    read: ReadFn,
}

impl BackingAccessor {
    /// Picks the first declared member with backing storage.
    fn introspect(owner: TypeHandle) -> Result<Self> {
        owner
            .members()
            .into_iter()
            .find(Member::has_backing_storage)
            .and_then(|member| match (member.classifier, member.read) {
                (Some(classifier), Some(read)) => Some(Self {
                    owner,
                    name: member.name,
                    field_type: classifier(),
                    read,
                }),
                _ => None,
            })
            .ok_or(UnwrapError::MissingBackingField { ty: owner })
    }

    pub fn owner(&self) -> TypeHandle {
        self.owner
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared classifier type of the backing field.
    pub fn field_type(&self) -> TypeHandle {
        self.field_type
    }

    /// Reads the backing field of `value`, `None` when the field is absent.
    pub fn read<'a>(&self, value: &'a dyn Reflect) -> Result<Option<&'a dyn Reflect>> {
        let found = value.type_handle();
        if found != self.owner {
            return Err(UnwrapError::TypeMismatch {
                expected: self.owner,
                found,
            });
        }
        Ok(self.read_unchecked(value))
    }

    pub(crate) fn read_unchecked<'a>(&self, value: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        (self.read)(value)
    }
}

impl fmt::Debug for BackingAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackingAccessor")
            .field("owner", &self.owner)
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .finish()
    }
}

/// Registry of backing accessors keyed by wrapper type.
///
/// Entries are never evicted. Concurrent first-time resolutions of the same
/// type may each introspect it; the first one stored wins and every caller
/// gets that accessor back.
#[derive(Default)]
pub struct AccessorCache {
    accessors: DashMap<TypeHandle, BackingAccessor>,
}

impl AccessorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Resolves the backing accessor of a wrapper type.
    ///
    /// Fails with [`UnwrapError::NotTransparent`] when `ty` is not a
    /// transparent wrapper, which means the caller skipped classification.
    pub fn resolve(&self, ty: TypeHandle) -> Result<BackingAccessor> {
        if !is_transparent(ty) {
            return Err(UnwrapError::NotTransparent { ty });
        }
        self.resolve_transparent(ty)
    }

    /// Same as [`resolve`](Self::resolve) for a type already classified.
    pub(crate) fn resolve_transparent(&self, ty: TypeHandle) -> Result<BackingAccessor> {
        if let Some(accessor) = self.accessors.get(&ty) {
            trace!("accessor cache hit for `{ty}`");
            return Ok(*accessor);
        }
        let resolved = BackingAccessor::introspect(ty)?;
        trace!(
            "resolved backing field `{}` of `{ty}` as `{}`",
            resolved.name,
            resolved.field_type
        );
        let accessor = *self.accessors.entry(ty).or_insert(resolved);
        Ok(accessor)
    }

    /// Looks up a resolved accessor without introspecting.
    pub fn get(&self, ty: TypeHandle) -> Option<BackingAccessor> {
        self.accessors.get(&ty).map(|entry| *entry)
    }

    pub fn contains(&self, ty: TypeHandle) -> bool {
        self.accessors.contains_key(&ty)
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

impl fmt::Debug for AccessorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorCache")
            .field("len", &self.len())
            .finish()
    }
}

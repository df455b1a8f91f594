use crate::IntrospectError;
use std::{
    any::{Any, TypeId},
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    fmt,
    hash::{Hash, Hasher},
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

/// Compile-time capability of a type to describe itself.
///
/// This is usually implemented by `#[derive(Describe)]`. A hand-written impl
/// only needs [`Describe::is_transparent`] and [`Describe::members`] when the
/// type is a transparent wrapper.
pub trait Describe: Any + Send + Sync + Sized {
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Whether the type is a transparent single-field wrapper.
    ///
    /// This query is allowed to fail; callers outside this crate should go
    /// through [`is_transparent`](crate::is_transparent) instead.
    fn is_transparent() -> Result<bool, IntrospectError> {
        Ok(false)
    }

    /// Declared members in declaration order.
    fn members() -> Vec<Member> {
        Vec::new()
    }
}

/// Object-safe view of a [`Describe`] value.
pub trait Reflect: Any + Send + Sync {
    fn type_handle(&self) -> TypeHandle;

    fn as_any(&self) -> &dyn Any;
}

impl<T: Describe> Reflect for T {
    fn type_handle(&self) -> TypeHandle {
        TypeHandle::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn Reflect {
    pub fn is<T: Describe>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Describe>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn Reflect<{}>", self.type_handle())
    }
}

/// The declared type of a member.
///
/// `Option<T>` fields have the classifier of `T` and read as absent when
/// `None`.
pub trait Field: Send + Sync + 'static {
    fn classifier() -> TypeHandle;

    fn read(&self) -> Option<&dyn Reflect>;
}

impl<T: Field> Field for Option<T> {
    fn classifier() -> TypeHandle {
        T::classifier()
    }

    fn read(&self) -> Option<&dyn Reflect> {
        self.as_ref().and_then(Field::read)
    }
}

/// Statically typed counterpart of a transparent wrapper.
pub trait Transparent: Describe {
    type Inner: Field;

    fn inner(&self) -> &Self::Inner;

    fn into_inner(self) -> Self::Inner;
}

/// Identity of a runtime type.
///
/// Two handles are equal iff they refer to the same [`TypeId`]; the shape of
/// the type never takes part in comparisons.
#[derive(Clone, Copy)]
pub struct TypeHandle {
    id: TypeId,
    name: fn() -> &'static str,
    query: fn() -> Result<bool, IntrospectError>,
    members: fn() -> Vec<Member>,
}

impl TypeHandle {
    pub fn of<T: Describe>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: T::type_name,
            query: T::is_transparent,
            members: T::members,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    /// Runs the raw capability query, failures included.
    pub fn query_transparent(&self) -> Result<bool, IntrospectError> {
        (self.query)()
    }

    pub fn members(&self) -> Vec<Member> {
        (self.members)()
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeHandle").field(&self.name()).finish()
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub type ReadFn = for<'a> fn(&'a dyn Reflect) -> Option<&'a dyn Reflect>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// Physically stored field.
    Backing,
    /// Zero-sized marker such as `PhantomData`.
    Marker,
    /// Derived member without storage of its own.
    Computed,
}

#[derive(Clone, Copy)]
pub struct Member {
    pub(crate) name: &'static str,
    pub(crate) storage: Storage,
    pub(crate) classifier: Option<fn() -> TypeHandle>,
    pub(crate) read: Option<ReadFn>,
}

impl Member {
    pub fn backing(name: &'static str, classifier: fn() -> TypeHandle, read: ReadFn) -> Self {
        Self {
            name,
            storage: Storage::Backing,
            classifier: Some(classifier),
            read: Some(read),
        }
    }

    /// Stored field of a type that is not a wrapper; it is listed but never
    /// read.
    pub fn stored(name: &'static str) -> Self {
        Self {
            name,
            storage: Storage::Backing,
            classifier: None,
            read: None,
        }
    }

    pub fn marker(name: &'static str) -> Self {
        Self {
            name,
            storage: Storage::Marker,
            classifier: None,
            read: None,
        }
    }

    pub fn computed(name: &'static str, classifier: fn() -> TypeHandle) -> Self {
        Self {
            name,
            storage: Storage::Computed,
            classifier: Some(classifier),
            read: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn storage(&self) -> Storage {
        self.storage
    }

    pub fn classifier(&self) -> Option<TypeHandle> {
        self.classifier.map(|classifier| classifier())
    }

    pub fn has_backing_storage(&self) -> bool {
        self.storage == Storage::Backing
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("storage", &self.storage)
            .field("classifier", &self.classifier())
            .finish()
    }
}

macro_rules! impl_opaque {
    (@impl [$($g:ident),*] $ty:ty) => {
        impl<$($g: Send + Sync + 'static),*> Describe for $ty {}

        impl<$($g: Send + Sync + 'static),*> Field for $ty {
            fn classifier() -> TypeHandle {
                TypeHandle::of::<Self>()
            }

            fn read(&self) -> Option<&dyn Reflect> {
                Some(self)
            }
        }
    };
    ($($ty:ty),* $(,)?) => {
        $(impl_opaque!(@impl [] $ty);)*
    };
}

impl_opaque!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    PathBuf,
    Duration,
);

impl_opaque!(@impl [T] Vec<T>);
impl_opaque!(@impl [T] VecDeque<T>);
impl_opaque!(@impl [T] Box<T>);
impl_opaque!(@impl [T] Arc<T>);
impl_opaque!(@impl [T, S] HashSet<T, S>);
impl_opaque!(@impl [T] BTreeSet<T>);
impl_opaque!(@impl [K, V, S] HashMap<K, V, S>);
impl_opaque!(@impl [K, V] BTreeMap<K, V>);

#![allow(unused)]

use std::{collections::HashMap, path::PathBuf, sync::Arc};
use transval::{AccessorCache, Describe, Reflect, Transparent, TypeHandle, Unboxer};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, PartialEq, Describe)]
#[repr(transparent)]
struct Meters(u32);

#[derive(Debug, PartialEq, Describe)]
#[repr(transparent)]
struct Squared(Meters);

#[derive(Describe)]
#[repr(transparent)]
struct Maybe(Option<Meters>);

#[derive(Describe)]
#[repr(transparent)]
struct Bytes(Vec<u8>);

#[derive(Describe)]
#[repr(transparent)]
struct Shared(Arc<String>);

#[derive(Describe)]
#[repr(transparent)]
struct Location(Option<PathBuf>);

#[derive(Describe)]
#[repr(transparent)]
struct Index(HashMap<String, u32>);

#[derive(Describe)]
struct Point {
    x: i32,
    y: i32,
}

#[test]
fn meters_end_to_end() {
    init_logger();
    let cache = AccessorCache::new();
    let unboxer = Unboxer::new(&cache);
    assert!(unboxer.is_transparent(TypeHandle::of::<Meters>()));

    let meters = Meters(42);
    let inner = unboxer.unwrap_fully(Some(&meters)).unwrap();
    assert_eq!(inner.downcast_ref::<u32>(), Some(&42));

    let squared = Squared(Meters(42));
    let inner = unboxer.unwrap_fully(Some(&squared)).unwrap();
    assert_eq!(inner.downcast_ref::<u32>(), Some(&42));

    let once = unboxer.boxed_value(&squared).unwrap();
    assert_eq!(once.downcast_ref::<Meters>(), Some(&Meters(42)));
    assert_eq!(cache.len(), 2);
}

#[test]
fn non_wrappers_pass_through() {
    init_logger();
    let cache = AccessorCache::new();
    let unboxer = Unboxer::new(&cache);

    let point = Point { x: 1, y: 2 };
    assert!(!unboxer.is_transparent(point.type_handle()));
    let value = unboxer.unwrap_fully(Some(&point)).unwrap();
    assert!(std::ptr::eq(value.downcast_ref::<Point>().unwrap(), &point));

    let text = String::from("plain");
    let value = unboxer.boxed_value(&text).unwrap();
    assert!(std::ptr::eq(value.downcast_ref::<String>().unwrap(), &text));

    assert!(unboxer.unwrap_fully(None).is_none());
    assert!(cache.is_empty());
}

#[test]
fn absent_links_end_the_chain() {
    init_logger();
    let cache = AccessorCache::new();
    let unboxer = Unboxer::new(&cache);

    let empty = Maybe(None);
    assert!(unboxer.unwrap_fully(Some(&empty)).is_none());
    assert!(unboxer.boxed_value(&empty).is_none());

    let full = Maybe(Some(Meters(7)));
    let inner = unboxer.unwrap_fully(Some(&full)).unwrap();
    assert_eq!(inner.downcast_ref::<u32>(), Some(&7));
    let once = unboxer.boxed_value(&full).unwrap();
    assert_eq!(once.downcast_ref::<Meters>(), Some(&Meters(7)));
}

#[test]
fn full_unwrap_collapses_through_each_level() {
    init_logger();
    let cache = AccessorCache::new();
    let unboxer = Unboxer::new(&cache);

    let squared = Squared(Meters(9));
    let once = unboxer.boxed_value(&squared);
    let direct = unboxer.unwrap_fully(Some(&squared)).unwrap();
    let stepped = unboxer.unwrap_fully(once).unwrap();
    assert!(std::ptr::eq(
        direct.downcast_ref::<u32>().unwrap(),
        stepped.downcast_ref::<u32>().unwrap(),
    ));

    let again = unboxer.unwrap_fully(Some(direct)).unwrap();
    assert!(std::ptr::eq(
        again.downcast_ref::<u32>().unwrap(),
        direct.downcast_ref::<u32>().unwrap(),
    ));
}

#[test]
fn boxed_class_steps_one_type_level() {
    init_logger();
    let cache = AccessorCache::new();
    let unboxer = Unboxer::new(&cache);

    let squared = TypeHandle::of::<Squared>();
    let meters = TypeHandle::of::<Meters>();
    let raw = TypeHandle::of::<u32>();
    assert_eq!(unboxer.boxed_class(squared), meters);
    assert_eq!(unboxer.boxed_class(meters), raw);
    assert_eq!(unboxer.boxed_class(raw), raw);
    assert_eq!(unboxer.innermost_class(squared), raw);

    assert_eq!(unboxer.boxed_class(TypeHandle::of::<Maybe>()), meters);
    let point = TypeHandle::of::<Point>();
    assert_eq!(unboxer.innermost_class(point), point);
}

#[test]
fn typed_wrappers_expose_their_inner_value() {
    let squared = Squared(Meters(3));
    assert_eq!(squared.inner(), &Meters(3));
    assert_eq!(squared.into_inner().into_inner(), 3);
}

#[test]
fn global_unboxer_shares_one_cache() {
    init_logger();
    let meters = Meters(5);
    let inner = Unboxer::global().unwrap_fully(Some(&meters)).unwrap();
    assert_eq!(inner.downcast_ref::<u32>(), Some(&5));
    assert!(AccessorCache::global().contains(TypeHandle::of::<Meters>()));
    assert!(std::ptr::eq(Unboxer::global().cache(), AccessorCache::global()));
}

#[test]
fn std_containers_unwrap_as_leaves() {
    init_logger();
    let cache = AccessorCache::new();
    let unboxer = Unboxer::new(&cache);
    assert!(std::ptr::eq(unboxer.cache(), &cache));

    let bytes = Bytes(vec![1, 2, 3]);
    let inner = unboxer.unwrap_fully(Some(&bytes)).unwrap();
    assert_eq!(inner.downcast_ref::<Vec<u8>>(), Some(&vec![1, 2, 3]));
    assert_eq!(unboxer.boxed_class(bytes.type_handle()), TypeHandle::of::<Vec<u8>>());
    assert!(!unboxer.is_transparent(TypeHandle::of::<Vec<u8>>()));

    let shared = Shared(Arc::new(String::from("shared")));
    let inner = unboxer.unwrap_fully(Some(&shared)).unwrap();
    assert!(std::ptr::eq(inner.downcast_ref::<Arc<String>>().unwrap(), &shared.0));

    let location = Location(Some(PathBuf::from("/tmp")));
    let inner = unboxer.boxed_value(&location).unwrap();
    assert_eq!(inner.downcast_ref::<PathBuf>(), Some(&PathBuf::from("/tmp")));
    assert!(unboxer.boxed_value(&Location(None)).is_none());

    let index = Index(HashMap::from([(String::from("a"), 1)]));
    assert_eq!(
        unboxer.innermost_class(index.type_handle()),
        TypeHandle::of::<HashMap<String, u32>>()
    );
    assert_eq!(cache.len(), 4);
}

use rand::Rng;

use super::*;

#[test]
fn page_streams_are_reproducible() {
    let mut a = page_rng(7, 3);
    let mut b = page_rng(7, 3);
    for _ in 0..4 {
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }
}

#[test]
fn neighbouring_pages_get_distinct_streams() {
    let mut a = page_rng(7, 0);
    let mut b = page_rng(7, 1);
    let mut c = page_rng(8, 0);
    let (x, y, z): (u64, u64, u64) = (a.random(), b.random(), c.random());
    assert_ne!(x, y);
    assert_ne!(x, z);
}

#[test]
fn derived_seeds_depend_on_tag() {
    assert_ne!(derive_seed(1, b"page", 0), derive_seed(1, b"elastic", 0));
    assert_eq!(derive_seed(1, b"page", 0), derive_seed(1, b"page", 0));
}

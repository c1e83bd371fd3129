use rand::SeedableRng;

use crate::foundation::math::Fnv1a64;

/// Random stream threaded through every sampling call of one page.
pub type PageRng = rand::rngs::StdRng;

/// Random stream for page `index` of a run seeded with `seed`.
///
/// The stream depends only on `(seed, index)`, so a page is reproducible regardless of which
/// worker generates it or in what order.
pub fn page_rng(seed: u64, index: u64) -> PageRng {
    PageRng::seed_from_u64(derive_seed(seed, b"page", index))
}

/// Mix a base seed, a domain tag and an index into a new 64-bit seed.
pub(crate) fn derive_seed(seed: u64, tag: &[u8], index: u64) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(seed);
    h.write_bytes(tag);
    h.write_u64(index);
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/random.rs"]
mod tests;

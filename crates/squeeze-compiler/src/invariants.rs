//! Compiler invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use squeeze_core::Spine;

pub(crate) fn empty_variants(site: &Spine) -> ! {
    let path: Vec<String> = site.path().iter().map(ToString::to_string).collect();
    panic!(
        "Variants node without alternatives at /{}",
        path.join("/")
    )
}

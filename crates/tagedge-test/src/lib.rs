//! tagedge-test — shared test fixtures and invariant checkers
//!
//! Not a golden-file regression harness (this pipeline's labels are only
//! stable up to permutation, so there is nothing to diff byte-for-byte
//! against). Instead this crate provides the synthetic image builders and
//! invariant checkers every stage's test suite shares one implementation
//! of, rather than each crate growing its own copy.

pub mod fixtures;
pub mod invariants;

pub use fixtures::{
    Fixture, checkerboard, noisy_binary_field, single_pixel, squares_on_background, uniform,
};
pub use invariants::{
    assert_all_cluster_invariants, assert_ccl_invariants, assert_cluster_invariants,
};

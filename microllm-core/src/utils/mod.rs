//! Helpers shared by the unit tests of this crate and by downstream crates' tests.

pub mod testing;

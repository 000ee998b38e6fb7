#[cfg(any(test, feature = "test"))]
pub use test::*;

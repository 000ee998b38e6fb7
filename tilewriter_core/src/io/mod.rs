//! File system helpers shared by the writers.

mod atomic;

pub use atomic::*;

// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod lookup;
pub mod time;

pub use lookup::{BrokenLookup, StaleLookup};
pub use time::{fixed_clock, fixed_now};

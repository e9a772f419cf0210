#[macro_use]
extern crate derive_new;

pub mod data;

pub use data::*;

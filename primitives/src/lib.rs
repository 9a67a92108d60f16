#![cfg_attr(not(feature = "std"), no_std)]

pub mod ecosystem;
pub mod sale;

pub use ecosystem::*;
pub use sale::*;

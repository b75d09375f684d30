#![doc = include_str!("../README.md")]

pub use crate::error::{Error, Result};
pub use crate::hilbert::{hilbert_code, hilbert_index};
pub use crate::logging::{LogContext, LogLevel};
pub use crate::types::*;
pub use crate::utils::hash_table::HashTable;

mod error;
pub mod hilbert;
pub mod logging;
mod types;
pub mod utils;

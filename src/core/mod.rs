//! GDP/FX merge-and-convert engine

pub mod currency;
pub mod merge;

pub use currency::{CurrencyGroup, DEFAULT_SHARED_CURRENCY};
pub use merge::{merge_convert, MergeConverter, MergeOutcome, DEFAULT_REFERENCE_FX_ROW};

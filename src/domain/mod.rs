//! Domain layer - fiscal calendar, classification rules, brand colors

pub mod colors;
pub mod fiscal;
pub mod quarter_ref;
pub mod tagging;

pub use fiscal::{FiscalQuarter, QuarterRange, QuarterStyle};
pub use quarter_ref::QuarterRef;

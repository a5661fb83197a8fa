//! Everyday tools

mod unit;

pub use unit::UnitConverter;

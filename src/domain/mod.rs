//! Domain layer: discount steps, the net-price engine and the storage ports.

pub mod catalog;
pub mod chain;
pub mod discount;
pub mod line_item;
pub mod numeric;
pub mod policy;
pub mod ports;
pub mod pricing;

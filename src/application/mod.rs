//! Application layer orchestrating the purchase-conditions save path.
//!
//! `PurchaseConditionsService` quotes each line item with the discount chain
//! engine, validates the quote and persists it through the storage ports.

pub mod service;

//! Domain types for QuoteLab.

pub mod bar;

pub use bar::{Bar, BarSeries};

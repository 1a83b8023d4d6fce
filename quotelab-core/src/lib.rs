//! QuoteLab Core — bar series, data acquisition, indicators, reports.
//!
//! This crate contains the heart of the analysis pipeline:
//! - Domain types (OHLCV bars and the ordered bar series)
//! - Source adapters (Yahoo Finance, East Money, synthetic generator)
//! - Acquisition chain with fallback-on-failure and a shared response cache
//! - Indicator engine (moving averages, RSI, MACD, Bollinger, volume MA)
//! - Summary report builder
//!
//! Chart rendering and report templating consume these types from the
//! outside; nothing in here touches the filesystem or draws anything.

pub mod data;
pub mod domain;
pub mod indicators;
pub mod report;

pub mod calendar;
pub mod config;
pub mod error;
pub mod filter;
pub mod output;
pub mod pager;
pub mod records;
pub mod session;
pub mod stats;

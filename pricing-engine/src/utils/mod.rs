//! Utility functions

pub mod time;

pub use time::{parse_date, parse_time, parse_timezone, parse_token_list, parse_weekday, to_business_time};

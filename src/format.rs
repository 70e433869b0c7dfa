//! Record formatting: price normalization and capture timestamps.

use chrono::{Local, NaiveDateTime};

pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Strip everything but ASCII digits and commas, then turn commas into dots.
///
/// `"R$ 129,90"` becomes `"129.90"`. The comma is assumed to be the decimal
/// separator: dots are dropped (`"12.34"` -> `"1234"`) and a price with
/// several commas keeps all of them as dots (`"1,234,56"` -> `"1.234.56"`).
// TODO: thousands-grouped prices with more than one comma come out malformed;
// fixing it changes the values already in existing sheets, so it needs a
// migration of old rows first.
pub fn format_price(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}

/// Source of the capture time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local timezone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn timestamp(clock: &dyn Clock) -> String {
    clock.now().format(TIMESTAMP_FORMAT).to_string()
}

//! Host-side delay provider for pulse timing.

use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// `DelayNs` implementation backed by `std::thread::sleep`.
///
/// Granularity is whatever the OS scheduler provides; the pulse engine makes
/// no sub-microsecond timing claims.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepDelay;

impl DelayNs for SleepDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

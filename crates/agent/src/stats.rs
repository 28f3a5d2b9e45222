//! Aggregate booking statistics
//!
//! Process-lifetime counters, shared across sessions. Finalized bookings
//! are the only writers.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Shared booking count and revenue counters
#[derive(Debug, Default)]
pub struct BookingStats {
    bookings: AtomicU64,
    revenue: AtomicU64,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub bookings: u64,
    pub revenue: u64,
}

impl BookingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finalized booking and its price
    pub fn record_booking(&self, price: u32) {
        self.bookings.fetch_add(1, Ordering::Relaxed);
        self.revenue.fetch_add(u64::from(price), Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            bookings: self.bookings.load(Ordering::Relaxed),
            revenue: self.revenue.load(Ordering::Relaxed),
        }
    }
}

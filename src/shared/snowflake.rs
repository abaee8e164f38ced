//! Snowflake ID Generator
//!
//! Time-ordered 63-bit ids for every persisted row.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// Fireplace epoch (2020-01-01T00:00:00.000Z)
pub const FIREPLACE_EPOCH: u64 = 1577836800000;

/// Snowflake ID generator
pub struct SnowflakeGenerator {
    machine_id: u64,
    epoch: u64,
    state: Mutex<(u64, u64)>,
    issued: AtomicU64,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator
    pub fn new(machine_id: u16, epoch: u64) -> Self {
        Self {
            machine_id: (machine_id as u64) & 0x3FF, // 10 bits
            epoch,
            state: Mutex::new((0, 0)),
            issued: AtomicU64::new(0),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let mut state = self.state.lock();
        let (last_timestamp, sequence) = *state;

        let mut timestamp = self.current_timestamp().max(last_timestamp);
        let mut next_sequence = 0;
        if timestamp == last_timestamp {
            next_sequence = (sequence + 1) & 0xFFF;
            if next_sequence == 0 {
                // Sequence exhausted for this millisecond; borrow the next one.
                timestamp += 1;
            }
        }
        *state = (timestamp, next_sequence);
        self.issued.fetch_add(1, Ordering::Relaxed);

        let id = ((timestamp.saturating_sub(self.epoch)) << 22)
            | (self.machine_id << 12)
            | next_sequence;

        id as i64
    }

    /// Number of ids handed out by this generator.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }

    /// Get current timestamp in milliseconds
    fn current_timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(self.epoch)
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(1, FIREPLACE_EPOCH)
    }
}

//! System-wide constants and default timings.

/// Delay between a follow trigger and the scroll-into-view action, in milliseconds.
pub const FOLLOW_DELAY_MS: u64 = 500;

/// Pointer dwell time before a tooltip is revealed, in milliseconds.
pub const HOVER_SHOW_DELAY_MS: u64 = 250;

/// Time a tooltip lingers after the pointer leaves its target, in milliseconds.
pub const HOVER_HIDE_DELAY_MS: u64 = 400;

/// Number of skeleton rows rendered while the list is loading.
pub const PLACEHOLDER_ROWS: usize = 10;

/// Number of columns in the event table.
pub const COLUMN_COUNT: usize = 5;

/// Interval between UI ticks, in milliseconds.
pub const TICK_RATE_MS: u64 = 100;

/// Interval between feed refreshes, in milliseconds.
pub const REFRESH_INTERVAL_MS: u64 = 1000;

/// Message shown when the stream holds no records.
pub const EMPTY_MESSAGE: &str = "No messages are recorded.";

/// Path of the operations endpoint on a running monitor.
pub const OPERATIONS_ENDPOINT: &str = "/api/operations";

/// Path of the instances endpoint on a running monitor.
pub const INSTANCES_ENDPOINT: &str = "/api/instances";

/// Application name used in CLI output.
pub const APP_NAME: &str = "procmon";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "pmon";

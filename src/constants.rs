// Constants for trace generation and playback

use std::time::Duration;

/// Default cap on the number of steps a single trace may hold.
/// The last slot is reserved for the truncation notice.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Default cap on the estimated size of all snapshots in a trace (64 MB)
pub const DEFAULT_MAX_TRACE_BYTES: usize = 64 * 1024 * 1024;

/// Smallest `max_steps` a recorder accepts: one real step plus the notice
pub const MIN_MAX_STEPS: usize = 2;

/// Autoplay interval used when none is given
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Autoplay intervals are never shorter than this
pub const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Upper bound on overdue ticks fired by a single poll
pub const DEFAULT_MAX_CATCH_UP_TICKS: usize = 1024;

/// Longest array accepted by the catalog generators
pub const MAX_INPUT_LEN: usize = 64;

/// Largest side of the unique-paths grid
pub const MAX_GRID_DIM: i64 = 12;

/// Most items the permutation generator will branch over
pub const MAX_PERMUTATION_ITEMS: usize = 5;

/// Slowest speed the terminal player steps down to
pub const MAX_INTERVAL: Duration = Duration::from_secs(5);

//! Shared numeric and string constants for the board engine.

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed viewport scale.
pub const MIN_SCALE: f64 = 0.3;

/// Largest allowed viewport scale.
pub const MAX_SCALE: f64 = 3.0;

/// Scale change applied by one zoom-in / zoom-out button press.
pub const ZOOM_STEP: f64 = 0.1;

/// Scale change per pixel of vertical wheel delta (positive delta zooms out).
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.001;

// ── History ─────────────────────────────────────────────────────

/// Maximum number of snapshots retained in `past`.
pub const HISTORY_LIMIT: usize = 50;

// ── Persistence ─────────────────────────────────────────────────

/// Encoded history size above which only the present board is persisted.
pub const MAX_PERSIST_BYTES: usize = 4 * 1024 * 1024;

/// Storage key for the `{past, present, future}` history record.
pub const HISTORY_STORAGE_KEY: &str = "freeform-board-history";

/// Storage key for the flat group registry record.
pub const GROUPS_STORAGE_KEY: &str = "freeform-board-groups";

// ── Content ─────────────────────────────────────────────────────

/// Body given to a text pin created from blank input.
pub const DEFAULT_TEXT_BODY: &str = "New Pin";

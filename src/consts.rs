//! Shared numeric constants for the wheel core.

// ── Geometry ────────────────────────────────────────────────────

/// Degrees in a full turn of the wheel.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Pointer position in the wheel's frame. Segments are laid out from 0°
/// (3 o'clock) in the y-down screen direction, so 270° is 12 o'clock.
pub const DEFAULT_POINTER_DEG: f64 = 270.0;

// ── Spin policy ─────────────────────────────────────────────────

/// A wheel needs at least this many options before it can spin.
pub const MIN_SPIN_OPTIONS: usize = 2;

/// Smallest option weight. Lower requested weights clamp up to this.
pub const MIN_OPTION_WEIGHT: u32 = 1;

/// Fewest extra full turns added to a spin for visual effect.
pub const DEFAULT_MIN_TURNS: u32 = 5;

/// Most extra full turns added to a spin for visual effect.
pub const DEFAULT_MAX_TURNS: u32 = 7;

/// Duration of the spin transition in milliseconds.
pub const DEFAULT_SPIN_DURATION_MS: u64 = 4_000;

/// How long the confetti overlay stays up after a spin settles.
pub const DEFAULT_CONFETTI_MS: u64 = 3_000;

// ── Storage ─────────────────────────────────────────────────────

/// Key the serialized category list is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "spinChoice_categories";

/// Directory `FileStore` writes into when none is configured.
pub const DEFAULT_STORAGE_DIR: &str = ".spinchoice";

/// Suffix for the backup key a corrupt blob is moved to.
pub const CORRUPT_KEY_SUFFIX: &str = ".corrupt";

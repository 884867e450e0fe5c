//! Algorithm constants and runtime configuration defaults

// Socket compatibility thresholds
/// Slack when comparing vertex angle sums against a full turn, in radians
pub const ANGLE_SUM_TOLERANCE: f64 = 0.1;

/// Absolute slack when comparing socket edge lengths
pub const LENGTH_TOLERANCE: f64 = 1e-4;

// Collapse engine settings
/// Extra sockets rechecked on each side of a splice beyond its growth span
pub const SPLICE_RETEST_PADDING: i32 = 2;

/// Default lookahead depth when probing candidate placements
pub const DEFAULT_PREDICTION_DEPTH: usize = 1;

/// Default maximum collapse steps before stopping
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Rendered pixels per world unit of boundary geometry
pub const PIXELS_PER_UNIT: f64 = 32.0;

/// Blank border around the rendered tiling, in pixels
pub const RENDER_MARGIN_PX: u32 = 16;

/// RGBA fill colors cycled over tile indices when rendering
pub const COLOR_PALETTE: [[u8; 4]; 8] = [
    [0x4e, 0x79, 0xa7, 0xff],
    [0xf2, 0x8e, 0x2b, 0xff],
    [0xe1, 0x57, 0x59, 0xff],
    [0x76, 0xb7, 0xb2, 0xff],
    [0x59, 0xa1, 0x4f, 0xff],
    [0xed, 0xc9, 0x48, 0xff],
    [0xb0, 0x7a, 0xa1, 0xff],
    [0x9c, 0x75, 0x5f, 0xff],
];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

//! Constants used throughout the application

/// Number of landmarks reported per hand (21-point anatomical numbering)
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Hand landmark indices
pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Bones drawn for the hand skeleton overlay
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (MIDDLE_MCP, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (RING_MCP, PINKY_MCP), (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP),
    (PINKY_DIP, PINKY_TIP),
];

/// Degrees in a full turn of the wheel
pub const FULL_TURN_DEGREES: f64 = 360.0;

/// Half a turn; angular deltas beyond this are taken the other way round
pub const HALF_TURN_DEGREES: f64 = 180.0;

/// `OpenCV` 8-bit hue range (hue is stored as degrees / 2)
pub const OPENCV_HUE_RANGE: u32 = 180;

/// Default color count bounds
pub const DEFAULT_MIN_COLORS: usize = 3;
pub const DEFAULT_MAX_COLORS: usize = 20;
pub const DEFAULT_NUM_COLORS: usize = 8;

/// Pointer sits at the visual top of the wheel (y grows downward)
pub const DEFAULT_POINTER_ANGLE: f64 = 270.0;

/// Default auto-spin physics, degrees per frame
pub const DEFAULT_MIN_SPIN_SPEED: f64 = 15.0;
pub const DEFAULT_MAX_SPIN_SPEED: f64 = 30.0;
pub const DEFAULT_SPIN_DECELERATION: f64 = 0.98;
pub const DEFAULT_MIN_SPIN_VELOCITY: f64 = 0.1;

/// Default gesture thresholds
pub const DEFAULT_PINCH_THRESHOLD: f64 = 0.05;
pub const DEFAULT_NEAR_WHEEL_MULTIPLIER: f64 = 1.5;


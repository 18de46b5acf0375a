//! Commentary pools for height estimates and history trends
//!
//! Each category owns a fixed pool of messages; selection is a uniform draw
//! from the active pool using the caller's random source.

use rand::Rng;
use rand::seq::SliceRandom;

/// Upper bound (inclusive) of the low bucket, in centimeters
pub const LOW_MAX_CM: f64 = 20.0;
/// Upper bound (inclusive) of the medium bucket, in centimeters
pub const MEDIUM_MAX_CM: f64 = 45.0;
/// Smallest height change that counts as a real trend, in centimeters
pub const SIGNIFICANT_CHANGE_CM: f64 = 5.0;

/// Shown when the first history point is inspected
pub const FIRST_MEASUREMENT: &str = "First measurement, nothing to compare yet!";

const LOW: &[&str] = &[
    "Your clothes pile is still in the 'art installation' phase. No rush.",
    "This is just a decorative carpet now.",
    "Tiny pile detected. You could hide it under a cat.",
    "Your laundry is still in stealth mode.",
];

const MEDIUM: &[&str] = &[
    "Your laundry mountain is growing... soon it will demand citizenship.",
    "Careful, it's developing its own weather system.",
    "The pile is now officially taller than your patience.",
    "Laundry pile status: 'Could star in a disaster movie'.",
];

const HIGH: &[&str] = &[
    "Warning: Pile approaching Everest. Sherpas not included.",
    "At this point, you need a climbing permit.",
    "Your laundry has reached 'danger to low-flying aircraft' level.",
    "The United Nations just classified it as a mountain range.",
];

const NO_CHANGE: &[&str] = &[
    "No big change. Your pile is chilling.",
    "Laundry pile status: Zen master.",
    "The pile's as lazy as you today.",
    "No change detected. The laundry is taking a nap.",
];

const IMPROVEMENT: &[&str] = &[
    "Improvement! The laundry mountain shrank! Laundry fairy at work?",
    "Look at you! Laundry hero in action.",
    "Pile down! Your clothes are getting scared.",
    "Laundry legend alert! The mountain is melting.",
];

const INCREASE: &[&str] = &[
    "Uh oh, the pile's growing... what are you doing, laundry slacker?",
    "The laundry pile is staging a comeback. Brace yourself!",
    "Are you building a textile fortress? Because that pile's huge!",
    "Laundry avalanche incoming! Better get those clothes moving.",
];

/// Height range driving the estimate commentary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightBucket {
    Low,
    Medium,
    High,
}

impl HeightBucket {
    /// Classify a rounded height: `<= 20` low, `(20, 45]` medium, `> 45` high
    pub fn classify(height_cm: f64) -> Self {
        if height_cm <= LOW_MAX_CM {
            HeightBucket::Low
        } else if height_cm <= MEDIUM_MAX_CM {
            HeightBucket::Medium
        } else {
            HeightBucket::High
        }
    }

    pub fn pool(self) -> &'static [&'static str] {
        match self {
            HeightBucket::Low => LOW,
            HeightBucket::Medium => MEDIUM,
            HeightBucket::High => HIGH,
        }
    }
}

/// Direction of change between two consecutive measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    NoChange,
    /// The pile got smaller
    Improvement,
    /// The pile got bigger
    Increase,
}

impl Trend {
    /// Classify `previous - current`
    pub fn between(previous_cm: f64, current_cm: f64) -> Self {
        let delta = previous_cm - current_cm;
        if delta.abs() < SIGNIFICANT_CHANGE_CM {
            Trend::NoChange
        } else if delta > 0.0 {
            Trend::Improvement
        } else {
            Trend::Increase
        }
    }

    pub fn pool(self) -> &'static [&'static str] {
        match self {
            Trend::NoChange => NO_CHANGE,
            Trend::Improvement => IMPROVEMENT,
            Trend::Increase => INCREASE,
        }
    }
}

/// Draw one message uniformly from a pool
pub fn pick<R: Rng + ?Sized>(pool: &'static [&'static str], rng: &mut R) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Commentary for a freshly estimated height
pub fn height_comment<R: Rng + ?Sized>(height_cm: f64, rng: &mut R) -> &'static str {
    pick(HeightBucket::classify(height_cm).pool(), rng)
}

/// Commentary for the change between two consecutive measurements
pub fn trend_comment<R: Rng + ?Sized>(previous_cm: f64, current_cm: f64, rng: &mut R) -> &'static str {
    pick(Trend::between(previous_cm, current_cm).pool(), rng)
}

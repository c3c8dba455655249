//! Non-oscillatory reconstruction limiting.

mod weno;

pub use weno::WenoLimiter;

//! Weighted decision wheel core.
//!
//! Users keep named categories of weighted options and spin a wheel to pick
//! one at random in proportion to its weight. This crate owns the parts with
//! real logic: the weighted draw, the wheel geometry that turns a pick into
//! a rotation (and reads the winner back off a rotation), the spin state
//! machine, and the persisted category list. Drawing, animation curves and
//! firing haptics or confetti belong to the host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Categories and weighted options |
//! | [`selector`] | Single-draw weighted selection |
//! | [`geometry`] | Segment layout, rotation targeting, pointer lookup |
//! | [`wheel`] | Two-phase spin state machine and side-effect descriptors |
//! | [`driver`] | Tokio-timed spin for hosts without an animation clock |
//! | [`store`] | Category CRUD over a key-value backend |
//! | [`config`] | Environment-driven tunables |
//! | [`consts`] | Shared constants (pointer angle, turn range, storage key) |

pub mod config;
pub mod consts;
pub mod driver;
pub mod geometry;
pub mod model;
pub mod selector;
pub mod store;
pub mod wheel;

pub use model::{Category, WheelOption};
pub use wheel::{SpinPlan, SpinResult, Wheel};

//! Assembly-line balancing for the U-Engine ecosystem.
//!
//! Partitions manufacturing process steps into ordered workstations under a
//! cycle-time ceiling set by the bottleneck step, maximizing the balance
//! rate and breaking ties by workload variance.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessStep`, `WorkStation`,
//!   `LineBalance`, `BalanceReport`
//! - **`balancer`**: `LineBalancer`, exact search for small lines, greedy
//!   fallback for large ones
//! - **`validation`**: Input checks, the level-ordering check, post-hoc
//!   verification of a balance
//! - **`stats`**: Variance, balance rate, candidate ranking
//! - **`kpi`**: Idle time, smoothness index, throughput
//! - **`levels`**: Caller-side tier renumbering for fractional levels
//! - **`config`**: Search caps and tie tolerance
//!
//! # Architecture
//!
//! A pure, synchronous library: no I/O, no shared state between calls.
//! Persistence and rendering of the resulting stations belong to the
//! caller. Diagnostics are emitted as `tracing` events; install a
//! subscriber to see them.
//!
//! # References
//!
//! - Scholl (1999), "Balancing and Sequencing of Assembly Lines"
//! - Boysen, Fliedner & Scholl (2007), "A classification of assembly line
//!   balancing problems"

pub mod balancer;
pub mod config;
pub mod error;
pub mod kpi;
pub mod levels;
pub mod models;
pub mod stats;
pub mod validation;

pub use balancer::LineBalancer;
pub use config::BalancerConfig;
pub use error::{BalanceError, BalanceResult};

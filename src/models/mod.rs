//! Line balancing domain models.
//!
//! Provides the input and output types of a balancing run.
//!
//! # Domain Mappings
//!
//! | u-line-balance | Assembly line | Cell manufacturing |
//! |----------------|---------------|--------------------|
//! | ProcessStep | Work element | Operation |
//! | level | Precedence tier | Routing stage |
//! | WorkStation | Station / worker | Cell |
//! | LineBalance | Line layout | Cell plan |

mod balance;
mod station;
mod step;

pub use balance::{BalanceReport, LineBalance, StationReport};
pub use station::WorkStation;
pub use step::ProcessStep;

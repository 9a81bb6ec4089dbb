//! Bees algorithm for the QAP.
//!
//! Each generation ranks the population and splits it into tiers:
//!
//! 1. **Elite**: the best locations. Each searches a large neighborhood and
//!    contributes its best neighbor as an extra location; the elite itself
//!    only ages.
//! 2. **Selected**: chosen from the rest by the configured [`Selection`].
//!    Each searches a smaller neighborhood and moves there if it is strictly
//!    better, otherwise ages.
//! 3. **Random**: the remaining slots, re-seeded uniformly.
//!
//! Locations that age past their lifetime are abandoned and re-rolled. When
//! the best cost stalls for `bad_epoch_patience` generations, every location
//! is mutated and its age reset.
//!
//! # Key Types
//!
//! - [`BeesConfig`]: Tier sizes, lifetime, worker pool size
//! - [`BeesRunner`]: Executes the loop on a rayon worker pool
//! - [`BeesResult`]: Best candidate plus run statistics
//!
//! # References
//!
//! - Pham et al. (2005), "The Bees Algorithm", Technical Note, Manufacturing
//!   Engineering Centre, Cardiff University
//! - Pham & Castellani (2015), "A comparative study of the Bees Algorithm as
//!   a tool for function optimisation"
//!
//! [`Selection`]: crate::operators::Selection

mod config;
mod runner;

pub use config::{BeesConfig, TierSize};
pub use runner::{bees_solve, BeesResult, BeesRunner};

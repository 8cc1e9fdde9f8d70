//! `ft-sim`: pooled electric simulation engine.
//!
//! # Event loop
//!
//! ```text
//! seed: one (work block, shift 1) request per block, `headway` apart
//! while a request remains:
//!   ① Pop:      earliest request (FIFO among equal minutes).
//!   ② Drop:     at/after the horizon, or no bus in the pool.
//!   ③ Assign:   soonest-available bus; the segment starts when both the
//!               request and the bus are ready.
//!   ④ Drive:    turnout prep, then round trips until the battery or the
//!               duty ceiling binds; one break past the trigger.
//!   ⑤ Charge:   earliest-free charger; the bus re-enters the pool when
//!               charging ends.
//!   ⑥ Requeue:  a full-length segment hands over to shift 2 (once); a
//!               short one requeues the same shift at its stop time.
//! ```
//!
//! A work block is the scheduling unit.  Buses are fungible: one block may
//! be served by several buses over the day.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ft_sim::{NoopObserver, PoolSimBuilder};
//!
//! let sim = PoolSimBuilder::new(params).rules(rules).build()?;
//! let blocks = sim.run(&route, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod charger;
pub mod engine;
pub mod observer;
pub mod pool;
pub mod queue;


pub use builder::PoolSimBuilder;
pub use charger::{ChargeSlot, ChargerPool};
pub use engine::PoolSim;
pub use observer::{DropReason, NoopObserver, SimObserver};
pub use pool::{BusPool, BusState};
pub use queue::{WorkQueue, WorkRequest};

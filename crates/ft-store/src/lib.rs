//! `ft-store`: where routes live between planning runs.
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`store`]  | `RouteStore` trait, `RouteId`                            |
//! | [`memory`] | `InMemoryRouteStore` (`BTreeMap`-backed)                 |
//! | [`loader`] | `load_routes_csv` / `load_routes_reader`                 |
//! | [`error`]  | `StoreError`, `StoreResult<T>`                           |

pub mod error;
pub mod loader;
pub mod memory;
pub mod store;


pub use error::{StoreError, StoreResult};
pub use loader::{load_routes_csv, load_routes_reader};
pub use memory::InMemoryRouteStore;
pub use store::{RouteId, RouteStore};

//! The `RouteStore` trait: CRUD over routes keyed by [`RouteId`].

use std::fmt;

use serde::{Deserialize, Serialize};

use ft_core::Route;

use crate::StoreResult;

/// Identifier assigned by a store on [`RouteStore::create`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct RouteId(pub u32);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route #{}", self.0)
    }
}

/// Persistent collection of routes.
///
/// Every write goes through [`Route::normalized`], so a stored route that
/// does not turn out from the depot never carries a first stop or turnout
/// distances.
pub trait RouteStore {
    /// Store `route` under a fresh id.
    fn create(&mut self, route: Route) -> StoreResult<RouteId>;

    fn get(&self, id: RouteId) -> StoreResult<Route>;

    /// Every stored route, ordered by id.
    fn list(&self) -> Vec<(RouteId, Route)>;

    /// Replace the route stored under `id`.
    fn update(&mut self, id: RouteId, route: Route) -> StoreResult<()>;

    /// Remove and return the route stored under `id`.
    fn delete(&mut self, id: RouteId) -> StoreResult<Route>;

    /// First route whose `route_number` equals `number`.
    fn find_by_number(&self, number: &str) -> Option<(RouteId, Route)> {
        self.list().into_iter().find(|(_, r)| r.route_number == number)
    }
}

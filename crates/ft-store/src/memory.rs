//! `InMemoryRouteStore`: a `BTreeMap`-backed [`RouteStore`].

use std::collections::BTreeMap;

use log::debug;

use ft_core::Route;

use crate::{RouteId, RouteStore, StoreError, StoreResult};

/// Routes held in memory, ids handed out in increasing order and never
/// reused.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRouteStore {
    routes: BTreeMap<RouteId, Route>,
    next:   u32,
}

impl InMemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with `routes`, ids assigned in iteration order.
    pub fn from_routes(routes: impl IntoIterator<Item = Route>) -> StoreResult<Self> {
        let mut store = Self::new();
        for route in routes {
            store.create(route)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteStore for InMemoryRouteStore {
    fn create(&mut self, route: Route) -> StoreResult<RouteId> {
        let id = RouteId(self.next);
        self.next = self.next.checked_add(1).ok_or(StoreError::Exhausted)?;
        debug!("store: {id} = route {}", route.route_number);
        self.routes.insert(id, route.normalized());
        Ok(id)
    }

    fn get(&self, id: RouteId) -> StoreResult<Route> {
        self.routes.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn list(&self) -> Vec<(RouteId, Route)> {
        self.routes.iter().map(|(&id, r)| (id, r.clone())).collect()
    }

    fn update(&mut self, id: RouteId, route: Route) -> StoreResult<()> {
        let slot = self.routes.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = route.normalized();
        Ok(())
    }

    fn delete(&mut self, id: RouteId) -> StoreResult<Route> {
        debug!("store: delete {id}");
        self.routes.remove(&id).ok_or(StoreError::NotFound(id))
    }
}

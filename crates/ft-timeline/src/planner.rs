//! The planning façade: one request in, one [`TimetableView`] out.
//!
//! Nothing here fails.  An infeasible request comes back as an empty view
//! whose `diagnostic` says why, so a caller can render it next to the form
//! that produced it.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use ft_core::{CrewParams, DutyRules, DutyStrategy, ElectricParams, FleetResult, PoolParams, Route};
use ft_duty::{CrewDutyGenerator, FixedElectricGenerator};
use ft_sim::PoolSimBuilder;

use crate::TimetableView;

/// Which generator to run, with its parameters.
///
/// Decodes from `{"strategy": "crew", "params": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "params", rename_all = "camelCase")]
pub enum PlanRequest {
    Crew(CrewParams),
    ElectricFixed(ElectricParams),
    ElectricPooled(PoolParams),
}

/// Builds strategies under one set of [`DutyRules`] and formats their output.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    rules: DutyRules,
}

impl Planner {
    pub fn new(rules: DutyRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &DutyRules {
        &self.rules
    }

    /// The generator `request` asks for.
    ///
    /// # Errors
    ///
    /// [`ft_core::FleetError::Config`] from [`PoolSimBuilder::build`].
    pub fn strategy(&self, request: &PlanRequest) -> FleetResult<Box<dyn DutyStrategy>> {
        let rules = self.rules.clone();
        Ok(match request {
            PlanRequest::Crew(p) => Box::new(CrewDutyGenerator::new(p.clone()).with_rules(rules)),
            PlanRequest::ElectricFixed(p) => Box::new(FixedElectricGenerator::new(p.clone()).with_rules(rules)),
            PlanRequest::ElectricPooled(p) => Box::new(PoolSimBuilder::new(p.clone()).rules(rules).build()?),
        })
    }

    /// Run `request` on `route` and format the result.
    pub fn plan(&self, route: &Route, request: &PlanRequest) -> TimetableView {
        let roster = self.strategy(request).and_then(|s| {
            let roster = s.generate(route)?;
            info!("{} on route {}: {} duties", s.name(), route.route_number, roster.all_duties().len());
            Ok(roster)
        });
        match roster {
            Ok(roster) => TimetableView::from_roster(roster, route),
            Err(e) => {
                warn!("route {}: {e}", route.route_number);
                TimetableView::failed(e.to_string())
            }
        }
    }
}

/// Plan every `(route, request)` pair, returning views in input order.
///
/// With the `parallel` feature the pairs run on Rayon's thread pool.
pub fn plan_many(planner: &Planner, jobs: &[(Route, PlanRequest)]) -> Vec<TimetableView> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        jobs.par_iter().map(|(route, request)| planner.plan(route, request)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        jobs.iter().map(|(route, request)| planner.plan(route, request)).collect()
    }
}

//! Fluent builder for constructing a [`PoolSim`].

use ft_core::{DutyRules, FleetError, FleetResult, PoolParams};

use crate::PoolSim;

/// Fluent builder for [`PoolSim`].
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                |
/// |---------------|------------------------|
/// | `.rules(r)`   | `DutyRules::default()` |
///
/// # Example
///
/// ```rust,ignore
/// let sim = PoolSimBuilder::new(params).rules(rules).build()?;
/// let blocks = sim.run(&route, &mut NoopObserver)?;
/// ```
pub struct PoolSimBuilder {
    params: PoolParams,
    rules:  Option<DutyRules>,
}

impl PoolSimBuilder {
    pub fn new(params: PoolParams) -> Self {
        Self { params, rules: None }
    }

    /// Override the duty rules (ceiling, prep, break trigger, horizon, …).
    pub fn rules(mut self, rules: DutyRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Validate inputs and return a ready-to-run [`PoolSim`].
    ///
    /// # Errors
    ///
    /// [`FleetError::Config`] if the charger count does not fit a
    /// [`ft_core::ChargerId`] or the rules carry a non-positive duty ceiling
    /// or turnout preparation.
    pub fn build(self) -> FleetResult<PoolSim> {
        let rules = self.rules.unwrap_or_default();
        let chargers = u16::try_from(self.params.number_of_chargers).map_err(|_| {
            FleetError::Config(format!("{} chargers exceeds the depot limit", self.params.number_of_chargers))
        })?;
        if rules.duty_ceiling <= 0.0 {
            return Err(FleetError::Config("duty ceiling must be positive".into()));
        }
        if rules.pooled_prep.is_nan() || rules.pooled_prep <= 0.0 {
            return Err(FleetError::Config("pooled turnout preparation must be positive".into()));
        }

        Ok(PoolSim {
            timing: self.params.timing(),
            params: self.params,
            rules,
            chargers,
        })
    }
}

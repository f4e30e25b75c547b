use crate::active_learning::{
    ActiveLearningStrategy, FixedUncertainty, RandomSampling, RandomizedVariableUncertainty,
    StrategyBase, VariableUncertainty,
};
use crate::oracle::{AvailabilityAwareOracle, Oracle, SimpleOracle};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::{ActiveLearningConfig, OracleChoice, StrategyChoice};

pub fn build_oracle(choice: &OracleChoice, seed: u64) -> Result<Box<dyn Oracle>, BuildError> {
    match choice {
        OracleChoice::Simple(p) => {
            check_cost(p.cost_per_label)?;
            Ok(Box::new(SimpleOracle::new(p.cost_per_label)))
        }
        OracleChoice::AvailabilityAware(p) => {
            check_cost(p.cost_per_label)?;
            let o = AvailabilityAwareOracle::new(
                p.availability,
                p.batch,
                p.min_labels,
                p.cost_per_label,
                seed,
            )?;
            Ok(Box::new(o))
        }
    }
}

fn check_cost(cost: f64) -> Result<(), BuildError> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(BuildError::InvalidParameter(
            "cost_per_label must be a non-negative number".into(),
        ));
    }
    Ok(())
}

/// Oracle draws use `seed`, the strategy's own randomness `seed + 1`.
pub fn build_active_learner(
    config: &ActiveLearningConfig,
    seed: u64,
) -> Result<Box<dyn ActiveLearningStrategy>, BuildError> {
    let oracle = build_oracle(&config.oracle, seed)?;
    let base = StrategyBase::new(config.budget, oracle, config.measure.build())?;
    let strategy_seed = seed.wrapping_add(1);
    let learner: Box<dyn ActiveLearningStrategy> = match &config.strategy {
        StrategyChoice::Random(_) => Box::new(RandomSampling::new(base, strategy_seed)),
        StrategyChoice::FixedUncertainty(p) => Box::new(FixedUncertainty::new(base, p.threshold)),
        StrategyChoice::VariableUncertainty(p) => {
            Box::new(VariableUncertainty::new(base, p.step)?)
        }
        StrategyChoice::RandomizedVariableUncertainty(p) => Box::new(
            RandomizedVariableUncertainty::new(base, p.step, p.variance, strategy_seed)?,
        ),
    };
    Ok(learner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::active_learning::MeasureKind;
    use crate::ui::types::choices::*;

    fn config(strategy: StrategyChoice) -> ActiveLearningConfig {
        ActiveLearningConfig {
            budget: 0.5,
            measure: MeasureKind::Entropy,
            oracle: OracleChoice::default(),
            strategy,
        }
    }

    #[test]
    fn builds_every_strategy() {
        for (choice, name) in [
            (StrategyChoice::Random(NoParams {}), "random"),
            (
                StrategyChoice::FixedUncertainty(FixedUncertaintyParams::default()),
                "fixed_uncertainty",
            ),
            (
                StrategyChoice::VariableUncertainty(VariableUncertaintyParams::default()),
                "variable_uncertainty",
            ),
            (
                StrategyChoice::RandomizedVariableUncertainty(
                    RandomizedVariableUncertaintyParams::default(),
                ),
                "variable_randomized_uncertainty",
            ),
        ] {
            let learner = build_active_learner(&config(choice), 7).unwrap();
            assert_eq!(learner.name(), name);
        }
    }

    #[test]
    fn budget_out_of_range_is_rejected() {
        let mut c = config(StrategyChoice::Random(NoParams {}));
        c.budget = 1.5;
        assert!(matches!(
            build_active_learner(&c, 0),
            Err(BuildError::Core(crate::Error::Config(_)))
        ));
    }

    #[test]
    fn invalid_step_is_rejected() {
        let c = config(StrategyChoice::VariableUncertainty(
            VariableUncertaintyParams { step: 0.0 },
        ));
        assert!(build_active_learner(&c, 0).is_err());
    }

    #[test]
    fn availability_out_of_range_is_rejected() {
        let choice = OracleChoice::AvailabilityAware(AvailabilityAwareParams {
            availability: 2.0,
            ..Default::default()
        });
        assert!(build_oracle(&choice, 0).is_err());
    }

    #[test]
    fn negative_cost_is_rejected() {
        let choice = OracleChoice::Simple(SimpleOracleParams {
            cost_per_label: -1.0,
        });
        assert!(matches!(
            build_oracle(&choice, 0),
            Err(BuildError::InvalidParameter(_))
        ));
    }
}

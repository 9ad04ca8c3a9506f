use std::iter::successors;

use common::{
    config::{Parameter, ParameterSource, Step},
    error::ConfigError,
};

/// Validates `source` against the domain of `parameter` and expands it into concrete values.
///
/// Explicit values keep their order and duplicates. Ranges include every value up to and
/// including `end`: percentages advance by a fixed step, transfer sizes double.
pub fn materialize(
    parameter: Parameter,
    source: &ParameterSource,
) -> Result<Vec<u32>, ConfigError> {
    let domain = parameter.domain();
    let values = match source {
        ParameterSource::Values(values) => {
            if !values.iter().all(|v| domain.contains(v)) {
                return Err(ConfigError::OutOfDomain {
                    flag: parameter.values_flag(),
                    min: *domain.start(),
                    max: *domain.end(),
                });
            }
            values.clone()
        }
        ParameterSource::Range { start, end, step } => {
            let valid_step = match step {
                Step::Add(step) => *step > 0,
                Step::Double => true,
            };
            if start >= end || !domain.contains(start) || !domain.contains(end) || !valid_step {
                return Err(ConfigError::InvalidRange {
                    flag: parameter.iteration_flag(),
                    given: match step {
                        Step::Add(step) => format!("start {start}, end {end}, step {step}"),
                        Step::Double => format!("start {start}, end {end}"),
                    },
                });
            }
            successors(Some(*start), |v| match step {
                Step::Add(step) => v.checked_add(*step),
                Step::Double => v.checked_mul(2),
            })
            .take_while(|v| v <= end)
            .collect()
        }
    };
    // Explicit values were checked above; range values lie between an in-domain start and end.
    Ok(values.into_iter().map(|v| v as u32).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: i64, end: i64, step: Step) -> ParameterSource {
        ParameterSource::Range { start, end, step }
    }

    #[test]
    fn percent_range_is_additive_and_inclusive() {
        let values = materialize(Parameter::RandomPercent, &range(0, 100, Step::Add(25))).unwrap();
        assert_eq!(values, [0, 25, 50, 75, 100]);
    }

    #[test]
    fn percent_range_stops_before_overshoot() {
        let values = materialize(Parameter::ReadPercent, &range(10, 50, Step::Add(15))).unwrap();
        assert_eq!(values, [10, 25, 40]);
    }

    #[test]
    fn transfer_range_doubles() {
        let values = materialize(Parameter::TransferSize, &range(4, 20, Step::Double)).unwrap();
        assert_eq!(values, [4, 8, 16]);
    }

    #[test]
    fn transfer_range_reaches_the_maximum() {
        let values =
            materialize(Parameter::TransferSize, &range(32_768, 131_072, Step::Double)).unwrap();
        assert_eq!(values, [32_768, 65_536, 131_072]);
    }

    #[test]
    fn huge_step_ends_the_range() {
        let values =
            materialize(Parameter::ReadPercent, &range(1, 100, Step::Add(i64::MAX))).unwrap();
        assert_eq!(values, [1]);

        let values = materialize(
            Parameter::RandomPercent,
            &range(0, 100, Step::Add(i64::MAX - 1)),
        )
        .unwrap();
        assert_eq!(values, [0]);
    }

    #[test]
    fn explicit_values_keep_order() {
        let values =
            materialize(Parameter::ReadPercent, &ParameterSource::Values(vec![100, 0, 70, 0]))
                .unwrap();
        assert_eq!(values, [100, 0, 70, 0]);
    }

    #[test]
    fn explicit_values_outside_domain() {
        let err = materialize(Parameter::RandomPercent, &ParameterSource::Values(vec![0, 101]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "--random-percent-values must contain values between 0 and 100"
        );

        let err = materialize(Parameter::TransferSize, &ParameterSource::Values(vec![0]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "--transfer-size-values must contain values between 1 and 131072"
        );
    }

    #[test]
    fn invalid_ranges() {
        for (parameter, source) in [
            (Parameter::ReadPercent, range(50, 50, Step::Add(5))),
            (Parameter::ReadPercent, range(60, 10, Step::Add(5))),
            (Parameter::ReadPercent, range(-10, 50, Step::Add(5))),
            (Parameter::RandomPercent, range(0, 101, Step::Add(5))),
            (Parameter::RandomPercent, range(0, 100, Step::Add(0))),
            (Parameter::RandomPercent, range(0, 100, Step::Add(-5))),
            (Parameter::TransferSize, range(0, 64, Step::Double)),
            (Parameter::TransferSize, range(4, 262_144, Step::Double)),
        ] {
            let err = materialize(parameter, &source).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidRange { flag, .. } if flag == parameter.iteration_flag()),
                "{source:?} was accepted"
            );
        }
    }
}

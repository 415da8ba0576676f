use crate::errors::*;
use crate::utilities::prepend;

/// Noise multipliers below this make the fractional-order series converge slowly.
const SLOW_CONVERGENCE_NOISE_MULTIPLIER: f64 = 0.5;


fn check_probability(value: f64) -> Result<()> {
    if value.is_nan() {
        return Err("must not be null".into());
    }
    if value < 0. || value > 1. {
        bail!("must be within [0, 1], got {}", value)
    }
    Ok(())
}

pub fn check_sampling_rate(sampling_rate: f64) -> Result<Vec<Error>> {
    check_probability(sampling_rate).map_err(prepend("sampling_rate:"))?;

    let mut warnings: Vec<Error> = Vec::new();
    if sampling_rate == 0. {
        warnings.push("sampling_rate: a rate of zero never samples a record, so the mechanism releases nothing".into());
    }
    Ok(warnings)
}

pub fn check_noise_multiplier(noise_multiplier: f64) -> Result<Vec<Error>> {
    if noise_multiplier.is_nan() {
        return Err("noise_multiplier: must not be null".into());
    }
    if noise_multiplier < 0. {
        bail!("noise_multiplier: may not be negative, got {}", noise_multiplier)
    }
    if noise_multiplier.is_infinite() {
        return Err("noise_multiplier: must be finite".into());
    }

    let mut warnings: Vec<Error> = Vec::new();
    if noise_multiplier == 0. {
        warnings.push("noise_multiplier: without noise the privacy loss is unbounded".into());
    } else if noise_multiplier < SLOW_CONVERGENCE_NOISE_MULTIPLIER {
        warnings.push(format!(
            "noise_multiplier: a small multiplier of {} may make fractional orders slow to converge",
            noise_multiplier).into());
    }
    Ok(warnings)
}

pub fn check_flip_probability(flip_probability: f64) -> Result<Vec<Error>> {
    check_probability(flip_probability).map_err(prepend("flip_probability:"))?;

    let mut warnings: Vec<Error> = Vec::new();
    if flip_probability == 0. || flip_probability == 1. {
        warnings.push("flip_probability: a deterministic response has unbounded privacy loss".into());
    }
    Ok(warnings)
}

pub fn check_steps(steps: u64) -> Result<()> {
    if steps == 0 {
        return Err("steps: must be greater than zero".into());
    }
    Ok(())
}

pub fn check_delta(delta: f64) -> Result<()> {
    if delta.is_nan() {
        return Err("delta: must not be null".into());
    }
    if delta <= 0. || delta >= 1. {
        bail!("delta: must be within (0, 1), got {}", delta)
    }
    Ok(())
}


#[cfg(test)]
mod test_privacy {
    use crate::utilities::privacy::*;

    #[test]
    fn test_sampling_rate() {
        assert!(check_sampling_rate(0.05).unwrap().is_empty());
        assert!(check_sampling_rate(1.).unwrap().is_empty());
        assert_eq!(check_sampling_rate(0.).unwrap().len(), 1);

        let err = check_sampling_rate(1.5).unwrap_err();
        assert!(err.to_string().starts_with("sampling_rate:"));
        assert!(check_sampling_rate(-0.1).is_err());
        assert!(check_sampling_rate(std::f64::NAN).is_err());
    }

    #[test]
    fn test_noise_multiplier() {
        assert!(check_noise_multiplier(1.1).unwrap().is_empty());
        assert_eq!(check_noise_multiplier(0.).unwrap().len(), 1);
        assert_eq!(check_noise_multiplier(0.1).unwrap().len(), 1);

        assert!(check_noise_multiplier(-1.).is_err());
        assert!(check_noise_multiplier(std::f64::INFINITY).is_err());
        assert!(check_noise_multiplier(std::f64::NAN).is_err());
    }

    #[test]
    fn test_flip_probability() {
        assert!(check_flip_probability(0.7).unwrap().is_empty());
        assert_eq!(check_flip_probability(1.).unwrap().len(), 1);
        assert!(check_flip_probability(1.01).is_err());
    }

    #[test]
    fn test_steps_and_delta() {
        assert!(check_steps(1).is_ok());
        assert!(check_steps(0).is_err());

        assert!(check_delta(1e-5).is_ok());
        assert!(check_delta(0.).is_err());
        assert!(check_delta(1.).is_err());
        assert!(check_delta(std::f64::NAN).is_err());
    }
}

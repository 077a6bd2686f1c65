mod tests {
    use pupil_reflex::easing::{self, Easing};

    const EPSILON: f32 = 1.0e-4;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= EPSILON
    }

    #[test]
    fn test_every_curve_starts_at_zero_and_ends_at_one() {
        for curve in Easing::ALL {
            assert!(approx(curve.apply(0.0), 0.0), "{} at 0", curve.as_str());
            assert!(approx(curve.apply(1.0), 1.0), "{} at 1", curve.as_str());
        }
    }

    #[test]
    fn test_non_overshooting_curves_stay_in_unit_range() {
        for curve in Easing::ALL.into_iter().filter(|curve| !curve.overshoots()) {
            for step in 0..=100u8 {
                let value = curve.apply(f32::from(step) / 100.0);
                assert!(
                    (-EPSILON..=1.0 + EPSILON).contains(&value),
                    "{} left [0, 1]: {value}",
                    curve.as_str()
                );
            }
        }
    }

    #[test]
    fn test_elastic_out_overshoots_before_settling() {
        let peak = (0..=100u8)
            .map(|step| easing::elastic_out(f32::from(step) / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
        assert!(approx(easing::elastic_out(0.5), 1.0 + core::f32::consts::FRAC_1_SQRT_2 / 32.0));
    }

    #[test]
    fn test_back_out_overshoots_midway() {
        assert!(approx(easing::back_out(0.5), 1.375));
        assert!(easing::back_in(0.3) < 0.0);
    }

    #[test]
    fn test_known_midpoints() {
        assert!(approx(easing::linear(0.25), 0.25));
        assert!(approx(easing::quadratic_out(0.5), 0.75));
        assert!(approx(easing::cubic_in(0.5), 0.125));
        assert!(approx(easing::sine_in_out(0.5), 0.5));
        assert!(approx(easing::bounce_out(4.0 / 11.0), 1.0));
    }

    #[test]
    fn test_curve_lookup_by_name() {
        assert_eq!(Easing::parse_from_str("elastic_out"), Some(Easing::ElasticOut));
        assert_eq!(Easing::parse_from_str("back_out"), Some(Easing::BackOut));
        assert_eq!(Easing::parse_from_str("wobble"), None);
        for curve in Easing::ALL {
            assert_eq!(Easing::parse_from_str(curve.as_str()), Some(curve));
        }
    }

    #[test]
    fn test_only_elastic_and_back_overshoot() {
        let overshooting: Vec<&str> = Easing::ALL
            .into_iter()
            .filter(|curve| curve.overshoots())
            .map(Easing::as_str)
            .collect();
        assert_eq!(
            overshooting,
            [
                "elastic_in",
                "elastic_out",
                "elastic_in_out",
                "back_in",
                "back_out",
                "back_in_out"
            ]
        );
    }
}

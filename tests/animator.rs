mod tests {
    use pupil_reflex::Animator;
    use pupil_reflex::easing::{elastic_out, quadratic_in};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1.0e-4
    }

    #[test]
    fn test_linear_animation() {
        let mut animator = Animator::linear(0.0, 10.0, 1.0);
        assert!(!animator.is_finished());
        assert!(approx(animator.value(), 0.0));

        assert!(approx(animator.advance(0.5), 5.0));
        assert!(!animator.is_finished());

        assert!(approx(animator.advance(0.5), 10.0));
        assert!(animator.is_finished());
    }

    #[test]
    fn test_elapsed_is_clamped_to_duration() {
        let mut animator = Animator::linear(1.0, -1.0, 1.0);
        animator.advance(0.6);
        animator.advance(0.6);
        animator.advance(5.0);
        assert!(approx(animator.elapsed(), 1.0));
        assert!(approx(animator.value(), -1.0));
        assert!(approx(animator.progress(), 1.0));
    }

    #[test]
    fn test_elapsed_never_decreases() {
        let mut animator = Animator::new(0.0, 1.0, 2.0, quadratic_in);
        let mut previous = animator.elapsed();
        for dt in [0.1, 0.0, -0.5, f32::NAN, 0.3, f32::INFINITY, 0.2] {
            animator.advance(dt);
            assert!(animator.elapsed() >= previous);
            previous = animator.elapsed();
        }
        assert!(approx(animator.elapsed(), 0.6));
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let mut animator = Animator::new(2.0, 5.0, 0.0, elastic_out);
        assert!(animator.is_finished());
        assert!(approx(animator.value(), 5.0));
        assert!(approx(animator.advance(0.0), 5.0));

        let tiny = Animator::linear(2.0, 5.0, 1.0e-6);
        assert!(tiny.is_finished());
        assert!(approx(tiny.value(), 5.0));

        let broken = Animator::linear(2.0, 5.0, f32::NAN);
        assert!(broken.is_finished());
    }

    #[test]
    fn test_eased_value_follows_curve() {
        let mut animator = Animator::new(1.0, -1.0, 2.0, elastic_out);
        let halfway = animator.advance(1.0);
        assert!(approx(halfway, 1.0 - 2.0 * elastic_out(0.5)));
        // elastic overshoots past the target before settling
        assert!(halfway < -1.0);

        let end = animator.advance(1.0);
        assert!(approx(end, 1.0 - 2.0 * elastic_out(1.0)));
        assert!(animator.is_finished());
    }
}

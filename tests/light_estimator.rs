mod tests {
    use pupil_reflex::estimator::{LightEstimatorConfig, estimate_brightness, perceived_intensity};
    use pupil_reflex::{
        BrightnessProvider, Duration, Light, LightEstimator, LightInventory, LightKind,
        LinearColor, Vec3,
    };

    const EYES: Vec3 = Vec3::ZERO;
    const FORWARD: Vec3 = Vec3::FORWARD;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1.0e-4
    }

    fn brightness(lights: &[Light]) -> f32 {
        estimate_brightness(lights, EYES, FORWARD, &LightEstimatorConfig::default())
    }

    #[test]
    fn test_point_light_in_front() {
        // falloff = quadratic_out(0.75) = 0.9375, luminance 1.875, / 8 * 4
        let light = Light::point(Vec3::new(0.0, 0.0, 0.5), 2.0, 2.0);
        assert!(approx(brightness(&[light]), 0.9375));
    }

    #[test]
    fn test_out_of_range_light_is_ignored() {
        let light = Light::point(Vec3::new(0.0, 0.0, 2.0), 1000.0, 1.0);
        let config = LightEstimatorConfig::default();
        assert_eq!(perceived_intensity(&light, EYES, FORWARD, &config), None);
        assert!(approx(brightness(&[light]), 0.0));
    }

    #[test]
    fn test_light_behind_head_is_ignored() {
        let light = Light::point(Vec3::new(0.0, 0.0, -0.1), 1000.0, 10.0);
        assert!(approx(brightness(&[light]), 0.0));

        let sun_from_behind = Light::directional(Vec3::FORWARD, 8.0);
        assert!(approx(brightness(&[sun_from_behind]), 0.0));
    }

    #[test]
    fn test_directional_light_into_face() {
        let sun = Light::directional(Vec3::new(0.0, 0.0, -1.0), 1.0);
        assert!(approx(brightness(&[sun]), 0.5));

        let blinding = Light::directional(Vec3::new(0.0, 0.0, -1.0), 8.0);
        assert!(approx(brightness(&[blinding]), 1.0));
    }

    #[test]
    fn test_colored_light_uses_perceived_luminance() {
        let red = Light::directional(Vec3::new(0.0, 0.0, -1.0), 1.0)
            .with_color(LinearColor::new(1.0, 0.0, 0.0));
        assert!(approx(brightness(&[red]), 0.299_f32.sqrt() / 8.0 * 4.0));
    }

    #[test]
    fn test_strongest_light_wins() {
        let light = Light::point(Vec3::new(0.0, 0.0, 0.5), 1.0, 2.0);
        let single = brightness(&[light]);
        let doubled = brightness(&[light, light, light]);
        assert!(single > 0.0);
        assert!(approx(single, doubled));

        let dim = Light::point(Vec3::new(0.0, 0.0, 1.5), 1.0, 2.0);
        assert!(approx(brightness(&[dim, light]), single));
    }

    #[test]
    fn test_negative_intensity_is_dark() {
        let sun = Light::directional(Vec3::new(0.0, 0.0, -1.0), -8.0);
        assert!(approx(brightness(&[sun]), 0.0));

        let lamp = Light::point(Vec3::new(0.0, 0.0, 0.5), -2.0, 2.0);
        let real = Light::point(Vec3::new(0.0, 0.0, 0.5), 2.0, 2.0);
        assert!(approx(brightness(&[lamp, real]), 0.9375));
    }

    #[test]
    fn test_disabled_and_area_lights_are_ignored() {
        let disabled = Light::directional(Vec3::new(0.0, 0.0, -1.0), 8.0).disabled();
        let mut area = Light::directional(Vec3::new(0.0, 0.0, -1.0), 8.0);
        area.kind = LightKind::Area;
        assert!(approx(brightness(&[disabled, area]), 0.0));
    }

    #[test]
    fn test_spot_cone_filter() {
        let position = Vec3::new(0.0, 0.0, 2.0);
        let cone = 30.0_f32.to_radians();

        let aimed = Light::spot(position, Vec3::new(0.0, 0.0, -1.0), cone, 4.0, 5.0);
        assert!(brightness(&[aimed]) > 0.0);

        let aside = Light::spot(position, Vec3::UP, cone, 4.0, 5.0);
        assert!(approx(brightness(&[aside]), 0.0));

        // 30 degrees off axis is inside the widened 33 degree limit
        let (sin, cos) = 30.0_f32.to_radians().sin_cos();
        let grazing = Light::spot(position, Vec3::new(0.0, sin, -cos), cone, 4.0, 5.0);
        assert!(brightness(&[grazing]) > 0.0);
    }

    #[test]
    fn test_inventory_capacity() {
        let mut inventory = LightInventory::<2>::new();
        let light = Light::directional(Vec3::new(0.0, 0.0, -1.0), 1.0);
        assert!(inventory.push(light).is_ok());
        assert!(inventory.push(light).is_ok());
        assert_eq!(inventory.push(light), Err(light));
        inventory.clear();
        assert!(inventory.push(light).is_ok());
    }

    #[test]
    fn test_estimator_follows_head() {
        let mut inventory = LightInventory::<4>::new();
        let _ = inventory.push(Light::point(Vec3::new(0.0, 0.0, 0.5), 2.0, 2.0));
        let mut estimator = LightEstimator::new(inventory, Duration::from_millis(250));
        assert!(approx(estimator.estimate(), 0.9375));

        // turning around puts the light behind the head
        estimator
            .scene_mut()
            .set_head(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(approx(estimator.estimate(), 0.0));
    }

    #[test]
    fn test_poll_cadence_at_60_fps() {
        let mut estimator =
            LightEstimator::new(LightInventory::<1>::new(), Duration::from_millis(250));

        assert!(estimator.poll(1.0 / 60.0).is_some());
        assert!(estimator.poll(1.0 / 60.0).is_none());

        let samples = (0..600)
            .filter(|_| estimator.poll(1.0 / 60.0).is_some())
            .count();
        assert!((39..=41).contains(&samples), "{samples} samples");
    }

    #[test]
    fn test_zero_interval_polls_every_tick() {
        let mut estimator = LightEstimator::new(LightInventory::<1>::new(), Duration::from_millis(0));
        assert!((0..10).all(|_| estimator.poll(1.0 / 60.0).is_some()));
    }
}

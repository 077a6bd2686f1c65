mod tests {
    use pupil_reflex::settings::{DEFAULT_OUTPUT_RANGE, SettingRange};
    use pupil_reflex::{
        Duration, QueueFull, SettingChange, Settings, SettingsChannel, SettingsError,
        SettingsProcessor,
    };

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.poll_interval(), Duration::from_millis(250));
        assert_eq!(settings.light_adjust(), Duration::from_millis(3_500));
        assert_eq!(settings.dark_adjust(), Duration::from_millis(5_000));
        assert_eq!(settings.idle_adjust(), Duration::from_millis(1_000));
        assert_eq!(settings.idle_max_delay(), Duration::from_millis(2_500));
        assert_eq!(settings.reactive_throttle(), Duration::from_millis(50));
        assert_eq!(settings.idle_strength(), 0.05);
        assert_eq!(settings.neutral(), 0.0);
        assert_eq!(settings.output_range(), DEFAULT_OUTPUT_RANGE);
        assert_eq!(settings.change_threshold(), 0.0);
    }

    #[test]
    fn test_values_in_range_read_back_unchanged() {
        let mut settings = Settings::default();
        settings.set_poll_interval(Duration::from_millis(1_200));
        settings.set_light_adjust(Duration::from_millis(800));
        settings.set_dark_adjust(Duration::from_millis(9_000));
        settings.set_idle_adjust(Duration::from_millis(0));
        settings.set_idle_max_delay(Duration::from_millis(7_500));
        settings.set_reactive_throttle(Duration::from_millis(120));
        settings.set_idle_strength(0.3).unwrap();
        settings.set_neutral(-0.25).unwrap();
        settings.set_change_threshold(0.02).unwrap();

        assert_eq!(settings.poll_interval(), Duration::from_millis(1_200));
        assert_eq!(settings.light_adjust(), Duration::from_millis(800));
        assert_eq!(settings.dark_adjust(), Duration::from_millis(9_000));
        assert_eq!(settings.idle_adjust(), Duration::from_millis(0));
        assert_eq!(settings.idle_max_delay(), Duration::from_millis(7_500));
        assert_eq!(settings.reactive_throttle(), Duration::from_millis(120));
        assert_eq!(settings.idle_strength(), 0.3);
        assert_eq!(settings.neutral(), -0.25);
        assert_eq!(settings.change_threshold(), 0.02);
    }

    #[test]
    fn test_values_are_clamped_to_their_range() {
        let mut settings = Settings::default();
        settings.set_poll_interval(Duration::from_secs(60));
        settings.set_dark_adjust(Duration::from_secs(60));
        settings.set_reactive_throttle(Duration::from_secs(3));
        settings.set_idle_strength(4.0).unwrap();
        settings.set_neutral(-9.0).unwrap();

        assert_eq!(settings.poll_interval(), Duration::from_secs(5));
        assert_eq!(settings.dark_adjust(), Duration::from_secs(10));
        assert_eq!(settings.reactive_throttle(), Duration::from_secs(1));
        assert_eq!(settings.idle_strength(), 1.0);
        assert_eq!(settings.neutral(), -1.5);
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.set_idle_strength(f32::NAN),
            Err(SettingsError::NonFinite)
        );
        assert_eq!(
            settings.set_neutral(f32::INFINITY),
            Err(SettingsError::NonFinite)
        );
        assert_eq!(settings.idle_strength(), 0.05);
        assert_eq!(settings.neutral(), 0.0);
    }

    #[test]
    fn test_output_range_validation() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.set_output_range(1.0, -1.0),
            Err(SettingsError::InvertedRange)
        );
        assert_eq!(settings.output_range(), DEFAULT_OUTPUT_RANGE);

        settings.set_output_range(-0.5, 0.5).unwrap();
        assert_eq!(settings.output_range(), SettingRange::new(-0.5, 0.5));
    }

    #[test]
    fn test_apply_change() {
        let mut settings = Settings::default();
        settings
            .apply(SettingChange::IdleMaxDelay(Duration::from_millis(100)))
            .unwrap();
        settings
            .apply(SettingChange::OutputRange { min: -1.0, max: 1.0 })
            .unwrap();
        assert_eq!(settings.idle_max_delay(), Duration::from_millis(100));
        assert_eq!(settings.output_range(), SettingRange::new(-1.0, 1.0));
        assert_eq!(
            settings.apply(SettingChange::Neutral(f32::NAN)),
            Err(SettingsError::NonFinite)
        );
    }

    #[test]
    fn test_channel_is_fifo_and_bounded() {
        let channel = SettingsChannel::<2>::new();
        let sender = channel.sender();
        let receiver = channel.receiver();

        sender.try_send(SettingChange::IdleStrength(0.1)).unwrap();
        sender.try_send(SettingChange::IdleStrength(0.2)).unwrap();
        assert_eq!(
            sender.try_send(SettingChange::IdleStrength(0.3)),
            Err(QueueFull(SettingChange::IdleStrength(0.3)))
        );
        assert_eq!(channel.len(), 2);

        assert_eq!(receiver.try_receive(), Some(SettingChange::IdleStrength(0.1)));
        assert_eq!(receiver.try_receive(), Some(SettingChange::IdleStrength(0.2)));
        assert_eq!(receiver.try_receive(), None);
        assert!(channel.is_empty());
    }

    #[test]
    fn test_processor_applies_pending_changes() {
        let channel = SettingsChannel::<8>::new();
        let sender = channel.sender();
        let mut processor = SettingsProcessor::new(channel.receiver());
        let mut settings = Settings::default();

        assert!(!processor.process_pending(&mut settings).has_effects());

        sender
            .try_send(SettingChange::PollInterval(Duration::from_millis(500)))
            .unwrap();
        sender.try_send(SettingChange::Neutral(f32::NAN)).unwrap();
        sender
            .try_send(SettingChange::LightAdjust(Duration::from_millis(1_000)))
            .unwrap();

        let effects = processor.process_pending(&mut settings);
        assert_eq!(effects.applied, 2);
        assert_eq!(effects.rejected, 1);
        assert!(effects.poll_interval_changed);
        assert_eq!(settings.poll_interval(), Duration::from_millis(500));
        assert_eq!(settings.light_adjust(), Duration::from_millis(1_000));
        assert!(channel.is_empty());
    }
}

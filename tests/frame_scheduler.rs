mod common;

mod tests {
    use pupil_reflex::frame_scheduler::{DEFAULT_FRAME_DURATION, MAX_FRAME_STEP};
    use pupil_reflex::{
        Controller, ControllerConfig, ControllerContext, Duration, FrameScheduler, Instant,
        SettingChange, SettingsChannel, SettingsProcessor, TickOutcome,
    };

    use crate::common::{FakeLids, FakeTarget, ScriptedProvider};

    type TestController = Controller<ScriptedProvider, FakeTarget, FakeLids>;

    fn controller() -> TestController {
        Controller::init(
            ControllerContext {
                provider: ScriptedProvider::new(&[0.5]),
                target: FakeTarget::default(),
                blink: FakeLids::default(),
            },
            &ControllerConfig::default(),
        )
    }

    #[test]
    fn test_first_frame_has_zero_delta() {
        let mut frames = FrameScheduler::<_, _, _, 1>::new(controller());
        let result = frames.tick(Instant::from_millis(5_000));
        assert_eq!(result.outcome, TickOutcome::Ok);
        assert_eq!(frames.controller().provider().deltas, [0.0]);
    }

    #[test]
    fn test_deltas_follow_wall_clock() {
        let mut frames = FrameScheduler::<_, _, _, 1>::new(controller());
        frames.tick(Instant::from_millis(0));
        frames.tick(Instant::from_millis(20));
        frames.tick(Instant::from_millis(30));

        let deltas = &frames.controller().provider().deltas;
        assert!((deltas[1] - 0.02).abs() < 1.0e-6);
        assert!((deltas[2] - 0.01).abs() < 1.0e-6);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut frames = FrameScheduler::<_, _, _, 1>::new(controller());
        frames.tick(Instant::from_millis(0));
        frames.tick(Instant::from_secs(30));

        let deltas = &frames.controller().provider().deltas;
        assert!((deltas[1] - MAX_FRAME_STEP.as_micros() as f32 / 1.0e6).abs() < 1.0e-6);
    }

    #[test]
    fn test_sleep_until_next_frame() {
        let mut frames = FrameScheduler::<_, _, _, 1>::new(controller());
        let result = frames.tick(Instant::from_millis(0));
        assert_eq!(result.sleep_duration, DEFAULT_FRAME_DURATION);
        assert_eq!(result.next_deadline, Instant::from_millis(0) + DEFAULT_FRAME_DURATION);

        // past the next deadline but within the drift window: no sleep
        let result = frames.tick(Instant::from_millis(45));
        assert_eq!(result.sleep_duration, Duration::from_ticks(0));
    }

    #[test]
    fn test_falling_behind_resets_schedule() {
        let mut frames = FrameScheduler::<_, _, _, 1>::new(controller());
        frames.tick(Instant::from_millis(0));
        let result = frames.tick(Instant::from_millis(1_000));
        assert_eq!(result.sleep_duration, DEFAULT_FRAME_DURATION);
    }

    #[test]
    fn test_queued_settings_apply_before_tick() {
        let channel = SettingsChannel::<4>::new();
        let sender = channel.sender();
        let mut frames =
            FrameScheduler::new(controller()).with_settings(SettingsProcessor::new(channel.receiver()));

        sender
            .try_send(SettingChange::PollInterval(Duration::from_millis(750)))
            .unwrap();
        let result = frames.tick(Instant::from_millis(0));

        assert!(result.settings.poll_interval_changed);
        assert_eq!(result.settings.applied, 1);
        assert_eq!(
            frames.controller().provider().interval,
            Duration::from_millis(750)
        );

        let controller = frames.into_controller();
        assert_eq!(controller.settings().poll_interval(), Duration::from_millis(750));
    }
}

//! Desktop preview app for pupil-reflex
//!
//! Simulates a head in front of a movable point light and draws the eye with
//! the pupil driven by the controller output. Setting changes go through the
//! same queue a host UI would use.

use std::collections::VecDeque;
use std::time::Instant as StdInstant;

use eframe::egui::{self};
use pupil_reflex::math::{duration_from_secs, inverse_lerp, lerp, seconds};
use pupil_reflex::{
    BlinkWeight, Controller, ControllerConfig, ControllerContext, FrameScheduler, Instant, Light,
    LightEstimator, LightInventory, LinearColor, ParameterError, SchedulerPhase, SettingChange,
    Settings, SettingsChannel, SettingsProcessor, SettingsSender, TargetParameter, TickOutcome,
    Vec3,
};

/// Lights the simulated scene can hold
const MAX_LIGHTS: usize = 4;

/// Setting queue size
const SETTINGS_QUEUE_SIZE: usize = 16;

/// Output samples kept for the history plot
const HISTORY_LEN: usize = 360;

/// Eye radius in pixels
const EYE_RADIUS: f32 = 120.0;

/// Static settings queue between the UI and the frame loop
static SETTINGS_CHANNEL: SettingsChannel<SETTINGS_QUEUE_SIZE> =
    SettingsChannel::<SETTINGS_QUEUE_SIZE>::new();

/// Stand-in for the avatar's pupil morph
#[derive(Debug, Default)]
struct PupilMorph {
    value: f32,
}

impl TargetParameter for PupilMorph {
    fn read(&self) -> f32 {
        self.value
    }

    fn write(&mut self, value: f32) -> Result<(), ParameterError> {
        self.value = value;
        Ok(())
    }
}

type Scene = LightEstimator<LightInventory<MAX_LIGHTS>>;
type PreviewController = Controller<Scene, PupilMorph, BlinkWeight>;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_title("Pupil Reflex Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "pupil-reflex-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

/// Slider-backed copy of the settings the UI can change
#[derive(Debug, Clone, Copy, PartialEq)]
struct SettingsForm {
    poll_interval: f32,
    light_adjust: f32,
    dark_adjust: f32,
    idle_adjust: f32,
    idle_strength: f32,
    idle_max_delay: f32,
}

impl From<&Settings> for SettingsForm {
    fn from(settings: &Settings) -> Self {
        Self {
            poll_interval: seconds(settings.poll_interval()),
            light_adjust: seconds(settings.light_adjust()),
            dark_adjust: seconds(settings.dark_adjust()),
            idle_adjust: seconds(settings.idle_adjust()),
            idle_strength: settings.idle_strength(),
            idle_max_delay: seconds(settings.idle_max_delay()),
        }
    }
}

impl SettingsForm {
    /// Changes needed to go from `previous` to `self`
    #[allow(clippy::float_cmp)]
    fn changes_since(&self, previous: &Self) -> Vec<SettingChange> {
        let mut changes = Vec::new();
        if self.poll_interval != previous.poll_interval {
            changes.push(SettingChange::PollInterval(duration_from_secs(
                self.poll_interval,
            )));
        }
        if self.light_adjust != previous.light_adjust {
            changes.push(SettingChange::LightAdjust(duration_from_secs(
                self.light_adjust,
            )));
        }
        if self.dark_adjust != previous.dark_adjust {
            changes.push(SettingChange::DarkAdjust(duration_from_secs(
                self.dark_adjust,
            )));
        }
        if self.idle_adjust != previous.idle_adjust {
            changes.push(SettingChange::IdleAdjust(duration_from_secs(
                self.idle_adjust,
            )));
        }
        if self.idle_strength != previous.idle_strength {
            changes.push(SettingChange::IdleStrength(self.idle_strength));
        }
        if self.idle_max_delay != previous.idle_max_delay {
            changes.push(SettingChange::IdleMaxDelay(duration_from_secs(
                self.idle_max_delay,
            )));
        }
        changes
    }
}

struct PreviewApp {
    frames: FrameScheduler<'static, Scene, PupilMorph, BlinkWeight, SETTINGS_QUEUE_SIZE>,
    settings_sender: SettingsSender<'static, SETTINGS_QUEUE_SIZE>,

    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    playing: bool,
    time_scale: f32,

    // Scene controls
    lamp_distance: f32,
    lamp_height: f32,
    lamp_intensity: f32,
    lamp_color: [u8; 3],
    facing_lamp: bool,
    blink: f32,

    form: SettingsForm,
    last_outcome: TickOutcome,
    history: VecDeque<f32>,
}

impl PreviewApp {
    fn new() -> Self {
        let mut inventory = LightInventory::new();
        let _ = inventory.push(Light::point(Vec3::new(0.0, 0.0, 1.5), 4.0, 4.0));
        inventory.set_head(Vec3::ZERO, Vec3::FORWARD);

        let config = ControllerConfig::default();
        let controller: PreviewController = Controller::init(
            ControllerContext {
                provider: LightEstimator::new(inventory, config.settings.poll_interval()),
                target: PupilMorph::default(),
                blink: BlinkWeight(0.0),
            },
            &config,
        );
        let frames = FrameScheduler::new(controller)
            .with_settings(SettingsProcessor::new(SETTINGS_CHANNEL.receiver()));

        Self {
            frames,
            settings_sender: SETTINGS_CHANNEL.sender(),
            t_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            lamp_distance: 1.5,
            lamp_height: 0.0,
            lamp_intensity: 4.0,
            lamp_color: [255, 240, 220],
            facing_lamp: true,
            blink: 0.0,
            form: SettingsForm::from(&config.settings),
            last_outcome: TickOutcome::Waiting,
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = if delta_ms.is_finite() {
                delta_ms.max(0.0) as u64
            } else {
                0
            };
            self.t_ms = self.t_ms.wrapping_add(delta_ms);
        }
    }

    /// Push the UI scene state into the light inventory
    fn sync_scene(&mut self) {
        let controller = self.frames.controller_mut();
        controller.blink_mut().0 = self.blink;

        let scene = controller.provider_mut().scene_mut();
        let forward = if self.facing_lamp {
            Vec3::FORWARD
        } else {
            -Vec3::FORWARD
        };
        scene.set_head(Vec3::ZERO, forward);

        let [r, g, b] = self.lamp_color;
        let color = LinearColor::from_rgb8(pupil_reflex::Rgb::new(r, g, b));
        if let Some(lamp) = scene.lights_mut().first_mut() {
            lamp.position = Vec3::new(0.0, self.lamp_height, self.lamp_distance);
            lamp.intensity = self.lamp_intensity;
            lamp.color = color;
        }
    }

    fn send_setting_changes(&mut self, previous: &SettingsForm) {
        for change in self.form.changes_since(previous) {
            let _ = self.settings_sender.try_send(change);
        }
    }

    fn record(&mut self, value: f32) {
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(value);
    }

    fn draw_eye(&self, ui: &mut egui::Ui, value: f32) {
        let size = egui::vec2(EYE_RADIUS * 2.4, EYE_RADIUS * 2.4);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let center = response.rect.center();

        painter.circle_filled(center, EYE_RADIUS, egui::Color32::from_rgb(240, 236, 228));
        painter.circle_filled(center, EYE_RADIUS * 0.6, egui::Color32::from_rgb(70, 110, 150));

        let range = self.frames.controller().settings().output_range();
        let dilation = inverse_lerp(range.min, range.max, value);
        let pupil = EYE_RADIUS * lerp(0.12, 0.5, dilation);
        painter.circle_filled(center, pupil, egui::Color32::from_rgb(12, 12, 16));

        // eyelid drawn from the top as the blink closes
        if self.blink > 0.0 {
            let lid = egui::Rect::from_min_max(
                response.rect.min,
                egui::pos2(
                    response.rect.max.x,
                    response.rect.min.y + response.rect.height() * self.blink,
                ),
            );
            painter.rect_filled(lid, 0.0, egui::Color32::from_rgb(200, 160, 140));
        }
    }

    fn draw_history(&self, ui: &mut egui::Ui) {
        let width = ui.available_width();
        let (response, painter) =
            ui.allocate_painter(egui::vec2(width, 120.0), egui::Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 2.0, egui::Color32::from_gray(24));

        let range = self.frames.controller().settings().output_range();
        #[allow(clippy::cast_precision_loss)]
        let points: Vec<egui::Pos2> = self
            .history
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let x = rect.min.x + rect.width() * i as f32 / HISTORY_LEN as f32;
                let y = rect.max.y - rect.height() * inverse_lerp(range.min, range.max, *value);
                egui::pos2(x, y)
            })
            .collect();
        painter.line(points, egui::Stroke::new(1.5, egui::Color32::LIGHT_GREEN));
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.sync_scene();

        let result = self.frames.tick(Instant::from_millis(self.t_ms));
        self.last_outcome = result.outcome;
        let value = self.frames.controller().target().value;
        self.record(value);

        ctx.request_repaint();

        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("⏮ Reset").clicked() {
                    let _ = self.frames.controller_mut().reset();
                    self.history.clear();
                }
                if ui
                    .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                    .clicked()
                {
                    self.playing = !self.playing;
                }
            });
            ui.add(
                egui::Slider::new(&mut self.time_scale, 0.1..=5.0)
                    .logarithmic(true)
                    .text("speed"),
            );

            ui.separator();
            ui.label("Scene");
            ui.add(egui::Slider::new(&mut self.lamp_distance, 0.1..=6.0).text("lamp distance"));
            ui.add(egui::Slider::new(&mut self.lamp_height, -3.0..=3.0).text("lamp height"));
            ui.add(egui::Slider::new(&mut self.lamp_intensity, 0.0..=8.0).text("intensity"));
            ui.horizontal(|ui| {
                ui.label("Color:");
                ui.color_edit_button_srgb(&mut self.lamp_color);
            });
            ui.checkbox(&mut self.facing_lamp, "facing the lamp");
            ui.add(egui::Slider::new(&mut self.blink, 0.0..=1.0).text("blink"));

            ui.separator();
            ui.label("Settings");
            let previous = self.form;
            ui.add(egui::Slider::new(&mut self.form.poll_interval, 0.0..=5.0).text("poll s"));
            ui.add(egui::Slider::new(&mut self.form.light_adjust, 0.0..=10.0).text("light adjust s"));
            ui.add(egui::Slider::new(&mut self.form.dark_adjust, 0.0..=10.0).text("dark adjust s"));
            ui.add(egui::Slider::new(&mut self.form.idle_adjust, 0.0..=10.0).text("idle adjust s"));
            ui.add(egui::Slider::new(&mut self.form.idle_strength, 0.0..=1.0).text("idle strength"));
            ui.add(
                egui::Slider::new(&mut self.form.idle_max_delay, 0.0..=10.0).text("idle delay s"),
            );
            self.send_setting_changes(&previous);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let controller = self.frames.controller();
            let phase = match controller.phase() {
                SchedulerPhase::Settled => "settled",
                SchedulerPhase::IdleAnimating => "idle",
                SchedulerPhase::ReactiveAnimating => "reactive",
            };
            ui.label(format!(
                "brightness {:.3}  output {:+.3}  {phase}  {:?}",
                controller.sample().brightness,
                value,
                self.last_outcome
            ));
            self.draw_eye(ui, value);
            self.draw_history(ui);
        });
    }
}

//! Settings processing module
//!
//! Drains queued setting changes into the live [`Settings`].

use crate::channel::SettingsReceiver;
use crate::macros::diag;
use crate::settings::{SettingChange, Settings};

/// Summary of one drain pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsEffects {
    /// Number of changes applied
    pub applied: u16,
    /// Number of changes rejected as invalid
    pub rejected: u16,
    /// The poll interval was among the applied changes
    pub poll_interval_changed: bool,
}

impl SettingsEffects {
    pub const fn has_effects(&self) -> bool {
        self.applied > 0
    }
}

/// Applies queued [`SettingChange`]s
pub struct SettingsProcessor<'a, const SIZE: usize> {
    changes: SettingsReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> SettingsProcessor<'a, SIZE> {
    pub const fn new(changes: SettingsReceiver<'a, SIZE>) -> Self {
        Self { changes }
    }

    /// Apply every pending change (non-blocking)
    pub fn process_pending(&mut self, settings: &mut Settings) -> SettingsEffects {
        let mut effects = SettingsEffects::default();

        while let Some(change) = self.changes.try_receive() {
            match settings.apply(change) {
                Ok(()) => {
                    effects.applied = effects.applied.saturating_add(1);
                    if matches!(change, SettingChange::PollInterval(_)) {
                        effects.poll_interval_changed = true;
                    }
                }
                Err(error) => {
                    diag!(warn, "[SettingsProcessor] rejected {:?}: {}", change, error);
                    effects.rejected = effects.rejected.saturating_add(1);
                }
            }
        }

        effects
    }
}

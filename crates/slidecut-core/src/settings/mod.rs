//! Per-element settings, the store that owns them, and the regeneration gate.

mod gate;
mod store;
mod types;

pub use gate::{needs_regeneration, regeneration_reason, remix_eligible, RegenerationReason};
pub use store::{SettingsStore, SettingsUpdate};
pub use types::{ElementSettings, RenderMode, SettingsPatch};

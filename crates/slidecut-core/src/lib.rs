//! Slidecut Core - Region extraction and compositing engine
//!
//! This crate rebuilds individual elements of a decomposed slide screenshot:
//! coordinate transforms between the normalized scene and source pixels, the
//! region compositor (inflate, inset crop, erase, feather, PNG), the settings
//! store with its regeneration gate, debounced scheduling and the placement
//! geometry consumed by the deck exporter.

pub mod composite;
pub mod decode;
pub mod encode;
pub mod export;
pub mod geometry;
pub mod occlusion;
pub mod scene;
pub mod schedule;
pub mod session;
pub mod settings;
pub mod stroke;

pub use composite::{composite, composite_bytes, CompositeError, CompositeOptions, CompositedImage};
pub use decode::{decode_source, decode_source_base64, DecodeError, SourceImage};
pub use export::{layout_slide, ExportLayout};
pub use geometry::{
    to_percentage, to_pixel_space, visual_rect, CropInsets, GeometryError, NormalizedRect,
    SCENE_HEIGHT, SCENE_WIDTH,
};
pub use scene::{SlideData, SlideElement};
pub use schedule::{RegenerationScheduler, SchedulerConfig};
pub use session::{EditorSession, ImageRemixer, RemixError};
pub use settings::{ElementSettings, RenderMode, SettingsPatch, SettingsStore};
pub use stroke::StrokeRecorder;

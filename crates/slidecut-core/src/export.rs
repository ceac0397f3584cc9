//! Placement geometry for the slide-deck serializer.
//!
//! The deck writer itself is external. This module decides what goes on the
//! slide, where, and in which order; the writer only maps items to its own
//! shape calls.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::composite::CompositedImage;
use crate::geometry::{NormalizedRect, SCENE_HEIGHT, SCENE_WIDTH};
use crate::scene::{Alignment, ElementKind, ShapeType, SlideData, SlideElement};
use crate::settings::SettingsStore;

/// Slide inches per scene unit (a 1000-unit scene is a 10 inch slide).
pub const INCHES_PER_UNIT: f64 = 0.01;

/// Points per scene unit of font size.
pub const PT_PER_UNIT: f64 = 0.72;

pub const DEFAULT_FONT_SIZE: f64 = 18.0;

pub const DEFAULT_FILL_COLOR: &str = "000000";

pub const PLACEHOLDER_FILL: &str = "F1F5F9";
pub const PLACEHOLDER_TEXT_COLOR: &str = "94A3B8";
pub const PLACEHOLDER_FONT_SIZE_PT: f64 = 10.0;

/// A rectangle on the slide, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Placement {
    pub fn from_scene(rect: &NormalizedRect) -> Self {
        Self {
            x: rect.x * INCHES_PER_UNIT,
            y: rect.y * INCHES_PER_UNIT,
            w: rect.width * INCHES_PER_UNIT,
            h: rect.height * INCHES_PER_UNIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeGeometry {
    Ellipse,
    Rect,
}

/// What the serializer draws for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExportContent {
    #[serde(rename_all = "camelCase")]
    Shape {
        geometry: ShapeGeometry,
        /// Hex colour without `#`.
        fill_color: String,
        /// 0 (opaque) to 100 (invisible).
        transparency: f64,
        /// Fraction used by the writer's rounded-rectangle radius.
        rect_radius: f64,
    },
    /// Composited PNG, base64 without a scheme prefix.
    Image { base64: String },
    /// Raster element that has no composite to embed.
    #[serde(rename_all = "camelCase")]
    ImagePlaceholder {
        label: String,
        fill_color: String,
        text_color: String,
        font_size_pt: f64,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        text: String,
        font_size_pt: f64,
        color: String,
        bold: bool,
        alignment: Alignment,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportItem {
    pub element_id: String,
    pub placement: Placement,
    pub content: ExportContent,
}

/// Everything the deck serializer needs for one slide, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportLayout {
    pub width_in: f64,
    pub height_in: f64,
    /// Hex colour without `#`, or `None` for the writer's default.
    pub background_color: Option<String>,
    pub items: Vec<ExportItem>,
}

/// Text visibility inputs for [`layout_slide`].
#[derive(Debug, Clone, Copy)]
pub struct TextVisibility<'a> {
    /// Global text toggle.
    pub show_text: bool,
    /// Texts hidden by occlusion or by hand.
    pub hidden: &'a HashSet<String>,
}

fn strip_hash(color: &str) -> String {
    color.replace('#', "")
}

/// Lay out every visible element of `slide` for export.
///
/// Placements use each element's visual rectangle, so an inset crop lands
/// exactly where the editor shows it. Image-mode rasters embed their cached
/// composite; any other raster gets a labelled placeholder.
pub fn layout_slide(
    slide: &SlideData,
    store: &SettingsStore,
    images: &HashMap<String, CompositedImage>,
    text: TextVisibility<'_>,
) -> ExportLayout {
    let background_color = Some(slide.slide_meta.background_color.as_str())
        .filter(|c| !c.is_empty())
        .map(strip_hash);

    let items = slide
        .paint_order()
        .into_iter()
        .filter_map(|el| layout_element(el, store, images, text))
        .collect();

    ExportLayout {
        width_in: SCENE_WIDTH * INCHES_PER_UNIT,
        height_in: SCENE_HEIGHT * INCHES_PER_UNIT,
        background_color,
        items,
    }
}

fn layout_element(
    el: &SlideElement,
    store: &SettingsStore,
    images: &HashMap<String, CompositedImage>,
    text: TextVisibility<'_>,
) -> Option<ExportItem> {
    let settings = store.settings(&el.id);
    if settings.hidden {
        return None;
    }

    let rect = settings.visual_rect(&el.position);
    if rect.is_degenerate() {
        tracing::debug!(element = %el.id, "skipping element cropped to nothing");
        return None;
    }
    let placement = Placement::from_scene(&rect);
    let color = settings
        .fill_color
        .as_deref()
        .or(el.style.fill_color.as_deref())
        .filter(|c| !c.is_empty())
        .map_or_else(|| DEFAULT_FILL_COLOR.to_string(), strip_hash);

    let content = match el.kind {
        ElementKind::VectorShape => {
            let geometry = match el.shape_type {
                Some(ShapeType::Circle) => ShapeGeometry::Ellipse,
                _ => ShapeGeometry::Rect,
            };
            ExportContent::Shape {
                geometry,
                fill_color: color,
                transparency: el.style.opacity.map_or(0.0, |o| (1.0 - o) * 100.0),
                rect_radius: el.style.corner_radius.map_or(0.0, |r| r / 100.0),
            }
        }
        ElementKind::RasterImage => match images.get(&el.id).filter(|_| settings.is_image()) {
            Some(image) => ExportContent::Image {
                base64: image.base64.clone(),
            },
            None => ExportContent::ImagePlaceholder {
                label: format!("[Image: {}]", el.semantic_desc.as_deref().unwrap_or_default()),
                fill_color: PLACEHOLDER_FILL.to_string(),
                text_color: PLACEHOLDER_TEXT_COLOR.to_string(),
                font_size_pt: PLACEHOLDER_FONT_SIZE_PT,
            },
        },
        ElementKind::Text => {
            let content = el.content.as_deref().filter(|c| !c.is_empty())?;
            if !text.show_text || text.hidden.contains(&el.id) {
                return None;
            }
            let font_size = settings
                .font_size
                .or(el.style.font_size)
                .filter(|s| *s > 0.0)
                .unwrap_or(DEFAULT_FONT_SIZE);
            ExportContent::Text {
                text: content.to_string(),
                font_size_pt: font_size * PT_PER_UNIT,
                color,
                bold: el.style.is_bold.unwrap_or(false),
                alignment: el.style.alignment.unwrap_or_default(),
            }
        }
    };

    Some(ExportItem {
        element_id: el.id.clone(),
        placement,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CropInsets;
    use crate::settings::{RenderMode, SettingsPatch};

    const SLIDE: &str = r##"{
        "slide_meta": {"background_color": "#0F172A"},
        "elements": [
            {"id": "title", "type": "text", "content": "Hello",
             "position": {"x": 100, "y": 50, "width": 300, "height": 40},
             "style": {"font_size": 25, "is_bold": true, "fill_color": "#FFFFFF"}, "z_index": 5},
            {"id": "photo", "type": "raster_image", "semantic_desc": "team photo",
             "position": {"x": 500, "y": 100, "width": 400, "height": 300}, "z_index": 2},
            {"id": "dot", "type": "vector_shape", "shape_type": "circle",
             "position": {"x": 10, "y": 10, "width": 20, "height": 20},
             "style": {"fill_color": "#FF0000", "opacity": 0.25}, "z_index": 1},
            {"id": "card", "type": "vector_shape", "shape_type": "rounded_rect",
             "position": {"x": 0, "y": 0, "width": 1000, "height": 562.5},
             "style": {"corner_radius": 12}, "z_index": 0}
        ]
    }"##;

    fn fixture() -> (SlideData, SettingsStore) {
        let slide = SlideData::from_json(SLIDE).unwrap();
        let store = SettingsStore::for_slide(&slide);
        (slide, store)
    }

    fn layout(
        slide: &SlideData,
        store: &SettingsStore,
        images: &HashMap<String, CompositedImage>,
    ) -> ExportLayout {
        let hidden = HashSet::new();
        layout_slide(
            slide,
            store,
            images,
            TextVisibility {
                show_text: true,
                hidden: &hidden,
            },
        )
    }

    fn item<'a>(layout: &'a ExportLayout, id: &str) -> Option<&'a ExportItem> {
        layout.items.iter().find(|i| i.element_id == id)
    }

    #[test]
    fn test_slide_size_and_background() {
        let (slide, store) = fixture();
        let out = layout(&slide, &store, &HashMap::new());
        assert_eq!(out.width_in, 10.0);
        assert_eq!(out.height_in, 5.625);
        assert_eq!(out.background_color.as_deref(), Some("0F172A"));
    }

    #[test]
    fn test_items_in_z_order() {
        let (slide, store) = fixture();
        let out = layout(&slide, &store, &HashMap::new());
        let ids: Vec<&str> = out.items.iter().map(|i| i.element_id.as_str()).collect();
        assert_eq!(ids, vec!["card", "dot", "photo", "title"]);
    }

    #[test]
    fn test_shapes() {
        let (slide, store) = fixture();
        let out = layout(&slide, &store, &HashMap::new());

        match &item(&out, "dot").unwrap().content {
            ExportContent::Shape {
                geometry,
                fill_color,
                transparency,
                ..
            } => {
                assert_eq!(*geometry, ShapeGeometry::Ellipse);
                assert_eq!(fill_color, "FF0000");
                assert_eq!(*transparency, 75.0);
            }
            other => panic!("unexpected content: {other:?}"),
        }

        match &item(&out, "card").unwrap().content {
            ExportContent::Shape {
                geometry,
                fill_color,
                rect_radius,
                transparency,
            } => {
                assert_eq!(*geometry, ShapeGeometry::Rect);
                assert_eq!(fill_color, DEFAULT_FILL_COLOR);
                assert_eq!(*rect_radius, 0.12);
                assert_eq!(*transparency, 0.0);
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn test_raster_without_composite_is_placeholder() {
        let (slide, store) = fixture();
        let out = layout(&slide, &store, &HashMap::new());
        match &item(&out, "photo").unwrap().content {
            ExportContent::ImagePlaceholder { label, .. } => {
                assert_eq!(label, "[Image: team photo]")
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn test_image_mode_uses_visual_rect() {
        let (slide, mut store) = fixture();
        store.update(
            "photo",
            &SettingsPatch {
                render_mode: Some(RenderMode::Image),
                crop_insets: Some(CropInsets::new(20, 0, 50, 50)),
                ..SettingsPatch::default()
            },
            false,
        );
        let mut images = HashMap::new();
        images.insert("photo".to_string(), CompositedImage::from_png(vec![1, 2, 3], 1, 1));

        let out = layout(&slide, &store, &images);
        let photo = item(&out, "photo").unwrap();

        assert_eq!(
            photo.content,
            ExportContent::Image {
                base64: "AQID".to_string()
            }
        );
        let p = photo.placement;
        assert!((p.x - 5.5).abs() < 1e-9);
        assert!((p.y - 1.2).abs() < 1e-9);
        assert!((p.w - 3.0).abs() < 1e-9);
        assert!((p.h - 2.8).abs() < 1e-9);
    }

    #[test]
    fn test_insets_past_the_element_skip_it() {
        let (slide, mut store) = fixture();
        store.update(
            "photo",
            &SettingsPatch {
                render_mode: Some(RenderMode::Image),
                crop_insets: Some(CropInsets::new(150, 150, 250, 250)),
                ..SettingsPatch::default()
            },
            false,
        );
        let mut images = HashMap::new();
        images.insert("photo".to_string(), CompositedImage::from_png(vec![1], 1, 1));

        let out = layout(&slide, &store, &images);
        assert!(item(&out, "photo").is_none());
        assert!(out.items.iter().all(|i| i.placement.w > 0.0 && i.placement.h > 0.0));
    }

    #[test]
    fn test_cached_image_ignored_in_svg_mode() {
        let (slide, store) = fixture();
        let mut images = HashMap::new();
        images.insert("photo".to_string(), CompositedImage::from_png(vec![1], 1, 1));
        let out = layout(&slide, &store, &images);
        assert!(matches!(
            item(&out, "photo").unwrap().content,
            ExportContent::ImagePlaceholder { .. }
        ));
    }

    #[test]
    fn test_text_font_and_color() {
        let (slide, mut store) = fixture();
        store.update(
            "title",
            &SettingsPatch {
                fill_color: Some("#00FF00".to_string()),
                ..SettingsPatch::default()
            },
            false,
        );
        let out = layout(&slide, &store, &HashMap::new());
        match &item(&out, "title").unwrap().content {
            ExportContent::Text {
                text,
                font_size_pt,
                color,
                bold,
                alignment,
            } => {
                assert_eq!(text, "Hello");
                assert!((font_size_pt - 18.0).abs() < 1e-9);
                assert_eq!(color, "00FF00");
                assert!(*bold);
                assert_eq!(*alignment, Alignment::Left);
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn test_hidden_and_suppressed_text() {
        let (slide, mut store) = fixture();
        let mut hidden = HashSet::new();
        hidden.insert("title".to_string());
        let out = layout_slide(
            &slide,
            &store,
            &HashMap::new(),
            TextVisibility {
                show_text: true,
                hidden: &hidden,
            },
        );
        assert!(item(&out, "title").is_none());

        let none = HashSet::new();
        let out = layout_slide(
            &slide,
            &store,
            &HashMap::new(),
            TextVisibility {
                show_text: false,
                hidden: &none,
            },
        );
        assert!(item(&out, "title").is_none());

        store.update(
            "dot",
            &SettingsPatch {
                hidden: Some(true),
                ..SettingsPatch::default()
            },
            false,
        );
        let out = layout(&slide, &store, &HashMap::new());
        assert!(item(&out, "dot").is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let (slide, store) = fixture();
        let out = layout(&slide, &store, &HashMap::new());
        let json = serde_json::to_value(item(&out, "photo").unwrap()).unwrap();
        assert_eq!(json["elementId"], "photo");
        assert_eq!(json["content"]["kind"], "imagePlaceholder");
        assert_eq!(json["content"]["fontSizePt"], 10.0);
    }
}

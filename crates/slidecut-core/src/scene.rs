//! Scene graph produced by the slide decomposition service.
//!
//! The core treats this as already validated input. Field names follow the
//! service's snake_case JSON.

use serde::{Deserialize, Serialize};

use crate::geometry::NormalizedRect;

/// Kind of a decomposed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Text,
    VectorShape,
    RasterImage,
}

/// Primitive used to draw a vector shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    Rect,
    Circle,
    Line,
    RoundedRect,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Style hints attached to an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    /// 0.0 (transparent) to 1.0 (opaque)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// In scene units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
}

/// One decomposed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<ShapeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_desc: Option<String>,
    pub position: NormalizedRect,
    #[serde(default)]
    pub style: ElementStyle,
    #[serde(default)]
    pub z_index: i32,
}

impl SlideElement {
    pub fn is_raster(&self) -> bool {
        self.kind == ElementKind::RasterImage
    }

    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }
}

/// Slide-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideMeta {
    #[serde(default)]
    pub background_color: String,
}

/// The full decomposition of one slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideData {
    pub slide_meta: SlideMeta,
    pub elements: Vec<SlideElement>,
}

impl SlideData {
    /// Parse the decomposition service's JSON.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the JSON does not match the schema.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn element(&self, id: &str) -> Option<&SlideElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Elements in paint order (ascending z-index, stable for ties).
    pub fn paint_order(&self) -> Vec<&SlideElement> {
        let mut ordered: Vec<&SlideElement> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.z_index);
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "slide_meta": {"background_color": "#FFFFFF"},
        "elements": [
            {
                "id": "title",
                "type": "text",
                "content": "Quarterly results",
                "position": {"x": 50, "y": 40, "width": 600, "height": 60},
                "style": {"font_size": 32, "is_bold": true, "alignment": "center"},
                "z_index": 3
            },
            {
                "id": "chart",
                "type": "raster_image",
                "semantic_desc": "bar chart",
                "position": {"x": 100, "y": 120, "width": 400, "height": 300},
                "style": {},
                "z_index": 1
            },
            {
                "id": "panel",
                "type": "vector_shape",
                "shape_type": "rounded_rect",
                "position": {"x": 0, "y": 0, "width": 1000, "height": 562.5},
                "style": {"fill_color": "#E2E8F0", "corner_radius": 12, "opacity": 0.5},
                "z_index": 0
            }
        ]
    }"##;

    #[test]
    fn test_parse_sample() {
        let slide = SlideData::from_json(SAMPLE).unwrap();
        assert_eq!(slide.slide_meta.background_color, "#FFFFFF");
        assert_eq!(slide.elements.len(), 3);

        let title = slide.element("title").unwrap();
        assert!(title.is_text());
        assert_eq!(title.style.alignment, Some(Alignment::Center));
        assert_eq!(title.style.font_size, Some(32.0));

        let chart = slide.element("chart").unwrap();
        assert!(chart.is_raster());
        assert_eq!(chart.position, NormalizedRect::new(100.0, 120.0, 400.0, 300.0));

        let panel = slide.element("panel").unwrap();
        assert_eq!(panel.shape_type, Some(ShapeType::RoundedRect));
    }

    #[test]
    fn test_paint_order() {
        let slide = SlideData::from_json(SAMPLE).unwrap();
        let ids: Vec<&str> = slide.paint_order().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["panel", "chart", "title"]);
    }

    #[test]
    fn test_missing_element() {
        let slide = SlideData::from_json(SAMPLE).unwrap();
        assert!(slide.element("nope").is_none());
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let json = r#"{"slide_meta": {"background_color": ""}, "elements": [
            {"id": "a", "type": "video", "position": {"x": 0, "y": 0, "width": 1, "height": 1}}
        ]}"#;
        assert!(SlideData::from_json(json).is_err());
    }
}

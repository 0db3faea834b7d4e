//! Project document serialization.
//!
//! Loading is lenient: only the `format` marker is checked. Missing, `null` or mistyped values
//! fall back to defaults instead of failing the whole document.

use crate::shapes::{Shape, ShapeKind, ShapeType, SnapFlags, generate_id};
use crate::transform::DEFAULT_PIXELS_PER_FOOT;
use chrono::{DateTime, Utc};
use kurbo::Point;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Value of the `format` field that identifies a project document.
pub const PROJECT_FORMAT: &str = "FloorPlanProject";
/// Document version written by this library.
pub const PROJECT_VERSION: u32 = 1;
/// Thickness, in feet, of entities that do not specify one.
pub const DEFAULT_THICKNESS: f64 = 0.5;

/// Project (de)serialization errors.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not a floor plan project (format: {0:?})")]
    InvalidFormat(String),
    #[error("Invalid project JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A floor plan: the shape collection plus the canvas scale it was drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub pixels_per_foot: f64,
    pub shapes: Vec<Shape>,
    /// When the project was first created. Kept across saves.
    pub created: DateTime<Utc>,
}

impl Default for Project {
    fn default() -> Self {
        Self::new(DEFAULT_PIXELS_PER_FOOT, Vec::new())
    }
}

impl Project {
    pub fn new(pixels_per_foot: f64, shapes: Vec<Shape>) -> Self {
        Self {
            pixels_per_foot,
            shapes,
            created: Utc::now(),
        }
    }

    /// Serialize to a pretty-printed project document, stamped as modified now.
    pub fn to_json(&self) -> Result<String, ProjectError> {
        write_document(&self.shapes, self.pixels_per_foot, self.created)
    }

    /// Parse a project document.
    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        deserialize_project(json)
    }
}

/// Serialize a shape collection into a new project document, created and modified now.
pub fn serialize_project(shapes: &[Shape], pixels_per_foot: f64) -> Result<String, ProjectError> {
    write_document(shapes, pixels_per_foot, Utc::now())
}

fn write_document(
    shapes: &[Shape],
    pixels_per_foot: f64,
    created: DateTime<Utc>,
) -> Result<String, ProjectError> {
    let document = DocumentOut {
        format: PROJECT_FORMAT,
        version: PROJECT_VERSION,
        units: Units { length: "feet" },
        settings: SettingsOut {
            pixels_per_unit: pixels_per_foot,
        },
        entities: shapes.iter().map(EntityOut::from).collect(),
        meta: MetaOut {
            created,
            modified: Utc::now(),
        },
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parse a project document.
///
/// Fails only on malformed JSON or a wrong `format`. Entities with an unknown type are
/// skipped.
pub fn deserialize_project(json: &str) -> Result<Project, ProjectError> {
    let document: DocumentIn = serde_json::from_str(json)?;

    if document.format.as_deref() != Some(PROJECT_FORMAT) {
        return Err(ProjectError::InvalidFormat(document.format.unwrap_or_default()));
    }
    if let Some(version) = document.version {
        if version > f64::from(PROJECT_VERSION) {
            log::warn!("Project version {} is newer than {}, loading anyway", version, PROJECT_VERSION);
        }
    }

    let pixels_per_foot = document
        .settings
        .pixels_per_unit
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(DEFAULT_PIXELS_PER_FOOT);

    let created = document
        .meta
        .created
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    let total = document.entities.len();
    let shapes: Vec<Shape> = document
        .entities
        .into_iter()
        .filter_map(EntityIn::into_shape)
        .collect();
    log::info!("Loaded project: {} of {} entities", shapes.len(), total);

    Ok(Project {
        pixels_per_foot,
        shapes,
        created,
    })
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    format: &'static str,
    version: u32,
    units: Units,
    settings: SettingsOut,
    entities: Vec<EntityOut<'a>>,
    meta: MetaOut,
}

#[derive(Serialize)]
struct MetaOut {
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

#[derive(Serialize)]
struct Units {
    length: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsOut {
    pixels_per_unit: f64,
}

#[derive(Serialize)]
struct EntityOut<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    shape_type: ShapeType,
    geometry: GeometryRecord,
    properties: PropertiesOut<'a>,
}

#[derive(Serialize)]
struct GeometryRecord {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

#[derive(Serialize)]
struct PropertiesOut<'a> {
    thickness: f64,
    color: Option<&'a str>,
    swing: bool,
    #[serde(skip_serializing_if = "SnapFlags::is_empty")]
    snap: SnapFlags,
}

impl<'a> From<&'a Shape> for EntityOut<'a> {
    fn from(shape: &'a Shape) -> Self {
        Self {
            id: shape.id(),
            shape_type: shape.shape_type(),
            geometry: GeometryRecord {
                x1: shape.start.x,
                y1: shape.start.y,
                x2: shape.end.x,
                y2: shape.end.y,
            },
            properties: PropertiesOut {
                thickness: shape.thickness,
                color: Some(shape.color.as_str()),
                swing: shape.swing().unwrap_or(false),
                snap: shape.snap,
            },
        }
    }
}

/// Any non-number reads as absent.
fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.and_then(|v| v.as_f64()))
}

/// Any non-boolean reads as absent.
fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.and_then(|v| v.as_bool()))
}

/// Any non-string reads as absent.
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.and_then(|v| v.as_str().map(str::to_string)))
}

/// `null` or a value of the wrong shape reads as the default.
fn lenient_object<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(Option::<Value>::deserialize(d)?
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

/// Entities that are not objects are dropped one by one.
fn lenient_entities<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<EntityIn>, D::Error> {
    let Some(Value::Array(items)) = Option::<Value>::deserialize(d)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<EntityIn>(item) {
            Ok(entity) => Some(entity),
            Err(e) => {
                log::warn!("Skipping malformed entity: {}", e);
                None
            }
        })
        .collect())
}

/// Flags that are not `true` read as false.
fn lenient_snap<'de, D: Deserializer<'de>>(d: D) -> Result<SnapFlags, D::Error> {
    let value = Option::<Value>::deserialize(d)?.unwrap_or(Value::Null);
    let flag = |key: &str| value.get(key).and_then(Value::as_bool).unwrap_or(false);
    Ok(SnapFlags {
        left: flag("left"),
        right: flag("right"),
        top: flag("top"),
        bottom: flag("bottom"),
    })
}

#[derive(Deserialize)]
struct DocumentIn {
    #[serde(default, deserialize_with = "lenient_string")]
    format: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    version: Option<f64>,
    #[serde(default, deserialize_with = "lenient_object")]
    settings: SettingsIn,
    #[serde(default, deserialize_with = "lenient_entities")]
    entities: Vec<EntityIn>,
    #[serde(default, deserialize_with = "lenient_object")]
    meta: MetaIn,
}

#[derive(Deserialize, Default)]
struct MetaIn {
    #[serde(default, deserialize_with = "lenient_string")]
    created: Option<String>,
}

#[derive(Deserialize, Default)]
struct SettingsIn {
    #[serde(default, rename = "pixelsPerUnit", deserialize_with = "lenient_f64")]
    pixels_per_unit: Option<f64>,
}

#[derive(Deserialize)]
struct EntityIn {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    shape_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    geometry: GeometryIn,
    #[serde(default, deserialize_with = "lenient_object")]
    properties: PropertiesIn,
}

#[derive(Deserialize, Default)]
struct GeometryIn {
    #[serde(default, deserialize_with = "lenient_f64")]
    x1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    y1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    x2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    y2: Option<f64>,
}

#[derive(Deserialize, Default)]
struct PropertiesIn {
    #[serde(default, deserialize_with = "lenient_f64")]
    thickness: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    color: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    swing: Option<bool>,
    #[serde(default, deserialize_with = "lenient_snap")]
    snap: SnapFlags,
}

impl EntityIn {
    fn into_shape(self) -> Option<Shape> {
        let type_name = self.shape_type.unwrap_or_default();
        let shape_type = match type_name.parse::<ShapeType>() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Skipping entity {:?}: {}", self.id, e);
                return None;
            }
        };

        let kind = match shape_type {
            ShapeType::Door => ShapeKind::Door {
                swing: self.properties.swing.unwrap_or(false),
            },
            other => other.into(),
        };
        let g = self.geometry;
        let start = Point::new(g.x1.unwrap_or(0.0), g.y1.unwrap_or(0.0));
        let end = Point::new(g.x2.unwrap_or(0.0), g.y2.unwrap_or(0.0));
        let id = self.id.unwrap_or_else(generate_id);
        if start == end {
            log::warn!("Entity {} has zero length", id);
        }

        Some(Shape::reconstruct(
            id,
            kind,
            start,
            end,
            self.properties.thickness.unwrap_or(DEFAULT_THICKNESS),
            self.properties
                .color
                .unwrap_or_else(|| shape_type.default_color().to_string()),
            self.properties.snap,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_preserves_shapes() {
        let mut wall = Shape::make("wall", 0.0, 0.0, 10.0, 0.0, 0.5).unwrap();
        wall.snap.left = true;
        let mut door = Shape::make("door", 2.0, 0.0, 5.0, 0.0, 0.2).unwrap();
        door.kind = ShapeKind::Door { swing: true };
        let dim = Shape::make("dimension", 0.0, 1.0, 10.0, 1.0, 0.0).unwrap();
        let project = Project::new(24.0, vec![wall, door, dim]);

        let loaded = Project::from_json(&project.to_json().unwrap()).unwrap();
        assert_eq!(loaded, project);
        assert!(loaded.shapes[0].snap.left);
        assert!(!loaded.shapes[0].snap.right);
        assert!(!loaded.shapes[0].snap.top);
        assert!(!loaded.shapes[0].snap.bottom);
        assert_eq!(loaded.shapes[1].swing(), Some(true));
    }

    #[test]
    fn test_document_layout() {
        let mut wall = Shape::make("wall", 1.0, 2.0, 3.0, 2.0, 0.5).unwrap();
        wall.snap.top = true;
        let window = Shape::make("window", 0.0, 0.0, 1.0, 0.0, 0.3).unwrap();
        let json = serialize_project(&[wall, window], 20.0).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["format"], "FloorPlanProject");
        assert_eq!(value["version"], 1);
        assert_eq!(value["units"]["length"], "feet");
        assert_eq!(value["settings"]["pixelsPerUnit"], 20.0);

        let first = &value["entities"][0];
        assert_eq!(first["type"], "wall");
        assert_eq!(first["geometry"]["x2"], 3.0);
        assert_eq!(first["properties"]["color"], "#d2cab0");
        assert_eq!(first["properties"]["swing"], false);
        // Only true flags are written
        assert_eq!(first["properties"]["snap"], serde_json::json!({ "top": true }));
        // No flags, no snap object
        assert!(value["entities"][1]["properties"].get("snap").is_none());
        assert!(value["meta"]["created"].is_string());
        assert!(value["meta"]["modified"].is_string());
    }

    #[test]
    fn test_load_ignores_key_order() {
        let json = r#"{
            "entities": [{
                "properties": { "snap": { "bottom": false, "left": true }, "swing": false },
                "geometry": { "y2": 4, "x2": 3.2, "y1": 0, "x1": 3.2 },
                "type": "wall",
                "id": "eabc1234"
            }],
            "settings": { "pixelsPerUnit": 32 },
            "version": 1,
            "format": "FloorPlanProject"
        }"#;
        let project = deserialize_project(json).unwrap();
        assert!((project.pixels_per_foot - 32.0).abs() < f64::EPSILON);
        let shape = &project.shapes[0];
        assert_eq!(shape.id(), "eabc1234");
        assert_eq!(shape.end, Point::new(3.2, 4.0));
        assert!(shape.snap.left);
        assert!(!shape.snap.right && !shape.snap.top && !shape.snap.bottom);
    }

    #[test]
    fn test_defaults_for_missing_properties() {
        let json = r#"{
            "format": "FloorPlanProject",
            "entities": [
                { "id": "e0000001", "type": "door", "geometry": { "x1": 0, "y1": 0, "x2": 3, "y2": 0 } },
                { "id": "e0000002", "type": "window", "geometry": { "x1": 0, "y1": 0, "x2": 3, "y2": 0 },
                  "properties": { "thickness": "thick", "color": null } }
            ]
        }"#;
        let project = deserialize_project(json).unwrap();
        assert!((project.pixels_per_foot - DEFAULT_PIXELS_PER_FOOT).abs() < f64::EPSILON);

        let door = &project.shapes[0];
        assert!((door.thickness - DEFAULT_THICKNESS).abs() < f64::EPSILON);
        assert_eq!(door.color, "#c4a9a9a3");
        assert_eq!(door.swing(), Some(false));
        assert!(door.snap.is_empty());

        let window = &project.shapes[1];
        assert!((window.thickness - DEFAULT_THICKNESS).abs() < f64::EPSILON);
        assert_eq!(window.color, "#aeb0b0");
    }

    #[test]
    fn test_wrong_format_is_rejected() {
        let err = deserialize_project(r#"{ "format": "Excalidraw", "entities": [] }"#).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidFormat(ref f) if f == "Excalidraw"));

        let err = deserialize_project(r#"{ "entities": [] }"#).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidFormat(_)));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = deserialize_project("{ not json").unwrap_err();
        assert!(matches!(err, ProjectError::Json(_)));
    }

    #[test]
    fn test_newer_version_still_loads() {
        let json = r#"{ "format": "FloorPlanProject", "version": 7, "entities": [] }"#;
        assert!(deserialize_project(json).unwrap().shapes.is_empty());
    }

    #[test]
    fn test_null_objects_read_as_defaults() {
        let json = r#"{
            "format": "FloorPlanProject",
            "settings": null,
            "meta": null,
            "entities": [
                { "id": "e1", "type": "wall", "geometry": { "x1": 0, "y1": 0, "x2": 4, "y2": 0 },
                  "properties": null },
                { "id": "e2", "type": "window", "geometry": null, "properties": "thin" }
            ]
        }"#;
        let project = deserialize_project(json).unwrap();
        assert!((project.pixels_per_foot - DEFAULT_PIXELS_PER_FOOT).abs() < f64::EPSILON);
        assert_eq!(project.shapes.len(), 2);

        let wall = &project.shapes[0];
        assert!((wall.thickness - DEFAULT_THICKNESS).abs() < f64::EPSILON);
        assert_eq!(wall.color, "#d2cab0");
        assert!(wall.snap.is_empty());

        let window = &project.shapes[1];
        assert_eq!((window.start, window.end), (Point::ZERO, Point::ZERO));
        assert!((window.thickness - DEFAULT_THICKNESS).abs() < f64::EPSILON);
    }

    #[test]
    fn test_null_or_malformed_entities() {
        let json = r#"{ "format": "FloorPlanProject", "entities": null }"#;
        assert!(deserialize_project(json).unwrap().shapes.is_empty());

        let json = r#"{
            "format": "FloorPlanProject",
            "entities": [ 42, { "id": "e1", "type": "door", "geometry": { "x2": 3 } } ]
        }"#;
        let project = deserialize_project(json).unwrap();
        assert_eq!(project.shapes.len(), 1);
        assert_eq!(project.shapes[0].id(), "e1");
    }

    #[test]
    fn test_meta_timestamps() {
        let json = r#"{
            "format": "FloorPlanProject",
            "meta": { "created": "2024-03-01T12:30:00Z", "modified": "2024-03-02T08:00:00Z" },
            "entities": []
        }"#;
        let project = deserialize_project(json).unwrap();
        assert_eq!(project.created.to_rfc3339(), "2024-03-01T12:30:00+00:00");

        let value: Value = serde_json::from_str(&project.to_json().unwrap()).unwrap();
        let created = value["meta"]["created"].as_str().unwrap();
        let modified = value["meta"]["modified"].as_str().unwrap();
        assert_eq!(
            DateTime::parse_from_rfc3339(created).unwrap(),
            project.created
        );
        assert!(DateTime::parse_from_rfc3339(modified).unwrap() > project.created);
    }

    #[test]
    fn test_unknown_entity_type_is_skipped() {
        let json = r#"{
            "format": "FloorPlanProject",
            "entities": [
                { "id": "e1", "type": "stair", "geometry": { "x1": 0, "y1": 0, "x2": 1, "y2": 1 } },
                { "id": "e2", "type": "wall", "geometry": { "x1": 0, "y1": 0, "x2": 1, "y2": 1 } }
            ]
        }"#;
        let project = deserialize_project(json).unwrap();
        assert_eq!(project.shapes.len(), 1);
        assert_eq!(project.shapes[0].id(), "e2");
    }
}

//! Floor-plan core library
//!
//! Platform-agnostic geometry for the floor-plan editor: the shape model, world/canvas/screen
//! transforms, hit-testing, grid snapping and the editing operations. Rendering and undo storage
//! belong to the host, which is reached through [`EditorHost`]. Projects are saved as JSON
//! documents through a [`ProjectStore`].

pub mod edit;
pub mod editor;
pub mod error;
pub mod hit;
pub mod project;
pub mod shapes;
pub mod snap;
pub mod storage;
pub mod transform;

pub use edit::{Anchor, DEFAULT_MOVE_STEP, Direction, FlipAxis};
pub use editor::{Editor, EditorHost, EditorSettings, NoopHost};
pub use error::ParseError;
pub use hit::{Endpoint, Pick, hit_shape_endpoint, hit_test, pick};
pub use project::{PROJECT_FORMAT, PROJECT_VERSION, Project, ProjectError};
pub use shapes::{Shape, ShapeGeometry, ShapeId, ShapeKind, ShapeType, Side, SnapFlags, geometry};
pub use snap::{GridLevel, Orientation, snap_shape, snap_value};
pub use storage::{MemoryStorage, ProjectStore, StorageError, StorageResult, load_from_path, save_to_path};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
pub use transform::{ViewContext, distance_point_to_segment, distance_to_point, format_feet_inches};

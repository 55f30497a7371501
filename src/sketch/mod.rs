pub mod codec;
pub mod composite;
pub mod engine;
pub mod error;
pub mod history;
pub mod input;
pub mod model;
pub mod persist;
pub mod profile;
pub mod render;
pub mod settings;
pub mod settings_store;
pub mod state;
pub mod surface;

pub use codec::SurfaceBlob;
pub use engine::SketchEngine;
pub use error::SketchError;
pub use input::{PointerPhase, PointerSample};
pub use model::{Color, CompositeMode, Point, StrokeStyle, StrokeWidth, Tool};
pub use persist::{Clock, NoteStoreCollaborator, SystemClock};
pub use profile::ToolProfile;
pub use render::DirtyRect;
pub use settings::SketchSettings;
pub use state::StrokeState;
pub use surface::Surface;

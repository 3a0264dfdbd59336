pub mod clock;
pub mod collision;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod render;
pub mod selection;
pub mod staging;
pub mod timeline;
pub mod view;

pub use editor::{EditorEvent, ModeKind, Response, TimelineEditor};
pub use error::{CoreError, Result};
pub use timeline::{Segment, SegmentId, SplineSegment, Timeline, Track, TrackKind};

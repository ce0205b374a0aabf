//! comptree is an in-memory document engine for nested video compositions.
//!
//! A document is a forest of [`Composition`]s. Each composition owns ordered [`Track`]s,
//! each track owns timed [`Clip`]s, and compositions nest inside each other to any depth.
//! All state lives in one [`Engine`]:
//!
//! - Create, update and delete compositions, tracks and clips
//! - Nest and un-nest compositions, with cycle rejection
//! - Copy, cut and paste clips through an owned clipboard
//! - Undo/redo every mutation, optionally grouped into batches
//! - Track the active composition, playhead, zoom and selection
//! - Export a composition subtree and import it back with fresh ids
//!
//! ```
//! use comptree::{ClipKind, Engine, NewComposition};
//!
//! let mut engine = Engine::default();
//! let main = engine.create_composition(NewComposition::named("Main"))?;
//! let video = engine.tracks_of(&main)[0].id.clone();
//! let clip = engine.add_clip(&video, "Intro", 0.0, 2000.0, ClipKind::Video, None)?;
//! engine.move_clip(&clip, &video, 500.0)?;
//! assert!(engine.undo());
//! assert_eq!(engine.clip(&clip).map(|c| c.start_time), Some(0.0));
//! # Ok::<(), comptree::CompError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod edit;
pub(crate) mod engine;
pub(crate) mod history;
pub(crate) mod model;
pub(crate) mod serial;
pub(crate) mod store;
pub(crate) mod timeline;

pub use crate::foundation::config::{CompositionDefaults, EngineOpts};
pub use crate::foundation::core::{
    AssetId, ClipId, CompositionId, EntityKind, TrackId, Vec2, now_ms,
};
pub use crate::foundation::error::{CompError, CompResult};

pub use crate::edit::clipboard::{Clipboard, ClipboardItem};
pub use crate::engine::Engine;
pub use crate::engine::notify::{Notification, SubscriptionId};
pub use crate::history::entry::{Change, EntityChange, EntityRef, HistoryEntry, Operation};
pub use crate::history::manager::HistoryManager;
pub use crate::model::clip::{AudioProps, Clip, ClipKind, ClipPatch, EffectRef, VisualProps};
pub use crate::model::composition::{Composition, CompositionPatch, NewComposition};
pub use crate::model::keyframe::{Ease, Keyframe};
pub use crate::model::track::{Track, TrackKind, TrackPatch};
pub use crate::serial::export::ExportedComposition;
pub use crate::store::integrity::Violation;
pub use crate::store::registry::Registry;
pub use crate::timeline::selection::SelectionState;
pub use crate::timeline::state::TimelineState;

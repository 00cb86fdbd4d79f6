//! OneLib - a grab-bag of everyday helpers
//!
//! The crate root is the namespace: every helper is re-exported here, so
//! `onelib::slug(..)`, `onelib::sum(..)` and `onelib::save(..)` all work.
//!
//! | Topic       | Module          | Ambient collaborator           |
//! |-------------|-----------------|--------------------------------|
//! | DOM         | [`dom`]         | `DomService` (owned document)  |
//! | Math        | [`math`]        | thread RNG                     |
//! | Text        | [`text`]        |                                |
//! | Collections | [`collections`] | thread RNG (`shuffle`)         |
//! | Storage     | [`storage`]     | `KeyValueStore`                |
//! | Clipboard   | [`clipboard`]   | `Clipboard`                    |
//! | Dates       | [`dates`]       | system clock                   |
//! | Types       | [`predicates`]  |                                |
//! | Misc        | [`timing`], [`misc`] | Tokio timers, `tracing`   |
//!
//! [`OneLib`] bundles the document, store, clipboard and config for callers
//! that want a single handle.

pub mod clipboard;
pub mod collections;
pub mod config;
pub mod dates;
pub mod error;
pub mod math;
pub mod misc;
pub mod namespace;
pub mod predicates;
pub mod storage;
pub mod text;
pub mod timing;

pub use dom;
pub use dom::{Document, DomService, DomServiceConfig, NodeId, Target};

pub use clipboard::{copy, Clipboard, MemoryClipboard, SystemClipboard};
pub use collections::{chunk, clone, merge, shuffle, unique};
pub use config::{OneLibConfig, StorageConfig};
pub use dates::{format, format_default, now, since, since_at, timestamp, IntoDateTime};
pub use error::{ClipboardError, Error, Result};
pub use math::{avg, clamp, max, min, rand, rand_unit, randint, round, sum};
pub use misc::{log, uuid};
pub use namespace::{OneLib, OneLibBuilder};
pub use predicates::{is_arr, is_bool, is_empty, is_func, is_num, is_obj, is_str, Dynamic};
pub use storage::{clear, load, load_as, save, FileStore, KeyValueStore, MemoryStore};
pub use text::{capitalize, lower, reverse, slug, trim, truncate, truncate_default, upper, words};
pub use timing::{debounce, throttle, wait, Debounce, Throttle};

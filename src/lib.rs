#![allow(non_snake_case)]

// Базовые модули
pub mod config;
pub mod item;
pub mod metrics;

// Сегментация документа (папка с mod.rs)
pub mod parse; // src/parse/{mod,scan}.rs

// Коллабораторы write-пути
pub mod gql; // canonicalize + fast_parse
pub mod jsonx; // variables cleaning

// Абстрактная файловая система и стор
pub mod vfs; // src/vfs/mod.rs
pub mod store; // src/store/{mod,core,open,save,read}.rs

// Удобные реэкспорты
pub use config::{AllowConfig, SaveObserver};
pub use item::{Frag, Item, Metadata, Order};
pub use metrics::{metrics_reset, metrics_snapshot, MetricsSnapshot};
pub use parse::{fragment_name, segment};
pub use store::{AllowList, SaveOutcome, UnknownFileType};
pub use vfs::{MemFs, OsFs, Vfs};

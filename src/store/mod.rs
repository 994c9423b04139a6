//! store — высокоуровневое API allow-list стора.
//!
//! Разделение по подмодулям:
//! - core.rs — базовые типы (AllowList, SaveOutcome), константы путей,
//!   file_name(), close/Drop (drain), fragment_fetcher
//! - open.rs — открытие (open/open_ro + _with_config, with_vfs/with_vfs_ro),
//!   LOCK-хэндлинг, запуск writer-потока
//! - save.rs — set(): синхронная валидация + постановка в очередь; фоновое
//!   сохранение (canonicalize → name → persist, main record + fragments)
//! - read.rs — load/get/get_by_name, реестр декодеров по расширению,
//!   split_name()

pub mod core;
pub mod open;
pub mod read;
pub mod save;

pub use core::{AllowList, SaveOutcome};
pub use read::UnknownFileType;

//! Lightweight global metrics for the allow list.
//!
//! Потокобезопасные атомарные счётчики для подсистем:
//! - save path (background writer)
//! - load/get path
//! - fragment reads

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Save path -----
static SAVES_TOTAL: AtomicU64 = AtomicU64::new(0);
static SAVE_ERRORS: AtomicU64 = AtomicU64::new(0);

// ----- Load/get path -----
static ITEMS_LOADED: AtomicU64 = AtomicU64::new(0);
static UNKNOWN_SKIPPED: AtomicU64 = AtomicU64::new(0);

// ----- Fragments -----
static FRAGMENT_READS: AtomicU64 = AtomicU64::new(0);

#[inline]
pub fn record_save() {
    SAVES_TOTAL.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_save_error() {
    SAVE_ERRORS.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_items_loaded(n: u64) {
    ITEMS_LOADED.fetch_add(n, Ordering::Relaxed);
}

#[inline]
pub fn record_unknown_skipped() {
    UNKNOWN_SKIPPED.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_fragment_read() {
    FRAGMENT_READS.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub saves_total: u64,
    pub save_errors: u64,
    pub items_loaded: u64,
    pub unknown_skipped: u64,
    pub fragment_reads: u64,
}

pub fn metrics_snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        saves_total: SAVES_TOTAL.load(Ordering::Relaxed),
        save_errors: SAVE_ERRORS.load(Ordering::Relaxed),
        items_loaded: ITEMS_LOADED.load(Ordering::Relaxed),
        unknown_skipped: UNKNOWN_SKIPPED.load(Ordering::Relaxed),
        fragment_reads: FRAGMENT_READS.load(Ordering::Relaxed),
    }
}

pub fn metrics_reset() {
    SAVES_TOTAL.store(0, Ordering::Relaxed);
    SAVE_ERRORS.store(0, Ordering::Relaxed);
    ITEMS_LOADED.store(0, Ordering::Relaxed);
    UNKNOWN_SKIPPED.store(0, Ordering::Relaxed);
    FRAGMENT_READS.store(0, Ordering::Relaxed);
}

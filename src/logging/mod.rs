//! Logging infrastructure - structured tracing throughout the allocator
//!
//! Design: Uses `tracing` for structured, contextual logging with:
//! - Configurable log levels per module
//! - Zero-cost when disabled
//! - Console output driven by environment variables

use once_cell::sync::OnceCell;
use std::io;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

// Re-export tracing macros for use throughout the runtime
pub use tracing::{debug, error, info, trace, warn};

/// Global logging state
static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default log level
    pub level: Level,
    /// Enable file logging
    pub file_output: bool,
    /// Log file path (if file_output enabled)
    pub log_path: Option<String>,
    /// Show span events (enter/exit)
    pub show_spans: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            file_output: false,
            log_path: None,
            show_spans: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // REGIONPOOL_LOG_LEVEL: trace, debug, info, warn, error
        if let Ok(level_str) = std::env::var("REGIONPOOL_LOG_LEVEL") {
            config.level = match level_str.to_lowercase().as_str() {
                "trace" => Level::TRACE,
                "debug" => Level::DEBUG,
                "info" => Level::INFO,
                "warn" => Level::WARN,
                "error" => Level::ERROR,
                _ => Level::INFO,
            };
        }

        // REGIONPOOL_LOG_FILE: path to log file
        if let Ok(path) = std::env::var("REGIONPOOL_LOG_FILE") {
            config.file_output = true;
            config.log_path = Some(path);
        }

        // REGIONPOOL_LOG_SPANS: show span events
        config.show_spans = std::env::var("REGIONPOOL_LOG_SPANS").is_ok();

        config
    }

    /// Create high-performance config (minimal logging)
    pub fn performance() -> Self {
        Self {
            level: Level::ERROR,
            file_output: false,
            log_path: None,
            show_spans: false,
        }
    }

    /// Create debug config (verbose logging)
    pub fn debug() -> Self {
        Self {
            level: Level::TRACE,
            file_output: true,
            log_path: Some("regionpool.log".to_string()),
            show_spans: true,
        }
    }
}

/// Initialize logging with default configuration
pub fn init() {
    init_with_config(LogConfig::from_env());
}

/// Initialize logging with custom configuration
pub fn init_with_config(config: LogConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "regionpool={}",
                config.level.as_str().to_lowercase()
            ))
        });

        let span_events = if config.show_spans {
            FmtSpan::ENTER | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        // Simplified: just console logging with env filter
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(io::stdout)
                    .with_span_events(span_events)
                    .with_target(true)
                    .with_thread_ids(cfg!(debug_assertions))
                    .with_line_number(cfg!(debug_assertions)),
            )
            .init();
    });
}

/// Check if logging is initialized
pub fn is_initialized() -> bool {
    LOGGER_INITIALIZED.get().is_some()
}

// ============================================================================
// Allocator-specific logging functions
// ============================================================================

/// Initialize runtime logging (alias for init)
pub fn init_runtime_logging() {
    init();
}

/// Log a freshly allocated block or chunk
#[inline]
pub fn log_block_allocated(size: usize, ptr: *const u8) {
    trace!(
        event = "block_allocated",
        size_bytes = size,
        address = ?ptr,
        "Block allocated from host"
    );
}

/// Log a block handed out from the free-block cache
#[inline]
pub fn log_block_recycled(remaining: usize) {
    trace!(
        event = "block_recycled",
        free_blocks = remaining,
        "Block recycled from pool cache"
    );
}

/// Log an oversized chunk allocation
#[inline]
pub fn log_chunk_allocated(size: usize, ptr: *const u8) {
    debug!(
        event = "chunk_allocated",
        size_bytes = size,
        address = ?ptr,
        "Oversized chunk allocated"
    );
}

/// Log construction of a brand-new region
#[inline]
pub fn log_region_created(total: usize) {
    debug!(
        event = "region_created",
        regions = total,
        "New region constructed"
    );
}

/// Log a region handed out from or returned to the free-region cache
#[inline]
pub fn log_region_recycled(idle: usize) {
    trace!(
        event = "region_recycled",
        free_regions = idle,
        "Region recycled"
    );
}

/// Log pool construction
pub fn log_pool_created() {
    info!(event = "pool_created", "Region pool constructed");
}

/// Log an ownership transfer between pools
pub fn log_pool_adopted(migrated: usize, discarded: usize) {
    info!(
        event = "pool_adopted",
        migrated = migrated,
        discarded = discarded,
        "Adopted live regions from transient pool"
    );
}

/// Log runtime initialization
pub fn log_runtime_init() {
    info!(event = "runtime_init", "Regionpool runtime initializing");
}

/// Log runtime shutdown
pub fn log_runtime_shutdown() {
    info!(event = "runtime_shutdown", "Regionpool runtime shutting down");
}

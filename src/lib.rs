//! # Tracefinity
//!
//! Interactive 2D layout core for traced tool silhouettes placed into
//! parametric storage bins.
//!
//! ## Architecture
//!
//! Tracefinity is organized as a workspace with multiple crates:
//!
//! 1. **tracefinity-core** - Data model, constants, errors, store and regeneration traits
//! 2. **tracefinity-designer** - Geometry kernel, viewport, snapping, history, editors, SVG
//! 3. **tracefinity-sync** - Debounced persistence and cancellable regeneration sessions
//! 4. **tracefinity-settings** - User settings and their persistence
//! 5. **tracefinity** - This crate: re-exports, logging setup and the CLI

pub use tracefinity_core as core;
pub use tracefinity_designer as designer;
pub use tracefinity_settings as settings;
pub use tracefinity_sync as sync;

pub use tracefinity_core::{
    BinConfig, BinData, BinStore, CancellationToken, Error, GenerateResponse, MemoryStore,
    Outline, PlacedTool, Point, RegenerationError, RegenerationService, Result, TextLabel, Tool,
    ToolStore,
};
pub use tracefinity_designer::{
    render_bin_svg, BinEditor, BinSnapshot, History, SmoothingTable, Snapper, ToolEditor,
    Viewport,
};
pub use tracefinity_settings::{SettingsManager, UserSettings};
pub use tracefinity_sync::{
    BinSession, Fingerprint, RegenerationPipeline, SaveCoalescer, SaveStatus, SessionOptions,
    ToolSession,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Snap behaviour configured by the user.
pub fn snapper(settings: &UserSettings) -> Snapper {
    Snapper::new(settings.snap_enabled, settings.snap_step_mm)
}

/// Session timings and editor options configured by the user.
pub fn session_options(settings: &UserSettings) -> SessionOptions {
    SessionOptions {
        save_delay: settings.save_delay(),
        regenerate_delay: settings.regenerate_delay(),
        smooth_level_delay: settings.smooth_level_delay(),
        snapper: snapper(settings),
        history_depth: settings.history_depth,
    }
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr (stdout carries command output)
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

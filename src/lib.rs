//! # FlashKit
//!
//! A polyline diagram editor core for dimensioned sheet-metal flashing
//! profiles: segment and angle editing under rigid-body invariants, fold
//! synthesis from reusable templates, tapered variants with frozen
//! angles, and deterministic label layout.
//!
//! ## Architecture
//!
//! FlashKit is organized as a workspace:
//!
//! 1. **flashkit-core** - Geometry primitives, units, error taxonomy
//! 2. **flashkit-designer** - The editing and label-layout engine
//! 3. **flashkit** - Headless CLI that loads a drawing and a fold
//!    catalog and prints a dimension report

pub use flashkit_core as core;
pub use flashkit_designer as designer;

pub use flashkit_core::{EditError, MeasurementSystem, Point};
pub use flashkit_designer::{
    dimension_report, Drawing, DrawingRegistry, FoldCatalog, HistoryManager, Line, TaperedDiagram,
};

/// Initializes the process-wide tracing subscriber. `RUST_LOG` controls
/// the filter; the default level is INFO.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}

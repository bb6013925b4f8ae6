//! # VCPKit
//!
//! Machine-control front end whose menu controls bind themselves to
//! motion-control handlers at runtime.
//!
//! ## Architecture
//!
//! VCPKit is organized as a workspace with multiple crates:
//!
//! 1. **vcpkit-core** - Machine vocabulary, status and command traits, event bus
//! 2. **vcpkit-settings** - Configuration and its persistence
//! 3. **vcpkit-ui** - Control tree, handler binding, generated menus, jog keys
//! 4. **vcpkit** - Main binary: logging, wiring and a line-oriented host loop

pub mod app;
pub mod host;

pub use app::App;
pub use host::{Flow, HostLoop};

pub use vcpkit_core::{CommandApi, EventBus, LiveStatus, SimulatedMachine, StatusFacade};
pub use vcpkit_settings::{Config, SettingsManager};
pub use vcpkit_ui::{FileChooser, HandlerRegistry, MenuLayout, VcpMainWindow};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatting on stderr, leaving stdout to the host loop
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    // Windows release builds have no console, log next to the executable
    #[cfg(all(target_os = "windows", not(debug_assertions)))]
    {
        use std::fs::OpenOptions;

        let log_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| std::path::PathBuf::from("."));

        let log_file = log_dir.join("vcpkit.log");

        match OpenOptions::new().create(true).append(true).open(&log_file) {
            Ok(file) => {
                let fmt_layer = fmt::layer()
                    .with_writer(file)
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .pretty();

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .try_init()?;
            }
            Err(_) => {
                tracing_subscriber::registry().with(env_filter).try_init()?;
            }
        }
    }

    #[cfg(not(all(target_os = "windows", not(debug_assertions))))]
    {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

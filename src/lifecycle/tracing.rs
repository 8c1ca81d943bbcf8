//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter that hides the
//! module prefix (`with_target(false)`); log lines carry `entity_type` instead.
//!
//! ```bash
//! RUST_LOG=info pm-tracker resource list     # lifecycle and mutations
//! RUST_LOG=debug pm-tracker resource list    # plus request payloads
//! ```
//!
//! With `RUST_LOG=info` an allocation reads:
//!
//! ```text
//! INFO Loaded entity_type="Resource" key=pm_resources size=1
//! INFO Actor started entity_type="Resource" size=1
//! INFO allocate: Action ok entity_type="Resource" id=4f1c…
//! ```
//!
//! A rejected operation logs at `warn` with the entity's error:
//!
//! ```text
//! WARN allocate: Action failed entity_type="Resource" id=4f1c… error=Capacity exceeded: requested 3, available 2
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (the config's
/// `log_filter`) is used. Calling it twice is harmless.
pub fn setup_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .try_init();
}

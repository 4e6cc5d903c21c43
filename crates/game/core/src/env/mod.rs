//! Traits describing capabilities consumed from the host environment.
//!
//! The core calls into the world but never owns it: spatial queries, ray
//! tracing, and carried-item checks are oracle traits implemented by the
//! embedding. The [`Env`] aggregate bundles them so the gate and strike
//! controller can access everything they need without hard coupling to
//! concrete implementations.
mod loadout;
mod spatial;

pub use loadout::LoadoutOracle;
pub use spatial::{SpatialError, SpatialOracle};

/// Error raised when a required oracle was not supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("spatial oracle not available")]
    SpatialNotAvailable,

    #[error("loadout oracle not available")]
    LoadoutNotAvailable,
}

/// Aggregates the read-only oracles required by ability invocation and
/// strike ticking.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    spatial: Option<&'a dyn SpatialOracle>,
    loadout: Option<&'a dyn LoadoutOracle>,
}

impl<'a> Env<'a> {
    pub fn new(
        spatial: Option<&'a dyn SpatialOracle>,
        loadout: Option<&'a dyn LoadoutOracle>,
    ) -> Self {
        Self { spatial, loadout }
    }

    pub fn with_all(spatial: &'a dyn SpatialOracle, loadout: &'a dyn LoadoutOracle) -> Self {
        Self::new(Some(spatial), Some(loadout))
    }

    pub fn empty() -> Self {
        Self {
            spatial: None,
            loadout: None,
        }
    }

    /// Returns the SpatialOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SpatialNotAvailable` if no spatial oracle was provided.
    pub fn spatial(&self) -> Result<&'a dyn SpatialOracle, OracleError> {
        self.spatial.ok_or(OracleError::SpatialNotAvailable)
    }

    /// Returns the LoadoutOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::LoadoutNotAvailable` if no loadout oracle was provided.
    pub fn loadout(&self) -> Result<&'a dyn LoadoutOracle, OracleError> {
        self.loadout.ok_or(OracleError::LoadoutNotAvailable)
    }
}

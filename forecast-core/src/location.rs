//! Device location acquisition.
//!
//! The platform geolocation capability sits behind [`LocationPlatform`];
//! [`LocationProvider`] drives its permission state machine and turns every
//! request into exactly one terminal outcome.

use std::sync::{Arc, Weak};

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::{error::LocationError, model::Coordinates};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    NotDetermined,
    Granted,
    Denied,
    Restricted,
}

/// Platform geolocation surface.
#[async_trait]
pub trait LocationPlatform: Send + Sync {
    fn authorization(&self) -> Authorization;

    /// Show the permission prompt; resolves with the status reported by the
    /// authorization-changed notification.
    async fn request_authorization(&self) -> Authorization;

    /// One-shot location fix. Only called while authorized.
    async fn request_fix(&self) -> Result<Coordinates, LocationError>;
}

type PendingFix = Shared<BoxFuture<'static, Result<Coordinates, LocationError>>>;

pub struct LocationProvider {
    platform: Arc<dyn LocationPlatform>,
    in_flight: Arc<Mutex<Option<PendingFix>>>,
}

impl LocationProvider {
    pub fn new(platform: Arc<dyn LocationPlatform>) -> Self {
        Self { platform, in_flight: Arc::new(Mutex::new(None)) }
    }

    /// Resolve the current location.
    ///
    /// Calls made while a request is outstanding join it and receive the same
    /// outcome; the platform is asked once.
    pub async fn request_location(&self) -> Result<Coordinates, LocationError> {
        let pending = {
            let mut slot = self.in_flight.lock();
            match slot.as_ref() {
                Some(pending) => {
                    debug!("joining in-flight location request");
                    pending.clone()
                }
                None => {
                    let platform = Arc::clone(&self.platform);
                    // Weak: the slot owns this future.
                    let in_flight: Weak<_> = Arc::downgrade(&self.in_flight);
                    let pending = async move {
                        let outcome = resolve(platform.as_ref()).await;
                        if let Some(in_flight) = in_flight.upgrade() {
                            in_flight.lock().take();
                        }
                        outcome
                    }
                    .boxed()
                    .shared();
                    *slot = Some(pending.clone());
                    pending
                }
            }
        };

        pending.await
    }
}

impl std::fmt::Debug for LocationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationProvider")
            .field("in_flight", &self.in_flight.lock().is_some())
            .finish()
    }
}

async fn resolve(platform: &dyn LocationPlatform) -> Result<Coordinates, LocationError> {
    let status = match platform.authorization() {
        Authorization::NotDetermined => {
            debug!("requesting location permission");
            platform.request_authorization().await
        }
        status => status,
    };

    let outcome = match status {
        Authorization::Granted => platform.request_fix().await,
        Authorization::NotDetermined | Authorization::Denied | Authorization::Restricted => {
            Err(LocationError::PermissionDenied)
        }
    };

    match &outcome {
        Ok(coordinates) => info!(%coordinates, "location resolved"),
        Err(err) => warn!(error = %err, "location request failed"),
    }
    outcome
}

/// Platform with a fixed answer: granted with known coordinates, or denied.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coordinates: Option<Coordinates>,
}

impl FixedLocation {
    pub fn granted(coordinates: Coordinates) -> Self {
        Self { coordinates: Some(coordinates) }
    }

    pub fn denied() -> Self {
        Self { coordinates: None }
    }
}

#[async_trait]
impl LocationPlatform for FixedLocation {
    fn authorization(&self) -> Authorization {
        if self.coordinates.is_some() { Authorization::Granted } else { Authorization::Denied }
    }

    async fn request_authorization(&self) -> Authorization {
        self.authorization()
    }

    async fn request_fix(&self) -> Result<Coordinates, LocationError> {
        self.coordinates.ok_or(LocationError::LocationUnknown)
    }
}

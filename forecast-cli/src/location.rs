use std::sync::OnceLock;

use async_trait::async_trait;
use forecast_core::{Authorization, Coordinates, LocationError, LocationPlatform};
use inquire::{Confirm, InquireError, Text};
use tracing::debug;

/// Terminal stand-in for a device location service: the permission prompt
/// and the position fix are both asked of the user.
#[derive(Debug, Default)]
pub struct PromptLocation {
    decision: OnceLock<Authorization>,
}

impl PromptLocation {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationPlatform for PromptLocation {
    fn authorization(&self) -> Authorization {
        self.decision.get().copied().unwrap_or(Authorization::NotDetermined)
    }

    async fn request_authorization(&self) -> Authorization {
        let answer = tokio::task::spawn_blocking(|| {
            Confirm::new("Allow forecast to use your location?").with_default(true).prompt()
        })
        .await;

        let status = match answer {
            Ok(Ok(true)) => Authorization::Granted,
            Ok(Ok(false)) => Authorization::Denied,
            Ok(Err(err)) => {
                debug!(error = %err, "permission prompt dismissed");
                Authorization::Denied
            }
            Err(err) => {
                debug!(error = %err, "permission prompt task failed");
                Authorization::Restricted
            }
        };

        *self.decision.get_or_init(|| status)
    }

    async fn request_fix(&self) -> Result<Coordinates, LocationError> {
        let answer = tokio::task::spawn_blocking(|| {
            Text::new("Your coordinates (<lat>,<lon>):").prompt()
        })
        .await
        .map_err(|err| LocationError::Platform(err.to_string()))?
        .map_err(fix_error)?;

        answer.parse::<Coordinates>().map_err(|err| {
            debug!(error = %err, "unusable coordinates entered");
            LocationError::LocationUnknown
        })
    }
}

/// Without a terminal there is nobody to ask for a position.
fn fix_error(err: InquireError) -> LocationError {
    match err {
        InquireError::NotTTY => LocationError::ServicesDisabled,
        other => LocationError::Platform(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_undetermined() {
        assert_eq!(PromptLocation::new().authorization(), Authorization::NotDetermined);
    }

    #[test]
    fn remembers_the_first_decision() {
        let platform = PromptLocation::new();
        let _ = platform.decision.set(Authorization::Denied);

        assert_eq!(platform.authorization(), Authorization::Denied);
    }

    #[test]
    fn missing_terminal_means_services_disabled() {
        assert_eq!(fix_error(InquireError::NotTTY), LocationError::ServicesDisabled);
        assert!(matches!(
            fix_error(InquireError::OperationCanceled),
            LocationError::Platform(_)
        ));
    }
}

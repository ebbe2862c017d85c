use std::sync::Arc;

use provider::{CheckoutGateway, CheckoutOutcome, CheckoutRequest, ProfileStore};

use crate::error::UpgradeError;
use provider::UserIdentity;

/// Price and currency for the premium upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeConfig {
    /// Amount in the currency's minor unit (kobo for NGN).
    pub amount_minor: u32,
    pub currency: String,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        // ₦2,500, expressed in kobo.
        Self {
            amount_minor: 250_000,
            currency: "NGN".into(),
        }
    }
}

/// Terminal result of one upgrade flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    Upgraded { transaction_id: String },
    Cancelled,
}

/// Runs the premium upgrade: checkout widget first, profile write second.
///
/// The widget being closed without paying is a normal outcome, not an error,
/// and leaves the profile untouched.
pub struct UpgradeService {
    checkout: Arc<dyn CheckoutGateway>,
    profiles: Arc<dyn ProfileStore>,
    config: UpgradeConfig,
}

impl UpgradeService {
    #[must_use]
    pub fn new(
        checkout: Arc<dyn CheckoutGateway>,
        profiles: Arc<dyn ProfileStore>,
        config: UpgradeConfig,
    ) -> Self {
        Self {
            checkout,
            profiles,
            config,
        }
    }

    /// Invoke the checkout widget and, on completion, mark the user premium.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::Provider` if the widget fails to open or the
    /// profile write fails after a completed payment.
    pub async fn upgrade(&self, user: &UserIdentity) -> Result<UpgradeOutcome, UpgradeError> {
        let request = CheckoutRequest {
            amount_minor: self.config.amount_minor,
            currency: self.config.currency.clone(),
            email: user.email.clone(),
        };

        match self.checkout.checkout(request).await? {
            CheckoutOutcome::Completed { transaction_id } => {
                self.profiles.mark_premium(user.id, &transaction_id).await?;
                Ok(UpgradeOutcome::Upgraded { transaction_id })
            }
            CheckoutOutcome::Cancelled => Ok(UpgradeOutcome::Cancelled),
        }
    }

    #[must_use]
    pub fn config(&self) -> &UpgradeConfig {
        &self.config
    }
}

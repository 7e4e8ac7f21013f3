//! `AcmeOrderSession` implementation over `instant-acme`

use std::time::Duration;

use async_trait::async_trait;
use instant_acme::{
    Account, AuthorizationStatus, ChallengeType, Identifier, LetsEncrypt, NewAccount, NewOrder,
    Order, OrderStatus,
};

use crate::error::{IssuanceError, IssuanceResult};
use crate::traits::{AcmeAuthorization, AcmeChallenge, AcmeOrderSession};

/// Fixed delay between order status polls.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;

/// Maximum status / certificate polls before giving up.
const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 30;

/// ACME session against the Let's Encrypt directories.
///
/// A fresh account key is generated per session; nothing is persisted or
/// reused across runs.
pub struct InstantAcmeSession {
    account: Option<Account>,
    order: Option<Order>,
    /// Challenges fetched with the authorizations, kept for key-authorization
    /// computation
    challenges: Vec<AcmeChallenge>,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl InstantAcmeSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_polling(
            Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            DEFAULT_MAX_POLL_ATTEMPTS,
        )
    }

    #[must_use]
    pub fn with_polling(poll_interval: Duration, max_poll_attempts: u32) -> Self {
        Self {
            account: None,
            order: None,
            challenges: Vec::new(),
            poll_interval,
            max_poll_attempts,
        }
    }

    fn order_mut(&mut self) -> IssuanceResult<&mut Order> {
        self.order
            .as_mut()
            .ok_or_else(|| IssuanceError::OrderCreation("order not created yet".to_string()))
    }
}

impl Default for InstantAcmeSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AcmeOrderSession for InstantAcmeSession {
    async fn create_account(&mut self, contact_email: &str, staging: bool) -> IssuanceResult<()> {
        let directory_url = if staging {
            LetsEncrypt::Staging.url()
        } else {
            LetsEncrypt::Production.url()
        };
        log::info!("[acme] Creating account at {directory_url}");

        let contact = format!("mailto:{contact_email}");
        let (account, _credentials) = Account::builder()
            .map_err(|e| IssuanceError::AccountCreation(e.to_string()))?
            .create(
                &NewAccount {
                    contact: &[&contact],
                    terms_of_service_agreed: true,
                    only_return_existing: false,
                },
                directory_url.to_string(),
                None,
            )
            .await
            .map_err(|e| IssuanceError::AccountCreation(e.to_string()))?;

        self.account = Some(account);
        Ok(())
    }

    async fn create_order(&mut self, domain: &str) -> IssuanceResult<()> {
        let account = self
            .account
            .as_ref()
            .ok_or_else(|| IssuanceError::OrderCreation("account not created yet".to_string()))?;

        log::info!("[acme] Creating order for {domain}");
        let identifiers = [Identifier::Dns(domain.to_string())];
        let order = account
            .new_order(&NewOrder::new(&identifiers))
            .await
            .map_err(|e| IssuanceError::OrderCreation(e.to_string()))?;

        self.order = Some(order);
        Ok(())
    }

    async fn authorizations(&mut self) -> IssuanceResult<Vec<AcmeAuthorization>> {
        let order = self.order_mut()?;
        let mut result = Vec::new();
        let mut stored = Vec::new();
        {
            let mut fetched = order.authorizations();
            while let Some(authorization) = fetched.next().await {
                let authorization =
                    authorization.map_err(|e| IssuanceError::OrderCreation(e.to_string()))?;
                #[allow(unreachable_patterns)]
                let identifier = match authorization.identifier().identifier {
                    Identifier::Dns(domain) => domain.clone(),
                    _ => continue,
                };

                if !matches!(
                    authorization.status,
                    AuthorizationStatus::Pending | AuthorizationStatus::Valid
                ) {
                    return Err(IssuanceError::ChallengeRejected(format!(
                        "authorization for {identifier} is {:?}",
                        authorization.status
                    )));
                }

                let mut challenges = Vec::with_capacity(authorization.challenges.len());
                for challenge in &authorization.challenges {
                    #[allow(unreachable_patterns)]
                    let challenge_type = match challenge.r#type {
                        ChallengeType::Dns01 => "dns-01",
                        ChallengeType::Http01 => "http-01",
                        ChallengeType::TlsAlpn01 => "tls-alpn-01",
                        _ => "unknown",
                    };
                    let converted = AcmeChallenge {
                        challenge_type: challenge_type.to_string(),
                        token: challenge.token.clone(),
                        url: challenge.url.clone(),
                    };
                    challenges.push(converted.clone());
                    stored.push(converted);
                }

                result.push(AcmeAuthorization {
                    identifier,
                    challenges,
                });
            }
        }

        self.challenges = stored;
        Ok(result)
    }

    fn key_authorization(&self, challenge: &AcmeChallenge) -> IssuanceResult<String> {
        if self.order.is_none() {
            return Err(IssuanceError::OrderCreation(
                "order not created yet".to_string(),
            ));
        }
        let account = self
            .account
            .as_ref()
            .ok_or_else(|| IssuanceError::OrderCreation("account not created yet".to_string()))?;
        let stored = self
            .challenges
            .iter()
            .find(|c| c.token == challenge.token)
            .ok_or_else(|| IssuanceError::ChallengeNotFound(challenge.url.clone()))?;
        Ok(format!("{}.{}", stored.token, account.key_thumbprint()))
    }

    async fn mark_challenge_ready(&mut self, challenge_url: &str) -> IssuanceResult<()> {
        log::debug!("[acme] Marking challenge ready: {challenge_url}");
        let order = self.order_mut()?;
        let mut authorizations = order.authorizations();
        while let Some(authorization) = authorizations.next().await {
            let mut authorization =
                authorization.map_err(|e| IssuanceError::ChallengeRejected(e.to_string()))?;
            let Some(challenge_type) = authorization
                .challenges
                .iter()
                .find(|c| c.url == challenge_url)
                .map(|c| c.r#type.clone())
            else {
                continue;
            };
            let mut challenge = authorization
                .challenge(challenge_type)
                .ok_or_else(|| IssuanceError::ChallengeNotFound(challenge_url.to_string()))?;
            return challenge
                .set_ready()
                .await
                .map_err(|e| IssuanceError::ChallengeRejected(e.to_string()));
        }
        Err(IssuanceError::ChallengeNotFound(challenge_url.to_string()))
    }

    async fn wait_challenge_valid(&mut self) -> IssuanceResult<()> {
        let poll_interval = self.poll_interval;
        let max_poll_attempts = self.max_poll_attempts;
        let order = self.order_mut()?;

        for attempt in 1..=max_poll_attempts {
            tokio::time::sleep(poll_interval).await;
            let status = order
                .refresh()
                .await
                .map_err(|e| IssuanceError::ChallengeRejected(e.to_string()))?
                .status;

            match status {
                OrderStatus::Ready | OrderStatus::Valid => return Ok(()),
                OrderStatus::Invalid => {
                    return Err(IssuanceError::ChallengeRejected(
                        "order transitioned to invalid".to_string(),
                    ));
                }
                _ => {
                    log::debug!("[acme] Order status {status:?} (attempt {attempt})");
                }
            }
        }

        Err(IssuanceError::ChallengeRejected(format!(
            "challenge not validated after {max_poll_attempts} polls"
        )))
    }

    async fn finalize(&mut self, csr_der: &[u8]) -> IssuanceResult<()> {
        log::info!("[acme] Finalizing order");
        self.order_mut()?
            .finalize_csr(csr_der)
            .await
            .map_err(|e| IssuanceError::Finalize(e.to_string()))
    }

    async fn download_certificate(&mut self) -> IssuanceResult<String> {
        let poll_interval = self.poll_interval;
        let max_poll_attempts = self.max_poll_attempts;
        let order = self.order_mut()?;

        for _ in 0..max_poll_attempts {
            if let Some(chain) = order
                .certificate()
                .await
                .map_err(|e| IssuanceError::CertificateDownload(e.to_string()))?
            {
                return Ok(chain);
            }
            tokio::time::sleep(poll_interval).await;
        }

        Err(IssuanceError::CertificateDownload(format!(
            "certificate not available after {max_poll_attempts} polls"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn operations_before_account_fail_cleanly() {
        let mut session = InstantAcmeSession::new();
        let err = session.create_order("example.com").await.unwrap_err();
        assert!(matches!(err, IssuanceError::OrderCreation(_)));

        let err = session.authorizations().await.unwrap_err();
        assert!(matches!(err, IssuanceError::OrderCreation(_)));

        let err = session.finalize(&[]).await.unwrap_err();
        assert!(matches!(err, IssuanceError::OrderCreation(_)));
    }
}

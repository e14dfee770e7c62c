use async_trait::async_trait;

use super::{Notifier, NotifyError, Sms};
use crate::config::TwilioConfig;

/// Sends messages through Twilio's REST Messages resource.
pub struct TwilioNotifier {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioNotifier {
    pub fn new(config: TwilioConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| format!("Failed to build SMS client: {e}"))?;

        Ok(Self { client, config })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base, self.config.account_sid
        )
    }
}

#[async_trait]
impl Notifier for TwilioNotifier {
    fn route(&self) -> Option<(&str, &str)> {
        Some((self.config.from.as_str(), self.config.to.as_str()))
    }

    async fn send(&self, sms: &Sms) -> Result<(), NotifyError> {
        let resp = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", sms.to.as_str()),
                ("From", sms.from.as_str()),
                ("Body", sms.body.as_str()),
            ])
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(1024)
            .collect::<String>();

        Err(NotifyError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

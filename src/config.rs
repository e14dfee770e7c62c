use std::net::IpAddr;

use chrono::FixedOffset;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub store: StoreKind,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub log_level: String,
    pub display_offset: FixedOffset,
    pub twilio: Option<TwilioConfig>,
}

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number messages originate from.
    pub from: String,
    /// Recipient number that receives submission alerts.
    pub to: String,
    pub api_base: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

pub const DEFAULT_TWILIO_API_BASE: &str = "https://api.twilio.com";

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let store = match env_or("FORM_STORE", "postgres").as_str() {
            "postgres" => StoreKind::Postgres,
            "memory" => StoreKind::Memory,
            other => return Err(format!("Invalid FORM_STORE: {other}")),
        };

        let host: IpAddr = env_or("FORM_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid FORM_HOST: {e}"))?;

        let port: u16 = env_or("FORM_PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid FORM_PORT: {e}"))?;

        let max_body_size: usize = env_or("FORM_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid FORM_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("FORM_LOG_LEVEL", "info");

        let offset_minutes: i32 = env_or("FORM_TZ_OFFSET_MINUTES", "330")
            .parse()
            .map_err(|e| format!("Invalid FORM_TZ_OFFSET_MINUTES: {e}"))?;
        let display_offset = parse_offset(offset_minutes)?;

        let twilio = twilio_from_parts(
            std::env::var("TWILIO_ACCOUNT_SID").ok(),
            std::env::var("TWILIO_AUTH_TOKEN").ok(),
            std::env::var("TWILIO_PHONE_NUMBER_NOTIFICATION").ok(),
            std::env::var("NOTIFICATION_PHONE_NUMBER").ok(),
            env_or("TWILIO_API_BASE", DEFAULT_TWILIO_API_BASE),
        );

        Ok(Config {
            database_url,
            store,
            host,
            port,
            max_body_size,
            log_level,
            display_offset,
            twilio,
        })
    }
}

fn parse_offset(minutes: i32) -> Result<FixedOffset, String> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| format!("FORM_TZ_OFFSET_MINUTES out of range: {minutes}"))
}

/// Twilio is only enabled when every credential and both numbers are present.
fn twilio_from_parts(
    account_sid: Option<String>,
    auth_token: Option<String>,
    from: Option<String>,
    to: Option<String>,
    api_base: String,
) -> Option<TwilioConfig> {
    let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    match (
        present(account_sid),
        present(auth_token),
        present(from),
        present(to),
    ) {
        (Some(account_sid), Some(auth_token), Some(from), Some(to)) => Some(TwilioConfig {
            account_sid,
            auth_token,
            from,
            to,
            api_base: api_base.trim_end_matches('/').to_string(),
        }),
        _ => None,
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

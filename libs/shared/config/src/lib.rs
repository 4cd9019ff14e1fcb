use std::env;

use chrono_tz::Tz;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub cal_api_key: String,
    pub cal_api_base_url: String,
    pub cal_booking_origin: String,
    pub cal_username: String,
    pub cal_webhook_secret: String,
    pub blog_manifest_origin: String,
    pub display_timezone: Tz,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            cal_api_key: env::var("CAL_API_KEY").unwrap_or_else(|_| {
                warn!("CAL_API_KEY not set, using empty value");
                String::new()
            }),
            cal_api_base_url: env::var("CAL_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.cal.com/v2".to_string()),
            cal_booking_origin: env::var("CAL_BOOKING_ORIGIN")
                .unwrap_or_else(|_| "https://cal.com".to_string()),
            cal_username: env::var("CAL_USERNAME").unwrap_or_else(|_| {
                warn!("CAL_USERNAME not set, using empty value");
                String::new()
            }),
            cal_webhook_secret: env::var("CAL_WEBHOOK_SECRET").unwrap_or_else(|_| {
                warn!("CAL_WEBHOOK_SECRET not set, webhook deliveries will be rejected");
                String::new()
            }),
            blog_manifest_origin: env::var("BLOG_MANIFEST_ORIGIN").unwrap_or_else(|_| {
                warn!("BLOG_MANIFEST_ORIGIN not set, using empty value");
                String::new()
            }),
            display_timezone: env::var("DISPLAY_TIMEZONE")
                .ok()
                .and_then(|tz| {
                    tz.parse::<Tz>()
                        .map_err(|_| warn!("DISPLAY_TIMEZONE is not a valid IANA name: {}", tz))
                        .ok()
                })
                .unwrap_or(chrono_tz::America::Chicago),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        };

        if !config.is_cal_configured() {
            warn!("Cal.com integration not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_cal_configured(&self) -> bool {
        !self.cal_api_key.is_empty() && !self.cal_username.is_empty()
    }

    pub fn is_webhook_configured(&self) -> bool {
        !self.cal_webhook_secret.is_empty()
    }

    pub fn is_blog_configured(&self) -> bool {
        !self.blog_manifest_origin.is_empty()
    }
}

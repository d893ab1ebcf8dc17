use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub clinic_hours_file: Option<String>,
    pub auto_confirm_online_bookings: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 3000,
            clinic_hours_file: None,
            auto_confirm_online_bookings: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|port| {
                    port.parse().ok().or_else(|| {
                        warn!("SERVER_PORT '{}' is not a valid port, using default", port);
                        None
                    })
                })
                .unwrap_or(defaults.server_port),
            clinic_hours_file: env::var("CLINIC_HOURS_FILE")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .or_else(|| {
                    warn!("CLINIC_HOURS_FILE not set, starting with no clinic working hours");
                    None
                }),
            auto_confirm_online_bookings: env::var("AUTO_CONFIRM_ONLINE_BOOKINGS")
                .map(|value| parse_flag(&value))
                .unwrap_or_else(|_| {
                    warn!("AUTO_CONFIRM_ONLINE_BOOKINGS not set, online bookings start as pending");
                    defaults.auto_confirm_online_bookings
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        self.clinic_hours_file.is_some()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_parsing() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_default_config_is_not_configured() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 3000);
        assert!(!config.auto_confirm_online_bookings);
        assert!(!config.is_configured());
    }
}

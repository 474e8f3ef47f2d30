//! Runtime validation, including the progression ladders.

use crate::loader::ConfigError;
use crate::schema::Config;
use guildrank_progression::{GrowthCurve, ProgressionRules};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration and returns the ladders it describes.
    pub fn validate(config: &Config) -> Result<ProgressionRules, ConfigError> {
        config.validate()?;
        config.rules()
    }
}

impl Config {
    /// Checks the plain settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discord.token.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Discord token cannot be empty".to_string(),
            ));
        }

        if self.discord.prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Command prefix cannot be empty".to_string(),
            ));
        }

        let role_ids = self
            .level_roles
            .iter()
            .map(|tier| tier.role_id)
            .chain(self.cookie_roles.iter().map(|tier| tier.role_id))
            .chain(self.jobs.iter().map(|job| job.role_id));
        for role_id in role_ids {
            if role_id.0 == 0 {
                return Err(ConfigError::Validation(
                    "role_id 0 is not a Discord role".to_string(),
                ));
            }
        }

        if self.storage.autosave_seconds == 0 {
            return Err(ConfigError::Validation(
                "storage.autosave_seconds must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Builds the XP curve and tier tables.
    pub fn rules(&self) -> Result<ProgressionRules, ConfigError> {
        let curve = GrowthCurve::new(self.leveling.base, self.leveling.exponent)
            .map_err(|e| e.within("leveling"))?;

        Ok(ProgressionRules::new(
            curve,
            self.level_roles.clone(),
            self.cookie_roles.clone(),
            self.jobs.clone(),
        )?)
    }
}

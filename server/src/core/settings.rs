//! Core server settings registration

use crate::prelude::*;
use crate::settings::{SettingDefinition, SettingsRegistry};

/// Register all core settings
pub fn register_settings(registry: &mut SettingsRegistry) -> ScResult<()> {
	// Search is always on, whatever the store says
	registry.register(
		SettingDefinition::builder("enableSearch")
			.description("Enable site search")
			.default(true)
			.forced(true)
			.build()?,
	)?;

	Ok(())
}

// vim: ts=4

use inquire::{Password, PasswordDisplayMode, Select, Text};
use std::path::Path;
use weather_core::{Config, Coordinates, UnitSystem, ValidationError};

/// Load the file being edited. A file that fails to load starts over from defaults.
pub fn load_or_default(path: &Path) -> Config {
    Config::load_from(path).unwrap_or_else(|err| {
        log::warn!("{err:#}; starting from default settings");
        Config::default()
    })
}

/// Parse "lat, lon"; an empty answer clears the home location.
fn parse_home(input: &str) -> Result<Option<Coordinates>, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let (lat, lon) = input.split_once(',').unwrap_or((input, ""));
    Coordinates::parse(Some(lat), Some(lon)).map(Some)
}

fn home_default(config: &Config) -> String {
    config
        .client
        .home
        .map(|home| format!("{}, {}", home.lat, home.lon))
        .unwrap_or_default()
}

/// Interactive configuration; writes the config file when done.
pub fn run(mut config: Config) -> anyhow::Result<()> {
    let proxy_url = Text::new("Weather proxy URL:")
        .with_default(config.proxy_url())
        .prompt()?;
    config.client.proxy_url = Some(proxy_url.trim().to_string());

    let units = [UnitSystem::Metric, UnitSystem::Imperial];
    let cursor = units
        .iter()
        .position(|u| *u == config.client.units)
        .unwrap_or_default();
    config.client.units = Select::new("Default units:", units.to_vec())
        .with_starting_cursor(cursor)
        .prompt()?;

    let current_home = home_default(&config);
    loop {
        let answer = Text::new("Home location as 'lat, lon' (empty for none):")
            .with_default(&current_home)
            .prompt()?;

        match parse_home(&answer) {
            Ok(home) => {
                config.client.home = home;
                break;
            }
            Err(err) => eprintln!("{err}"),
        }
    }

    let api_key = Password::new("OpenWeather API key for a proxy on this machine (empty to keep):")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_provider_api_key(api_key.trim().to_string());
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[client]\nunits = \"imperial\"\nhome = { lat = 95.0, lon = 0.0 }\n",
        )
        .unwrap();

        let config = load_or_default(&path);
        assert_eq!(config.client.units, UnitSystem::Metric);
        assert_eq!(config.client.home, None);
    }

    #[test]
    fn readable_config_is_kept_for_editing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client]\nunits = \"imperial\"\n").unwrap();

        assert_eq!(load_or_default(&path).client.units, UnitSystem::Imperial);
    }

    #[test]
    fn empty_home_clears_location() {
        assert_eq!(parse_home("  "), Ok(None));
    }

    #[test]
    fn home_is_lat_comma_lon() {
        let home = parse_home("52.52, 13.405").unwrap().unwrap();
        assert_eq!(home.lat, 52.52);
        assert_eq!(home.lon, 13.405);
    }

    #[test]
    fn home_without_longitude_is_rejected() {
        assert_eq!(parse_home("52.52"), Err(ValidationError::Missing("lon")));
        assert!(parse_home("52.52, east").is_err());
    }

    #[test]
    fn existing_home_is_offered_as_default() {
        let mut config = Config::default();
        assert_eq!(home_default(&config), "");

        config.client.home = Some(Coordinates::new(1.5, -2.0).unwrap());
        assert_eq!(home_default(&config), "1.5, -2");
    }
}

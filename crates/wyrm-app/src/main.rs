use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wyrm_core::{CreatureConfig, Preset};

const PRESET_VAR: &str = "WYRM_PRESET";
const CONFIG_VAR: &str = "WYRM_CONFIG";
const SEED_VAR: &str = "WYRM_SEED";

/// A config file wins over a preset name; with neither, frost.
fn select_config(preset: Option<&str>, config: Option<&Path>) -> wyrm_core::Result<CreatureConfig> {
    match (config, preset) {
        (Some(path), _) => CreatureConfig::load(path),
        (None, Some(name)) => Ok(name.parse::<Preset>()?.config()),
        (None, None) => Ok(Preset::Frost.config()),
    }
}

fn parse_seed(raw: Option<&str>) -> wyrm_platform::Result<Option<u64>> {
    raw.map(|s| s.trim().parse::<u64>())
        .transpose()
        .map_err(|e| format!("{SEED_VAR} is not a u64: {e}").into())
}

fn run() -> wyrm_platform::Result<()> {
    let preset = std::env::var(PRESET_VAR).ok();
    let config_path = std::env::var_os(CONFIG_VAR);
    let seed = parse_seed(std::env::var(SEED_VAR).ok().as_deref())?;

    let config = select_config(preset.as_deref(), config_path.as_deref().map(Path::new))?;
    info!(name = %config.name, seed = ?seed, "creature selected");
    wyrm_ui::run_app(config, seed)
}

fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Wyrm starting");
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("wyrm failed: {e}");
            eprintln!("Wyrm error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_frost() {
        let config = select_config(None, None).unwrap();
        assert_eq!(config, Preset::Frost.config());
    }

    #[test]
    fn preset_names_are_forgiving() {
        let config = select_config(Some(" Cloud "), None).unwrap();
        assert_eq!(config, Preset::Cloud.config());
        assert!(select_config(Some("basilisk"), None).is_err());
    }

    #[test]
    fn config_file_wins_over_preset() {
        let missing = Path::new("/nonexistent/wyrm.toml");
        assert!(select_config(Some("glow"), Some(missing)).is_err());
    }

    #[test]
    fn seeds_parse_or_fail_loudly() {
        assert_eq!(parse_seed(None).unwrap(), None);
        assert_eq!(parse_seed(Some(" 42")).unwrap(), Some(42));
        assert!(parse_seed(Some("-1")).is_err());
    }
}

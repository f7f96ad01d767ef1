use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result, bail};
use clap::{Args, ValueEnum};
use companion_core::identity::IdentityProvider;
use companion_infrastructure::settings::IdentitySource;
use companion_infrastructure::{
    CompanionPaths, PersistenceSettings, SaveFileStore, identity_from_settings,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IdentityKind {
    Platform,
    Debug,
    Fixed,
}

/// Flags shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Settings file to read (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Directory holding the save file
    #[arg(long, global = true)]
    pub save_dir: Option<PathBuf>,

    /// Identity source used to derive the save key
    #[arg(long, global = true, value_enum)]
    pub identity: Option<IdentityKind>,

    /// Secret for `--identity fixed`
    #[arg(long, global = true)]
    pub secret: Option<String>,
}

/// Settings after applying command-line overrides.
pub struct ResolvedSettings {
    pub settings: PersistenceSettings,
    pub settings_path: PathBuf,
}

impl ResolvedSettings {
    pub fn resolve(args: &GlobalArgs) -> Result<Self> {
        let settings_path = match &args.settings {
            Some(path) => path.clone(),
            None => CompanionPaths::default()
                .settings_file()
                .context("Failed to resolve settings path")?,
        };
        let mut settings = PersistenceSettings::load_or_default(&settings_path)
            .with_context(|| format!("Failed to read {}", settings_path.display()))?;

        if let Some(dir) = &args.save_dir {
            settings.save_dir = Some(dir.clone());
        }
        if let Some(kind) = args.identity {
            settings.identity = identity_source(kind, args.secret.as_deref(), &settings.identity)?;
        } else if let Some(secret) = &args.secret {
            settings.identity = IdentitySource::Fixed {
                secret: secret.clone(),
            };
        }

        tracing::debug!(
            "[CLI] Settings from {}, save file name {}",
            settings_path.display(),
            settings.save_file_name
        );
        Ok(Self {
            settings,
            settings_path,
        })
    }

    pub fn save_file(&self) -> Result<PathBuf> {
        self.settings
            .save_file_path()
            .context("Failed to resolve save file path")
    }

    pub fn store(&self) -> Result<SaveFileStore> {
        Ok(SaveFileStore::new(self.save_file()?))
    }

    pub fn identity(&self) -> Arc<dyn IdentityProvider> {
        identity_from_settings(&self.settings.identity)
    }
}

fn identity_source(
    kind: IdentityKind,
    secret: Option<&str>,
    configured: &IdentitySource,
) -> Result<IdentitySource> {
    Ok(match kind {
        IdentityKind::Debug => IdentitySource::Debug,
        IdentityKind::Platform => match configured {
            IdentitySource::Platform { .. } => configured.clone(),
            _ => IdentitySource::default(),
        },
        IdentityKind::Fixed => match secret {
            Some(secret) if !secret.is_empty() => IdentitySource::Fixed {
                secret: secret.to_string(),
            },
            _ => bail!("--identity fixed requires --secret"),
        },
    })
}

//! Per-invocation state shared by every command: data directory, config,
//! and the catalog loaded from the subject store.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Args;
use studyplan_core::{data_dir, Catalog, Config, CoreError, SubjectStore};
use tracing::{info, warn};

/// Flags accepted before or after any subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Directory holding config.toml and the subject file
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Move an unreadable subject file aside and start empty
    #[arg(long, global = true)]
    pub reset_corrupt: bool,
}

pub struct Session {
    data_dir: PathBuf,
    config: Config,
    store: SubjectStore,
    catalog: Option<Catalog>,
    reset_corrupt: bool,
    pub json: bool,
}

impl Session {
    pub fn open(args: &GlobalArgs) -> Result<Self, Box<dyn Error>> {
        let data_dir = data_dir(args.data_dir.as_deref())?;
        let config = Config::load(&data_dir)?;
        let store = SubjectStore::new(config.data_file(&data_dir));
        info!(data_dir = %data_dir.display(), "opened session");
        Ok(Self {
            data_dir,
            config,
            store,
            catalog: None,
            reset_corrupt: args.reset_corrupt,
            json: args.json,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the config. A changed data file name takes effect on the
    /// next catalog access.
    pub fn set_config(&mut self, config: Config) {
        let file = config.data_file(&self.data_dir);
        if file != self.store.path() {
            self.store = SubjectStore::new(file);
            self.catalog = None;
        }
        self.config = config;
    }

    /// The catalog, loaded on first use.
    ///
    /// A corrupt file is an error unless `--reset-corrupt` was given.
    pub fn catalog(&mut self) -> Result<&mut Catalog, Box<dyn Error>> {
        self.catalog_or(|_| Ok(false))
    }

    /// Like [`Session::catalog`], but asks `confirm_reset` what to do with
    /// a corrupt file when `--reset-corrupt` was not given.
    pub fn catalog_or(
        &mut self,
        confirm_reset: impl FnOnce(&CoreError) -> std::io::Result<bool>,
    ) -> Result<&mut Catalog, Box<dyn Error>> {
        let catalog = match self.catalog.take() {
            Some(catalog) => catalog,
            None => match self.store.load() {
                Ok(catalog) => catalog,
                Err(e) if e.is_corrupt_data() => {
                    if !(self.reset_corrupt || confirm_reset(&e)?) {
                        return Err(format!(
                            "{e}\nhint: rerun with --reset-corrupt to move it aside and start empty"
                        )
                        .into());
                    }
                    let moved = self.store.quarantine()?;
                    eprintln!("moved unreadable data to {}", moved.display());
                    Catalog::new()
                }
                Err(e) => return Err(e.into()),
            },
        };
        Ok(self.catalog.insert(catalog))
    }

    /// Write the in-memory catalog. Nothing to do if it was never loaded.
    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        if let Some(catalog) = &self.catalog {
            if let Err(e) = self.store.save(catalog) {
                warn!(path = %self.store.path().display(), error = %e, "save failed");
                return Err(e.into());
            }
        }
        Ok(())
    }
}

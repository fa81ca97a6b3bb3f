use camino::{Utf8Path, Utf8PathBuf};
use directories_next::ProjectDirs;

use crate::HoustonProblem;

use std::fs;

const SESSION_FILE: &str = "config.json";
const MACHINE_ID_FILE: &str = "machine.txt";

/// Config allows end users to override default settings
/// usually determined by Houston. They are intended to
/// give library consumers a way to support environment variable
/// overrides for end users.
#[derive(Debug, Clone)]
pub struct Config {
    /// home is the path to the user's global config directory
    pub home: Utf8PathBuf,
}

impl Config {
    /// Creates a new instance of `Config`
    pub fn new(override_home: Option<&impl AsRef<Utf8Path>>) -> Result<Config, HoustonProblem> {
        let home = match override_home {
            Some(home) => {
                let home = home.as_ref();
                if home.exists() && !home.is_dir() {
                    return Err(HoustonProblem::InvalidOverrideConfigDir(home.to_string()));
                }
                home.to_path_buf()
            }
            None => {
                // Lin: /home/alice/.config/pf9
                // Win: C:\Users\Alice\AppData\Roaming\Platform9\pf9\config
                // Mac: /Users/Alice/Library/Application Support/com.Platform9.pf9
                let dir = ProjectDirs::from("com", "Platform9", "pf9")
                    .ok_or(HoustonProblem::DefaultConfigDirNotFound)?
                    .config_dir()
                    .to_path_buf();
                Utf8PathBuf::try_from(dir)?
            }
        };

        Ok(Config { home })
    }

    /// Where the login session is persisted
    pub fn session_path(&self) -> Utf8PathBuf {
        self.home.join(SESSION_FILE)
    }

    /// Where the anonymous telemetry machine identifier is persisted
    pub fn machine_id_path(&self) -> Utf8PathBuf {
        self.home.join(MACHINE_ID_FILE)
    }

    /// Removes all configuration files from filesystem
    pub fn clear(&self) -> Result<(), HoustonProblem> {
        tracing::debug!(home_dir = ?self.home);
        if self.home.exists() {
            fs::remove_dir_all(&self.home)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::HoustonProblem;
    use assert_fs::TempDir;
    use camino::Utf8PathBuf;

    #[test]
    fn it_can_clear_global_config() {
        let tmp_home = TempDir::new().unwrap();
        let config = get_config(&tmp_home);
        std::fs::write(config.session_path(), "{}").unwrap();
        assert!(config.home.exists());
        config.clear().unwrap();
        assert!(!config.home.exists());
    }

    #[test]
    fn it_places_files_under_home() {
        let tmp_home = TempDir::new().unwrap();
        let config = get_config(&tmp_home);
        assert_eq!(config.session_path(), config.home.join("config.json"));
        assert_eq!(config.machine_id_path(), config.home.join("machine.txt"));
    }

    #[test]
    fn it_rejects_a_file_as_home() {
        let tmp_home = TempDir::new().unwrap();
        let file = Utf8PathBuf::try_from(tmp_home.path().join("not-a-dir")).unwrap();
        std::fs::write(&file, "").unwrap();
        assert!(matches!(
            Config::new(Some(&file)),
            Err(HoustonProblem::InvalidOverrideConfigDir(_))
        ));
    }

    fn get_config(tmp_home: &TempDir) -> Config {
        let home = Utf8PathBuf::try_from(tmp_home.path().to_path_buf()).unwrap();
        Config::new(Some(&home)).unwrap()
    }
}

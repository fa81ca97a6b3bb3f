use camino::Utf8PathBuf;
use reqwest::Client;
use url::Url;
use uuid::Uuid;

use appctl_std::Fs;

use crate::SputnikError;

/// Report defines where and how anonymous usage data is reported.
pub trait Report {
    /// checks if a user has enabled anonymous usage data.
    fn is_telemetry_enabled(&self) -> Result<bool, SputnikError>;

    /// returns the endpoint that the data should be posted to.
    fn endpoint(&self) -> Result<Url, SputnikError>;

    /// returns the key that identifies this tool to the collector.
    fn write_key(&self) -> String;

    /// returns the name of the tool, this is used to construct
    /// the User-Agent header.
    fn tool_name(&self) -> String;

    /// returns the version of the tool, this is used to construct
    /// the User-Agent header
    fn version(&self) -> String;

    /// constructs a user agent for the tool. by default, it calls
    /// self.tool_name() and self.version() to construct this.
    fn user_agent(&self) -> String {
        format!("{}/{}", self.tool_name(), self.version())
    }

    /// returns the location the tool stores a globally persistent
    /// machine identifier
    fn machine_id_config(&self) -> Result<Utf8PathBuf, SputnikError>;

    /// returns the globally persistent machine identifier
    /// and writes it if it does not exist
    /// the default implementation uses self.machine_id_config()
    /// as the location the machine identifier is written to.
    fn machine_id(&self) -> Result<Uuid, SputnikError> {
        let config_path = self.machine_id_config()?;
        get_or_write_machine_id(&config_path)
    }

    /// returns the Client to use when sending telemetry data
    fn client(&self) -> Client;
}

fn get_or_write_machine_id(path: &Utf8PathBuf) -> Result<Uuid, SputnikError> {
    if let Ok(contents) = Fs::read_file(path) {
        if let Ok(machine_uuid) = Uuid::parse_str(contents.trim()) {
            return Ok(machine_uuid);
        }
        tracing::debug!("{} does not hold a machine id, replacing it", path);
    }
    write_machine_id(path)
}

fn write_machine_id(path: &Utf8PathBuf) -> Result<Uuid, SputnikError> {
    let machine_id = Uuid::new_v4();
    Fs::write_file(path, machine_id.to_string())?;
    Ok(machine_id)
}

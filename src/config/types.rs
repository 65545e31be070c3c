use serde::Deserialize;

/// Main configuration structure for adsift
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub search: SearchConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub vpn: VpnConfig,
    pub output: OutputConfig,
}

/// Search target configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// URL of the listing index page to scan
    #[serde(rename = "index-url")]
    pub index_url: String,

    /// CSS selector matching listing anchors on the index page
    #[serde(rename = "listing-selector", default = "default_listing_selector")]
    pub listing_selector: String,

    /// City the search is centered on
    pub city: String,

    /// Two-letter state code
    pub state: String,

    /// Search radius in miles
    pub distance: u32,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for a single detail-page fetch (seconds)
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

/// VPN client configuration
///
/// The VPN client is an external process; these settings describe where it
/// is installed and how long to wait for its state transitions.
#[derive(Debug, Clone, Deserialize)]
pub struct VpnConfig {
    /// Directory the VPN client binary runs from
    #[serde(rename = "install-dir", default = "default_install_dir")]
    pub install_dir: String,

    /// Name of the VPN client binary
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Process name to look for when checking whether the client is up
    #[serde(rename = "process-name", default = "default_process_name")]
    pub process_name: String,

    /// Region passed to the connect command
    #[serde(default = "default_region")]
    pub region: String,

    /// How many times to poll the process list while waiting for a
    /// connect/disconnect to take effect
    #[serde(rename = "wait-attempts", default = "default_wait_attempts")]
    pub wait_attempts: u32,

    /// Delay between process-list polls (milliseconds)
    #[serde(rename = "wait-interval-ms", default = "default_wait_interval")]
    pub wait_interval_ms: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the dated spreadsheet files are written to
    pub directory: String,
}

fn default_listing_selector() -> String {
    "li.result-row a.result-title".to_string()
}

fn default_user_agent() -> String {
    format!("adsift/{}", env!("CARGO_PKG_VERSION"))
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_install_dir() -> String {
    r"C:\Program Files\NordVPN".to_string()
}

fn default_binary() -> String {
    "nordvpn".to_string()
}

fn default_process_name() -> String {
    "NordVPN.exe".to_string()
}

fn default_region() -> String {
    "United States".to_string()
}

fn default_wait_attempts() -> u32 {
    10
}

fn default_wait_interval() -> u64 {
    1000
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

impl Default for VpnConfig {
    fn default() -> Self {
        Self {
            install_dir: default_install_dir(),
            binary: default_binary(),
            process_name: default_process_name(),
            region: default_region(),
            wait_attempts: default_wait_attempts(),
            wait_interval_ms: default_wait_interval(),
        }
    }
}

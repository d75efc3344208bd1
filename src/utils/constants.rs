/// Defaults and route definitions

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Seconds between automatic page reloads
pub const DEFAULT_REFRESH_SECS: u64 = 5;

pub const DASHBOARD_PATH: &str = "/htop";

/// Directory name under the user config dir
pub const CONFIG_DIR_NAME: &str = "sysdash";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Route table printed at startup: (method, path, description)
pub const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("GET", "/", "Redirect to the dashboard"),
    ("GET", DASHBOARD_PATH, "HTML dashboard (auto-refresh)"),
    ("GET", "/dashboard", "Alias of the dashboard"),
    ("GET", "/api/snapshot", "Current snapshot as JSON"),
    ("GET", "/api/health", "Health check"),
    ("GET", "/ws/metrics", "WebSocket snapshot stream"),
    ("GET", "/static/*path", "Embedded stylesheet"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_include_dashboard() {
        assert!(ENDPOINTS.iter().any(|(_, path, _)| *path == DASHBOARD_PATH));
        assert!(ENDPOINTS.iter().all(|(method, _, _)| *method == "GET"));
    }
}

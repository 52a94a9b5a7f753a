use std::path::PathBuf;

pub fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

pub fn default_request_timeout() -> u64 {
    60
}

pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("pdfchat"))
}

pub fn example_config_yaml() -> &'static str {
    r#"# pdfchat configuration
backend:
  url: http://localhost:8000
  request_timeout: 60
# storage:
#   data_dir: ${HOME}/.local/share/pdfchat
# user:
#   email: you@example.com
verbose: false
"#
}

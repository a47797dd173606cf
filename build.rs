use std::env;
use std::fs;
use std::path::Path;

/// Claves que `config.rs` lee con `option_env!`
const CONFIG_KEYS: &[&str] = &[
    "DIET_API_BASE_URL",
    "DIET_ENVIRONMENT",
    "DIET_ENABLE_LOGGING",
    "DIET_REQUEST_TIMEOUT_MS",
    "DIET_SEARCH_DEBOUNCE_MS",
    "DIET_SEARCH_LIMIT",
    "DIET_WEIGHT_HISTORY_LIMIT",
];

fn main() {
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");

    let env_file = Path::new(".env");
    if !env_file.exists() {
        println!("cargo:warning=No .env file found, using config defaults (see .env.example)");
        return;
    }
    println!("cargo:rerun-if-changed=.env");

    let Ok(contents) = fs::read_to_string(env_file) else {
        println!("cargo:warning=.env exists but could not be read");
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        // Solo claves conocidas; el entorno real tiene prioridad sobre .env
        if CONFIG_KEYS.contains(&key) && env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}

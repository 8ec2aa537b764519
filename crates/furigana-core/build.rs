fn main() {
    // Validate embedded TOML files at compile time.
    validate_toml(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    );
    validate_toml(
        "src/counter/default_counters.toml",
        include_str!("src/counter/default_counters.toml"),
    );
    validate_toml(
        "src/default_overrides.toml",
        include_str!("src/default_overrides.toml"),
    );
}

fn validate_toml(path: &str, content: &str) {
    if content.parse::<toml::Value>().is_err() {
        panic!("{path} contains invalid TOML");
    }
}

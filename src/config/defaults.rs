use std::path::PathBuf;

pub fn default_version() -> u32 {
    1
}

pub fn default_max_report_bytes() -> Option<usize> {
    Some(256 * 1024)
}

pub fn default_include() -> Vec<String> {
    vec![
        "**/*.txt".to_string(),
        "**/*.md".to_string(),
        "**/*.json".to_string(),
    ]
}

pub fn default_concurrency() -> usize {
    4
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("parsed")
}

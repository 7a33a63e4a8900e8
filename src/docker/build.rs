// src/docker/build.rs

use std::sync::LazyLock;

use regex::Regex;

static BUILT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Successfully built (\S+)").expect("static regex is valid")
});

/// Image id announced by `build` output, if any.
///
/// Output formats that do not print `Successfully built <id>` yield `None`.
/// If the line appears more than once the last one wins.
pub fn extract_built_image_id(output: &str) -> Option<String> {
    BUILT_ID
        .captures_iter(output)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

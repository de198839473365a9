use once_cell::sync::Lazy;
use regex::Regex;

/// A file suffix such as `.lua`, matched case-insensitively against the end of file names.
#[derive(Debug, Clone)]
pub struct Extension {
    suffix: String,
    regex: Regex,
}

impl Extension {
    pub fn new(suffix: &str) -> Result<Self, regex::Error> {
        let suffix = suffix.to_lowercase();
        let regex = Regex::new(&format!("(?i){}$", regex::escape(&suffix)))?;
        Ok(Self { suffix, regex })
    }

    /// Lowercase suffix, dot included.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn matches(&self, file_name: &std::ffi::OsStr) -> bool {
        self.regex.is_match(&file_name.to_string_lossy())
    }
}

impl PartialEq for Extension {
    fn eq(&self, other: &Self) -> bool {
        self.suffix == other.suffix
    }
}

impl Eq for Extension {}

impl PartialOrd for Extension {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Extension {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.suffix.cmp(&other.suffix)
    }
}

impl std::fmt::Display for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.suffix)
    }
}

pub static LUA: Lazy<Extension> = Lazy::new(|| Extension::new(".lua").unwrap());
pub static MANIFEST: Lazy<Extension> = Lazy::new(|| Extension::new(".manifest").unwrap());

/// The extensions the installer copies, in the order the wizard handles them.
pub fn targets() -> [Extension; 2] {
    [LUA.clone(), MANIFEST.clone()]
}

/// Pick the extension a file belongs to. When a name ends with several of them the
/// longest suffix wins, so the result never depends on the order of `extensions`.
pub fn classify<'a>(
    file_name: &std::ffi::OsStr,
    extensions: &'a [Extension],
) -> Option<&'a Extension> {
    extensions
        .iter()
        .filter(|extension| extension.matches(file_name))
        .max_by_key(|extension| extension.suffix.len())
}

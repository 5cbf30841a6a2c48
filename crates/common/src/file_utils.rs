use std::path::Path;

/// Error type for stored-name validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenameValidationError {
    Empty,
    ContainsNullByte,
    ContainsPathSeparator,
    IsSpecialDirectory,
    InvalidFileName,
}

impl FilenameValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            FilenameValidationError::Empty => "Stored name cannot be empty",
            FilenameValidationError::ContainsNullByte => "Stored name cannot contain null bytes",
            FilenameValidationError::ContainsPathSeparator => {
                "Stored name cannot contain path separators (/ or \\)"
            }
            FilenameValidationError::IsSpecialDirectory => "Stored name cannot be '.' or '..'",
            FilenameValidationError::InvalidFileName => {
                "Invalid stored name: must be a single path component"
            }
        }
    }
}

impl std::fmt::Display for FilenameValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FilenameValidationError {}

/// Last path component of a client-supplied filename.
///
/// Browsers and some clients send full paths (`C:\Users\me\cat.png`), so
/// anything up to the last `/` or `\` is dropped.
pub fn base_name(filename: &str) -> &str {
    filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename)
}

/// Extension of a client-supplied filename, including the leading dot.
///
/// Everything from the last `.` of the base name onward is returned verbatim;
/// a name without a dot has an empty extension.
pub fn extension_of(filename: &str) -> &str {
    let base = base_name(filename);
    match base.rfind('.') {
        Some(index) => &base[index..],
        None => "",
    }
}

/// Validate a generated name before it is joined onto the storage directory.
/// Checks that the name:
/// - is not empty and has no null bytes
/// - contains no path separators (/, \)
/// - is not "." or ".."
/// - is a single component according to `Path::file_name`
pub fn validate_stored_name(name: &str) -> Result<(), FilenameValidationError> {
    if name.is_empty() {
        return Err(FilenameValidationError::Empty);
    }

    if name.contains('\0') {
        return Err(FilenameValidationError::ContainsNullByte);
    }

    if name.contains('/') || name.contains('\\') {
        return Err(FilenameValidationError::ContainsPathSeparator);
    }

    if name == "." || name == ".." {
        return Err(FilenameValidationError::IsSpecialDirectory);
    }

    if Path::new(name).file_name().and_then(|n| n.to_str()) != Some(name) {
        return Err(FilenameValidationError::InvalidFileName);
    }

    Ok(())
}

/// Shell-style wildcard match used by the collector's ignore list.
/// `*` matches any run of characters, `?` matches exactly one.
pub fn matches_pattern(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut p, mut n) = (0, 0);
    // Position of the last `*` seen and the name index it was tried against
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == name[n]) {
            p += 1;
            n += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            backtrack = Some((p, n));
            p += 1;
        } else if let Some((star, tried)) = backtrack {
            p = star + 1;
            n = tried + 1;
            backtrack = Some((star, tried + 1));
        } else {
            return false;
        }
    }

    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }

    p == pattern.len()
}

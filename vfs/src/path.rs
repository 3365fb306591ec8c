use crate::VfsError;

/// Normalize a VFS path.
///
/// - Replaces backslashes with forward slashes
/// - Collapses redundant separators (`a///b` → `a/b`)
/// - Drops `.` segments
/// - Rejects `..` segments (path traversal not allowed)
/// - Strips leading and trailing slashes
///
/// Returns `Err(VfsError::InvalidPath)` if the path is empty or contains `..`.
pub fn normalize(path: &str) -> Result<String, VfsError> {
    let replaced = path.replace('\\', "/");
    let mut segments = Vec::new();

    for segment in replaced.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(VfsError::InvalidPath(format!(
                    "path traversal (..) not allowed in {path:?}"
                )));
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return Err(VfsError::InvalidPath(format!("empty path {path:?}")));
    }

    Ok(segments.join("/"))
}

/// Split a normalized path into source name and remainder.
///
/// The path must already be normalized (no leading slash, no `..`).
pub(crate) fn split_source(path: &str) -> (&str, &str) {
    path.split_once('/').unwrap_or((path, ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("lighting/brdf.glsl", "lighting/brdf.glsl")]
    #[case::leading_slash("/lighting/brdf.glsl", "lighting/brdf.glsl")]
    #[case::trailing_slash("lighting/", "lighting")]
    #[case::redundant_slashes("lighting///brdf.glsl", "lighting/brdf.glsl")]
    #[case::dot_segments("./lighting/./brdf.glsl", "lighting/brdf.glsl")]
    #[case::backslashes("lighting\\brdf.glsl", "lighting/brdf.glsl")]
    #[case::single_segment("common.glsl", "common.glsl")]
    fn normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input).unwrap(), expected);
    }

    #[rstest]
    #[case::traversal("lighting/../secret.glsl")]
    #[case::empty("")]
    #[case::only_slashes("///")]
    #[case::only_dots("././.")]
    fn rejects(#[case] input: &str) {
        assert!(matches!(normalize(input), Err(VfsError::InvalidPath(_))));
    }

    #[test]
    fn split_source_with_and_without_rest() {
        assert_eq!(
            split_source("shaders/lighting/brdf.glsl"),
            ("shaders", "lighting/brdf.glsl")
        );
        assert_eq!(split_source("common.glsl"), ("common.glsl", ""));
    }
}

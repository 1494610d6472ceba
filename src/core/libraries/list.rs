use std::path::Path;

use tracing::debug;

use crate::core::archive::with_archive;
use crate::core::error::{ResolverError, ResolverResult};

/// Entry inside the server jar listing its bundled runtime libraries.
pub const LIBRARIES_LIST_ENTRY: &str = "META-INF/libraries.list";

/// Extract coordinates from `libraries.list` lines.
///
/// Each non-empty line is `<hash> <coordinate> <path>`; only the coordinate
/// is kept. One malformed line fails the whole list, including lines made of
/// whitespace only or with leading/trailing whitespace.
pub fn parse_libraries_list<I>(lines: I, source: &Path) -> ResolverResult<Vec<String>>
where
    I: IntoIterator<Item = ResolverResult<String>>,
{
    let mut libraries = Vec::new();

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        match coordinate_field(&line) {
            Some(coordinate) => libraries.push(coordinate.to_string()),
            None => {
                return Err(ResolverError::MalformedLibraryLine {
                    path: source.to_path_buf(),
                    line_number: idx + 1,
                    line,
                })
            }
        }
    }

    Ok(libraries)
}

/// Second of exactly three whitespace-separated fields. Surrounding
/// whitespace counts as an empty field.
fn coordinate_field(line: &str) -> Option<&str> {
    if line.starts_with(char::is_whitespace) || line.ends_with(char::is_whitespace) {
        return None;
    }
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [_, coordinate, _] => Some(*coordinate),
        _ => None,
    }
}

/// Open the server jar and read its library coordinates.
pub fn read_server_libraries(server_jar: &Path) -> ResolverResult<Vec<String>> {
    let libraries = with_archive(server_jar, |archive| {
        let lines = archive.read_lines(LIBRARIES_LIST_ENTRY)?;
        parse_libraries_list(lines, server_jar)
    })?;
    debug!("Read {} libraries from {:?}", libraries.len(), server_jar);
    Ok(libraries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::archive::fixtures::write_jar;

    fn lines(raw: &str) -> Vec<ResolverResult<String>> {
        raw.lines().map(|l| Ok(l.to_string())).collect()
    }

    #[test]
    fn keeps_the_coordinate_column() {
        let raw = "h1\tcom.example:foo:1.0\tcom/example/foo/1.0/foo-1.0.jar\n\
                   h2   org.example:bar:2.1   org/example/bar/2.1/bar-2.1.jar\n";
        let libs = parse_libraries_list(lines(raw), Path::new("server.jar")).unwrap();
        assert_eq!(libs, vec!["com.example:foo:1.0", "org.example:bar:2.1"]);
    }

    #[test]
    fn empty_lines_are_ignored() {
        let raw = "\nh1 com.example:foo:1.0 lib/foo.jar\n\n";
        let libs = parse_libraries_list(lines(raw), Path::new("server.jar")).unwrap();
        assert_eq!(libs, vec!["com.example:foo:1.0"]);
    }

    #[test]
    fn whitespace_only_or_padded_lines_are_malformed() {
        for bad in ["   ", " h2 org.example:bar:2.1 lib/bar.jar", "h2 org.example:bar:2.1 lib/bar.jar\t"] {
            let raw = vec![
                Ok("h1 com.example:foo:1.0 lib/foo.jar".to_string()),
                Ok(bad.to_string()),
            ];
            let err = parse_libraries_list(raw, Path::new("server.jar")).unwrap_err();
            match err {
                ResolverError::MalformedLibraryLine {
                    line_number, line, ..
                } => {
                    assert_eq!(line_number, 2);
                    assert_eq!(line, bad);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn wrong_field_count_fails_whole_list() {
        for bad in ["h2 org.example:bar:2.1", "h2 org.example:bar:2.1 lib/bar.jar extra"] {
            let raw = format!("h1 com.example:foo:1.0 lib/foo.jar\n{bad}\n");
            let err = parse_libraries_list(lines(&raw), Path::new("server.jar")).unwrap_err();
            match err {
                ResolverError::MalformedLibraryLine {
                    line_number, line, ..
                } => {
                    assert_eq!(line_number, 2);
                    assert_eq!(line, bad);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn reads_list_from_jar() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("server.jar");
        write_jar(
            &jar,
            &[(LIBRARIES_LIST_ENTRY, b"h1 com.example:foo:1.0 lib/foo.jar\n")],
        );

        assert_eq!(
            read_server_libraries(&jar).unwrap(),
            vec!["com.example:foo:1.0"]
        );
    }

    #[test]
    fn jar_without_list_is_entry_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("server.jar");
        write_jar(&jar, &[("net/minecraft/Main.class", b"\xca\xfe\xba\xbe")]);

        let err = read_server_libraries(&jar).unwrap_err();
        assert!(matches!(err, ResolverError::EntryNotFound { .. }));
    }
}

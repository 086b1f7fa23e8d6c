use std::fmt::Display;

use crate::error::{ActionError, ActionResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathChunk {
    Key(String),
    Index(usize),
}

impl Display for PathChunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathChunk::Key(key) => write!(f, "{}", key),
            PathChunk::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathChunk {
    fn from(chunk: &str) -> Self {
        // Leading zeros would not survive formatting back, keep those as keys
        let numeric = !chunk.is_empty()
            && chunk.chars().all(|ch| ch.is_ascii_digit())
            && (chunk == "0" || !chunk.starts_with('0'));

        match chunk.parse() {
            Ok(index) if numeric => PathChunk::Index(index),
            _ => PathChunk::Key(chunk.to_owned()),
        }
    }
}

/// Splits a slash delimited path like `posts/0/comment` into chunks.
/// Surrounding slashes are ignored, empty segments in between are not.
pub fn parse_path(path: &str) -> ActionResult<Vec<PathChunk>> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Err(ActionError::EmptyPath);
    }

    trimmed
        .split('/')
        .map(|chunk| {
            if chunk.is_empty() {
                return Err(ActionError::InvalidRequest(format!(
                    "empty segment in path `{}`",
                    path
                )));
            }

            Ok(PathChunk::from(chunk))
        })
        .collect()
}

pub fn format_path(chunks: &[PathChunk]) -> String {
    chunks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_chunks_become_indices() {
        let chunks = parse_path("posts/0/comment/12/text").unwrap();

        assert_eq!(
            vec![
                PathChunk::Key("posts".to_owned()),
                PathChunk::Index(0),
                PathChunk::Key("comment".to_owned()),
                PathChunk::Index(12),
                PathChunk::Key("text".to_owned()),
            ],
            chunks
        )
    }

    #[test]
    fn padded_numbers_stay_keys() {
        let chunks = parse_path("codes/007").unwrap();
        assert_eq!(PathChunk::Key("007".to_owned()), chunks[1]);
    }

    #[test]
    fn surrounding_slashes_ignored() {
        assert_eq!(parse_path("/user/info/").unwrap(), parse_path("user/info").unwrap());
    }

    #[test]
    fn empty_paths_rejected() {
        assert!(matches!(parse_path(""), Err(ActionError::EmptyPath)));
        assert!(matches!(parse_path("/"), Err(ActionError::EmptyPath)));
        assert!(matches!(
            parse_path("posts//users"),
            Err(ActionError::InvalidRequest(_))
        ));
    }

    #[test]
    fn format_inverts_parse() {
        let path = "user/info/phone/1/type";
        assert_eq!(path, format_path(&parse_path(path).unwrap()));
        assert_eq!("", format_path(&[]));
    }
}

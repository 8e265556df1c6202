//! Where the checklist document comes from.

use serde_yaml::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::SourceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Stdin,
    File(PathBuf),
    Url(String),
}

impl Location {
    pub fn parse(raw: &str) -> Self {
        if raw == "-" {
            Location::Stdin
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            Location::Url(raw.to_string())
        } else if let Some(path) = raw.strip_prefix("file://") {
            Location::File(PathBuf::from(path))
        } else {
            Location::File(PathBuf::from(raw))
        }
    }

    fn describe(&self) -> String {
        match self {
            Location::Stdin => "stdin".to_string(),
            Location::File(path) => path.display().to_string(),
            Location::Url(url) => url.clone(),
        }
    }
}

pub fn load_document(location: &Location) -> Result<Value, SourceError> {
    let text = match location {
        Location::Stdin => read_stdin()?,
        Location::File(path) => read_file(path)?,
        Location::Url(url) => fetch(url)?,
    };
    tracing::debug!(origin = %location.describe(), bytes = text.len(), "loaded document");
    parse_document(&text, &location.describe())
}

pub fn parse_document(text: &str, origin: &str) -> Result<Value, SourceError> {
    serde_yaml::from_str(text).map_err(|source| SourceError::Parse {
        origin: origin.to_string(),
        source,
    })
}

fn read_file(path: &Path) -> Result<String, SourceError> {
    fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_stdin() -> Result<String, SourceError> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|source| SourceError::Read {
            path: PathBuf::from("<stdin>"),
            source,
        })?;
    Ok(text)
}

fn fetch(url: &str) -> Result<String, SourceError> {
    let response = ureq::get(url)
        .set(
            "user-agent",
            concat!("postinstall-wizard/", env!("CARGO_PKG_VERSION")),
        )
        .call()
        .map_err(|e| match e {
            ureq::Error::Status(status, _) => SourceError::Status {
                url: url.to_string(),
                status,
            },
            other => SourceError::Fetch {
                url: url.to_string(),
                message: other.to_string(),
            },
        })?;

    let status = response.status();
    if status != 200 {
        return Err(SourceError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.into_string().map_err(|e| SourceError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn locations_are_classified_by_prefix() {
        assert_eq!(Location::parse("-"), Location::Stdin);
        assert_eq!(
            Location::parse("https://example.org/c.yaml"),
            Location::Url("https://example.org/c.yaml".into())
        );
        assert_eq!(
            Location::parse("http://example.org/c.yaml"),
            Location::Url("http://example.org/c.yaml".into())
        );
        assert_eq!(
            Location::parse("file:///etc/c.yaml"),
            Location::File(PathBuf::from("/etc/c.yaml"))
        );
        assert_eq!(
            Location::parse("conf/c.yaml"),
            Location::File(PathBuf::from("conf/c.yaml"))
        );
    }

    #[test]
    fn loads_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sections:\n  Tools:\n    items: [git]").unwrap();

        let url = format!("file://{}", file.path().display());
        let doc = load_document(&Location::parse(&url)).unwrap();
        assert!(doc.get("sections").is_some());
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&Location::File(dir.path().join("missing.yaml"))).unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let err = parse_document("sections: [unclosed", "inline").unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
        assert!(err.to_string().contains("inline"));
    }
}

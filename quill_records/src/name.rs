//! Validated dataset identifiers.
//!
//! Dataset names are validated on the client before any network call is
//! made, so a malformed name never reaches the server.

use snafu::Snafu;

/// Errors that can occur when validating a dataset name.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum DatasetNameError {
    #[snafu(display("empty dataset name"))]
    Empty,
    #[snafu(display(
        "invalid dataset name '{name}': only ASCII letters, numbers, hyphens, and underscores are allowed"
    ))]
    InvalidName { name: String },
}

pub type Result<T, E = DatasetNameError> = std::result::Result<T, E>;

/// Name of a dataset on the annotation server.
///
/// Valid dataset names are non-empty and contain only ASCII letters,
/// numbers, hyphens (-), and underscores (_).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetName(String);

/// Validate a dataset name according to the server naming contract.
pub fn validate_dataset_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DatasetNameError::Empty);
    }

    for ch in name.chars() {
        if !ch.is_ascii_alphanumeric() && ch != '-' && ch != '_' {
            return Err(DatasetNameError::InvalidName {
                name: name.to_string(),
            });
        }
    }

    Ok(())
}

impl DatasetName {
    /// Create a new dataset name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_dataset_name(&name)?;
        Ok(Self(name))
    }

    /// Create a new dataset name without returning an error.
    ///
    /// # Panics
    ///
    /// Panics if the name is invalid.
    pub fn new_unchecked(name: impl Into<String>) -> Self {
        let name = name.into();
        validate_dataset_name(&name).expect("dataset name must be valid");
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DatasetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DatasetName {
    type Err = DatasetNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dataset_names() {
        assert_eq!(DatasetName::new("example-dataset").unwrap().as_str(), "example-dataset");
        assert_eq!(DatasetName::new("MyDataset").unwrap().as_str(), "MyDataset");
        assert_eq!(DatasetName::new("news_2024").unwrap().as_str(), "news_2024");
        assert_eq!(DatasetName::new("a").unwrap().as_str(), "a");
        assert_eq!(DatasetName::new("0-_").unwrap().as_str(), "0-_");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(DatasetName::new(""), Err(DatasetNameError::Empty));
    }

    #[test]
    fn test_invalid_characters_rejected() {
        for name in ["my dataset", "my/dataset", "data.set", "caf\u{e9}", "name!"] {
            assert!(matches!(
                DatasetName::new(name),
                Err(DatasetNameError::InvalidName { .. })
            ));
        }
    }

    #[test]
    fn test_display_and_from_str() {
        let name: DatasetName = "example-dataset".parse().unwrap();
        assert_eq!(name.to_string(), "example-dataset");

        let result: Result<DatasetName, _> = "bad name".parse();
        assert!(result.is_err());
    }

    #[test]
    #[should_panic(expected = "dataset name must be valid")]
    fn test_new_unchecked_panics_on_invalid_name() {
        DatasetName::new_unchecked("bad name");
    }
}

use crate::fetcher::FetchError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Maven 坐标 group:artifact:version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl Coordinate {
    pub fn new(group: &str, artifact: &str, version: &str) -> Result<Self, FetchError> {
        let coordinate = Self {
            group: group.trim().to_string(),
            artifact: artifact.trim().to_string(),
            version: version.trim().to_string(),
        };
        if coordinate.group.is_empty() || coordinate.artifact.is_empty() || coordinate.version.is_empty() {
            return Err(FetchError::InvalidCoordinate(format!(
                "{}:{}:{}",
                group, artifact, version
            )));
        }
        Ok(coordinate)
    }

    /// `commons-math3-3.6.1.jar`
    pub fn file_name(&self) -> String {
        format!("{}-{}.jar", self.artifact, self.version)
    }

    /// 仓库内相对路径: `org/apache/commons/commons-math3/3.6.1/commons-math3-3.6.1.jar`
    pub fn repository_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.group.replace('.', "/"),
            self.artifact,
            self.version,
            self.file_name()
        )
    }
}

impl FromStr for Coordinate {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, artifact, version] => Self::new(group, artifact, version),
            _ => Err(FetchError::InvalidCoordinate(s.to_string())),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commons_math() -> Coordinate {
        Coordinate::new("org.apache.commons", "commons-math3", "3.6.1").unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(commons_math().file_name(), "commons-math3-3.6.1.jar");
    }

    #[test]
    fn test_repository_path() {
        assert_eq!(
            commons_math().repository_path(),
            "org/apache/commons/commons-math3/3.6.1/commons-math3-3.6.1.jar"
        );
    }

    #[test]
    fn test_parse_round_trip_display() {
        let parsed: Coordinate = "org.apache.commons:commons-math3:3.6.1".parse().unwrap();
        assert_eq!(parsed, commons_math());
        assert_eq!(parsed.to_string(), "org.apache.commons:commons-math3:3.6.1");
    }

    #[test]
    fn test_parse_rejects_wrong_part_count() {
        assert!(matches!(
            "org.apache.commons:commons-math3".parse::<Coordinate>(),
            Err(FetchError::InvalidCoordinate(_))
        ));
        assert!("a:b:c:d".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_new_rejects_empty_parts() {
        assert!(Coordinate::new("org.apache", " ", "1.0").is_err());
        assert!("::".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_new_trims_input() {
        let c = Coordinate::new(" g ", "a\n", " 1 ").unwrap();
        assert_eq!(c.to_string(), "g:a:1");
    }
}

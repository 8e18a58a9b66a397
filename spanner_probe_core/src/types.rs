//! Spanner resource names.

use std::fmt;
use std::str::FromStr;

use crate::error::ResourcePathError;

/// Fully-qualified database name: `projects/{project}/instances/{instance}/databases/{database}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabasePath {
    project: String,
    instance: String,
    database: String,
}

impl DatabasePath {
    pub fn new(
        project: impl Into<String>,
        instance: impl Into<String>,
        database: impl Into<String>,
    ) -> Result<Self, ResourcePathError> {
        let project = validate_component("project", project.into())?;
        let instance = validate_component("instance", instance.into())?;
        let database = validate_component("database", database.into())?;
        Ok(Self {
            project,
            instance,
            database,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl fmt::Display for DatabasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/instances/{}/databases/{}",
            self.project, self.instance, self.database
        )
    }
}

impl FromStr for DatabasePath {
    type Err = ResourcePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            ["projects", project, "instances", instance, "databases", database] => {
                DatabasePath::new(*project, *instance, *database)
            }
            _ => Err(ResourcePathError::Malformed {
                kind: "database",
                name: s.to_string(),
            }),
        }
    }
}

/// Session name as returned by `CreateSession`: `{database path}/sessions/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionName {
    database: DatabasePath,
    id: String,
}

impl SessionName {
    pub fn new(database: DatabasePath, id: impl Into<String>) -> Result<Self, ResourcePathError> {
        let id = validate_component("session", id.into())?;
        Ok(Self { database, id })
    }

    pub fn database(&self) -> &DatabasePath {
        &self.database
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for SessionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/sessions/{}", self.database, self.id)
    }
}

impl FromStr for SessionName {
    type Err = ResourcePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ResourcePathError::Malformed {
            kind: "session",
            name: s.to_string(),
        };
        let (database, id) = s.rsplit_once("/sessions/").ok_or_else(malformed)?;
        let database = database.parse::<DatabasePath>().map_err(|_| malformed())?;
        SessionName::new(database, id)
    }
}

fn validate_component(component: &'static str, value: String) -> Result<String, ResourcePathError> {
    if value.is_empty() {
        return Err(ResourcePathError::EmptyComponent(component));
    }
    if value.contains('/') {
        return Err(ResourcePathError::InvalidComponent { component, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_display() {
        let path = DatabasePath::new("my-project", "my-instance", "my-db").unwrap();
        assert_eq!(
            path.to_string(),
            "projects/my-project/instances/my-instance/databases/my-db"
        );
    }

    #[test]
    fn test_database_path_rejects_empty_components() {
        assert_eq!(
            DatabasePath::new("", "i", "d"),
            Err(ResourcePathError::EmptyComponent("project"))
        );
        assert_eq!(
            DatabasePath::new("p", "i", ""),
            Err(ResourcePathError::EmptyComponent("database"))
        );
    }

    #[test]
    fn test_database_path_rejects_slashes() {
        assert!(matches!(
            DatabasePath::new("p", "i/x", "d"),
            Err(ResourcePathError::InvalidComponent {
                component: "instance",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_database_path() {
        let path: DatabasePath = "projects/p/instances/i/databases/d".parse().unwrap();
        assert_eq!(path.project(), "p");
        assert_eq!(path.instance(), "i");
        assert_eq!(path.database(), "d");

        assert!("projects/p/instances/i".parse::<DatabasePath>().is_err());
        assert!("projects//instances/i/databases/d"
            .parse::<DatabasePath>()
            .is_err());
    }

    #[test]
    fn test_parse_session_name() {
        let name: SessionName = "projects/p/instances/i/databases/d/sessions/AEdx1"
            .parse()
            .unwrap();
        assert_eq!(name.id(), "AEdx1");
        assert_eq!(
            name.database().to_string(),
            "projects/p/instances/i/databases/d"
        );
        assert_eq!(
            name.to_string(),
            "projects/p/instances/i/databases/d/sessions/AEdx1"
        );
    }

    #[test]
    fn test_parse_session_name_rejects_garbage() {
        assert!("sessions/abc".parse::<SessionName>().is_err());
        assert!("projects/p/instances/i/databases/d/sessions/"
            .parse::<SessionName>()
            .is_err());
    }
}

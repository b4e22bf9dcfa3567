//! Routine loader.
//!
//! A routine is an ordered list of commands with their string arguments:
//! ```ron
//! [
//!     (command: "buff"),
//!     (command: "adjust", args: {"x": "0.52", "y": "0.31"}),
//!     (command: "supernova", args: {"direction": "left"}),
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use command_core::Command;

use crate::factory::CommandBook;
use crate::loaders::{LoadResult, read_file};

/// One routine line before validation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoutineEntry {
    pub command: String,
    #[serde(default)]
    pub args: BTreeMap<String, String>,
}

/// Loader that turns routine files into validated commands.
pub struct RoutineLoader;

impl RoutineLoader {
    /// Parse routine entries without building commands.
    pub fn entries(content: &str) -> LoadResult<Vec<RoutineEntry>> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse routine RON: {}", e))
    }

    /// Parse and build every command, failing on the first invalid entry.
    pub fn parse(content: &str, book: &CommandBook) -> LoadResult<Vec<Box<dyn Command>>> {
        Self::entries(content)?
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                book.build(&entry.command, &entry.args)
                    .with_context(|| format!("routine entry {} ({})", index + 1, entry.command))
            })
            .collect()
    }

    /// Load a routine file.
    pub fn load(path: &Path, book: &CommandBook) -> LoadResult<Vec<Box<dyn Command>>> {
        let content = read_file(path)?;
        let commands = Self::parse(&content, book)
            .with_context(|| format!("Failed to load routine {}", path.display()))?;

        tracing::info!(path = %path.display(), commands = commands.len(), "routine loaded");
        Ok(commands)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use command_core::ConfigError;

    use super::*;

    const ROUTINE: &str = r#"[
        (command: "buff"),
        (command: "adjust", args: {"x": "0.52", "y": "0.31", "max_steps": "3"}),
        (command: "celestial_roar", args: {"attacks": "3", "repetitions": "2"}),
        (command: "supernova"),
        (command: "erda_fountain", args: {"direction": "left"}),
    ]"#;

    #[test]
    fn builds_commands_in_order() {
        let commands = RoutineLoader::parse(ROUTINE, &CommandBook::default()).unwrap();
        let names: Vec<_> = commands.iter().map(|command| command.name()).collect();
        assert_eq!(
            names,
            vec!["buff", "adjust", "celestial_roar", "supernova", "erda_fountain"]
        );
    }

    #[test]
    fn invalid_entry_reports_its_position() {
        let routine = r#"[
            (command: "buff"),
            (command: "supernova", args: {"direction": "diagonal"}),
        ]"#;

        let err = RoutineLoader::parse(routine, &CommandBook::default())
            .err()
            .unwrap();

        assert!(err.to_string().contains("routine entry 2 (supernova)"));
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidDirection { .. })
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", ROUTINE).unwrap();

        let commands = RoutineLoader::load(file.path(), &CommandBook::default()).unwrap();
        assert_eq!(commands.len(), 5);
    }

    #[test]
    fn malformed_ron_is_rejected() {
        assert!(RoutineLoader::entries("[(command: )]").is_err());
    }
}

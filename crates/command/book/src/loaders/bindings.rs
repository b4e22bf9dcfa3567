//! Key binding loader.

use std::path::Path;

use crate::KeyBindings;
use crate::loaders::{LoadResult, read_file};

/// Loader for key bindings from RON files.
pub struct BindingsLoader;

impl BindingsLoader {
    /// Load key bindings from a RON file.
    ///
    /// Keys missing from the file keep their default binding:
    /// ```ron
    /// (supernova: "6", erda_fountain: "7")
    /// ```
    pub fn load(path: &Path) -> LoadResult<KeyBindings> {
        let content = read_file(path)?;
        let bindings: KeyBindings = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse key bindings RON at {:?}: {}", path, e))?;

        Ok(bindings)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use command_core::Key;

    use super::*;

    #[test]
    fn loads_partial_bindings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"(celestial_roar: "z")"#).unwrap();

        let bindings = BindingsLoader::load(file.path()).unwrap();

        assert_eq!(bindings.celestial_roar, Key::from("z"));
        assert_eq!(bindings.supernova, Key::from("pgup"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = BindingsLoader::load(Path::new("/nonexistent/bindings.ron")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bindings.ron"));
    }
}

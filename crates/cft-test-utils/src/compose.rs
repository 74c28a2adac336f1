//! Compose document fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two services: `web` in image mode with commented build directives, `db`
/// image only.
pub const WEB_DB: &str = "\
services:
  web:
    image: nginx
    # build: .
    # volumes:
    #   - ./data:/data
  db:
    image: postgres
";

/// [`WEB_DB`] after toggling `web`.
pub const WEB_DB_WEB_TOGGLED: &str = "\
services:
  web:
    # image: nginx
    build: .
    volumes:
      - ./data:/data
  db:
    image: postgres
";

/// Three services at the same indentation, each with a distinguishable body.
pub const THREE_SERVICES: &str = "\
version: '3.8'
services:
  a:
    image: alpha:1
    # build: ./a
  b:
    image: beta:1
    # build: ./b
    # volumes:
    #   - ./b/src:/src
    ports:
      - \"8080:80\"
  c:
    # image: gamma:1
    build: ./c
volumes:
  data:
";

/// Build a service block in image mode.
///
/// `indent` is the indentation of the directives themselves; volume items are
/// nested two spaces deeper.
pub fn image_mode_block(indent: &str, image: &str, build: &str, volumes: &[&str]) -> String {
    let mut block = format!("{indent}image: {image}\n{indent}# build: {build}\n");
    if !volumes.is_empty() {
        block.push_str(&format!("{indent}# volumes:\n"));
        for volume in volumes {
            block.push_str(&format!("{indent}#   - {volume}\n"));
        }
    }
    block
}

/// A temporary directory holding a `docker-compose.yml`.
pub struct ComposeProject {
    temp_dir: TempDir,
}

impl ComposeProject {
    /// Create a project whose compose file has the given content.
    ///
    /// # Panics
    /// Panics if the temporary directory or file cannot be created.
    pub fn new(content: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("docker-compose.yml"), content)
            .unwrap_or_else(|e| panic!("ComposeProject: failed to write compose file: {e}"));
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn compose_path(&self) -> PathBuf {
        self.path().join("docker-compose.yml")
    }

    /// Current content of the compose file.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self) -> String {
        fs::read_to_string(self.compose_path())
            .unwrap_or_else(|e| panic!("ComposeProject: failed to read compose file: {e}"))
    }

    /// Create a subdirectory (e.g. a service build context) and return its path.
    pub fn create_dir(&self, relative: &str) -> PathBuf {
        let dir = self.path().join(relative);
        fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("ComposeProject: failed to create {relative}: {e}"));
        dir
    }
}

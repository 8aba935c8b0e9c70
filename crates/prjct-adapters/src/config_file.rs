//! YAML configuration file: loading, saving and the starter config.
//!
//! # Format
//!
//! ```yaml
//! editor: code            # optional
//! templates:
//!   - id: dev
//!     name: "Software Development"
//!     base_path: "~/Projects/Dev"
//!     directories:
//!       - name: src
//!         children:
//!           - name: bin
//!         files:
//!           - name: README.md
//!             content: "# {name}"
//!       - name: ci
//!         optional: true
//!         when: "client != none"
//!     hooks: ["git init"]
//!     variables:
//!       - name: client
//!         prompt: "Client name"
//!         default: none
//!     extends: base
//!     tags: [code]
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use prjct_core::{
    application::{ApplicationError, ports::TemplateSource},
    domain::TemplateSet,
    error::PrjctResult,
};
use tracing::{debug, info, instrument};

/// Configuration written by `prjct install`.
pub const DEFAULT_CONFIG_YAML: &str = r#"# prjct configuration file
# Each template describes a directory tree created under its base_path.

templates:
  - id: video
    name: "Video Production"
    base_path: "~/Projects/Video"
    directories:
      - name: "01_Pre-Production"
        children:
          - name: "Scripts"
          - name: "Storyboards"
          - name: "References"
          - name: "Mood Boards"
      - name: "02_Production"
        children:
          - name: "Footage"
            children:
              - name: "A-Roll"
              - name: "B-Roll"
              - name: "Interviews"
          - name: "Audio"
            children:
              - name: "Voiceover"
              - name: "Music"
              - name: "SFX"
          - name: "Photos"
      - name: "03_Post-Production"
        children:
          - name: "Project Files"
          - name: "Edits"
            children:
              - name: "Rough Cut"
              - name: "Fine Cut"
              - name: "Final"
          - name: "Graphics"
          - name: "Color"
          - name: "Sound Design"
      - name: "04_Export"
        children:
          - name: "Masters"
          - name: "Proxies"
          - name: "Thumbnails"
      - name: "05_Delivery"
      - name: "06_Archive"

  - id: photo
    name: "Photography"
    base_path: "~/Projects/Photo"
    directories:
      - name: "RAW"
      - name: "Selects"
      - name: "Edits"
      - name: "Export"
        children:
          - name: "Web"
          - name: "Print"
          - name: "Social"
      - name: "BTS"

  - id: dev
    name: "Software Development"
    base_path: "~/Projects/Dev"
    directories:
      - name: "docs"
      - name: "src"
      - name: "tests"
      - name: "scripts"
"#;

/// Parse a configuration document. `origin` is only used in error messages.
pub fn parse_template_set(yaml: &str, origin: &Path) -> PrjctResult<TemplateSet> {
    serde_yaml::from_str(yaml).map_err(|e| {
        ApplicationError::ConfigInvalid {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Write the starter configuration to `path`, creating parent directories.
///
/// Returns `false` without touching anything when the file exists and
/// `force` is not set.
#[instrument(fields(path = %path.display()))]
pub fn write_default_config(path: &Path, force: bool) -> PrjctResult<bool> {
    if path.exists() && !force {
        debug!("config already present");
        return Ok(false);
    }
    write_text(path, DEFAULT_CONFIG_YAML)?;
    info!("wrote default configuration");
    Ok(true)
}

/// A [`TemplateSource`] backed by a YAML file on disk.
#[derive(Debug, Clone)]
pub struct YamlTemplateSource {
    path: PathBuf,
}

impl YamlTemplateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `set` back to the file.
    pub fn save(&self, set: &TemplateSet) -> PrjctResult<()> {
        let yaml = serde_yaml::to_string(set).map_err(|e| ApplicationError::ConfigInvalid {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        write_text(&self.path, &yaml)
    }
}

impl TemplateSource for YamlTemplateSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> PrjctResult<TemplateSet> {
        let text = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::ConfigNotFound {
                path: self.path.clone(),
            },
            _ => ApplicationError::ConfigInvalid {
                path: self.path.clone(),
                reason: e.to_string(),
            },
        })?;
        let set = parse_template_set(&text, &self.path)?;
        debug!(templates = set.templates.len(), "config loaded");
        Ok(set)
    }
}

fn write_text(path: &Path, text: &str) -> PrjctResult<()> {
    let fail = |e: io::Error| ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to write config: {e}"),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(fail)?;
    }
    fs::write(path, text).map_err(fail)?;
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use prjct_core::error::PrjctError;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        let set = parse_template_set(DEFAULT_CONFIG_YAML, Path::new("default")).unwrap();
        assert_eq!(set.ids(), ["video", "photo", "dev"]);
        assert!(set.validate().is_empty());

        let video = set.find("video").unwrap();
        assert_eq!(video.base_path, "~/Projects/Video");
        assert_eq!(video.directories.len(), 6);
    }

    #[test]
    fn readme_placeholder_uses_builtin_name() {
        let yaml = r##"
templates:
  - id: dev
    name: "Software Development"
    base_path: "~/Projects/Dev"
    directories:
      - name: src
        files:
          - name: README.md
            content: "# {name}"
"##;
        let set = parse_template_set(yaml, Path::new("inline")).unwrap();
        let content = &set.find("dev").unwrap().directories[0].files[0].content;
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let vars = prjct_core::domain::Variables::builtin("demo", &date);
        assert_eq!(vars.resolve(content), "# demo");
    }

    #[test]
    fn missing_file_is_config_not_found() {
        let temp = TempDir::new().unwrap();
        let err = YamlTemplateSource::new(temp.path().join("nope.yaml"))
            .load()
            .unwrap_err();
        assert!(matches!(
            err,
            PrjctError::Application(ApplicationError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_config_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "templates: [unclosed").unwrap();

        let err = YamlTemplateSource::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            PrjctError::Application(ApplicationError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn write_default_respects_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.yaml");

        assert!(write_default_config(&path, false).unwrap());
        fs::write(&path, "templates: []").unwrap();
        assert!(!write_default_config(&path, false).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "templates: []");

        assert!(write_default_config(&path, true).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_YAML);
    }

    #[test]
    fn save_then_load_keeps_templates() {
        let temp = TempDir::new().unwrap();
        let source = YamlTemplateSource::new(temp.path().join("config.yaml"));
        let set = parse_template_set(DEFAULT_CONFIG_YAML, source.path()).unwrap();

        source.save(&set).unwrap();
        assert_eq!(source.load().unwrap(), set);
    }
}

//! Scaffold Service - main application orchestrator.
//!
//! Materializes a resolved template on disk:
//! 1. Expand `~` in the base path and join the project name
//! 2. Refuse to touch an existing project root
//! 3. Create the root, then walk the tree depth-first
//! 4. On the first failure, remove everything created so far
//! 5. Run hooks inside the new project (a failing hook rolls nothing back)

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, HookRunner},
    },
    domain::{Directory, Template, Variables, eval_when},
    error::PrjctResult,
};

/// Progress lines are INFO when the caller asked for verbose output, DEBUG otherwise.
macro_rules! progress {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!($($arg)+);
        } else {
            debug!($($arg)+);
        }
    };
}

/// Per-invocation settings for [`ScaffoldService::create`].
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub verbose: bool,
    pub dry_run: bool,
    /// Builtins plus user answers. `path` is added by `create`.
    pub variables: Variables,
    /// Unresolved names of optional directories to leave out.
    pub skip_optional: HashSet<String>,
}

impl CreateOptions {
    pub fn new(variables: Variables) -> Self {
        Self {
            variables,
            ..Self::default()
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn skip(mut self, directory: impl Into<String>) -> Self {
        self.skip_optional.insert(directory.into());
        self
    }
}

/// Outcome of a successful (or dry-run) creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResult {
    pub project_path: PathBuf,
    /// Includes the project root.
    pub dirs_created: usize,
    pub files_created: usize,
    pub template_name: String,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    hooks: Box<dyn HookRunner>,
    home_dir: Option<PathBuf>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let service = ScaffoldService::new(
    ///     Box::new(LocalFilesystem::new()),
    ///     Box::new(ShellHookRunner::new()),
    /// )
    /// .with_home_dir(home);
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, hooks: Box<dyn HookRunner>) -> Self {
        Self {
            filesystem,
            hooks,
            home_dir: None,
        }
    }

    /// Directory that `~` expands to in base paths.
    pub fn with_home_dir(mut self, home: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home.into());
        self
    }

    /// Where `create` would put `project_name` for `template`.
    pub fn project_root(&self, template: &Template, project_name: &str) -> PrjctResult<PathBuf> {
        Ok(self.expand_home(&template.base_path)?.join(project_name))
    }

    /// Materialize `template` as a new project called `project_name`.
    ///
    /// `template` must already be resolved and `project_name` sanitized.
    #[instrument(
        skip_all,
        fields(
            template = %template.id,
            project = %project_name,
            dry_run = options.dry_run
        )
    )]
    pub fn create(
        &self,
        template: &Template,
        project_name: &str,
        options: CreateOptions,
    ) -> PrjctResult<CreateResult> {
        let CreateOptions {
            verbose,
            dry_run,
            mut variables,
            skip_optional,
        } = options;

        let root = self.project_root(template, project_name)?;
        if self.filesystem.exists(&root) {
            return Err(ApplicationError::ProjectExists { path: root }.into());
        }
        variables.insert("path", root.display().to_string());

        progress!(verbose, "creating {}", root.display());

        let mut walk = TreeWalk {
            filesystem: &*self.filesystem,
            variables: &variables,
            skip_optional: &skip_optional,
            verbose,
            dry_run,
            created: CreatedResources::default(),
            dirs: 1,
            files: 0,
        };

        if !dry_run {
            self.filesystem.create_dir_all(&root)?;
            walk.created.dirs.push(root.clone());
        }

        if let Err(err) = walk.descend(&template.directories, &root) {
            if !dry_run {
                walk.created.rollback(&*self.filesystem, verbose);
            }
            return Err(err);
        }
        let TreeWalk { dirs, files, .. } = walk;

        if !dry_run {
            self.run_hooks(&template.hooks, &variables, &root, verbose)?;
        }

        info!(dirs, files, path = %root.display(), "project created");

        Ok(CreateResult {
            project_path: root,
            dirs_created: dirs,
            files_created: files,
            template_name: template.name.clone(),
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// `~`, `~/x` and `~\x` expand to the home directory; `~user` is left alone.
    fn expand_home(&self, raw: &str) -> PrjctResult<PathBuf> {
        let rest = match raw.strip_prefix('~') {
            Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => rest,
            _ => return Ok(PathBuf::from(raw)),
        };

        let home = self
            .home_dir
            .as_ref()
            .ok_or_else(|| ApplicationError::FilesystemError {
                path: PathBuf::from(raw),
                reason: "cannot determine home directory".into(),
            })?;

        Ok(match rest.get(1..) {
            Some(tail) if !tail.is_empty() => home.join(tail),
            _ => home.clone(),
        })
    }

    fn run_hooks(
        &self,
        hooks: &[String],
        variables: &Variables,
        root: &Path,
        verbose: bool,
    ) -> PrjctResult<()> {
        for hook in hooks {
            let command = variables.resolve(hook);
            progress!(verbose, "hook: {}", command);
            self.hooks
                .run(&command, root)
                .map_err(|err| ApplicationError::HookFailed {
                    hook: hook.clone(),
                    reason: err.to_string(),
                })?;
        }
        Ok(())
    }
}

/// Depth-first walk over a template tree with running counts.
struct TreeWalk<'a> {
    filesystem: &'a dyn Filesystem,
    variables: &'a Variables,
    skip_optional: &'a HashSet<String>,
    verbose: bool,
    dry_run: bool,
    created: CreatedResources,
    dirs: usize,
    files: usize,
}

impl TreeWalk<'_> {
    fn descend(&mut self, dirs: &[Directory], parent: &Path) -> PrjctResult<()> {
        for dir in dirs {
            if dir.optional && self.skip_optional.contains(&dir.name) {
                debug!(directory = %dir.name, "skipping optional directory");
                continue;
            }
            if !eval_when(&dir.when, self.variables) {
                debug!(directory = %dir.name, when = %dir.when, "condition false, skipping");
                continue;
            }

            let path = parent.join(self.variables.resolve(&dir.name));
            progress!(self.verbose, "mkdir {}", path.display());
            if !self.dry_run {
                self.filesystem.create_dir(&path)?;
                self.created.dirs.push(path.clone());
            }
            self.dirs += 1;

            for file in &dir.files {
                let file_path = path.join(self.variables.resolve(&file.name));
                progress!(self.verbose, "touch {}", file_path.display());
                if !self.dry_run {
                    let content = self.variables.resolve(&file.content);
                    self.filesystem.write_file(&file_path, &content)?;
                    self.created.files.push(file_path);
                }
                self.files += 1;
            }

            self.descend(&dir.children, &path)?;
        }
        Ok(())
    }
}

/// Everything created so far, in creation order.
#[derive(Debug, Default)]
struct CreatedResources {
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
}

impl CreatedResources {
    /// Files newest first, then directories newest first. Never fails.
    fn rollback(self, filesystem: &dyn Filesystem, verbose: bool) {
        progress!(
            verbose,
            "rolling back {} file(s) and {} directory(ies)",
            self.files.len(),
            self.dirs.len()
        );
        for file in self.files.iter().rev() {
            if let Err(err) = filesystem.remove_file(file) {
                warn!(path = %file.display(), error = %err, "rollback: cannot remove file");
            }
        }
        for dir in self.dirs.iter().rev() {
            if let Err(err) = filesystem.remove_dir(dir) {
                warn!(path = %dir.display(), error = %err, "rollback: cannot remove directory");
            }
        }
    }
}

// ── tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::{MockFilesystem, MockHookRunner};
    use crate::domain::FileTemplate;
    use crate::error::PrjctError;

    fn base() -> PathBuf {
        PathBuf::from("/base")
    }

    fn template() -> Template {
        Template::new("t", "Test", "/base")
            .with_directory(
                Directory::new("a").with_file(FileTemplate::new("{name}.md", "# {name}")),
            )
            .with_directory(Directory::new("b"))
            .with_directory(Directory::new("c").with_child(Directory::new("d")))
    }

    fn vars() -> Variables {
        Variables::new().with("name", "Demo")
    }

    fn fresh_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs
    }

    fn no_hooks() -> MockHookRunner {
        let mut hooks = MockHookRunner::new();
        hooks.expect_run().never();
        hooks
    }

    #[test]
    fn creates_tree_and_counts_root() {
        let mut fs = fresh_fs();
        fs.expect_create_dir_all()
            .withf(|p| p == Path::new("/base/Demo"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_create_dir().times(4).returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|p, content| p == base().join("Demo").join("a").join("Demo.md") && content == "# Demo")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ScaffoldService::new(Box::new(fs), Box::new(no_hooks()));
        let result = service
            .create(&template(), "Demo", CreateOptions::new(vars()))
            .unwrap();

        assert_eq!(result.project_path, base().join("Demo"));
        assert_eq!(result.dirs_created, 5);
        assert_eq!(result.files_created, 1);
        assert_eq!(result.template_name, "Test");
    }

    #[test]
    fn existing_project_short_circuits() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_dir_all().never();
        fs.expect_create_dir().never();

        let service = ScaffoldService::new(Box::new(fs), Box::new(no_hooks()));
        let err = service
            .create(&template(), "Demo", CreateOptions::new(vars()))
            .unwrap_err();

        assert_eq!(
            err,
            PrjctError::Application(ApplicationError::ProjectExists {
                path: base().join("Demo")
            })
        );
    }

    #[test]
    fn failure_rolls_back_in_reverse_order() {
        let removed = Arc::new(Mutex::new(Vec::<PathBuf>::new()));
        let root = base().join("Demo");

        let mut fs = fresh_fs();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        let mut calls = 0;
        fs.expect_create_dir().returning(move |p| {
            calls += 1;
            if calls == 3 {
                Err(ApplicationError::PermissionDenied {
                    path: p.to_path_buf(),
                    reason: "denied".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });
        let files = Arc::clone(&removed);
        fs.expect_remove_file().times(1).returning(move |p| {
            files.lock().unwrap().push(p.to_path_buf());
            Ok(())
        });
        let dirs = Arc::clone(&removed);
        fs.expect_remove_dir().times(3).returning(move |p| {
            dirs.lock().unwrap().push(p.to_path_buf());
            Ok(())
        });

        let service = ScaffoldService::new(Box::new(fs), Box::new(no_hooks()));
        let err = service
            .create(&template(), "Demo", CreateOptions::new(vars()))
            .unwrap_err();

        assert!(matches!(
            err,
            PrjctError::Application(ApplicationError::PermissionDenied { .. })
        ));
        assert_eq!(
            *removed.lock().unwrap(),
            [
                root.join("a").join("Demo.md"),
                root.join("b"),
                root.join("a"),
                root.clone(),
            ]
        );
    }

    #[test]
    fn rollback_errors_do_not_replace_the_original() {
        let mut fs = fresh_fs();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_dir().returning(|p| {
            Err(ApplicationError::CreateFailed {
                path: p.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_dir().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "busy".into(),
            }
            .into())
        });

        let service = ScaffoldService::new(Box::new(fs), Box::new(no_hooks()));
        let err = service
            .create(&template(), "Demo", CreateOptions::new(vars()))
            .unwrap_err();

        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn dry_run_touches_nothing() {
        // Any call other than `exists` would panic on the mock.
        let service = ScaffoldService::new(Box::new(fresh_fs()), Box::new(no_hooks()));
        let template = template().with_hook("git init");

        let result = service
            .create(
                &template,
                "Demo",
                CreateOptions::new(vars()).dry_run(true),
            )
            .unwrap();

        assert_eq!(result.dirs_created, 5);
        assert_eq!(result.files_created, 1);
    }

    #[test]
    fn hooks_run_resolved_inside_the_project() {
        let mut fs = fresh_fs();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));

        let mut hooks = MockHookRunner::new();
        hooks
            .expect_run()
            .withf(|cmd, dir| cmd == "echo Demo" && dir == Path::new("/base/Demo"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ScaffoldService::new(Box::new(fs), Box::new(hooks));
        service
            .create(
                &template().with_hook("echo {name}"),
                "Demo",
                CreateOptions::new(vars()),
            )
            .unwrap();
    }

    #[test]
    fn hook_failure_keeps_the_tree() {
        let mut fs = fresh_fs();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_remove_dir().never();
        fs.expect_remove_file().never();

        let mut hooks = MockHookRunner::new();
        hooks.expect_run().returning(|cmd, _| {
            Err(ApplicationError::ExternalCommand {
                command: cmd.to_string(),
                reason: "exit status: 1".into(),
            }
            .into())
        });

        let service = ScaffoldService::new(Box::new(fs), Box::new(hooks));
        let err = service
            .create(
                &template().with_hook("make {name}"),
                "Demo",
                CreateOptions::new(vars()),
            )
            .unwrap_err();

        match err {
            PrjctError::Application(ApplicationError::HookFailed { hook, .. }) => {
                assert_eq!(hook, "make {name}");
            }
            other => panic!("expected HookFailed, got {other:?}"),
        }
    }

    #[test]
    fn path_variable_is_available_to_files() {
        let mut fs = fresh_fs();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_dir().returning(|_| Ok(()));
        let expected = base().join("Demo").display().to_string();
        fs.expect_write_file()
            .withf(move |_, content| content == expected)
            .times(1)
            .returning(|_, _| Ok(()));

        let template = Template::new("t", "T", "/base").with_directory(
            Directory::new("meta").with_file(FileTemplate::new("where.txt", "{path}")),
        );
        let service = ScaffoldService::new(Box::new(fs), Box::new(no_hooks()));
        service
            .create(&template, "Demo", CreateOptions::new(vars()))
            .unwrap();
    }

    #[test]
    fn skipped_and_false_branches_are_pruned() {
        let created = Arc::new(Mutex::new(Vec::<PathBuf>::new()));
        let mut fs = fresh_fs();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let sink = Arc::clone(&created);
        fs.expect_create_dir().returning(move |p| {
            sink.lock().unwrap().push(p.to_path_buf());
            Ok(())
        });

        let template = Template::new("t", "T", "/base")
            .with_directory(
                Directory::new("{name}_extras")
                    .optional()
                    .with_child(Directory::new("inner")),
            )
            .with_directory(
                Directory::new("pro")
                    .when("tier == pro")
                    .with_child(Directory::new("inner")),
            )
            .with_directory(Directory::new("kept"));

        let service = ScaffoldService::new(Box::new(fs), Box::new(no_hooks()));
        let result = service
            .create(
                &template,
                "Demo",
                CreateOptions::new(vars().with("tier", "free")).skip("{name}_extras"),
            )
            .unwrap();

        assert_eq!(result.dirs_created, 2);
        assert_eq!(*created.lock().unwrap(), [base().join("Demo").join("kept")]);
    }

    #[test]
    fn home_expansion() {
        let service = ScaffoldService::new(Box::new(MockFilesystem::new()), Box::new(no_hooks()))
            .with_home_dir("/home/u");
        let root = |base: &str| {
            service
                .project_root(&Template::new("t", "T", base), "P")
                .unwrap()
        };

        assert_eq!(root("~"), Path::new("/home/u").join("P"));
        assert_eq!(root("~/Projects"), Path::new("/home/u").join("Projects").join("P"));
        assert_eq!(root("~bob/x"), Path::new("~bob/x").join("P"));
        assert_eq!(root("/abs"), Path::new("/abs").join("P"));
    }

    #[test]
    fn tilde_without_home_is_an_error() {
        let service = ScaffoldService::new(Box::new(MockFilesystem::new()), Box::new(no_hooks()));
        assert!(
            service
                .project_root(&Template::new("t", "T", "~/x"), "P")
                .is_err()
        );
    }
}

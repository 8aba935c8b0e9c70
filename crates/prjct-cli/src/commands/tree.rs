//! `prjct tree` - preview a template's directory structure.

use prjct_core::prelude::*;

use crate::{cli::TreeArgs, commands::Context, error::CliResult};

pub fn execute(args: TreeArgs, ctx: &Context) -> CliResult<()> {
    let template = ctx.templates()?.resolve(&args.template)?;

    if ctx.output.is_json() {
        return ctx.output.json(&template);
    }

    ctx.output
        .header(&format!("{} ({})", template.name, template.id))?;
    for line in render_tree(&template.directories) {
        ctx.output.print(&line)?;
    }
    Ok(())
}

/// One line per directory and file, drawn with box connectors.
pub fn render_tree(dirs: &[Directory]) -> Vec<String> {
    let mut lines = Vec::new();
    draw(dirs, "", &mut lines);
    lines
}

fn draw(dirs: &[Directory], prefix: &str, lines: &mut Vec<String>) {
    for (i, dir) in dirs.iter().enumerate() {
        let is_last = i + 1 == dirs.len();
        let label = if dir.optional {
            format!("{} (optional)", dir.name)
        } else {
            dir.name.clone()
        };
        lines.push(format!("{prefix}{}{label}", connector(is_last)));

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });

        // Files come before subdirectories; a file is only last when no
        // subdirectory follows it.
        for (j, file) in dir.files.iter().enumerate() {
            let file_is_last = j + 1 == dir.files.len() && dir.children.is_empty();
            lines.push(format!(
                "{child_prefix}{}📄 {}",
                connector(file_is_last),
                file.name
            ));
        }

        draw(&dir.children, &child_prefix, lines);
    }
}

fn connector(is_last: bool) -> &'static str {
    if is_last { "└── " } else { "├── " }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_tree_uses_box_connectors() {
        let dirs = vec![
            Directory::new("src")
                .with_file(FileTemplate::new("main.rs", ""))
                .with_child(Directory::new("bin")),
            Directory::new("docs").optional(),
        ];

        assert_eq!(
            render_tree(&dirs),
            [
                "├── src",
                "│   ├── 📄 main.rs",
                "│   └── bin",
                "└── docs (optional)",
            ]
        );
    }

    #[test]
    fn last_file_without_children_closes_the_branch() {
        let dirs = vec![
            Directory::new("notes")
                .with_file(FileTemplate::new("a.md", ""))
                .with_file(FileTemplate::new("b.md", "")),
        ];

        assert_eq!(
            render_tree(&dirs),
            ["└── notes", "    ├── 📄 a.md", "    └── 📄 b.md"]
        );
    }

    #[test]
    fn empty_template_renders_nothing() {
        assert!(render_tree(&[]).is_empty());
    }
}

//! Interactive tree browsing session.
//!
//! Reads one command per line. Expansion, selection, and edits persist
//! for the lifetime of the session.

use std::io::{BufRead, Write};

use clap::Args;
use tracing::debug;

use catalog_core::config::AppConfig;
use catalog_core::error::AppError;
use catalog_core::types::CategoryId;
use catalog_entity::category::{CreateCategory, UpdateCategory};
use catalog_service::CategoryBrowser;

use crate::output;

const HELP: &str = "\
Commands:
  tree                      redraw the tree
  toggle <id>               expand or collapse a category
  select <id>               select a category and reveal it
  search [term]             filter the tree (no term clears)
  expand | collapse         expand or collapse everything
  add <name> [parent]       create a category (quote names with spaces)
  rename <id> <name>        rename a category
  move <id> <parent|->      re-parent a category ('-' for top level)
  delete <id>               delete a category, promoting its children
  help                      show this help
  quit                      leave the session
";

/// Arguments for the browse command
#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Start with every parent expanded
    #[arg(short, long)]
    pub expand_all: bool,
}

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Tree,
    Toggle(CategoryId),
    Select(CategoryId),
    Search(String),
    ExpandAll,
    CollapseAll,
    Add {
        name: String,
        parent: Option<CategoryId>,
    },
    Rename {
        id: CategoryId,
        name: String,
    },
    Move {
        id: CategoryId,
        parent: Option<CategoryId>,
    },
    Delete(CategoryId),
    Help,
    Quit,
}

/// Execute the browse command on stdin/stdout
pub fn execute(args: &BrowseArgs, config: &AppConfig) -> Result<(), AppError> {
    let repo = super::open_store(config)?;
    let mut browser = CategoryBrowser::open(repo, &config.catalog)?;
    if args.expand_all {
        browser.expand_all()?;
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(&mut browser, stdin.lock(), stdout.lock())
}

/// Drive a session until `quit` or end of input.
///
/// Command failures are reported inline and do not end the session.
fn run<R: BufRead, W: Write>(
    browser: &mut CategoryBrowser,
    input: R,
    mut out: W,
) -> Result<(), AppError> {
    write!(out, "{}", output::render_tree(&browser.visible_rows()?))?;
    writeln!(out, "Type 'help' for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "catalog> ")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "✗ {}", e.message)?;
                continue;
            }
        };
        debug!(?command, "Browse command");

        if command == Command::Quit {
            break;
        }

        match apply(browser, command, &mut out) {
            Ok(true) => write!(out, "{}", output::render_tree(&browser.visible_rows()?))?,
            Ok(false) => {}
            Err(e) => writeln!(out, "✗ {}", e.message)?,
        }
    }

    Ok(())
}

/// Apply one command. Returns whether the tree should be redrawn.
fn apply<W: Write>(
    browser: &mut CategoryBrowser,
    command: Command,
    out: &mut W,
) -> Result<bool, AppError> {
    match command {
        Command::Tree => {}
        Command::Toggle(id) => {
            browser.toggle(&id);
        }
        Command::Select(id) => {
            let category = browser.select(&id)?;
            let path: Vec<String> = browser
                .trees()
                .get_breadcrumbs(&id)?
                .into_iter()
                .map(|c| c.name)
                .collect();
            writeln!(out, "Selected {} ({})", category.name, path.join(" > "))?;
        }
        Command::Search(term) => browser.set_search(term),
        Command::ExpandAll => browser.expand_all()?,
        Command::CollapseAll => browser.collapse_all(),
        Command::Add { name, parent } => {
            let input = CreateCategory {
                parent_id: parent,
                ..CreateCategory::named(name)
            };
            let category = browser.create(input)?;
            writeln!(out, "✓ Created {} ({})", category.name, category.id)?;
        }
        Command::Rename { id, name } => {
            let category = browser.update(&id, UpdateCategory::rename(name))?;
            writeln!(out, "✓ Renamed {} to {}", category.id, category.name)?;
        }
        Command::Move { id, parent } => {
            let category = browser.update(&id, UpdateCategory::reparent(parent))?;
            match &category.parent_id {
                Some(parent) => writeln!(out, "✓ Moved {} under {parent}", category.id)?,
                None => writeln!(out, "✓ Moved {} to the top level", category.id)?,
            }
        }
        Command::Delete(id) => {
            let promoted = browser.delete(&id)?;
            writeln!(out, "✓ Deleted {id}")?;
            if !promoted.is_empty() {
                let ids: Vec<&str> = promoted.iter().map(CategoryId::as_str).collect();
                writeln!(out, "  moved to top level: {}", ids.join(", "))?;
            }
        }
        Command::Help => {
            write!(out, "{HELP}")?;
            return Ok(false);
        }
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn parse(line: &str) -> Result<Command, AppError> {
    let words = tokenize(line)?;
    let Some((verb, rest)) = words.split_first() else {
        return Err(AppError::validation("Empty command"));
    };

    let command = match (verb.to_lowercase().as_str(), rest) {
        ("tree" | "ls", []) => Command::Tree,
        ("toggle" | "t", [id]) => Command::Toggle(CategoryId::new(id.as_str())?),
        ("select" | "s", [id]) => Command::Select(CategoryId::new(id.as_str())?),
        ("search" | "/", terms) => Command::Search(terms.join(" ")),
        ("expand", []) => Command::ExpandAll,
        ("collapse", []) => Command::CollapseAll,
        ("add", [name]) => Command::Add {
            name: name.clone(),
            parent: None,
        },
        ("add", [name, parent]) => Command::Add {
            name: name.clone(),
            parent: Some(CategoryId::new(parent.as_str())?),
        },
        ("rename", [id, name @ ..]) if !name.is_empty() => Command::Rename {
            id: CategoryId::new(id.as_str())?,
            name: name.join(" "),
        },
        ("move", [id, parent]) => Command::Move {
            id: CategoryId::new(id.as_str())?,
            parent: match parent.as_str() {
                "-" => None,
                other => Some(CategoryId::new(other)?),
            },
        },
        ("delete" | "rm", [id]) => Command::Delete(CategoryId::new(id.as_str())?),
        ("help" | "?", []) => Command::Help,
        ("quit" | "exit" | "q", []) => Command::Quit,
        (verb, _) => {
            return Err(AppError::validation(format!(
                "Unrecognized command or arguments: '{verb}'. Type 'help' for usage"
            )));
        }
    };
    Ok(command)
}

/// Split on whitespace, keeping double-quoted runs together.
fn tokenize(line: &str) -> Result<Vec<String>, AppError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            c if c.is_whitespace() && !quoted => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }

    if quoted {
        return Err(AppError::validation("Unterminated quote"));
    }
    if pending {
        words.push(current);
    }
    Ok(words)
}

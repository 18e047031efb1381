//! Category management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use catalog_core::config::AppConfig;
use catalog_core::error::AppError;
use catalog_core::types::CategoryId;
use catalog_entity::category::{
    Category, CategoryFilter, CategoryStatus, CreateCategory, UpdateCategory,
};
use catalog_service::{CategoryBrowser, CategoryService, TreeService};

use crate::output::{self, OutputFormat};

/// Arguments for category commands
#[derive(Debug, Args)]
pub struct CategoryArgs {
    /// Category subcommand
    #[command(subcommand)]
    pub command: CategoryCommand,
}

/// Category subcommands
#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// List categories in store order
    List {
        /// Case-insensitive match on name and description
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by status (active, inactive)
        #[arg(long)]
        status: Option<String>,
    },
    /// Show the category hierarchy
    Tree {
        /// Only show matches
        #[arg(short, long)]
        search: Option<String>,
        /// Expand every parent
        #[arg(short, long)]
        expand_all: bool,
    },
    /// Show one category with its breadcrumb trail
    Show {
        /// Category ID
        id: String,
    },
    /// Create a new category
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Slug (derived from the name when omitted)
        #[arg(long)]
        slug: Option<String>,
        /// Parent category ID (omit for top level)
        #[arg(short, long)]
        parent: Option<String>,
        /// Status (active, inactive)
        #[arg(long)]
        status: Option<String>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Update fields of a category
    Update {
        /// Category ID
        id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New slug
        #[arg(long)]
        slug: Option<String>,
        /// New parent category ID
        #[arg(short, long, conflicts_with = "top_level")]
        parent: Option<String>,
        /// Move to the top level
        #[arg(long)]
        top_level: bool,
        /// New status (active, inactive)
        #[arg(long)]
        status: Option<String>,
        /// New description (empty string clears it)
        #[arg(short, long)]
        description: Option<String>,
        /// New product count
        #[arg(long)]
        product_count: Option<u32>,
    },
    /// Delete a category; its children move to the top level
    Delete {
        /// Category ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Category display row
#[derive(Debug, Serialize, Tabled)]
struct CategoryRow {
    /// Category ID
    id: String,
    /// Name
    name: String,
    /// Slug
    slug: String,
    /// Parent ID
    parent: String,
    /// Status
    status: String,
    /// Product count
    products: u32,
    /// Last update
    updated_at: String,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            slug: c.slug.clone(),
            parent: c
                .parent_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
            status: c.status.to_string(),
            products: c.product_count,
            updated_at: c.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// A category with its path from the top level.
#[derive(Debug, Serialize)]
struct CategoryDetail {
    #[serde(flatten)]
    category: Category,
    breadcrumbs: Vec<String>,
    children: Vec<CategoryId>,
    descendants: usize,
    visible: bool,
}

/// Execute category commands
pub fn execute(args: &CategoryArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let repo = super::open_store(config)?;
    let categories = CategoryService::new(repo.clone(), &config.catalog);
    let trees = TreeService::new(repo.clone());

    match &args.command {
        CategoryCommand::List { search, status } => {
            let mut filter = CategoryFilter::search(search.as_deref().unwrap_or_default());
            if let Some(status) = status {
                filter = filter.with_status(status.parse()?);
            }

            let rows: Vec<CategoryRow> = categories
                .list(&filter)?
                .iter()
                .map(CategoryRow::from)
                .collect();
            output::print_list(&rows, format)?;
        }
        CategoryCommand::Tree { search, expand_all } => {
            let mut browser = CategoryBrowser::open(repo, &config.catalog)?;
            if let Some(term) = search {
                browser.set_search(term);
            }
            if *expand_all {
                browser.expand_all()?;
            }

            match format {
                OutputFormat::Table => print!("{}", output::render_tree(&browser.visible_rows()?)),
                OutputFormat::Json => output::print_item(&browser.forest()?, format)?,
            }
        }
        CategoryCommand::Show { id } => {
            let id = CategoryId::new(id.as_str())?;
            let category = categories.get(&id)?;
            let breadcrumbs: Vec<String> = trees
                .get_breadcrumbs(&id)?
                .into_iter()
                .map(|c| c.name)
                .collect();
            let forest = trees.build_forest()?;
            let node = forest
                .find(&id)
                .ok_or_else(|| AppError::not_found(format!("Category '{id}' not found")))?;
            let children: Vec<CategoryId> =
                node.children.iter().map(|child| child.id().clone()).collect();
            let descendants = node.descendant_count();
            let visible = category.is_active();

            match format {
                OutputFormat::Table => {
                    println!("{}", category.name);
                    output::print_kv("ID", category.id.as_str());
                    output::print_kv("Slug", &category.slug);
                    output::print_kv("Path", &breadcrumbs.join(" > "));
                    output::print_kv(
                        "Status",
                        if visible { "active (visible)" } else { "inactive (hidden)" },
                    );
                    output::print_kv("Products", &category.product_count.to_string());
                    output::print_kv("Children", &children.len().to_string());
                    output::print_kv("Descendants", &descendants.to_string());
                    if let Some(description) = &category.description {
                        output::print_kv("Description", description);
                    }
                    output::print_kv("Created", &category.created_at.to_rfc3339());
                    output::print_kv("Updated", &category.updated_at.to_rfc3339());
                }
                OutputFormat::Json => {
                    let detail = CategoryDetail {
                        category,
                        breadcrumbs,
                        children,
                        descendants,
                        visible,
                    };
                    output::print_item(&detail, format)?;
                }
            }
        }
        CategoryCommand::Create {
            name,
            slug,
            parent,
            status,
            description,
        } => {
            let input = CreateCategory {
                name: name.clone(),
                slug: slug.clone(),
                description: description.clone(),
                parent_id: parent.as_deref().map(CategoryId::new).transpose()?,
                status: status.as_deref().map(str::parse::<CategoryStatus>).transpose()?,
                ..CreateCategory::default()
            };

            let category = categories.create(input)?;
            match format {
                OutputFormat::Table => output::print_success(&format!(
                    "Category '{}' created (id: {})",
                    category.name, category.id
                )),
                OutputFormat::Json => output::print_item(&category, format)?,
            }
        }
        CategoryCommand::Update {
            id,
            name,
            slug,
            parent,
            top_level,
            status,
            description,
            product_count,
        } => {
            let id = CategoryId::new(id.as_str())?;
            let parent_id = match (parent, top_level) {
                (Some(parent), _) => Some(Some(CategoryId::new(parent.as_str())?)),
                (None, true) => Some(None),
                (None, false) => None,
            };

            let changes = UpdateCategory {
                name: name.clone(),
                slug: slug.clone(),
                description: description.clone(),
                parent_id,
                status: status.as_deref().map(str::parse::<CategoryStatus>).transpose()?,
                product_count: *product_count,
                ..UpdateCategory::default()
            };

            if changes.is_empty() {
                output::print_warning("Nothing to update");
                return Ok(());
            }

            let category = categories.update(&id, changes)?;
            match format {
                OutputFormat::Table => {
                    output::print_success(&format!("Category '{}' updated", category.id));
                }
                OutputFormat::Json => output::print_item(&category, format)?,
            }
        }
        CategoryCommand::Delete { id, yes } => {
            let id = CategoryId::new(id.as_str())?;
            let category = categories.get(&id)?;

            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete '{}'? Its subcategories will move to the top level",
                        category.name
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    output::print_warning("Aborted");
                    return Ok(());
                }
            }

            let promoted = categories.delete(&id)?;
            output::print_success(&format!("Category '{}' deleted", category.name));
            for child in &promoted {
                output::print_kv("Moved to top level", child.as_str());
            }
        }
    }

    Ok(())
}

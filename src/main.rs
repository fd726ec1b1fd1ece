use clap::{Parser, Subcommand};
use folio::bundler::CommandBundler;
use folio::config::{self, BuildOptions};
use folio::pipeline::{self, BuildPlan};
use folio::store::{self, ContentStore};
use folio::{index, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn version_string() -> &'static str {
    let hash = env!("FOLIO_GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup
        Box::leak(format!("{} ({hash})", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Content pipeline for a portfolio and blog site")]
#[command(long_about = "\
Content pipeline for a portfolio and blog site

Content lives as JSON under a private data root. `folio build` publishes it
and compiles the site:

  1. hide the admin UI            src/app/admin/ -> admin-backup/
  2. copy content                 src/data/ -> public/data/
  3. build the blog index         public/data/blogs-index.json
  4. run the bundler              npx next build
  5. restore the admin UI         always, even when a step fails

Content structure:

  src/data/
  ├── profile.json
  ├── experience.json
  ├── skills.json
  └── blogs/
      ├── categories.json                     # category -> subcategories
      └── web-development/frontend/hooks.json # one document per post

Environment:
  NODE_ENV=production    static export (admin UI is hidden during the build)
  GITHUB_PAGES=true      static export under the configured base path
  RUST_LOG               diagnostic log filter (default: folio=info)

Run 'folio gen-config' to generate a documented folio.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project root (holds folio.toml, src/, public/)
    #[arg(long, default_value = ".", global = true)]
    project: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full export: hide admin → copy → index → bundle → restore
    Build,
    /// Copy content and rebuild the index without bundling
    Data,
    /// Rebuild the blog index only
    Index,
    /// Move a leftover admin backup back into place
    RestoreAdmin,
    /// List posts, newest first
    Posts(PostsArgs),
    /// Show, save or delete a single post
    #[command(subcommand)]
    Post(PostCommand),
    /// List categories with their subcategories and post counts
    Categories,
    /// Dashboard numbers for posts, experience and skills
    Stats,
    /// Validate content without building
    Check,
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct PostsArgs {
    /// Only posts in this category
    #[arg(long)]
    category: Option<String>,
    /// Only posts in this subcategory (requires --category)
    #[arg(long, requires = "category")]
    subcategory: Option<String>,
    /// Featured, published posts only
    #[arg(long, conflicts_with = "recent")]
    featured: bool,
    /// The N most recent published posts
    #[arg(long, value_name = "N")]
    recent: Option<usize>,
}

#[derive(Subcommand)]
enum PostCommand {
    /// Print a post's details
    Show {
        id: String,
        #[arg(long, requires = "subcategory")]
        category: Option<String>,
        #[arg(long, requires = "category")]
        subcategory: Option<String>,
    },
    /// Validate and save a post from a JSON file
    Save { file: PathBuf },
    /// Delete a post
    Delete {
        category: String,
        subcategory: String,
        id: String,
    },
}

const FEATURED_LIMIT: usize = 3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    install_tracing();
    let cli = Cli::parse();
    let root = cli.project.as_path();

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Build => {
            let config = config::load_config(root)?;
            let plan = BuildPlan::new(root, &config, build_options(&config));
            let bundler = CommandBundler::new(config.bundler.command.clone(), root);
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_build_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = pipeline::build(&plan, &bundler, Some(tx));
            printer.join().map_err(|_| "output thread panicked")?;
            if result.is_err() {
                // Already reported through the Finished event.
                std::process::exit(1);
            }
        }
        Command::Data => {
            let config = config::load_config(root)?;
            let plan = BuildPlan::new(root, &config, build_options(&config));
            let report = pipeline::stage_data(&plan, None)?;
            output::print_data_report(&report, &plan.paths.index_file, root);
        }
        Command::Index => {
            let config = config::load_config(root)?;
            let plan = BuildPlan::new(root, &config, BuildOptions::default());
            let outcome = index::write_index(&plan.store(), &plan.paths.index_file)?;
            for line in output::format_index_outcome(&outcome) {
                println!("{}", line);
            }
        }
        Command::RestoreAdmin => {
            let config = config::load_config(root)?;
            let plan = BuildPlan::new(root, &config, BuildOptions::default());
            let outcome = plan.admin_dir().restore()?;
            println!(
                "{}",
                output::format_restore_outcome(outcome, &plan.paths.admin_dir, root)
            );
        }
        Command::Posts(args) => {
            let store = open_store(root)?;
            let mut posts = store.all_posts()?;
            if let Some(category) = &args.category {
                posts = store::filter_by_category(posts, category, args.subcategory.as_deref());
            }
            if args.featured {
                posts = store::featured(posts, FEATURED_LIMIT);
            } else if let Some(n) = args.recent {
                posts = store::recent(posts, n);
            }
            output::print_post_list(&posts);
        }
        Command::Post(command) => {
            let store = open_store(root)?;
            run_post_command(&store, command)?;
        }
        Command::Categories => {
            let store = open_store(root)?;
            let categories = store.categories()?;
            let posts = store.all_posts()?;
            output::print_categories(&categories, &posts);
        }
        Command::Stats => {
            let store = open_store(root)?;
            output::print_stats(&store.stats()?);
        }
        Command::Check => {
            let config = config::load_config(root)?;
            let plan = BuildPlan::new(root, &config, BuildOptions::default());
            println!("==> Checking {}", plan.paths.data_dir.display());
            let store = plan.store();
            let entries = index::collect_index(&store)?;
            println!("    {} indexable posts", entries.len());
            output::print_orphans(&store.orphans()?, store.root());
            println!("==> Content is valid");
        }
    }

    Ok(())
}

fn run_post_command(
    store: &ContentStore,
    command: PostCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        PostCommand::Show {
            id,
            category,
            subcategory,
        } => {
            let post = match (category, subcategory) {
                (Some(c), Some(s)) => store.post(&c, &s, &id)?,
                _ => store.post_by_id(&id)?,
            };
            match post {
                Some(post) => output::print_post_detail(&post),
                None => return Err(format!("post {id:?} not found").into()),
            }
        }
        PostCommand::Save { file } => {
            let post = store::read_json(&file)?;
            let saved = store.save_post(post)?;
            output::print_post_detail(&saved);
        }
        PostCommand::Delete {
            category,
            subcategory,
            id,
        } => {
            store.delete_post(&category, &subcategory, &id)?;
            println!("Deleted {}", folio::naming::post_path(&category, &subcategory, &id));
        }
    }
    Ok(())
}

fn open_store(root: &Path) -> Result<ContentStore, config::ConfigError> {
    let config = config::load_config(root)?;
    Ok(ContentStore::new(root.join(&config.paths.data_dir)))
}

/// Fold the deployment environment into explicit options, once.
fn build_options(config: &config::ProjectConfig) -> BuildOptions {
    let node_env = std::env::var("NODE_ENV").ok();
    let github_pages = std::env::var("GITHUB_PAGES").ok();
    BuildOptions::from_env_values(node_env.as_deref(), github_pages.as_deref(), &config.deploy)
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

use anyhow::{Context, Result};
use cairn::areas::repository::Repository;
use cairn::artifacts::core::{PagerWriter, should_page};
use cairn::artifacts::objects::commit::Author;
use cairn::commands::plumbing::cat_file::CatFileMode;
use cairn::commands::porcelain::log::LogOptions;
use clap::{ArgGroup, Parser, Subcommand};
use minus::Pager;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cairn",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal content-addressable version control system",
    long_about = "cairn stores snapshots of a directory as content-addressed objects \
    (blobs, trees, commits) and keeps branches as plain references to them.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates an empty repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(name = "add", about = "Add file contents to the index")]
    Add {
        #[arg(index = 1, required = true, help = "Files or directories to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(name = "rm", about = "Remove files from the index")]
    Rm {
        #[arg(long, help = "Only unstage, keep the files in the working tree")]
        cached: bool,
        #[arg(index = 1, required = true)]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Record the index as a new commit",
        long_about = "This command snapshots the index and advances the current branch to the new commit."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(long, value_parser = parse_author, help = "Override the author, as 'Name <email>'")]
        author: Option<Author>,
        #[arg(long, help = "Allow a commit whose tree equals its parent's")]
        allow_empty: bool,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status {
        #[arg(long, help = "Print the short, machine-readable format")]
        porcelain: bool,
    },
    #[command(name = "log", about = "Show commit history")]
    Log {
        #[arg(long, help = "One line per commit")]
        oneline: bool,
        #[arg(short = 'n', long = "max-count", help = "Limit the number of commits")]
        max_count: Option<usize>,
        #[arg(index = 1, help = "Revision to start from (defaults to HEAD)")]
        revision: Option<String>,
    },
    #[command(
        name = "branch",
        about = "List, create, or delete branches",
        long_about = "Without arguments this command lists branches. With a name it creates a branch \
        at the given start point or at HEAD."
    )]
    Branch {
        #[arg(short, long, value_name = "BRANCH", conflicts_with_all = ["name", "start_point"], help = "Delete a branch")]
        delete: Option<String>,
        #[arg(index = 1)]
        name: Option<String>,
        #[arg(index = 2)]
        start_point: Option<String>,
    },
    #[command(name = "checkout", about = "Switch branches or detach HEAD at a commit")]
    Checkout {
        #[arg(short = 'b', help = "Create a new branch at HEAD and switch to it")]
        create: bool,
        #[arg(index = 1)]
        target: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file as a blob and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "cat-file", about = "Print the type or content of an object")]
    #[command(group(ArgGroup::new("mode").required(true).args(["pretty", "object_type"])))]
    CatFile {
        #[arg(short = 'p', help = "Pretty-print the object's content")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object's type")]
        object_type: bool,
        #[arg(index = 1)]
        object: String,
    },
    #[command(name = "write-tree", about = "Create tree objects from the index")]
    WriteTree,
    #[command(name = "commit-tree", about = "Create a commit object for a tree")]
    CommitTree {
        #[arg(index = 1)]
        tree: String,
        #[arg(short = 'p', help = "A parent commit (repeatable)")]
        parents: Vec<String>,
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "ls-tree", about = "List the contents of a tree object")]
    LsTree {
        #[arg(short, help = "Recurse into subtrees")]
        recursive: bool,
        #[arg(index = 1)]
        tree_ish: String,
    },
}

fn parse_author(identity: &str) -> std::result::Result<Author, String> {
    Author::parse_identity(identity).map_err(|error| error.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn open_repository(writer: Box<dyn std::io::Write>) -> Result<Repository> {
    let pwd = std::env::current_dir().context("unable to read the current directory")?;
    Ok(Repository::discover(&pwd, writer)?)
}

fn stdout() -> Box<dyn std::io::Write> {
    Box::new(std::io::stdout())
}

fn init_repository(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().context("unable to read the current directory")?,
    };
    std::fs::create_dir_all(&path)
        .with_context(|| format!("unable to create {}", path.display()))?;

    Repository::new(&path, stdout())?.init()?;
    Ok(())
}

fn log(options: &LogOptions) -> Result<()> {
    if !should_page() {
        return Ok(open_repository(stdout())?.log(options)?);
    }

    let pager = Pager::new();
    let repository = open_repository(Box::new(PagerWriter::new(pager.clone())))?;
    repository.log(options)?;
    drop(repository);

    minus::page_all(pager)?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => init_repository(path.as_deref())?,
        Commands::Add { paths } => open_repository(stdout())?.add(&paths)?,
        Commands::Rm { cached, paths } => open_repository(stdout())?.rm(&paths, cached)?,
        Commands::Commit {
            message,
            author,
            allow_empty,
        } => open_repository(stdout())?.commit(&message, author, allow_empty)?,
        Commands::Status { porcelain } => open_repository(stdout())?.status(porcelain)?,
        Commands::Log {
            oneline,
            max_count,
            revision,
        } => log(&LogOptions {
            oneline,
            max_count,
            revision,
        })?,
        Commands::Branch {
            delete,
            name,
            start_point,
        } => {
            let repository = open_repository(stdout())?;
            match (delete, name) {
                (Some(branch), _) => repository.delete_branch(&branch)?,
                (None, Some(name)) => repository.branch(&name, start_point.as_deref())?,
                (None, None) => repository.list_branches()?,
            }
        }
        Commands::Checkout { create, target } => {
            let repository = open_repository(stdout())?;
            if create {
                repository.checkout_new_branch(&target)?
            } else {
                repository.checkout(&target)?
            }
        }
        Commands::HashObject { write, file } => {
            open_repository(stdout())?.hash_object(&file, write)?
        }
        Commands::CatFile {
            pretty,
            object_type: _,
            object,
        } => {
            let mode = if pretty {
                CatFileMode::Pretty
            } else {
                CatFileMode::Type
            };
            open_repository(stdout())?.cat_file(&object, mode)?
        }
        Commands::WriteTree => open_repository(stdout())?.write_tree()?,
        Commands::CommitTree {
            tree,
            parents,
            message,
        } => open_repository(stdout())?.commit_tree(&tree, &parents, &message)?,
        Commands::LsTree {
            recursive,
            tree_ish,
        } => open_repository(stdout())?.ls_tree(&tree_ish, recursive)?,
    }

    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

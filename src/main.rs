use clap::{Parser, Subcommand};
use filecmd::script::{ScriptError, parse_script, parse_script_file};
use filecmd::{
    CommandManager, Config, DEMO_SCRIPT, FileStore, Notification, NotificationCategory, ScriptOp,
    StoreBackend, open_store, run_script,
};
use std::io::Read;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Undoable create/delete/rename operations over a file store
#[derive(Debug, Parser)]
#[command(name = "filecmd", version, about)]
struct Cli {
    /// Config file (RON or JSON); defaults to the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Operate on real files below this directory
    #[arg(long, global = true, conflicts_with = "memory")]
    root: Option<PathBuf>,

    /// Operate on an in-memory store
    #[arg(long, global = true)]
    memory: bool,

    /// Keep at most this many undo entries (at least 1)
    #[arg(long, global = true)]
    history_limit: Option<NonZeroUsize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a command script ("-" reads stdin)
    Run { script: PathBuf },
    /// Run the built-in demonstration sequence
    Demo,
}

fn read_ops(command: &Commands) -> Result<Vec<ScriptOp>, ScriptError> {
    match command {
        Commands::Demo => parse_script(DEMO_SCRIPT),
        Commands::Run { script } if script.as_os_str() == "-" => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            parse_script(&source)
        }
        Commands::Run { script } => parse_script_file(script),
    }
}

/// Print the final listing; failures here are reported, never fatal
fn print_store(store: &dyn FileStore) {
    println!("\n=== Store contents ===");
    let paths = match store.paths() {
        Ok(paths) => paths,
        Err(e) => {
            let notification = Notification::error(
                NotificationCategory::Store,
                format!("Failed to list store: {}", e),
            );
            println!("{}", notification);
            return;
        }
    };

    if paths.is_empty() {
        println!("(empty)");
    }
    for path in paths {
        match store.read(&path) {
            Ok(content) => println!("{}: {}", path, content.unwrap_or_default()),
            Err(e) => println!("{}: <unreadable: {}>", path, e),
        }
    }
}

fn fail(category: NotificationCategory, message: String) -> ExitCode {
    eprintln!("{}", Notification::error(category, message));
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = Config::source_path(cli.config.as_deref());
    let loaded = match &config_path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            return fail(
                NotificationCategory::Generic,
                format!("Invalid configuration: {}", e),
            );
        }
    };

    if let Some(root) = cli.root {
        config.backend = StoreBackend::Disk { root };
    } else if cli.memory {
        config.backend = StoreBackend::Memory;
    }
    if cli.history_limit.is_some() {
        config.history_limit = cli.history_limit;
    }

    filecmd::logging::init_logging(&config.log_filter);
    tracing::debug!(path = ?config_path, ?config, "configuration resolved");

    let ops = match read_ops(&cli.command) {
        Ok(ops) => ops,
        Err(e) => return fail(NotificationCategory::Script, format!("Invalid script: {}", e)),
    };

    let mut store = match open_store(&config.backend) {
        Ok(store) => store,
        Err(e) => {
            return fail(
                NotificationCategory::Store,
                format!("Failed to open store: {}", e),
            );
        }
    };
    let mut manager = CommandManager::from_limit(config.history_limit);

    for notification in run_script(&ops, &mut manager, store.as_mut()) {
        println!("{}", notification);
    }

    println!(
        "\nHistory: {} to undo, {} to redo",
        manager.undo_count(),
        manager.redo_count()
    );
    print_store(store.as_ref());

    ExitCode::SUCCESS
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pkgswap_lib::{ErrorKind, SwapError};

mod cmd;
mod output;

use output::OutputFormat;

/// pkgswap - switch between variants of package.json
#[derive(Parser)]
#[command(name = "pkgswap")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Start the project root search here instead of the current directory
  #[arg(long, global = true)]
  root: Option<PathBuf>,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Move package.json into the master file and link it back
  Init {
    /// Overwrite a master file left behind by an earlier init
    #[arg(short, long)]
    force: bool,
  },

  /// Create a variant copied from master
  Create {
    /// Variant name
    name: String,

    /// Overwrite the variant if it exists
    #[arg(short, long)]
    force: bool,

    /// Enable the variant after creating it
    #[arg(short, long)]
    enable: bool,

    /// Packages to leave out (repeatable or comma-separated)
    #[arg(short, long, value_name = "PACKAGES")]
    blacklist: Vec<String>,

    /// Write the variant here instead of .pkgswap.<name>.json
    #[arg(long)]
    dest: Option<PathBuf>,
  },

  /// Point package.json at a variant (name or path; "master" disables)
  Enable {
    /// Variant name or path to a manifest file
    variant: String,
  },

  /// Point package.json back at master
  Disable,

  /// Remove packages from a variant and remember them
  Blacklist {
    /// Packages to remove (repeatable or comma-separated)
    #[arg(required = true)]
    packages: Vec<String>,

    #[command(flatten)]
    target: cmd::TargetArgs,
  },

  /// Forget blacklisted packages
  Unblacklist {
    /// Packages to forget (repeatable or comma-separated)
    #[arg(required = true)]
    packages: Vec<String>,

    /// Copy the packages back from master into the variant
    #[arg(short, long)]
    restore: bool,

    #[command(flatten)]
    target: cmd::TargetArgs,
  },

  /// Merge a variant's dependency changes into master
  Reconcile {
    #[command(flatten)]
    target: cmd::TargetArgs,
  },

  /// Show which manifest is enabled
  Status {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// List variants in the project
  List {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_filter = if cli.verbose { "pkgswap_lib=debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      output::print_error(&format!("{err:#}"));
      let already_exists = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<SwapError>())
        .any(|swap_err| swap_err.kind() == ErrorKind::AlreadyExists);
      if already_exists {
        output::print_info("Re-run with --force to overwrite.");
      }
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> anyhow::Result<()> {
  let root = cli.root.as_deref();

  match cli.command {
    Commands::Init { force } => cmd::cmd_init(root, force),
    Commands::Create {
      name,
      force,
      enable,
      blacklist,
      dest,
    } => cmd::cmd_create(
      root,
      &name,
      cmd::CreateArgs {
        force,
        enable,
        blacklist,
        dest,
      },
    ),
    Commands::Enable { variant } => cmd::cmd_enable(root, &variant),
    Commands::Disable => cmd::cmd_disable(root),
    Commands::Blacklist { packages, target } => cmd::cmd_blacklist(root, &packages, &target),
    Commands::Unblacklist {
      packages,
      restore,
      target,
    } => cmd::cmd_unblacklist(root, &packages, restore, &target),
    Commands::Reconcile { target } => cmd::cmd_reconcile(root, &target),
    Commands::Status { output } => cmd::cmd_status(root, output),
    Commands::List { output } => cmd::cmd_list(root, output),
  }
}

use clap::Parser;
use colored::Colorize;
use env_logger::Env;

mod file_walker;
mod migrate;

#[derive(Parser)]
#[command(name = "projfix")]
#[command(about = "Migrate legacy project.json manifests to the current schema", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    #[command(flatten)]
    migrate: migrate::MigrateArgs,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug; RUST_LOG overrides it
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    migrate::execute(cli.migrate)
}

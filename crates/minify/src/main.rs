use clap::Parser;
use minify::commands::minify::{MinifyArgs, run};
use minify::config::MinifyConfig;

/// Regenerate compacted Ruby from a resolved syntax tree.
#[derive(Parser)]
#[command(name = "minify", version, about)]
struct Cli {
    #[command(flatten)]
    args: MinifyArgs,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    minify::logging::init(cli.verbose);

    let root = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let config = MinifyConfig::load(&root);

    match run(&cli.args, &config) {
        Ok(outcome) => {
            if outcome.output_path.is_none() {
                println!("{}", outcome.code);
            }
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}

use clap::Parser;
use hydrochess_variants::VariantMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// =============================================================================
// CLI Arguments
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "variant_info")]
#[command(about = "List registered variants or print the derived parameters of one")]
struct Args {
    /// Variant definition file loaded on top of the built-in variants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip definitions with problems and exit non-zero
    #[arg(long)]
    strict: bool,

    /// Print the summary of this variant as JSON instead of listing names
    variant: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut variants = VariantMap::with_builtins();

    if let Some(path) = &args.config {
        match variants.parse_file(path, args.strict) {
            Ok(names) => tracing::info!(count = names.len(), path = %path.display(), "loaded variants"),
            Err(err) => {
                for problem in err.config_errors() {
                    eprintln!("{problem}");
                }
                eprintln!("{}: {err}", path.display());
                if args.strict {
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    let Some(name) = args.variant else {
        for name in variants.get_keys() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    };

    let Some(variant) = variants.get(&name) else {
        eprintln!("unknown variant '{name}'");
        return ExitCode::FAILURE;
    };
    match serde_json::to_string_pretty(&variant.summary()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to serialize summary: {err}");
            ExitCode::FAILURE
        }
    }
}

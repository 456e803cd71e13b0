//! tfviz CLI — Map the resources and dependencies declared in Terraform code.

mod server;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use tfviz_core::config::AnalysisConfig;
use tfviz_core::output::write_output;
use tfviz_core::pipeline::{self, Extraction};

#[derive(Parser)]
#[command(
    name = "tfviz",
    about = "tfviz - Map the resources in your Terraform code and how they depend on each other"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand that runs an extraction.
#[derive(clap::Args)]
struct ExtractArgs {
    /// Directory containing Terraform files
    path: PathBuf,

    /// JSON configuration file (flags override its values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Additional directory names to exclude
    #[arg(long)]
    exclude: Vec<String>,

    /// Resolve references on a single thread
    #[arg(long)]
    sequential: bool,

    /// Show per-phase timing breakdown and info logs
    #[arg(long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the resource graph and write it as JSON
    Analyze {
        #[command(flatten)]
        args: ExtractArgs,

        /// Output JSON file path
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Extract the resource graph and serve it at /api/diagram
    Serve {
        #[command(flatten)]
        args: ExtractArgs,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn build_config(args: &ExtractArgs) -> AnalysisConfig {
    let base = match &args.config {
        Some(path) => match AnalysisConfig::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error loading configuration: {e}");
                std::process::exit(1);
            }
        },
        None => AnalysisConfig::default(),
    };

    let root_path = args.path.canonicalize().unwrap_or_else(|_| args.path.clone());
    let mut exclude_patterns = base.exclude_patterns.clone();
    exclude_patterns.extend(args.exclude.iter().cloned());

    AnalysisConfig {
        root_path: root_path.to_string_lossy().to_string(),
        exclude_patterns,
        parallel: base.parallel && !args.sequential,
        verbose: base.verbose || args.verbose,
        quiet: base.quiet || args.quiet,
        ..base
    }
}

fn dir_name(config: &AnalysisConfig) -> String {
    std::path::Path::new(&config.root_path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "terraform".to_string())
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { args, output } => {
            let mut config = build_config(&args);
            init_logging(config.verbose, config.quiet);

            let output_path = output
                .or_else(|| config.output_path.clone())
                .unwrap_or_else(|| format!("{}.tfviz.json", dir_name(&config)));
            config.output_path = Some(output_path.clone());

            let extraction = if config.quiet {
                run_quiet(&config)
            } else {
                run_with_progress(&config)
            };

            if let Err(e) = write_output(&extraction.graph, &output_path) {
                eprintln!("Error writing output: {e}");
                std::process::exit(1);
            }
            if !config.quiet {
                println!(
                    "\n  {} {}",
                    style("Output written to:").green(),
                    output_path
                );
            }
        }
        Commands::Serve { args, host, port } => {
            let config = build_config(&args);
            init_logging(config.verbose, config.quiet);

            let extraction = if config.quiet {
                run_quiet(&config)
            } else {
                run_with_progress(&config)
            };

            if let Err(e) = server::serve(extraction.graph, &host, port) {
                eprintln!("Server failed: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn run_quiet(config: &AnalysisConfig) -> Extraction {
    match pipeline::run_pipeline(config, None) {
        Ok(extraction) => extraction,
        Err(e) => {
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run_with_progress(config: &AnalysisConfig) -> Extraction {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message("Initialising...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    let progress: pipeline::ProgressCallback = {
        let pb = pb.clone();
        Box::new(move |_name, label| {
            pb.set_message(label.to_string());
        })
    };

    let start = Instant::now();
    let extraction = match pipeline::run_pipeline(config, Some(progress)) {
        Ok(r) => r,
        Err(e) => {
            pb.finish_and_clear();
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    };
    pb.finish_and_clear();

    print_summary(config, &extraction, start.elapsed().as_secs_f64() * 1000.0);
    extraction
}

fn print_summary(config: &AnalysisConfig, extraction: &Extraction, duration_ms: f64) {
    let stats = &extraction.stats;

    println!(
        "\n{}  tfviz: {}",
        style("✓").green().bold(),
        style(dir_name(config)).bold()
    );
    println!("  {:<14} {}", "Files:", stats.files_parsed);
    if !stats.files_failed.is_empty() {
        println!(
            "  {:<14} {}",
            "Unparsed:",
            style(stats.files_failed.join(", ")).yellow()
        );
    }
    println!("  {:<14} {}", "Resources:", stats.resources);
    println!("  {:<14} {}", "Dependencies:", stats.dependencies);
    println!("  {:<14} {}", "References:", stats.references);
    println!("  {:<14} {}", "Outputs:", stats.outputs_bound);
    if let Some((id, count)) = &stats.most_depended_upon {
        println!("  {:<14} {} ({} dependents)", "Hub:", style(id).cyan(), count);
    }
    println!("  {:<14} {:.1}ms", "Duration:", duration_ms);

    if !stats.categories.is_empty() {
        println!("\n  Categories:");
        for (category, count) in &stats.categories {
            println!("    {:<14} {}", category, count);
        }
    }

    if config.verbose {
        println!("\n  Phase Timings:");
        for (phase, secs) in &stats.phase_timings {
            println!("    {:<14} {:.1}ms", phase, secs * 1000.0);
        }
    }
}

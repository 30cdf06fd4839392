use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use tempo_core::models::AnalysisReport;
use tempo_core::{analyze_image, AnalyzeOptions, ChipLayout, WellId};

mod overlay;

#[derive(Parser)]
#[command(name = "tempo")]
#[command(version, about = "6-well TEMPO assay chip genotype analyzer", long_about = None)]
struct Cli {
    /// Enable verbose diagnostic output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single chip photograph
    Analyze {
        /// Input image (JPEG or PNG)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Write the analysis report as JSON
        #[arg(short, long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Write an annotated overlay PNG showing the well markers
        #[arg(long, value_name = "FILE")]
        debug_image: Option<PathBuf>,

        /// Custom chip layout file (YAML)
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,
    },

    /// Batch analyze multiple chip photographs
    Batch {
        /// Input image files
        #[arg(value_name = "INPUTS")]
        inputs: Vec<PathBuf>,

        /// Output directory for JSON reports
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Custom chip layout file (YAML)
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,
    },

    /// Manage the well ROI layout
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },
}

#[derive(Subcommand)]
enum LayoutAction {
    /// Print the active ROI layout
    Show,

    /// Write a layout template for customization
    Init {
        /// Output file path
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    tempo_core::config::set_verbose(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            input,
            json,
            debug_image,
            layout,
        } => cmd_analyze(input, json, debug_image, layout),

        Commands::Batch {
            inputs,
            out,
            layout,
            threads,
        } => cmd_batch(inputs, out, layout, threads),

        Commands::Layout { action } => match action {
            LayoutAction::Show => cmd_layout_show(),
            LayoutAction::Init { output } => cmd_layout_init(output),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Resolve the layout to analyze with: explicit file, or the global config.
fn resolve_layout(layout_path: Option<&Path>) -> Result<ChipLayout, String> {
    match layout_path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read layout file {}: {}", path.display(), e))?;
            let layout: ChipLayout = serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse layout file {}: {}", path.display(), e))?;
            layout
                .validate()
                .map_err(|reason| format!("Invalid layout {}: {}", path.display(), reason))?;
            Ok(layout)
        }
        None => Ok(tempo_core::config::chip_config_handle().config.layout),
    }
}

fn print_report(report: &AnalysisReport) {
    println!("\nGenotype calls:");
    for group in &report.groups {
        println!(
            "  Group {}: SNPV={:>6.2}  WTV={:>6.2}  SNR={:>7.3}  ->  {}",
            group.group_number, group.snpv, group.wtv, group.snr, group.result
        );
    }
}

fn cmd_analyze(
    input: PathBuf,
    json: Option<PathBuf>,
    debug_image: Option<PathBuf>,
    layout_path: Option<PathBuf>,
) -> Result<(), String> {
    tempo_core::config::log_config_usage();

    println!("Analyzing {}...", input.display());

    let decoded = tempo_core::decoders::decode_image(&input)?;
    println!(
        "  Image: {}x{}, {} channels",
        decoded.width, decoded.height, decoded.channels
    );

    let options = AnalyzeOptions {
        layout: resolve_layout(layout_path.as_deref())?,
        debug: debug_image.is_some() || json.is_some(),
    };

    let report = analyze_image(&decoded, &options)?;
    print_report(&report);

    if let Some(json_path) = json {
        let serialized = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize report: {}", e))?;
        std::fs::write(&json_path, serialized)
            .map_err(|e| format!("Failed to write report file: {}", e))?;
        println!("\nReport saved to: {}", json_path.display());
    }

    if let Some(overlay_path) = debug_image {
        let payload = report
            .debug
            .as_ref()
            .ok_or_else(|| "Debug payload missing from report".to_string())?;
        let rectified = tempo_core::pipeline::rectify(&decoded);
        overlay::render_overlay(&rectified, payload, &overlay_path)?;
        println!("Overlay saved to: {}", overlay_path.display());
    }

    Ok(())
}

fn cmd_batch(
    inputs: Vec<PathBuf>,
    out: Option<PathBuf>,
    layout_path: Option<PathBuf>,
    threads: Option<usize>,
) -> Result<(), String> {
    tempo_core::config::log_config_usage();

    if inputs.is_empty() {
        return Err("No input files specified".to_string());
    }

    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("Using {} threads for parallel processing", num_threads);
    }

    let layout = resolve_layout(layout_path.as_deref())?;
    let options = AnalyzeOptions {
        layout,
        debug: false,
    };

    let output_dir = out.unwrap_or_else(|| PathBuf::from("."));
    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create output directory: {}", e))?;
    }

    println!("\nAnalyzing {} files in parallel...\n", inputs.len());

    let processed_count = AtomicUsize::new(0);
    let total_files = inputs.len();

    let results: Vec<Result<PathBuf, String>> = inputs
        .par_iter()
        .map(|input| {
            let decoded = tempo_core::decoders::decode_image(input)?;
            let report = analyze_image(&decoded, &options)?;

            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| format!("Cannot derive output name for {}", input.display()))?;
            let output_path = output_dir.join(format!("{}.json", stem));

            let serialized = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize report: {}", e))?;
            std::fs::write(&output_path, serialized)
                .map_err(|e| format!("Failed to write report file: {}", e))?;

            let count = processed_count.fetch_add(1, Ordering::SeqCst) + 1;
            let calls: Vec<String> = report
                .groups
                .iter()
                .map(|g| g.result.to_string())
                .collect();
            println!(
                "[{}/{}] {} -> {} ({})",
                count,
                total_files,
                input.display(),
                output_path.display(),
                calls.join("/")
            );

            Ok(output_path)
        })
        .collect();

    let mut success_count = 0;
    let mut errors: Vec<(PathBuf, String)> = Vec::new();

    for (input, result) in inputs.iter().zip(results.iter()) {
        match result {
            Ok(_) => success_count += 1,
            Err(e) => errors.push((input.clone(), e.clone())),
        }
    }

    println!("\n========================================");
    println!("BATCH ANALYSIS COMPLETE");
    println!("========================================");
    println!("  Successful: {}", success_count);
    println!("  Failed:     {}", errors.len());
    println!("  Output dir: {}", output_dir.display());

    if !errors.is_empty() {
        println!("\nErrors:");
        for (path, error) in &errors {
            println!("  {}: {}", path.display(), error);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!("{} files failed to analyze", errors.len()))
    }
}

fn cmd_layout_show() -> Result<(), String> {
    tempo_core::config::log_config_usage();
    let layout = tempo_core::config::chip_config_handle().config.layout;

    println!("Active chip layout (normalized coordinates):");
    for well in WellId::ALL {
        let roi = layout.roi(well);
        println!(
            "  {}: center ({:.2}, {:.2}), radius {:.2}  [{:?}, pair {}]",
            well,
            roi.cx,
            roi.cy,
            roi.r,
            well.role(),
            well.pair_group()
        );
    }

    Ok(())
}

fn cmd_layout_init(output: PathBuf) -> Result<(), String> {
    let layout = ChipLayout::default();

    let yaml_str = serde_yaml::to_string(&layout)
        .map_err(|e| format!("Failed to serialize layout: {}", e))?;
    std::fs::write(&output, yaml_str)
        .map_err(|e| format!("Failed to write layout file: {}", e))?;

    println!("Layout template created: {}", output.display());
    println!("Edit the ROI positions, then pass the file via --layout or add it");
    println!("under a `layout:` key in tempo.yml.");

    Ok(())
}

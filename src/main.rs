use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use jmdict2json::cli;
use jmdict2json::convert::engine::scan_entities;
use jmdict2json::{ConvertConfig, ConvertSummary, Converter, NullProgress, OutputMode};

/// JMdict to JSON converter
#[derive(Parser, Debug)]
#[command(name = "jmdict2json")]
#[command(about = "Convert the JMdict dictionary markup into JSON")]
#[command(version = "0.1.0")]
struct CliArgs {
    /// Spaces per indentation level (legacy positional form)
    #[arg(value_name = "INDENT")]
    legacy_indent: Option<u8>,

    /// Spaces per indentation level (default: 0, compact output)
    #[arg(long)]
    indent: Option<u8>,

    /// Stream records to disk in batches instead of holding the whole
    /// dictionary in memory
    #[arg(long)]
    low_memory: bool,

    /// Input dictionary file
    #[arg(short, long, default_value = "JMdict_e")]
    input: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "output.json")]
    output: PathBuf,

    /// Records per flush in low-memory mode (default: 1000)
    #[arg(long)]
    batch_size: Option<usize>,

    /// Expected record count, used to scale the progress bar
    #[arg(long)]
    expect_total: Option<u64>,

    /// Write the declared entity table as JSON to this path
    #[arg(long)]
    dump_entities: Option<PathBuf>,

    /// Re-parse the rendered document to confirm it is valid JSON
    /// (in-memory mode only)
    #[arg(long)]
    validate: bool,

    /// Output conversion statistics
    #[arg(long)]
    stats: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // All argument validation happens before the output file is touched
    let config = create_convert_config(&args)?;

    if let Some(path) = &args.dump_entities {
        dump_entity_table(&args, path)?;
    }

    let converter = Converter::new(config);
    let result = if args.quiet {
        converter.run(&args.input, &args.output, &NullProgress)
    } else {
        let bar = cli::BarProgress::new(converter.config().expected_total);
        converter.run(&args.input, &args.output, &bar)
    };

    match result {
        Ok(summary) => {
            cli::show_success(
                &format!(
                    "{} entries written to {}",
                    summary.entries,
                    args.output.display()
                ),
                args.quiet,
            );
            if args.stats {
                output_statistics(&summary, converter.config(), args.quiet);
            }
            Ok(())
        }
        Err(e) => {
            cli::show_error(&e.user_message());
            std::process::exit(1);
        }
    }
}

fn create_convert_config(args: &CliArgs) -> Result<ConvertConfig> {
    let indent = args.indent.or(args.legacy_indent).unwrap_or(0);

    let mut config = ConvertConfig::new()
        .with_indent(indent)
        .with_expected_total(args.expect_total)
        .with_validation(args.validate);
    if args.low_memory {
        config = config.with_mode(OutputMode::LowMemory);
    }
    if let Some(batch_size) = args.batch_size {
        config = config.with_batch_size(batch_size);
    }

    config
        .validate()
        .map_err(|message| anyhow::anyhow!("invalid argument: {}", message))?;
    Ok(config)
}

fn dump_entity_table(args: &CliArgs, path: &PathBuf) -> Result<()> {
    let table = scan_entities(&args.input).map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let json = serde_json::to_string_pretty(&table)?;
    std::fs::write(path, json)?;
    cli::show_success(
        &format!("entity table written to {}", path.display()),
        args.quiet,
    );
    Ok(())
}

fn output_statistics(summary: &ConvertSummary, config: &ConvertConfig, quiet: bool) {
    if quiet {
        return;
    }

    println!("\nConversion statistics:");
    println!("Mode: {}", config.mode.as_str());
    println!("Entries: {}", summary.entries);
    if summary.duplicates > 0 {
        println!("Duplicate identifiers replaced: {}", summary.duplicates);
    }
    println!("Output size: {}", cli::format_size(summary.output_bytes));
    println!(
        "Processing time: {}",
        cli::format_duration(Duration::from_millis(summary.elapsed_ms))
    );
}

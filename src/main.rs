//! VoicePrep - voice recording cleanup driven by FFmpeg

use clap::Parser;
use std::process;

use voiceprep::processing::{AudioProcessor, SilenceAnalyzer};
use voiceprep::{engine, init_logging, Args, Config, Result};

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_args_and_config(args)?;

    if config.verbose {
        println!("{}", voiceprep::get_library_info());
    }

    // The engine check comes before any file access
    engine::check_available()?;

    if config.analyze {
        run_analysis(&config)
    } else {
        run_processing(&config)
    }
}

fn run_processing(config: &Config) -> Result<()> {
    if config.verbose && config.input_path.exists() {
        // Optional input context; the run does not depend on it
        match engine::probe_media(&config.input_path) {
            Ok(info) => println!("Input: {}", info.summary()),
            Err(e) => log::debug!("input probe failed: {}", e),
        }
    }

    let processor = AudioProcessor::new(config.clone());
    let result = processor.process_file()?;

    if config.verbose {
        println!("\n=== Processing Complete ===");
        println!("Time: {:.2}s", result.processing_time.as_secs_f64());
    }

    println!(
        "\nFile size: {:.2}MB → {:.2}MB ({:.1}% reduction)",
        result.input_megabytes(),
        result.output_megabytes(),
        result.reduction_percent()
    );

    Ok(())
}

fn run_analysis(config: &Config) -> Result<()> {
    println!("\nAnalyzing silence patterns in: {}", config.input_path.display());
    println!(
        "Threshold: {}, Min duration: {}s\n",
        config.silence.threshold, config.silence.min_duration
    );

    let analyzer = SilenceAnalyzer::new(config);
    match analyzer.analyze() {
        Ok(report) => {
            for line in &report.raw_lines {
                println!("{}", line);
            }
            println!("\nTotal silence periods detected: {}", report.period_count());
        }
        // Diagnostic pass only; a failed analysis is reported, not fatal
        Err(e) => eprintln!("Error analyzing silence: {}", e),
    }

    Ok(())
}

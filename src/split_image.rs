use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use door_splitter_lib::{
    check_ratio, interactive_split, run, ConsolePrompt, SplitConfig, SplitOutcome,
    DEFAULT_OUTPUT_DIR, DEFAULT_TEXT_RATIO, QUICK_TEXT_RATIO,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Split an invitation image into two door panels and two text strips
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image to split
    input_image: Option<PathBuf>,

    /// Directory to save the four crops to
    #[arg(default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Ask for the text ratio and a confirmation before splitting
    #[arg(long, conflicts_with_all = ["text_ratio", "quick"])]
    interactive: bool,

    /// Fraction of the height used by the text strips (0.1-0.5)
    #[arg(long, value_parser = parse_ratio, default_value_t = DEFAULT_TEXT_RATIO)]
    text_ratio: f64,

    /// Use the quick preset ratio of 0.25
    #[arg(long, conflicts_with = "text_ratio")]
    quick: bool,
}

struct SplitArgs {
    input_image: PathBuf,
    output_dir: PathBuf,
    text_ratio: f64,
}

impl SplitConfig for SplitArgs {
    fn input_path(&self) -> &Path {
        &self.input_image
    }

    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn text_ratio(&self) -> f64 {
        self.text_ratio
    }
}

fn parse_ratio(value: &str) -> Result<f64, String> {
    let ratio: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    check_ratio(ratio).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    // Parse command line arguments
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => return argument_error(e),
    };

    let Some(input_image) = args.input_image.clone() else {
        if let Err(e) = Args::command().print_help() {
            eprintln!("Failed to print usage: {}", e);
        }
        return ExitCode::FAILURE;
    };

    match split(&args, input_image) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Report a clap error. `--help` and `--version` succeed, anything else exits 1.
fn argument_error(e: clap::Error) -> ExitCode {
    if let Err(print_err) = e.print() {
        eprintln!("Failed to print argument error: {}", print_err);
    }
    if e.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn split(args: &Args, input_image: PathBuf) -> Result<()> {
    if args.interactive {
        let mut prompt = ConsolePrompt::stdio();
        let outcome = interactive_split(&mut prompt, &input_image, &args.output_dir)
            .with_context(|| format!("Interactive split of {} failed", input_image.display()))?;
        if let SplitOutcome::Cancelled = outcome {
            println!("No files were written");
        }
        return Ok(());
    }

    let config = SplitArgs {
        input_image,
        output_dir: args.output_dir.clone(),
        text_ratio: if args.quick { QUICK_TEXT_RATIO } else { args.text_ratio },
    };
    run(&config).with_context(|| format!("Failed to split {}", config.input_image.display()))?;

    Ok(())
}

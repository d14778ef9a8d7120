use image::GenericImageView;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::geometry_lib::compute_geometry;
use crate::splitter_lib::{load, split_loaded, SplitReport};
use crate::{check_ratio, SplitError, DEFAULT_TEXT_RATIO};

// Questions asked before an interactive split
pub trait SplitPrompt {
    /// Ask until a ratio within range is given. Blank input picks `default`.
    fn ask_ratio(&mut self, default: f64) -> io::Result<f64>;

    /// Ask whether to go ahead with the split.
    fn confirm(&mut self) -> io::Result<bool>;
}

/// Line-based prompt over any reader/writer pair, normally stdin and stdout.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsolePrompt { input, output }
    }

    fn read_answer(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }
        Ok(line.trim().to_string())
    }
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        ConsolePrompt::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> SplitPrompt for ConsolePrompt<R, W> {
    fn ask_ratio(&mut self, default: f64) -> io::Result<f64> {
        let question = format!("\nEnter text height ratio (0.1-0.5, default {}): ", default);
        loop {
            let answer = self.read_answer(&question)?;
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<f64>() {
                Ok(ratio) if check_ratio(ratio).is_ok() => return Ok(ratio),
                Ok(_) => writeln!(self.output, "Please enter a value between 0.1 and 0.5")?,
                Err(_) => writeln!(self.output, "Please enter a valid number")?,
            }
        }
    }

    fn confirm(&mut self) -> io::Result<bool> {
        let answer = self.read_answer("\nProceed with split? (y/n): ")?;
        Ok(answer.eq_ignore_ascii_case("y"))
    }
}

/// Ask for a ratio for an image of `width` x `height`, show the cut it
/// gives, then ask for confirmation. `None` means the user declined.
pub fn interactive_ratio_prompt<P: SplitPrompt>(
    prompt: &mut P,
    width: u32,
    height: u32,
) -> Result<Option<f64>, SplitError> {
    let text_ratio = prompt.ask_ratio(DEFAULT_TEXT_RATIO)?;
    let geometry = compute_geometry(width, height, text_ratio);
    println!("\nFinal split points:");
    println!("  Horizontal: {}px", geometry.mid_x);
    println!(
        "  Vertical: {}px (door), {}px (text)",
        geometry.door_height, geometry.text_height
    );

    if prompt.confirm()? {
        Ok(Some(text_ratio))
    } else {
        Ok(None)
    }
}

#[derive(Debug)]
pub enum SplitOutcome {
    Completed(SplitReport),
    Cancelled,
}

/// Show the image size, let the user pick the text ratio, and split once confirmed.
///
/// The image is decoded once; the crops come from the same pixels whose
/// size was shown before confirmation.
pub fn interactive_split<P: SplitPrompt>(
    prompt: &mut P,
    input_path: &Path,
    output_dir: &Path,
) -> Result<SplitOutcome, SplitError> {
    let image = load(input_path)?;
    let (width, height) = image.dimensions();

    println!("Original image size: {}x{}", width, height);
    println!("\nCurrent split settings:");
    println!("  Horizontal split: {}px (middle)", width / 2);

    let Some(text_ratio) = interactive_ratio_prompt(prompt, width, height)? else {
        println!("Split cancelled.");
        return Ok(SplitOutcome::Cancelled);
    };

    let geometry = compute_geometry(width, height, text_ratio);
    split_loaded(&image, &geometry, output_dir).map(SplitOutcome::Completed)
}

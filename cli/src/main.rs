//! textpress CLI - text and markdown to blog HTML

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use textpress::{CleanupPreset, ConvertResult, JsonFormat, Textpress};

#[derive(Parser)]
#[command(name = "textpress")]
#[command(version)]
#[command(about = "Convert plain text and markdown into blog HTML", long_about = None)]
struct Cli {
    /// Input text or markdown file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Cleanup level
    #[arg(long, value_enum, env = "TEXTPRESS_CLEANUP", global = true)]
    cleanup: Option<CleanupLevel>,

    /// Disable the Title Case, colon and bold heading rules
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a file to HTML
    Convert {
        /// Input text or markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write the full result (HTML, outline, statistics) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert several files in parallel
    Batch {
        /// Input files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Write JSON results instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Print the heading outline as JSON
    Outline {
        /// Input text or markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show conversion statistics
    Info {
        /// Input text or markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Heading demotion, empty containers and whitespace only
    Minimal,
    /// Every cleanup pass (default)
    Standard,
    /// No cleanup
    None,
}

impl CleanupLevel {
    fn preset(self) -> Option<CleanupPreset> {
        match self {
            CleanupLevel::Minimal => Some(CleanupPreset::Minimal),
            CleanupLevel::Standard => Some(CleanupPreset::Standard),
            CleanupLevel::None => None,
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("cleanup {:?}, strict {}", cli.cleanup, cli.strict);
    let textpress = build(cli.cleanup, cli.strict);

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            json,
        }) => cmd_convert(&textpress, &input, output.as_deref(), json),
        Some(Commands::Batch {
            inputs,
            output,
            json,
        }) => cmd_batch(&textpress, &inputs, &output, json),
        Some(Commands::Outline { input, compact }) => cmd_outline(&textpress, &input, compact),
        Some(Commands::Info { input }) => cmd_info(&textpress, &input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert to stdout if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&textpress, &input, None, false)
            } else {
                println!("{}", "Usage: textpress <FILE>".yellow());
                println!("       textpress --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build(cleanup: Option<CleanupLevel>, strict: bool) -> Textpress {
    let mut textpress = Textpress::new();
    if strict {
        textpress = textpress.strict();
    }
    match cleanup.map(CleanupLevel::preset) {
        Some(Some(preset)) => textpress.with_cleanup(preset),
        Some(None) => textpress.without_cleanup(),
        None => textpress,
    }
}

/// Serialized form of a result: pretty JSON or bare HTML.
fn render_output(result: &ConvertResult, json: bool) -> Result<String, textpress::Error> {
    if json {
        result.to_json(JsonFormat::Pretty)
    } else {
        Ok(result.html.clone())
    }
}

fn output_path(dir: &Path, input: &Path, json: bool) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let ext = if json { "json" } else { "html" };
    dir.join(format!("{}.{}", stem, ext))
}

fn cmd_convert(textpress: &Textpress, input: &Path, output: Option<&Path>, json: bool) -> CliResult {
    let result = textpress.convert_file(input)?;
    let content = render_output(&result, json)?;

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn cmd_batch(textpress: &Textpress, inputs: &[PathBuf], output: &Path, json: bool) -> CliResult {
    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let failures: Vec<(PathBuf, String)> = inputs
        .par_iter()
        .filter_map(|input| {
            let outcome = textpress
                .convert_file(input)
                .and_then(|result| render_output(&result, json))
                .and_then(|content| {
                    fs::write(output_path(output, input, json), content).map_err(Into::into)
                });
            pb.inc(1);
            outcome.err().map(|e| (input.clone(), e.to_string()))
        })
        .collect();

    pb.finish_with_message("Done!");

    let converted = inputs.len() - failures.len();
    println!(
        "\n{} {} converted into {}",
        "Done!".green().bold(),
        converted,
        output.display()
    );
    for (path, error) in &failures {
        println!("  {} {}: {}", "✗".red(), path.display(), error);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} of {} files failed", failures.len(), inputs.len()).into())
    }
}

fn cmd_outline(textpress: &Textpress, input: &Path, compact: bool) -> CliResult {
    let result = textpress.convert_file(input)?;
    let format = JsonFormat::from_compact(compact);
    println!("{}", textpress::render::to_json(&result.outline, format)?);
    Ok(())
}

fn cmd_info(textpress: &Textpress, input: &Path) -> CliResult {
    let format = textpress::detect_format_from_path(input)?;
    let result = textpress.convert_file(input)?;
    let stats = &result.stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Lines".bold(), stats.line_count);
    println!("{}: {} bytes", "HTML".bold(), result.html_len());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Ignored sections".bold(), stats.ignored_section_count);

    if !result.outline.is_empty() {
        println!();
        println!("{}", "Outline".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for heading in result.outline.iter() {
            let indent = "  ".repeat(usize::from(heading.level.saturating_sub(2)));
            println!("{}{} {}", indent, heading.text, format!("#{}", heading.id).dimmed());
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "textpress".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Text and markdown to blog HTML converter");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bare_file() {
        let cli = Cli::try_parse_from(["textpress", "post.md"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("post.md")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_cleanup_levels() {
        let cli =
            Cli::try_parse_from(["textpress", "convert", "post.md", "--cleanup", "none"]).unwrap();
        assert_eq!(cli.cleanup, Some(CleanupLevel::None));
        assert_eq!(CleanupLevel::None.preset(), None);
        assert_eq!(CleanupLevel::Minimal.preset(), Some(CleanupPreset::Minimal));
    }

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("out"), Path::new("posts/hello.md"), false);
        assert_eq!(path, PathBuf::from("out/hello.html"));
        let path = output_path(Path::new("out"), Path::new("posts/hello.md"), true);
        assert_eq!(path, PathBuf::from("out/hello.json"));
    }

    #[test]
    fn test_convert_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("post.md");
        fs::write(&input, "## Setup\nRun it.").unwrap();
        let output = dir.path().join("post.html");

        cmd_convert(&Textpress::new(), &input, Some(output.as_path()), false).unwrap();
        let html = fs::read_to_string(&output).unwrap();
        assert_eq!(html, "<h2 id=\"setup\">Setup</h2>\n<p>Run it.</p>");
    }

    #[test]
    fn test_batch_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        fs::write(&good, "Body text.").unwrap();
        let bad = dir.path().join("bad.docx");
        fs::write(&bad, b"PK\x03\x04").unwrap();
        let out = dir.path().join("out");

        let result = cmd_batch(&Textpress::new(), &[good, bad], &out, false);
        assert!(result.is_err());
        assert!(out.join("good.html").exists());
        assert!(!out.join("bad.html").exists());
    }
}

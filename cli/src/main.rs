//! unadf CLI - issue description rendering tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unadf::{
    detect_format_from_path, parse_file_with_options, CleanupPreset, CriteriaExtractor,
    ExtractOptions, Input, IssueNarrative, IssueOptions, JsonFormat, ParseOptions, RenderOptions,
    SectionBound,
};

#[derive(Parser)]
#[command(name = "unadf")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render issue descriptions to plain text and extract acceptance criteria", long_about = None)]
struct Cli {
    /// Input file (JSON document or plain text)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document to plain text
    Text {
        /// Input file (JSON document or plain text)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        /// Spaces of indentation per list level
        #[arg(long, default_value = "2", env = "UNADF_LIST_INDENT")]
        indent: usize,

        /// Print JSON with render statistics instead of text
        #[arg(long)]
        stats: bool,
    },

    /// Extract the acceptance criteria section
    #[command(alias = "ac")]
    Criteria {
        /// Input file (JSON document or plain text)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Where the section ends
        #[arg(long, value_enum, default_value = "end")]
        bound: Bound,
    },

    /// Map an issue response body to its narrative fields
    Issue {
        /// Issue JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Field id holding structured acceptance criteria
        #[arg(long, value_name = "ID", env = "UNADF_CRITERIA_FIELD")]
        criteria_field: Option<String>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Render every document in a directory to text files
    Batch {
        /// Input directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,
    },

    /// Show document information
    Info {
        /// Input file (JSON document or plain text)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Validate a document strictly
    Check {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup (default)
    Standard,
    /// Aggressive cleanup (no blank lines)
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Bound {
    /// Run to the end of the text
    End,
    /// Stop at the next markdown heading
    Heading,
}

impl From<Bound> for SectionBound {
    fn from(bound: Bound) -> Self {
        match bound {
            Bound::End => SectionBound::EndOfText,
            Bound::Heading => SectionBound::NextHeading,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Text {
            input,
            output,
            cleanup,
            indent,
            stats,
        }) => cmd_text(&input, output.as_deref(), cleanup, indent, stats),
        Some(Commands::Criteria { input, bound }) => cmd_criteria(&input, bound),
        Some(Commands::Issue {
            input,
            criteria_field,
            json,
        }) => cmd_issue(&input, criteria_field, json),
        Some(Commands::Batch {
            input,
            output,
            cleanup,
        }) => cmd_batch(&input, output.as_deref(), cleanup),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Check { input }) => cmd_check(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render if input is provided
            if let Some(input) = cli.input {
                cmd_text(&input, None, None, 2, false)
            } else {
                println!("{}", "Usage: unadf <FILE>".yellow());
                println!("       unadf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    cleanup: Option<CleanupLevel>,
    indent: usize,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, ParseOptions::new().lenient())?;

    let mut render_options = RenderOptions::new().with_list_indent(indent);
    if let Some(level) = cleanup {
        render_options = render_options.with_cleanup_preset(level.into());
    }

    let text = if stats {
        let result = unadf::render::to_text_with_stats(&doc, &render_options);
        unadf::render::to_json(&result, JsonFormat::Pretty)?
    } else {
        unadf::render::to_text(&doc, &render_options)
    };

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_criteria(input: &Path, bound: Bound) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, ParseOptions::new().lenient())?;
    let text = unadf::to_plain_text(&doc);

    let extractor = CriteriaExtractor::new(ExtractOptions::new().with_bound(bound.into()));
    match extractor.find(&text) {
        Some(found) if !found.body.is_empty() => {
            log::info!("Criteria found via {}", found.pattern);
            println!("{}", found.body);
        }
        _ => eprintln!("{}", "No acceptance criteria found".yellow()),
    }

    Ok(())
}

fn cmd_issue(
    input: &Path,
    criteria_field: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = fs::read_to_string(input)?;

    let mut options = IssueOptions::new();
    if let Some(field) = criteria_field {
        options = options.with_criteria_field(field);
    }
    let issue = unadf::issue::parse_issue_str(&body, &options)?;

    if json {
        println!("{}", unadf::render::to_json(&issue, JsonFormat::Pretty)?);
        return Ok(());
    }

    print_issue(&issue);
    Ok(())
}

fn print_issue(issue: &IssueNarrative) {
    println!("{} {}", issue.key.cyan().bold(), issue.summary.bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}", "Description".cyan().bold());
    println!("{}", issue.description);
    println!();

    println!(
        "{} {}",
        "Acceptance Criteria".cyan().bold(),
        format!("({:?})", issue.criteria_source).dimmed()
    );
    if issue.has_criteria() {
        println!("{}", issue.acceptance_criteria);
    } else {
        println!("{}", "none".dimmed());
    }
}

fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    cleanup: Option<CleanupLevel>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut files: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let name = input.file_name().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_text", name))
    });
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(files.len() as u64 * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing documents...");
    let options = ParseOptions::new().lenient();
    let mut inputs = Vec::with_capacity(files.len());
    for path in &files {
        let doc = match parse_file_with_options(path, options.clone()) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                Input::Empty
            }
        };
        inputs.push(doc);
        pb.inc(1);
    }

    let mut render_options = RenderOptions::new();
    if let Some(level) = cleanup {
        render_options = render_options.with_cleanup_preset(level.into());
    }

    pb.set_message("Rendering...");
    let texts = unadf::render::render_batch(&inputs, &render_options);
    for (path, text) in files.iter().zip(&texts) {
        let name = path.with_extension("txt");
        let name = name.file_name().unwrap_or_default();
        fs::write(output_dir.join(name), text)?;
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} documents rendered to {}",
        "Done!".green().bold(),
        texts.len(),
        output_dir.display()
    );

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let format = detect_format_from_path(input)?;
    let doc = parse_file_with_options(input, ParseOptions::new().lenient())?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);

    match doc.as_document() {
        Some(root) => {
            println!("{}: {}", "Root".bold(), root.kind());
            println!("{}: {}", "Nodes".bold(), root.node_count());
            println!("{}: {}", "Depth".bold(), root.depth());
        }
        None if doc.is_empty() => println!("{}: empty", "Root".bold()),
        None => println!("{}: legacy text", "Root".bold()),
    }

    let result = unadf::render::to_text_with_stats(&doc, &RenderOptions::default());
    let stats = &result.stats;

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    if stats.unknown_node_count > 0 {
        println!(
            "{}: {}",
            "Unknown nodes".bold(),
            stats.unknown_node_count.to_string().yellow()
        );
    }

    let criteria = CriteriaExtractor::default().find(&result.content);
    println!(
        "{}: {}",
        "Acceptance criteria".bold(),
        match criteria {
            Some(found) => format!("yes ({})", found.pattern),
            None => "no".to_string(),
        }
    );

    Ok(())
}

fn cmd_check(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    parse_file_with_options(input, ParseOptions::new().strict())?;
    println!("{} {}", "Valid".green().bold(), input.display());
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unadf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Issue description rendering tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unadf".dimmed());
    println!("License: MIT");
}

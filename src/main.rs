//! docx-restyle - reformat a DOCX to the institutional style guide

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use docx_restyle::{FormatJob, Formatter, StyleGuide};

#[derive(Parser)]
#[command(name = "docx-restyle")]
#[command(version, about = "Reformat a DOCX to the institutional style guide", long_about = None)]
#[command(after_help = "EXAMPLES:
    docx-restyle syllabus.docx                  Write formatted_syllabus.docx
    docx-restyle syllabus.docx out.docx         Write out.docx
    docx-restyle syllabus.docx --out-dir outputs")]
struct Cli {
    /// Input document (.docx)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output document [default: formatted_<INPUT>]
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Directory for the derived output name
    #[arg(long, value_name = "DIR", conflicts_with = "output")]
    out_dir: Option<PathBuf>,

    /// Header text
    #[arg(long, value_name = "TEXT")]
    header_text: Option<String>,

    /// Footer text
    #[arg(long, value_name = "TEXT")]
    footer_text: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let job = match FormatJob::new(cli.input, cli.output, cli.out_dir) {
        Ok(job) => job,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let mut guide = StyleGuide::default();
    if let Some(text) = cli.header_text {
        guide = guide.with_header_text(text);
    }
    if let Some(text) = cli.footer_text {
        guide = guide.with_footer_text(text);
    }

    match job.run(&Formatter::new(guide)) {
        Ok(()) => {
            if !cli.quiet {
                println!("{}", job.output().display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Formatting {} failed: {}", job.input().display(), e);
            eprintln!("error: {e}");
            ExitCode::from(if e.is_user_error() { 2 } else { 1 })
        }
    }
}

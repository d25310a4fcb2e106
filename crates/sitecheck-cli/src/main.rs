use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use sitecheck_cli::commands::{self, seo::SeoOptions};
use sitecheck_cli::output::ConsoleFormatter;
use sitecheck_cli::{AuditFormat, SummaryFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitecheck")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Summarize Lighthouse CI runs and audit static sites for SEO problems",
    long_about = "sitecheck turns a folder of Lighthouse CI JSON reports into a Markdown summary, \
                  and scans a generated static site for meta tag, heading, alt text and \
                  page size issues, optionally verifying that every outbound link is alive."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize Lighthouse CI JSON reports as Markdown
    Lighthouse {
        /// Directory containing Lighthouse JSON reports
        #[arg(long, default_value = ".lighthouseci", env = "SITECHECK_LIGHTHOUSE_DIR")]
        dir: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = SummaryFormat::Markdown)]
        format: SummaryFormat,
    },

    /// Audit a directory of HTML files for SEO and website health issues
    Seo {
        /// Directory to scan
        #[arg(long, default_value = "_site", env = "SITECHECK_SITE_DIR")]
        dir: PathBuf,

        /// Base URL of the website; enables broken link checking
        #[arg(long, env = "SITECHECK_BASE_URL")]
        base_url: Option<String>,

        /// Write an HTML report to this file
        #[arg(long, value_name = "FILE")]
        html_output: Option<PathBuf>,

        /// Number of concurrent link checks
        #[arg(
            long,
            default_value_t = 1,
            env = "SITECHECK_THREADS",
            allow_negative_numbers = true
        )]
        threads: i64,

        /// Output format
        #[arg(long, value_enum, default_value_t = AuditFormat::Pretty)]
        format: AuditFormat,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS: bash, zsh, fish, powershell, elvish\n\n\
                            INSTALLATION:\n  \
                            bash: sitecheck completion --shell bash >> ~/.bashrc\n  \
                            zsh:  sitecheck completion --shell zsh > ~/.zfunc/_sitecheck")]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    let fmt = ConsoleFormatter::new(cli.no_color);

    match cli.command {
        Commands::Lighthouse { dir, format } => commands::lighthouse::execute(&dir, format),
        Commands::Seo {
            dir,
            base_url,
            html_output,
            threads,
            format,
        } => commands::seo::execute(
            &SeoOptions {
                dir,
                base_url,
                html_output,
                threads,
                format,
            },
            &fmt,
        ),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new(
            "sitecheck=debug,sitecheck_cli=debug,sitecheck_core=debug,sitecheck_links=debug",
        )
    } else {
        EnvFilter::new("sitecheck=info,sitecheck_cli=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

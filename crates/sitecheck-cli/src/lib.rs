use clap::ValueEnum;

pub mod commands;
pub mod output;

/// Output of the `lighthouse` command
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SummaryFormat {
    #[default]
    Markdown,
    Json,
}

/// Output of the `seo` command
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum AuditFormat {
    #[default]
    Pretty,
    Json,
}

impl AuditFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditFormat::Pretty => "pretty",
            AuditFormat::Json => "json",
        }
    }
}

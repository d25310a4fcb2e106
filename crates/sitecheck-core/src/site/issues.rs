use serde::{Serialize, Serializer};
use std::fmt;

pub const TITLE_MIN_CHARS: usize = 10;
pub const TITLE_MAX_CHARS: usize = 60;
pub const DESCRIPTION_MIN_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 160;
pub const LARGE_PAGE_KB: f64 = 500.0;

/// A single SEO finding on one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingTitle,
    TitleTooShort(usize),
    TitleTooLong(usize),
    MissingDescription,
    DescriptionTooShort(usize),
    DescriptionTooLong(usize),
    MissingCanonical,
    MissingViewport,
    MissingH1,
    MultipleH1(usize),
    H3WithoutH2,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingTitle => write!(f, "Missing title tag"),
            Issue::TitleTooShort(n) => write!(f, "Title too short ({} chars)", n),
            Issue::TitleTooLong(n) => write!(f, "Title too long ({} chars)", n),
            Issue::MissingDescription => write!(f, "Missing meta description"),
            Issue::DescriptionTooShort(n) => {
                write!(f, "Meta description too short ({} chars)", n)
            }
            Issue::DescriptionTooLong(n) => write!(f, "Meta description too long ({} chars)", n),
            Issue::MissingCanonical => write!(f, "Missing canonical link"),
            Issue::MissingViewport => write!(f, "Missing viewport meta tag"),
            Issue::MissingH1 => write!(f, "Missing H1 tag"),
            Issue::MultipleH1(n) => write!(f, "Multiple H1 tags ({})", n),
            Issue::H3WithoutH2 => write!(f, "H3 tags used without H2 tags"),
        }
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Issues of one family (meta or heading) found on one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageIssues {
    pub path: String,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingAlt {
    pub path: String,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LargePage {
    pub path: String,
    pub size_kb: f64,
}

/// Whether a title/description length sits outside its recommended window
pub fn length_out_of_range(len: usize, min: usize, max: usize) -> bool {
    len < min || len > max
}

pub fn title_issue(title: Option<&str>) -> Option<Issue> {
    match title.map(|t| t.chars().count()) {
        None | Some(0) => Some(Issue::MissingTitle),
        Some(n) if n < TITLE_MIN_CHARS => Some(Issue::TitleTooShort(n)),
        Some(n) if n > TITLE_MAX_CHARS => Some(Issue::TitleTooLong(n)),
        Some(_) => None,
    }
}

pub fn description_issue(description: Option<&str>) -> Option<Issue> {
    match description.map(|d| d.chars().count()) {
        None | Some(0) => Some(Issue::MissingDescription),
        Some(n) if n < DESCRIPTION_MIN_CHARS => Some(Issue::DescriptionTooShort(n)),
        Some(n) if n > DESCRIPTION_MAX_CHARS => Some(Issue::DescriptionTooLong(n)),
        Some(_) => None,
    }
}

pub fn heading_issues(h1: usize, h2: usize, h3: usize) -> Vec<Issue> {
    let mut issues = Vec::new();
    if h1 == 0 {
        issues.push(Issue::MissingH1);
    } else if h1 > 1 {
        issues.push(Issue::MultipleH1(h1));
    }
    if h3 > 0 && h2 == 0 {
        issues.push(Issue::H3WithoutH2);
    }
    issues
}

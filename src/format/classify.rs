//! Paragraph classification rules

use crate::document::{LineSpacing, ParagraphAlignment};
use std::fmt;

/// Paragraphs at an index below this can be main titles
const TITLE_MAX_INDEX: usize = 3;
/// Minimum character count of a main title
const TITLE_MIN_CHARS: usize = 16;

const DEGREE_KEYWORDS: &[&str] = &["curriculum", "b.sc", "m.sc"];
const PROGRAM_KEYWORDS: &[&str] = &["programme", "applicable"];
const SEMESTER_KEYWORDS: &[&str] = &["semester"];
const SECTION_KEYWORDS: &[&str] = &[
    "eligibility",
    "objectives",
    "outcomes",
    "references",
    "text books",
    "web resources",
];
const BULLET_PREFIXES: &[&str] = &["•", "-", "1.", "2.", "3."];

/// Which rule styled a paragraph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Long line near the top of the document
    MainTitle,
    /// Curriculum or degree name
    DegreeHeading,
    /// Programme / applicability line
    ProgramInfo,
    /// Semester heading
    SemesterHeading,
    /// Eligibility, objectives, references and similar
    SectionHeading,
    /// Bulleted or numbered line
    Bullet,
    /// Line that reads like a citation
    Citation,
    /// Anything else
    Body,
}

impl RuleKind {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::MainTitle => "main title",
            RuleKind::DegreeHeading => "degree heading",
            RuleKind::ProgramInfo => "program info",
            RuleKind::SemesterHeading => "semester heading",
            RuleKind::SectionHeading => "section heading",
            RuleKind::Bullet => "bullet",
            RuleKind::Citation => "citation",
            RuleKind::Body => "body",
        }
    }
}

/// Formatting a rule applies to a paragraph and its single run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParagraphStyle {
    pub alignment: ParagraphAlignment,
    pub size_pt: f32,
    pub bold: bool,
    /// Color the run with the accent color
    pub accent: bool,
    /// `None` leaves the paragraph's line spacing alone
    pub line_spacing: Option<LineSpacing>,
}

/// What a rule predicate sees of a paragraph
#[derive(Clone, Copy, Debug)]
pub struct Candidate<'a> {
    /// Position among the body's direct paragraphs
    pub index: usize,
    /// Trimmed text
    pub text: &'a str,
    /// Lower-cased trimmed text
    pub lower: &'a str,
}

/// One entry of the ordered rule table
#[derive(Clone, Copy)]
pub struct Rule {
    pub kind: RuleKind,
    pub matches: fn(&Candidate<'_>) -> bool,
    pub style: ParagraphStyle,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

const DEGREE_STYLE: ParagraphStyle = ParagraphStyle {
    alignment: ParagraphAlignment::Center,
    size_pt: 14.0,
    bold: true,
    accent: true,
    line_spacing: Some(LineSpacing::OnePointFive),
};

const LIST_STYLE: ParagraphStyle = ParagraphStyle {
    alignment: ParagraphAlignment::Justify,
    size_pt: 12.0,
    bold: false,
    accent: false,
    line_spacing: Some(LineSpacing::Single),
};

/// The paragraph rules in evaluation order; the first match wins and the
/// last rule matches everything.
pub const RULES: &[Rule] = &[
    Rule {
        kind: RuleKind::MainTitle,
        matches: |c| c.index < TITLE_MAX_INDEX && c.text.chars().count() >= TITLE_MIN_CHARS,
        style: ParagraphStyle {
            alignment: ParagraphAlignment::Center,
            size_pt: 16.0,
            bold: true,
            accent: true,
            line_spacing: None,
        },
    },
    Rule {
        kind: RuleKind::DegreeHeading,
        matches: |c| contains_any(c.lower, DEGREE_KEYWORDS),
        style: DEGREE_STYLE,
    },
    Rule {
        kind: RuleKind::ProgramInfo,
        matches: |c| contains_any(c.lower, PROGRAM_KEYWORDS),
        style: ParagraphStyle {
            alignment: ParagraphAlignment::Center,
            size_pt: 14.0,
            bold: true,
            accent: false,
            line_spacing: None,
        },
    },
    Rule {
        kind: RuleKind::SemesterHeading,
        matches: |c| contains_any(c.lower, SEMESTER_KEYWORDS),
        style: DEGREE_STYLE,
    },
    Rule {
        kind: RuleKind::SectionHeading,
        matches: |c| contains_any(c.lower, SECTION_KEYWORDS),
        style: ParagraphStyle {
            alignment: ParagraphAlignment::Left,
            size_pt: 12.0,
            bold: true,
            accent: false,
            line_spacing: None,
        },
    },
    Rule {
        kind: RuleKind::Bullet,
        matches: |c| BULLET_PREFIXES.iter().any(|p| c.text.starts_with(p)),
        style: LIST_STYLE,
    },
    Rule {
        kind: RuleKind::Citation,
        matches: |c| c.text.contains('(') && c.text.contains(')') && c.text.contains(','),
        style: LIST_STYLE,
    },
    Rule {
        kind: RuleKind::Body,
        matches: |_| true,
        style: ParagraphStyle {
            alignment: ParagraphAlignment::Justify,
            size_pt: 12.0,
            bold: false,
            accent: false,
            line_spacing: Some(LineSpacing::OnePointFive),
        },
    },
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Pick the rule for the paragraph at `index` with the given text.
///
/// Returns `None` for blank paragraphs, which are left untouched.
pub fn classify(index: usize, text: &str) -> Option<&'static Rule> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();
    let candidate = Candidate {
        index,
        text,
        lower: &lower,
    };
    RULES.iter().find(|rule| (rule.matches)(&candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kind(index: usize, text: &str) -> Option<RuleKind> {
        classify(index, text).map(|rule| rule.kind)
    }

    #[test]
    fn test_blank_paragraphs_are_skipped() {
        assert_eq!(kind(0, ""), None);
        assert_eq!(kind(7, " \t "), None);
    }

    #[test]
    fn test_main_title_wins_over_keywords() {
        assert_eq!(
            kind(0, "introduction to the b.sc computer science curriculum"),
            Some(RuleKind::MainTitle)
        );
        let rule = classify(2, "Department Of Computer Science").unwrap();
        assert_eq!(rule.style.size_pt, 16.0);
        assert!(rule.style.bold && rule.style.accent);
        assert_eq!(rule.style.alignment, ParagraphAlignment::Center);
    }

    #[test]
    fn test_title_length_boundary() {
        assert_eq!(kind(0, "exactly fifteen"), Some(RuleKind::Body));
        assert_eq!(kind(0, "exactly sixteen!"), Some(RuleKind::MainTitle));
        assert_eq!(kind(3, "a long line that is past the top"), Some(RuleKind::Body));
    }

    #[test]
    fn test_semester_matches_degree_style() {
        let semester = classify(4, "SEMESTER III").unwrap();
        let degree = classify(4, "Curriculum").unwrap();
        assert_eq!(semester.kind, RuleKind::SemesterHeading);
        assert_eq!(semester.style, degree.style);
        assert_eq!(semester.style.line_spacing, Some(LineSpacing::OnePointFive));
    }

    #[test]
    fn test_keyword_precedence() {
        assert_eq!(kind(5, "M.Sc Programme"), Some(RuleKind::DegreeHeading));
        assert_eq!(kind(5, "Applicable semester"), Some(RuleKind::ProgramInfo));
        assert_eq!(kind(5, "Course Outcomes"), Some(RuleKind::SectionHeading));
        assert_eq!(kind(5, "Web Resources"), Some(RuleKind::SectionHeading));
    }

    #[test]
    fn test_bullets_and_citations() {
        assert_eq!(kind(5, "• submit assignment by friday"), Some(RuleKind::Bullet));
        assert_eq!(kind(5, "2. second point"), Some(RuleKind::Bullet));
        assert_eq!(kind(5, "- dash item (a, b)"), Some(RuleKind::Bullet));
        assert_eq!(
            kind(5, "Knuth, D. (1997) The art of programming"),
            Some(RuleKind::Citation)
        );
        assert_eq!(kind(5, "Knuth (1997)"), Some(RuleKind::Body));

        let bullet = classify(5, "• item").unwrap();
        let citation = classify(5, "a (b, c)").unwrap();
        assert_eq!(bullet.style, citation.style);
        assert_eq!(bullet.style.alignment, ParagraphAlignment::Justify);
        assert_eq!(bullet.style.line_spacing, Some(LineSpacing::Single));
    }

    #[test]
    fn test_default_body() {
        let rule = classify(10, "Students learn the basics of programming.").unwrap();
        assert_eq!(rule.kind, RuleKind::Body);
        assert_eq!(rule.style.size_pt, 12.0);
        assert!(!rule.style.bold);
        assert_eq!(rule.style.line_spacing, Some(LineSpacing::OnePointFive));
    }

    #[test]
    fn test_last_rule_matches_everything() {
        let last = RULES.last().unwrap();
        assert_eq!(last.kind, RuleKind::Body);
        let candidate = Candidate {
            index: 0,
            text: "x",
            lower: "x",
        };
        assert!((last.matches)(&candidate));
    }
}

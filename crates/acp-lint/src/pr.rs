//! # Pull-Request Description Check
//!
//! Validates a PR title and body against the two repository templates:
//! Minor Improvement and SEP (spec enhancement proposal).
//!
//! ## Checks
//!
//! 1. The body is non-empty. Nothing else is checked when it is empty.
//! 2. The template is detected from marker headings. A body matching
//!    neither template is one problem and nothing else is checked.
//! 3. The title is non-empty, at least [`MIN_TITLE_LENGTH`] characters, not
//!    the template placeholder, and starts with `SEP:` for SEP PRs. Only the
//!    first title problem is reported.
//! 4. Every heading of the detected template is present.
//! 5. Key sections carry a minimum amount of prose once HTML comments are
//!    stripped and whitespace collapsed.

use std::fmt;

use serde::Serialize;

/// Shortest acceptable title, in characters, after trimming.
pub const MIN_TITLE_LENGTH: usize = 10;

const PLACEHOLDER_TITLE: &str = "[Short Descriptive Title]";
const PLACEHOLDER_SEP_TITLE: &str = "SEP: [Short Descriptive Title]";

const MINOR_SECTIONS: &[&str] = &[
    "## 🔧 Type of Change",
    "## 📝 Description",
    "## 🎯 Motivation and Context",
    "## 🧪 Testing",
    "## 📸 Screenshots / Examples",
    "## ✅ Checklist",
    "## 🔍 Scope Verification",
    "## 📚 Additional Notes",
];

const SEP_SECTIONS: &[&str] = &[
    "## 📋 SEP Metadata",
    "## 🎯 Abstract",
    "## 💡 Motivation",
    "## 📐 Specification",
    "## 🤔 Rationale",
    "## 🔄 Backward Compatibility",
    "## 🛠️ Reference Implementation",
    "## 🔒 Security Implications",
    "## ✅ Pre-Submission Checklist",
    "## 📚 Additional Context",
    "## 🙋 Questions for Reviewers",
];

/// Which PR template a body follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrTemplate {
    /// Small fixes and clarifications.
    Minor,
    /// Spec enhancement proposals.
    Sep,
}

impl PrTemplate {
    /// Detect the template from its marker headings. SEP markers win only
    /// when the minor markers are absent.
    pub fn detect(body: &str) -> Option<Self> {
        let sep = body.contains(SEP_SECTIONS[0]) && body.contains(SEP_SECTIONS[1]);
        let minor = body.contains(MINOR_SECTIONS[0]) && body.contains(MINOR_SECTIONS[1]);
        match (sep, minor) {
            (true, false) => Some(Self::Sep),
            (_, true) => Some(Self::Minor),
            _ => None,
        }
    }

    /// Human-readable template name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Minor => "Minor Improvement",
            Self::Sep => "SEP",
        }
    }

    /// Headings every body of this template must contain.
    pub fn required_sections(&self) -> &'static [&'static str] {
        match self {
            Self::Minor => MINOR_SECTIONS,
            Self::Sep => SEP_SECTIONS,
        }
    }

    /// Sections that must carry prose, with their minimum length.
    pub fn content_minimums(&self) -> &'static [(&'static str, usize)] {
        match self {
            Self::Minor => &[("## 📝 Description", 30), ("## 🎯 Motivation and Context", 20)],
            Self::Sep => &[
                ("## 🎯 Abstract", 50),
                ("## 💡 Motivation", 30),
                ("## 📐 Specification", 30),
            ],
        }
    }
}

/// One problem with a PR title or description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrProblem {
    /// The body is empty or whitespace.
    EmptyBody,
    /// The body follows neither template.
    UnknownTemplate,
    /// The title is empty or whitespace.
    EmptyTitle,
    /// The title is shorter than [`MIN_TITLE_LENGTH`].
    TitleTooShort,
    /// A SEP title lacks the `SEP:` prefix.
    MissingSepPrefix,
    /// A SEP title is the template placeholder or has nothing after `SEP:`.
    SepPlaceholderTitle,
    /// A minor title is a template placeholder.
    PlaceholderTitle {
        /// The offending title.
        title: String,
    },
    /// Template headings absent from the body.
    MissingSections {
        /// Template the body was detected as.
        template: PrTemplate,
        /// Missing headings, in template order.
        sections: Vec<&'static str>,
    },
    /// A key section has too little prose.
    ThinSection {
        /// Section heading.
        heading: &'static str,
        /// Minimum content length in characters.
        min: usize,
    },
}

impl fmt::Display for PrProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBody => f.write_str("PR description (body) is empty."),
            Self::UnknownTemplate => f.write_str(
                "PR description does not match either template. It must include the required \
                 sections from the Minor Improvement or SEP Proposal template. \
                 See .github/PULL_REQUEST_TEMPLATE/",
            ),
            Self::EmptyTitle => f.write_str("PR title is empty."),
            Self::TitleTooShort => {
                write!(f, "PR title is too short (minimum {MIN_TITLE_LENGTH} characters).")
            }
            Self::MissingSepPrefix => f.write_str(
                "SEP PRs must have a title starting with \"SEP: \" (e.g. \"SEP: My new SEP proposal\").",
            ),
            Self::SepPlaceholderTitle => {
                write!(f, "SEP title must not be the placeholder \"{PLACEHOLDER_SEP_TITLE}\".")
            }
            Self::PlaceholderTitle { title } => {
                write!(f, "PR title must not be the placeholder \"{title}\".")
            }
            Self::MissingSections { template, sections } => {
                write!(
                    f,
                    "PR description is missing required {} section(s):",
                    template.label()
                )?;
                for section in sections {
                    write!(f, "\n  - {section}")?;
                }
                Ok(())
            }
            Self::ThinSection { heading, min } => write!(
                f,
                "Section \"{heading}\" should have at least ~{min} characters of content (excluding comments)."
            ),
        }
    }
}

/// Result of checking one PR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrCheck {
    /// Detected template, if any.
    pub template: Option<PrTemplate>,
    /// Every problem found, in check order.
    pub problems: Vec<PrProblem>,
}

impl PrCheck {
    /// No problems were found.
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    /// Process exit code: `1` when any problem was found.
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.is_clean())
    }
}

/// Check a PR title and body against the repository templates.
pub fn check_pull_request(title: &str, body: &str) -> PrCheck {
    if body.trim().is_empty() {
        return PrCheck {
            template: None,
            problems: vec![PrProblem::EmptyBody],
        };
    }
    let Some(template) = PrTemplate::detect(body) else {
        return PrCheck {
            template: None,
            problems: vec![PrProblem::UnknownTemplate],
        };
    };

    let mut problems = Vec::new();
    problems.extend(check_title(title, template));

    let missing: Vec<&'static str> = template
        .required_sections()
        .iter()
        .copied()
        .filter(|heading| !body.contains(heading))
        .collect();
    if !missing.is_empty() {
        problems.push(PrProblem::MissingSections {
            template,
            sections: missing,
        });
    }

    for &(heading, min) in template.content_minimums() {
        if let Some(text) = section_text(body, heading) {
            if text.chars().count() < min {
                problems.push(PrProblem::ThinSection { heading, min });
            }
        }
    }

    PrCheck {
        template: Some(template),
        problems,
    }
}

fn check_title(title: &str, template: PrTemplate) -> Option<PrProblem> {
    let title = title.trim();
    if title.is_empty() {
        return Some(PrProblem::EmptyTitle);
    }
    if title.chars().count() < MIN_TITLE_LENGTH {
        return Some(PrProblem::TitleTooShort);
    }
    match template {
        PrTemplate::Sep => {
            let Some(rest) = title.strip_prefix("SEP:") else {
                return Some(PrProblem::MissingSepPrefix);
            };
            let rest = rest.trim();
            (rest.is_empty() || rest == PLACEHOLDER_TITLE).then_some(PrProblem::SepPlaceholderTitle)
        }
        PrTemplate::Minor => (title == PLACEHOLDER_TITLE || title == PLACEHOLDER_SEP_TITLE).then(|| {
            PrProblem::PlaceholderTitle {
                title: title.to_string(),
            }
        }),
    }
}

/// Prose under `heading` up to the next `## ` heading, with HTML comments
/// removed and whitespace collapsed. `None` when the heading is absent.
fn section_text(body: &str, heading: &str) -> Option<String> {
    let start = body.find(heading)? + heading.len();
    let rest = &body[start..];
    let section = rest.find("\n## ").map_or(rest, |end| &rest[..end]);
    let stripped = strip_html_comments(section);
    Some(stripped.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Remove every closed `<!-- ... -->` comment. An unclosed opener is kept
/// as text.
fn strip_html_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("<!--") {
        let Some(close) = rest[open + 4..].find("-->") else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[open + 4 + close + 3..];
    }
    out.push_str(rest);
    out
}

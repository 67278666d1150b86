// steward-core/src/domain/governance/selection.rs

use crate::domain::error::DomainError;
use crate::domain::project::Model;
use glob::Pattern;

/// Include/exclude filter over model names and paths.
///
/// Exclusion is checked first and wins. `*` also crosses `/` in paths.
#[derive(Debug, Clone)]
pub struct ModelSelector {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl ModelSelector {
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self, DomainError> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    pub fn matches(&self, model: &Model) -> bool {
        if self.exclude.iter().any(|p| matches_model(p, model)) {
            return false;
        }
        self.include.iter().any(|p| matches_model(p, model))
    }
}

fn matches_model(pattern: &Pattern, model: &Model) -> bool {
    pattern.matches(&model.name) || pattern.matches(&model.path)
}

/// `stg_**_v2` -> `stg_*_v2`. Separators are not literal here, so a run of
/// `*` means the same as one; `glob` only accepts `**` as a whole component.
fn collapse_stars(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '*' && out.ends_with('*') {
            continue;
        }
        out.push(c);
    }
    out
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>, DomainError> {
    patterns
        .iter()
        .map(|raw| {
            Pattern::new(&collapse_stars(raw.as_ref())).map_err(|e| {
                DomainError::InvalidPattern {
                    pattern: raw.as_ref().to_string(),
                    reason: e.msg.to_string(),
                }
            })
        })
        .collect()
}

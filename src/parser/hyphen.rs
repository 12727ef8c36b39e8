use super::classify::{is_hedged, is_not_in_code};
use super::patterns::{patterns, Patterns};
use super::record::{ErrorRecord, NO_DESCRIPTION, UNKNOWN_LINE};
use crate::error::ParserError;
use tracing::debug;

/// Extract records from hyphen bullet lists.
/// Expected format:
///   - Line 10: `ErrorType`
///     - Description: ...
///     - Fix: ...
///   - Potential error (Line 12): `ErrorType`
pub fn extract(section: &str) -> Result<Vec<ErrorRecord>, ParserError> {
    let p = patterns()?;
    let fold = section
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .fold(BulletFold::default(), |fold, line| fold.step(line, p));
    Ok(fold.finish())
}

#[derive(Debug, Default)]
struct PartialRecord {
    line: String,
    error_type: String,
    description: Option<String>,
    solution: Option<String>,
    is_potential: bool,
}

impl PartialRecord {
    fn headed(line: &str, error_type: &str, is_potential: bool) -> Self {
        Self {
            line: line.to_string(),
            error_type: error_type.trim().to_string(),
            is_potential,
            ..Default::default()
        }
    }

    /// A bullet with no line reference; its text is the category
    fn bare(text: &str) -> Self {
        Self {
            line: UNKNOWN_LINE.to_string(),
            error_type: text.trim().to_string(),
            description: Some(String::new()),
            is_potential: is_hedged(text),
            ..Default::default()
        }
    }

    fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }

    fn is_complete(&self) -> bool {
        !self.error_type.is_empty() && self.has_description()
    }

    fn into_record(self) -> Option<ErrorRecord> {
        if self.line.is_empty() || self.error_type.is_empty() {
            return None;
        }

        let description = self
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());
        let solution = self.solution.unwrap_or_default();
        let not_in_code = is_not_in_code(&description) || is_not_in_code(&solution);

        Some(ErrorRecord {
            line: self.line,
            error_type: self.error_type,
            description,
            solution,
            is_potential: self.is_potential,
            not_in_code,
            index: 0,
        })
    }
}

#[derive(Debug, Default)]
enum Accumulator {
    #[default]
    Idle,
    Accumulating(PartialRecord),
}

#[derive(Debug, Default)]
struct BulletFold {
    records: Vec<ErrorRecord>,
    current: Accumulator,
}

impl BulletFold {
    fn step(mut self, line: &str, p: &Patterns) -> Self {
        if let Some(started) = headed_record(line, p) {
            debug!(
                "Found {} error: line {}, type {}",
                if started.is_potential { "potential" } else { "regular" },
                started.line,
                started.error_type
            );
            self.start(started);
            return self;
        }

        if let Some(caps) = p.bullet_description.captures(line) {
            if let Accumulator::Accumulating(record) = &mut self.current {
                record.description = Some(caps[1].trim().to_string());
            }
            return self;
        }

        if let Some(caps) = p.bullet_solution.captures(line) {
            if let Accumulator::Accumulating(record) = &mut self.current {
                record.solution = Some(caps[1].trim().to_string());
            }
            return self;
        }

        let bullet = p.bullet.captures(line).map(|caps| caps[1].trim().to_string());

        if let Some(text) = &bullet {
            let ready = match &self.current {
                Accumulator::Idle => true,
                Accumulator::Accumulating(record) => record.is_complete(),
            };
            if ready {
                self.start(PartialRecord::bare(text));
                return self;
            }
        }

        if let Accumulator::Accumulating(record) = &mut self.current {
            if !record.error_type.is_empty() && !record.has_description() {
                let text = bullet.as_deref().unwrap_or(line);
                record.description = Some(text.to_string());
            }
        }

        self
    }

    fn start(&mut self, record: PartialRecord) {
        self.flush();
        self.current = Accumulator::Accumulating(record);
    }

    /// Move the in-progress record, if it has a line and a type, to the output
    fn flush(&mut self) {
        if let Accumulator::Accumulating(record) = std::mem::take(&mut self.current) {
            if let Some(record) = record.into_record() {
                self.records.push(record);
            }
        }
    }

    fn finish(mut self) -> Vec<ErrorRecord> {
        self.flush();
        self.records
    }
}

/// A bullet that opens a record with an explicit line reference
fn headed_record(line: &str, p: &Patterns) -> Option<PartialRecord> {
    if let Some(caps) = p.bullet_line_ref.captures(line) {
        return Some(PartialRecord::headed(&caps[1], &caps[2], false));
    }
    if let Some(caps) = p.bullet_potential.captures(line) {
        return Some(PartialRecord::headed(&caps[1], &caps[2], true));
    }
    None
}

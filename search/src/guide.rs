//! Guide: a run-length encoded record of the choices along a search path.
//!
//! # Text format
//!
//! ```text
//! <preamble, ignored>
//! == Begin Trace ==
//! LENGTH = <stack size>
//! <count>:<index>
//! ...
//! == End Trace ==
//! ```
//!
//! Each `count:index` line covers `count` consecutive stack frames that chose
//! the same candidate position. Index `-1` marks a frame with no candidates.
//! The end marker is optional; end of input also ends the choice list.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use porsearch_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_GUIDE};

use crate::error::TraceParseError;

/// Marker line that opens the guide section of a trace file.
pub const BEGIN_TRACE: &str = "== Begin Trace ==";

/// Marker line that closes the guide section of a trace file.
pub const END_TRACE: &str = "== End Trace ==";

/// One run of identical choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideChoice {
    /// Number of consecutive steps making this choice. Always at least 1.
    pub count: usize,
    /// Candidate position, or `None` for the explicit terminator (`-1`).
    pub index: Option<usize>,
}

/// A parsed or recorded path description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guide {
    length: usize,
    choices: VecDeque<GuideChoice>,
}

impl Guide {
    /// Build a guide from a declared length and choice runs.
    /// Runs with a zero count carry no steps and are dropped.
    #[must_use]
    pub fn new(length: usize, choices: impl IntoIterator<Item = GuideChoice>) -> Self {
        Self {
            length,
            choices: choices.into_iter().filter(|c| c.count > 0).collect(),
        }
    }

    /// Run-length encode a per-frame sequence of choice indices.
    ///
    /// The declared length is the number of frames.
    #[must_use]
    pub fn from_choice_indices(indices: impl IntoIterator<Item = Option<usize>>) -> Self {
        let mut length = 0;
        let mut choices: VecDeque<GuideChoice> = VecDeque::new();
        for index in indices {
            length += 1;
            match choices.back_mut() {
                Some(run) if run.index == index => run.count += 1,
                _ => choices.push_back(GuideChoice { count: 1, index }),
            }
        }
        Self { length, choices }
    }

    /// Declared number of steps (stack frames) in the recorded path.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Remaining choice runs, front first.
    #[must_use]
    pub fn choices(&self) -> &VecDeque<GuideChoice> {
        &self.choices
    }

    /// Whether every recorded choice has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.choices.is_empty()
    }

    /// The per-step choice sequence, runs expanded.
    #[must_use]
    pub fn choice_indices(&self) -> Vec<Option<usize>> {
        self.choices
            .iter()
            .flat_map(|run| std::iter::repeat(run.index).take(run.count))
            .collect()
    }

    /// Consume one step from the front run.
    ///
    /// Returns `None` when the guide is exhausted, `Some(None)` for a
    /// terminator step, and `Some(Some(i))` for a choice of position `i`.
    pub(crate) fn take_choice(&mut self) -> Option<Option<usize>> {
        let front = self.choices.front_mut()?;
        front.count -= 1;
        let index = front.index;
        if front.count == 0 {
            self.choices.pop_front();
        }
        Some(index)
    }

    /// Write the `LENGTH` line and one `count:index` line per run.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `out`.
    pub fn write_body<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "LENGTH = {}", self.length)?;
        for run in &self.choices {
            match run.index {
                Some(index) => writeln!(out, "{}:{index}", run.count)?,
                None => writeln!(out, "{}:-1", run.count)?,
            }
        }
        out.flush()
    }

    /// The body text as produced by [`Guide::write_body`].
    #[must_use]
    pub fn body_string(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_body(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Domain-separated digest of the body text.
    ///
    /// Two runs that serialize the same path produce the same digest.
    #[must_use]
    pub fn content_hash(&self) -> ContentHash {
        canonical_hash(DOMAIN_GUIDE, self.body_string().as_bytes())
    }

    /// Parse a guide, skipping any preamble before [`BEGIN_TRACE`].
    ///
    /// # Errors
    ///
    /// Returns a [`TraceParseError`] naming the offending line if the begin
    /// marker or `LENGTH` line is missing, or any choice line is malformed.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, TraceParseError> {
        let mut lines = reader.lines().enumerate().map(|(i, line)| (i + 1, line));

        loop {
            let Some((_, line)) = lines.next() else {
                return Err(TraceParseError::BeginMarkerMissing);
            };
            if line?.trim() == BEGIN_TRACE {
                break;
            }
        }

        let Some((line_number, line)) = lines.next() else {
            return Err(TraceParseError::LengthLineMissing);
        };
        let length = parse_length_line(line_number, line?.trim())?;

        let mut choices = VecDeque::new();
        for (line_number, line) in lines {
            let line = line?;
            let line = line.trim();
            if line == END_TRACE {
                break;
            }
            if line.is_empty() {
                continue;
            }
            choices.push_back(parse_choice_line(line_number, line)?);
        }

        Ok(Self { length, choices })
    }

    /// Parse a guide from a trace file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`TraceParseError::Io`] if the file cannot be opened, or any
    /// error of [`Guide::parse`].
    pub fn read_file(path: &Path) -> Result<Self, TraceParseError> {
        let file = std::fs::File::open(path)?;
        Self::parse(std::io::BufReader::new(file))
    }
}

impl FromStr for Guide {
    type Err = TraceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.as_bytes())
    }
}

fn parse_length_line(line_number: usize, line: &str) -> Result<usize, TraceParseError> {
    let words: Vec<&str> = line.split(' ').collect();
    let [keyword, equals, value] = words.as_slice() else {
        return Err(TraceParseError::MalformedLength {
            line_number,
            line: line.to_string(),
        });
    };
    if *keyword != "LENGTH" || *equals != "=" {
        return Err(TraceParseError::MalformedLength {
            line_number,
            line: line.to_string(),
        });
    }
    value
        .parse::<usize>()
        .map_err(|_| TraceParseError::InvalidInteger {
            line_number,
            token: (*value).to_string(),
        })
}

fn parse_choice_line(line_number: usize, line: &str) -> Result<GuideChoice, TraceParseError> {
    let malformed = || TraceParseError::MalformedChoice {
        line_number,
        line: line.to_string(),
    };
    let parts: Vec<&str> = line.split(':').collect();
    let [count, index] = parts.as_slice() else {
        return Err(malformed());
    };
    let count: i64 = parse_integer(line_number, count)?;
    let index: i64 = parse_integer(line_number, index)?;

    let count = usize::try_from(count)
        .ok()
        .filter(|&c| c > 0)
        .ok_or_else(malformed)?;
    let index = match index {
        -1 => None,
        i => Some(usize::try_from(i).map_err(|_| malformed())?),
    };
    Ok(GuideChoice { count, index })
}

fn parse_integer(line_number: usize, token: &str) -> Result<i64, TraceParseError> {
    token
        .parse::<i64>()
        .map_err(|_| TraceParseError::InvalidInteger {
            line_number,
            token: token.to_string(),
        })
}

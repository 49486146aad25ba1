//! # Discovery Record Model
//!
//! Turns one raw line of browse-tool output into a structured record.
//!
//! The expected row layout is whitespace-delimited:
//!
//! ```text
//! timestamp  change-type  flags  interface  domain  service-type  instance-name
//! ```
//!
//! where the instance name may itself contain spaces and runs to the end of
//! the line. The first [`SessionConfig::header_lines`] lines are banner
//! output and are discarded without field inspection.
//!
//! [`SessionConfig::header_lines`]: crate::config::SessionConfig::header_lines

use std::fmt;
use std::str::FromStr;

/// Flags-column value meaning "more records follow in this batch".
///
/// The browse tool marks every row of a still-streaming batch with this
/// value; the first row carrying anything else is the implicit end of the
/// batch.
const MORE_COMING_FLAG: &str = "3";

/// Minimum whitespace-delimited fields in a well-formed data row.
const MIN_FIELDS: usize = 7;

/// Whether a service instance appeared or disappeared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeType {
    Added,
    Removed,
}

impl FromStr for ChangeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Add" => Ok(Self::Added),
            "Rmv" => Ok(Self::Removed),
            _ => Err(format!("unknown change type: {s}")),
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "Add"),
            Self::Removed => write!(f, "Rmv"),
        }
    }
}

/// One observed service instance, immutable once parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveryRecord {
    pub change_type: ChangeType,
    /// Opaque interface index as reported by the browse tool.
    pub interface_index: u32,
    pub domain: String,
    pub service_type: String,
    pub instance_name: String,
    /// Derived from the flags column; `false` marks the end of a batch.
    pub more_coming: bool,
}

/// Classification of one raw browse line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedLine {
    /// Within the header region; discarded without inspection.
    Skip,
    /// A well-formed data row.
    Record(DiscoveryRecord),
    /// A data-region line that does not fit the expected layout.
    ///
    /// Malformed lines are inconclusive: they never terminate the session
    /// and never enter the result buffer.
    Malformed,
}

/// Parses one line of raw browse output.
///
/// Pure function of `(line, index, header_lines)`; `index` is the running
/// zero-based position of the line within the stream.
pub fn parse_line(line: &str, index: usize, header_lines: usize) -> ParsedLine {
    if index < header_lines {
        return ParsedLine::Skip;
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_FIELDS {
        return ParsedLine::Malformed;
    }

    let Ok(change_type) = fields[1].parse::<ChangeType>() else {
        return ParsedLine::Malformed;
    };
    let Ok(interface_index) = fields[3].parse::<u32>() else {
        return ParsedLine::Malformed;
    };

    ParsedLine::Record(DiscoveryRecord {
        change_type,
        interface_index,
        domain: fields[4].to_string(),
        service_type: fields[5].to_string(),
        instance_name: fields[6..].join(" "),
        more_coming: fields[2] == MORE_COMING_FLAG,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

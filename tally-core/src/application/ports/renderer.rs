use crate::domain::table::ResultTable;
use crate::error::TallyError;

/// One rendered block of output: a (possibly truncated) result table
/// plus the size of the full result set it came from.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub table: &'a ResultTable,
    pub total_rows: usize,
}

impl Section<'_> {
    pub fn is_truncated(&self) -> bool {
        self.table.len() < self.total_rows
    }
}

pub trait TableRenderer {
    fn render(&self, section: &Section<'_>) -> Result<String, TallyError>;

    /// How several sections are joined into one report document.
    /// Sections are written with trailing whitespace trimmed.
    fn framing(&self) -> Framing {
        Framing::BLANK_LINE
    }
}

/// Text written before, between and after the sections of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framing {
    pub open: &'static str,
    pub separator: &'static str,
    pub close: &'static str,
}

impl Framing {
    pub const BLANK_LINE: Framing = Framing {
        open: "",
        separator: "\n\n",
        close: "\n",
    };
}

use std::fmt::{self, Write};

use itertools::iproduct;

pub const VERSION_STAMP: &str = "Version 2008.10.23";
const SECTION_START: &str =
    "'ACCESS SPECIFICATIONS =========================================================";
const SECTION_END: &str = "'END access specifications";
const NAME_HEADER: &str = "'Access specification name,default assignment";
const COLUMN_HEADER: &str = "'size,% of size,% reads,% random,delay,burst,align,reply";

/// One Iometer access specification. Transfer size is in kilobytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecificationEntry {
    pub transfer_size: u32,
    pub random_percent: u32,
    pub read_percent: u32,
}

impl SpecificationEntry {
    pub fn name(&self) -> String {
        format!(
            "Trans:{}; Rand:{}; Read:{}",
            self.transfer_size, self.random_percent, self.read_percent
        )
    }
}

impl fmt::Display for SpecificationEntry {
    /// Each line is preceded by a line feed, matching how Iometer writes the section.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{NAME_HEADER}")?;
        write!(f, "\n\t{},default assignment", self.name())?;
        write!(f, "\n{COLUMN_HEADER}")?;
        // size, % of size, % reads, % random, delay, burst, align, reply
        write!(
            f,
            "\n\t{}K,100,{},{},0,1,0,0",
            u64::from(self.transfer_size) * 1024,
            self.read_percent,
            self.random_percent
        )
    }
}

/// Cartesian product of the three sequences: transfer size outermost, read percent innermost.
pub fn entries<'a>(
    transfer_sizes: &'a [u32],
    random_percents: &'a [u32],
    read_percents: &'a [u32],
) -> impl Iterator<Item = SpecificationEntry> + 'a {
    iproduct!(transfer_sizes, random_percents, read_percents).map(
        |(&transfer_size, &random_percent, &read_percent)| SpecificationEntry {
            transfer_size,
            random_percent,
            read_percent,
        },
    )
}

/// Renders a complete specification file around `entries`.
pub fn render<I>(entries: I) -> String
where
    I: IntoIterator<Item = SpecificationEntry>,
{
    let mut out = String::new();
    out.push_str(VERSION_STAMP);
    out.push('\n');
    out.push_str(SECTION_START);
    for entry in entries {
        // Writing into a String cannot fail.
        let _ = write!(out, "{entry}");
    }
    out.push('\n');
    out.push_str(SECTION_END);
    // Iometer writes the closing stamp with a trailing space.
    let _ = write!(out, "\n{VERSION_STAMP} ");
    out
}

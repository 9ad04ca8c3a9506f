use csv::{QuoteStyle, Terminator, WriterBuilder};
use eyre::{Result, eyre};
use serde::Serialize;

fn quoting_writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn into_line(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|err| eyre!("Flush CSV row: {}", err.error()))?;
    let mut line = String::from_utf8(bytes)?;
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

/// Renders `fields` as one fully quoted CSV line, without a line terminator.
pub fn quoted_fields<I, T>(fields: I) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = quoting_writer();
    writer.write_record(fields)?;
    into_line(writer)
}

/// Same as [`quoted_fields`], for a serializable row type.
pub fn quoted_row<S: Serialize>(row: &S) -> Result<String> {
    let mut writer = quoting_writer();
    writer.serialize(row)?;
    into_line(writer)
}

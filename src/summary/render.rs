use itertools::Itertools;

use super::Snapshot;

/// Render a snapshot as a table: a header with the key count, then one
/// line per key with its shape and shallow size.
///
/// Columns are padded to their widest cell, so the same snapshot always
/// renders to the same bytes. There is no trailing newline.
pub fn render(snapshot: &Snapshot) -> String {
    let count = snapshot.key_count();
    let noun = if count == 1 { "key" } else { "keys" };
    let header = format!("Mapping summary: {count} {noun} (shallow sizes in bytes)");

    let rows: Vec<(String, &str, String)> = snapshot
        .entries
        .iter()
        .map(|e| (e.key.to_string(), e.shape.as_str(), e.size.to_string()))
        .collect();

    let key_width = column_width(rows.iter().map(|r| r.0.as_str()));
    let shape_width = column_width(rows.iter().map(|r| r.1));
    let size_width = column_width(rows.iter().map(|r| r.2.as_str()));

    let lines = rows.iter().map(|(key, shape, size)| {
        format!("  {key:<key_width$}  {shape:<shape_width$}  {size:>size_width$} B")
    });

    std::iter::once(header)
        .chain(lines)
        .join("\n")
}

/// `format!` pads by character count, so measure the same way
fn column_width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0)
}

//! Compiler for the embedded completion table.
//!
//! The table is an ordered sequence of encoded rows, each a small list of
//! strings starting with a type tag:
//!
//! | tag  | fields                                        | produces            |
//! |------|-----------------------------------------------|---------------------|
//! | `BC` | input, short description, summary HTML        | basic completion    |
//! | `SH` | input, replacement, short description         | shorthand template  |
//! | `PC` | name, summary, return type, param...          | function signature  |
//! | `IM` | group name                                    | a whole sub-table   |
//!
//! `IM` rows flatten the referenced group in place, depth first, so a table
//! composes from named sub-tables while keeping one flat origin order.
//! Rows that cannot be compiled are skipped with a warning, never fatal.

use tracing::warn;

use crate::entry::{CompletionEntry, Origin};
use crate::error::MalformedRowWarning;

pub const TAG_BASIC: &str = "BC";
pub const TAG_SHORTHAND: &str = "SH";
pub const TAG_FUNCTION: &str = "PC";
pub const TAG_IMPORT: &str = "IM";

/// One encoded row: a type tag followed by its fields.
pub type Row = &'static [&'static str];

/// A named sub-table an `IM` row can reference.
#[derive(Clone, Copy, Debug)]
pub struct TableGroup {
    pub name: &'static str,
    pub rows: &'static [Row],
}

/// The flattened result of compiling a table.
#[derive(Clone, Debug, Default)]
pub struct CompiledTable {
    pub entries: Vec<CompletionEntry>,
    pub warnings: Vec<MalformedRowWarning>,
}

/// Compile `rows`, resolving `IM` references through `groups`.
///
/// A group already on the current expansion path is skipped with a warning,
/// so import cycles cannot recurse; the same group referenced twice on
/// disjoint paths expands twice (duplicate entries are legal, the catalog
/// is one-to-many).
pub fn compile(rows: &[Row], groups: &[TableGroup]) -> CompiledTable {
    let mut compiled = CompiledTable::default();
    let mut path = Vec::new();
    expand(rows, groups, &mut path, &mut compiled);
    compiled
}

fn expand(
    rows: &[Row],
    groups: &[TableGroup],
    path: &mut Vec<&'static str>,
    out: &mut CompiledTable,
) {
    for (index, row) in rows.iter().enumerate() {
        let Some((&tag, fields)) = row.split_first() else {
            skip(out, index, "empty row");
            continue;
        };
        match tag {
            TAG_BASIC => match fields {
                [input, description, summary] => out.entries.push(CompletionEntry::basic(
                    input,
                    description,
                    summary,
                    Origin::Static,
                )),
                _ => skip(out, index, "BC row needs input, description, summary"),
            },
            TAG_SHORTHAND => match fields {
                [input, replacement, description] => out.entries.push(
                    CompletionEntry::shorthand(input, replacement, description, Origin::Static),
                ),
                _ => skip(out, index, "SH row needs input, replacement, description"),
            },
            TAG_FUNCTION => match fields {
                [name, summary, return_type, parameters @ ..] => {
                    out.entries.push(CompletionEntry::function(
                        name,
                        summary,
                        return_type,
                        parameters.iter().map(|p| p.to_string()).collect(),
                        Origin::Static,
                    ))
                }
                _ => skip(out, index, "PC row needs name, summary, return type"),
            },
            TAG_IMPORT => match fields {
                [group_name] => {
                    if path.contains(group_name) {
                        skip(
                            out,
                            index,
                            &format!("import cycle through group '{}'", group_name),
                        );
                    } else if let Some(group) = groups.iter().find(|g| g.name == *group_name) {
                        path.push(group.name);
                        expand(group.rows, groups, path, out);
                        path.pop();
                    } else {
                        skip(out, index, &format!("unknown group '{}'", group_name));
                    }
                }
                _ => skip(out, index, "IM row needs exactly one group name"),
            },
            other => skip(out, index, &format!("unknown row tag '{}'", other)),
        }
    }
}

fn skip(out: &mut CompiledTable, row: usize, reason: &str) {
    warn!(row, reason, "skipping completion table row");
    out.warnings.push(MalformedRowWarning {
        row,
        reason: reason.to_string(),
    });
}

//! The embedded static completion table.
//!
//! Rows are grouped into named sub-tables composed through `IM` rows; the
//! root table flattens to the catalog's built-in entries. The flattened
//! count is a regression baseline: changing the table must be reflected in
//! `test_flattened_table_count`.

use once_cell::sync::Lazy;
use tracing::warn;

use crate::compiler::{compile, Row, TableGroup};
use crate::entry::CompletionEntry;

const KEYWORDS: &[Row] = &[
    &["BC", "and", "logical and", "<b>and</b><hr>Short-circuit logical conjunction."],
    &["BC", "break", "exit loop", "<b>break</b><hr>Terminates the innermost loop."],
    &["BC", "do", "block", "<b>do ... end</b><hr>Opens an explicit block with its own scope."],
    &["BC", "else", "alternative branch", "<b>else</b><hr>Alternative branch of an <b>if</b> statement."],
    &["BC", "elseif", "chained condition", "<b>elseif</b><hr>Chains another condition onto an <b>if</b> statement."],
    &["BC", "end", "close block", "<b>end</b><hr>Closes a <b>function</b>, <b>if</b> or <b>do</b> block."],
    &["BC", "false", "boolean false", "<b>false</b><hr>The boolean false value."],
    &["BC", "for", "for-loop", "<b>for</b><hr>Numeric or generic iteration statement."],
    &["BC", "function", "function definition", "<b>function</b><hr>Defines a function, closed by <b>end</b>."],
    &["BC", "if", "conditional", "<b>if ... then</b><hr>Conditional statement, closed by <b>end</b>."],
    &["BC", "in", "generic for", "<b>in</b><hr>Separates loop variables from the iterator expression."],
    &["BC", "local", "local variable", "<b>local</b><hr>Declares a variable in the enclosing block's scope."],
    &["BC", "nil", "absent value", "<b>nil</b><hr>The absent value; unassigned variables hold it."],
    &["BC", "not", "logical not", "<b>not</b><hr>Logical negation; only <b>nil</b> and <b>false</b> are falsy."],
    &["BC", "or", "logical or", "<b>or</b><hr>Short-circuit logical disjunction."],
    &["BC", "repeat", "repeat-loop", "<b>repeat ... until</b><hr>Loop that tests its condition after the body."],
    &["BC", "return", "return", "<b>return</b><hr>Returns values from a function."],
    &["BC", "then", "condition body", "<b>then</b><hr>Separates an <b>if</b> condition from its body."],
    &["BC", "true", "boolean true", "<b>true</b><hr>The boolean true value."],
    &["BC", "until", "close repeat", "<b>until</b><hr>Closes a <b>repeat</b> loop with its exit condition."],
    &["BC", "while", "while-loop", "<b>while</b><hr>Loop that tests its condition before the body."],
];

const SNIPPETS: &[Row] = &[
    &["SH", "for", "for i=1,10 do\n\t\nend", "numeric for-loop skeleton"],
    &["SH", "fori", "for i,v in ipairs(t) do\n\t\nend", "array iteration skeleton"],
    &["SH", "forp", "for k,v in pairs(t) do\n\t\nend", "table iteration skeleton"],
    &["SH", "while", "while condition do\n\t\nend", "while-loop skeleton"],
    &["SH", "repeat", "repeat\n\t\nuntil condition", "repeat-until skeleton"],
    &["SH", "if", "if condition then\n\t\nend", "if-block skeleton"],
    &["SH", "ifelse", "if condition then\n\t\nelse\n\t\nend", "if-else skeleton"],
    &["SH", "fun", "function name(...)\n\t\nend", "function definition skeleton"],
];

const BASE_FUNCTIONS: &[Row] = &[
    &["PC", "assert", "Raises an error when its argument is false or nil.", "value", "v", "message"],
    &["PC", "collectgarbage", "Controls the garbage collector.", "number", "opt", "arg"],
    &["PC", "dofile", "Executes the given file as a chunk.", "value", "filename"],
    &["PC", "error", "Raises an error with the given message.", "", "message", "level"],
    &["PC", "getmetatable", "Returns the metatable of the given object.", "table", "object"],
    &["PC", "ipairs", "Iterator over the array part of a table.", "function", "t"],
    &["PC", "next", "Returns the next key/value pair of a table.", "value", "table", "index"],
    &["PC", "pairs", "Iterator over all key/value pairs of a table.", "function", "t"],
    &["PC", "pcall", "Calls a function in protected mode.", "boolean", "f", "..."],
    &["PC", "print", "Writes its arguments to standard output.", "", "..."],
    &["PC", "rawget", "Table access without invoking metamethods.", "value", "table", "index"],
    &["PC", "rawset", "Table assignment without invoking metamethods.", "table", "table", "index", "value"],
    &["PC", "require", "Loads the given module.", "value", "modname"],
    &["PC", "select", "Returns the arguments after number n.", "value", "n", "..."],
    &["PC", "setmetatable", "Sets the metatable of the given table.", "table", "table", "metatable"],
    &["PC", "tonumber", "Converts its argument to a number.", "number", "e", "base"],
    &["PC", "tostring", "Converts its argument to a string.", "string", "v"],
    &["PC", "type", "Returns the type name of its argument.", "string", "v"],
    &["PC", "unpack", "Returns the elements of an array.", "value", "list", "i", "j"],
    &["PC", "xpcall", "Protected call with a message handler.", "boolean", "f", "msgh"],
];

const STRING_FUNCTIONS: &[Row] = &[
    &["PC", "string.byte", "Numeric codes of characters in a string.", "number", "s", "i", "j"],
    &["PC", "string.char", "String built from numeric character codes.", "string", "..."],
    &["PC", "string.find", "Finds the first match of a pattern.", "number", "s", "pattern", "init", "plain"],
    &["PC", "string.format", "Formatted string in printf style.", "string", "formatstring", "..."],
    &["PC", "string.gmatch", "Iterator over all pattern matches.", "function", "s", "pattern"],
    &["PC", "string.gsub", "Replaces pattern matches in a string.", "string", "s", "pattern", "repl", "n"],
    &["PC", "string.len", "Length of a string in bytes.", "number", "s"],
    &["PC", "string.lower", "Copy with upper-case letters lowered.", "string", "s"],
    &["PC", "string.match", "First capture of a pattern match.", "string", "s", "pattern", "init"],
    &["PC", "string.rep", "String repeated n times.", "string", "s", "n"],
    &["PC", "string.reverse", "String with the byte order reversed.", "string", "s"],
    &["PC", "string.sub", "Substring between two positions.", "string", "s", "i", "j"],
    &["PC", "string.upper", "Copy with lower-case letters raised.", "string", "s"],
];

const TABLE_FUNCTIONS: &[Row] = &[
    &["PC", "table.concat", "Concatenates the elements of an array.", "string", "list", "sep", "i", "j"],
    &["PC", "table.insert", "Inserts a value into an array.", "", "list", "pos", "value"],
    &["PC", "table.remove", "Removes an element from an array.", "value", "list", "pos"],
    &["PC", "table.sort", "Sorts an array in place.", "", "list", "comp"],
];

const MATH_FUNCTIONS: &[Row] = &[
    &["PC", "math.abs", "Absolute value.", "number", "x"],
    &["PC", "math.ceil", "Smallest integer not below x.", "number", "x"],
    &["PC", "math.floor", "Largest integer not above x.", "number", "x"],
    &["PC", "math.max", "Largest of its arguments.", "number", "x", "..."],
    &["PC", "math.min", "Smallest of its arguments.", "number", "x", "..."],
    &["PC", "math.random", "Pseudo-random number.", "number", "m", "n"],
];

/// The stdlib sub-table, itself composed from per-library groups.
const STDLIB: &[Row] = &[
    &["IM", "base"],
    &["IM", "string"],
    &["IM", "table"],
    &["IM", "math"],
];

/// Every named group the root table (or any sub-table) may import.
pub const STATIC_GROUPS: &[TableGroup] = &[
    TableGroup { name: "keywords", rows: KEYWORDS },
    TableGroup { name: "snippets", rows: SNIPPETS },
    TableGroup { name: "stdlib", rows: STDLIB },
    TableGroup { name: "base", rows: BASE_FUNCTIONS },
    TableGroup { name: "string", rows: STRING_FUNCTIONS },
    TableGroup { name: "table", rows: TABLE_FUNCTIONS },
    TableGroup { name: "math", rows: MATH_FUNCTIONS },
];

/// The shipped root table.
pub const ROOT_TABLE: &[Row] = &[
    &["IM", "keywords"],
    &["IM", "snippets"],
    &["IM", "stdlib"],
];

static STATIC_ENTRIES: Lazy<Vec<CompletionEntry>> = Lazy::new(|| {
    let compiled = compile(ROOT_TABLE, STATIC_GROUPS);
    if !compiled.warnings.is_empty() {
        warn!(
            warnings = compiled.warnings.len(),
            "embedded completion table compiled with warnings"
        );
    }
    compiled.entries
});

/// The compiled built-in entries, built once on first use.
pub fn static_entries() -> &'static [CompletionEntry] {
    &STATIC_ENTRIES
}

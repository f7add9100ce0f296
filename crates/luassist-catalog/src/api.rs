//! Loader for host-supplied API description files.
//!
//! The host application enumerates its scriptable surface in a plain text
//! file: one declaration per line, `include` lines pulling in further files
//! resolved against a root directory. The grammar lives in `api.pest`; each
//! line is parsed on its own so a malformed line costs exactly one warning.
//!
//! Only the two configuration inputs can fail the load as a whole: an
//! unreadable top-level file and a root path that is not a directory. Both
//! leave the catalog untouched.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use pest::Parser;
use pest_derive::Parser;
use tracing::warn;

use crate::entry::{signature_text, CompletionEntry, Origin};
use crate::error::{ConfigurationError, MalformedEntryWarning};

#[derive(Parser)]
#[grammar = "api.pest"]
struct ApiLineParser;

/// One parsed declaration line, before it becomes a completion entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawDeclaration {
    Function {
        name: String,
        return_type: String,
        parameters: Vec<String>,
    },
    Class {
        name: String,
        description: String,
    },
    Constant {
        name: String,
        description: String,
    },
}

/// Everything a declaration source produced: the declarations in file
/// order plus the per-line warnings collected on the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiDescription {
    pub declarations: Vec<RawDeclaration>,
    pub warnings: Vec<MalformedEntryWarning>,
}

/// An external symbol source the catalog can query. The file-backed
/// [`ApiFile`] is the shipped implementation; tests and embedders may
/// substitute their own.
pub trait DeclarationSource {
    fn declarations(&self) -> Result<ApiDescription, ConfigurationError>;
}

/// A user-selected API description file, scoped to a root directory that
/// anchors its `include` references.
#[derive(Clone, Debug)]
pub struct ApiFile {
    path: PathBuf,
    root: PathBuf,
}

impl ApiFile {
    pub fn new(path: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            root: root.into(),
        }
    }
}

impl DeclarationSource for ApiFile {
    fn declarations(&self) -> Result<ApiDescription, ConfigurationError> {
        if !self.root.is_dir() {
            return Err(ConfigurationError::InvalidRoot {
                path: self.root.clone(),
            });
        }
        let mut description = ApiDescription::default();
        let mut visited = HashSet::new();
        visited.insert(normalize(&self.path));
        load_file(&self.path, &self.root, &mut visited, &mut description, None)?;
        Ok(description)
    }
}

/// The dynamic portion of the catalog as produced by one load.
#[derive(Clone, Debug)]
pub struct LoadedApi {
    pub entries: Vec<CompletionEntry>,
    pub warnings: Vec<MalformedEntryWarning>,
}

/// Run a declaration source and convert its output into `Dynamic`-origin
/// completion entries. Does not touch any catalog; the caller decides when
/// to swap the result in.
pub fn load_dynamic(source: &dyn DeclarationSource) -> Result<LoadedApi, ConfigurationError> {
    let description = source.declarations()?;
    let entries = description
        .declarations
        .into_iter()
        .map(entry_from_declaration)
        .collect();
    Ok(LoadedApi {
        entries,
        warnings: description.warnings,
    })
}

fn entry_from_declaration(declaration: RawDeclaration) -> CompletionEntry {
    match declaration {
        RawDeclaration::Function {
            name,
            return_type,
            parameters,
        } => {
            let summary = signature_text(&return_type, &name, &parameters);
            CompletionEntry::function(&name, &summary, &return_type, parameters, Origin::Dynamic)
        }
        RawDeclaration::Class { name, description } => {
            let description = if description.is_empty() {
                format!("class {}", name)
            } else {
                description
            };
            CompletionEntry::basic(&name, &description, &description, Origin::Dynamic)
        }
        RawDeclaration::Constant { name, description } => {
            let description = if description.is_empty() {
                format!("constant {}", name)
            } else {
                description
            };
            CompletionEntry::basic(&name, &description, &description, Origin::Dynamic)
        }
    }
}

fn load_file(
    path: &Path,
    root: &Path,
    visited: &mut HashSet<PathBuf>,
    out: &mut ApiDescription,
    include_site: Option<(&Path, usize)>,
) -> Result<(), ConfigurationError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(source) => match include_site {
            // the user-selected file itself is configuration
            None => {
                return Err(ConfigurationError::UnreadableFile {
                    path: path.to_path_buf(),
                    source,
                })
            }
            // a broken cross-reference degrades like a malformed line
            Some((file, line)) => {
                warn!(path = %path.display(), "skipping unreadable include");
                out.warnings.push(MalformedEntryWarning {
                    file: file.to_path_buf(),
                    line,
                    reason: format!("cannot read include {}: {}", path.display(), source),
                });
                return Ok(());
            }
        },
    };

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(None) => {}
            Ok(Some(LineItem::Declaration(declaration))) => out.declarations.push(declaration),
            Ok(Some(LineItem::Include(reference))) => {
                let target = root.join(&reference);
                if visited.insert(normalize(&target)) {
                    load_file(&target, root, visited, out, Some((path, index + 1)))?;
                } else {
                    out.warnings.push(MalformedEntryWarning {
                        file: path.to_path_buf(),
                        line: index + 1,
                        reason: format!("include cycle through {}", reference),
                    });
                }
            }
            Err(reason) => {
                warn!(file = %path.display(), line = index + 1, "skipping malformed line");
                out.warnings.push(MalformedEntryWarning {
                    file: path.to_path_buf(),
                    line: index + 1,
                    reason,
                });
            }
        }
    }
    Ok(())
}

fn normalize(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[derive(Debug)]
enum LineItem {
    Declaration(RawDeclaration),
    Include(String),
}

fn parse_line(line: &str) -> Result<Option<LineItem>, String> {
    let mut parsed = ApiLineParser::parse(Rule::line, line)
        .map_err(|_| "not a recognized declaration".to_string())?;
    let Some(line_pair) = parsed.next() else {
        return Ok(None);
    };
    for pair in line_pair.into_inner() {
        match pair.as_rule() {
            Rule::function_decl => {
                let mut return_type = String::new();
                let mut name = String::new();
                let mut parameters = Vec::new();
                for part in pair.into_inner() {
                    match part.as_rule() {
                        Rule::type_name => return_type = part.as_str().to_string(),
                        Rule::name => name = part.as_str().to_string(),
                        Rule::ident => parameters.push(part.as_str().to_string()),
                        _ => {}
                    }
                }
                return Ok(Some(LineItem::Declaration(RawDeclaration::Function {
                    name,
                    return_type,
                    parameters,
                })));
            }
            Rule::class_decl | Rule::const_decl => {
                let is_class = pair.as_rule() == Rule::class_decl;
                let mut name = String::new();
                let mut description = String::new();
                for part in pair.into_inner() {
                    match part.as_rule() {
                        Rule::name => name = part.as_str().to_string(),
                        Rule::text => description = part.as_str().trim().to_string(),
                        _ => {}
                    }
                }
                let declaration = if is_class {
                    RawDeclaration::Class { name, description }
                } else {
                    RawDeclaration::Constant { name, description }
                };
                return Ok(Some(LineItem::Declaration(declaration)));
            }
            Rule::include_decl => {
                for part in pair.into_inner() {
                    if part.as_rule() == Rule::path_ref {
                        return Ok(Some(LineItem::Include(part.as_str().to_string())));
                    }
                }
            }
            _ => {}
        }
    }
    Ok(None)
}

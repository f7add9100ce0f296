use tracing::debug;

use crate::scanner::scan;
use crate::token::{BlockTag, TokenKind};

/// A collapsible range of source lines, half-open on the end: `end_line`
/// holds the block's closing keyword, `start_line..end_line` is the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoldRegion {
    pub start_line: u32,
    pub end_line: u32,
}

/// Malformed nesting observed while folding. Recoverable: the detector
/// still returns every region it could pair up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnbalancedBlockWarning {
    /// `end`/`until` with no open block; the token is ignored.
    UnmatchedClose { line: u32 },
    /// A block still open at end of input; no region is emitted for it.
    UnclosedOpen { tag: BlockTag, line: u32 },
}

/// Regions plus any recovery events encountered on the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FoldOutcome {
    pub regions: Vec<FoldRegion>,
    pub warnings: Vec<UnbalancedBlockWarning>,
}

/// The fold regions of `source`, regions only. See [`detect_folds`] for the
/// variant that also reports unbalanced-block warnings.
pub fn fold_regions(source: &str) -> Vec<FoldRegion> {
    detect_folds(source).regions
}

/// Run the fold state machine over the token stream.
///
/// Maintains a stack of open block tags; every `BlockClose` pops one and
/// emits a region when the block spans more than one line. A close with an
/// empty stack is ignored, blocks left open at end of input are discarded.
pub fn detect_folds(source: &str) -> FoldOutcome {
    let mut stack: Vec<(BlockTag, u32)> = Vec::new();
    let mut outcome = FoldOutcome::default();

    for token in scan(source) {
        match token.kind {
            TokenKind::BlockOpen(tag) => stack.push((tag, token.line)),
            TokenKind::BlockClose => match stack.pop() {
                Some((_, open_line)) if token.line > open_line => {
                    outcome.regions.push(FoldRegion {
                        start_line: open_line,
                        end_line: token.line,
                    });
                }
                Some(_) => {} // single-line block, nothing to fold
                None => {
                    debug!(line = token.line, "ignoring unmatched block close");
                    outcome
                        .warnings
                        .push(UnbalancedBlockWarning::UnmatchedClose { line: token.line });
                }
            },
            _ => {}
        }
    }

    for (tag, line) in stack {
        debug!(tag = tag.as_str(), line, "discarding unclosed block");
        outcome
            .warnings
            .push(UnbalancedBlockWarning::UnclosedOpen { tag, line });
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_block() {
        let regions = fold_regions("function f()\n  return 1\nend\n");
        assert_eq!(
            regions,
            vec![FoldRegion {
                start_line: 0,
                end_line: 2
            }]
        );
    }

    #[test]
    fn test_nested_blocks_emit_one_region_per_level() {
        let source = "function f()\n  if x then\n    do\n      y()\n    end\n  end\nend\n";
        let regions = fold_regions(source);
        assert_eq!(regions.len(), 3);
        // inner regions close first
        assert_eq!(
            regions,
            vec![
                FoldRegion {
                    start_line: 2,
                    end_line: 4
                },
                FoldRegion {
                    start_line: 1,
                    end_line: 5
                },
                FoldRegion {
                    start_line: 0,
                    end_line: 6
                },
            ]
        );
        // proper nesting: every child closes no later than its parent
        for pair in regions.windows(2) {
            assert!(pair[0].end_line <= pair[1].end_line);
            assert!(pair[0].start_line >= pair[1].start_line);
        }
    }

    #[test]
    fn test_single_line_block_produces_no_region() {
        assert!(fold_regions("if x then y() end").is_empty());
        assert!(fold_regions("for i=1,10 do print(i) end").is_empty());
    }

    #[test]
    fn test_repeat_until() {
        let regions = fold_regions("repeat\n  x = x + 1\nuntil x > 10\n");
        assert_eq!(
            regions,
            vec![FoldRegion {
                start_line: 0,
                end_line: 2
            }]
        );
    }

    #[test]
    fn test_loop_headers_fold_from_the_do() {
        let regions = fold_regions("for i=1,10 do\n  print(i)\nend\n");
        assert_eq!(
            regions,
            vec![FoldRegion {
                start_line: 0,
                end_line: 2
            }]
        );
    }

    #[test]
    fn test_unmatched_close_is_ignored() {
        let outcome = detect_folds("end\nfunction f()\n  x()\nend\n");
        assert_eq!(outcome.regions.len(), 1);
        assert_eq!(
            outcome.warnings,
            vec![UnbalancedBlockWarning::UnmatchedClose { line: 0 }]
        );
    }

    #[test]
    fn test_unclosed_open_is_discarded() {
        let outcome = detect_folds("function f()\n  x()\n");
        assert!(outcome.regions.is_empty());
        assert_eq!(
            outcome.warnings,
            vec![UnbalancedBlockWarning::UnclosedOpen {
                tag: BlockTag::Function,
                line: 0
            }]
        );
    }

    #[test]
    fn test_keywords_in_comments_and_strings_do_not_fold() {
        let source = "-- function\nx = \"end\"\nfunction f()\n  y()\nend\n";
        let regions = fold_regions(source);
        assert_eq!(
            regions,
            vec![FoldRegion {
                start_line: 2,
                end_line: 4
            }]
        );
    }

    #[test]
    fn test_empty_source() {
        let outcome = detect_folds("");
        assert!(outcome.regions.is_empty());
        assert!(outcome.warnings.is_empty());
    }
}

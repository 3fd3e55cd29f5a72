//! Line-offset table over raw input text.
//!
//! Intermediate state shared by the tabular validator and the position
//! extractor: each `\n`-separated line with its starting char offset and
//! char length, so "line N is wrong" translates into an absolute range.

/// One line of input with its position in the full string.
///
/// `start` and `chars` are char offsets/counts; `chars` excludes the
/// newline separator. The final line has no trailing separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo<'a> {
    pub text: &'a str,
    pub start: usize,
    pub chars: usize,
}

/// Builds the line table in one left-to-right fold threading the running
/// char offset: each line advances the offset by its length plus one for
/// the separator.
pub fn line_table(input: &str) -> Vec<LineInfo<'_>> {
    let mut offset = 0usize;
    input
        .split('\n')
        .map(|text| {
            let chars = text.chars().count();
            let info = LineInfo {
                text,
                start: offset,
                chars,
            };
            offset += chars + 1;
            info
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::line_table;

    #[test]
    fn offsets_thread_through_newlines() {
        let table = line_table("ab\ncde\n\nf");
        assert_eq!(table.len(), 4);
        assert_eq!((table[0].start, table[0].chars), (0, 2));
        assert_eq!((table[1].start, table[1].chars), (3, 3));
        assert_eq!((table[2].start, table[2].chars), (7, 0));
        assert_eq!((table[3].start, table[3].chars), (8, 1));
    }

    #[test]
    fn offsets_count_chars_not_bytes() {
        let table = line_table("é\nx");
        assert_eq!((table[0].start, table[0].chars), (0, 1));
        assert_eq!(table[1].start, 2);
    }

    #[test]
    fn empty_input_is_one_empty_line() {
        let table = line_table("");
        assert_eq!(table.len(), 1);
        assert_eq!((table[0].start, table[0].chars), (0, 0));
    }
}

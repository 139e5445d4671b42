// src/process/parse.rs
use std::mem::take;

/// Split CSV text into rows of trimmed string fields.
///
/// Lines end at CR, LF or CRLF; blank (or whitespace-only) lines are dropped.
/// Quoting follows the usual rules: `"` toggles quoted mode and `""` inside
/// quotes is a literal quote. Never fails: an unterminated quote swallows the
/// rest of its line as literal content.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    text.split(|c: char| c == '\r' || c == '\n')
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut field = FieldBuf::default();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && matches!(chars.peek(), Some('"')) {
                    chars.next(); // double-quote escape
                    field.push('"', true);
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => out.push(take(&mut field).finish()),
            c => field.push(c, in_quotes),
        }
    }

    out.push(field.finish());
    out
}

/// Field text plus the byte span that was written inside quotes.
#[derive(Default)]
struct FieldBuf {
    text: String,
    quoted: Option<(usize, usize)>,
}

impl FieldBuf {
    fn push(&mut self, ch: char, quoted: bool) {
        let start = self.text.len();
        self.text.push(ch);
        if quoted {
            let end = self.text.len();
            self.quoted = Some(match self.quoted {
                Some((s, _)) => (s, end),
                None => (start, end),
            });
        }
    }

    /// Trim surrounding whitespace, but never whitespace that sat inside quotes.
    fn finish(self) -> String {
        let Some((qs, qe)) = self.quoted else {
            return self.text.trim().to_string();
        };
        let lead = self.text.len() - self.text.trim_start().len();
        let tail = self.text.trim_end().len();
        self.text[lead.min(qs)..tail.max(qe)].to_string()
    }
}

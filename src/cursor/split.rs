use super::{exhausted, Cursor};

const FIELD_SEPARATORS: [char; 4] = [' ', '\t', '\r', '\n'];

/// How a line is cut into fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tokenizer {
    /// Runs of space, tab, CR and LF.
    #[default]
    AsciiFields,
    /// Runs of any Unicode whitespace, including vertical tab and form feed.
    Whitespace,
}

impl Tokenizer {
    pub fn tokenize_into(self, line: &str, fields: &mut Vec<String>) {
        fields.clear();
        match self {
            Tokenizer::AsciiFields => fields.extend(
                line.split(FIELD_SEPARATORS)
                    .filter(|field| !field.is_empty())
                    .map(str::to_owned),
            ),
            Tokenizer::Whitespace => fields.extend(line.split_whitespace().map(str::to_owned)),
        }
    }

    pub fn tokenize(self, line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        self.tokenize_into(line, &mut fields);
        fields
    }
}

/// Splits each line of the wrapped cursor into whitespace-separated fields.
///
/// The wrapped cursor is advanced once per line, right after the line has
/// been tokenized, so it always sits one element ahead of this cursor.
#[derive(Debug)]
pub struct Split<C> {
    source: C,
    fields: Vec<String>,
    tokenizer: Tokenizer,
    end: bool,
}

pub fn split_fields<C>(source: C) -> Split<C>
where
    C: Cursor,
    C::Item: AsRef<str>,
{
    Split::new(source)
}

impl<C> Split<C>
where
    C: Cursor,
    C::Item: AsRef<str>,
{
    pub fn new(source: C) -> Self {
        Self::with_tokenizer(source, Tokenizer::default())
    }

    pub fn with_tokenizer(source: C, tokenizer: Tokenizer) -> Self {
        let mut split = Self {
            source,
            fields: Vec::new(),
            tokenizer,
            end: false,
        };
        split.advance();
        split
    }

    pub fn at_end(source: C) -> Self {
        Self {
            source,
            fields: Vec::new(),
            tokenizer: Tokenizer::default(),
            end: true,
        }
    }

    pub fn tokenizer(&self) -> Tokenizer {
        self.tokenizer
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    pub fn into_inner(self) -> C {
        self.source
    }
}

impl<C> Cursor for Split<C>
where
    C: Cursor,
    C::Item: AsRef<str>,
{
    type Item = Vec<String>;

    fn current(&self) -> &Vec<String> {
        if self.end {
            exhausted::<Self>()
        }
        &self.fields
    }

    fn advance(&mut self) {
        if self.end {
            return;
        }
        if self.source.is_at_end() {
            tracing::debug!("Split source exhausted");
            self.fields.clear();
            self.end = true;
            return;
        }
        self.tokenizer.tokenize_into(self.source.current().as_ref(), &mut self.fields);
        tracing::trace!("Split into {} fields", self.fields.len());
        self.source.advance();
    }

    fn is_at_end(&self) -> bool {
        self.end
    }
}

impl<C, O> PartialEq<O> for Split<C>
where
    C: Cursor,
    C::Item: AsRef<str>,
    O: Cursor,
{
    fn eq(&self, other: &O) -> bool {
        self.ended_with(other)
    }
}

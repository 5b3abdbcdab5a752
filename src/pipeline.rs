//! The pipelines the `gen` driver runs, writing their reports to any sink.

use std::io::{self, BufRead, Write};

use itertools::Itertools;
use rand::RngCore;

use crate::cursor::{tee, uniform01, Cursor, Lines, Split, TeeBranch, Tokenizer};

pub type LineBranch<R> = TeeBranch<Lines<R>>;

/// Tees the lines of `reader` and splits both branches.
pub fn split_branches<R: BufRead>(
    reader: R,
    tokenizer: Tokenizer,
) -> [Split<LineBranch<R>>; 2] {
    let [left, right] = tee(Lines::new(reader));
    [
        Split::with_tokenizer(left, tokenizer),
        Split::with_tokenizer(right, tokenizer),
    ]
}

/// For each line, prints the line and its fields, one branch of the tee
/// feeding the echo and the other feeding the split.
pub fn split_report<R: BufRead>(
    reader: R,
    tokenizer: Tokenizer,
    out: &mut impl Write,
) -> io::Result<()> {
    let [left, mut the_line] = tee(Lines::new(reader));
    let mut splitted = Split::with_tokenizer(left, tokenizer);

    while !splitted.is_at_end() {
        writeln!(out, "line to split: {}", the_line.current())?;
        writeln!(
            out,
            "  split result: {}",
            splitted.current().iter().map(|field| format!("{field}:")).join("")
        )?;
        the_line.advance();
        splitted.advance();
    }

    match the_line.with_source(Lines::take_error) {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub fn random_report(rng: impl RngCore, count: usize, out: &mut impl Write) -> io::Result<()> {
    for value in uniform01(rng, count).values() {
        writeln!(out, "n={value}")?;
    }
    Ok(())
}

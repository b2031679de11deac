//! Frequency ranking of free text: tokenization, stop-word filtering and
//! ordering by count.

use crate::WordInput;
use std::collections::{HashMap, HashSet};

/// Built-in English stop words, one per line. Extended, not replaced, by
/// caller-supplied stop words.
pub const DEFAULT_STOP_WORDS: &str = "\
a
about
above
after
again
against
all
also
am
an
and
any
are
aren't
as
at
be
because
been
before
being
below
between
both
but
by
can
can't
cannot
could
couldn't
did
didn't
do
does
doesn't
doing
don't
down
during
each
few
for
from
further
get
had
hadn't
has
hasn't
have
haven't
having
he
he'd
he'll
he's
her
here
here's
hers
herself
him
himself
his
how
how's
however
i
i'd
i'll
i'm
i've
if
in
into
is
isn't
it
it's
its
itself
just
let's
like
me
more
most
mustn't
my
myself
no
nor
not
of
off
on
once
only
or
other
otherwise
ought
our
ours
ourselves
out
over
own
same
shall
shan't
she
she'd
she'll
she's
should
shouldn't
since
so
some
such
than
that
that's
the
their
theirs
them
themselves
then
there
there's
these
they
they'd
they'll
they're
they've
this
those
through
to
too
under
until
up
very
was
wasn't
we
we'd
we'll
we're
we've
were
weren't
what
what's
when
when's
where
where's
which
while
who
who's
whom
why
why's
will
with
won't
would
wouldn't
you
you'd
you'll
you're
you've
your
yours
yourself
yourselves
";

fn built_in_stop_words() -> HashSet<&'static str> {
    DEFAULT_STOP_WORDS.lines().collect()
}

/// Normalizes one raw token: trims stray apostrophes, lowercases, strips a
/// trailing `'s`, and drops tokens that are shorter than two characters or
/// purely numeric. Returns `None` for dropped tokens.
fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches('\'');
    if trimmed.is_empty() {
        return None;
    }

    let mut word = trimmed.to_lowercase();
    if let Some(stripped) = word.strip_suffix("'s") {
        word = stripped.to_string();
    }

    if word.chars().count() < 2 {
        return None;
    }
    if word.chars().all(|c| c.is_numeric()) {
        return None;
    }

    Some(word)
}

/// Splits text into candidate tokens. Contiguous alphanumeric runs stay
/// whole (CJK characters are alphabetic, so CJK runs survive) and internal
/// apostrophes are kept so contractions remain single tokens.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
}

/// Counts word frequencies and returns at most `max_words` entries, the
/// most frequent first. Ties are broken alphabetically so the ranking is
/// stable across runs.
pub fn rank_words(text: &str, extra_stop_words: &[String], max_words: usize) -> Vec<WordInput> {
    let built_in = built_in_stop_words();
    let extra: HashSet<String> = extra_stop_words
        .iter()
        .map(|w| w.to_lowercase())
        .collect();

    let mut counts: HashMap<String, f32> = HashMap::new();
    for raw in tokenize(text) {
        let Some(word) = normalize(raw) else { continue };
        if built_in.contains(word.as_str()) || extra.contains(&word) {
            continue;
        }
        *counts.entry(word).or_insert(0.0) += 1.0;
    }

    let mut ranked: Vec<(String, f32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap()
            .then_with(|| a.0.cmp(&b.0))
    });

    ranked
        .into_iter()
        .take(max_words)
        .map(|(text, count)| WordInput::new(text, count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_orders_by_frequency() {
        let ranked = rank_words("tea tea tea coffee coffee water", &[], 100);
        let names: Vec<_> = ranked.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(names, vec!["tea", "coffee", "water"]);
        assert_eq!(ranked[0].weight, 3.0);
        assert_eq!(ranked[2].weight, 1.0);
    }

    #[test]
    fn ties_break_alphabetically() {
        let ranked = rank_words("pear apple mango", &[], 100);
        let names: Vec<_> = ranked.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(names, vec!["apple", "mango", "pear"]);
    }

    #[test]
    fn built_in_stop_words_are_dropped() {
        let ranked = rank_words("the quick fox and the lazy dog", &[], 100);
        assert!(ranked.iter().all(|w| w.text != "the" && w.text != "and"));
        assert!(ranked.iter().any(|w| w.text == "quick"));
    }

    #[test]
    fn caller_stop_words_extend_the_built_in_list() {
        let ranked = rank_words("rust rust python", &["Rust".to_string()], 100);
        let names: Vec<_> = ranked.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(names, vec!["python"]);
    }

    #[test]
    fn short_and_numeric_tokens_are_dropped() {
        let ranked = rank_words("a I 42 2024 ok railway", &[], 100);
        let names: Vec<_> = ranked.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(names, vec!["ok", "railway"]);
    }

    #[test]
    fn possessives_and_contractions() {
        let ranked = rank_words("Luke's saber, 'quoted' words don't", &[], 100);
        let names: Vec<_> = ranked.iter().map(|w| w.text.as_str()).collect();
        assert!(names.contains(&"luke"));
        assert!(names.contains(&"quoted"));
        // "don't" is a built-in stop word and must not surface.
        assert!(!names.contains(&"don't"));
    }

    #[test]
    fn cjk_runs_stay_whole() {
        let ranked = rank_words("北京 天安门 北京", &[], 100);
        let names: Vec<_> = ranked.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(names, vec!["北京", "天安门"]);
    }

    #[test]
    fn max_words_truncates_the_ranking() {
        let ranked = rank_words("one1x two2x three3x four4x", &[], 2);
        assert_eq!(ranked.len(), 2);
    }
}

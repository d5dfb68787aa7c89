use smallvec::SmallVec;

use crate::pattern::{TokenKind, WildcardPattern};

/// Side channel fed by the walk with the input ranges consumed by wildcard
/// tokens. Matching uses [`NoTrack`]; masking records every position.
pub(crate) trait Tracker {
    fn consume(&mut self, start: usize, end: usize);

    /// Forgets every mark at or after `from`.
    fn rewind(&mut self, from: usize);

    fn is_consumed(&self, idx: usize) -> bool;
}

pub(crate) struct NoTrack;

impl Tracker for NoTrack {
    #[inline(always)]
    fn consume(&mut self, _start: usize, _end: usize) {}

    #[inline(always)]
    fn rewind(&mut self, _from: usize) {}

    #[inline(always)]
    fn is_consumed(&self, _idx: usize) -> bool {
        false
    }
}

const NO_RUN: usize = usize::MAX;

/// Input tables built once per walk so that segment bounds, separator counts
/// and literal-run searches cost O(1) per step however often the walk
/// backtracks.
pub(crate) struct InputIndex<'a> {
    input: &'a [char],
    /// `next_separator[i]` is the first separator at or after `i`, or the input
    /// length. Empty without a separator.
    next_separator: SmallVec<[usize; 64]>,
    /// Separator positions, ascending.
    separators: SmallVec<[usize; 16]>,
    /// Built on first use per literal run, keyed by the run's first token:
    /// `runs[start][i]` is the first occurrence of the run at or after `i`.
    runs: SmallVec<[Option<Box<[usize]>>; 8]>,
}

impl<'a> InputIndex<'a> {
    pub(crate) fn new(input: &'a [char], separator: Option<char>, token_count: usize) -> Self {
        let mut next_separator = SmallVec::new();
        let mut separators = SmallVec::new();

        if let Some(sep) = separator {
            next_separator.resize(input.len() + 1, input.len());
            for idx in (0..input.len()).rev() {
                next_separator[idx] = if input[idx] == sep {
                    idx
                } else {
                    next_separator[idx + 1]
                };
            }
            separators.extend(
                input
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| **c == sep)
                    .map(|(idx, _)| idx),
            );
        }

        Self {
            input,
            next_separator,
            separators,
            runs: (0..token_count).map(|_| None).collect(),
        }
    }

    /// End of the segment containing `from`.
    #[inline]
    fn segment_end(&self, from: usize) -> usize {
        self.next_separator
            .get(from)
            .copied()
            .unwrap_or(self.input.len())
    }

    /// Index of the `count`-th separator counted back from the end, provided
    /// it is not before `from - 1`. The separator right before `from` is
    /// still eligible, which lets `**` match zero segments.
    fn nth_separator_from_end(&self, from: usize, count: usize) -> Option<usize> {
        let idx = self.separators.len().checked_sub(count)?;
        let at = self.separators[idx];
        (at >= from.saturating_sub(1)).then_some(at)
    }

    /// First occurrence of `tokens[start..end]` fully inside
    /// `input[from..limit]`.
    fn find_run(
        &mut self,
        tokens: &[char],
        start: usize,
        end: usize,
        from: usize,
        limit: usize,
    ) -> Option<usize> {
        let input = self.input;
        let run = &tokens[start..end];
        let table = self.runs[start].get_or_insert_with(|| occurrences(input, run));

        let at = table.get(from).copied().filter(|at| *at != NO_RUN)?;
        (at + run.len() <= limit).then_some(at)
    }
}

fn occurrences(input: &[char], run: &[char]) -> Box<[usize]> {
    let mut next = vec![NO_RUN; input.len() + 1];
    for idx in (0..input.len()).rev() {
        next[idx] = if input[idx..].starts_with(run) {
            idx
        } else {
            next[idx + 1]
        };
    }
    next.into_boxed_slice()
}

/// Resume point of the most recent literal-run search made by a star.
#[derive(Debug, Clone, Copy)]
struct Backtrack {
    run_start: usize,
    run_end: usize,
    region_start: usize,
    next_from: usize,
    limit: usize,
}

impl Backtrack {
    /// Moves the star to the next occurrence of its literal run and returns
    /// the `(token, input)` cursors to continue from.
    fn retry<T: Tracker>(
        &mut self,
        index: &mut InputIndex<'_>,
        tokens: &[char],
        tracker: &mut T,
    ) -> Option<(usize, usize)> {
        let at = index.find_run(tokens, self.run_start, self.run_end, self.next_from, self.limit)?;

        tracker.rewind(self.region_start);
        tracker.consume(self.region_start, at);
        self.next_from = at + 1;

        Some((self.run_end, at + self.run_end - self.run_start))
    }
}

/// Walks `pattern` over `input`, reporting wildcard consumption to `tracker`.
///
/// Two cursors advance together; `Star` and `StarStar` searches leave a single
/// backtrack point that is resumed when a later step fails. Every step is
/// constant time against the pattern lookahead and the [`InputIndex`], so a
/// walk costs O(len(pattern) * len(input)) at worst.
pub(crate) fn walk<T: Tracker>(pattern: &WildcardPattern, input: &[char], tracker: &mut T) -> bool {
    let tokens = pattern.tokens();
    let kinds = pattern.kinds();
    let ahead = pattern.ahead();
    let separator = pattern.separator();
    let mut index = InputIndex::new(input, separator, kinds.len());

    let mut tp = 0usize;
    let mut ip = 0usize;
    let mut backtrack: Option<Backtrack> = None;

    loop {
        let failed = 'step: {
            while ip < input.len() {
                let step = match kinds[tp] {
                    TokenKind::Literal => {
                        if tokens[tp] != input[ip] {
                            break 'step true;
                        }
                        tp += 1;
                        ip += 1;
                        continue;
                    }
                    TokenKind::Separator => {
                        if separator != Some(input[ip]) {
                            break 'step true;
                        }
                        if tp > 0 && kinds[tp - 1].is_star() && ip > 0 && tracker.is_consumed(ip - 1)
                        {
                            tracker.consume(ip, ip + 1);
                        }
                        tp += 1;
                        ip += 1;
                        continue;
                    }
                    TokenKind::Question => {
                        // a lone `?` yields to an identical literal right after it
                        let lone = tp == 0 || kinds[tp - 1] != TokenKind::Question;
                        if lone && kinds[tp + 1] == TokenKind::Literal && tokens[tp + 1] == input[ip] {
                            tp += 1;
                            continue;
                        }
                        if separator == Some(input[ip]) {
                            break 'step true;
                        }
                        tracker.consume(ip, ip + 1);
                        tp += 1;
                        ip += 1;
                        continue;
                    }
                    TokenKind::Plus => {
                        if separator == Some(input[ip]) {
                            break 'step true;
                        }
                        tracker.consume(ip, ip + 1);
                        tp += 1;
                        ip += 1;
                        continue;
                    }
                    TokenKind::Star => {
                        let limit = index.segment_end(ip);
                        star(pattern, &mut index, tp, ip, limit, tracker)
                    }
                    TokenKind::StarStar => match separator {
                        Some(_) => star_star(pattern, &mut index, tp, ip, tracker),
                        None => star(pattern, &mut index, tp, ip, input.len(), tracker),
                    },
                    TokenKind::EndOfPattern => break,
                };

                let Some((next_tp, next_ip, point)) = step else {
                    break 'step true;
                };
                if point.is_some() {
                    backtrack = point;
                }
                tp = next_tp;
                ip = next_ip;
            }

            ip < input.len() || !ahead[tp].nullable
        };

        if !failed {
            return true;
        }

        let Some(point) = backtrack.as_mut() else {
            return false;
        };

        match point.retry(&mut index, tokens, tracker) {
            Some((next_tp, next_ip)) => {
                tracing::trace!(token = next_tp, input = next_ip, "wildcard walk backtracked");
                tp = next_tp;
                ip = next_ip;
            }
            None => return false,
        }
    }
}

type StarStep = (usize, usize, Option<Backtrack>);

/// `Star` bounded by `limit`: either runs to the limit when no literal
/// follows, or searches for the literal run that follows it.
fn star<T: Tracker>(
    pattern: &WildcardPattern,
    index: &mut InputIndex<'_>,
    tp: usize,
    ip: usize,
    limit: usize,
    tracker: &mut T,
) -> Option<StarStep> {
    let run_start = tp + 1;
    let run_end = pattern.ahead()[run_start].run_end;

    if run_start == run_end {
        tracker.consume(ip, limit);
        return Some((tp + 1, limit, None));
    }

    search_run(pattern, index, run_start, run_end, ip, limit, tracker)
}

/// `StarStar` with a separator: searches for the next literal run anywhere in
/// the remaining input, or, when no literal follows, leaves exactly as many
/// separators as the rest of the pattern requires.
fn star_star<T: Tracker>(
    pattern: &WildcardPattern,
    index: &mut InputIndex<'_>,
    tp: usize,
    ip: usize,
    tracker: &mut T,
) -> Option<StarStep> {
    let ahead = pattern.ahead();
    let input_len = index.input.len();
    let next_tp = tp + 1;

    let run_start = ahead[next_tp].next_literal;
    if pattern.kinds()[run_start] == TokenKind::Literal {
        let run_end = ahead[run_start].run_end;
        return search_run(pattern, index, run_start, run_end, ip, input_len, tracker);
    }

    let required = ahead[next_tp].separators;
    if required == 0 {
        tracker.consume(ip, input_len);
        return Some((next_tp, input_len, None));
    }

    match index.nth_separator_from_end(ip, required) {
        Some(at) => {
            if at > ip {
                tracker.consume(ip, at);
            }
            Some((next_tp, at, None))
        }
        None => Some((next_tp, ip, None)),
    }
}

fn search_run<T: Tracker>(
    pattern: &WildcardPattern,
    index: &mut InputIndex<'_>,
    run_start: usize,
    run_end: usize,
    ip: usize,
    limit: usize,
    tracker: &mut T,
) -> Option<StarStep> {
    let at = index.find_run(pattern.tokens(), run_start, run_end, ip, limit)?;

    tracker.consume(ip, at);
    let point = Backtrack {
        run_start,
        run_end,
        region_start: ip,
        next_from: at + 1,
        limit,
    };

    Some((run_end, at + run_end - run_start, Some(point)))
}

use alloc::collections::BTreeSet;
use core::fmt::{self, Display};
use model::Question;
use rand::{seq::IteratorRandom, Rng};

/// Outcome of a single quiz step.
#[derive(Debug, PartialEq, Eq)]
pub enum Selection<'q> {
    /// A question that has not been shown yet in this session.
    Found(&'q Question),
    /// Every candidate has already been shown. The quiz is over.
    Exhausted,
}

/// The candidate pool had no questions at all, so no quiz can be played.
#[derive(Debug, PartialEq, Eq)]
pub struct EmptyPool;

impl Display for EmptyPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no questions to choose from")
    }
}

/// Picks a question from `pool` uniformly among those whose identifiers are not in
/// `shown`. Identifiers in `shown` that are absent from the pool are ignored.
pub fn select<'q, R>(pool: &'q [Question], shown: &BTreeSet<i32>, rng: &mut R) -> Result<Selection<'q>, EmptyPool>
where
    R: Rng + ?Sized,
{
    if pool.is_empty() {
        return Err(EmptyPool);
    }

    let choice = pool.iter().filter(|q| !shown.contains(&q.id)).choose(rng);
    Ok(choice.map_or(Selection::Exhausted, Selection::Found))
}

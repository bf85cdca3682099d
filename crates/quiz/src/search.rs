use model::Question;

/// Case-insensitive substring test. An empty `term` matches everything, so callers
/// that consider it meaningless must reject it beforehand.
pub fn matches(text: &str, term: &str) -> bool {
    text.to_lowercase().contains(&term.to_lowercase())
}

/// Yields every question whose prompt [`matches`] `term`. The relative order of
/// `items` is preserved.
pub fn search<'q, 't, I>(items: I, term: &'t str) -> impl Iterator<Item = &'q Question> + 't
where
    I: IntoIterator<Item = &'q Question>,
    I::IntoIter: 't,
    'q: 't,
{
    items.into_iter().filter(move |q| matches(&q.question, term))
}

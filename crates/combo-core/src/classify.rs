//! Pure query classification: printable keys, exact option matches, valid choices
//! and the inline completion hint.

/// Whether a DOM key code produces text in the input.
///
/// Digits, space, backspace, letters, numpad, `;=,-./\`` and `[\]'`.
pub fn is_printable_key_code(key_code: u16) -> bool {
    matches!(
        key_code,
        48..=57 | 32 | 8 | 65..=90 | 96..=111 | 186..=192 | 219..=222
    )
}

/// Case-insensitive equality between a query and an option's input value.
pub fn matches_option(query: &str, input_value: &str) -> bool {
    query == input_value || query.to_lowercase() == input_value.to_lowercase()
}

/// Index of the first option whose input value equals `query` ignoring case.
pub fn find_exact_match<T, F>(query: &str, options: &[T], input_value: F) -> Option<usize>
where
    F: Fn(&T) -> String,
{
    options
        .iter()
        .position(|option| matches_option(query, &input_value(option)))
}

/// Whether the current query identifies a usable option.
///
/// With autoselect the top suggestion is always highlighted, so any suggestion
/// counts. Without it the query must equal an option's input value.
pub fn is_valid_choice<T, F>(query: &str, options: &[T], input_value: F, autoselect: bool) -> bool
where
    F: Fn(&T) -> String,
{
    if autoselect {
        !options.is_empty()
    } else {
        find_exact_match(query, options, input_value).is_some()
    }
}

/// Inline completion shown behind the input: the typed query followed by the
/// rest of the selected option, when the option starts with the query.
///
/// The query keeps its own casing; the remainder comes from the option. An
/// empty query hints the whole option.
pub fn hint_value(query: &str, selected_text: &str) -> Option<String> {
    if selected_text.is_empty() {
        return None;
    }
    let query_len = query.chars().count();
    let mut option_chars = selected_text.chars();
    let prefix: String = option_chars.by_ref().take(query_len).collect();
    if prefix.chars().count() < query_len || !matches_option(query, &prefix) {
        return None;
    }
    let rest: String = option_chars.collect();
    Some(format!("{query}{rest}"))
}

/// Query length as the widget counts it (Unicode scalar values).
pub fn query_len(query: &str) -> usize {
    query.chars().count()
}

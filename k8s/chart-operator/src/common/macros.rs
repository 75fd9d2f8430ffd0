/// Converts a list of expressions (each of whom implement ToString) to a Vec<String>.
#[macro_export]
macro_rules! vec_to_strings {
    ($($x:expr),*) => (vec![$($x.to_string()),*]);
}

/// Joins a list of expressions (each of whom implement ToString) with single spaces.
/// Empty expressions are kept, so the separators stay where they'd be in plain concatenation.
#[macro_export]
macro_rules! space_joined {
    ($($x:expr),*) => ($crate::vec_to_strings![$($x),*].join(" "));
}

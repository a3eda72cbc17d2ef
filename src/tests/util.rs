/// Parses an expression which is expected to be valid.
macro_rules! parsed {
    ($t:expr) => { crate::parse($t).unwrap() };
}

/// Builds the text `convert_to_string(0)` produces, from one argument per line.
macro_rules! lines {
    ($($l:expr),* $(,)?) => { {
        let mut result = alloc::string::String::new();
        $(
            result.push_str($l);
            result.push('\n');
        )*
        result
    } };
}

/// Parses an expression and evaluates it at `x`.
macro_rules! eval {
    ($t:expr, $x:expr) => { {
        use crate::Evaluable;
        parsed!($t).evaluate($x)
    } };
}

/// Parses an expression, differentiates it, and evaluates the derivative at `x`.
macro_rules! derivative_at {
    ($t:expr, $x:expr) => { {
        use crate::Evaluable;
        parsed!($t).differentiate().evaluate($x)
    } };
}

/// Parses an expression which is expected to be invalid, and returns why.
macro_rules! parse_failure {
    ($t:expr) => { crate::parse($t).unwrap_err().reason };
}

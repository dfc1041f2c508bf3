//! Text normalisation helpers.

/// Title-case a string the way spreadsheet type columns are written: the
/// first letter of every run of letters is upper-cased, the rest lower-cased.
///
/// `"graphing"` → `"Graphing"`, `"word problems"` → `"Word Problems"`.
#[must_use]
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_is_letter = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::title_case;

    #[rstest]
    #[case("intro", "Intro")]
    #[case("GRAPHING", "Graphing")]
    #[case("word problems", "Word Problems")]
    #[case("multi-step", "Multi-Step")]
    #[case("", "")]
    fn title_cases_like_the_catalog(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(title_case(input), expected);
    }
}

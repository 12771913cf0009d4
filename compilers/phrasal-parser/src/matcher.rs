/// Start indexes of every contiguous occurrence of `sub` inside `bigger`.
///
/// The scan resumes one past each matched start rather than past the whole
/// match, so overlapping occurrences are all reported. An empty `sub` has
/// no occurrences.
pub fn find_sublist_indexes<T: PartialEq>(sub: &[T], bigger: &[T]) -> Vec<usize> {
    let Some((first, rest)) = sub.split_first() else {
        return Vec::new();
    };

    let mut result = Vec::new();
    let mut pos = 0;

    while let Some(offset) = bigger[pos..].iter().position(|item| item == first) {
        let start = pos + offset;
        pos = start + 1;
        if bigger.get(pos..pos + rest.len()) == Some(rest) {
            result.push(start);
        }
    }

    result
}

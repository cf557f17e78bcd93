//! Membership and set helpers over slices.
//!
//! Results keep the order of the first argument and do not deduplicate.

/// Whether `item` appears in `slice`.
#[inline]
#[must_use]
pub fn contains<T: PartialEq>(slice: &[T], item: &T) -> bool {
    slice.contains(item)
}

/// Items of `a` that also appear in `b`.
///
/// ```
/// use stew::slice::common;
/// assert_eq!(common(&["one", "two", "three"], &["two", "three", "four"]), vec!["two", "three"]);
/// ```
#[must_use]
pub fn common<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    a.iter().filter(|v| b.contains(v)).cloned().collect()
}

/// Items of `a` that do not appear in `minus`.
#[must_use]
pub fn minus<T: PartialEq + Clone>(a: &[T], minus: &[T]) -> Vec<T> {
    a.iter().filter(|v| !minus.contains(v)).cloned().collect()
}

/// All items of `a` followed by all items of `plus`.
#[must_use]
pub fn plus<T: Clone>(a: &[T], plus: &[T]) -> Vec<T> {
    let mut all = Vec::with_capacity(a.len() + plus.len());
    all.extend_from_slice(a);
    all.extend_from_slice(plus);
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_contains() {
        assert!(contains(&["one", "two", "ten"], &"ten"));
        assert!(!contains(&["one", "two"], &"three"));
        assert!(contains(&[1.5f64, 2.5], &2.5));
        assert!(!contains::<i32>(&[], &1));
    }

    #[test]
    fn test_contains_values() {
        let values = vec![Value::from("a"), Value::from(2), Value::Null];
        assert!(contains(&values, &Value::Int(2)));
        assert!(contains(&values, &Value::Null));
        assert!(!contains(&values, &Value::from("b")));
    }

    #[test]
    fn test_common() {
        let c = common(&["one", "two", "three"], &["two", "three", "four"]);
        assert_eq!(c, vec!["two", "three"]);
    }

    #[test]
    fn test_minus() {
        let m = minus(&["zero", "one", "two", "three"], &["two", "three", "four"]);
        assert_eq!(m, vec!["zero", "one"]);
    }

    #[test]
    fn test_plus() {
        let all = plus(&["one", "two"], &["three", "four"]);
        assert_eq!(all, vec!["one", "two", "three", "four"]);
    }
}

//! Convenience macros

/// Build an [`AttrMap`](crate::AttrMap) from `key => value` pairs.
///
/// Values go through [`AttrValue::from`](crate::AttrValue), so numbers,
/// strings and bools all work:
///
/// ```
/// use hiergraph::attrs;
///
/// let overrides = attrs! { "value" => 3, "color" => "red" };
/// assert_eq!(overrides.len(), 2);
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::AttrMap::new()
    };
    ($($key:expr => $val:expr),+ $(,)?) => {{
        let mut map = $crate::AttrMap::new();
        $(map.insert(($key).to_string(), $crate::AttrValue::from($val));)+
        map
    }};
}

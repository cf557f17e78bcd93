/// Build a [`Map`](crate::Map) from `key => value` pairs.
///
/// Keys are stored literally (not split on `.`), and values are anything that
/// converts into a [`Value`](crate::Value).
///
/// ```
/// use stew::map;
///
/// let m = map! {
///     "name" => "Mat",
///     "age" => 29,
///     "subobj" => map! { "active" => true },
/// };
/// assert_eq!(m.get_bool("subobj.active"), Ok(true));
/// ```
#[macro_export]
macro_rules! map {
    () => {
        $crate::Map::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Map::new();
        $(
            map.insert($key, $value);
        )+
        map
    }};
}

/// Build a [`Dict`](crate::Dict) from `key => value` pairs, in order.
///
/// ```
/// use ordhash::dict;
///
/// let states = dict! {
///     "Connecticut" => "CT",
///     "Delaware" => "DE",
/// };
/// assert_eq!(states.keys().0, vec![&"Connecticut", &"Delaware"]);
/// ```
#[macro_export]
macro_rules! dict {
    () => {
        $crate::Dict::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut d = $crate::Dict::new();
        $(
            d.store($key, $value);
        )+
        d
    }};
}

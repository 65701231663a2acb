/// Builds a [`Document`](crate::Document) from a literal layout.
///
/// Sections appear in the order written; `""` names the default section.
/// Values can be any [`ToValue`](crate::ToValue) expression. The resulting
/// document has no file path and is not dirty.
///
/// # Examples
///
/// ```rust
/// use datafile::ini;
///
/// let doc = ini! {
///     "" => { "Name": "Joe User" },
///     "Server" => {
///         "Port": 1200,
///         "Secure": true,
///     },
/// };
///
/// assert_eq!(doc.get_int("port", "server").unwrap(), 1200);
/// assert_eq!(doc.get_value("Secure", "Server").unwrap(), "True");
/// assert!(!doc.is_dirty());
/// ```
#[macro_export]
macro_rules! ini {
    () => {
        $crate::Document::new()
    };

    ($( $section:literal => { $( $key:literal : $value:expr ),* $(,)? } ),* $(,)?) => {{
        let mut document = $crate::Document::new();
        $(
            // Only a repeated name fails here (the default section always
            // exists); its keys then merge into the first one.
            let _ = document.create_section($section, "");
            $(
                // Cannot fail: the section exists and create_key may add keys.
                let _ = document.create_key(
                    $key,
                    &$crate::ToValue::to_value(&$value),
                    "",
                    $section,
                );
            )*
        )*
        document.set_dirty(false);
        document
    }};
}

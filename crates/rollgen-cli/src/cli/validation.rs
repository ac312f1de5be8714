/// Check the `--name` value that UMD bundles assign their exports to.
///
/// The bundle writes `window.<name> = ...`, so the value has to work as a
/// bare JavaScript identifier. Letters of any script, `_` and `$` may appear
/// anywhere and digits after the first character. Dotted paths such as
/// `acme.widgets` are refused.
///
/// ```text
/// AcmeWidgets   ok
/// $jquery       ok
/// 2fast         rejected, leading digit
/// acme-widgets  rejected, '-'
/// ```
pub fn parse_global(s: &str) -> Result<String, String> {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return Err("Global name cannot be empty".to_string());
    };

    if !is_identifier_start(first) {
        return Err(format!(
            "Global name '{s}' cannot begin with '{first}'; use a letter, '_' or '$'"
        ));
    }

    match chars.find(|&c| !is_identifier_start(c) && !c.is_numeric()) {
        Some(bad) => Err(format!(
            "Global name '{s}' contains '{bad}', which is not allowed in a JavaScript identifier"
        )),
        None => Ok(s.to_string()),
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

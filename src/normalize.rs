use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static SPACE_ENTITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&(?:thinsp|nbsp);").unwrap());
static BRACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[{}]").unwrap());

/// Clean a line of service text for display.
///
/// Strips markup tags, turns space entities into plain spaces, unescapes
/// `&lt;`, `&gt;` and then `&amp;` (one pass, so `&amp;lt;` ends up as `&lt;`),
/// drops alternate-reading braces and replaces literal `\n` markers with a space.
pub fn normalize(raw: &str) -> String {
    let text = TAG.replace_all(raw, "");
    let text = SPACE_ENTITY.replace_all(&text, " ");
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    let text = BRACES.replace_all(&text, "");
    text.replace("\\n", " ")
}

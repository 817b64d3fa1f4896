use indexmap::IndexSet;
use regex::Regex;

lazy_static! {
    static ref IFID_PATTERN: Regex =
        Regex::new(r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
            .unwrap();
}

/// First UUID-shaped substring of `text`, if any.
pub fn find_ifid(text: &str) -> Option<&str> {
    IFID_PATTERN.find(text).map(|m| m.as_str())
}

/// Collects the first IFID of each string, without duplicates, in the order seen.
pub fn find_ifids<'a, I>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let ifids: IndexSet<&str> = texts.into_iter().filter_map(find_ifid).collect();
    ifids.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const IFID: &str = "AAAAAAAA-BBBB-CCCC-DDDD-EEEEEEEEEEEE";

    #[test]
    fn finds_uuid_inside_text() {
        let text = format!("IFID: {}.", IFID);
        assert_eq!(find_ifid(&text), Some(IFID));
        assert_eq!(find_ifid("no id here"), None);
        assert_eq!(find_ifid("aaaaaaaa-bbbb-cccc-dddd-eeee"), None);
    }

    #[test]
    fn case_insensitive() {
        let lower = IFID.to_lowercase();
        assert_eq!(find_ifid(&lower), Some(lower.as_str()));
    }

    #[test]
    fn only_first_match_per_string() {
        let text = format!("{} {}", IFID, "11111111-2222-3333-4444-555555555555");
        assert_eq!(find_ifids([text.as_str()]), vec![IFID.to_string()]);
    }

    #[test]
    fn duplicates_are_dropped() {
        let text = format!("...{}...", IFID);
        let found = find_ifids([IFID, "lamp", text.as_str()]);
        assert_eq!(found, vec![IFID.to_string()]);
    }
}

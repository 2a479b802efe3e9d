//! Nearest-name suggestion for unknown component imports.
//!
//! Deliberately cheap: a small alias table first, then a case-insensitive
//! substring match in either direction over the inventory in insertion
//! order. First hit wins, so the result is stable for a given inventory.

use crate::config::SuggestionAlias;
use crate::inventory::ComponentInventory;

pub fn suggest<'a>(
    target: &str,
    inventory: &'a ComponentInventory,
    aliases: &[SuggestionAlias],
) -> Option<&'a str> {
    let alias_hit = aliases
        .iter()
        .filter(|a| a.from.eq_ignore_ascii_case(target))
        .find_map(|a| inventory.get(&a.to).map(|c| c.name.as_str()));
    if alias_hit.is_some() {
        return alias_hit;
    }

    let needle = target.to_lowercase();
    if needle.is_empty() {
        return None;
    }
    inventory.names().find(|candidate| {
        let hay = candidate.to_lowercase();
        !hay.is_empty() && (hay.contains(&needle) || needle.contains(&hay))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_suggestion_aliases;

    fn inv(names: &[&str]) -> ComponentInventory {
        ComponentInventory::from_names("@mantine/core", names.iter().copied())
    }

    #[test]
    fn alias_wins_when_target_exists() {
        let aliases = default_suggestion_aliases();
        assert_eq!(suggest("Heading", &inv(&["Button", "Title"]), &aliases), Some("Title"));
        // Alias target missing: falls through to substring matching.
        assert_eq!(suggest("Heading", &inv(&["Button"]), &aliases), None);
    }

    #[test]
    fn substring_in_both_directions() {
        let inventory = inv(&["Button", "ActionIcon", "TextInput"]);
        assert_eq!(suggest("PrimaryButton", &inventory, &[]), Some("Button"));
        assert_eq!(suggest("icon", &inventory, &[]), Some("ActionIcon"));
        assert_eq!(suggest("button", &inventory, &[]), Some("Button"));
        assert_eq!(suggest("Slider", &inventory, &[]), None);
    }

    #[test]
    fn first_match_in_insertion_order() {
        assert_eq!(suggest("Text", &inv(&["TextInput", "Textarea"]), &[]), Some("TextInput"));
        assert_eq!(suggest("Text", &inv(&["Textarea", "TextInput"]), &[]), Some("Textarea"));
    }
}

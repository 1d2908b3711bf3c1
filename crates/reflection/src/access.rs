use serde::Deserialize;
use serde::Serialize;

/// Visibility derived deterministically from a member's name (`spec.md` §3:
/// "Access classification is deterministic from the member name"): a
/// leading `__` is private, a leading (single) `_` is protected, else
/// public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessModifier {
    Public,
    Protected,
    Private,
}

impl AccessModifier {
    pub fn for_member_name(name: &str) -> Self {
        if name.starts_with("__") {
            AccessModifier::Private
        } else if name.starts_with('_') {
            AccessModifier::Protected
        } else {
            AccessModifier::Public
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_leading_underscores() {
        assert_eq!(AccessModifier::for_member_name("fireEvent"), AccessModifier::Public);
        assert_eq!(AccessModifier::for_member_name("_applyEnabled"), AccessModifier::Protected);
        assert_eq!(AccessModifier::for_member_name("__resolveClass"), AccessModifier::Private);
    }
}

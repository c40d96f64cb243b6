// ── Role canonicalization ──
//
// The backend has emitted the same logical role under several spellings
// over the years (localized names, shouting case, English aliases).
// Canonicalization happens here and ONLY here: a locale-tolerant case
// fold followed by a static alias table. Call sites compare `Role`
// values, never raw strings.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Canonical client-side roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Role {
    Administrator,
    Manager,
    Staff,
    Customer,
}

/// Known spellings per canonical role, pre-folded with [`fold_role_name`].
static ROLE_ALIASES: &[(&str, Role)] = &[
    ("administrator", Role::Administrator),
    ("admin", Role::Administrator),
    ("yonetici", Role::Administrator),
    ("yönetici", Role::Administrator),
    ("manager", Role::Manager),
    ("mudur", Role::Manager),
    ("müdür", Role::Manager),
    ("staff", Role::Staff),
    ("personel", Role::Staff),
    ("customer", Role::Customer),
    ("musteri", Role::Customer),
    ("müşteri", Role::Customer),
];

impl Role {
    /// Resolve a raw role name from the backend to a canonical role.
    ///
    /// Returns `None` for names outside the alias table -- an unknown
    /// role must never be silently admitted anywhere.
    pub fn from_name(raw: &str) -> Option<Self> {
        let folded = fold_role_name(raw);
        ROLE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == folded)
            .map(|(_, role)| *role)
    }
}

/// Case fold tolerant of Turkish dotted/dotless I.
///
/// `str::to_lowercase` maps `İ` to `i` + combining dot and leaves `ı`
/// distinct from `i`, so "YONETİCİ" and "Yonetici" would fold to
/// different strings. All four I variants collapse to plain `i` here;
/// everything else takes the standard lowercase mapping.
fn fold_role_name(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        match c {
            'I' | 'i' | 'İ' | 'ı' => folded.push('i'),
            _ => folded.extend(c.to_lowercase()),
        }
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_resolve() {
        assert_eq!(Role::from_name("Administrator"), Some(Role::Administrator));
        assert_eq!(Role::from_name("Manager"), Some(Role::Manager));
        assert_eq!(Role::from_name("Staff"), Some(Role::Staff));
        assert_eq!(Role::from_name("Customer"), Some(Role::Customer));
    }

    #[test]
    fn localized_aliases_resolve() {
        assert_eq!(Role::from_name("Mudur"), Some(Role::Manager));
        assert_eq!(Role::from_name("MUDUR"), Some(Role::Manager));
        assert_eq!(Role::from_name("Yonetici"), Some(Role::Administrator));
        assert_eq!(Role::from_name("Personel"), Some(Role::Staff));
        assert_eq!(Role::from_name("Musteri"), Some(Role::Customer));
    }

    #[test]
    fn turkish_dotted_capitals_fold() {
        // The shouting-case localized spelling uses dotted capital I.
        assert_eq!(Role::from_name("YONETİCİ"), Some(Role::Administrator));
        assert_eq!(Role::from_name("MÜDÜR"), Some(Role::Manager));
        assert_eq!(Role::from_name("MÜŞTERİ"), Some(Role::Customer));
    }

    #[test]
    fn unknown_roles_do_not_resolve() {
        assert_eq!(Role::from_name("Intern"), None);
        assert_eq!(Role::from_name(""), None);
    }

    #[test]
    fn whitespace_is_tolerated() {
        assert_eq!(Role::from_name("  manager "), Some(Role::Manager));
    }
}

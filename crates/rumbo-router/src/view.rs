//! View keys, descriptors, and fragment resolution
//!
//! A view is a named, independently loadable unit of page content plus its
//! associated stylesheets. The set of views is fixed at compile time and the
//! route table is never mutated at runtime; the active view is derived from
//! the URL fragment on every navigation event rather than stored.

use tracing::debug;

/// The fixed set of views the shell can display
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewKey {
    /// Landing view; also the fallback for unmatched fragments
    #[default]
    Menu,
    /// Services view
    Servicio,
    /// About view
    Nosotros,
}

impl ViewKey {
    /// Get all view keys
    pub fn all() -> &'static [ViewKey] {
        &[ViewKey::Menu, ViewKey::Servicio, ViewKey::Nosotros]
    }

    /// Get the string ID for this view (used as the `data-route` attribute)
    pub fn id(&self) -> &'static str {
        match self {
            ViewKey::Menu => "menu",
            ViewKey::Servicio => "servicio",
            ViewKey::Nosotros => "nosotros",
        }
    }

    /// Parse from string ID (e.g., "menu", "servicio")
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "menu" => Some(ViewKey::Menu),
            "servicio" => Some(ViewKey::Servicio),
            "nosotros" => Some(ViewKey::Nosotros),
            _ => None,
        }
    }

    /// Resolve a URL fragment to a view key.
    ///
    /// Matching is case-insensitive and by fixed prefix rules; the first
    /// matching prefix wins and anything unmatched (including the empty
    /// fragment) falls back to [`ViewKey::Menu`]. Resolution is total: every
    /// string maps to exactly one key.
    pub fn resolve(hash: &str) -> Self {
        let h = hash.to_lowercase();
        let key = if h.starts_with("#/servicio") {
            ViewKey::Servicio
        } else if h.starts_with("#/nosotros") {
            ViewKey::Nosotros
        } else {
            ViewKey::Menu
        };
        debug!(hash, key = key.id(), "resolved fragment");
        key
    }
}

/// A view's fetch target and stylesheet list. Static and immutable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewDescriptor {
    /// Key this descriptor belongs to
    pub key: ViewKey,
    /// Relative URL of the HTML fragment
    pub url: &'static str,
    /// Stylesheets to install when this view is active, in order
    pub css: &'static [&'static str],
}

/// Mapping from view key to descriptor; fixed, loaded once, never mutated
#[derive(Clone, Copy, Debug)]
pub struct RouteTable {
    views: &'static [ViewDescriptor],
}

/// The standard table shipped with the shell
const STANDARD_VIEWS: &[ViewDescriptor] = &[
    ViewDescriptor {
        key: ViewKey::Menu,
        url: "menu.html",
        css: &["estilos2.css"],
    },
    ViewDescriptor {
        key: ViewKey::Servicio,
        url: "servicio.html",
        css: &["estilos-servicios.css"],
    },
    ViewDescriptor {
        key: ViewKey::Nosotros,
        url: "nosotros.html",
        css: &["estilosnosotros.css"],
    },
];

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RouteTable {
    /// Get the standard route table
    pub fn standard() -> Self {
        Self {
            views: STANDARD_VIEWS,
        }
    }

    /// Look up the descriptor for a view key.
    ///
    /// Returns `None` only for a table that does not cover the key; the
    /// standard table is total over [`ViewKey`].
    pub fn get(&self, key: ViewKey) -> Option<&ViewDescriptor> {
        self.views.iter().find(|v| v.key == key)
    }

    /// Resolve a fragment straight to its descriptor
    pub fn descriptor_for_hash(&self, hash: &str) -> Option<&ViewDescriptor> {
        self.get(ViewKey::resolve(hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_prefixes() {
        assert_eq!(ViewKey::resolve("#/servicio"), ViewKey::Servicio);
        assert_eq!(ViewKey::resolve("#/servicios-extra"), ViewKey::Servicio);
        assert_eq!(ViewKey::resolve("#/nosotros"), ViewKey::Nosotros);
        assert_eq!(ViewKey::resolve("#/nosotros/equipo"), ViewKey::Nosotros);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(ViewKey::resolve("#/SERVICIO"), ViewKey::Servicio);
        assert_eq!(ViewKey::resolve("#/NoSoTrOs"), ViewKey::Nosotros);
    }

    #[test]
    fn test_resolve_defaults_to_menu() {
        assert_eq!(ViewKey::resolve(""), ViewKey::Menu);
        assert_eq!(ViewKey::resolve("#"), ViewKey::Menu);
        assert_eq!(ViewKey::resolve("#/"), ViewKey::Menu);
        assert_eq!(ViewKey::resolve("#/menu"), ViewKey::Menu);
        assert_eq!(ViewKey::resolve("#/unknown"), ViewKey::Menu);
        // Prefix rules require the leading "#/"
        assert_eq!(ViewKey::resolve("servicio"), ViewKey::Menu);
    }

    #[test]
    fn test_id_round_trip() {
        for key in ViewKey::all() {
            assert_eq!(ViewKey::from_id(key.id()), Some(*key));
        }
        assert_eq!(ViewKey::from_id("MENU"), Some(ViewKey::Menu));
        assert_eq!(ViewKey::from_id("none"), None);
    }

    #[test]
    fn test_standard_table_is_total() {
        let table = RouteTable::standard();
        for key in ViewKey::all() {
            let desc = table.get(*key).expect("standard table covers every key");
            assert_eq!(desc.key, *key);
            assert!(!desc.url.is_empty());
            assert!(!desc.css.is_empty());
        }
    }

    #[test]
    fn test_descriptor_for_hash() {
        let table = RouteTable::standard();
        let desc = table.descriptor_for_hash("#/servicio").unwrap();
        assert_eq!(desc.url, "servicio.html");
        assert_eq!(desc.css, &["estilos-servicios.css"]);

        let desc = table.descriptor_for_hash("#/anything-else").unwrap();
        assert_eq!(desc.url, "menu.html");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Resolution is total: every fragment maps to exactly one key
        #[test]
        fn resolve_total(hash in ".*") {
            let key = ViewKey::resolve(&hash);
            prop_assert!(ViewKey::all().contains(&key));
        }

        /// Resolution ignores ASCII case
        #[test]
        fn resolve_case_insensitive(hash in "[ -~]*") {
            let upper = hash.to_uppercase();
            prop_assert_eq!(ViewKey::resolve(&hash), ViewKey::resolve(&upper));
        }

        /// Anything after a matching prefix does not change the result
        #[test]
        fn resolve_prefix_stable(tail in "[ -~]*") {
            prop_assert_eq!(
                ViewKey::resolve(&format!("#/servicio{}", tail)),
                ViewKey::Servicio
            );
            prop_assert_eq!(
                ViewKey::resolve(&format!("#/nosotros{}", tail)),
                ViewKey::Nosotros
            );
        }
    }
}

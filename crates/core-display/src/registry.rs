//! Tag-code registry.
//!
//! Tag names are interned on first use; the i-th interned name is issued the
//! open code `-(2i + 1)` and the close code `-(2i + 2)`. Length prefixes in a
//! tag stream are non-negative, so a consumer can classify any element by
//! sign, and open vs close by parity, without consulting the registry.

use ahash::AHashMap;
use std::cell::RefCell;
use std::sync::Arc;

/// True when `code` is an open-tag code (negative, odd).
pub fn is_open_tag_code(code: i32) -> bool {
    code < 0 && code % 2 == -1
}

/// True when `code` is a close-tag code (negative, even).
pub fn is_close_tag_code(code: i32) -> bool {
    code < 0 && code % 2 == 0
}

/// Issues stable open/close codes for tag names within one display-layer
/// lifetime. Interning uses interior mutability so lookups work through the
/// shared `DisplayContext` borrow; the registry is single-threaded like the
/// rest of the build path.
#[derive(Debug, Default)]
pub struct TagRegistry {
    ids: RefCell<AHashMap<Arc<str>, i32>>,
    names: RefCell<Vec<Arc<str>>>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn id_for(&self, name: &str) -> i32 {
        if let Some(&id) = self.ids.borrow().get(name) {
            return id;
        }
        let mut names = self.names.borrow_mut();
        let id = names.len() as i32;
        let name: Arc<str> = Arc::from(name);
        names.push(name.clone());
        self.ids.borrow_mut().insert(name, id);
        id
    }

    pub fn code_for_open_tag(&self, name: &str) -> i32 {
        -(2 * self.id_for(name) + 1)
    }

    pub fn code_for_close_tag(&self, name: &str) -> i32 {
        -(2 * self.id_for(name) + 2)
    }

    /// Reverse lookup for diagnostics and tests.
    pub fn tag_for_code(&self, code: i32) -> Option<Arc<str>> {
        if code >= 0 {
            return None;
        }
        let id = (-code - 1) / 2;
        self.names.borrow().get(id as usize).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_and_distinct() {
        let registry = TagRegistry::new();
        let open = registry.code_for_open_tag("hard-tab");
        let close = registry.code_for_close_tag("hard-tab");
        assert_ne!(open, close);
        assert_eq!(open, registry.code_for_open_tag("hard-tab"));
        assert_eq!(close, registry.code_for_close_tag("hard-tab"));
    }

    #[test]
    fn open_and_close_codes_pair_by_parity() {
        let registry = TagRegistry::new();
        let open = registry.code_for_open_tag("leading-whitespace");
        let close = registry.code_for_close_tag("leading-whitespace");
        assert!(is_open_tag_code(open));
        assert!(is_close_tag_code(close));
        assert_eq!(close, open - 1);
    }

    #[test]
    fn distinct_names_get_distinct_codes() {
        let registry = TagRegistry::new();
        let a = registry.code_for_open_tag("hard-tab");
        let b = registry.code_for_open_tag("fold-marker");
        assert_ne!(a, b);
    }

    #[test]
    fn reverse_lookup_round_trips() {
        let registry = TagRegistry::new();
        let open = registry.code_for_open_tag("eol");
        let close = registry.code_for_close_tag("eol");
        assert_eq!(&*registry.tag_for_code(open).unwrap(), "eol");
        assert_eq!(&*registry.tag_for_code(close).unwrap(), "eol");
        assert_eq!(registry.tag_for_code(3), None);
    }

    #[test]
    fn length_prefixes_are_never_tag_codes() {
        for length in [0, 1, 7, i32::MAX] {
            assert!(!is_open_tag_code(length));
            assert!(!is_close_tag_code(length));
        }
    }
}

//! The lexically scoped `xml:base`, `xml:lang` and `its:dir` values.

use arbor_api::model::BaseDirection;
use oxiri::{Iri, IriRef};
use std::collections::HashMap;
use std::rc::Rc;

/// The maximal number of resolved IRIs kept for each base IRI.
pub const IRI_CACHE_CAPACITY: usize = 8192;

/// A base IRI as declared by `xml:base`.
///
/// A relative base is kept around: it is only an error to resolve something against it.
#[derive(Debug, Clone)]
pub(crate) enum BaseIri {
    Absolute(Iri<String>),
    Relative(IriRef<String>),
}

impl BaseIri {
    pub fn as_str(&self) -> &str {
        match self {
            BaseIri::Absolute(iri) => iri.as_str(),
            BaseIri::Relative(iri) => iri.as_str(),
        }
    }
}

/// Changes requested by the attributes of one element.
#[derive(Debug, Default)]
pub(crate) struct ScopeChange {
    pub base: Option<BaseIri>,
    /// The empty string removes the language.
    pub language: Option<String>,
    pub direction: Option<BaseDirection>,
}

impl ScopeChange {
    pub fn is_empty(&self) -> bool {
        self.base.is_none() && self.language.is_none() && self.direction.is_none()
    }
}

#[derive(Debug, Clone)]
struct ScopeFrame {
    base: Option<Rc<BaseIri>>,
    language: Option<String>,
    direction: Option<BaseDirection>,
    cache: usize,
}

/// Bounded map from lexical IRIs to their resolved value, for a single base IRI.
#[derive(Debug, Default)]
pub(crate) struct IriCache {
    entries: HashMap<String, String>,
}

impl IriCache {
    pub fn get(&self, lexical: &str) -> Option<&str> {
        self.entries.get(lexical).map(String::as_str)
    }

    pub fn insert(&mut self, lexical: String, iri: String) {
        if self.entries.len() >= IRI_CACHE_CAPACITY {
            self.entries.clear();
        }
        self.entries.insert(lexical, iri);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// The live base, language and direction, with the values to restore on each element end.
///
/// Cache `0` is kept for IRIs that are resolved without any base.
#[derive(Debug)]
pub(crate) struct ScopeStack {
    current: ScopeFrame,
    saved: Vec<ScopeFrame>,
    pub(crate) caches: Vec<IriCache>,
    cache_by_base: HashMap<String, usize>,
}

impl ScopeStack {
    pub fn new(base: Option<Iri<String>>) -> Self {
        let mut stack = Self {
            current: ScopeFrame {
                base: None,
                language: None,
                direction: None,
                cache: 0,
            },
            saved: Vec::new(),
            caches: vec![IriCache::default()],
            cache_by_base: HashMap::new(),
        };
        if let Some(base) = base {
            stack.current.cache = stack.cache_for(base.as_str());
            stack.current.base = Some(Rc::new(BaseIri::Absolute(base)));
        }
        stack
    }

    /// Saves the live values and applies the change on top of them.
    pub fn push(&mut self, change: ScopeChange) {
        self.saved.push(self.current.clone());
        if let Some(base) = change.base {
            self.current.cache = self.cache_for(base.as_str());
            self.current.base = Some(Rc::new(base));
        }
        if let Some(language) = change.language {
            self.current.language = if language.is_empty() {
                None
            } else {
                Some(language)
            };
        }
        if let Some(direction) = change.direction {
            self.current.direction = Some(direction);
        }
    }

    /// Restores the values saved by the matching `push`.
    pub fn pop(&mut self) {
        debug_assert!(!self.saved.is_empty(), "unbalanced scope pop");
        if let Some(frame) = self.saved.pop() {
            self.current = frame;
        }
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub(crate) fn base_iri(&self) -> Option<&BaseIri> {
        self.current.base.as_deref()
    }

    pub fn base(&self) -> Option<&str> {
        self.base_iri().map(BaseIri::as_str)
    }

    pub fn language(&self) -> Option<&str> {
        self.current.language.as_deref()
    }

    pub fn direction(&self) -> Option<BaseDirection> {
        self.current.direction
    }

    pub(crate) fn cache_index(&self) -> usize {
        self.current.cache
    }

    fn cache_for(&mut self, base: &str) -> usize {
        if let Some(index) = self.cache_by_base.get(base) {
            return *index;
        }
        let index = self.caches.len();
        self.caches.push(IriCache::default());
        self.cache_by_base.insert(base.to_owned(), index);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn absolute(iri: &str) -> BaseIri {
        BaseIri::Absolute(Iri::parse(iri.to_owned()).unwrap())
    }

    #[test]
    fn nested_pushes_are_restored() {
        let mut scopes = ScopeStack::new(None);
        scopes.push(ScopeChange {
            base: Some(absolute("http://example.com/a/")),
            language: Some("en".into()),
            direction: None,
        });
        scopes.push(ScopeChange {
            language: Some("fr".into()),
            direction: Some(BaseDirection::Rtl),
            ..ScopeChange::default()
        });
        scopes.push(ScopeChange {
            base: Some(absolute("http://example.com/b/")),
            language: Some(String::new()),
            direction: None,
        });
        assert_eq!(scopes.base(), Some("http://example.com/b/"));
        assert_eq!(scopes.language(), None);
        assert_eq!(scopes.direction(), Some(BaseDirection::Rtl));

        scopes.pop();
        assert_eq!(scopes.base(), Some("http://example.com/a/"));
        assert_eq!(scopes.language(), Some("fr"));
        scopes.pop();
        assert_eq!(scopes.language(), Some("en"));
        assert_eq!(scopes.direction(), None);
        scopes.pop();
        assert_eq!(scopes.base(), None);
        assert_eq!(scopes.depth(), 0);
        assert_eq!(scopes.cache_index(), 0);
    }

    #[test]
    fn caches_are_shared_by_base() {
        let mut scopes = ScopeStack::new(Some(
            Iri::parse("http://example.com/".to_owned()).unwrap(),
        ));
        let initial = scopes.cache_index();
        scopes.push(ScopeChange {
            base: Some(absolute("http://example.com/other/")),
            ..ScopeChange::default()
        });
        let other = scopes.cache_index();
        assert_ne!(initial, other);
        scopes.push(ScopeChange {
            base: Some(absolute("http://example.com/")),
            ..ScopeChange::default()
        });
        assert_eq!(scopes.cache_index(), initial);
    }

    #[test]
    fn cache_is_bounded() {
        let mut cache = IriCache::default();
        for i in 0..=IRI_CACHE_CAPACITY {
            cache.insert(i.to_string(), i.to_string());
        }
        assert!(cache.len() <= IRI_CACHE_CAPACITY);
        assert_eq!(cache.get(&IRI_CACHE_CAPACITY.to_string()), Some("8192"));
    }
}

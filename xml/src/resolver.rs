use crate::error::RdfXmlError;
use crate::scope::{BaseIri, ScopeStack};
use arbor_api::model::NamedNode;
use oxiri::{Iri, IriRef};

impl ScopeStack {
    /// Resolves `lexical` against the live base IRI.
    ///
    /// Fails if the result is not an absolute IRI.
    pub fn resolve(&mut self, lexical: &str) -> Result<NamedNode, RdfXmlError> {
        let index = self.cache_index();
        if let Some(iri) = self.caches[index].get(lexical) {
            return Ok(NamedNode::new(iri));
        }
        let iri = match self.base_iri() {
            Some(BaseIri::Absolute(base)) => base
                .resolve(lexical)
                .map_err(|e| RdfXmlError::invalid_iri(lexical, e))?
                .into_inner(),
            Some(BaseIri::Relative(_)) | None => parse_absolute(lexical)?,
        };
        self.caches[index].insert(lexical.to_owned(), iri.clone());
        Ok(NamedNode::new(iri))
    }

    /// Validates an IRI built from a namespace and a local name.
    ///
    /// The base IRI is never used: the no-base cache is shared by all scopes.
    pub fn resolve_direct(&mut self, iri: String) -> Result<NamedNode, RdfXmlError> {
        if let Some(resolved) = self.caches[0].get(&iri) {
            return Ok(NamedNode::new(resolved));
        }
        let resolved = parse_absolute(&iri)?;
        self.caches[0].insert(iri, resolved.clone());
        Ok(NamedNode::new(resolved))
    }

    /// Interprets the value of an `xml:base` attribute.
    ///
    /// The result might be relative if there is no absolute base IRI in scope.
    pub(crate) fn resolve_base_candidate(&self, lexical: &str) -> Result<BaseIri, RdfXmlError> {
        if let Some(BaseIri::Absolute(base)) = self.base_iri() {
            return Ok(BaseIri::Absolute(
                base.resolve(lexical)
                    .map_err(|e| RdfXmlError::invalid_iri(lexical, e))?,
            ));
        }
        let reference = IriRef::parse(lexical.to_owned())
            .map_err(|e| RdfXmlError::invalid_iri(lexical, e))?;
        if reference.is_absolute() {
            Ok(BaseIri::Absolute(
                Iri::parse(reference.into_inner())
                    .map_err(|e| RdfXmlError::invalid_iri(lexical, e))?,
            ))
        } else {
            Ok(BaseIri::Relative(reference))
        }
    }
}

fn parse_absolute(lexical: &str) -> Result<String, RdfXmlError> {
    match IriRef::parse(lexical) {
        Ok(iri) if iri.is_absolute() => Ok(lexical.to_owned()),
        Ok(_) => Err(RdfXmlError::relative_iri(lexical)),
        Err(error) => Err(RdfXmlError::invalid_iri(lexical, error)),
    }
}

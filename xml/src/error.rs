use arbor_api::parser::{ParseError, TextPosition};
use oxiri::IriParseError;
use std::error::Error;
use std::fmt;
use std::io;

/// Error that might be returned during parsing.
///
/// It might wrap an IO error, a low-level XML error, a grammar violation or an error raised by the sink.
#[derive(Debug)]
pub struct RdfXmlError {
    pub(crate) kind: RdfXmlErrorKind,
    pub(crate) position: Option<TextPosition>,
}

#[derive(Debug)]
pub enum RdfXmlErrorKind {
    Xml(quick_xml::Error),
    PrematureEof,
    InvalidUtf8,
    /// An undeclared prefix or an invalid namespace declaration.
    Namespace(String),
    InvalidIri {
        iri: String,
        error: IriParseError,
    },
    RelativeIri {
        iri: String,
    },
    Syntax(String),
    Sink(Box<dyn Error + Send + Sync>),
}

impl RdfXmlError {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self {
            kind: RdfXmlErrorKind::Syntax(message.into()),
            position: None,
        }
    }

    pub(crate) fn at(mut self, position: TextPosition) -> Self {
        if self.position.is_none() {
            self.position = Some(position);
        }
        self
    }

    pub(crate) fn namespace(message: impl Into<String>) -> Self {
        Self {
            kind: RdfXmlErrorKind::Namespace(message.into()),
            position: None,
        }
    }

    pub(crate) fn invalid_iri(iri: impl Into<String>, error: IriParseError) -> Self {
        Self {
            kind: RdfXmlErrorKind::InvalidIri {
                iri: iri.into(),
                error,
            },
            position: None,
        }
    }

    pub(crate) fn relative_iri(iri: impl Into<String>) -> Self {
        Self {
            kind: RdfXmlErrorKind::RelativeIri { iri: iri.into() },
            position: None,
        }
    }

    pub(crate) fn sink(error: impl Error + Send + Sync + 'static) -> Self {
        Self {
            kind: RdfXmlErrorKind::Sink(Box::new(error)),
            position: None,
        }
    }

    pub fn kind(&self) -> &RdfXmlErrorKind {
        &self.kind
    }

    /// Malformed low-level markup, as opposed to a violation of the RDF/XML grammar.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            RdfXmlErrorKind::Xml(_)
                | RdfXmlErrorKind::PrematureEof
                | RdfXmlErrorKind::InvalidUtf8
                | RdfXmlErrorKind::Namespace(_)
        )
    }
}

impl fmt::Display for RdfXmlErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfXmlErrorKind::Xml(error) => write!(f, "{}", error),
            RdfXmlErrorKind::PrematureEof => write!(f, "premature end of file"),
            RdfXmlErrorKind::InvalidUtf8 => write!(f, "the document is not valid UTF-8"),
            RdfXmlErrorKind::InvalidIri { iri, error } => {
                write!(f, "error while parsing IRI '{}': {}", iri, error)
            }
            RdfXmlErrorKind::RelativeIri { iri } => write!(
                f,
                "the relative IRI '{}' cannot be resolved against an absolute base IRI",
                iri
            ),
            RdfXmlErrorKind::Namespace(message) | RdfXmlErrorKind::Syntax(message) => {
                write!(f, "{}", message)
            }
            RdfXmlErrorKind::Sink(error) => write!(f, "the triple sink failed: {}", error),
        }
    }
}

impl fmt::Display for RdfXmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(position) = self.position {
            write!(
                f,
                " on line {} at column {}",
                position.line_number(),
                position.column_number()
            )?;
        }
        Ok(())
    }
}

impl Error for RdfXmlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            RdfXmlErrorKind::Xml(error) => Some(error),
            RdfXmlErrorKind::InvalidIri { error, .. } => Some(error),
            RdfXmlErrorKind::Sink(error) => Some(error.as_ref()),
            _ => None,
        }
    }
}

impl ParseError for RdfXmlError {
    fn textual_position(&self) -> Option<TextPosition> {
        self.position
    }
}

impl From<quick_xml::Error> for RdfXmlError {
    fn from(error: quick_xml::Error) -> Self {
        Self {
            kind: RdfXmlErrorKind::Xml(error),
            position: None,
        }
    }
}

impl From<RdfXmlError> for io::Error {
    fn from(error: RdfXmlError) -> Self {
        match error.kind {
            RdfXmlErrorKind::Xml(quick_xml::Error::Io(error)) => {
                io::Error::new(error.kind(), error.to_string())
            }
            _ => io::Error::new(io::ErrorKind::InvalidData, error),
        }
    }
}

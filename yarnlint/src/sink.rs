use std::collections::BTreeMap;

use crate::scanner::Diagnostic;

/// Published diagnostics, keyed by document identity.
///
/// Publishing replaces whatever was stored for that document; sets from
/// different scans are never merged.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    by_document: BTreeMap<String, Vec<Diagnostic>>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, uri: impl Into<String>, diagnostics: Vec<Diagnostic>) {
        self.by_document.insert(uri.into(), diagnostics);
    }

    pub fn get(&self, uri: &str) -> Option<&[Diagnostic]> {
        self.by_document.get(uri).map(Vec::as_slice)
    }

    pub fn remove(&mut self, uri: &str) -> Option<Vec<Diagnostic>> {
        self.by_document.remove(uri)
    }

    /// Documents in identity order, with their diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Diagnostic])> {
        self.by_document
            .iter()
            .map(|(uri, diags)| (uri.as_str(), diags.as_slice()))
    }

    /// Number of diagnostics across all documents.
    pub fn total(&self) -> usize {
        self.by_document.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

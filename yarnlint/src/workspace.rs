use std::collections::BTreeMap;

use crate::document::Document;
use crate::scanner::{Diagnostic, maybe_scan};
use crate::schema::CommandSchema;
use crate::sink::DiagnosticSink;

/// The set of open documents plus the current schema.
///
/// Opening or changing a document rescans it; replacing the schema rescans
/// every open document. Non-Yarn documents are tracked but never scanned.
#[derive(Debug, Default)]
pub struct Workspace {
    schema: Option<CommandSchema>,
    documents: BTreeMap<String, Document>,
    sink: DiagnosticSink,
}

impl Workspace {
    pub fn new(schema: Option<CommandSchema>) -> Self {
        Workspace {
            schema,
            ..Self::default()
        }
    }

    pub fn open(&mut self, document: Document) {
        let uri = document.uri().to_string();
        self.documents.insert(uri.clone(), document);
        self.rescan(&uri);
    }

    /// A new version of an open document replaces the old one.
    pub fn change(&mut self, document: Document) {
        self.open(document);
    }

    pub fn close(&mut self, uri: &str) {
        self.documents.remove(uri);
        self.sink.remove(uri);
    }

    pub fn set_schema(&mut self, schema: Option<CommandSchema>) {
        self.schema = schema;
        tracing::debug!(documents = self.documents.len(), "schema changed, rescanning");
        let uris: Vec<String> = self.documents.keys().cloned().collect();
        for uri in uris {
            self.rescan(&uri);
        }
    }

    pub fn diagnostics(&self, uri: &str) -> Option<&[Diagnostic]> {
        self.sink.get(uri)
    }

    pub fn sink(&self) -> &DiagnosticSink {
        &self.sink
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    fn rescan(&mut self, uri: &str) {
        let Some(document) = self.documents.get(uri) else {
            return;
        };
        if let Some(diagnostics) = maybe_scan(document, self.schema.as_ref()) {
            self.sink.publish(uri, diagnostics);
        }
    }
}

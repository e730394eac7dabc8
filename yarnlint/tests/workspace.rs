use yarnlint::{CommandDef, CommandSchema, ContentKind, DiagnosticSink, Document, Workspace};

const WAITS: &str = "title: Start\n---\n<<wait soon>>\n===\n";

fn wait_schema() -> CommandSchema {
    CommandSchema::default().with_command("wait", CommandDef::new().arity(1).types(["number"]))
}

#[test]
fn open_publishes_diagnostics() {
    let mut workspace = Workspace::new(None);
    workspace.open(Document::yarn("a.yarn", "title: A\n---\n<<endif>>\n===\n"));
    workspace.open(Document::yarn("b.yarn", "title: B\n---\n===\n"));

    assert_eq!(workspace.diagnostics("a.yarn").map(<[_]>::len), Some(1));
    assert_eq!(workspace.diagnostics("b.yarn"), Some(&[][..]));
    assert_eq!(workspace.sink().total(), 1);
}

#[test]
fn non_yarn_documents_are_not_scanned() {
    let mut workspace = Workspace::new(None);
    workspace.open(Document::new(
        "notes.md",
        ContentKind::Other("md".into()),
        "# not yarn\n",
    ));
    assert_eq!(workspace.diagnostics("notes.md"), None);
    assert_eq!(workspace.documents().count(), 1);
}

#[test]
fn change_replaces_previous_set() {
    let mut workspace = Workspace::new(None);
    workspace.open(Document::yarn("a.yarn", "title: A\n---\n<<endif>>\n<<endif>>\n===\n"));
    assert_eq!(workspace.diagnostics("a.yarn").map(<[_]>::len), Some(2));

    workspace.change(Document::yarn("a.yarn", "title: A\n---\n===\n"));
    assert_eq!(workspace.diagnostics("a.yarn"), Some(&[][..]));
}

#[test]
fn schema_change_rescans_open_documents() {
    let mut workspace = Workspace::new(None);
    workspace.open(Document::yarn("a.yarn", WAITS));
    assert_eq!(workspace.diagnostics("a.yarn"), Some(&[][..]));

    workspace.set_schema(Some(wait_schema()));
    let diags = workspace.diagnostics("a.yarn").expect("scanned");
    assert_eq!(diags.len(), 1);
    assert!(diags[0].message.starts_with(r#"Invalid value "soon""#));

    workspace.set_schema(Some(wait_schema()));
    assert_eq!(workspace.diagnostics("a.yarn").map(<[_]>::len), Some(1));

    workspace.set_schema(None);
    assert_eq!(workspace.diagnostics("a.yarn"), Some(&[][..]));
}

#[test]
fn close_drops_diagnostics() {
    let mut workspace = Workspace::new(Some(wait_schema()));
    workspace.open(Document::yarn("a.yarn", WAITS));
    assert!(workspace.diagnostics("a.yarn").is_some());

    workspace.close("a.yarn");
    assert_eq!(workspace.diagnostics("a.yarn"), None);
    assert!(workspace.sink().is_empty());
}

#[test]
fn sink_publish_replaces() {
    let document = Document::yarn("a.yarn", "title: A\n---\n<<endif>>\n");
    let diags = yarnlint::scan(&document, None);
    assert_eq!(diags.len(), 2);

    let mut sink = DiagnosticSink::new();
    sink.publish("a.yarn", diags.clone());
    sink.publish("a.yarn", diags[..1].to_vec());
    assert_eq!(sink.get("a.yarn"), Some(&diags[..1]));

    sink.publish("b.yarn", Vec::new());
    let uris: Vec<&str> = sink.iter().map(|(uri, _)| uri).collect();
    assert_eq!(uris, vec!["a.yarn", "b.yarn"]);
}

#[test]
fn maybe_scan_respects_content_kind() {
    let yarn = Document::yarn("a.yarn", "title: A\n---\n===\n");
    assert_eq!(yarnlint::maybe_scan(&yarn, None), Some(vec![]));

    let other = Document::new("a.txt", ContentKind::from_path("a.txt".as_ref()), "");
    assert_eq!(yarnlint::maybe_scan(&other, None), None);
    assert!(ContentKind::from_path("dir/Start.YARN".as_ref()).is_yarn());
}

#[test]
fn byte_offsets_for_rendering() {
    let document = Document::yarn("a.yarn", "title: A\r\n---\r\n<<wait ünö>>\r\n");
    let range = yarnlint::SourceRange::on_line(2, 7, 10);
    let span = document.byte_span(range);
    assert_eq!(&"title: A\r\n---\r\n<<wait ünö>>\r\n"[span], "ünö");
    assert_eq!(document.byte_offset(yarnlint::Position::new(9, 0)), 31);
}

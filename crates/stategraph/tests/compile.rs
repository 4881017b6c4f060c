//! Integration tests for GraphBuilder::compile: validation and node table.

use stategraph::{ActionError, CompileError, GraphBuilder, RunContext, END};

async fn echo(s: String, _ctx: RunContext) -> Result<String, ActionError<String>> {
    Ok(s)
}

#[tokio::test]
async fn compile_fails_without_entry_point() {
    let mut builder = GraphBuilder::new();
    builder.add_node("a", echo).add_edge("a", END);

    let err = builder.compile().unwrap_err();
    assert_eq!(err, CompileError::EntryPointNotSet);
    assert_eq!(err.to_string(), "entry point not set");
}

#[tokio::test]
async fn compile_fails_when_entry_point_is_unknown() {
    let mut builder = GraphBuilder::new();
    builder
        .add_node("a", echo)
        .add_edge("a", END)
        .set_entry_point("boot");

    let err = builder.compile().unwrap_err();
    assert_eq!(err, CompileError::EntryPointNotFound("boot".to_string()));
    assert_eq!(err.to_string(), "entry point boot not found");
}

#[tokio::test]
async fn compile_fails_when_simple_edge_target_is_unknown() {
    let mut builder = GraphBuilder::new();
    builder
        .add_node("a", echo)
        .add_edge("a", "missing")
        .set_entry_point("a");

    let err = builder.compile().unwrap_err();
    assert_eq!(err, CompileError::TargetNotFound("missing".to_string()));
    assert_eq!(err.to_string(), "target node missing not found");
}

#[tokio::test]
async fn compile_fails_when_edge_source_is_unknown() {
    let mut builder = GraphBuilder::new();
    builder
        .add_node("a", echo)
        .add_edge("ghost", "a")
        .set_entry_point("a");

    let err = builder.compile().unwrap_err();
    assert_eq!(err, CompileError::SourceNotFound("ghost".to_string()));
    assert_eq!(err.to_string(), "source node ghost not found");
}

#[tokio::test]
async fn edge_with_both_ends_unknown_reports_the_source() {
    let mut builder = GraphBuilder::new();
    builder
        .add_node("a", echo)
        .add_edge("ghost", "missing")
        .set_entry_point("a");

    let err = builder.compile().unwrap_err();
    assert_eq!(err, CompileError::SourceNotFound("ghost".to_string()));
}

#[tokio::test]
async fn end_node_is_synthesised_when_not_registered() {
    let mut builder = GraphBuilder::new();
    builder
        .add_node("a", echo)
        .add_edge("a", END)
        .set_entry_point("a");

    let graph = builder.compile().unwrap();
    let end = graph.node(END).expect("END present");
    assert_eq!(end.name(), END);
    assert_eq!(end.edge_count(), 0);
}

#[tokio::test]
async fn registering_end_is_allowed_and_its_action_is_ignored() {
    async fn tag(s: String, _ctx: RunContext) -> Result<String, ActionError<String>> {
        Ok(s + "-Z")
    }

    let mut builder = GraphBuilder::new();
    builder
        .add_node("a", echo)
        .add_node(END, tag)
        .add_edge("a", END)
        .set_entry_point("a");
    let graph = builder.compile().unwrap();

    let trace = graph.stream("hi".to_string(), RunContext::new()).await.unwrap();

    // END terminates the run; its registered action never fires and END never
    // appears in the trace.
    assert_eq!(trace.len(), 2);
    assert_eq!(trace.last().unwrap().state, "hi");
    assert!(trace.iter().all(|item| item.node != END));
}

#[tokio::test]
async fn equivalent_builders_compile_to_the_same_structure() {
    let build = || {
        let mut builder = GraphBuilder::new();
        builder
            .add_node("a", echo)
            .add_node("b", echo)
            .add_edge("a", "b")
            .add_edge("b", END)
            .set_entry_point("a");
        builder
    };

    let first = build().compile().unwrap();
    let second = build().compile().unwrap();

    let mut first_names: Vec<_> = first.node_names().map(str::to_string).collect();
    let mut second_names: Vec<_> = second.node_names().map(str::to_string).collect();
    first_names.sort();
    second_names.sort();
    assert_eq!(first_names, second_names);
    assert_eq!(first.entry_point(), second.entry_point());

    let first_trace = first.stream("s".to_string(), RunContext::new()).await.unwrap();
    let second_trace = second.stream("s".to_string(), RunContext::new()).await.unwrap();
    assert_eq!(first_trace, second_trace);
}

#[tokio::test]
async fn builder_stays_usable_after_a_failed_compile() {
    let mut builder = GraphBuilder::new();
    builder.add_node("a", echo).add_edge("a", END);

    assert_eq!(builder.compile().unwrap_err(), CompileError::EntryPointNotSet);

    builder.set_entry_point("a");
    assert!(builder.compile().is_ok());
}

#[tokio::test]
async fn compiled_graph_debug_lists_entry_and_node_names() {
    let mut builder = GraphBuilder::new();
    builder
        .add_node("a", echo)
        .add_edge("a", END)
        .set_entry_point("a");
    let graph = builder.compile().unwrap();

    let rendered = format!("{graph:?}");
    assert_eq!(rendered, r#"Graph { entry: "a", nodes: ["END", "a"] }"#);
}

#[test]
#[should_panic(expected = "node with name a already exists")]
fn duplicate_node_registration_panics() {
    let mut builder = GraphBuilder::new();
    builder.add_node("a", echo);
    builder.add_node("a", echo);
}

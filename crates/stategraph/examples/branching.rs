//! Branching demo: classify the input, route to one of two nodes, print the
//! trace. Run with `RUST_LOG=stategraph=trace` to see the driver's steps.

use stategraph::{ActionError, BoxError, GraphBuilder, RunContext, END};
use tracing_subscriber::EnvFilter;

async fn classify(s: String, _ctx: RunContext) -> Result<String, ActionError<String>> {
    Ok(s)
}

async fn route(s: String, _ctx: RunContext) -> Result<String, BoxError> {
    Ok(if s.starts_with('y') {
        "approve".to_string()
    } else {
        "reject".to_string()
    })
}

async fn approve(s: String, _ctx: RunContext) -> Result<String, ActionError<String>> {
    Ok(format!("{s}: approved"))
}

async fn reject(s: String, _ctx: RunContext) -> Result<String, ActionError<String>> {
    Ok(format!("{s}: rejected"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut builder = GraphBuilder::new();
    builder
        .add_node("classify", classify)
        .add_node("approve", approve)
        .add_node("reject", reject)
        .add_conditional_edge("classify", route)
        .add_edge("approve", END)
        .add_edge("reject", END)
        .set_entry_point("classify");
    let graph = builder.compile()?;

    for input in ["yes please", "not today"] {
        let trace = graph.stream(input.to_string(), RunContext::new()).await?;
        for item in &trace {
            println!("{:>10} | {}", item.node, item.state);
        }
        println!();
    }

    Ok(())
}

use std::path::Path;
use tasklines_core::error::Result;
use tasklines_core::{Document, Query};

use super::Context;

/// Print the tasks in `file` that pass `queries`, in query order.
pub fn run(
    ctx: &Context,
    file: &Path,
    queries: &[String],
    json: bool,
) -> Result<()> {
    let query = Query::parse(queries)?;
    let doc = Document::load(file)?;
    let tasks = query.apply(doc.tasks(&ctx.registry));

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    for task in &tasks {
        println!("{}: {}", task.location.line_number + 1, task.to_markdown());
    }
    Ok(())
}

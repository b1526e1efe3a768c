//! Status change commands: `status`, `toggle` and `done`.

use std::path::Path;
use tasklines_core::error::Result;
use tasklines_core::markdown::to_lines;
use tasklines_core::{CoreError, Document, Status, StatusRegistry, StatusType, Task};
use tracing::debug;

use super::{line_index, Context};

/// Apply the status registered under `indicator`.
pub fn set(ctx: &Context, file: &Path, line: usize, indicator: char) -> Result<()> {
    let status = ctx
        .registry
        .get(indicator)
        .cloned()
        .ok_or_else(|| CoreError::Custom(format!("unknown status indicator: '{indicator}'")))?;
    apply(ctx, file, line, |_, _| status)
}

/// Apply the status the task's current one points to.
pub fn toggle(ctx: &Context, file: &Path, line: usize) -> Result<()> {
    apply(ctx, file, line, |task, registry| {
        registry.next_status(&task.status)
    })
}

/// Apply the first registered done status.
pub fn done(ctx: &Context, file: &Path, line: usize) -> Result<()> {
    apply(ctx, file, line, |_, registry| {
        registry
            .first_of_type(StatusType::Done)
            .cloned()
            .unwrap_or_else(Status::make_done)
    })
}

fn apply(
    ctx: &Context,
    file: &Path,
    line: usize,
    pick: impl FnOnce(&Task, &StatusRegistry) -> Status,
) -> Result<()> {
    let mut doc = Document::load(file)?;
    let task = doc.task_at(line_index(line)?, &ctx.registry)?;
    let new_status = pick(&task, &ctx.registry);
    debug!(line, from = %task.status, to = %new_status, "applying status");

    let replacements =
        task.apply_status_with_options(new_status, ctx.clock(), &ctx.config.transition_options());
    doc.replace_task(&task, &replacements)?;
    doc.save()?;

    if replacements.is_empty() {
        println!("removed line {line}");
    }
    for rendered in to_lines(&replacements) {
        println!("{rendered}");
    }
    Ok(())
}

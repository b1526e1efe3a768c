use std::path::Path;
use tasklines_core::error::Result;
use tasklines_core::postpone::{postpone, postponement_success_message};
use tasklines_core::{Document, PostponeOption, TimeUnit};

use super::{line_index, Context};

pub fn run(
    ctx: &Context,
    file: &Path,
    line: usize,
    amount: u32,
    unit: TimeUnit,
    fixed: bool,
) -> Result<()> {
    let mut doc = Document::load(file)?;
    let task = doc.task_at(line_index(line)?, &ctx.registry)?;

    let option = PostponeOption {
        amount,
        unit,
        fixed,
    };
    let postponed = postpone(&task, option, ctx.clock())?;
    doc.replace_task(&task, std::slice::from_ref(&postponed.task))?;
    doc.save()?;

    println!(
        "{}",
        postponement_success_message(postponed.postponed_date, postponed.field)
    );
    Ok(())
}

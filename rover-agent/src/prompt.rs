/// System instruction used when the builder is given none.
pub fn default_instruction(max_actions_per_step: usize) -> String {
    format!(
        "You are a precise browser automation agent. You interact with web pages through the \
         functions you are given, one small step at a time.\n\
         \n\
         Rules:\n\
         - Call at most {max_actions_per_step} functions per turn. They run in order.\n\
         - Every function reports its outcome. Read it before deciding the next step.\n\
         - Elements are addressed with CSS selectors. Use extract_content or extract_links \
         to inspect a page before clicking or typing.\n\
         - If an action fails, try a different approach instead of repeating it.\n\
         - When the task is complete, or cannot be completed, call done with the final answer \
         and whether you succeeded. Include every piece of information the task asked for.\n"
    )
}

/// First user turn of a run.
pub fn task_message(task: &str) -> String {
    format!("Your ultimate task is: \"{}\".", task)
}

//! Instruction texts for the extraction and consolidation calls.

/// Placeholder used for sections with nothing to report.
pub const NO_INFO: &str = "No Relevant Information";

/// A summary section and what belongs in it.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub name: &'static str,
    pub description: &'static str,
}

/// The fixed sections of every call summary, in output order.
pub const SECTIONS: [Section; 7] = [
    Section {
        name: "Team",
        description: "Who is the team behind the startup",
    },
    Section {
        name: "Problem",
        description: "What is the problem the startup is solving and for whom",
    },
    Section {
        name: "Product",
        description: "How does their product solve this problem",
    },
    Section {
        name: "Traction",
        description: "How does their customer traction look like",
    },
    Section {
        name: "Competition",
        description: "How does the competitive landscape look like",
    },
    Section {
        name: "Round Info",
        description: "How much money are they raising from investors currently? How much have they raised before?",
    },
    Section {
        name: "Other",
        description: "Other important points about the founders OR the startup that do not fit in the above sections",
    },
];

fn section_list(suffix: &str) -> String {
    SECTIONS
        .iter()
        .map(|s| format!("- **{}**: <{}{}>\n", s.name, s.description, suffix))
        .collect()
}

/// System instruction for one chunk of transcript.
pub fn chunk_system_prompt() -> String {
    format!(
        "You are a helpful note-taking assistant for a venture capital investor. \
You will be given a part of a transcript for the call between the investor and the startup founder. \
Your task is to extract information covering the following aspects:\n\
{sections}\n\
For every section, always give your answers in bullet points! Otherwise, say \"{NO_INFO}\"",
        sections = section_list(". Answer in bullet points!"),
    )
}

/// System instruction for consolidating chunk summaries.
pub fn reduce_system_prompt() -> String {
    format!(
        "You are a helpful assistant. Your task is to expand the first summary you are given \
by the information in all the subsequent summaries. \
The final summary you provide should cover ALL following sections:\n\
{sections}\n\
Do not leave any empty sections. For every section always give your answers in bullet points! \
Otherwise say \"{NO_INFO}\" infront of the section's name.",
        sections = section_list(""),
    )
}

/// User prompt enumerating summaries as `Summary #i:` blocks, 1-based.
pub fn build_reduce_prompt<S: AsRef<str>>(summaries: &[S]) -> String {
    let mut prompt = String::new();
    for (i, summary) in summaries.iter().enumerate() {
        prompt.push_str(&format!("Summary #{}:\n", i + 1));
        prompt.push_str(summary.as_ref());
        prompt.push_str("\n\n");
    }
    prompt
}

//! Prompt template for hosted chaos analysis.

use crate::request::ContextCategory;

/// Build the instruction prompt for the hosted model.
///
/// Pure and deterministic: identical inputs yield byte-identical output, and
/// the context appears only on the single `Context:` line.
///
/// User text is interpolated verbatim with no escaping, so a message can
/// smuggle its own instructions into the prompt. This mirrors the upstream
/// design and is a known prompt-injection surface; operators must not treat
/// the returned analysis as trusted.
pub fn build_prompt(text: &str, context: ContextCategory) -> String {
    format!(
        "You are an information-integrity analyst. Analyze the following message \
         for its potential to cause social disruption.\n\
         \n\
         Context: {context}\n\
         \n\
         Message:\n\
         \"\"\"\n\
         {text}\n\
         \"\"\"\n\
         \n\
         Rate each dimension from 0 to 10:\n\
         1. Misinformation Potential\n\
         2. Emotional Manipulation\n\
         3. Polarization Pressure\n\
         4. Virality Risk\n\
         \n\
         Then give a single aggregate Chaos Score from 0 to 100, and close with \
         counter-narrative suggestions that could defuse the message."
    )
}
